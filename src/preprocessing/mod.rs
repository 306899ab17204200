//! Built-in transformation units.
//!
//! These units implement [`Transformer`](crate::traits::Transformer) so they
//! can be mapped onto table columns directly or combined into chains. None of
//! them use target labels. All of them take numeric input except
//! [`OrdinalEncoder`], which takes text.
//!
//! # Available Units
//!
//! ## Imputation
//! - [`SimpleImputer`]: Fill missing values with mean, median, most_frequent, or constant
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//! - [`MinMaxScaler`]: Scale to [0, 1] or custom range
//!
//! ## Encoding
//! - [`OneHotEncoder`]: One indicator column per category, sparse output
//! - [`OrdinalEncoder`]: Text labels to integer codes
//!
//! ## Persistence
//! - [`Step`]: Serializable enum over all of the above, for mappers that are saved and reloaded
//!
//! # Example
//!
//! ```ignore
//! use frame_mapper::preprocessing::{ImputeStrategy, SimpleImputer, StandardScaler, Step};
//! use frame_mapper::{DataFrameMapper, FeatureEntry, MapperConfig};
//!
//! let mut mapper = DataFrameMapper::new(
//!     vec![FeatureEntry::chain(
//!         ["age"],
//!         vec![
//!             Step::from(SimpleImputer::new(ImputeStrategy::Median)),
//!             Step::from(StandardScaler::new()),
//!         ],
//!     )],
//!     MapperConfig::default(),
//! );
//! let features = mapper.fit_transform(&table, None)?;
//! ```

pub mod encoding;
pub mod imputation;
pub mod scaling;
mod step;

pub use encoding::{
    HandleUnknown, OneHotEncoder, OneHotEncoderParams, OrdinalEncoder, OrdinalEncoderParams,
};
pub use imputation::{ImputeStrategy, SimpleImputer, SimpleImputerParams};
pub use scaling::{
    MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams, StandardScaler, StandardScalerConfig,
    StandardScalerParams,
};
pub use step::Step;

use crate::error::{MapperError, Result};

/// Fail with `FeatureMismatch` when `got` differs from the width seen during fit.
pub(crate) fn check_features(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(MapperError::FeatureMismatch {
            expected_features: expected,
            got_features: got,
        });
    }
    Ok(())
}

pub(crate) fn not_fitted(name: &str) -> MapperError {
    MapperError::NotFitted(format!("{} must be fitted before transform", name))
}
