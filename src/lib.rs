//! # frame-mapper
//!
//! Map named columns of a table through per-column transformers and stack the
//! results into a single feature matrix for downstream models.
//!
//! ## Core Design Principles
//!
//! - **Selection shapes input**: a single column name yields a 1-D array, a
//!   list of names yields a 2-D array, even when the list has one element.
//! - **Built once**: sequences of units are wrapped into a chain when a feature
//!   entry is created, never on each call.
//! - **Labels only where wanted**: target labels reach only the units that
//!   declare they accept them.
//! - **Text stays text**: tables may hold string columns; they must pass
//!   through a unit that produces numbers before they reach the output.
//! - **Versioned persistence**: saved mappers carry a layout version; legacy
//!   layouts are upgraded on load.
//!
//! ## Quick Start
//!
//! ```ignore
//! use frame_mapper::preprocessing::{OneHotEncoder, SimpleImputer, StandardScaler, Step};
//! use frame_mapper::{DataFrame, DataFrameMapper, FeatureEntry, MapperConfig};
//!
//! let df = DataFrame::from_columns([
//!     ("pet", vec![0.0, 1.0, 2.0, 1.0]),
//!     ("age", vec![2.0, f64::NAN, 4.0, 6.0]),
//! ])?;
//!
//! let mut mapper: DataFrameMapper = DataFrameMapper::new(
//!     vec![
//!         FeatureEntry::single("pet", Step::from(OneHotEncoder::new())),
//!         FeatureEntry::chain(
//!             ["age"],
//!             vec![Step::from(SimpleImputer::default()), Step::from(StandardScaler::new())],
//!         ),
//!     ],
//!     MapperConfig::default(),
//! );
//! let features = mapper.fit_transform(&df, None)?;   // 4 x 4 dense
//! let names = mapper.transformed_names(&df)?;        // pet_0, pet_1, pet_2, age
//! ```

pub mod array;
pub mod cross_validation;
pub mod error;
pub mod mapper;
pub mod persistence;
pub mod pipeline;
pub mod preprocessing;
pub mod table;
pub mod traits;

pub use array::{normalize, FeatureArray, FeatureMatrix};
pub use cross_validation::{cross_val_score, Estimator};
pub use error::{MapperError, Result};
pub use mapper::{DataFrameMapper, DefaultPolicy, FeatureEntry, FeatureOptions, MapperConfig, NamedFeatures};
pub use persistence::{upgrade, LegacyMapperState, PersistedMapper};
pub use pipeline::{build_transformer, Composite, TransformerChain, TransformerSpec};
pub use table::{select, Column, ColumnRef, ColumnView, DataFrame, Table};
pub use traits::Transformer;
