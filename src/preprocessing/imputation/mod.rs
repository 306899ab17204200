//! Imputation transformers for handling missing values.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`SimpleImputer`] | Impute with mean, median, most_frequent, or constant |
//!
//! # Example
//!
//! ```ignore
//! use frame_mapper::preprocessing::imputation::{ImputeStrategy, SimpleImputer};
//! use frame_mapper::Transformer;
//!
//! let mut imputer = SimpleImputer::new(ImputeStrategy::Mean);
//! let imputed = imputer.fit_transform(&data, None)?;
//! ```

pub mod simple;

pub use simple::{ImputeStrategy, SimpleImputer, SimpleImputerParams};
