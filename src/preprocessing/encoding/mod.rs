//! Categorical feature encoding.
//!
//! [`OrdinalEncoder`] turns text labels into numeric codes; [`OneHotEncoder`]
//! expands numeric codes into indicator columns.

mod one_hot;
mod ordinal;

pub use one_hot::{OneHotEncoder, OneHotEncoderParams};
pub use ordinal::{OrdinalEncoder, OrdinalEncoderParams};

use serde::{Deserialize, Serialize};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    #[default]
    Error,
    /// Ignore unknown categories (no indicator when one-hot encoding, `NaN` when
    /// ordinal encoding).
    Ignore,
}
