//! Ordinal encoding for text categories.
//!
//! Maps each distinct string in a text column to an integer code (0, 1, 2, ...)
//! so that numeric units such as [`OneHotEncoder`](super::OneHotEncoder) can
//! take over.

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::{check_features, not_fitted};
use crate::traits::Transformer;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Learned state of a fitted OrdinalEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoderParams {
    /// Sorted categories for each input column; a category's code is its position.
    pub categories_: Vec<Vec<String>>,
    /// Number of features seen during fit.
    pub n_features_in: usize,
}

/// Ordinal encoder for text columns.
///
/// Categories are sorted ascending, so codes follow lexicographic order.
///
/// # Example
/// ```ignore
/// let data = FeatureArray::from(array!["b".to_string(), "a".to_string(), "b".to_string()]);
///
/// let mut encoder = OrdinalEncoder::new();
/// let encoded = encoder.fit_transform(&data, None)?;
/// // [[1], [0], [1]]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
    fitted: Option<OrdinalEncoderParams>,
}

impl OrdinalEncoder {
    /// Create a new OrdinalEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    ///
    /// With [`HandleUnknown::Ignore`] unseen categories encode as `NaN`.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Get the categories learned for each feature.
    pub fn categories(&self) -> Option<&[Vec<String>]> {
        self.fitted.as_ref().map(|p| p.categories_.as_slice())
    }
}

impl Transformer for OrdinalEncoder {
    fn fit(&mut self, x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
        let data = x.to_text()?;
        if data.nrows() == 0 {
            return Err(MapperError::EmptyData(
                "Cannot fit OrdinalEncoder on empty data".to_string(),
            ));
        }

        let categories_ = data
            .axis_iter(Axis(1))
            .map(|values| {
                let mut cats: Vec<String> = values.to_vec();
                cats.sort();
                cats.dedup();
                cats
            })
            .collect();

        self.fitted = Some(OrdinalEncoderParams {
            categories_,
            n_features_in: data.ncols(),
        });
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let params = self.fitted.as_ref().ok_or_else(|| not_fitted("OrdinalEncoder"))?;
        let data = x.to_text()?;
        check_features(params.n_features_in, data.ncols())?;

        let mut out = Array2::zeros(data.dim());
        for ((row, col), value) in data.indexed_iter() {
            let cats = &params.categories_[col];
            out[[row, col]] = match cats.binary_search(value) {
                Ok(code) => code as f64,
                Err(_) => match self.handle_unknown {
                    HandleUnknown::Ignore => f64::NAN,
                    HandleUnknown::Error => {
                        return Err(MapperError::InvalidParameter(format!(
                            "Unknown category '{}' in column {}",
                            value, col
                        )))
                    }
                },
            };
        }
        Ok(FeatureArray::Matrix(out))
    }
}
