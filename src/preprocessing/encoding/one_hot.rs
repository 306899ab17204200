//! One-hot encoding for categorical features.
//!
//! Transforms categorical codes to one indicator column per category. The
//! output is sparse: each row stores one entry per input column.

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::{check_features, not_fitted};
use crate::traits::Transformer;
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};
use sprs::TriMat;

/// Learned state of a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Sorted categories for each input column.
    pub categories_: Vec<Vec<f64>>,
    /// Number of features seen during fit.
    pub n_features_in: usize,
}

impl OneHotEncoderParams {
    fn n_features_out(&self) -> usize {
        self.categories_.iter().map(Vec::len).sum()
    }
}

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature; the encoder learns
/// the distinct values present in each column during fitting.
///
/// # Example
/// ```ignore
/// // Input: 3 samples with 1 categorical feature each
/// let data = FeatureArray::Vector(array![0.0, 1.0, 2.0]);
///
/// let mut encoder = OneHotEncoder::new();
/// let encoded = encoder.fit_transform(&data, None)?;
/// // [[1, 0, 0],
/// //  [0, 1, 0],
/// //  [0, 0, 1]]   (stored sparse)
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
    fitted: Option<OneHotEncoderParams>,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Get the categories learned for each feature.
    pub fn categories(&self) -> Option<&[Vec<f64>]> {
        self.fitted.as_ref().map(|p| p.categories_.as_slice())
    }

    /// Number of indicator columns produced, once fitted.
    pub fn n_features_out(&self) -> Option<usize> {
        self.fitted.as_ref().map(OneHotEncoderParams::n_features_out)
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
        let data = x.to_dense()?;
        if data.nrows() == 0 {
            return Err(MapperError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let mut categories_ = Vec::with_capacity(data.ncols());
        for (col, values) in data.axis_iter(Axis(1)).enumerate() {
            if values.iter().any(|v| v.is_nan()) {
                return Err(MapperError::MissingValues(format!(
                    "OneHotEncoder input column {} contains NaN",
                    col
                )));
            }
            let mut cats: Vec<f64> = values.to_vec();
            cats.sort_by(|a, b| a.total_cmp(b));
            cats.dedup();
            categories_.push(cats);
        }

        self.fitted = Some(OneHotEncoderParams {
            categories_,
            n_features_in: data.ncols(),
        });
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let params = self.fitted.as_ref().ok_or_else(|| not_fitted("OneHotEncoder"))?;
        let data = x.to_dense()?;
        check_features(params.n_features_in, data.ncols())?;

        let mut tri = TriMat::new((data.nrows(), params.n_features_out()));
        for (row, values) in data.axis_iter(Axis(0)).enumerate() {
            let mut offset = 0;
            for (col, &val) in values.iter().enumerate() {
                let cats = &params.categories_[col];
                match cats.binary_search_by(|c| c.total_cmp(&val)) {
                    Ok(idx) => tri.add_triplet(row, offset + idx, 1.0),
                    Err(_) if self.handle_unknown == HandleUnknown::Ignore => {}
                    Err(_) => {
                        return Err(MapperError::InvalidParameter(format!(
                            "Unknown category {} in column {}",
                            val, col
                        )));
                    }
                }
                offset += cats.len();
            }
        }
        Ok(FeatureArray::Sparse(tri.to_csr()))
    }
}
