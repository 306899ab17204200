//! MinMax Scaler.
//!
//! Transforms features by scaling each feature to a given range:
//! ```text
//! X_scaled = (X - X.min) / (X.max - X.min) * (max - min) + min
//! ```

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use crate::preprocessing::{check_features, not_fitted};
use crate::traits::Transformer;
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// Configuration for MinMaxScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerConfig {
    /// Minimum value of the target range.
    pub min: f64,
    /// Maximum value of the target range.
    pub max: f64,
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Learned state of a fitted MinMaxScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    /// Minimum of each feature.
    pub min_: Vec<f64>,
    /// Scale factor for each feature: (max - min) / (feature_max - feature_min).
    pub scale_: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Scales each column onto `[min, max]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    config: MinMaxScalerConfig,
    fitted: Option<MinMaxScalerParams>,
}

impl MinMaxScaler {
    /// Create a new MinMaxScaler with default range [0, 1].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target range for scaling. Checked at fit time.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.config.min = min;
        self.config.max = max;
        self
    }
}

impl Transformer for MinMaxScaler {
    fn fit(&mut self, x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
        if self.config.max <= self.config.min {
            return Err(MapperError::InvalidParameter(format!(
                "MinMaxScaler range max ({}) must be greater than min ({})",
                self.config.max, self.config.min
            )));
        }

        let data = x.to_dense()?;
        if data.nrows() == 0 {
            return Err(MapperError::EmptyData(
                "Cannot fit MinMaxScaler on empty data".to_string(),
            ));
        }

        let target_range = self.config.max - self.config.min;
        let (min_, scale_) = data
            .axis_iter(Axis(1))
            .map(|col| {
                let lo = col.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let range = hi - lo;
                // Constant feature: map every value onto the range minimum.
                let scale = if range == 0.0 { 0.0 } else { target_range / range };
                (lo, scale)
            })
            .unzip();

        self.fitted = Some(MinMaxScalerParams {
            min_,
            scale_,
            n_features: data.ncols(),
        });
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let params = self.fitted.as_ref().ok_or_else(|| not_fitted("MinMaxScaler"))?;
        let mut data = x.to_dense()?;
        check_features(params.n_features, data.ncols())?;

        data -= &Array1::from(params.min_.clone());
        data *= &Array1::from(params.scale_.clone());
        data += self.config.min;
        Ok(FeatureArray::Matrix(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_minmax_default_range() {
        let mut scaler = MinMaxScaler::new();
        let x = FeatureArray::Matrix(array![[1.0, 0.0], [3.0, 2.0], [5.0, 4.0]]);
        let out = scaler.fit_transform(&x, None).unwrap();
        assert_eq!(
            out,
            FeatureArray::Matrix(array![[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]])
        );
    }

    #[test]
    fn test_minmax_custom_range() {
        let mut scaler = MinMaxScaler::new().with_range(-1.0, 1.0);
        let x = FeatureArray::Vector(array![0.0, 5.0, 10.0]);
        let out = scaler.fit_transform(&x, None).unwrap();
        assert_eq!(out, FeatureArray::Matrix(array![[-1.0], [0.0], [1.0]]));
    }

    #[test]
    fn test_minmax_constant_feature() {
        let mut scaler = MinMaxScaler::new();
        let x = FeatureArray::Vector(array![7.0, 7.0]);
        let out = scaler.fit_transform(&x, None).unwrap();
        assert_eq!(out, FeatureArray::Matrix(array![[0.0], [0.0]]));
    }

    #[test]
    fn test_minmax_invalid_range() {
        let mut scaler = MinMaxScaler::new().with_range(1.0, 1.0);
        let result = scaler.fit(&FeatureArray::Vector(array![1.0]), None);
        assert!(matches!(result, Err(MapperError::InvalidParameter(_))));
    }

    #[test]
    fn test_minmax_not_fitted() {
        let scaler = MinMaxScaler::new();
        let result = scaler.transform(&FeatureArray::Vector(array![1.0]));
        assert!(matches!(result, Err(MapperError::NotFitted(_))));
    }
}
