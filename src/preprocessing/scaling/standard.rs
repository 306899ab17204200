//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation.

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use crate::preprocessing::{check_features, not_fitted};
use crate::traits::Transformer;
use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If True, center the data before scaling.
    pub with_mean: bool,
    /// If True, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Learned state of a fitted StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Mean of each feature (zeros if with_mean=false).
    pub mean: Vec<f64>,
    /// Standard deviation of each feature (ones if with_std=false).
    pub std: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Removes the column mean and divides by the column standard deviation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    config: StandardScalerConfig,
    fitted: Option<StandardScalerParams>,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    pub fn mean(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|p| p.mean.as_slice())
    }

    pub fn std(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|p| p.std.as_slice())
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
        let data = x.to_dense()?;
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(MapperError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mean = if self.config.with_mean {
            data.mean_axis(Axis(0)).map(|m| m.to_vec()).unwrap_or_default()
        } else {
            vec![0.0; cols]
        };

        let std = if self.config.with_std {
            data.std_axis(Axis(0), 0.0)
                .iter()
                // Handle zero std (constant features)
                .map(|&s| if s == 0.0 { 1.0 } else { s })
                .collect()
        } else {
            vec![1.0; cols]
        };

        self.fitted = Some(StandardScalerParams {
            mean,
            std,
            n_features: cols,
        });
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let params = self.fitted.as_ref().ok_or_else(|| not_fitted("StandardScaler"))?;
        let mut data = x.to_dense()?;
        check_features(params.n_features, data.ncols())?;

        let mean = Array1::from(params.mean.clone());
        let std = Array1::from(params.std.clone());
        data -= &mean;
        data /= &std;
        Ok(FeatureArray::Matrix(data))
    }
}
