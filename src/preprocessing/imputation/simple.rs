//! Simple Imputer.
//!
//! Imputation transformer for completing missing values.
//! Supports mean, median, most_frequent, and constant strategies.
//!
//! Note: This implementation treats NaN as missing values.

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use crate::preprocessing::{check_features, not_fitted};
use crate::traits::Transformer;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for imputing missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace missing values with the mean of each column.
    #[default]
    Mean,
    /// Replace missing values with the median of each column.
    Median,
    /// Replace missing values with the most frequent value of each column.
    MostFrequent,
    /// Replace missing values with a constant value.
    Constant(f64),
}

/// Learned state of a fitted SimpleImputer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputerParams {
    /// Statistics (fill values) for each feature.
    pub statistics_: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Fills NaN entries column by column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    fitted: Option<SimpleImputerParams>,
}

impl SimpleImputer {
    /// Create a new SimpleImputer with the specified strategy.
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fitted: None,
        }
    }

    pub fn strategy(&self) -> &ImputeStrategy {
        &self.strategy
    }

    /// Fill values learned during fit.
    pub fn statistics(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|p| p.statistics_.as_slice())
    }
}

/// Compute the fill value of one column, ignoring NaN values.
fn column_statistic(values: &[f64], strategy: &ImputeStrategy) -> f64 {
    if let ImputeStrategy::Constant(val) = strategy {
        return *val;
    }
    if values.is_empty() {
        return 0.0; // Default to 0 if all values are missing
    }
    match strategy {
        ImputeStrategy::Mean => values.iter().sum::<f64>() / values.len() as f64,
        ImputeStrategy::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let n = sorted.len();
            if n % 2 == 0 {
                (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
            } else {
                sorted[n / 2]
            }
        }
        ImputeStrategy::MostFrequent => {
            let mut counts: HashMap<u64, usize> = HashMap::new();
            for &v in values {
                *counts.entry(v.to_bits()).or_insert(0) += 1;
            }
            // Ties go to the smallest value so the result is deterministic.
            counts
                .into_iter()
                .map(|(bits, count)| (f64::from_bits(bits), count))
                .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then(vb.total_cmp(va)))
                .map(|(v, _)| v)
                .unwrap_or(0.0)
        }
        ImputeStrategy::Constant(val) => *val,
    }
}

impl Transformer for SimpleImputer {
    fn fit(&mut self, x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
        let data = x.to_dense()?;
        if data.nrows() == 0 {
            return Err(MapperError::EmptyData(
                "Cannot fit SimpleImputer on empty data".to_string(),
            ));
        }

        let statistics_ = data
            .axis_iter(Axis(1))
            .map(|col| {
                let present: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
                column_statistic(&present, &self.strategy)
            })
            .collect();

        self.fitted = Some(SimpleImputerParams {
            statistics_,
            n_features: data.ncols(),
        });
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let params = self.fitted.as_ref().ok_or_else(|| not_fitted("SimpleImputer"))?;
        let mut data: Array2<f64> = x.to_dense()?;
        check_features(params.n_features, data.ncols())?;

        for (mut col, &fill) in data.axis_iter_mut(Axis(1)).zip(&params.statistics_) {
            col.mapv_inplace(|v| if v.is_nan() { fill } else { v });
        }
        Ok(FeatureArray::Matrix(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn data_with_nan() -> FeatureArray {
        FeatureArray::Matrix(array![[1.0, f64::NAN], [f64::NAN, 4.0], [3.0, 6.0], [3.0, 8.0]])
    }

    #[test]
    fn test_mean_strategy() {
        let mut imputer = SimpleImputer::new(ImputeStrategy::Mean);
        let out = imputer.fit_transform(&data_with_nan(), None).unwrap().to_dense().unwrap();
        assert!((out[[1, 0]] - 7.0 / 3.0).abs() < 1e-12);
        assert!((out[[0, 1]] - 6.0).abs() < 1e-12);
        assert_eq!(out.iter().filter(|v| v.is_nan()).count(), 0);
    }

    #[test]
    fn test_median_strategy() {
        let mut imputer = SimpleImputer::new(ImputeStrategy::Median);
        imputer.fit(&data_with_nan(), None).unwrap();
        assert_eq!(imputer.statistics().unwrap(), &[3.0, 6.0]);
    }

    #[test]
    fn test_most_frequent_strategy() {
        let mut imputer = SimpleImputer::new(ImputeStrategy::MostFrequent);
        imputer.fit(&data_with_nan(), None).unwrap();
        // Column 1 has no repeats; the smallest value wins the tie.
        assert_eq!(imputer.statistics().unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_constant_strategy() {
        let mut imputer = SimpleImputer::new(ImputeStrategy::Constant(-1.0));
        let out = imputer.fit_transform(&data_with_nan(), None).unwrap().to_dense().unwrap();
        assert_eq!(out[[1, 0]], -1.0);
        assert_eq!(out[[0, 1]], -1.0);
    }

    #[test]
    fn test_all_missing_column_defaults_to_zero() {
        let mut imputer = SimpleImputer::default();
        let x = FeatureArray::Vector(array![f64::NAN, f64::NAN]);
        let out = imputer.fit_transform(&x, None).unwrap();
        assert_eq!(out, FeatureArray::Matrix(array![[0.0], [0.0]]));
    }

    #[test]
    fn test_vector_input_becomes_column() {
        let mut imputer = SimpleImputer::default();
        let x = FeatureArray::Vector(array![1.0, f64::NAN, 3.0]);
        let out = imputer.fit_transform(&x, None).unwrap();
        assert_eq!(out, FeatureArray::Matrix(array![[1.0], [2.0], [3.0]]));
    }

    #[test]
    fn test_transform_before_fit() {
        let imputer = SimpleImputer::default();
        let result = imputer.transform(&data_with_nan());
        assert!(matches!(result, Err(MapperError::NotFitted(_))));
    }

    #[test]
    fn test_feature_mismatch() {
        let mut imputer = SimpleImputer::default();
        imputer.fit(&data_with_nan(), None).unwrap();
        let result = imputer.transform(&FeatureArray::Vector(array![1.0]));
        assert!(matches!(result, Err(MapperError::FeatureMismatch { .. })));
    }

    #[test]
    fn test_empty_data() {
        let mut imputer = SimpleImputer::default();
        let result = imputer.fit(&FeatureArray::Matrix(Array2::zeros((0, 2))), None);
        assert!(matches!(result, Err(MapperError::EmptyData(_))));
    }
}
