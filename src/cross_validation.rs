//! K-fold cross-validation over tables.
//!
//! A thin convenience: the estimator does its own fitting and scoring, this
//! module only splits rows and collects one score per fold.

use crate::error::{MapperError, Result};
use crate::table::Table;
use ndarray::Array1;
use tracing::debug;

/// Anything that can be fitted on a table and scored on held-out rows.
///
/// Typically wraps a [`DataFrameMapper`](crate::DataFrameMapper) followed by a
/// model.
pub trait Estimator<D: Table> {
    fn fit(&mut self, table: &D, y: &Array1<f64>) -> Result<()>;

    /// Higher is better.
    fn score(&self, table: &D, y: &Array1<f64>) -> Result<f64>;
}

/// Contiguous fold boundaries; the first `n_rows % n_folds` folds get one
/// extra row.
fn fold_ranges(n_rows: usize, n_folds: usize) -> Vec<std::ops::Range<usize>> {
    let base = n_rows / n_folds;
    let extra = n_rows % n_folds;
    let mut start = 0;
    (0..n_folds)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Score `estimator` with `n_folds`-fold cross-validation.
///
/// Each fold is held out once; a fresh clone of `estimator` is fitted on the
/// remaining rows and scored on the held-out ones. Scores are returned in fold
/// order.
pub fn cross_val_score<D, E>(
    estimator: &E,
    table: &D,
    y: &Array1<f64>,
    n_folds: usize,
) -> Result<Vec<f64>>
where
    D: Table,
    E: Estimator<D> + Clone,
{
    let n_rows = table.n_rows();
    if y.len() != n_rows {
        return Err(MapperError::InvalidShape {
            expected: format!("{} target labels", n_rows),
            got: format!("{} target labels", y.len()),
        });
    }
    if n_folds < 2 || n_folds > n_rows {
        return Err(MapperError::InvalidParameter(format!(
            "n_folds must be between 2 and {} (number of rows), got {}",
            n_rows, n_folds
        )));
    }

    let mut scores = Vec::with_capacity(n_folds);
    for (fold, test) in fold_ranges(n_rows, n_folds).into_iter().enumerate() {
        let train_idx: Vec<usize> = (0..n_rows).filter(|i| !test.contains(i)).collect();
        let test_idx: Vec<usize> = test.collect();

        let train_y = y.select(ndarray::Axis(0), &train_idx);
        let test_y = y.select(ndarray::Axis(0), &test_idx);

        let mut model = estimator.clone();
        model.fit(&table.take_rows(&train_idx), &train_y)?;
        let score = model.score(&table.take_rows(&test_idx), &test_y)?;
        debug!(fold, train = train_idx.len(), test = test_idx.len(), score, "scored fold");
        scores.push(score);
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{DataFrameMapper, FeatureEntry, MapperConfig};
    use crate::preprocessing::{SimpleImputer, StandardScaler, Step};
    use crate::table::DataFrame;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// Predicts the training-target mean; scores with negative MSE.
    #[derive(Clone, Debug, Default)]
    struct MeanRegressor {
        mean: f64,
    }

    impl<D: Table> Estimator<D> for MeanRegressor {
        fn fit(&mut self, _table: &D, y: &Array1<f64>) -> Result<()> {
            self.mean = y.mean().ok_or_else(|| MapperError::EmptyData("no targets".to_string()))?;
            Ok(())
        }

        fn score(&self, _table: &D, y: &Array1<f64>) -> Result<f64> {
            Ok(-y.mapv(|v| (v - self.mean).powi(2)).mean().unwrap_or(0.0))
        }
    }

    /// Maps the table, then fits a one-feature least-squares line.
    #[derive(Clone, Debug)]
    struct MappedLine {
        mapper: DataFrameMapper,
        slope: f64,
        intercept: f64,
    }

    impl MappedLine {
        fn new() -> Self {
            let mapper = DataFrameMapper::new(
                vec![FeatureEntry::chain(
                    "x",
                    vec![
                        Step::from(SimpleImputer::default()),
                        Step::from(StandardScaler::new()),
                    ],
                )],
                MapperConfig::default(),
            );
            Self {
                mapper,
                slope: 0.0,
                intercept: 0.0,
            }
        }
    }

    impl Estimator<DataFrame> for MappedLine {
        fn fit(&mut self, table: &DataFrame, y: &Array1<f64>) -> Result<()> {
            let x = self.mapper.fit_transform(table, None)?.into_dense().column(0).to_owned();
            // Standardized x has zero mean and unit variance.
            self.intercept = y.mean().unwrap_or(0.0);
            self.slope = x.dot(y) / x.len() as f64;
            Ok(())
        }

        fn score(&self, table: &DataFrame, y: &Array1<f64>) -> Result<f64> {
            let x = self.mapper.transform(table)?.into_dense().column(0).to_owned();
            let pred = x.mapv(|v| self.slope * v + self.intercept);
            Ok(-(&pred - y).mapv(|e| e * e).mean().unwrap_or(0.0))
        }
    }

    fn line_dataframe() -> (DataFrame, Array1<f64>) {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let y = x.mapv(|v| 2.0 * v + 1.0);
        (DataFrame::from_columns([("x", x)]).unwrap(), y)
    }

    #[test]
    fn test_fold_ranges_front_loaded() {
        assert_eq!(fold_ranges(7, 3), vec![0..3, 3..5, 5..7]);
        assert_eq!(fold_ranges(6, 3), vec![0..2, 2..4, 4..6]);
    }

    #[test]
    fn test_mean_regressor_scores_per_fold() {
        let df = DataFrame::from_columns([("a", vec![0.0; 4])]).unwrap();
        let y = array![1.0, 1.0, 3.0, 3.0];
        let scores = cross_val_score(&MeanRegressor::default(), &df, &y, 2).unwrap();
        assert_eq!(scores.len(), 2);
        // Train on [3, 3], test on [1, 1]: squared error 4 on every row.
        assert_abs_diff_eq!(scores[0], -4.0);
        assert_abs_diff_eq!(scores[1], -4.0);
    }

    #[test]
    fn test_mapper_inside_estimator() {
        let (df, y) = line_dataframe();
        let scores = cross_val_score(&MappedLine::new(), &df, &y, 5).unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores.iter().all(|s| s.is_finite() && *s <= 0.0));
    }

    #[test]
    fn test_invalid_fold_count() {
        let (df, y) = line_dataframe();
        for n_folds in [0, 1, 11] {
            assert!(matches!(
                cross_val_score(&MeanRegressor::default(), &df, &y, n_folds),
                Err(MapperError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_target_length_mismatch() {
        let (df, _) = line_dataframe();
        let y = array![1.0, 2.0];
        assert!(matches!(
            cross_val_score(&MeanRegressor::default(), &df, &y, 2),
            Err(MapperError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_estimator_errors_propagate() {
        let df = DataFrame::from_columns([("other", vec![1.0, 2.0, 3.0, 4.0])]).unwrap();
        let y = array![1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            cross_val_score(&MappedLine::new(), &df, &y, 2),
            Err(MapperError::ColumnNotFound(_))
        ));
    }
}
