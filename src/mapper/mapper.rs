//! The mapping engine.

use super::config::{DefaultPolicy, MapperConfig};
use super::feature::FeatureEntry;
use crate::array::{hstack_dense, hstack_sparse, normalize, FeatureArray, FeatureMatrix};
use crate::error::{MapperError, Result};
use crate::preprocessing::Step;
use crate::table::{select, Table};
use crate::traits::Transformer;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Stacked output together with one name per output column.
#[derive(Clone, Debug)]
pub struct NamedFeatures {
    pub matrix: FeatureMatrix,
    pub names: Vec<String>,
}

/// Maps table columns through per-feature transformers and stacks the results.
///
/// # Example
/// ```ignore
/// let mut mapper = DataFrameMapper::new(
///     vec![
///         FeatureEntry::single("pet", Step::from(OneHotEncoder::new())),
///         FeatureEntry::chain(
///             "age",
///             vec![Step::from(SimpleImputer::default()), Step::from(StandardScaler::new())],
///         ),
///     ],
///     MapperConfig::default(),
/// );
/// let x = mapper.fit_transform(&df, None)?;
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataFrameMapper<T: Transformer = Step> {
    pub(crate) features: Vec<FeatureEntry<T>>,
    pub(crate) config: MapperConfig,
    pub(crate) fitted: bool,
    /// Unreferenced columns carried through under [`DefaultPolicy::Passthrough`].
    pub(crate) default_columns: Vec<String>,
}

impl<T: Transformer> DataFrameMapper<T> {
    /// Create a mapper over an ordered list of feature entries.
    pub fn new(features: Vec<FeatureEntry<T>>, config: MapperConfig) -> Self {
        Self {
            features,
            config,
            fitted: false,
            default_columns: Vec::new(),
        }
    }

    /// A mapper with no feature entries.
    pub fn empty(config: MapperConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    /// Append a feature entry. Invalidates any previous fit.
    pub fn push(&mut self, entry: FeatureEntry<T>) {
        self.features.push(entry);
        self.fitted = false;
    }

    pub fn features(&self) -> &[FeatureEntry<T>] {
        &self.features
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit every feature's transformer on its selected columns.
    ///
    /// `y`, when given, must have one label per table row. It reaches only the
    /// units that accept a target.
    pub fn fit<D: Table + ?Sized>(&mut self, table: &D, y: Option<&Array1<f64>>) -> Result<&mut Self> {
        self.fitted = false;
        check_target(table, y)?;

        for entry in &mut self.features {
            let x = select(table, &entry.columns)?;
            entry.transformer.fit(&x, y)?;
            debug!(
                feature = %entry.columns.label(),
                transformer = entry.transformer.name(),
                "fitted feature"
            );
        }

        self.default_columns = self.unreferenced_columns(table);
        self.fitted = true;
        info!(
            features = self.features.len(),
            rows = table.n_rows(),
            passthrough = self.default_columns.len(),
            "fitted mapper"
        );
        Ok(self)
    }

    /// Transform `table` with the fitted transformers and stack the outputs.
    pub fn transform<D: Table + ?Sized>(&self, table: &D) -> Result<FeatureMatrix> {
        self.transform_named(table).map(|named| named.matrix)
    }

    /// Like [`transform`](Self::transform), also returning output column names.
    pub fn transform_named<D: Table + ?Sized>(&self, table: &D) -> Result<NamedFeatures> {
        if !self.fitted {
            return Err(MapperError::NotFitted(
                "DataFrameMapper must be fitted before transform".to_string(),
            ));
        }

        let mut blocks = Vec::with_capacity(self.features.len());
        for entry in &self.features {
            let x = select(table, &entry.columns)?;
            let out = entry.transformer.transform(&x)?;
            blocks.push(self.feature_block(entry, out));
        }
        self.finish(table, blocks)
    }

    /// Fit and transform in one pass over each feature.
    ///
    /// Equivalent to [`fit`](Self::fit) followed by [`transform`](Self::transform)
    /// on the same table.
    pub fn fit_transform<D: Table + ?Sized>(
        &mut self,
        table: &D,
        y: Option<&Array1<f64>>,
    ) -> Result<FeatureMatrix> {
        self.fitted = false;
        check_target(table, y)?;

        let mut blocks = Vec::with_capacity(self.features.len());
        for entry in &mut self.features {
            let x = select(table, &entry.columns)?;
            let out = entry.transformer.fit_transform(&x, y)?;
            debug!(
                feature = %entry.columns.label(),
                transformer = entry.transformer.name(),
                "fitted feature"
            );
            blocks.push((entry.label(), entry.options.dense, normalize(out)));
        }

        self.default_columns = self.unreferenced_columns(table);
        let named = self.finish(table, blocks)?;
        self.fitted = true;
        info!(
            features = self.features.len(),
            rows = table.n_rows(),
            passthrough = self.default_columns.len(),
            "fitted mapper"
        );
        Ok(named.matrix)
    }

    /// Names of the output columns produced for `table`, left to right.
    ///
    /// A feature producing one column is named by its alias, its column name,
    /// or its column names joined with `_`. Wider outputs get `_0`, `_1`, ...
    /// suffixes on that base name.
    ///
    /// Output widths are only known once the fitted units have run, so this
    /// performs a full transform of `table`. Use
    /// [`transform_named`](Self::transform_named) to get the matrix and the
    /// names from a single pass.
    pub fn transformed_names<D: Table + ?Sized>(&self, table: &D) -> Result<Vec<String>> {
        self.transform_named(table).map(|named| named.names)
    }

    fn feature_block(&self, entry: &FeatureEntry<T>, out: FeatureArray) -> (String, bool, FeatureArray) {
        debug!(
            feature = %entry.columns.label(),
            shape = ?out.shape(),
            sparse = out.is_sparse(),
            "transformed feature"
        );
        (entry.label(), entry.options.dense, normalize(out))
    }

    /// Append default columns, validate row counts, name and stack.
    fn finish<D: Table + ?Sized>(
        &self,
        table: &D,
        mut blocks: Vec<(String, bool, FeatureArray)>,
    ) -> Result<NamedFeatures> {
        for name in &self.default_columns {
            let column = select(table, &name.as_str().into())?;
            blocks.push((name.clone(), false, normalize(column)));
        }

        let rows = table.n_rows();
        let mut names = Vec::new();
        for (label, _, block) in &blocks {
            if block.is_text() {
                return Err(MapperError::InvalidParameter(format!(
                    "feature '{}' produced text output; map it through an encoder",
                    label
                )));
            }
            let shape = block.shape();
            if shape[0] != rows {
                return Err(MapperError::InvalidShape {
                    expected: format!("{} rows for feature '{}'", rows, label),
                    got: format!("{} rows", shape[0]),
                });
            }
            names.extend(column_names(label, shape[1]));
        }

        let matrix = self.stack(rows, blocks)?;
        info!(shape = ?matrix.shape(), sparse = matrix.is_sparse(), "transformed table");
        Ok(NamedFeatures { matrix, names })
    }

    fn stack(&self, rows: usize, blocks: Vec<(String, bool, FeatureArray)>) -> Result<FeatureMatrix> {
        if blocks.is_empty() {
            return Ok(FeatureMatrix::Dense(Array2::zeros((rows, 0))));
        }

        let blocks = blocks
            .into_iter()
            .map(|(_, dense, block)| {
                if dense && block.is_sparse() {
                    block.to_dense().map(FeatureArray::Matrix)
                } else {
                    Ok(block)
                }
            })
            .collect::<Result<Vec<FeatureArray>>>()?;

        let any_sparse = blocks.iter().any(FeatureArray::is_sparse);
        if self.config.sparse && any_sparse {
            Ok(FeatureMatrix::Sparse(hstack_sparse(&blocks)?))
        } else {
            let dense = blocks
                .iter()
                .map(FeatureArray::to_dense)
                .collect::<Result<Vec<Array2<f64>>>>()?;
            Ok(FeatureMatrix::Dense(hstack_dense(&dense)?))
        }
    }

    fn unreferenced_columns<D: Table + ?Sized>(&self, table: &D) -> Vec<String> {
        if self.config.default == DefaultPolicy::Discard {
            return Vec::new();
        }
        let referenced: HashSet<&str> = self
            .features
            .iter()
            .flat_map(|entry| entry.columns.names())
            .collect();
        table
            .column_names()
            .into_iter()
            .filter(|name| !referenced.contains(name.as_str()))
            .collect()
    }
}

fn check_target<D: Table + ?Sized>(table: &D, y: Option<&Array1<f64>>) -> Result<()> {
    match y {
        Some(y) if y.len() != table.n_rows() => Err(MapperError::InvalidShape {
            expected: format!("{} target labels", table.n_rows()),
            got: format!("{} target labels", y.len()),
        }),
        _ => Ok(()),
    }
}

fn column_names(label: &str, width: usize) -> Vec<String> {
    if width == 1 {
        vec![label.to_string()]
    } else {
        (0..width).map(|i| format!("{}_{}", label, i)).collect()
    }
}
