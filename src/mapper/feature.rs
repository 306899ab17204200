//! Feature entries: one column reference, one composite unit, options.

use crate::pipeline::{build_transformer, Composite, TransformerSpec};
use crate::table::ColumnRef;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Per-feature flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOptions {
    /// Output name used instead of the column names.
    pub alias: Option<String>,
    /// Densify this feature's output before stacking, so it never makes the
    /// mapper output sparse.
    pub dense: bool,
}

impl FeatureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }
}

/// One entry of a mapper's ordered feature list.
///
/// The transformer is always held in built form; a sequence handed to any
/// constructor is wrapped into a chain right away.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureEntry<T: Transformer> {
    pub(crate) columns: ColumnRef,
    pub(crate) transformer: Composite<T>,
    pub(crate) options: FeatureOptions,
}

impl<T: Transformer> FeatureEntry<T> {
    /// Build an entry from a column reference and a transformer specification.
    pub fn new(columns: impl Into<ColumnRef>, spec: TransformerSpec<T>) -> Self {
        Self::from_composite(columns.into(), build_transformer(spec), FeatureOptions::default())
    }

    pub(crate) fn from_composite(
        columns: ColumnRef,
        transformer: Composite<T>,
        options: FeatureOptions,
    ) -> Self {
        Self {
            columns,
            transformer,
            options,
        }
    }

    /// Entry that passes the selected columns through unchanged.
    pub fn passthrough(columns: impl Into<ColumnRef>) -> Self {
        Self::new(columns, TransformerSpec::Passthrough)
    }

    /// Entry with a single unit.
    pub fn single(columns: impl Into<ColumnRef>, unit: T) -> Self {
        Self::new(columns, TransformerSpec::Single(unit))
    }

    /// Entry with units applied in sequence.
    pub fn chain(columns: impl Into<ColumnRef>, units: Vec<T>) -> Self {
        Self::new(columns, TransformerSpec::Sequence(units))
    }

    pub fn with_options(mut self, options: FeatureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.options.alias = Some(alias.into());
        self
    }

    pub fn with_dense(mut self, dense: bool) -> Self {
        self.options.dense = dense;
        self
    }

    pub fn columns(&self) -> &ColumnRef {
        &self.columns
    }

    pub fn transformer(&self) -> &Composite<T> {
        &self.transformer
    }

    pub fn options(&self) -> &FeatureOptions {
        &self.options
    }

    /// Alias if set, otherwise the column label.
    pub fn label(&self) -> String {
        self.options
            .alias
            .clone()
            .unwrap_or_else(|| self.columns.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{SimpleImputer, StandardScaler, Step};

    #[test]
    fn test_sequence_is_built_into_chain() {
        let entry = FeatureEntry::chain(
            ["a"],
            vec![
                Step::from(SimpleImputer::default()),
                Step::from(StandardScaler::new()),
            ],
        );
        let chain = entry.transformer().as_chain().unwrap();
        assert_eq!(chain.step_names(), vec!["SimpleImputer", "StandardScaler"]);
    }

    #[test]
    fn test_label_prefers_alias() {
        let entry = FeatureEntry::<Step>::passthrough(["a", "b"]);
        assert_eq!(entry.label(), "a_b");
        let entry = entry.with_alias("ab");
        assert_eq!(entry.label(), "ab");
    }

    #[test]
    fn test_options_builder() {
        let entry = FeatureEntry::<Step>::passthrough("a")
            .with_options(FeatureOptions::new().with_alias("x").with_dense(true));
        assert_eq!(entry.options().alias.as_deref(), Some("x"));
        assert!(entry.options().dense);
        assert!(entry.transformer().is_identity());
    }
}
