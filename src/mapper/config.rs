//! Mapper-wide configuration.

use serde::{Deserialize, Serialize};

/// What happens to table columns that no feature entry references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultPolicy {
    /// Leave them out of the output.
    #[default]
    Discard,
    /// Append them unchanged after the mapped features, in table order.
    Passthrough,
}

/// Configuration for a [`DataFrameMapper`](super::DataFrameMapper).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Return a sparse matrix when any feature output is sparse.
    pub sparse: bool,
    /// Handling of columns not referenced by any feature.
    pub default: DefaultPolicy,
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether sparse feature outputs yield a sparse result.
    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    /// Set the policy for unreferenced columns.
    pub fn with_default(mut self, default: DefaultPolicy) -> Self {
        self.default = default;
        self
    }
}
