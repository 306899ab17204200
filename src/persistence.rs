//! Saving and reloading mappers, including the legacy layout.
//!
//! Mappers are written inside a versioned envelope:
//!
//! - `V1`: the legacy layout. Each feature keeps its raw transformer
//!   specification, so a sequence of units is stored as a bare list.
//! - `V2`: the current layout. Each feature holds its built composite unit.
//!
//! Loading a `V1` envelope runs [`upgrade`], which wraps every stored sequence
//! into a chain. The result transforms exactly like a mapper built today from
//! the same units.

use crate::error::Result;
use crate::mapper::{DataFrameMapper, FeatureEntry, MapperConfig};
use crate::pipeline::TransformerSpec;
use crate::table::ColumnRef;
use crate::traits::Transformer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// State of a mapper saved before features were built eagerly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegacyMapperState<T> {
    pub features: Vec<(ColumnRef, TransformerSpec<T>)>,
    #[serde(default)]
    pub sparse: bool,
    #[serde(default)]
    pub fitted: bool,
}

/// Versioned on-disk form of a [`DataFrameMapper`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PersistedMapper<T: Transformer> {
    V1(LegacyMapperState<T>),
    V2(DataFrameMapper<T>),
}

impl<T: Transformer> PersistedMapper<T> {
    /// Resolve the envelope into a mapper in the current layout.
    pub fn into_mapper(self) -> DataFrameMapper<T> {
        match self {
            PersistedMapper::V1(legacy) => upgrade(legacy),
            PersistedMapper::V2(mapper) => mapper,
        }
    }
}

/// Convert a legacy state to the current layout.
///
/// Sequences become chains of the same units in the same order; fitted units
/// keep their fitted state.
pub fn upgrade<T: Transformer>(legacy: LegacyMapperState<T>) -> DataFrameMapper<T> {
    let n_features = legacy.features.len();
    let features = legacy
        .features
        .into_iter()
        .map(|(columns, spec)| FeatureEntry::new(columns, spec))
        .collect();
    let mut mapper = DataFrameMapper::new(features, MapperConfig::new().with_sparse(legacy.sparse));
    mapper.fitted = legacy.fitted;
    info!(features = n_features, "upgraded legacy mapper state");
    mapper
}

impl<T> DataFrameMapper<T>
where
    T: Transformer + Clone + Serialize + DeserializeOwned,
{
    fn envelope(&self) -> PersistedMapper<T> {
        PersistedMapper::V2(self.clone())
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.envelope())?)
    }

    /// Load from JSON written by any supported layout version.
    pub fn from_json(json: &str) -> Result<Self> {
        let persisted: PersistedMapper<T> = serde_json::from_str(json)?;
        Ok(persisted.into_mapper())
    }

    /// Serialize to a compact binary buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.envelope())?)
    }

    /// Load from a binary buffer written by any supported layout version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let persisted: PersistedMapper<T> = bincode::deserialize(bytes)?;
        Ok(persisted.into_mapper())
    }

    /// Save the mapper to a file in binary form.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a mapper saved with [`save_to_file`](Self::save_to_file).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
