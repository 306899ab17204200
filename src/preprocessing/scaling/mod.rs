//! Feature scaling transformers.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`StandardScaler`] | Zero mean, unit variance |
//! | [`MinMaxScaler`] | Map each column onto a fixed range |

pub mod minmax;
pub mod standard;

pub use minmax::{MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams};
pub use standard::{StandardScaler, StandardScalerConfig, StandardScalerParams};
