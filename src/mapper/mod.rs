//! DataFrameMapper: map named table columns through transformers into one matrix.
//!
//! Each [`FeatureEntry`] pairs a column reference with a transformer
//! specification. Fitting selects the columns and fits the entry's composite
//! unit; transforming selects, transforms, reshapes to 2-D and stacks every
//! entry's output left to right, in entry order.

mod config;
mod feature;
#[allow(clippy::module_inception)]
mod mapper;

pub use config::{DefaultPolicy, MapperConfig};
pub use feature::{FeatureEntry, FeatureOptions};
pub use mapper::{DataFrameMapper, NamedFeatures};
