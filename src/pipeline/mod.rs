//! Normalization of transformer specifications into one composite unit.
//!
//! A feature may name no transformer, a single unit, or an ordered sequence of
//! units. [`build_transformer`] turns each of these into a [`Composite`] with
//! the same fit/transform contract, so the mapper never deals with raw
//! sequences.
//!
//! | Spec | Composite |
//! |------|-----------|
//! | [`TransformerSpec::Passthrough`] | [`Composite::Identity`] |
//! | [`TransformerSpec::Single`] | [`Composite::Unit`] (unchanged) |
//! | [`TransformerSpec::Sequence`] | [`Composite::Chain`] |
//!
//! # Example
//!
//! ```ignore
//! use frame_mapper::pipeline::{build_transformer, TransformerSpec};
//! use frame_mapper::preprocessing::{SimpleImputer, StandardScaler, Step};
//!
//! let composite = build_transformer(TransformerSpec::Sequence(vec![
//!     Step::from(SimpleImputer::default()),
//!     Step::from(StandardScaler::new()),
//! ]));
//! assert!(composite.is_chain());
//! ```

mod chain;

pub use chain::{build_transformer, Composite, TransformerChain, TransformerSpec};
