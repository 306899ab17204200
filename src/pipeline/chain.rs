//! Transformer chain and composite unit.

use crate::array::FeatureArray;
use crate::error::Result;
use crate::traits::Transformer;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// How a feature's transformation is specified by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransformerSpec<T> {
    /// No transformation; selected data passes through.
    Passthrough,
    /// One unit.
    Single(T),
    /// Units applied in order, each consuming the previous output.
    Sequence(Vec<T>),
}

impl<T> From<Vec<T>> for TransformerSpec<T> {
    fn from(steps: Vec<T>) -> Self {
        TransformerSpec::Sequence(steps)
    }
}

impl<T> From<Option<T>> for TransformerSpec<T> {
    fn from(unit: Option<T>) -> Self {
        match unit {
            Some(unit) => TransformerSpec::Single(unit),
            None => TransformerSpec::Passthrough,
        }
    }
}

/// Serialized form of a [`TransformerChain`].
#[derive(Deserialize)]
pub struct ChainSteps<T> {
    steps: Vec<T>,
}

/// Ordered sequence of units applied one after another.
///
/// Whether each step takes target labels is read once, when the chain is
/// built; `fit` hands the labels only to the steps that declared them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "ChainSteps<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct TransformerChain<T: Transformer> {
    steps: Vec<T>,
    #[serde(skip_serializing)]
    target_aware: Vec<bool>,
}

impl<T: Transformer> From<ChainSteps<T>> for TransformerChain<T> {
    fn from(repr: ChainSteps<T>) -> Self {
        Self::new(repr.steps)
    }
}

impl<T: Transformer> TransformerChain<T> {
    /// Build a chain over `steps`.
    pub fn new(steps: Vec<T>) -> Self {
        let target_aware = steps.iter().map(Transformer::accepts_target).collect();
        Self {
            steps,
            target_aware,
        }
    }

    /// The steps in application order.
    pub fn steps(&self) -> &[T] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Names of the steps, for debugging.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn target_for<'a>(&self, i: usize, y: Option<&'a Array1<f64>>) -> Option<&'a Array1<f64>> {
        if self.target_aware[i] {
            y
        } else {
            None
        }
    }
}

impl<T: Transformer> Transformer for TransformerChain<T> {
    fn fit(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()> {
        let n = self.steps.len();
        let mut current: Option<FeatureArray> = None;
        for i in 0..n {
            let target = self.target_for(i, y);
            let input = current.as_ref().unwrap_or(x);
            let step = &mut self.steps[i];
            tracing::trace!(step = step.name(), index = i, "fitting chain step");
            if i + 1 == n {
                step.fit(input, target)?;
            } else {
                current = Some(step.fit_transform(input, target)?);
            }
        }
        Ok(())
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        let mut current = x.clone();
        for step in &self.steps {
            current = step.transform(&current)?;
        }
        Ok(current)
    }

    fn fit_transform(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<FeatureArray> {
        let mut current = x.clone();
        for i in 0..self.steps.len() {
            let target = self.target_for(i, y);
            current = self.steps[i].fit_transform(&current, target)?;
        }
        Ok(current)
    }

    fn accepts_target(&self) -> bool {
        self.target_aware.iter().any(|&aware| aware)
    }

    fn name(&self) -> &str {
        "TransformerChain"
    }
}

/// The built form of a [`TransformerSpec`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Composite<T: Transformer> {
    /// Returns its input unchanged from both fit and transform.
    Identity,
    /// A single unit, used as-is.
    Unit(T),
    /// Several units applied in sequence.
    Chain(TransformerChain<T>),
}

impl<T: Transformer> Composite<T> {
    pub fn is_chain(&self) -> bool {
        matches!(self, Composite::Chain(_))
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Composite::Identity)
    }

    /// The chain, if this composite is one.
    pub fn as_chain(&self) -> Option<&TransformerChain<T>> {
        match self {
            Composite::Chain(chain) => Some(chain),
            _ => None,
        }
    }

    /// The single unit, if this composite wraps exactly one.
    pub fn as_unit(&self) -> Option<&T> {
        match self {
            Composite::Unit(unit) => Some(unit),
            _ => None,
        }
    }
}

impl<T: Transformer> Transformer for Composite<T> {
    fn fit(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()> {
        match self {
            Composite::Identity => Ok(()),
            Composite::Unit(unit) => {
                let target = if unit.accepts_target() { y } else { None };
                unit.fit(x, target)
            }
            Composite::Chain(chain) => chain.fit(x, y),
        }
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        match self {
            Composite::Identity => Ok(x.clone()),
            Composite::Unit(unit) => unit.transform(x),
            Composite::Chain(chain) => chain.transform(x),
        }
    }

    fn fit_transform(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<FeatureArray> {
        match self {
            Composite::Identity => Ok(x.clone()),
            Composite::Unit(unit) => {
                let target = if unit.accepts_target() { y } else { None };
                unit.fit_transform(x, target)
            }
            Composite::Chain(chain) => chain.fit_transform(x, y),
        }
    }

    fn accepts_target(&self) -> bool {
        match self {
            Composite::Identity => false,
            Composite::Unit(unit) => unit.accepts_target(),
            Composite::Chain(chain) => chain.accepts_target(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Composite::Identity => "Identity",
            Composite::Unit(unit) => unit.name(),
            Composite::Chain(chain) => chain.name(),
        }
    }
}

/// Normalize a specification into one composite unit.
pub fn build_transformer<T: Transformer>(spec: TransformerSpec<T>) -> Composite<T> {
    match spec {
        TransformerSpec::Passthrough => Composite::Identity,
        TransformerSpec::Single(unit) => Composite::Unit(unit),
        TransformerSpec::Sequence(steps) => Composite::Chain(TransformerChain::new(steps)),
    }
}
