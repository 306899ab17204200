//! Serializable union of the built-in units.

use crate::array::FeatureArray;
use crate::error::Result;
use crate::preprocessing::{
    MinMaxScaler, OneHotEncoder, OrdinalEncoder, SimpleImputer, StandardScaler,
};
use crate::traits::Transformer;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Any built-in transformation unit.
///
/// Mappers over `Step` can be persisted and reloaded, since every variant
/// carries its configuration and fitted state as plain data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Step {
    SimpleImputer(SimpleImputer),
    StandardScaler(StandardScaler),
    MinMaxScaler(MinMaxScaler),
    OneHotEncoder(OneHotEncoder),
    OrdinalEncoder(OrdinalEncoder),
}

macro_rules! dispatch {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            Step::SimpleImputer($t) => $body,
            Step::StandardScaler($t) => $body,
            Step::MinMaxScaler($t) => $body,
            Step::OneHotEncoder($t) => $body,
            Step::OrdinalEncoder($t) => $body,
        }
    };
}

impl Transformer for Step {
    fn fit(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()> {
        dispatch!(self, t => t.fit(x, y))
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        dispatch!(self, t => t.transform(x))
    }

    fn fit_transform(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<FeatureArray> {
        dispatch!(self, t => t.fit_transform(x, y))
    }

    fn accepts_target(&self) -> bool {
        dispatch!(self, t => t.accepts_target())
    }

    fn name(&self) -> &str {
        match self {
            Step::SimpleImputer(_) => "SimpleImputer",
            Step::StandardScaler(_) => "StandardScaler",
            Step::MinMaxScaler(_) => "MinMaxScaler",
            Step::OneHotEncoder(_) => "OneHotEncoder",
            Step::OrdinalEncoder(_) => "OrdinalEncoder",
        }
    }
}

impl From<SimpleImputer> for Step {
    fn from(t: SimpleImputer) -> Self {
        Step::SimpleImputer(t)
    }
}

impl From<StandardScaler> for Step {
    fn from(t: StandardScaler) -> Self {
        Step::StandardScaler(t)
    }
}

impl From<MinMaxScaler> for Step {
    fn from(t: MinMaxScaler) -> Self {
        Step::MinMaxScaler(t)
    }
}

impl From<OneHotEncoder> for Step {
    fn from(t: OneHotEncoder) -> Self {
        Step::OneHotEncoder(t)
    }
}

impl From<OrdinalEncoder> for Step {
    fn from(t: OrdinalEncoder) -> Self {
        Step::OrdinalEncoder(t)
    }
}
