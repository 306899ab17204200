//! Capability interface for transformation units.
//!
//! A unit learns state in [`Transformer::fit`] and maps data in
//! [`Transformer::transform`]. Units that make use of target labels declare it
//! through [`Transformer::accepts_target`]; everyone else is never handed one.

use crate::array::FeatureArray;
use crate::error::Result;
use ndarray::Array1;
use std::any::type_name;
use std::fmt::Debug;

/// A transformation unit with a fit/transform contract.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     fn fit(&mut self, _x: &FeatureArray, _y: Option<&Array1<f64>>) -> Result<()> {
///         Ok(())
///     }
///
///     fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
///         Ok(FeatureArray::Matrix(x.to_dense()? * 2.0))
///     }
/// }
/// ```
pub trait Transformer: Debug {
    /// Learn parameters from `x`. `y` is only ever `Some` when
    /// [`accepts_target`](Transformer::accepts_target) returns `true`.
    fn fit(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()>;

    /// Map `x` using the learned parameters.
    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray>;

    /// Fit and transform in one call.
    ///
    /// Override when a unit can produce its output while fitting; the result
    /// must equal `fit` followed by `transform`.
    fn fit_transform(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<FeatureArray> {
        self.fit(x, y)?;
        self.transform(x)
    }

    /// Whether `fit` makes use of target labels.
    fn accepts_target(&self) -> bool {
        false
    }

    /// Short human-readable name.
    fn name(&self) -> &str {
        short_type_name(type_name::<Self>())
    }
}

/// `"crate::module::Type<Generic>"` -> `"Type"`.
pub(crate) fn short_type_name(full_name: &str) -> &str {
    let before_generic = match full_name.find('<') {
        Some(pos) => &full_name[..pos],
        None => full_name,
    };
    match before_generic.rfind("::") {
        Some(pos) => &before_generic[pos + 2..],
        None => before_generic,
    }
}

impl<T: Transformer + ?Sized> Transformer for Box<T> {
    fn fit(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()> {
        (**self).fit(x, y)
    }

    fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
        (**self).transform(x)
    }

    fn fit_transform(&mut self, x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<FeatureArray> {
        (**self).fit_transform(x, y)
    }

    fn accepts_target(&self) -> bool {
        (**self).accepts_target()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[derive(Debug)]
    struct Recorder {
        fitted_with_target: bool,
    }

    impl Transformer for Recorder {
        fn fit(&mut self, _x: &FeatureArray, y: Option<&Array1<f64>>) -> Result<()> {
            self.fitted_with_target = y.is_some();
            Ok(())
        }

        fn transform(&self, x: &FeatureArray) -> Result<FeatureArray> {
            Ok(x.clone())
        }
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(
            short_type_name("frame_mapper::preprocessing::StandardScaler"),
            "StandardScaler"
        );
        assert_eq!(short_type_name("a::b::Chain<a::Step>"), "Chain");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_default_name_from_type() {
        let r = Recorder {
            fitted_with_target: false,
        };
        assert_eq!(r.name(), "Recorder");
    }

    #[test]
    fn test_default_fit_transform() {
        let mut r = Recorder {
            fitted_with_target: false,
        };
        let x = FeatureArray::Vector(array![1.0, 2.0]);
        let y = array![0.0, 1.0];
        let out = r.fit_transform(&x, Some(&y)).unwrap();
        assert_eq!(out, x);
        assert!(r.fitted_with_target);
    }

    #[test]
    fn test_boxed_dyn_transformer_forwards() {
        let mut boxed: Box<dyn Transformer> = Box::new(Recorder {
            fitted_with_target: false,
        });
        assert!(!boxed.accepts_target());
        assert_eq!(boxed.name(), "Recorder");
        let x = FeatureArray::Vector(array![3.0]);
        assert_eq!(boxed.fit_transform(&x, None).unwrap(), x);
    }
}
