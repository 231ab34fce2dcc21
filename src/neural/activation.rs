//! Scalar transfer functions attached to each unit.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Activation of a single unit, including its evolvable parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Activation {
    /// Identity
    Linear,
    /// `x` for non-negative inputs, `leakage * (e^x - 1)` below zero
    ExponentialLinearUnit { leakage: f64 },
}

/// Parameterless activation kind, used for eligibility sets and tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationKind {
    Linear,
    ExponentialLinearUnit,
}

impl Activation {
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Activation::Linear => x,
            Activation::ExponentialLinearUnit { leakage } => {
                if x >= 0.0 {
                    x
                } else {
                    leakage * x.exp_m1()
                }
            }
        }
    }

    pub fn kind(&self) -> ActivationKind {
        match self {
            Activation::Linear => ActivationKind::Linear,
            Activation::ExponentialLinearUnit { .. } => ActivationKind::ExponentialLinearUnit,
        }
    }

    /// Persisted tag of this activation
    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    pub fn leakage(&self) -> Option<f64> {
        match *self {
            Activation::Linear => None,
            Activation::ExponentialLinearUnit { leakage } => Some(leakage),
        }
    }

    /// Rebuild an activation from its tag and optional parameter.
    pub(crate) fn from_parts(kind: ActivationKind, leakage: Option<f64>) -> Result<Self, String> {
        match (kind, leakage) {
            (ActivationKind::Linear, None) => Ok(Activation::Linear),
            (ActivationKind::Linear, Some(_)) => {
                Err("LINEAR does not take a leakage".to_string())
            }
            (ActivationKind::ExponentialLinearUnit, Some(leakage)) => {
                Ok(Activation::ExponentialLinearUnit { leakage })
            }
            (ActivationKind::ExponentialLinearUnit, None) => {
                Err("EXPONENTIAL_LINEAR_UNIT requires a leakage".to_string())
            }
        }
    }

    /// Bitwise equality, so that NaN parameters compare equal to themselves
    pub(crate) fn bits_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Activation::Linear, Activation::Linear) => true,
            (
                Activation::ExponentialLinearUnit { leakage: a },
                Activation::ExponentialLinearUnit { leakage: b },
            ) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 2] =
        [ActivationKind::Linear, ActivationKind::ExponentialLinearUnit];

    pub fn tag(&self) -> &'static str {
        match self {
            ActivationKind::Linear => "LINEAR",
            ActivationKind::ExponentialLinearUnit => "EXPONENTIAL_LINEAR_UNIT",
        }
    }
}

impl std::fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActivationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown activation '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_is_identity() {
        for x in [-3.5, -0.0, 0.0, 1.0, 1e300, f64::INFINITY] {
            assert_eq!(Activation::Linear.evaluate(x), x);
        }
    }

    #[test]
    fn test_elu_boundary() {
        let elu = Activation::ExponentialLinearUnit { leakage: 0.3 };

        assert_eq!(elu.evaluate(0.0), 0.0);
        assert_eq!(elu.evaluate(2.5), 2.5);
        assert_relative_eq!(
            elu.evaluate(-1.0),
            0.3 * ((-1.0f64).exp() - 1.0),
            max_relative = 1e-12
        );
        assert_relative_eq!(elu.evaluate(-40.0), -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_tags_parse() {
        assert_eq!("LINEAR".parse::<ActivationKind>(), Ok(ActivationKind::Linear));
        assert_eq!(
            "exponential_linear_unit".parse::<ActivationKind>(),
            Ok(ActivationKind::ExponentialLinearUnit)
        );
        assert!("SIGMOID".parse::<ActivationKind>().is_err());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            Activation::from_parts(ActivationKind::Linear, None),
            Ok(Activation::Linear)
        );
        assert_eq!(
            Activation::from_parts(ActivationKind::Linear, Some(0.5)),
            Err("LINEAR does not take a leakage".to_string())
        );
        assert!(Activation::from_parts(ActivationKind::ExponentialLinearUnit, None).is_err());
    }

    #[test]
    fn test_nan_leakage_bits_eq() {
        let a = Activation::ExponentialLinearUnit { leakage: f64::NAN };
        assert!(a.bits_eq(&a));
        assert!(!a.bits_eq(&Activation::Linear));
    }
}
