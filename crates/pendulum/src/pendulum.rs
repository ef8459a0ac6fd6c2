use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ParameterError;

/// Identifies one of the two bobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bob {
    /// Anchored to the fixed pivot at the origin.
    One,
    /// Anchored to bob one.
    Two,
}

impl fmt::Display for Bob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => f.write_str("pendulum1"),
            Self::Two => f.write_str("pendulum2"),
        }
    }
}

/// Mass, position, and velocity of one bob.
///
/// Positions are in the physics coordinate frame: the pivot is the origin and
/// `y` points up, so a hanging bob has negative `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pendulum {
    pub m: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub u: f64,
    #[serde(default)]
    pub v: f64,
}

impl Pendulum {
    #[must_use]
    pub fn new(m: f64, x: f64, y: f64, u: f64, v: f64) -> Self {
        Self { m, x, y, u, v }
    }

    /// Creates a bob with zero velocity.
    #[must_use]
    pub fn at_rest(m: f64, x: f64, y: f64) -> Self {
        Self::new(m, x, y, 0.0, 0.0)
    }

    /// Checks that every value is finite and the mass is positive.
    pub(crate) fn validate(&self, bob: Bob) -> Result<(), ParameterError> {
        for (field, value) in [("x", self.x), ("y", self.y), ("u", self.u), ("v", self.v)] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite {
                    pendulum: bob,
                    field,
                    value,
                });
            }
        }
        if !self.m.is_finite() || self.m <= 0.0 {
            return Err(ParameterError::NonPositiveMass {
                pendulum: bob,
                mass: self.m,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_velocities_default_to_zero() {
        let bob: Pendulum = serde_json::from_str(r#"{"m": 2, "x": 1.0, "y": -1.0}"#).unwrap();
        assert_eq!(bob, Pendulum::at_rest(2.0, 1.0, -1.0));
    }

    #[test]
    fn validate_rejects_bad_mass() {
        let zero = Pendulum::at_rest(0.0, 1.0, -1.0);
        assert_eq!(
            zero.validate(Bob::Two),
            Err(ParameterError::NonPositiveMass {
                pendulum: Bob::Two,
                mass: 0.0
            })
        );

        let negative = Pendulum::at_rest(-1.0, 1.0, -1.0);
        assert!(negative.validate(Bob::One).is_err());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let bob = Pendulum::new(1.0, 1.0, f64::INFINITY, 0.0, 0.0);
        assert!(matches!(
            bob.validate(Bob::One),
            Err(ParameterError::NonFinite { field: "y", .. })
        ));
    }

    #[test]
    fn bob_display_matches_wire_names() {
        assert_eq!(Bob::One.to_string(), "pendulum1");
        assert_eq!(Bob::Two.to_string(), "pendulum2");
    }
}
