use crate::{ParameterError, RandomConfig, dopri5};

/// How the rod constraints are held after each accepted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stabilization {
    /// Project positions and velocities back onto the rods.
    #[default]
    Projection,

    /// Rely on the acceleration-level constraints alone.
    None,
}

/// Model and solver settings shared by every run of a [`Simulator`].
///
/// [`Simulator`]: crate::Simulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Gravitational acceleration, acting along negative `y`.
    pub gravity: f64,

    /// Largest rod-length error a sample may carry before the run fails.
    pub drift_tolerance: f64,

    pub stabilization: Stabilization,

    /// Step-size control for `DOPRI5` runs.
    pub dopri5: dopri5::Config,

    /// Ranges for seeded initial conditions.
    pub random: RandomConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            drift_tolerance: 1e-3,
            stabilization: Stabilization::default(),
            dopri5: dopri5::Config::default(),
            random: RandomConfig::default(),
        }
    }
}

impl Settings {
    /// Checks the scalar settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `gravity` is not finite or `drift_tolerance` is not
    /// finite and positive.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.gravity.is_finite() {
            return Err(ParameterError::InvalidSetting {
                name: "gravity",
                reason: "must be finite",
            });
        }
        if !self.drift_tolerance.is_finite() || self.drift_tolerance <= 0.0 {
            return Err(ParameterError::InvalidSetting {
                name: "drift_tolerance",
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.stabilization, Stabilization::Projection);
    }

    #[test]
    fn rejects_bad_drift_tolerance() {
        let settings = Settings {
            drift_tolerance: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ParameterError::InvalidSetting {
                name: "drift_tolerance",
                ..
            })
        ));
    }
}
