use pendulum_core::Model;

use crate::{
    Bob, ParameterError, State,
    constraint::{self, ConstraintError, Multipliers},
};

/// Masses and gravity of a double pendulum.
///
/// The model maps a [`State`] to the constraint-consistent [`Accelerations`]
/// of both bobs. Rod lengths are not stored: they are implied by the
/// positions in the state, which the constraint solve keeps rigid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    masses: [f64; 2],
    gravity: f64,
}

/// Accelerations of both bobs with the multipliers that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accelerations {
    pub a1: [f64; 2],
    pub a2: [f64; 2],
    pub multipliers: Multipliers,
}

impl DoublePendulum {
    /// Creates a double pendulum model.
    ///
    /// # Errors
    ///
    /// Returns an error if either mass is not finite and positive, or if
    /// `gravity` is not finite.
    pub fn new(masses: [f64; 2], gravity: f64) -> Result<Self, ParameterError> {
        for (bob, mass) in [(Bob::One, masses[0]), (Bob::Two, masses[1])] {
            if !mass.is_finite() || mass <= 0.0 {
                return Err(ParameterError::NonPositiveMass {
                    pendulum: bob,
                    mass,
                });
            }
        }
        if !gravity.is_finite() {
            return Err(ParameterError::InvalidSetting {
                name: "gravity",
                reason: "must be finite",
            });
        }
        Ok(Self { masses, gravity })
    }

    #[must_use]
    pub fn masses(&self) -> [f64; 2] {
        self.masses
    }

    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the state derivative `(u1, v1, u2, v2, a1x, a1y, a2x, a2y)`.
    #[must_use]
    pub fn derivative(state: &State, accelerations: &Accelerations) -> [f64; State::LEN] {
        let Accelerations { a1, a2, .. } = accelerations;
        [
            state.u1, state.v1, state.u2, state.v2, a1[0], a1[1], a2[0], a2[1],
        ]
    }

    /// Total mechanical energy, with zero potential at the pivot height.
    #[must_use]
    pub fn energy(&self, state: &State) -> f64 {
        let [m1, m2] = self.masses;
        let kinetic = 0.5 * m1 * (state.u1.powi(2) + state.v1.powi(2))
            + 0.5 * m2 * (state.u2.powi(2) + state.v2.powi(2));
        let potential = self.gravity * (m1 * state.y1 + m2 * state.y2);
        kinetic + potential
    }
}

impl Model for DoublePendulum {
    type Input = State;
    type Output = Accelerations;
    type Error = ConstraintError;

    fn call(&self, state: &State) -> Result<Accelerations, ConstraintError> {
        let multipliers = constraint::solve_multipliers(state, self.masses, self.gravity)?;
        let [a1, a2] = constraint::accelerations(state, self.masses, self.gravity, &multipliers);
        Ok(Accelerations {
            a1,
            a2,
            multipliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_non_positive_masses() {
        assert_eq!(
            DoublePendulum::new([0.0, 1.0], 9.81),
            Err(ParameterError::NonPositiveMass {
                pendulum: Bob::One,
                mass: 0.0
            })
        );
        assert!(DoublePendulum::new([1.0, -2.0], 9.81).is_err());
        assert!(DoublePendulum::new([1.0, f64::NAN], 9.81).is_err());
    }

    #[test]
    fn horizontal_release_starts_in_free_fall() {
        // Rods horizontal and at rest: gravity is perpendicular to both, so
        // the rods carry no tension at the first instant.
        let model = DoublePendulum::new([5.0, 3.0], 9.81).unwrap();
        let state = State {
            x1: 1.0,
            x2: 2.0,
            ..State::default()
        };

        let output = model.call(&state).unwrap();

        assert_relative_eq!(output.multipliers.lambda1, 0.0, epsilon = 1e-12);
        assert_relative_eq!(output.multipliers.lambda2, 0.0, epsilon = 1e-12);
        assert_relative_eq!(output.a1[1], -9.81, epsilon = 1e-12);
        assert_relative_eq!(output.a2[1], -9.81, epsilon = 1e-12);
    }

    #[test]
    fn derivative_orders_velocities_before_accelerations() {
        let state = State {
            u1: 1.0,
            v1: 2.0,
            u2: 3.0,
            v2: 4.0,
            ..State::default()
        };
        let accelerations = Accelerations {
            a1: [5.0, 6.0],
            a2: [7.0, 8.0],
            multipliers: Multipliers::default(),
        };

        assert_eq!(
            DoublePendulum::derivative(&state, &accelerations),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
    }

    #[test]
    fn energy_counts_kinetic_and_potential() {
        let model = DoublePendulum::new([2.0, 1.0], 10.0).unwrap();
        let state = State {
            y1: -1.0,
            y2: -2.0,
            u1: 1.0,
            u2: 2.0,
            ..State::default()
        };

        // kinetic: 0.5·2·1 + 0.5·1·4 = 3, potential: 10·(−2 − 2) = −40
        assert_relative_eq!(model.energy(&state), -37.0);
    }
}
