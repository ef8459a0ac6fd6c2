//! Rod-length constraints and the multiplier solve that enforces them.
//!
//! With `p1` the position of bob one and `d = p2 - p1` the link to bob two,
//! the constraints are `|p1|² = L1²` and `|d|² = L2²`. Differentiating each
//! twice in time gives two equations linear in the multipliers `λ1`, `λ2`:
//!
//! ```text
//! | |p1|²/m1        -(p1·d)/m1          | |λ1|   | |v1|² + p1·g |
//! | -(p1·d)/m1      |d|²(1/m1 + 1/m2)   | |λ2| = | |w|²         |
//! ```
//!
//! where `v1` is the velocity of bob one and `w = v2 - v1`. The accelerations
//! then follow as
//!
//! ```text
//! a1 = g + (-λ1 p1 + λ2 d) / m1
//! a2 = g - λ2 d / m2
//! ```

use thiserror::Error;

use crate::{
    Bob, State,
    state::{dot, norm},
};

/// Relative size below which the multiplier system counts as singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Errors raised while enforcing the rod constraints.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConstraintError {
    #[error("constraint system is singular (determinant = {determinant})")]
    Singular { determinant: f64 },

    #[error("rod of {rod} has degenerate length {length}")]
    DegenerateRod { rod: Bob, length: f64 },
}

/// The rod lengths a run holds fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rods {
    pub l1: f64,
    pub l2: f64,
}

impl Rods {
    /// Measures the rod lengths of `state`.
    #[must_use]
    pub fn measure(state: &State) -> Self {
        let [l1, l2] = state.rod_lengths();
        Self { l1, l2 }
    }

    /// Returns the length of the rod ending at `bob`.
    #[must_use]
    pub fn length(&self, bob: Bob) -> f64 {
        match bob {
            Bob::One => self.l1,
            Bob::Two => self.l2,
        }
    }
}

/// Lagrange multipliers for the two rod constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Multipliers {
    pub lambda1: f64,
    pub lambda2: f64,
}

/// Solves the acceleration-level constraint system for the multipliers.
///
/// # Errors
///
/// Returns [`ConstraintError::Singular`] if the system cannot be solved, which
/// happens when a rod has collapsed to zero length or the state is not finite.
pub fn solve_multipliers(
    state: &State,
    masses: [f64; 2],
    gravity: f64,
) -> Result<Multipliers, ConstraintError> {
    let [m1, m2] = masses;
    let p1 = state.p1();
    let d = state.link();
    let v1 = state.w1();
    let w = state.link_velocity();
    let g = [0.0, -gravity];

    let coupling = -dot(p1, d) / m1;
    let a00 = dot(p1, p1) / m1;
    let a11 = dot(d, d) * (1.0 / m1 + 1.0 / m2);
    let b0 = dot(v1, v1) + dot(p1, g);
    let b1 = dot(w, w);

    let determinant = a00 * a11 - coupling * coupling;
    let scale = (a00 * a11).abs();
    if !determinant.is_finite() || scale == 0.0 || determinant.abs() <= SINGULAR_TOLERANCE * scale
    {
        return Err(ConstraintError::Singular { determinant });
    }

    Ok(Multipliers {
        lambda1: (b0 * a11 - coupling * b1) / determinant,
        lambda2: (a00 * b1 - coupling * b0) / determinant,
    })
}

/// Returns the accelerations of both bobs given solved multipliers.
#[must_use]
pub fn accelerations(
    state: &State,
    masses: [f64; 2],
    gravity: f64,
    multipliers: &Multipliers,
) -> [[f64; 2]; 2] {
    let [m1, m2] = masses;
    let p1 = state.p1();
    let d = state.link();
    let Multipliers { lambda1, lambda2 } = *multipliers;

    let a1 = [
        (-lambda1 * p1[0] + lambda2 * d[0]) / m1,
        -gravity + (-lambda1 * p1[1] + lambda2 * d[1]) / m1,
    ];
    let a2 = [-lambda2 * d[0] / m2, -gravity - lambda2 * d[1] / m2];

    [a1, a2]
}

/// Returns how far each rod is from its fixed length.
#[must_use]
pub fn violation(state: &State, rods: &Rods) -> [f64; 2] {
    let [l1, l2] = state.rod_lengths();
    [(l1 - rods.l1).abs(), (l2 - rods.l2).abs()]
}

/// Projects `state` back onto the constraint manifold.
///
/// Positions are rescaled along each rod to its fixed length, and the
/// velocity components along each rod are removed so both constraints hold
/// to first order as well.
///
/// # Errors
///
/// Returns [`ConstraintError::DegenerateRod`] if a rod has zero or non-finite
/// length, since it then has no direction to project along.
pub fn project(state: &State, rods: &Rods) -> Result<State, ConstraintError> {
    let p1 = unit(state.p1(), Bob::One)?;
    let d = unit(state.link(), Bob::Two)?;

    let x1 = p1[0] * rods.l1;
    let y1 = p1[1] * rods.l1;
    let x2 = x1 + d[0] * rods.l2;
    let y2 = y1 + d[1] * rods.l2;

    let v1 = tangential(state.w1(), p1);
    let w = tangential(state.link_velocity(), d);

    Ok(State {
        x1,
        y1,
        x2,
        y2,
        u1: v1[0],
        v1: v1[1],
        u2: v1[0] + w[0],
        v2: v1[1] + w[1],
    })
}

fn unit(vector: [f64; 2], rod: Bob) -> Result<[f64; 2], ConstraintError> {
    let length = norm(vector);
    if !length.is_finite() || length == 0.0 {
        return Err(ConstraintError::DegenerateRod { rod, length });
    }
    Ok([vector[0] / length, vector[1] / length])
}

fn tangential(velocity: [f64; 2], direction: [f64; 2]) -> [f64; 2] {
    let radial = dot(velocity, direction);
    [
        velocity[0] - radial * direction[0],
        velocity[1] - radial * direction[1],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn hanging() -> State {
        State {
            y1: -1.0,
            y2: -2.0,
            ..State::default()
        }
    }

    #[test]
    fn hanging_at_rest_balances_gravity() {
        let state = hanging();

        let multipliers = solve_multipliers(&state, [1.0, 1.0], 9.81).unwrap();
        assert_relative_eq!(multipliers.lambda1, 19.62);
        assert_relative_eq!(multipliers.lambda2, 9.81);

        let [a1, a2] = accelerations(&state, [1.0, 1.0], 9.81, &multipliers);
        for value in [a1[0], a1[1], a2[0], a2[1]] {
            assert_relative_eq!(value, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn accelerations_keep_rods_rigid() {
        let state = State {
            x1: 0.6,
            y1: -0.8,
            x2: 1.6,
            y2: -0.8,
            u1: 0.4,
            v1: 0.3,
            u2: 0.4,
            v2: 2.3,
        };
        let masses = [2.0, 0.5];

        let multipliers = solve_multipliers(&state, masses, 9.81).unwrap();
        let [a1, a2] = accelerations(&state, masses, 9.81, &multipliers);

        // Second time derivatives of both constraints must vanish.
        let p1 = state.p1();
        let d = state.link();
        let v1 = state.w1();
        let w = state.link_velocity();
        let rel = [a2[0] - a1[0], a2[1] - a1[1]];
        assert_relative_eq!(dot(p1, a1) + dot(v1, v1), 0.0, epsilon = 1e-10);
        assert_relative_eq!(dot(d, rel) + dot(w, w), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn collinear_rods_are_solvable() {
        let state = State {
            x1: 1.0,
            x2: 2.0,
            ..State::default()
        };

        assert!(solve_multipliers(&state, [1.0, 1.0], 9.81).is_ok());
    }

    #[test]
    fn collapsed_rod_is_singular() {
        let state = State {
            y1: -1.0,
            y2: -1.0,
            ..State::default()
        };

        assert!(matches!(
            solve_multipliers(&state, [1.0, 1.0], 9.81),
            Err(ConstraintError::Singular { .. })
        ));
    }

    #[test]
    fn non_finite_state_is_singular() {
        let state = State {
            x1: f64::NAN,
            ..hanging()
        };

        assert!(solve_multipliers(&state, [1.0, 1.0], 9.81).is_err());
    }

    #[test]
    fn projection_restores_lengths_and_tangency() {
        let rods = Rods { l1: 1.0, l2: 2.0 };
        let drifted = State {
            x1: 0.0,
            y1: -1.1,
            x2: 0.1,
            y2: -3.0,
            u1: 1.0,
            v1: 0.5,
            u2: -0.5,
            v2: 0.25,
        };

        let projected = project(&drifted, &rods).unwrap();

        let [l1, l2] = projected.rod_lengths();
        assert_relative_eq!(l1, 1.0, epsilon = 1e-12);
        assert_relative_eq!(l2, 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            dot(projected.p1(), projected.w1()),
            0.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            dot(projected.link(), projected.link_velocity()),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn projection_keeps_consistent_state() {
        let state = State {
            x1: 0.6,
            y1: -0.8,
            x2: 0.6,
            y2: -2.8,
            u1: 0.8,
            v1: 0.6,
            u2: 1.8,
            v2: 0.6,
        };
        let rods = Rods::measure(&state);

        let projected = project(&state, &rods).unwrap();

        for (a, b) in projected.to_array().iter().zip(state.to_array()) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn projection_rejects_collapsed_rod() {
        let state = State::default();
        let rods = Rods { l1: 1.0, l2: 1.0 };

        assert!(matches!(
            project(&state, &rods),
            Err(ConstraintError::DegenerateRod { rod: Bob::One, .. })
        ));
    }

    #[test]
    fn violation_measures_both_rods() {
        let rods = Rods { l1: 1.0, l2: 1.0 };
        let state = State {
            y1: -1.25,
            y2: -2.0,
            ..State::default()
        };

        let [first, second] = violation(&state, &rods);
        assert_relative_eq!(first, 0.25);
        assert_relative_eq!(second, 0.25);
    }
}
