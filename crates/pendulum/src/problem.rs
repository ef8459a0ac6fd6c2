use pendulum_core::OdeProblem;

use crate::{
    Accelerations, DoublePendulum, Rods, Stabilization, State,
    constraint::{self, ConstraintError},
};

/// Exposes [`DoublePendulum`] to the transient solvers as an 8-state ODE.
///
/// The state array uses the [`State`] layout. With
/// [`Stabilization::Projection`], every accepted step is projected back onto
/// the rods fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    rods: Rods,
    stabilization: Stabilization,
}

impl Motion {
    #[must_use]
    pub fn new(rods: Rods, stabilization: Stabilization) -> Self {
        Self {
            rods,
            stabilization,
        }
    }

    #[must_use]
    pub fn rods(&self) -> &Rods {
        &self.rods
    }
}

impl OdeProblem<{ State::LEN }> for Motion {
    type Input = State;
    type Output = Accelerations;
    type Error = ConstraintError;

    fn state(&self, input: &State) -> Result<[f64; State::LEN], ConstraintError> {
        Ok(input.to_array())
    }

    fn derivative(
        &self,
        input: &State,
        output: &Accelerations,
    ) -> Result<[f64; State::LEN], ConstraintError> {
        Ok(DoublePendulum::derivative(input, output))
    }

    fn build_input(
        &self,
        _base: &State,
        state: &[f64; State::LEN],
        _delta: f64,
    ) -> Result<State, ConstraintError> {
        Ok(State::from_array(*state))
    }

    fn finalize_step(
        &self,
        next_input: State,
        _prev_input: &State,
        _prev_output: &Accelerations,
        _step_delta: f64,
    ) -> Result<State, ConstraintError> {
        match self.stabilization {
            Stabilization::Projection => constraint::project(&next_input, &self.rods),
            Stabilization::None => Ok(next_input),
        }
    }
}
