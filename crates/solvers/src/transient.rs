//! Transient integration of ODE problems.
//!
//! [`solve`] steps a model forward from `t = 0` to the end of a [`Horizon`]
//! with the selected [`Method`]:
//!
//! 1. Call the model with the initial input to get the initial snapshot.
//! 2. For each step:
//!    - Extract the state and its derivative from the current snapshot.
//!    - Advance the state with the method's stages, evaluating the model at
//!      each intermediate stage state.
//!    - Build the next input from the stepped state.
//!    - Finalize the step (constraint projection, discrete controls, etc.).
//!    - Call the model to get the next output.
//!    - Emit an [`Event::Recorded`] to the observer.
//! 3. Return the solution with the full history.
//!
//! Fixed-step methods record `floor(duration / step) + 1` samples on a uniform
//! grid. [`Method::Dopri5`] records one sample per accepted step, ending
//! exactly at the horizon's duration.
//!
//! # Example
//!
//! ```ignore
//! use pendulum_solvers::transient::{self, Horizon, Method};
//!
//! let horizon = Horizon::new(10.0, 0.01)?;
//! let solution = transient::solve_unobserved(&model, &problem, initial, &Method::Rk4, &horizon)?;
//!
//! for sample in &solution.history {
//!     println!("t={}: {:?}", sample.time, sample.snapshot.input);
//! }
//! ```

mod action;
mod adaptive;
mod error;
mod evaluate;
mod event;
mod fixed;
mod horizon;
mod method;
mod solution;

pub mod dopri5;
pub mod euler;
pub mod midpoint;
pub mod rk4;


pub use action::Action;
pub use error::Error;
pub use evaluate::EvalError;
pub use event::Event;
pub use horizon::{Horizon, HorizonError};
pub use method::{FixedStep, Method};
pub use solution::{Sample, Solution, Status};

use pendulum_core::{Model, Observer, OdeProblem};

/// Integrates an ODE problem over `horizon` using `method`.
///
/// # Observer
///
/// The observer receives an [`Event::Recorded`] for the initial state and
/// after each accepted step, and an [`Event::Rejected`] for each adaptive
/// attempt that missed its tolerance. Returning [`Action::StopEarly`] ends
/// the integration with [`Status::StoppedByObserver`].
///
/// # Errors
///
/// Returns an error if the model or problem fails, a step produces a
/// non-finite state, or an adaptive step exhausts its rejection budget.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    method: &Method,
    horizon: &Horizon,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    match method {
        Method::Euler => fixed::integrate(&euler::Euler, model, problem, initial, horizon, observer),
        Method::ExplicitMidpoint => fixed::integrate(
            &midpoint::ExplicitMidpoint,
            model,
            problem,
            initial,
            horizon,
            observer,
        ),
        Method::Rk4 => fixed::integrate(&rk4::Rk4, model, problem, initial, horizon, observer),
        Method::Dopri5(config) => {
            adaptive::integrate(config, model, problem, initial, horizon, observer)
        }
    }
}

/// Integrates an ODE problem without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem fails, a step produces a
/// non-finite state, or an adaptive step exhausts its rejection budget.
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    method: &Method,
    horizon: &Horizon,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, initial, method, horizon, ())
}

/// Emits a recorded sample and returns `true` if the observer asked to stop.
fn record<I, O, Obs>(observer: &mut Obs, step: usize, sample: &Sample<I, O>) -> bool
where
    Obs: for<'a> Observer<Event<'a, I, O>, Action>,
{
    let event = Event::Recorded {
        step,
        time: sample.time,
        snapshot: &sample.snapshot,
    };
    matches!(observer.observe(&event), Some(Action::StopEarly))
}
