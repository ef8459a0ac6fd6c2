use thiserror::Error;

use pendulum_core::{Model, OdeProblem, Snapshot};

/// Errors that can occur when evaluating a model through an ODE problem.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// Failed to extract state, compute a derivative, or build input.
    #[error("problem error")]
    Problem(#[source] PE),
}

/// Type alias for the error of evaluating `M` through `P`.
pub(crate) type EvalErrorOf<M, P, const N: usize> =
    EvalError<<M as Model>::Error, <P as OdeProblem<N>>::Error>;

/// Extracts the state and its derivative from an evaluated snapshot.
pub(crate) fn state_and_derivative<M, P, const N: usize>(
    problem: &P,
    snapshot: &Snapshot<M::Input, M::Output>,
) -> Result<([f64; N], [f64; N]), EvalErrorOf<M, P, N>>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    let state = problem
        .state(&snapshot.input)
        .map_err(EvalError::Problem)?;
    let derivative = problem
        .derivative(&snapshot.input, &snapshot.output)
        .map_err(EvalError::Problem)?;
    Ok((state, derivative))
}

/// Evaluates the state derivative at a stage state located `delta` past `base`.
pub(crate) fn derivative<M, P, const N: usize>(
    model: &M,
    problem: &P,
    base: &M::Input,
    delta: f64,
    state: &[f64; N],
) -> Result<[f64; N], EvalErrorOf<M, P, N>>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem
        .build_input(base, state, delta)
        .map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    problem
        .derivative(&input, &output)
        .map_err(EvalError::Problem)
}

/// Builds, finalizes, and evaluates the snapshot for an accepted step.
pub(crate) fn accept<M, P, const N: usize>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    state: &[f64; N],
    delta: f64,
) -> Result<Snapshot<M::Input, M::Output>, EvalErrorOf<M, P, N>>
where
    M: Model,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
{
    let next_input = problem
        .build_input(&current.input, state, delta)
        .map_err(EvalError::Problem)?;
    let next_input = problem
        .finalize_step(next_input, &current.input, &current.output, delta)
        .map_err(EvalError::Problem)?;
    let next_output = model.call(&next_input).map_err(EvalError::Model)?;
    Ok(Snapshot::new(next_input, next_output))
}

/// Returns `true` if every element of `state` is finite.
pub(crate) fn is_finite<const N: usize>(state: &[f64; N]) -> bool {
    state.iter().all(|value| value.is_finite())
}
