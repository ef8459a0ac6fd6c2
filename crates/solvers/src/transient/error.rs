use std::error::Error as StdError;

use super::evaluate::EvalError;

/// Errors that can occur during transient integration.
///
/// Every variant identifies the step that failed and the time that step
/// started from, so a failed run can be reproduced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error at step {step} (t = {time}): {source}")]
    Model {
        step: usize,
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("problem error at step {step} (t = {time}): {source}")]
    Problem {
        step: usize,
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("non-finite state produced at step {step} (t = {time})")]
    NonFinite { step: usize, time: f64 },

    #[error(
        "step {step} rejected {attempts} times at t = {time} (last dt = {dt}, error norm = {error_norm})"
    )]
    StepRejected {
        step: usize,
        time: f64,
        attempts: usize,
        dt: f64,
        error_norm: f64,
    },
}

impl Error {
    /// Returns the step at which integration failed.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Model { step, .. }
            | Self::Problem { step, .. }
            | Self::NonFinite { step, .. }
            | Self::StepRejected { step, .. } => *step,
        }
    }

    pub(crate) fn model<E: StdError + Send + Sync + 'static>(
        step: usize,
        time: f64,
        err: E,
    ) -> Self {
        Self::Model {
            step,
            time,
            source: Box::new(err),
        }
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(
        step: usize,
        time: f64,
        err: E,
    ) -> Self {
        Self::Problem {
            step,
            time,
            source: Box::new(err),
        }
    }

    pub(crate) fn eval<ME, PE>(step: usize, time: f64, err: EvalError<ME, PE>) -> Self
    where
        ME: StdError + Send + Sync + 'static,
        PE: StdError + Send + Sync + 'static,
    {
        match err {
            EvalError::Model(e) => Self::model(step, time, e),
            EvalError::Problem(e) => Self::problem(step, time, e),
        }
    }
}
