use pendulum_solvers::transient::{self, HorizonError};
use thiserror::Error;

use crate::Bob;

/// A parameter is outside its valid range.
///
/// Raised before integration starts, so no trajectory exists.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{pendulum} mass must be finite and positive, got {mass}")]
    NonPositiveMass { pendulum: Bob, mass: f64 },

    #[error("{pendulum}.{field} must be finite, got {value}")]
    NonFinite {
        pendulum: Bob,
        field: &'static str,
        value: f64,
    },

    #[error("rod of {rod} is degenerate (length {length})")]
    DegenerateRod { rod: Bob, length: f64 },

    #[error("duration must be finite and positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("step_size must be finite and positive, got {0}")]
    NonPositiveStepSize(f64),

    #[error("step_size {step_size} exceeds duration {duration}")]
    StepExceedsDuration { step_size: f64, duration: f64 },

    #[error("unknown method {0:?}, expected one of Euler, ExplicitMidpoint, RK4, DOPRI5")]
    UnknownMethod(String),

    #[error("{name} {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: &'static str,
    },

    #[error("{name} range [{min}, {max}] is invalid")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

impl From<HorizonError> for ParameterError {
    fn from(err: HorizonError) -> Self {
        match err {
            HorizonError::Duration(duration) => Self::NonPositiveDuration(duration),
            HorizonError::Step(step) => Self::NonPositiveStepSize(step),
            HorizonError::StepExceedsDuration { step, duration } => Self::StepExceedsDuration {
                step_size: step,
                duration,
            },
        }
    }
}

/// A run failed.
///
/// Failed runs never return samples, so the caller cannot mistake a
/// truncated trajectory for a complete one.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),

    #[error("integration failed: {0}")]
    Integration(#[from] transient::Error),

    #[error("rod of {rod} drifted {violation} from its length at step {step} (t = {time})")]
    ConstraintDrift {
        step: usize,
        time: f64,
        rod: Bob,
        violation: f64,
    },
}

impl SimulationError {
    /// Returns the step at which the run failed, if it got past setup.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        match self {
            Self::Parameters(_) => None,
            Self::Integration(err) => Some(err.step()),
            Self::ConstraintDrift { step, .. } => Some(*step),
        }
    }
}
