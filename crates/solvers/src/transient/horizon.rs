use thiserror::Error;

/// Relative slack used when deciding whether `duration / step` is a whole number.
const WHOLE_STEP_TOLERANCE: f64 = 1e-9;

/// The time span to integrate over, starting at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    duration: f64,
    step: f64,
}

/// Errors that can occur when validating a horizon.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum HorizonError {
    #[error("duration must be finite and positive, got {0}")]
    Duration(f64),

    #[error("step must be finite and positive, got {0}")]
    Step(f64),

    #[error("step {step} exceeds duration {duration}")]
    StepExceedsDuration { step: f64, duration: f64 },
}

impl Horizon {
    /// Creates a validated horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` or `step` is non-finite or non-positive,
    /// or if `step` is larger than `duration`.
    pub fn new(duration: f64, step: f64) -> Result<Self, HorizonError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(HorizonError::Duration(duration));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(HorizonError::Step(step));
        }
        if step > duration {
            return Err(HorizonError::StepExceedsDuration { step, duration });
        }

        Ok(Self { duration, step })
    }

    /// Returns the total time to integrate over.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the nominal step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the number of whole steps that fit within the duration.
    ///
    /// A ratio within floating-point noise of a whole number counts as that
    /// number, so `3.0 / 0.1` yields 30 steps rather than 29.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fixed_steps(&self) -> usize {
        let ratio = self.duration / self.step;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= WHOLE_STEP_TOLERANCE * nearest.max(1.0) {
            nearest as usize
        } else {
            ratio.floor() as usize
        }
    }

    /// Returns the time of the `index`-th fixed step.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.step
    }
}
