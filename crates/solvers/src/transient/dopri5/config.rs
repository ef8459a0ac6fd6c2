use thiserror::Error;

/// Order used in the step-size controller exponent (`1 / (q + 1)`).
const ERROR_ORDER: f64 = 4.0;

/// Configuration for the Dormand–Prince step-size controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    abs_tol: f64,
    rel_tol: f64,
    safety: f64,
    min_factor: f64,
    max_factor: f64,
    min_step: f64,
    max_step: Option<f64>,
    max_rejections: usize,
}

/// Errors that can occur when validating a Dormand–Prince config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("rel_tol must be finite and non-negative")]
    RelTol,

    #[error("safety must be in (0, 1]")]
    Safety,

    #[error("factors must satisfy 0 < min_factor < 1 < max_factor")]
    Factors,

    #[error("min_step must be finite and positive")]
    MinStep,

    #[error("max_step must be finite and not less than min_step")]
    MaxStep,

    #[error("max_rejections must be at least 1")]
    MaxRejections,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-8, 1e-8).unwrap()
    }
}

impl Config {
    /// Creates a config with the given tolerances and default controller settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, or if
    /// `abs_tol` is zero.
    pub fn new(abs_tol: f64, rel_tol: f64) -> Result<Self, ConfigError> {
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(ConfigError::RelTol);
        }

        Ok(Self {
            abs_tol,
            rel_tol,
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 5.0,
            min_step: 1e-10,
            max_step: None,
            max_rejections: 16,
        })
    }

    /// Sets the safety factor and the bounds on per-step resize factors.
    ///
    /// # Errors
    ///
    /// Returns an error if `safety` is outside `(0, 1]` or the factors do not
    /// bracket one.
    pub fn with_factors(
        mut self,
        safety: f64,
        min_factor: f64,
        max_factor: f64,
    ) -> Result<Self, ConfigError> {
        if !(safety > 0.0 && safety <= 1.0) {
            return Err(ConfigError::Safety);
        }
        if !(min_factor > 0.0 && min_factor < 1.0 && max_factor > 1.0 && max_factor.is_finite()) {
            return Err(ConfigError::Factors);
        }
        self.safety = safety;
        self.min_factor = min_factor;
        self.max_factor = max_factor;
        Ok(self)
    }

    /// Sets the step-size bounds.
    ///
    /// Without a `max_step`, the horizon's nominal step is used as the bound.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_step` is not positive or `max_step` is
    /// smaller than `min_step`.
    pub fn with_step_bounds(
        mut self,
        min_step: f64,
        max_step: Option<f64>,
    ) -> Result<Self, ConfigError> {
        if !min_step.is_finite() || min_step <= 0.0 {
            return Err(ConfigError::MinStep);
        }
        if let Some(max) = max_step {
            if !max.is_finite() || max < min_step {
                return Err(ConfigError::MaxStep);
            }
        }
        self.min_step = min_step;
        self.max_step = max_step;
        Ok(self)
    }

    /// Sets how many consecutive rejections a single step may suffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_rejections` is zero.
    pub fn with_max_rejections(mut self, max_rejections: usize) -> Result<Self, ConfigError> {
        if max_rejections == 0 {
            return Err(ConfigError::MaxRejections);
        }
        self.max_rejections = max_rejections;
        Ok(self)
    }

    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    #[must_use]
    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    #[must_use]
    pub fn max_rejections(&self) -> usize {
        self.max_rejections
    }

    /// Returns the RMS of the error scaled by `abs_tol + rel_tol * max(|y|, |y_next|)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn error_norm<const N: usize>(
        &self,
        y: &[f64; N],
        y_next: &[f64; N],
        error: &[f64; N],
    ) -> f64 {
        if N == 0 {
            return 0.0;
        }
        let sum: f64 = (0..N)
            .map(|i| {
                let scale = self.abs_tol + self.rel_tol * y[i].abs().max(y_next[i].abs());
                (error[i] / scale).powi(2)
            })
            .sum();
        (sum / N as f64).sqrt()
    }

    /// Returns the factor to grow (or mildly shrink) `dt` by after an accepted step.
    #[must_use]
    pub fn accept_factor(&self, error_norm: f64) -> f64 {
        if error_norm <= 0.0 {
            return self.max_factor;
        }
        (self.safety * error_norm.powf(-1.0 / (ERROR_ORDER + 1.0)))
            .clamp(self.min_factor, self.max_factor)
    }

    /// Returns the factor to shrink `dt` by after a rejected step.
    #[must_use]
    pub fn reject_factor(&self, error_norm: f64) -> f64 {
        if !error_norm.is_finite() {
            return self.min_factor;
        }
        (self.safety * error_norm.powf(-1.0 / (ERROR_ORDER + 1.0))).clamp(self.min_factor, 1.0)
    }
}
