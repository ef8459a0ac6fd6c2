//! Forward Euler:
//!
//! ```text
//! y_{n+1} = y_n + f(t_n, y_n) * dt
//! ```

use pendulum_core::StepIntegrable;

use super::method::FixedStep;

/// The forward Euler scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl FixedStep for Euler {
    fn step<F, E, const N: usize>(
        &self,
        _f: &mut F,
        _t: f64,
        y: &[f64; N],
        k1: &[f64; N],
        dt: f64,
    ) -> Result<[f64; N], E>
    where
        F: FnMut(f64, &[f64; N]) -> Result<[f64; N], E>,
    {
        Ok(y.step(k1, dt))
    }
}
