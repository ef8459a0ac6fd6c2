//! Explicit midpoint:
//!
//! ```text
//! y_mid   = y_n + f(t_n, y_n) * dt / 2
//! y_{n+1} = y_n + f(t_n + dt / 2, y_mid) * dt
//! ```

use pendulum_core::StepIntegrable;

use super::method::FixedStep;

/// The explicit midpoint scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitMidpoint;

impl FixedStep for ExplicitMidpoint {
    fn step<F, E, const N: usize>(
        &self,
        f: &mut F,
        t: f64,
        y: &[f64; N],
        k1: &[f64; N],
        dt: f64,
    ) -> Result<[f64; N], E>
    where
        F: FnMut(f64, &[f64; N]) -> Result<[f64; N], E>,
    {
        let half = 0.5 * dt;
        let k2 = f(t + half, &y.step(k1, half))?;
        Ok(y.step(&k2, dt))
    }
}
