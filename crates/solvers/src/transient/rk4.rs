//! Classical fourth-order Runge–Kutta.

use pendulum_core::StepIntegrable;

use super::method::FixedStep;

/// The classical four-stage Runge–Kutta scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl FixedStep for Rk4 {
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
        let k3 = f(t + half, &y.step(&k2, half))?;
        let k4 = f(t + dt, &y.step(&k3, dt))?;

        let slope = std::array::from_fn(|i| (k1[i] + 2.0 * (k2[i] + k3[i]) + k4[i]) / 6.0);
        Ok(y.step(&slope, dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    #[test]
    fn exact_for_cubic_in_time() {
        // dy/dt = 3t², so y(t) = t³ and RK4 integrates it exactly.
        let mut f = |t: f64, _y: &[f64; 1]| Ok::<_, Infallible>([3.0 * t * t]);
        let k1 = [0.0];

        let y = Rk4.step(&mut f, 0.0, &[0.0], &k1, 2.0).unwrap();

        assert_relative_eq!(y[0], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn propagates_stage_errors() {
        let mut f = |_t: f64, _y: &[f64; 1]| Err::<[f64; 1], _>("stage failed");

        let result = Rk4.step(&mut f, 0.0, &[1.0], &[0.0], 0.1);

        assert_eq!(result, Err("stage failed"));
    }
}
