use super::dopri5;

/// The integration method used to advance a transient problem.
///
/// The method is resolved once when [`solve`](super::solve) starts; the
/// stepping loop is then specialized for that method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Forward Euler. First order, one derivative evaluation per step.
    ///
    /// Cheapest and least accurate; useful as a baseline.
    Euler,

    /// Explicit midpoint. Second order, two evaluations per step.
    ExplicitMidpoint,

    /// Classic fixed-step 4th-order Runge–Kutta method.
    ///
    /// A good balance between accuracy and cost for non-stiff problems where
    /// the step size is controlled externally.
    Rk4,

    /// Adaptive Dormand–Prince 5(4) Runge–Kutta method.
    ///
    /// An embedded pair that estimates the local error of every step, rejects
    /// steps that exceed the configured tolerance, and resizes the step within
    /// the configured bounds. Samples land wherever accepted steps end.
    Dopri5(dopri5::Config),
}

impl Method {
    /// Returns `true` if this method chooses its own step sizes.
    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        matches!(self, Self::Dopri5(_))
    }
}

/// A single-step explicit scheme advancing a state by a fixed `dt`.
///
/// `k1` is the derivative at `(t, y)`, which the caller already holds from
/// evaluating the current snapshot. `f` evaluates the derivative at any
/// other stage.
pub trait FixedStep {
    /// Returns the state at `t + dt`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    fn step<F, E, const N: usize>(
        &self,
        f: &mut F,
        t: f64,
        y: &[f64; N],
        k1: &[f64; N],
        dt: f64,
    ) -> Result<[f64; N], E>
    where
        F: FnMut(f64, &[f64; N]) -> Result<[f64; N], E>;
}
