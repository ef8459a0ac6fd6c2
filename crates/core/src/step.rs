/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait enables generic ODE solvers to work with the type by
/// stepping it via `derivative * delta`, where the derivative is with respect
/// to `Delta`. While typically used for time integration, `Delta` can represent
/// any independent variable.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

impl<const N: usize> StepIntegrable<f64> for [f64; N] {
    type Derivative = [f64; N];

    fn step(&self, derivative: &[f64; N], delta: f64) -> Self {
        std::array::from_fn(|i| self[i] + derivative[i] * delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_scalar_array() {
        let position = [0.0];
        let velocity = [2.0];

        assert_eq!(position.step(&velocity, 0.5), [1.0]);
    }

    #[test]
    fn step_vector_array() {
        let state = [1.0, 2.0, 3.0];
        let derivative: DerivativeOf<[f64; 3], f64> = [0.1, 0.2, 0.3];

        let next = state.step(&derivative, 10.0);

        assert_eq!(next, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn step_leaves_original_untouched() {
        let state = [1.0, -1.0];
        let next = state.step(&[1.0, 1.0], 0.25);

        assert_eq!(state, [1.0, -1.0]);
        assert_eq!(next, [1.25, -0.75]);
    }
}
