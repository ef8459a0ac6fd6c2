/// Defines an ODE (ordinary differential equation) problem to be solved.
///
/// An ODE problem extracts an `N`-element state from model input, computes the
/// state derivative from model input and output, and rebuilds model input from
/// a stepped state. This lets generic ODE solvers integrate any [`Model`]
/// without knowing its input and output types.
///
/// The independent variable is a plain `f64` (usually time). Solvers track it
/// themselves and pass offsets from the base input as `delta`.
///
/// [`Model`]: crate::Model
pub trait OdeProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state vector from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<[f64; N], Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// The returned array must align element-wise with [`OdeProblem::state`].
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; N], Self::Error>;

    /// Builds model input from a state located `delta` past `base`.
    ///
    /// Solvers call this for intermediate stage states as well as for the
    /// accepted end-of-step state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &[f64; N],
        delta: f64,
    ) -> Result<Self::Input, Self::Error>;

    /// Finalizes input after a successful integration step.
    ///
    /// This is called only after a step is accepted by the solver, never for
    /// intermediate stages. It is the hook for constraint enforcement, such as
    /// projecting a drifting state back onto its constraint manifold.
    ///
    /// The default implementation returns the input unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if finalization fails.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: f64,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}
