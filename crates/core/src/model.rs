/// A fallible mapping from a typed input to a typed output.
///
/// Models are the physics (or any other computation) that solvers drive.
/// A model must not depend on hidden mutable state: calling it twice with the
/// same input yields the same output.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at `input`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the model cannot be evaluated at `input`.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A model input paired with the output it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Creates a snapshot from an input and its output.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}
