/// Control actions supported by the transient solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the history recorded so far.
    StopEarly,
}
