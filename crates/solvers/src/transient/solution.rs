use pendulum_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the end of the horizon.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// A snapshot recorded at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<I, O> {
    pub time: f64,
    pub snapshot: Snapshot<I, O>,
}

impl<I, O> Sample<I, O> {
    pub(crate) fn new(time: f64, snapshot: Snapshot<I, O>) -> Self {
        Self { time, snapshot }
    }
}

/// The result of a transient integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// Samples from each accepted step, starting with the initial state.
    pub history: Vec<Sample<I, O>>,

    /// Number of accepted integration steps.
    pub steps: usize,

    /// Number of rejected step attempts (always zero for fixed-step methods).
    pub rejected: usize,
}
