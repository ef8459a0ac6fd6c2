use pendulum_core::Snapshot;

/// Events emitted by the transient solver.
///
/// Step 0 is the initial state before any integration. Steps 1..N are emitted
/// after each accepted step. Adaptive methods also report every rejected
/// attempt before retrying with a smaller step.
#[derive(Debug)]
pub enum Event<'a, I, O> {
    /// A sample was appended to the history.
    Recorded {
        /// The step number (0 for initial).
        step: usize,

        /// The time of the sample.
        time: f64,

        /// Snapshot of the model input and output at this sample.
        snapshot: &'a Snapshot<I, O>,
    },

    /// An adaptive step attempt exceeded the error tolerance.
    Rejected {
        /// The step number being attempted.
        step: usize,

        /// The time the attempt started from.
        time: f64,

        /// The step size that was rejected.
        dt: f64,

        /// The scaled error norm of the attempt (greater than 1).
        error_norm: f64,
    },
}

impl<I, O> Event<'_, I, O> {
    /// Returns the step number this event belongs to.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Recorded { step, .. } | Self::Rejected { step, .. } => *step,
        }
    }

    /// Returns the time associated with this event.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Self::Recorded { time, .. } | Self::Rejected { time, .. } => *time,
        }
    }
}
