/// Receives events from a solver and optionally steers it.
///
/// Returning `None` lets the solver continue unchanged. Solvers define their
/// own event and action types, so one observer can be written generically over
/// the capabilities it needs.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and so is `()`,
/// which ignores every event.
pub trait Observer<E, A> {
    /// Handles one event and returns an optional action for the solver.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
    }

    fn drive<Obs: Observer<usize, Action>>(mut observer: Obs, events: usize) -> usize {
        for event in 0..events {
            if let Some(Action::Stop) = observer.observe(&event) {
                return event;
            }
        }
        events
    }

    #[test]
    fn unit_observer_never_acts() {
        assert_eq!(drive((), 10), 10);
    }

    #[test]
    fn closure_observer_can_stop() {
        let mut seen = Vec::new();
        let stopped_at = drive(
            |event: &usize| {
                seen.push(*event);
                (*event == 3).then_some(Action::Stop)
            },
            10,
        );

        assert_eq!(stopped_at, 3);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
