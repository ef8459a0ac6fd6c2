use pendulum_core::{Model, Observer, OdeProblem, Snapshot};

use super::{
    Action, Error, Event, Horizon, Sample, Solution, Status, evaluate, method::FixedStep,
};

/// Integrates with a fixed-step scheme, recording a sample after every step.
///
/// Sample times are computed as `step * dt` rather than accumulated, so the
/// `n`-th sample lands exactly on the `n`-th grid point.
pub(super) fn integrate<S, M, P, Obs, const N: usize>(
    scheme: &S,
    model: &M,
    problem: &P,
    initial: M::Input,
    horizon: &Horizon,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    S: FixedStep,
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let dt = horizon.step();
    let steps = horizon.fixed_steps();

    let initial_output = model.call(&initial).map_err(|e| Error::model(0, 0.0, e))?;
    let mut history = Vec::with_capacity(steps + 1);
    history.push(Sample::new(0.0, Snapshot::new(initial, initial_output)));

    if super::record(&mut observer, 0, &history[0]) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
            rejected: 0,
        });
    }

    for step in 1..=steps {
        let t = horizon.time_at(step - 1);

        let next = {
            let current = &history[step - 1].snapshot;
            let (y, k1) = evaluate::state_and_derivative::<M, P, N>(problem, current)
                .map_err(|e| Error::eval(step, t, e))?;

            let mut f = |stage_t: f64, stage_y: &[f64; N]| {
                evaluate::derivative(model, problem, &current.input, stage_t - t, stage_y)
            };
            let y_next = scheme
                .step(&mut f, t, &y, &k1, dt)
                .map_err(|e| Error::eval(step, t, e))?;

            if !evaluate::is_finite(&y_next) {
                return Err(Error::NonFinite { step, time: t });
            }

            evaluate::accept(model, problem, current, &y_next, dt)
                .map_err(|e| Error::eval(step, t, e))?
        };

        history.push(Sample::new(horizon.time_at(step), next));

        if super::record(&mut observer, step, &history[step]) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
                rejected: 0,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
        rejected: 0,
    })
}
