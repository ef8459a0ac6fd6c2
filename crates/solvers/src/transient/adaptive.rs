use pendulum_core::{Model, Observer, OdeProblem, Snapshot};

use super::{Action, Error, Event, Horizon, Sample, Solution, Status, dopri5, evaluate};

/// How a single adaptive step ended.
enum Outcome<I, O> {
    Accepted {
        time: f64,
        snapshot: Snapshot<I, O>,
        next_dt: f64,
    },
    Stopped,
}

/// Integrates with Dormand–Prince, recording a sample after every accepted step.
///
/// The first attempt uses the horizon's nominal step. The final step is
/// shortened to land exactly on the end of the horizon.
#[allow(clippy::too_many_lines)]
pub(super) fn integrate<M, P, Obs, const N: usize>(
    config: &dopri5::Config,
    model: &M,
    problem: &P,
    initial: M::Input,
    horizon: &Horizon,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output>, Action>,
{
    let end = horizon.duration();
    let min_step = config.min_step();
    let max_step = config.max_step().unwrap_or(horizon.step()).max(min_step);

    let initial_output = model.call(&initial).map_err(|e| Error::model(0, 0.0, e))?;
    let mut history = vec![Sample::new(0.0, Snapshot::new(initial, initial_output))];
    let mut rejected = 0;

    if super::record(&mut observer, 0, &history[0]) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
            rejected,
        });
    }

    let mut t = 0.0;
    let mut dt = horizon.step().clamp(min_step, max_step);
    let mut step = 0;

    while t < end {
        step += 1;

        let outcome = {
            let current = &history[step - 1].snapshot;
            let (y, k1) = evaluate::state_and_derivative::<M, P, N>(problem, current)
                .map_err(|e| Error::eval(step, t, e))?;

            let mut f = |stage_t: f64, stage_y: &[f64; N]| {
                evaluate::derivative(model, problem, &current.input, stage_t - t, stage_y)
            };

            let mut attempts = 0;
            loop {
                let remaining = end - t;
                let (h, lands) = if dt >= remaining {
                    (remaining, true)
                } else {
                    (dt, false)
                };

                let attempt = dopri5::attempt(&mut f, t, &y, &k1, h)
                    .map_err(|e| Error::eval(step, t, e))?;
                if !evaluate::is_finite(&attempt.y) {
                    return Err(Error::NonFinite { step, time: t });
                }

                let error_norm = config.error_norm(&y, &attempt.y, &attempt.error);
                if error_norm <= 1.0 {
                    let snapshot = evaluate::accept(model, problem, current, &attempt.y, h)
                        .map_err(|e| Error::eval(step, t, e))?;
                    let next_dt = if lands {
                        dt
                    } else {
                        (h * config.accept_factor(error_norm)).clamp(min_step, max_step)
                    };
                    break Outcome::Accepted {
                        time: if lands { end } else { t + h },
                        snapshot,
                        next_dt,
                    };
                }

                attempts += 1;
                rejected += 1;

                let event = Event::Rejected {
                    step,
                    time: t,
                    dt: h,
                    error_norm,
                };
                if let Some(Action::StopEarly) = observer.observe(&event) {
                    break Outcome::Stopped;
                }

                if attempts >= config.max_rejections() || h <= min_step {
                    return Err(Error::StepRejected {
                        step,
                        time: t,
                        attempts,
                        dt: h,
                        error_norm,
                    });
                }

                dt = (h * config.reject_factor(error_norm)).max(min_step);
            }
        };

        match outcome {
            Outcome::Accepted {
                time,
                snapshot,
                next_dt,
            } => {
                t = time;
                dt = next_dt;
                history.push(Sample::new(time, snapshot));
            }
            Outcome::Stopped => {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    history,
                    steps: step - 1,
                    rejected,
                });
            }
        }

        if super::record(&mut observer, step, &history[step]) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
                rejected,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps: step,
        rejected,
    })
}
