use pendulum_solvers::transient::{self, Action, Event};
use tracing::{debug, trace, warn};

use crate::{
    Accelerations, Bob, DoublePendulum, Horizon, InitialConditions, InitialSource, MethodName,
    Mode, Motion, ParameterError, ParametersEcho, Settings, SimulationEcho, SimulationError,
    SimulationParameters, SimulationResult, State, Trajectory, constraint, fresh_seed,
};

/// Runs simulations with fixed [`Settings`].
///
/// A simulator holds no per-run state, so one instance can serve any number
/// of runs, including concurrent ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Simulator {
    settings: Settings,
}

impl Simulator {
    /// Creates a simulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(settings: Settings) -> Result<Self, ParameterError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves `params` and integrates the resulting initial state.
    ///
    /// Random runs without a seed draw a fresh one, which is echoed in the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is invalid, the integration fails, or
    /// a rod drifts beyond the configured tolerance. No samples are returned
    /// in any of these cases.
    pub fn run(&self, params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
        let result = self.try_run(params);
        if let Err(err) = &result {
            warn!(error = %err, step = ?err.step(), method = %params.method, "simulation failed");
        }
        result
    }

    fn try_run(&self, params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
        let horizon = params.horizon()?;

        let (mode, seed, initial) = match params.initial {
            InitialSource::Random { seed } => {
                let seed = seed.unwrap_or_else(fresh_seed);
                let initial = InitialConditions::random(seed, &self.settings.random);
                (Mode::Random, Some(seed), initial)
            }
            InitialSource::Custom {
                pendulum1,
                pendulum2,
            } => (
                Mode::Custom,
                None,
                InitialConditions::custom(pendulum1, pendulum2)?,
            ),
        };

        debug!(
            ?mode,
            method = %params.method,
            duration = params.duration,
            step_size = params.step_size,
            ?seed,
            "starting simulation"
        );

        let trajectory = self.integrate(&initial, params.method, &horizon)?;

        debug!(num_points = trajectory.len(), "simulation finished");

        Ok(SimulationResult {
            simulation: SimulationEcho {
                mode,
                pendulum1: *initial.pendulum1(),
                pendulum2: *initial.pendulum2(),
                seed,
            },
            parameters: ParametersEcho {
                duration: horizon.duration(),
                step_size: horizon.step(),
                method: params.method,
                num_points: trajectory.len(),
            },
            trajectory,
        })
    }

    /// Integrates `initial` over `horizon` with `method`.
    ///
    /// Every recorded sample is checked against the rod lengths of `initial`;
    /// the first one off by more than the drift tolerance ends the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the constraint system turns singular, a step
    /// produces a non-finite state, adaptive stepping exhausts its retries,
    /// or a rod drifts beyond tolerance.
    pub fn integrate(
        &self,
        initial: &InitialConditions,
        method: MethodName,
        horizon: &Horizon,
    ) -> Result<Trajectory, SimulationError> {
        let model = DoublePendulum::new(initial.masses(), self.settings.gravity)?;
        let rods = initial.rods();
        let problem = Motion::new(rods, self.settings.stabilization);
        let method = method.to_method(self.settings.dopri5);
        let tolerance = self.settings.drift_tolerance;

        let mut drift = None;
        let observer = |event: &Event<'_, State, Accelerations>| match *event {
            Event::Recorded {
                step,
                time,
                snapshot,
            } => {
                let [first, second] = constraint::violation(&snapshot.input, &rods);
                for (rod, violation) in [(Bob::One, first), (Bob::Two, second)] {
                    // Negated so a NaN violation also fails.
                    if !(violation <= tolerance) {
                        drift = Some(SimulationError::ConstraintDrift {
                            step,
                            time,
                            rod,
                            violation,
                        });
                        return Some(Action::StopEarly);
                    }
                }
                None
            }
            Event::Rejected {
                step,
                time,
                dt,
                error_norm,
            } => {
                trace!(step, time, dt, error_norm, "step rejected");
                None
            }
        };

        let solution = transient::solve::<_, _, _, { State::LEN }>(
            &model,
            &problem,
            initial.state(),
            &method,
            horizon,
            observer,
        )?;

        if let Some(err) = drift {
            return Err(err);
        }

        trace!(
            steps = solution.steps,
            rejected = solution.rejected,
            adaptive = method.is_adaptive(),
            "integration complete"
        );
        Ok(Trajectory::from_history(&solution.history))
    }

    /// Integrates one initial state with several methods.
    ///
    /// # Errors
    ///
    /// Returns the first error any method produces.
    pub fn simulate_methods(
        &self,
        initial: &InitialConditions,
        methods: &[MethodName],
        horizon: &Horizon,
    ) -> Result<Vec<Trajectory>, SimulationError> {
        methods
            .iter()
            .map(|&method| self.integrate(initial, method, horizon))
            .collect()
    }

    /// Integrates several initial states with one method.
    ///
    /// Pairs naturally with [`InitialConditions::perturbations`].
    ///
    /// # Errors
    ///
    /// Returns the first error any run produces.
    pub fn simulate_many(
        &self,
        initials: &[InitialConditions],
        method: MethodName,
        horizon: &Horizon,
    ) -> Result<Vec<Trajectory>, SimulationError> {
        initials
            .iter()
            .map(|initial| self.integrate(initial, method, horizon))
            .collect()
    }
}

/// Runs one simulation with default [`Settings`].
///
/// # Errors
///
/// See [`Simulator::run`].
pub fn simulate(params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
    Simulator::default().run(params)
}
