//! Time evolution of a planar double pendulum.
//!
//! Two point masses hang from massless rigid rods: bob 1 from a fixed pivot at
//! the origin, bob 2 from bob 1. The system is posed in Cartesian coordinates
//! with the rod lengths as holonomic constraints. Every derivative evaluation
//! runs the same pipeline:
//!
//! 1. Solve the 2×2 system for the Lagrange multipliers ([`constraint`]).
//! 2. Add the constraint reactions to gravity to get accelerations
//!    ([`DoublePendulum`]).
//! 3. Hand the state derivative to the integrator ([`Motion`]).
//!
//! [`Simulator`] runs a whole request: it resolves the initial state (seeded
//! random or explicit), integrates with the requested method, checks that the
//! rods stay within tolerance of their initial lengths, and returns the
//! trajectory along with an echo of everything it resolved.
//!
//! ```ignore
//! use double_pendulum::{MethodName, Pendulum, SimulationParameters, simulate};
//!
//! let params = SimulationParameters::custom(
//!     Pendulum::at_rest(5.0, 1.5, -2.0),
//!     Pendulum::at_rest(3.0, 3.0, -4.0),
//!     3.0,
//!     0.1,
//!     MethodName::Rk4,
//! );
//! let result = simulate(&params)?;
//! assert_eq!(result.trajectory.len(), 31);
//! ```

pub mod constraint;
mod dynamics;
mod error;
mod initial;
mod params;
mod pendulum;
mod problem;
mod result;
mod settings;
mod simulation;
mod state;

pub use constraint::{ConstraintError, Multipliers, Rods};
pub use dynamics::{Accelerations, DoublePendulum};
pub use error::{ParameterError, SimulationError};
pub use initial::{InitialConditions, RandomConfig, fresh_seed};
pub use params::{InitialSource, MethodName, Request, SimulationParameters};
pub use pendulum::{Bob, Pendulum};
pub use problem::Motion;
pub use result::{Mode, ParametersEcho, SimulationEcho, SimulationResult, Trajectory, TrajectoryPoint};
pub use settings::{Settings, Stabilization};
pub use simulation::{Simulator, simulate};
pub use state::State;

/// Re-exported so callers can build horizons and Dormand–Prince configs.
pub use pendulum_solvers::transient::{Horizon, dopri5};
