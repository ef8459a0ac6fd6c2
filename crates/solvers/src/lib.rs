//! Numerical integrators for transient models.
//!
//! Solvers in this crate drive a [`Model`] through time by way of an
//! [`OdeProblem`], which maps the model's input and output to a fixed-size
//! state vector and its derivative.
//!
//! # Modules
//!
//! - [`transient`]: fixed-step (Euler, explicit midpoint, classical RK4) and
//!   adaptive (Dormand-Prince 5(4)) integration over a time horizon
//!
//! [`Model`]: pendulum_core::Model
//! [`OdeProblem`]: pendulum_core::OdeProblem

pub mod transient;
