//! Dormand–Prince 5(4) embedded Runge–Kutta pair.
//!
//! Each attempt evaluates seven stages and produces a fifth-order solution
//! along with the difference to the embedded fourth-order solution. That
//! difference is scaled by [`Config::error_norm`]; a norm at or below one
//! accepts the step.
//!
//! # Step control
//!
//! ```text
//! propose dt ─▶ evaluate pair ─▶ norm ≤ 1 ─▶ accept, grow dt (≤ max_step)
//!      ▲                           │
//!      └── shrink dt (≥ min_step) ◀┘ norm > 1 (at most `max_rejections` times)
//! ```
//!
//! When the retry budget runs out, or a rejected attempt was already at
//! `min_step`, integration fails with [`Error::StepRejected`].
//!
//! [`Error::StepRejected`]: super::Error::StepRejected

mod config;

pub use config::{Config, ConfigError};

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;

const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;

const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;

const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;

const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (also the seventh stage's coefficients).
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth-order minus fourth-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339_200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// The outcome of one Dormand–Prince attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt<const N: usize> {
    /// The fifth-order solution at `t + dt`.
    pub y: [f64; N],

    /// The local error estimate (fifth minus fourth order).
    pub error: [f64; N],
}

/// Performs one Dormand–Prince attempt from `(t, y)` over `dt`.
///
/// `k1` is the derivative at `(t, y)`.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn attempt<F, E, const N: usize>(
    f: &mut F,
    t: f64,
    y: &[f64; N],
    k1: &[f64; N],
    dt: f64,
) -> Result<Attempt<N>, E>
where
    F: FnMut(f64, &[f64; N]) -> Result<[f64; N], E>,
{
    let k2 = f(t + C2 * dt, &combine(y, dt, &[(A21, k1)]))?;
    let k3 = f(t + C3 * dt, &combine(y, dt, &[(A31, k1), (A32, &k2)]))?;
    let k4 = f(
        t + C4 * dt,
        &combine(y, dt, &[(A41, k1), (A42, &k2), (A43, &k3)]),
    )?;
    let k5 = f(
        t + C5 * dt,
        &combine(y, dt, &[(A51, k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
    )?;
    let k6 = f(
        t + dt,
        &combine(
            y,
            dt,
            &[(A61, k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
        ),
    )?;

    let y_next = combine(
        y,
        dt,
        &[(B1, k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
    );
    let k7 = f(t + dt, &y_next)?;

    let error = combine(
        &[0.0; N],
        dt,
        &[
            (E1, k1),
            (E3, &k3),
            (E4, &k4),
            (E5, &k5),
            (E6, &k6),
            (E7, &k7),
        ],
    );

    Ok(Attempt { y: y_next, error })
}

/// Returns `y + dt * Σ wᵢ·kᵢ`.
fn combine<const N: usize>(y: &[f64; N], dt: f64, terms: &[(f64, &[f64; N])]) -> [f64; N] {
    std::array::from_fn(|i| {
        let slope: f64 = terms.iter().map(|(weight, k)| weight * k[i]).sum();
        y[i] + dt * slope
    })
}
