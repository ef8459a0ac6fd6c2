use std::{
    f64::consts::{FRAC_PI_2, PI},
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Bob, ParameterError, Pendulum, Rods, State};

/// Shortest rod accepted in an initial state.
const MIN_ROD_LENGTH: f64 = 1e-6;

/// Smallest lower bound for a sampled range; sampled values are rounded to
/// hundredths and must stay positive.
const MIN_SAMPLED_VALUE: f64 = 0.01;

/// Validated starting bobs for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pendulum1: Pendulum,
    pendulum2: Pendulum,
}

impl InitialConditions {
    /// Uses caller-supplied bobs as the initial state.
    ///
    /// # Errors
    ///
    /// Returns an error if a mass is not positive, a value is not finite, or
    /// either rod is shorter than a micrometre-scale epsilon.
    pub fn custom(pendulum1: Pendulum, pendulum2: Pendulum) -> Result<Self, ParameterError> {
        pendulum1.validate(Bob::One)?;
        pendulum2.validate(Bob::Two)?;

        let conditions = Self {
            pendulum1,
            pendulum2,
        };
        let rods = conditions.rods();
        for rod in [Bob::One, Bob::Two] {
            let length = rods.length(rod);
            if length <= MIN_ROD_LENGTH {
                return Err(ParameterError::DegenerateRod { rod, length });
            }
        }
        Ok(conditions)
    }

    /// Draws an initial state from `seed`.
    ///
    /// Rod lengths, then angles from the downward vertical, then masses are
    /// drawn in that order, so a seed always yields the same bobs. Both bobs
    /// start at rest. Angle pairs that leave the rods within
    /// [`RandomConfig::min_relative_angle`] of collinear are redrawn.
    #[must_use]
    pub fn random(seed: u64, config: &RandomConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let l1 = round_hundredths(rng.gen_range(config.rod1[0]..=config.rod1[1]));
        let l2 = round_hundredths(rng.gen_range(config.rod2[0]..=config.rod2[1]));

        let min_sine = config.min_relative_angle.sin();
        let (theta1, theta2) = loop {
            let theta1: f64 = rng.gen_range(-PI..PI);
            let theta2: f64 = rng.gen_range(-PI..PI);
            if (theta2 - theta1).sin().abs() >= min_sine {
                break (theta1, theta2);
            }
        };

        let m1 = round_hundredths(rng.gen_range(config.mass[0]..=config.mass[1]));
        let m2 = round_hundredths(rng.gen_range(config.mass[0]..=config.mass[1]));

        let x1 = l1 * theta1.sin();
        let y1 = -l1 * theta1.cos();
        let x2 = x1 + l2 * theta2.sin();
        let y2 = y1 - l2 * theta2.cos();

        Self {
            pendulum1: Pendulum::at_rest(m1, x1, y1),
            pendulum2: Pendulum::at_rest(m2, x2, y2),
        }
    }

    /// Builds `count` nearby variants of these conditions.
    ///
    /// The `n`-th variant (counting from zero, so the first is unchanged)
    /// moves bob one by `(-n·amount, +n·amount)` and bob two by
    /// `(+n·amount, -n·amount)`. Velocities and masses are kept; rod lengths
    /// follow from the shifted positions.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is not finite or a shifted variant is
    /// degenerate.
    #[allow(clippy::cast_precision_loss)]
    pub fn perturbations(&self, count: usize, amount: f64) -> Result<Vec<Self>, ParameterError> {
        if !amount.is_finite() {
            return Err(ParameterError::InvalidSetting {
                name: "amount",
                reason: "must be finite",
            });
        }

        (0..count)
            .map(|n| {
                let shift = n as f64 * amount;
                let first = Pendulum {
                    x: self.pendulum1.x - shift,
                    y: self.pendulum1.y + shift,
                    ..self.pendulum1
                };
                let second = Pendulum {
                    x: self.pendulum2.x + shift,
                    y: self.pendulum2.y - shift,
                    ..self.pendulum2
                };
                Self::custom(first, second)
            })
            .collect()
    }

    #[must_use]
    pub fn pendulum1(&self) -> &Pendulum {
        &self.pendulum1
    }

    #[must_use]
    pub fn pendulum2(&self) -> &Pendulum {
        &self.pendulum2
    }

    #[must_use]
    pub fn masses(&self) -> [f64; 2] {
        [self.pendulum1.m, self.pendulum2.m]
    }

    #[must_use]
    pub fn state(&self) -> State {
        State::from_pendulums(&self.pendulum1, &self.pendulum2)
    }

    /// Rod lengths measured from the initial positions.
    #[must_use]
    pub fn rods(&self) -> Rods {
        Rods::measure(&self.state())
    }
}

/// Sampling ranges for seeded initial conditions.
///
/// Ranges are inclusive `[min, max]` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomConfig {
    rod1: [f64; 2],
    rod2: [f64; 2],
    mass: [f64; 2],
    min_relative_angle: f64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            rod1: [4.5, 6.0],
            rod2: [3.5, 7.2],
            mass: [1.0, 6.0],
            min_relative_angle: 0.05,
        }
    }
}

impl RandomConfig {
    /// Sets the ranges for both rod lengths.
    ///
    /// # Errors
    ///
    /// Returns an error if a range is empty, not finite, or starts below 0.01.
    pub fn with_rod_lengths(
        mut self,
        rod1: [f64; 2],
        rod2: [f64; 2],
    ) -> Result<Self, ParameterError> {
        self.rod1 = checked_range("rod1", rod1)?;
        self.rod2 = checked_range("rod2", rod2)?;
        Ok(self)
    }

    /// Sets the range both masses are drawn from.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty, not finite, or starts below 0.01.
    pub fn with_masses(mut self, mass: [f64; 2]) -> Result<Self, ParameterError> {
        self.mass = checked_range("mass", mass)?;
        Ok(self)
    }

    /// Sets how close to collinear the two rods may start.
    ///
    /// # Errors
    ///
    /// Returns an error unless `angle` is in `[0, π/2)`.
    pub fn with_min_relative_angle(mut self, angle: f64) -> Result<Self, ParameterError> {
        if !(0.0..FRAC_PI_2).contains(&angle) {
            return Err(ParameterError::InvalidSetting {
                name: "min_relative_angle",
                reason: "must be in [0, π/2)",
            });
        }
        self.min_relative_angle = angle;
        Ok(self)
    }

    #[must_use]
    pub fn rod1(&self) -> [f64; 2] {
        self.rod1
    }

    #[must_use]
    pub fn rod2(&self) -> [f64; 2] {
        self.rod2
    }

    #[must_use]
    pub fn mass(&self) -> [f64; 2] {
        self.mass
    }

    #[must_use]
    pub fn min_relative_angle(&self) -> f64 {
        self.min_relative_angle
    }
}

/// Returns a seed that differs between calls.
///
/// Mixes the wall clock with thread-local entropy so that two requests in the
/// same clock tick still get different seeds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fresh_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    nanos ^ rand::random::<u64>()
}

fn checked_range(name: &'static str, range: [f64; 2]) -> Result<[f64; 2], ParameterError> {
    let [min, max] = range;
    if !min.is_finite() || !max.is_finite() || min < MIN_SAMPLED_VALUE || min > max {
        return Err(ParameterError::InvalidRange { name, min, max });
    }
    Ok(range)
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn same_seed_same_bobs() {
        let config = RandomConfig::default();
        assert_eq!(
            InitialConditions::random(42, &config),
            InitialConditions::random(42, &config)
        );
        assert_ne!(
            InitialConditions::random(42, &config),
            InitialConditions::random(43, &config)
        );
    }

    #[test]
    fn random_draws_stay_in_range() {
        let config = RandomConfig::default();

        for seed in 0..200 {
            let conditions = InitialConditions::random(seed, &config);
            let rods = conditions.rods();

            assert!((4.5 - 1e-9..=6.0 + 1e-9).contains(&rods.l1), "seed {seed}");
            assert!((3.5 - 1e-9..=7.2 + 1e-9).contains(&rods.l2), "seed {seed}");
            for mass in conditions.masses() {
                assert!((1.0..=6.0).contains(&mass), "seed {seed}");
                assert_relative_eq!(mass, round_hundredths(mass));
            }

            let p1 = conditions.pendulum1();
            assert_eq!((p1.u, p1.v), (0.0, 0.0));
        }
    }

    #[test]
    fn random_rods_are_never_collinear() {
        let config = RandomConfig::default();

        for seed in 0..200 {
            let state = InitialConditions::random(seed, &config).state();
            let [l1, l2] = state.rod_lengths();
            let p1 = state.p1();
            let d = state.link();
            let sine = (p1[0] * d[1] - p1[1] * d[0]).abs() / (l1 * l2);
            assert!(sine >= 0.05_f64.sin() - 1e-9, "seed {seed}: sine {sine}");
        }
    }

    #[test]
    fn custom_rejects_degenerate_rod() {
        let result = InitialConditions::custom(
            Pendulum::at_rest(1.0, 1.0, -1.0),
            Pendulum::at_rest(1.0, 1.0, -1.0),
        );
        assert!(matches!(
            result,
            Err(ParameterError::DegenerateRod { rod: Bob::Two, .. })
        ));

        let result = InitialConditions::custom(
            Pendulum::at_rest(1.0, 0.0, 0.0),
            Pendulum::at_rest(1.0, 1.0, -1.0),
        );
        assert!(matches!(
            result,
            Err(ParameterError::DegenerateRod { rod: Bob::One, .. })
        ));
    }

    #[test]
    fn custom_rejects_zero_mass() {
        let result = InitialConditions::custom(
            Pendulum::at_rest(5.0, 1.5, -2.0),
            Pendulum::at_rest(0.0, 3.0, -4.0),
        );
        assert!(matches!(
            result,
            Err(ParameterError::NonPositiveMass {
                pendulum: Bob::Two,
                ..
            })
        ));
    }

    #[test]
    fn perturbations_shift_bobs_apart() {
        let base = InitialConditions::custom(
            Pendulum::at_rest(5.0, 1.5, -2.0),
            Pendulum::at_rest(3.0, 3.0, -4.0),
        )
        .unwrap();

        let variants = base.perturbations(3, 1e-3).unwrap();

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0], base);
        assert_relative_eq!(variants[2].pendulum1().x, 1.498, epsilon = 1e-12);
        assert_relative_eq!(variants[2].pendulum1().y, -1.998, epsilon = 1e-12);
        assert_relative_eq!(variants[2].pendulum2().x, 3.002, epsilon = 1e-12);
        assert_relative_eq!(variants[2].pendulum2().y, -4.002, epsilon = 1e-12);
        assert_eq!(variants[2].masses(), [5.0, 3.0]);
    }

    #[test]
    fn config_rejects_invalid_ranges() {
        let config = RandomConfig::default();
        assert!(config.with_masses([2.0, 1.0]).is_err());
        assert!(config.with_masses([0.0, 1.0]).is_err());
        assert!(config.with_rod_lengths([1.0, f64::INFINITY], [1.0, 2.0]).is_err());
        assert!(config.with_min_relative_angle(2.0).is_err());
        assert!(config.with_masses([2.0, 2.0]).is_ok());
    }
}
