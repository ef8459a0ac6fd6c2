use crate::Pendulum;

/// The state vector `(x1, y1, x2, y2, u1, v1, u2, v2)`.
///
/// Positions come first, then velocities, bob one before bob two. States are
/// values: integrators produce a new state each step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub u1: f64,
    pub v1: f64,
    pub u2: f64,
    pub v2: f64,
}

impl State {
    /// Number of scalar components.
    pub const LEN: usize = 8;

    /// Builds a state from the position and velocity of each bob.
    #[must_use]
    pub fn from_pendulums(first: &Pendulum, second: &Pendulum) -> Self {
        Self {
            x1: first.x,
            y1: first.y,
            x2: second.x,
            y2: second.y,
            u1: first.u,
            v1: first.v,
            u2: second.u,
            v2: second.v,
        }
    }

    #[must_use]
    pub fn from_array(values: [f64; Self::LEN]) -> Self {
        let [x1, y1, x2, y2, u1, v1, u2, v2] = values;
        Self {
            x1,
            y1,
            x2,
            y2,
            u1,
            v1,
            u2,
            v2,
        }
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.x1, self.y1, self.x2, self.y2, self.u1, self.v1, self.u2, self.v2,
        ]
    }

    /// Position of bob one relative to the pivot.
    #[must_use]
    pub fn p1(&self) -> [f64; 2] {
        [self.x1, self.y1]
    }

    /// Position of bob two relative to bob one.
    #[must_use]
    pub fn link(&self) -> [f64; 2] {
        [self.x2 - self.x1, self.y2 - self.y1]
    }

    /// Velocity of bob one.
    #[must_use]
    pub fn w1(&self) -> [f64; 2] {
        [self.u1, self.v1]
    }

    /// Velocity of bob two relative to bob one.
    #[must_use]
    pub fn link_velocity(&self) -> [f64; 2] {
        [self.u2 - self.u1, self.v2 - self.v1]
    }

    /// Current lengths of the two rods.
    #[must_use]
    pub fn rod_lengths(&self) -> [f64; 2] {
        [norm(self.p1()), norm(self.link())]
    }
}

pub(crate) fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

pub(crate) fn norm(a: [f64; 2]) -> f64 {
    a[0].hypot(a[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_layout_is_positions_then_velocities() {
        let first = Pendulum::new(1.0, 1.0, 2.0, 5.0, 6.0);
        let second = Pendulum::new(1.0, 3.0, 4.0, 7.0, 8.0);

        let state = State::from_pendulums(&first, &second);

        assert_eq!(
            state.to_array(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
        assert_eq!(State::from_array(state.to_array()), state);
    }

    #[test]
    fn rod_lengths_are_relative() {
        let state = State {
            x1: 3.0,
            y1: -4.0,
            x2: 3.0,
            y2: -6.0,
            ..State::default()
        };

        assert_eq!(state.rod_lengths(), [5.0, 2.0]);
    }
}
