use pendulum_solvers::transient::Sample;
use serde::{Deserialize, Serialize};

use crate::{Accelerations, MethodName, Pendulum, State};

/// The output of one successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub simulation: SimulationEcho,
    pub parameters: ParametersEcho,
    pub trajectory: Trajectory,
}

/// How the initial state was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Random,
    Custom,
}

/// The initial bobs a run actually used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationEcho {
    #[serde(rename = "type")]
    pub mode: Mode,
    pub pendulum1: Pendulum,
    pub pendulum2: Pendulum,

    /// The seed a random run drew from, so it can be replayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// The run parameters as resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParametersEcho {
    pub duration: f64,
    pub step_size: f64,
    pub method: MethodName,
    pub num_points: usize,
}

/// One sample of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub u1: f64,
    pub v1: f64,
    pub u2: f64,
    pub v2: f64,
}

impl TrajectoryPoint {
    #[must_use]
    pub fn new(time: f64, state: &State) -> Self {
        let State {
            x1,
            y1,
            x2,
            y2,
            u1,
            v1,
            u2,
            v2,
        } = *state;
        Self {
            time,
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
    pub fn state(&self) -> State {
        State {
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            u1: self.u1,
            v1: self.v1,
            u2: self.u2,
            v2: self.v2,
        }
    }
}

/// Time-ordered samples, starting at `t = 0` with the initial state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<TrajectoryPoint>);

impl Trajectory {
    pub(crate) fn from_history(history: &[Sample<State, Accelerations>]) -> Self {
        Self(
            history
                .iter()
                .map(|sample| TrajectoryPoint::new(sample.time, &sample.snapshot.input))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.0.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.0.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.0.last()
    }

    #[must_use]
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.0
    }

    /// Returns `[x1, y1, x2, y2]` for each sample.
    #[must_use]
    pub fn positions(&self) -> Vec<[f64; 4]> {
        self.0
            .iter()
            .map(|point| [point.x1, point.y1, point.x2, point.y2])
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn point(time: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            x1: 1.0,
            y1: -1.0,
            x2: 2.0,
            y2: -2.0,
            u1: 0.5,
            v1: 0.0,
            u2: 0.0,
            v2: 0.5,
        }
    }

    #[test]
    fn trajectory_serializes_as_array() {
        let trajectory = Trajectory(vec![point(0.0), point(0.1)]);

        let value = serde_json::to_value(&trajectory).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["time"], json!(0.1));
        assert_eq!(value[0]["x2"], json!(2.0));
    }

    #[test]
    fn positions_drop_velocities() {
        let trajectory = Trajectory(vec![point(0.0)]);
        assert_eq!(trajectory.positions(), vec![[1.0, -1.0, 2.0, -2.0]]);
    }

    #[test]
    fn echo_uses_type_key_and_omits_missing_seed() {
        let echo = SimulationEcho {
            mode: Mode::Custom,
            pendulum1: Pendulum::at_rest(1.0, 0.0, -1.0),
            pendulum2: Pendulum::at_rest(1.0, 0.0, -2.0),
            seed: None,
        };

        let value = serde_json::to_value(echo).unwrap();

        assert_eq!(value["type"], json!("custom"));
        assert!(value.get("seed").is_none());
        assert_eq!(value["pendulum2"]["y"], json!(-2.0));
    }

    #[test]
    fn point_round_trips_state() {
        let p = point(0.3);
        assert_eq!(TrajectoryPoint::new(0.3, &p.state()), p);
    }
}
