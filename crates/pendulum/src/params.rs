use std::{fmt, str::FromStr};

use pendulum_solvers::transient::Method;
use serde::{Deserialize, Serialize};

use crate::{Horizon, ParameterError, Pendulum, dopri5};

/// The four integrators a run can use, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodName {
    Euler,
    ExplicitMidpoint,
    #[default]
    #[serde(rename = "RK4")]
    Rk4,
    #[serde(rename = "DOPRI5")]
    Dopri5,
}

impl MethodName {
    pub const ALL: [Self; 4] = [Self::Euler, Self::ExplicitMidpoint, Self::Rk4, Self::Dopri5];

    /// Returns the name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::ExplicitMidpoint => "ExplicitMidpoint",
            Self::Rk4 => "RK4",
            Self::Dopri5 => "DOPRI5",
        }
    }

    /// Resolves the solver method, using `config` for adaptive stepping.
    #[must_use]
    pub fn to_method(self, config: dopri5::Config) -> Method {
        match self {
            Self::Euler => Method::Euler,
            Self::ExplicitMidpoint => Method::ExplicitMidpoint,
            Self::Rk4 => Method::Rk4,
            Self::Dopri5 => Method::Dopri5(config),
        }
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodName {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ParameterError::UnknownMethod(s.to_owned()))
    }
}

/// Where the initial state of a run comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialSource {
    /// Drawn from a seed. Without one, a fresh seed is chosen per run.
    Random { seed: Option<u64> },

    /// Given explicitly.
    Custom {
        pendulum1: Pendulum,
        pendulum2: Pendulum,
    },
}

/// Everything needed to run one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub duration: f64,
    pub step_size: f64,
    pub method: MethodName,
    pub initial: InitialSource,
}

impl SimulationParameters {
    #[must_use]
    pub fn random(duration: f64, step_size: f64, seed: Option<u64>, method: MethodName) -> Self {
        Self {
            duration,
            step_size,
            method,
            initial: InitialSource::Random { seed },
        }
    }

    #[must_use]
    pub fn custom(
        pendulum1: Pendulum,
        pendulum2: Pendulum,
        duration: f64,
        step_size: f64,
        method: MethodName,
    ) -> Self {
        Self {
            duration,
            step_size,
            method,
            initial: InitialSource::Custom {
                pendulum1,
                pendulum2,
            },
        }
    }

    /// Returns the validated time horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` or `step_size` is not finite and
    /// positive, or if `step_size` exceeds `duration`.
    pub fn horizon(&self) -> Result<Horizon, ParameterError> {
        Ok(Horizon::new(self.duration, self.step_size)?)
    }
}

/// A request as it arrives at the service boundary.
///
/// Method names stay strings here so an unknown name surfaces as
/// [`ParameterError::UnknownMethod`] rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Request {
    Random {
        duration: f64,
        step_size: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
    },
    Custom {
        pendulum1: Pendulum,
        pendulum2: Pendulum,
        duration: f64,
        step_size: f64,
        method: String,
    },
}

impl TryFrom<Request> for SimulationParameters {
    type Error = ParameterError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        match request {
            Request::Random {
                duration,
                step_size,
                seed,
                method,
            } => {
                let method = method
                    .as_deref()
                    .map_or(Ok(MethodName::default()), str::parse::<MethodName>)?;
                Ok(Self::random(duration, step_size, seed, method))
            }
            Request::Custom {
                pendulum1,
                pendulum2,
                duration,
                step_size,
                method,
            } => Ok(Self::custom(
                pendulum1,
                pendulum2,
                duration,
                step_size,
                method.parse()?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_round_trip_through_strings() {
        for method in MethodName::ALL {
            assert_eq!(method.to_string().parse::<MethodName>(), Ok(method));
        }
    }

    #[test]
    fn method_names_are_case_sensitive() {
        assert_eq!(
            "rk4".parse::<MethodName>(),
            Err(ParameterError::UnknownMethod("rk4".into()))
        );
        assert!("Bogus".parse::<MethodName>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&MethodName::Rk4).unwrap(), r#""RK4""#);
        let method: MethodName = serde_json::from_str(r#""DOPRI5""#).unwrap();
        assert_eq!(method, MethodName::Dopri5);
    }

    #[test]
    fn random_request_defaults_to_rk4() {
        let request: Request =
            serde_json::from_str(r#"{"mode": "random", "duration": 2, "step_size": 0.01}"#)
                .unwrap();

        let params = SimulationParameters::try_from(request).unwrap();

        assert_eq!(params.method, MethodName::Rk4);
        assert_eq!(params.initial, InitialSource::Random { seed: None });
    }

    #[test]
    fn custom_request_with_unknown_method_is_rejected() {
        let request: Request = serde_json::from_str(
            r#"{
                "mode": "custom",
                "pendulum1": {"m": 5, "x": 1.5, "y": -2, "u": 0, "v": 0},
                "pendulum2": {"m": 3, "x": 3.0, "y": -4, "u": 0, "v": 0},
                "duration": 3,
                "step_size": 0.1,
                "method": "Bogus"
            }"#,
        )
        .unwrap();

        assert_eq!(
            SimulationParameters::try_from(request),
            Err(ParameterError::UnknownMethod("Bogus".into()))
        );
    }

    #[test]
    fn horizon_maps_errors() {
        let params = SimulationParameters::random(0.0, 0.1, Some(1), MethodName::Euler);
        assert_eq!(params.horizon(), Err(ParameterError::NonPositiveDuration(0.0)));

        let params = SimulationParameters::random(1.0, 2.0, Some(1), MethodName::Euler);
        assert_eq!(
            params.horizon(),
            Err(ParameterError::StepExceedsDuration {
                step_size: 2.0,
                duration: 1.0
            })
        );
    }
}
