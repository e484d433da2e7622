//! Validated physical and temporal parameters of a run

use crate::error::ConfigurationError;
use crate::physics::math::Scalar;

/// Immutable parameters of one pendulum run.
///
/// Construction through [`Parameters::new`] guarantees that every quantity is
/// finite and strictly positive and that the horizon holds at least one
/// sample, so nothing downstream re-checks them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    gravity: Scalar,
    arm_length: Scalar,
    bob_mass: Scalar,
    time_step: Scalar,
    duration: Scalar,
}

impl Parameters {
    pub const DEFAULT_GRAVITY: Scalar = 9.81;
    pub const DEFAULT_ARM_LENGTH: Scalar = 1.0;
    pub const DEFAULT_BOB_MASS: Scalar = 1.0;
    pub const DEFAULT_TIME_STEP: Scalar = 0.01;
    pub const DEFAULT_DURATION: Scalar = 10.0;

    /// Largest accepted `floor(T / dt)`; every sample is kept in memory.
    pub const MAX_STEPS: usize = 100_000_000;

    /// # Arguments
    /// * `gravity` - Gravitational acceleration `g` (m/s²)
    /// * `arm_length` - Pendulum arm length `r` (m)
    /// * `bob_mass` - Bob mass `m` (kg)
    /// * `time_step` - Fixed step `dt` (s)
    /// * `duration` - Simulated horizon `T` (s)
    pub fn new(
        gravity: Scalar,
        arm_length: Scalar,
        bob_mass: Scalar,
        time_step: Scalar,
        duration: Scalar,
    ) -> Result<Self, ConfigurationError> {
        for (parameter, value) in [
            ("gravity", gravity),
            ("arm_length", arm_length),
            ("bob_mass", bob_mass),
            ("time_step", time_step),
            ("duration", duration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::NonPositive {
                    parameter: parameter.to_string(),
                    value,
                });
            }
        }

        let ratio = (duration / time_step).floor();
        if ratio > Self::MAX_STEPS as Scalar {
            return Err(ConfigurationError::TooManySteps {
                duration,
                time_step,
                limit: Self::MAX_STEPS,
            });
        }

        let parameters = Self {
            gravity,
            arm_length,
            bob_mass,
            time_step,
            duration,
        };

        if parameters.steps() < 1 {
            return Err(ConfigurationError::TooFewSteps {
                duration,
                time_step,
            });
        }

        Ok(parameters)
    }

    pub fn gravity(&self) -> Scalar {
        self.gravity
    }

    pub fn arm_length(&self) -> Scalar {
        self.arm_length
    }

    pub fn bob_mass(&self) -> Scalar {
        self.bob_mass
    }

    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    pub fn duration(&self) -> Scalar {
        self.duration
    }

    /// Number of samples in a run, the initial one included: `floor(T / dt)`.
    pub fn steps(&self) -> usize {
        (self.duration / self.time_step).floor() as usize
    }

    /// Simulated time of sample `index`.
    pub fn time_at(&self, index: usize) -> Scalar {
        index as Scalar * self.time_step
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
            arm_length: Self::DEFAULT_ARM_LENGTH,
            bob_mass: Self::DEFAULT_BOB_MASS,
            time_step: Self::DEFAULT_TIME_STEP,
            duration: Self::DEFAULT_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let parameters = Parameters::default();
        assert_eq!(parameters.gravity(), 9.81);
        assert_eq!(parameters.arm_length(), 1.0);
        assert_eq!(parameters.bob_mass(), 1.0);
        assert_eq!(parameters.time_step(), 0.01);
        assert_eq!(parameters.duration(), 10.0);
        assert_eq!(parameters.steps(), 1000);
    }

    #[test]
    fn test_default_matches_validated_construction() {
        let parameters = Parameters::new(9.81, 1.0, 1.0, 0.01, 10.0).unwrap();
        assert_eq!(parameters, Parameters::default());
    }

    #[test]
    fn test_steps_are_floored() {
        let parameters = Parameters::new(9.81, 1.0, 1.0, 0.3, 1.0).unwrap();
        assert_eq!(parameters.steps(), 3);

        let parameters = Parameters::new(9.81, 1.0, 1.0, 0.25, 1.0).unwrap();
        assert_eq!(parameters.steps(), 4);
    }

    #[test]
    fn test_single_sample_horizon_is_valid() {
        let parameters = Parameters::new(9.81, 1.0, 1.0, 1.0, 1.5).unwrap();
        assert_eq!(parameters.steps(), 1);
    }

    #[test]
    fn test_each_non_positive_parameter_is_rejected_by_name() {
        let valid = [9.81, 1.0, 1.0, 0.01, 10.0];
        let names = ["gravity", "arm_length", "bob_mass", "time_step", "duration"];

        for (index, name) in names.iter().enumerate() {
            for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                let mut values = valid;
                values[index] = bad;
                let result =
                    Parameters::new(values[0], values[1], values[2], values[3], values[4]);

                match result {
                    Err(ConfigurationError::NonPositive { parameter, .. }) => {
                        assert_eq!(parameter, *name)
                    }
                    other => panic!("expected {name} to be rejected for {bad}, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_horizon_shorter_than_one_step_is_rejected() {
        let result = Parameters::new(9.81, 1.0, 1.0, 0.1, 0.05);
        assert!(matches!(
            result,
            Err(ConfigurationError::TooFewSteps { .. })
        ));
    }

    #[test]
    fn test_horizon_beyond_sample_limit_is_rejected() {
        let result = Parameters::new(9.81, 1.0, 1.0, 1e-300, 1e300);
        assert!(matches!(
            result,
            Err(ConfigurationError::TooManySteps { limit, .. }) if limit == Parameters::MAX_STEPS
        ));

        // One sample past the limit
        let result = Parameters::new(9.81, 1.0, 1.0, 1.0, Parameters::MAX_STEPS as f64 + 1.0);
        assert!(matches!(
            result,
            Err(ConfigurationError::TooManySteps { .. })
        ));
    }

    #[test]
    fn test_horizon_at_sample_limit_is_accepted() {
        let parameters =
            Parameters::new(9.81, 1.0, 1.0, 1.0, Parameters::MAX_STEPS as f64).unwrap();
        assert_eq!(parameters.steps(), Parameters::MAX_STEPS);
    }

    #[test]
    fn test_time_at_index() {
        let parameters = Parameters::default();
        assert_eq!(parameters.time_at(0), 0.0);
        assert_eq!(parameters.time_at(1), 0.01);
        assert!((parameters.time_at(999) - 9.99).abs() < 1e-12);
    }
}
