use crate::error::ConfigurationError;
use crate::physics::math::{Scalar, degrees_to_radians};

/// Instantaneous pendulum state.
///
/// The angle is measured from the downward vertical and is never wrapped, so
/// a bob that swings over the top keeps accumulating angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    /// Angular displacement `α` (rad)
    pub angle: Scalar,
    /// Angular velocity `ω` (rad/s)
    pub angular_velocity: Scalar,
}

impl State {
    pub const fn new(angle: Scalar, angular_velocity: Scalar) -> Self {
        Self {
            angle,
            angular_velocity,
        }
    }

    pub fn from_degrees(angle_degrees: Scalar, angular_velocity: Scalar) -> Self {
        Self::new(degrees_to_radians(angle_degrees), angular_velocity)
    }

    /// Released from rest at 45°.
    pub fn reference() -> Self {
        Self::new(core::f64::consts::FRAC_PI_4, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.angular_velocity.is_finite()
    }

    /// Checks that the state can seed a run.
    pub fn validated(self) -> Result<Self, ConfigurationError> {
        if !self.angle.is_finite() {
            return Err(ConfigurationError::NonFiniteInitialState {
                parameter: "angle",
                value: self.angle,
            });
        }
        if !self.angular_velocity.is_finite() {
            return Err(ConfigurationError::NonFiniteInitialState {
                parameter: "angular_velocity",
                value: self.angular_velocity,
            });
        }
        Ok(self)
    }
}

/// Initial conditions share the state layout.
pub type InitialState = State;
