//! Right-hand side of the pendulum equation of motion

use crate::physics::math::{Scalar, sin};
use crate::physics::parameters::Parameters;

/// Angular acceleration as a function of angle.
///
/// Integrators only ever see this trait, so any conservative one-dimensional
/// field can be plugged in (tests use a linear spring).
pub trait AccelerationField: Send + Sync {
    /// Angular acceleration `α''` (rad/s²) at `angle`
    fn at(&self, angle: Scalar) -> Scalar;
}

/// Gravity acting on the bob: `α'' = (g/r)·sin α`.
///
/// The positive sign makes `α = 0` an unstable equilibrium and `α = π` the
/// stable one. That sign defines the modelled system and must stay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumField {
    gravity_over_length: Scalar,
}

impl PendulumField {
    pub fn new(parameters: &Parameters) -> Self {
        Self {
            gravity_over_length: parameters.gravity() / parameters.arm_length(),
        }
    }

    /// `g/r` (1/s²)
    pub fn gravity_over_length(&self) -> Scalar {
        self.gravity_over_length
    }
}

impl AccelerationField for PendulumField {
    #[inline]
    fn at(&self, angle: Scalar) -> Scalar {
        self.gravity_over_length * sin(angle)
    }
}
