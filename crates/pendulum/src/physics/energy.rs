//! Mechanical energy bookkeeping
//!
//! Energies serve as the accuracy diagnostic for the integrators. Potential
//! energy is measured from the lowest point of the swing, so a bob hanging at
//! rest has zero energy of either kind.

use crate::physics::math::{Scalar, cos};
use crate::physics::parameters::Parameters;
use crate::physics::state::State;

/// Energy decomposition of one state (J).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Energy {
    pub potential: Scalar,
    pub kinetic: Scalar,
    /// Always exactly `potential + kinetic`
    pub total: Scalar,
}

impl Energy {
    pub fn is_finite(&self) -> bool {
        self.potential.is_finite() && self.kinetic.is_finite() && self.total.is_finite()
    }
}

/// Potential, kinetic and total energy of the bob.
///
/// ```text
/// Ep = m·g·r·(1 − cos α)
/// Ek = ½·m·(r·ω)²
/// E  = Ep + Ek
/// ```
pub fn compute_energy(parameters: &Parameters, angle: Scalar, angular_velocity: Scalar) -> Energy {
    let m = parameters.bob_mass();
    let g = parameters.gravity();
    let r = parameters.arm_length();

    let potential = m * g * r * (1.0 - cos(angle));
    let tangential_speed = r * angular_velocity;
    let kinetic = 0.5 * m * (tangential_speed * tangential_speed);

    Energy {
        potential,
        kinetic,
        total: potential + kinetic,
    }
}

pub fn energy_of(parameters: &Parameters, state: State) -> Energy {
    compute_energy(parameters, state.angle, state.angular_velocity)
}

/// First integral of the modelled equation of motion `α'' = (g/r)·sin α`:
///
/// ```text
/// H = ½·m·r²·ω² + m·g·r·cos α
/// ```
///
/// The exact solution keeps `H` constant, which makes its drift a cleaner
/// measure of integrator error than the drift of [`Energy::total`].
pub fn motion_invariant(parameters: &Parameters, state: State) -> Scalar {
    let m = parameters.bob_mass();
    let g = parameters.gravity();
    let r = parameters.arm_length();
    let tangential_speed = r * state.angular_velocity;

    0.5 * m * (tangential_speed * tangential_speed) + m * g * r * cos(state.angle)
}
