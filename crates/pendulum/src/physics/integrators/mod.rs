//! Numerical integration methods for the pendulum equation of motion

use crate::physics::dynamics::AccelerationField;
use crate::physics::math::Scalar;
use crate::physics::state::State;

pub mod heun;
pub mod registry;
pub mod runge_kutta;

pub use heun::Heun;
pub use registry::IntegratorRegistry;
pub use runge_kutta::RungeKuttaFourthOrder;

/// Base trait for all integrators
///
/// Integrators are stateless single-step schemes for the first-order system
/// `α' = ω`, `ω' = field.at(α)`. Each one describes itself (name, aliases,
/// order) so the registry can discover it.
pub trait Integrator: Send + Sync {
    /// Create a boxed clone of this integrator
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance the state by one time step
    ///
    /// # Arguments
    /// * `state` - Angle and angular velocity, overwritten with the next state
    /// * `field` - Angular acceleration as a function of angle
    /// * `dt` - Time step
    fn step(&self, state: &mut State, field: &dyn AccelerationField, dt: Scalar);

    /// Order of the global truncation error
    fn convergence_order(&self) -> usize;

    /// Canonical name used for lookup
    fn name(&self) -> &'static str;

    /// Alternative lookup names
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Human-readable title for reports
    fn label(&self) -> &'static str {
        self.name()
    }
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl core::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Integrator")
            .field("name", &self.name())
            .field("convergence_order", &self.convergence_order())
            .finish()
    }
}
