//! Heun's method (Improved Euler) integration
//!
//! A classical second-order predictor-corrector method that achieves improved
//! accuracy over forward Euler through slope averaging. It is not symplectic,
//! so a conservative pendulum shows a steady energy drift under it.

use super::Integrator;
use crate::physics::dynamics::AccelerationField;
use crate::physics::math::Scalar;
use crate::physics::state::State;

/// Heun's method (Improved Euler method)
///
/// # Algorithm
///
/// ```text
/// Stage 1 (slopes at the current state):
///   a1 = ω
///   w1 = f(α)
///
/// Stage 2 (slopes at the Euler-predicted state):
///   a2 = ω + dt·w1
///   w2 = f(α + dt·a1)
///
/// Final update (average):
///   α(t+dt) = α + dt·½·(a1 + a2)
///   ω(t+dt) = ω + dt·½·(w1 + w2)
/// ```
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: O(dt²) global error
/// - **Field evaluations**: 2 per timestep
/// - **Symplectic**: No, energy drifts roughly linearly in time
///
/// Also known as the modified Euler method or explicit trapezoidal rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heun;

impl Integrator for Heun {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: &mut State, field: &dyn AccelerationField, dt: Scalar) {
        let State {
            angle,
            angular_velocity,
        } = *state;

        // Stage 1: slopes at the current state
        let a1 = angular_velocity;
        let w1 = field.at(angle);

        // Stage 2: slopes at the predicted endpoint
        let a2 = angular_velocity + dt * w1;
        let w2 = field.at(angle + dt * a1);

        // Average the slopes (corrector)
        state.angle = angle + dt * 0.5 * (a1 + a2);
        state.angular_velocity = angular_velocity + dt * 0.5 * (w1 + w2);
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "improved_euler"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["heun", "e"]
    }

    fn label(&self) -> &'static str {
        "Improved Euler"
    }
}
