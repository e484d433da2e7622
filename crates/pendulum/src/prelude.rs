pub use crate::config::SimulationConfig;
pub use crate::error::ConfigurationError;
pub use crate::physics::dynamics::{AccelerationField, PendulumField};
pub use crate::physics::energy::{Energy, compute_energy, energy_of, motion_invariant};
pub use crate::physics::integrators::{
    Heun, Integrator, IntegratorRegistry, RungeKuttaFourthOrder,
};
pub use crate::physics::math::Scalar;
pub use crate::physics::parameters::Parameters;
pub use crate::physics::state::State;
pub use crate::simulation::{Method, Sample, Simulation, TimeSeries, run, run_method};
