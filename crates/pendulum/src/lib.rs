//! Pendulum library
//!
//! Fixed-step simulation of a simple pendulum with interchangeable
//! integrators, plus the energy bookkeeping used to compare them.

pub mod cli;
pub mod config;
pub mod error;
pub mod physics;
pub mod prelude;
pub mod report;
pub mod simulation;

// Re-export commonly used items
pub use config::SimulationConfig;
pub use error::{CliError, ConfigurationError};
pub use physics::{
    energy::{Energy, compute_energy},
    integrators,
    math::Scalar,
    parameters::Parameters,
    state::{InitialState, State},
};
pub use simulation::{Method, Sample, Simulation, TimeSeries, run, run_method};
