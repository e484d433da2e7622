//! Fixed-step batch integration of one pendulum run
//!
//! The driver seeds sample 0 from the initial state, then produces each
//! sample strictly from its predecessor with the selected integrator,
//! evaluating the energy model immediately after every step. The integrator
//! is chosen once per run.

use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::ConfigurationError;
use crate::physics::dynamics::PendulumField;
use crate::physics::energy::{Energy, energy_of, motion_invariant};
use crate::physics::integrators::{Heun, Integrator, IntegratorRegistry, RungeKuttaFourthOrder};
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::State;

/// One record of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Simulated time `index · dt` (s)
    pub time: Scalar,
    pub state: State,
    pub energy: Energy,
}

impl Sample {
    fn is_finite(&self) -> bool {
        self.state.is_finite() && self.energy.is_finite()
    }
}

/// Completed output of a run, `steps` samples long.
///
/// Samples are only ever appended by [`run`]; once returned the series is
/// read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    integrator: &'static str,
    label: &'static str,
    parameters: Parameters,
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Canonical name of the integrator that produced the series
    pub fn integrator(&self) -> &'static str {
        self.integrator
    }

    /// Display title of the integrator, e.g. "RK4"
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Sample 0, the initial state.
    pub fn initial(&self) -> &Sample {
        // Validated parameters guarantee at least one sample
        &self.samples[0]
    }

    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    pub fn times(&self) -> Vec<Scalar> {
        self.column(|sample| sample.time)
    }

    pub fn angles(&self) -> Vec<Scalar> {
        self.column(|sample| sample.state.angle)
    }

    pub fn angular_velocities(&self) -> Vec<Scalar> {
        self.column(|sample| sample.state.angular_velocity)
    }

    pub fn potential_energies(&self) -> Vec<Scalar> {
        self.column(|sample| sample.energy.potential)
    }

    pub fn kinetic_energies(&self) -> Vec<Scalar> {
        self.column(|sample| sample.energy.kinetic)
    }

    pub fn total_energies(&self) -> Vec<Scalar> {
        self.column(|sample| sample.energy.total)
    }

    fn column(&self, value: impl Fn(&Sample) -> Scalar) -> Vec<Scalar> {
        self.samples.iter().map(value).collect()
    }

    /// Index of the first sample carrying a non-finite value, if the run
    /// diverged.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.samples.iter().position(|sample| !sample.is_finite())
    }

    /// `E_last − E_0` (J)
    pub fn energy_drift(&self) -> Scalar {
        self.last().energy.total - self.initial().energy.total
    }

    /// Largest `|E_i − E_0|` over the run (J)
    pub fn peak_energy_deviation(&self) -> Scalar {
        let initial = self.initial().energy.total;
        self.samples
            .iter()
            .map(|sample| (sample.energy.total - initial).abs())
            .fold(0.0, Scalar::max)
    }

    /// `H_last − H_0` for the first integral of the modelled motion, see
    /// [`motion_invariant`].
    pub fn invariant_drift(&self) -> Scalar {
        motion_invariant(&self.parameters, self.last().state)
            - motion_invariant(&self.parameters, self.initial().state)
    }
}

/// Integrate one run.
///
/// Divergence is not an error: non-finite values are carried forward and
/// reported through [`TimeSeries::first_non_finite`].
pub fn run(parameters: &Parameters, initial: State, integrator: &dyn Integrator) -> TimeSeries {
    let field = PendulumField::new(parameters);
    let dt = parameters.time_step();
    let steps = parameters.steps();

    debug!(
        integrator = integrator.name(),
        steps,
        dt,
        angle = initial.angle,
        angular_velocity = initial.angular_velocity,
        "Starting run"
    );

    let mut samples = Vec::with_capacity(steps);
    let mut state = initial;
    samples.push(Sample {
        time: 0.0,
        state,
        energy: energy_of(parameters, state),
    });

    for index in 1..steps {
        integrator.step(&mut state, &field, dt);
        samples.push(Sample {
            time: parameters.time_at(index),
            state,
            energy: energy_of(parameters, state),
        });
    }

    let series = TimeSeries {
        integrator: integrator.name(),
        label: integrator.label(),
        parameters: *parameters,
        samples,
    };

    if let Some(index) = series.first_non_finite() {
        warn!(
            integrator = integrator.name(),
            index,
            time = parameters.time_at(index),
            "Run diverged; samples are non-finite from this index on"
        );
    }

    series
}

/// The built-in schemes as a closed set, for callers that do not need the
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    ImprovedEuler,
    Rk4,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::ImprovedEuler, Method::Rk4];

    pub fn integrator(self) -> Box<dyn Integrator> {
        match self {
            Method::ImprovedEuler => Box::new(Heun),
            Method::Rk4 => Box::new(RungeKuttaFourthOrder),
        }
    }
}

pub fn run_method(parameters: &Parameters, initial: State, method: Method) -> TimeSeries {
    run(parameters, initial, method.integrator().as_ref())
}

/// A validated run, ready to execute.
#[derive(Debug, Clone)]
pub struct Simulation {
    parameters: Parameters,
    initial: State,
    integrator: Box<dyn Integrator>,
}

impl Simulation {
    pub fn new(
        parameters: Parameters,
        initial: State,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            parameters,
            initial: initial.validated()?,
            integrator,
        })
    }

    /// Validate `config` and resolve its integrator through `registry`.
    pub fn from_config(
        config: &SimulationConfig,
        registry: &IntegratorRegistry,
    ) -> Result<Self, ConfigurationError> {
        let (parameters, initial) = config.validate()?;
        let integrator = registry.create(&config.integrator.integrator_type)?;
        Self::new(parameters, initial, integrator)
    }

    /// Same parameters and initial state, different scheme.
    pub fn with_integrator(&self, integrator: Box<dyn Integrator>) -> Self {
        Self {
            parameters: self.parameters,
            initial: self.initial,
            integrator,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn initial(&self) -> State {
        self.initial
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn run(&self) -> TimeSeries {
        info!(
            integrator = self.integrator.name(),
            steps = self.parameters.steps(),
            "Running simulation"
        );
        let series = run(&self.parameters, self.initial, self.integrator.as_ref());
        info!(
            integrator = self.integrator.name(),
            energy_drift = series.energy_drift(),
            "Simulation finished"
        );
        series
    }
}
