//! User-facing configuration
//!
//! Configuration is stored as TOML. Every section falls back to its defaults
//! field by field, so a file only needs the values it changes. Validation
//! turns the loose configuration into the strongly typed [`Parameters`] and
//! initial [`State`] consumed by the simulation.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use pendulum_macros::ConfigDefaults;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigurationError;
use crate::physics::math::Scalar;
use crate::physics::parameters::Parameters;
use crate::physics::state::State;

/// Prefix for environment overrides, e.g. `PENDULUM_PHYSICS__GRAVITY=1.62`
pub const ENV_PREFIX: &str = "PENDULUM";

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    #[default(PhysicsConfig::default())]
    pub physics: PhysicsConfig,

    #[default(TimeConfig::default())]
    pub time: TimeConfig,

    #[default(InitialConfig::default())]
    pub initial: InitialConfig,

    #[default(IntegratorConfig::default())]
    pub integrator: IntegratorConfig,

    #[default(ReportConfig::default())]
    pub report: ReportConfig,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration (m/s²)
    #[default(Parameters::DEFAULT_GRAVITY)]
    #[positive]
    pub gravity: Scalar,

    /// Length of the pendulum arm (m)
    #[default(Parameters::DEFAULT_ARM_LENGTH)]
    #[positive]
    pub arm_length: Scalar,

    /// Mass of the bob (kg)
    #[default(Parameters::DEFAULT_BOB_MASS)]
    #[positive]
    pub bob_mass: Scalar,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimeConfig {
    /// Fixed integration step (s)
    #[default(Parameters::DEFAULT_TIME_STEP)]
    #[positive]
    pub time_step: Scalar,

    /// Simulated horizon (s)
    #[default(Parameters::DEFAULT_DURATION)]
    #[positive]
    pub duration: Scalar,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InitialConfig {
    /// Release angle from the downward vertical, in degrees
    #[default(45.0)]
    pub angle_degrees: Scalar,

    /// Initial angular velocity (rad/s)
    #[default(0.0)]
    pub angular_velocity: Scalar,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Registry name or alias of the integrator
    #[default("rk4")]
    pub integrator_type: String,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Print every n-th sample in the energy table
    #[default(100)]
    pub sample_every: usize,
}

impl SimulationConfig {
    /// Load configuration from a file, failing if it cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a file, falling back to defaults if the file
    /// is missing or cannot be parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigurationError::Read { .. }) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pendulum").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Defaults, overlaid by the user configuration file, overlaid by
    /// `PENDULUM_*` environment variables. Errors fall back to defaults.
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();
        if let Some(path) = &path {
            info!("Looking for user configuration at {}", path.display());
        }

        Self::load_layered(path.as_deref()).unwrap_or_else(|e| {
            warn!("Failed to load layered configuration: {e}. Using defaults.");
            Self::default()
        })
    }

    /// Build a configuration from defaults, an optional TOML file and the
    /// environment, later sources taking precedence.
    pub fn load_layered(file: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = file {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigurationError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|source| ConfigurationError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value and produce the run's parameters and initial state.
    pub fn validate(&self) -> Result<(Parameters, State), ConfigurationError> {
        let violation = self
            .physics
            .first_non_positive()
            .map(|(name, value)| (format!("physics.{name}"), value))
            .or_else(|| {
                self.time
                    .first_non_positive()
                    .map(|(name, value)| (format!("time.{name}"), value))
            });

        if let Some((parameter, value)) = violation {
            return Err(ConfigurationError::NonPositive { parameter, value });
        }

        let parameters = Parameters::new(
            self.physics.gravity,
            self.physics.arm_length,
            self.physics.bob_mass,
            self.time.time_step,
            self.time.duration,
        )?;

        let initial =
            State::from_degrees(self.initial.angle_degrees, self.initial.angular_velocity)
                .validated()?;

        Ok((parameters, initial))
    }
}
