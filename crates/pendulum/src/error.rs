//! Error types shared by the library and the command line

use std::path::PathBuf;
use thiserror::Error;

/// Rejected before any integration starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{parameter} must be a finite positive number, got {value}")]
    NonPositive { parameter: String, value: f64 },

    #[error(
        "duration {duration} s is shorter than one time step of {time_step} s; at least one sample is required"
    )]
    TooFewSteps { duration: f64, time_step: f64 },

    #[error(
        "duration {duration} s with a time step of {time_step} s needs more than {limit} samples"
    )]
    TooManySteps {
        duration: f64,
        time_step: f64,
        limit: usize,
    },

    #[error("initial {parameter} must be finite, got {value}")]
    NonFiniteInitialState { parameter: &'static str, value: f64 },

    #[error("Unknown integrator: '{name}'. Available integrators: {available}. Aliases: {aliases}")]
    UnknownIntegrator {
        name: String,
        available: String,
        aliases: String,
    },

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to read configuration from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write configuration to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded
    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    /// Invalid integrator name provided
    #[error("Invalid integrator: {0}")]
    InvalidIntegrator(#[source] ConfigurationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_message_names_parameter() {
        let error = ConfigurationError::NonPositive {
            parameter: "time_step".into(),
            value: -0.5,
        };
        let message = error.to_string();
        assert!(message.contains("time_step"));
        assert!(message.contains("-0.5"));
    }

    #[test]
    fn test_unknown_integrator_message_lists_choices() {
        let error = ConfigurationError::UnknownIntegrator {
            name: "leapfrog".into(),
            available: "improved_euler, rk4".into(),
            aliases: "e, r".into(),
        };
        let message = error.to_string();
        assert!(message.contains("Unknown integrator: 'leapfrog'"));
        assert!(message.contains("Available integrators: improved_euler, rk4"));
        assert!(message.contains("Aliases: e, r"));
    }

    #[test]
    fn test_cli_error_wraps_configuration_error() {
        let error: CliError = ConfigurationError::TooFewSteps {
            duration: 0.001,
            time_step: 0.01,
        }
        .into();
        assert!(matches!(
            error,
            CliError::Configuration(ConfigurationError::TooFewSteps { .. })
        ));
        assert!(error.to_string().contains("at least one sample"));
    }
}
