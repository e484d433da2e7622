//! Command line interface for pendulum

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{IntegratorConfig, SimulationConfig};
use crate::error::CliError;
use crate::physics::integrators::IntegratorRegistry;
use crate::report::{Comparison, DriftSummary, EnergyTable};
use crate::simulation::Simulation;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Pendulum - compare the energy behavior of Heun and RK4 integrators
#[derive(Parser, Debug, Default)]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Integrator name or alias (e.g., improved_euler, heun, e, rk4, r)
    #[arg(short, long, value_name = "NAME")]
    pub method: Option<String>,

    /// Run every available integrator and compare their energy drift
    #[arg(long, conflicts_with = "method")]
    pub compare: bool,

    /// Gravitational acceleration in m/s² (overrides config file)
    #[arg(short, long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Arm length in m (overrides config file)
    #[arg(short = 'r', long, value_name = "METERS")]
    pub length: Option<f64>,

    /// Bob mass in kg (overrides config file)
    #[arg(long, value_name = "KG")]
    pub mass: Option<f64>,

    /// Time step in s (overrides config file)
    #[arg(long, value_name = "SECONDS")]
    pub dt: Option<f64>,

    /// Simulated duration in s (overrides config file)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Initial angle in degrees from the downward vertical
    #[arg(short, long, value_name = "DEGREES", allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Initial angular velocity in rad/s
    #[arg(short = 'w', long, value_name = "RAD_PER_S", allow_negative_numbers = true)]
    pub omega: Option<f64>,

    /// Print every N-th sample of the energy table
    #[arg(long, value_name = "N")]
    pub sample_every: Option<usize>,

    /// Print only the drift summary, no table
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Install the global tracing subscriber; `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second initialisation (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Renders the --list-integrators output
pub fn list_integrators(registry: &IntegratorRegistry) -> String {
    let mut out = String::from("Available integrators:\n");
    for integrator in registry.all() {
        out.push_str(&format!(
            "  - {} ({}, order {})\n",
            integrator.name(),
            integrator.label(),
            integrator.convergence_order()
        ));
    }

    let aliases = registry.list_aliases();
    if !aliases.is_empty() {
        out.push_str("\nAliases:\n");
        for (alias, target) in aliases {
            out.push_str(&format!("  - {alias} -> {target}\n"));
        }
    }

    out
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(
    args: &Args,
    registry: &IntegratorRegistry,
) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        SimulationConfig::load(config_path).map_err(|e| CliError::ConfigLoad(e.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(gravity) = args.gravity {
        info!("Overriding gravitational acceleration to: {gravity}");
        config.physics.gravity = gravity;
    }

    if let Some(length) = args.length {
        info!("Overriding arm length to: {length}");
        config.physics.arm_length = length;
    }

    if let Some(mass) = args.mass {
        info!("Overriding bob mass to: {mass}");
        config.physics.bob_mass = mass;
    }

    if let Some(dt) = args.dt {
        info!("Overriding time step to: {dt}");
        config.time.time_step = dt;
    }

    if let Some(duration) = args.duration {
        info!("Overriding duration to: {duration}");
        config.time.duration = duration;
    }

    if let Some(angle) = args.angle {
        info!("Overriding initial angle to: {angle}°");
        config.initial.angle_degrees = angle;
    }

    if let Some(omega) = args.omega {
        info!("Overriding initial angular velocity to: {omega}");
        config.initial.angular_velocity = omega;
    }

    if let Some(sample_every) = args.sample_every {
        config.report.sample_every = sample_every;
    }

    if let Some(method) = &args.method {
        // Validate integrator name against registry
        let integrator = registry
            .create(method)
            .map_err(CliError::InvalidIntegrator)?;

        info!("Using integrator: {}", integrator.name());
        config.integrator = IntegratorConfig {
            integrator_type: integrator.name().to_string(),
        };
    }

    Ok(config)
}

/// Runs the simulation(s) selected by `args` and renders the report.
pub fn execute(
    args: &Args,
    config: &SimulationConfig,
    registry: &IntegratorRegistry,
) -> Result<String, CliError> {
    let simulation = Simulation::from_config(config, registry)?;
    let mut out = String::new();

    if args.compare {
        let summaries = registry
            .all()
            .into_iter()
            .map(|integrator| {
                let series = simulation.with_integrator(integrator).run();
                if !args.quiet {
                    let table = EnergyTable::new(&series, config.report.sample_every);
                    out.push_str(&table.to_string());
                    out.push('\n');
                }
                DriftSummary::from_series(&series)
            })
            .collect();

        out.push_str(&Comparison(DriftSummary::ranked(summaries)).to_string());
    } else {
        let series = simulation.run();
        if !args.quiet {
            out.push_str(&EnergyTable::new(&series, config.report.sample_every).to_string());
            out.push('\n');
        }
        out.push_str(&DriftSummary::from_series(&series).to_string());
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(arguments: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pendulum").chain(arguments.iter().copied())).unwrap()
    }

    fn defaults_file() -> PathBuf {
        let path = std::env::temp_dir().join(format!("pendulum-cli-{}.toml", std::process::id()));
        SimulationConfig::default().save(&path).unwrap();
        path
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_are_applied() {
        let path = defaults_file();
        let path_arg = path.to_string_lossy().to_string();
        let args = parse(&[
            "--config", &path_arg, "-g", "1.62", "-r", "2.0", "--mass", "3.0", "--dt", "0.005",
            "-t", "4.0", "-a", "-30", "-w", "0.5", "--sample-every", "7", "-m", "e",
        ]);

        let config = load_and_apply_config(&args, &IntegratorRegistry::default()).unwrap();
        assert_eq!(config.physics.gravity, 1.62);
        assert_eq!(config.physics.arm_length, 2.0);
        assert_eq!(config.physics.bob_mass, 3.0);
        assert_eq!(config.time.time_step, 0.005);
        assert_eq!(config.time.duration, 4.0);
        assert_eq!(config.initial.angle_degrees, -30.0);
        assert_eq!(config.initial.angular_velocity, 0.5);
        assert_eq!(config.report.sample_every, 7);
        // Aliases are stored under the canonical name
        assert_eq!(config.integrator.integrator_type, "improved_euler");
    }

    #[test]
    fn test_invalid_method_is_rejected() {
        let path = defaults_file();
        let path_arg = path.to_string_lossy().to_string();
        let args = parse(&["--config", &path_arg, "-m", "x"]);

        let result = load_and_apply_config(&args, &IntegratorRegistry::default());
        match result {
            Err(error @ CliError::InvalidIntegrator(_)) => {
                assert!(error.to_string().contains("Unknown integrator: 'x'"));
            }
            other => panic!("expected InvalidIntegrator, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = parse(&["--config", "/nonexistent/pendulum/config.toml"]);
        let result = load_and_apply_config(&args, &IntegratorRegistry::default());
        assert!(matches!(result, Err(CliError::ConfigLoad(_))));
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "pendulum-cli-broken-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[physics\ngravity = ").unwrap();
        let path_arg = path.to_string_lossy().to_string();
        let args = parse(&["--config", &path_arg]);

        let result = load_and_apply_config(&args, &IntegratorRegistry::default());
        std::fs::remove_file(&path).unwrap();
        match result {
            Err(error @ CliError::ConfigLoad(_)) => {
                assert!(error.to_string().contains("failed to parse configuration"));
            }
            other => panic!("expected ConfigLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_compare_conflicts_with_method() {
        let result = Args::try_parse_from(["pendulum", "--compare", "-m", "rk4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_integrators_output() {
        let text = list_integrators(&IntegratorRegistry::default());
        assert!(text.contains("improved_euler (Improved Euler, order 2)"));
        assert!(text.contains("rk4 (RK4, order 4)"));
        assert!(text.contains("e -> improved_euler"));
        assert!(text.contains("r -> rk4"));
    }

    #[test]
    fn test_execute_single_run() {
        let mut config = SimulationConfig::default();
        config.time.duration = 1.0;
        config.report.sample_every = 50;
        let args = Args::default();

        let out = execute(&args, &config, &IntegratorRegistry::default()).unwrap();
        assert!(out.starts_with("RK4\n"));
        assert!(out.contains("RK4 (rk4): 100 samples"));
    }

    #[test]
    fn test_execute_compare_quiet() {
        let mut config = SimulationConfig::default();
        config.time.duration = 1.0;
        let args = Args {
            compare: true,
            quiet: true,
            ..Args::default()
        };

        let out = execute(&args, &config, &IntegratorRegistry::default()).unwrap();
        assert!(out.starts_with("Energy drift comparison"));
        assert!(out.contains("1. RK4"));
        assert!(out.contains("2. Improved Euler"));
    }

    #[test]
    fn test_execute_rejects_invalid_configuration() {
        let mut config = SimulationConfig::default();
        config.physics.gravity = -9.81;

        let result = execute(&Args::default(), &config, &IntegratorRegistry::default());
        assert!(matches!(result, Err(CliError::Configuration(_))));
    }
}
