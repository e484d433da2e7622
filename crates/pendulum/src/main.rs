use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use pendulum::cli::{self, Args};
use pendulum::error::CliError;
use pendulum::integrators::IntegratorRegistry;

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let registry = IntegratorRegistry::default();

    if args.list_integrators {
        print!("{}", cli::list_integrators(&registry));
        return ExitCode::SUCCESS;
    }

    match run(&args, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, registry: &IntegratorRegistry) -> Result<(), CliError> {
    let config = cli::load_and_apply_config(args, registry)?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if let Some(path) = &args.save_config {
        config.save(path)?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    print!("{}", cli::execute(args, &config, registry)?);
    Ok(())
}
