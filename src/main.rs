//! telemetry-replay - device telemetry simulator
//!
//! Replays a recorder log onto an MQTT broker at its original timing.

use clap::Parser;
use std::process::ExitCode;
use telemetry_replay::config::{merge_config_with_args, ConfigFile};
use telemetry_replay::driver;
use telemetry_replay::error::ErrorHint;
use telemetry_replay::{ReplayArgs, ReplayConfig, ReplayError, Result};
use tracing::{error, info, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_config() {
                eprintln!("{}", e.with_hint());
                println!("{}", ReplayArgs::usage());
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments (before runtime creation)
    let mut args = ReplayArgs::parse();

    // Handle --generate-config flag
    if args.generate_config {
        println!("{}", ConfigFile::generate_example());
        return Ok(());
    }

    // Load configuration file if specified or from default locations.
    // Verbosity is not known yet, so lookup messages go through a scoped
    // subscriber at the default level.
    let config_file = match args.config {
        Some(ref path) => Some(ConfigFile::load(path)?),
        None => {
            tracing::subscriber::with_default(subscriber(args.verbose), ConfigFile::load_default)
        }
    };

    // Merge config file values with CLI args (CLI takes precedence)
    if let Some(ref config) = config_file {
        args = merge_config_with_args(args, config);
    }

    let config = ReplayConfig::from_args(args)?;
    config.validate()?;

    init_tracing(config.verbose);

    if let Err(e) = driver::check_log_file(&config.log_file) {
        error!(error = %e, "File {} does not exist or is not readable", config.log_file.display());
        return Err(e);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to create Tokio runtime");
            ReplayError::Io(e)
        })?;

    match runtime.block_on(driver::run(config)) {
        Ok(stats) => {
            info!(
                lines = stats.lines_read,
                published = stats.events_published,
                elapsed_ms = stats.elapsed_ms,
                "Replay finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Aborting. Severe error");
            Err(e)
        }
    }
}

/// `RUST_LOG` wins when set; otherwise info, or debug with `--verbose`
fn subscriber(verbose: bool) -> impl Subscriber + Send + Sync {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},rumqttc=warn")));

    tracing_subscriber::registry().with(fmt::layer()).with(filter)
}

fn init_tracing(verbose: bool) {
    subscriber(verbose).init();
}
