//! gotify-alert - standalone Gotify alert action.
//!
//! Invoked by a host with `--execute` and an alert document on standard
//! input; exits with the status code of the action. All diagnostics go to
//! stderr so stdout stays free for the invoking process.

use clap::Parser;
use gotify_alert::{
    cli::Cli,
    config::Settings,
    core::ActionStatus,
    standalone,
};
use std::io;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Load settings by layering sources: defaults, file, environment, and
    // CLI args.
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            // Manually initialize logging for this specific error
            init_logging("info");
            error!("Failed to load settings: {err}");
            std::process::exit(ActionStatus::IntegrationError.code());
        }
    };

    init_logging(&settings.log_level);

    if !cli.execute {
        // The host contract: without the execute flag nothing runs, and the
        // no-op is not reported as a failure.
        error!("FATAL: no execute flag given, nothing to do");
        std::process::exit(ActionStatus::Success.code());
    }

    let status = standalone::execute(io::stdin().lock(), &settings);
    std::process::exit(status.code());
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
