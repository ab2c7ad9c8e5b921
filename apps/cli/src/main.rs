//! Taskboard CLI
//!
//! Sign in, then manage projects and tasks from the terminal:
//! - `taskboard login`, `signup`, `logout`, `whoami`
//! - `taskboard overview`
//! - `taskboard projects ...` and `taskboard tasks ...`
//! - `taskboard status`

use std::process::ExitCode;

use clap::Parser;
use taskboard_cli::{init_tracing, App, Cli, CliConfig};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    config.offline |= cli.offline;

    init_tracing(&config.log_level);
    for warning in config.warnings() {
        warn!("{warning}");
    }
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        offline = config.offline,
        "Starting Taskboard"
    );

    let result = match App::from_config(&config) {
        Ok(app) => app.run(cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
