//! Taskboard command-line client
//!
//! The command line plays the part of the view layer: each command checks
//! the session, runs store actions and prints the resulting state.

pub mod app;
pub mod cli;
pub mod config;
pub mod render;

pub use app::App;
pub use cli::Cli;
pub use config::{CliConfig, ConfigError};

/// Initialize tracing with the given log level
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so that command
/// output stays clean.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
