#![forbid(unsafe_code)]

//! Sample tool built on declarg

mod commands;

use declarg::config::{Config, ConfigError};
use declarg::{DispatchError, Outcome};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "DECLARG_CONFIG";
const CONFIG_FILE: &str = "declarg.toml";

/// Exit codes
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match declarg::run(commands::candidates(), &config).await {
        Ok(Outcome::Rejected { .. }) => ExitCode::from(EXIT_USAGE),
        Ok(_) => ExitCode::SUCCESS,
        Err(DispatchError::Output(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `$DECLARG_CONFIG` if set, else `declarg.toml` in the working directory if present
fn load_config() -> Result<Config, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Config::load(&PathBuf::from(path)),
        None => Config::load_or_default(Path::new(CONFIG_FILE)),
    }
}
