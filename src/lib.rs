#![forbid(unsafe_code)]

//! Declarg: declarative command dispatch
//!
//! Commands are plain structs that declare their name, descriptions, options
//! and prerequisites once. Declarg discovers them, parses the process
//! arguments into the selected command's fields, runs its prerequisites and
//! invokes it, falling back to generated help text when anything is off.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod output;

pub use async_trait::async_trait;
pub use command::{Command, Declaration, OptionSpec, Prerequisite, PrerequisiteError};
pub use config::Config;
pub use engine::{Candidate, Dispatcher, Outcome};
pub use error::{ArgumentError, DiscoveryError, DispatchError, Rejection};

/// Discovers `candidates` and dispatches the current process arguments
pub async fn run<I>(candidates: I, config: &Config) -> Result<Outcome, DispatchError>
where
    I: IntoIterator<Item = Candidate>,
{
    let dispatcher = Dispatcher::new(candidates, config)?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    dispatcher.dispatch(&args).await
}
