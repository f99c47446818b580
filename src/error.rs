#![forbid(unsafe_code)]

//! Error taxonomy for discovery, argument handling and dispatch

use crate::command::PrerequisiteError;
use crate::model::DescriptorError;
use thiserror::Error;

/// The set of commands could not be assembled; startup must abort
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("no commands were found")]
    NoCommands,

    #[error("duplicate command names: {}", .0.join(", "))]
    DuplicateNames(Vec<String>),

    #[error("command name `{0}` is reserved")]
    ReservedName(String),

    #[error("invalid declaration for `{candidate}`: {source}")]
    InvalidDeclaration {
        candidate: String,
        source: DescriptorError,
    },
}

/// Arguments that could not be bound to the selected command
///
/// These are recoverable: the dispatcher reports them and shows usage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),

    #[error("invalid short option format `{0}`")]
    InvalidOptionSyntax(String),

    #[error("unspecified value for `{0}`")]
    MissingValue(String),

    #[error("invalid value for `{option}`: {reason}")]
    InvalidValue { option: String, reason: String },

    #[error("required options not specified: {}", .0.join(", "))]
    MissingRequiredOptions(Vec<String>),
}

/// Why a selected command was not invoked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("prerequisite `{name}` failed: {source}")]
    Prerequisite {
        name: String,
        source: PrerequisiteError,
    },

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Failures that escape the dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("command `{command}` failed: {error:#}")]
    Invocation {
        command: String,
        error: anyhow::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
