#![forbid(unsafe_code)]

//! Pre-invocation checks
//!
//! A prerequisite runs after a command is selected and before any of its
//! arguments are bound. The first failure aborts the dispatch and the
//! command's usage is shown instead.

use thiserror::Error;

/// A prerequisite refused to let the command run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PrerequisiteError {
    message: String,
}

impl PrerequisiteError {
    /// Creates a failure with a message for the user
    pub fn new(message: impl Into<String>) -> Self {
        PrerequisiteError {
            message: message.into(),
        }
    }

    /// Why the prerequisite failed
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A run-or-fail check attached to a command
pub trait Prerequisite: Send + Sync {
    /// Short identifier shown in usage output
    fn name(&self) -> &str;

    fn run(&self) -> Result<(), PrerequisiteError>;
}

/// Prerequisite backed by a closure
pub struct FnPrerequisite<F> {
    name: String,
    check: F,
}

impl<F> Prerequisite for FnPrerequisite<F>
where
    F: Fn() -> Result<(), PrerequisiteError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> Result<(), PrerequisiteError> {
        (self.check)()
    }
}

/// Wraps a closure as a named prerequisite
pub fn from_fn<F>(name: impl Into<String>, check: F) -> FnPrerequisite<F>
where
    F: Fn() -> Result<(), PrerequisiteError> + Send + Sync,
{
    FnPrerequisite {
        name: name.into(),
        check,
    }
}

/// Requires an environment variable to be set to a non-empty value
pub struct RequireEnv {
    name: String,
    variable: String,
}

impl RequireEnv {
    /// Checks `variable`; the prerequisite is named `env:VARIABLE`
    pub fn new(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        RequireEnv {
            name: format!("env:{}", variable),
            variable,
        }
    }
}

impl Prerequisite for RequireEnv {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> Result<(), PrerequisiteError> {
        match std::env::var(&self.variable) {
            Ok(value) if !value.is_empty() => Ok(()),
            _ => Err(PrerequisiteError::new(format!(
                "environment variable {} must be set",
                self.variable
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_runs_closure() {
        let pass = from_fn("always", || Ok(()));
        assert_eq!(pass.name(), "always");
        assert!(pass.run().is_ok());

        let fail = from_fn("never", || Err(PrerequisiteError::new("not today")));
        assert_eq!(fail.run().unwrap_err().message(), "not today");
    }

    #[test]
    fn test_require_env_names_variable() {
        let check = RequireEnv::new("DECLARG_TEST_VARIABLE_THAT_IS_NEVER_SET");
        assert_eq!(check.name(), "env:DECLARG_TEST_VARIABLE_THAT_IS_NEVER_SET");

        let err = check.run().unwrap_err();
        assert!(err.message().contains("DECLARG_TEST_VARIABLE_THAT_IS_NEVER_SET"));
    }
}
