#![forbid(unsafe_code)]

//! Command discovery and lookup
//!
//! Discovery turns a pool of candidate command types into descriptors exactly
//! once. A candidate can only be created for a type that has a default
//! constructor, a declaration and an `execute` operation, so the pool never
//! contains anything that is not a command.

use crate::command::{Command, CommandFactory};
use crate::error::DiscoveryError;
use crate::model::{CommandDescriptor, DescriptorError};
use std::collections::BTreeMap;

/// Routes to help output, so no command may use it, in any case
pub const HELP_COMMAND: &str = "help";

type DeclareFn = fn() -> Result<Box<dyn CommandFactory>, DescriptorError>;

/// A command type offered for discovery
#[derive(Clone, Copy)]
pub struct Candidate {
    type_name: &'static str,
    declare: DeclareFn,
}

impl Candidate {
    /// The candidate for command type `C`
    pub fn of<C: Command>() -> Self {
        Candidate {
            type_name: std::any::type_name::<C>(),
            declare: declare_boxed::<C>,
        }
    }

    /// Full Rust type name, used to identify a candidate whose declaration fails
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Candidate").field(&self.type_name).finish()
    }
}

fn declare_boxed<C: Command>() -> Result<Box<dyn CommandFactory>, DescriptorError> {
    Ok(Box::new(C::declare().build()?))
}

/// The discovered commands, immutable after construction
pub struct CommandRegistry {
    commands: Vec<Box<dyn CommandFactory>>,
    by_name: BTreeMap<String, usize>,
}

impl CommandRegistry {
    /// Declares every candidate and validates the resulting set
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::InvalidDeclaration`] if a declaration is malformed
    /// - [`DiscoveryError::NoCommands`] if the pool is empty
    /// - [`DiscoveryError::ReservedName`] if a command is named `help`
    /// - [`DiscoveryError::DuplicateNames`] listing every name that collides
    ///   with another one when case is ignored
    pub fn discover<I>(candidates: I) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut commands = Vec::new();
        for candidate in candidates {
            let factory =
                (candidate.declare)().map_err(|source| DiscoveryError::InvalidDeclaration {
                    candidate: candidate.type_name.to_string(),
                    source,
                })?;
            tracing::debug!(
                command = factory.descriptor().name(),
                candidate = candidate.type_name,
                "discovered command"
            );
            commands.push(factory);
        }

        if commands.is_empty() {
            return Err(DiscoveryError::NoCommands);
        }

        if let Some(reserved) = commands
            .iter()
            .map(|c| c.descriptor().name())
            .find(|name| name.eq_ignore_ascii_case(HELP_COMMAND))
        {
            return Err(DiscoveryError::ReservedName(reserved.to_string()));
        }

        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (index, command) in commands.iter().enumerate() {
            groups
                .entry(command.descriptor().name().to_lowercase())
                .or_default()
                .push(index);
        }

        let duplicates: Vec<String> = groups
            .values()
            .filter(|indices| indices.len() > 1)
            .flatten()
            .map(|&index| commands[index].descriptor().name().to_string())
            .collect();
        if !duplicates.is_empty() {
            return Err(DiscoveryError::DuplicateNames(duplicates));
        }

        let by_name = groups
            .into_iter()
            .map(|(key, indices)| (key, indices[0]))
            .collect();

        Ok(CommandRegistry { commands, by_name })
    }

    /// Case-insensitive lookup by command name
    pub fn get(&self, name: &str) -> Option<&dyn CommandFactory> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| self.commands[index].as_ref())
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().map(|c| c.descriptor())
    }

    /// Number of discovered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
