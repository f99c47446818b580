#![forbid(unsafe_code)]

//! Command and option descriptors
//!
//! Descriptors are built once when commands are discovered and never change
//! afterwards. All validation happens here, so a descriptor that exists is
//! known to be well formed by the time arguments are parsed against it.

use super::value::ValueKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing descriptors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("short option `{short}` for `--{option}` must be a single letter [a-z]")]
    InvalidShortName { option: String, short: String },

    #[error("option name must not be empty")]
    EmptyLongName,

    #[error("option name `{0}` must not start with `-` or contain `=` or whitespace")]
    InvalidLongName(String),

    #[error("command `{command}` declares option `--{option}` more than once")]
    DuplicateLongName { command: String, option: String },

    #[error("command `{command}` declares short option `-{short}` more than once")]
    DuplicateShortName { command: String, short: char },

    #[error("command name must not be empty")]
    EmptyCommandName,
}

/// A validated single-letter option alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShortName(char);

impl ShortName {
    /// Validates that `text` is exactly one letter in `[a-z]`
    ///
    /// `option` is only used to name the offending option in the error.
    pub fn new(option: &str, text: &str) -> Result<Self, DescriptorError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Ok(ShortName(c)),
            _ => Err(DescriptorError::InvalidShortName {
                option: option.to_string(),
                short: text.to_string(),
            }),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static metadata for one bindable field of a command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionDescriptor {
    long_name: String,
    short_name: Option<ShortName>,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    value_kind: ValueKind,
}

impl OptionDescriptor {
    /// Validates the long and short names of an option
    ///
    /// The long name must be reachable as `--name`: non-empty, no leading
    /// `-`, no `=` and no whitespace.
    pub fn new(
        long_name: impl Into<String>,
        short_name: Option<&str>,
        required: bool,
        description: Option<String>,
        value_kind: ValueKind,
    ) -> Result<Self, DescriptorError> {
        let long_name = long_name.into();
        if long_name.is_empty() {
            return Err(DescriptorError::EmptyLongName);
        }
        if long_name.starts_with('-')
            || long_name.contains('=')
            || long_name.chars().any(char::is_whitespace)
        {
            return Err(DescriptorError::InvalidLongName(long_name));
        }

        let short_name = short_name
            .map(|s| ShortName::new(&long_name, s))
            .transpose()?;

        Ok(OptionDescriptor {
            long_name,
            short_name,
            required,
            description,
            value_kind,
        })
    }

    /// Name used as `--name`, in its declared spelling
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Optional single-letter alias
    pub fn short_name(&self) -> Option<ShortName> {
        self.short_name
    }

    /// Whether the option must appear in every invocation
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Help text as declared, before de-indentation
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Type the option's value is parsed as
    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }
}

/// Static metadata describing one invocable command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    long_description: Option<String>,
    options: Vec<OptionDescriptor>,
    prerequisites: Vec<String>,

    // Lookup tables keyed by lower-cased long name and by short letter
    #[serde(skip)]
    long_index: BTreeMap<String, usize>,
    #[serde(skip)]
    short_index: BTreeMap<char, usize>,
}

impl CommandDescriptor {
    /// Builds a descriptor, rejecting duplicate option names
    ///
    /// Long names are compared case-insensitively.
    pub fn new(
        name: impl Into<String>,
        short_description: Option<String>,
        long_description: Option<String>,
        options: Vec<OptionDescriptor>,
        prerequisites: Vec<String>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DescriptorError::EmptyCommandName);
        }

        let mut long_index = BTreeMap::new();
        let mut short_index = BTreeMap::new();

        for (index, option) in options.iter().enumerate() {
            if long_index
                .insert(option.long_name.to_lowercase(), index)
                .is_some()
            {
                return Err(DescriptorError::DuplicateLongName {
                    command: name,
                    option: option.long_name.clone(),
                });
            }

            if let Some(short) = option.short_name
                && short_index.insert(short.as_char(), index).is_some()
            {
                return Err(DescriptorError::DuplicateShortName {
                    command: name,
                    short: short.as_char(),
                });
            }
        }

        Ok(CommandDescriptor {
            name,
            short_description,
            long_description,
            options,
            prerequisites,
            long_index,
            short_index,
        })
    }

    /// Command name as declared; lookups ignore case
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line summary for the command list
    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    /// Text shown above the usage synopsis
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    /// Options in declaration order
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    /// Names of the prerequisite checks, in the order they run
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    /// Position of the option with this long name, ignoring case
    pub fn option_index(&self, long_name: &str) -> Option<usize> {
        self.long_index.get(&long_name.to_lowercase()).copied()
    }

    /// The option aliased by a single letter, ignoring case
    pub fn resolve_short(&self, letter: char) -> Option<&OptionDescriptor> {
        self.short_index
            .get(&letter.to_ascii_lowercase())
            .map(|&index| &self.options[index])
    }
}
