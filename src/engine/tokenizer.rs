#![forbid(unsafe_code)]

//! Raw argument tokenizing
//!
//! Turns the arguments after the command name into a [`TokenMap`] from long
//! option name to an optional value. Long options are keyed by their declared
//! spelling whatever case they were typed in; short options are resolved to
//! their long names through the selected command's descriptor.
//!
//! Accepted shapes:
//! - `--name` and `--name=value`
//! - `-x=value`, where `x` is exactly one letter
//! - `-xyz`, a bundle of flags equivalent to `--x --y --z` after resolution

use crate::error::ArgumentError;
use crate::model::CommandDescriptor;

/// Parsed arguments, keyed by long option name
///
/// A later occurrence of a key overwrites the earlier value but keeps the
/// key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    entries: Vec<(String, Option<String>)>,
}

impl TokenMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, replacing the value of an earlier occurrence
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// `None` if the key is absent, `Some(None)` for a flag without value
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tokenizes `args` against the short names declared by `descriptor`
///
/// # Errors
///
/// - [`ArgumentError::UnknownArgument`] for a token that is not an option, or
///   a short letter no option declares
/// - [`ArgumentError::InvalidOptionSyntax`] for `-xy=value`
pub fn tokenize<S: AsRef<str>>(
    args: &[S],
    descriptor: &CommandDescriptor,
) -> Result<TokenMap, ArgumentError> {
    let mut tokens = TokenMap::new();

    for arg in args {
        let arg = arg.as_ref();

        if let Some(long) = arg.strip_prefix("--") {
            match long.split_once('=') {
                Some((key, value)) => {
                    tokens.insert(canonical_long(descriptor, key), Some(value.to_string()))
                }
                None => tokens.insert(canonical_long(descriptor, long), None),
            }
        } else if let Some(short) = arg.strip_prefix('-') {
            if short.is_empty() {
                return Err(ArgumentError::UnknownArgument(arg.to_string()));
            }

            match short.split_once('=') {
                Some((key, value)) => {
                    let mut letters = key.chars();
                    let letter = match (letters.next(), letters.next()) {
                        (Some(letter), None) => letter,
                        _ => return Err(ArgumentError::InvalidOptionSyntax(arg.to_string())),
                    };
                    let long = resolve_short(descriptor, letter)?;
                    tokens.insert(long, Some(value.to_string()));
                }
                None => {
                    for letter in short.chars() {
                        let long = resolve_short(descriptor, letter)?;
                        tokens.insert(long, None);
                    }
                }
            }
        } else {
            return Err(ArgumentError::UnknownArgument(arg.to_string()));
        }
    }

    Ok(tokens)
}

/// The declared spelling of a long name, so `--x` and `--X` share one entry
///
/// Undeclared names are kept as written for the binder to reject.
fn canonical_long<'a>(descriptor: &'a CommandDescriptor, key: &'a str) -> &'a str {
    descriptor
        .option_index(key)
        .map(|index| descriptor.options()[index].long_name())
        .unwrap_or(key)
}

fn resolve_short(descriptor: &CommandDescriptor, letter: char) -> Result<&str, ArgumentError> {
    descriptor
        .resolve_short(letter)
        .map(|option| option.long_name())
        .ok_or_else(|| ArgumentError::UnknownArgument(letter.to_string()))
}
