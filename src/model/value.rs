#![forbid(unsafe_code)]

//! Value types that option fields can be declared with
//!
//! The binder never inspects a command's fields directly. Each field type
//! implements [`OptionValue`], which reports the [`ValueKind`] shown in help
//! output and converts the raw token text into the field's value.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The declared value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Boolean switch; presence sets the field to true and any value is ignored
    Flag,
    String,
    Integer,
    /// 64-bit integer
    Long,
    Float,
    Uuid,
    /// A user-supplied type that takes a value
    Custom(&'static str),
}

impl ValueKind {
    /// Whether a token for this option must carry a `=value`
    pub fn takes_value(self) -> bool {
        !matches!(self, ValueKind::Flag)
    }

    /// Lower-case name, as printed by `Display`
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Flag => "flag",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Uuid => "uuid",
            ValueKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure converting a raw token into a field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The option takes a value but the token had none
    #[error("no value supplied")]
    Missing,

    /// The supplied text does not parse as the declared type
    #[error("{0}")]
    Invalid(String),
}

/// A type that can be bound from a command-line option
///
/// Implement this for custom field types to extend the set of supported
/// value types. `from_token` receives `None` when the option was given
/// without `=value`.
pub trait OptionValue: Sized + Send {
    fn kind() -> ValueKind;

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError>;
}

/// Returns the raw value or [`ValueError::Missing`]
pub fn required_text(raw: Option<&str>) -> Result<&str, ValueError> {
    raw.ok_or(ValueError::Missing)
}

impl OptionValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Flag
    }

    fn from_token(_raw: Option<&str>) -> Result<Self, ValueError> {
        Ok(true)
    }
}

impl OptionValue for String {
    fn kind() -> ValueKind {
        ValueKind::String
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        required_text(raw).map(str::to_owned)
    }
}

impl OptionValue for i32 {
    fn kind() -> ValueKind {
        ValueKind::Integer
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        let text = required_text(raw)?;
        text.parse()
            .map_err(|e| ValueError::Invalid(format!("`{}` is not an integer: {}", text, e)))
    }
}

impl OptionValue for i64 {
    fn kind() -> ValueKind {
        ValueKind::Long
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        let text = required_text(raw)?;
        text.parse()
            .map_err(|e| ValueError::Invalid(format!("`{}` is not an integer: {}", text, e)))
    }
}

impl OptionValue for f64 {
    fn kind() -> ValueKind {
        ValueKind::Float
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        let text = required_text(raw)?;
        text.parse()
            .map_err(|e| ValueError::Invalid(format!("`{}` is not a number: {}", text, e)))
    }
}

impl OptionValue for Uuid {
    fn kind() -> ValueKind {
        ValueKind::Uuid
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        let text = required_text(raw)?;
        parse_hyphenated_uuid(text)
    }
}

/// Nullable fields bind through their underlying type
impl<T: OptionValue> OptionValue for Option<T> {
    fn kind() -> ValueKind {
        T::kind()
    }

    fn from_token(raw: Option<&str>) -> Result<Self, ValueError> {
        T::from_token(raw).map(Some)
    }
}

/// Accepts only the 8-4-4-4-12 hex grouping
fn parse_hyphenated_uuid(text: &str) -> Result<Uuid, ValueError> {
    let invalid = || {
        ValueError::Invalid(format!(
            "`{}` is not a UUID (expected xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)",
            text
        ))
    };

    let groups: Vec<&str> = text.split('-').collect();
    let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    if lengths != [8, 4, 4, 4, 12] || !groups.iter().all(|g| g.chars().all(|c| c.is_ascii_hexdigit())) {
        return Err(invalid());
    }

    Uuid::parse_str(text).map_err(|_| invalid())
}
