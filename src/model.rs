//! Passive metadata describing commands and their options

pub mod descriptor;
pub mod value;

pub use descriptor::{CommandDescriptor, DescriptorError, OptionDescriptor, ShortName};
pub use value::{OptionValue, ValueError, ValueKind};
