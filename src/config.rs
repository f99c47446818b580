//! Configuration file parsing and validation

pub mod declarg_toml;

pub use declarg_toml::{
    ColorOption, Config, ConfigError, OutputConfig, OutputFormat, ProgramConfig,
};
