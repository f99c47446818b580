#![forbid(unsafe_code)]

//! `declarg.toml` settings
//!
//! Every section and key is optional:
//!
//! ```toml
//! [program]
//! name = "tool"
//! description = """
//!     Does tool things.
//! """
//!
//! [output]
//! color = "auto"    # auto | always | never
//! format = "human"  # human | jsonl
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub program: ProgramConfig,
    pub output: OutputConfig,
}

/// How the program presents itself in help output
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgramConfig {
    /// Name used in usage synopses; defaults to the executable's file stem
    pub name: Option<String>,
    /// Text shown above the command list
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub color: ColorOption,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorOption {
    pub fn to_color_choice(self) -> termcolor::ColorChoice {
        match self {
            ColorOption::Auto => termcolor::ColorChoice::Auto,
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::Never => termcolor::ColorChoice::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Jsonl,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Loads `path` if it exists, otherwise returns the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.color, ColorOption::Auto);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.program.name, None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
[program]
name = "tool"
description = "does things"

[output]
color = "never"
format = "jsonl"
"#,
        )
        .unwrap();

        assert_eq!(config.program.name.as_deref(), Some("tool"));
        assert_eq!(config.program.description.as_deref(), Some("does things"));
        assert_eq!(config.output.color, ColorOption::Never);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = Config::parse("[output]\ncolour = \"never\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = Config::parse("[programme]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_enum_value_rejected() {
        let result = Config::parse("[output]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("declarg.toml");
        fs::write(&path, "[program]\nname = \"from-file\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.program.name.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_color_choice_mapping() {
        assert_eq!(
            ColorOption::Never.to_color_choice(),
            termcolor::ColorChoice::Never
        );
        assert_eq!(
            ColorOption::Always.to_color_choice(),
            termcolor::ColorChoice::Always
        );
    }
}
