#![forbid(unsafe_code)]

//! Human-readable help output with colorization support

use super::table::Table;
use super::text::deindent;
use crate::model::{CommandDescriptor, OptionDescriptor};
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Renders the command list, command usage and diagnostics
///
/// Rendering only reads descriptors; the same renderer can be used for any
/// number of dispatches.
#[derive(Debug, Clone)]
pub struct HelpRenderer {
    program: String,
    description: Option<String>,
}

impl HelpRenderer {
    /// Creates a renderer that refers to the tool as `program` in synopses
    pub fn new(program: impl Into<String>) -> Self {
        HelpRenderer {
            program: program.into(),
            description: None,
        }
    }

    /// Text printed above the command list
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.map(|d| deindent(&d)).filter(|d| !d.is_empty());
        self
    }

    /// Name used in synopses
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command list as plain text
    pub fn command_list<'a, I>(&self, commands: I) -> String
    where
        I: IntoIterator<Item = &'a CommandDescriptor>,
    {
        let mut buffer = Buffer::no_color();
        let _ = self.write_command_list(commands, &mut buffer);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// A command's usage as plain text
    pub fn usage(&self, command: &CommandDescriptor) -> String {
        let mut buffer = Buffer::no_color();
        let _ = self.write_usage(command, &mut buffer);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    /// Writes the list of commands plus a `help <name>` entry
    pub fn write_command_list<'a, I, W>(&self, commands: I, out: &mut W) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a CommandDescriptor>,
        W: WriteColor + ?Sized,
    {
        if let Some(description) = &self.description {
            writeln!(out, "{}", description)?;
            writeln!(out)?;
        }

        write_heading(out, "Usage:")?;
        writeln!(out, " {} <command> [options]", self.program)?;
        writeln!(out)?;

        let mut table = Table::new(&[2, 2]);
        for command in commands {
            table.row(vec![
                Some(command.name().to_string()),
                command.short_description().map(deindent),
            ]);
        }
        table.separator();
        table.row(vec![
            Some("help <name>".to_string()),
            Some("show usage for a command".to_string()),
        ]);

        write_heading(out, "Commands:")?;
        writeln!(out)?;
        for line in table.render() {
            writeln!(out, "{}", line)?;
        }

        Ok(())
    }

    /// Writes a command's description, synopsis and option table
    pub fn write_usage<W>(&self, command: &CommandDescriptor, out: &mut W) -> io::Result<()>
    where
        W: WriteColor + ?Sized,
    {
        let description = command
            .long_description()
            .or(command.short_description())
            .map(deindent)
            .filter(|d| !d.is_empty());
        if let Some(description) = description {
            writeln!(out, "{}", description)?;
            writeln!(out)?;
        }

        write_heading(out, "Usage:")?;
        writeln!(out, " {}", self.synopsis(command))?;

        if !command.prerequisites().is_empty() {
            writeln!(out)?;
            write_heading(out, "Prerequisites:")?;
            writeln!(out, " {}", command.prerequisites().join(", "))?;
        }

        if command.options().is_empty() {
            return Ok(());
        }

        let mut table = Table::new(&[2, 2, 4]);
        for option in command.options() {
            table.row(vec![
                option.short_name().map(|s| format!("-{}", s)),
                Some(long_flag(option)),
                option_description(option),
            ]);
        }

        writeln!(out)?;
        write_heading(out, "Options:")?;
        writeln!(out)?;
        for line in table.render() {
            writeln!(out, "{}", line)?;
        }

        Ok(())
    }

    /// Writes an error message, highlighted when colors are enabled
    pub fn write_diagnostic<W>(&self, message: &str, out: &mut W) -> io::Result<()>
    where
        W: WriteColor + ?Sized,
    {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "error:")?;
        out.reset()?;
        writeln!(out, " {}", message)?;
        writeln!(out)
    }

    /// `program name --required=VALUE [options]`
    fn synopsis(&self, command: &CommandDescriptor) -> String {
        let mut parts = vec![self.program.clone(), command.name().to_string()];
        parts.extend(
            command
                .options()
                .iter()
                .filter(|o| o.is_required())
                .map(long_flag),
        );
        if command.options().iter().any(|o| !o.is_required()) {
            parts.push("[options]".to_string());
        }
        parts.join(" ")
    }
}

fn write_heading<W: WriteColor + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", text)?;
    out.reset()
}

/// `--name` for flags, `--name=VALUE` for everything else
fn long_flag(option: &OptionDescriptor) -> String {
    if option.value_kind().takes_value() {
        format!("--{}=VALUE", option.long_name())
    } else {
        format!("--{}", option.long_name())
    }
}

fn option_description(option: &OptionDescriptor) -> Option<String> {
    let description = option.description().map(deindent).filter(|d| !d.is_empty());
    match (option.is_required(), description) {
        (true, Some(description)) => Some(format!("(required) {}", description)),
        (true, None) => Some("(required)".to_string()),
        (false, description) => description,
    }
}
