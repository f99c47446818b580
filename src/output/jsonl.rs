#![forbid(unsafe_code)]

//! JSONL help output for machine consumers
//!
//! One JSON object per line:
//! - `{"type":"command", ...}` for each command in the list
//! - `{"type":"usage", ...}` for a single command's usage
//! - `{"type":"error", ...}` for a diagnostic

use crate::model::CommandDescriptor;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct CommandRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    command: &'a CommandDescriptor,
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    message: &'a str,
}

/// JSONL output formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlRenderer;

impl JsonlRenderer {
    /// Creates a new JsonlRenderer
    pub fn new() -> Self {
        JsonlRenderer
    }

    /// Writes one `command` record per command
    pub fn write_command_list<'a, I, W>(&self, commands: I, out: &mut W) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a CommandDescriptor>,
        W: Write + ?Sized,
    {
        for command in commands {
            write_record(
                out,
                &CommandRecord {
                    record_type: "command",
                    command,
                },
            )?;
        }
        Ok(())
    }

    /// Writes a single `usage` record
    pub fn write_usage<W>(&self, command: &CommandDescriptor, out: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        write_record(
            out,
            &CommandRecord {
                record_type: "usage",
                command,
            },
        )
    }

    /// Writes an `error` record, tagged with the command when known
    pub fn write_diagnostic<W>(
        &self,
        command: Option<&str>,
        message: &str,
        out: &mut W,
    ) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        write_record(
            out,
            &ErrorRecord {
                record_type: "error",
                command,
                message,
            },
        )
    }
}

fn write_record<W: Write + ?Sized, T: Serialize>(out: &mut W, record: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)
}
