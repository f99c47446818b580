#![forbid(unsafe_code)]

//! Argument dispatch
//!
//! Routing for one dispatch:
//!
//! 1. `help <name>` with a known command shows that command's usage
//! 2. Otherwise the first argument selects a command; an unknown or missing
//!    name shows the command list
//! 3. The selected command's prerequisites run in order, then the remaining
//!    arguments are tokenized and bound into a fresh instance
//! 4. A prerequisite or argument failure prints a diagnostic followed by the
//!    command's usage; success invokes the command and waits for it
//!
//! Only invocation failures leave the dispatcher as errors. Discovery happens
//! once in [`Dispatcher::new`], and the dispatcher can be reused afterwards.

use super::binder::bind;
use super::registry::{Candidate, CommandRegistry, HELP_COMMAND};
use super::tokenizer::tokenize;
use crate::command::{CommandFactory, Invocable};
use crate::config::{Config, OutputFormat};
use crate::error::{DiscoveryError, DispatchError, Rejection};
use crate::model::CommandDescriptor;
use crate::output::{HelpRenderer, JsonlRenderer};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use termcolor::{ColorChoice, StandardStream, WriteColor};

/// The route a dispatch took
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran to completion
    Invoked { command: String },
    /// No command was selected; the command list was shown
    ListedCommands,
    /// `help <name>` showed a command's usage
    ShowedUsage { command: String },
    /// A prerequisite or the arguments failed; usage was shown instead
    Rejected { command: String, error: Rejection },
}

/// Discovered commands plus the output settings used to talk about them
pub struct Dispatcher {
    registry: CommandRegistry,
    format: OutputFormat,
    color: ColorChoice,
    human: HelpRenderer,
    jsonl: JsonlRenderer,
}

impl Dispatcher {
    /// Discovers `candidates`; a failure here should abort the program
    pub fn new<I>(candidates: I, config: &Config) -> Result<Self, DiscoveryError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let registry = CommandRegistry::discover(candidates)?;
        tracing::debug!(commands = registry.len(), "discovery complete");

        let program = config
            .program
            .name
            .clone()
            .unwrap_or_else(default_program_name);

        Ok(Dispatcher {
            registry,
            format: config.output.format,
            color: config.output.color.to_color_choice(),
            human: HelpRenderer::new(program).with_description(config.program.description.clone()),
            jsonl: JsonlRenderer::new(),
        })
    }

    /// The commands found at construction
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatches `args` (without the program name), writing to stdout
    pub async fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<Outcome, DispatchError> {
        let mut stdout = StandardStream::stdout(self.stdout_color());
        self.dispatch_to(args, &mut stdout).await
    }

    /// Dispatches `args` (without the program name), writing to `out`
    pub async fn dispatch_to<S, W>(&self, args: &[S], out: &mut W) -> Result<Outcome, DispatchError>
    where
        S: AsRef<str>,
        W: WriteColor + ?Sized,
    {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        if args.first() == Some(&HELP_COMMAND)
            && let Some(command) = args.get(1).and_then(|name| self.registry.get(name))
        {
            let name = command.descriptor().name().to_string();
            tracing::debug!(command = %name, "showing usage");
            self.write_usage(command.descriptor(), out)?;
            out.flush()?;
            return Ok(Outcome::ShowedUsage { command: name });
        }

        let Some(command) = args.first().and_then(|name| self.registry.get(name)) else {
            tracing::debug!(argument = ?args.first(), "no command selected");
            self.write_command_list(out)?;
            out.flush()?;
            return Ok(Outcome::ListedCommands);
        };

        self.run(command, &args[1..], out).await
    }

    /// Dispatches to a fixed command; every argument is treated as an option
    pub async fn dispatch_command_to<S, W>(
        &self,
        name: &str,
        args: &[S],
        out: &mut W,
    ) -> Result<Outcome, DispatchError>
    where
        S: AsRef<str>,
        W: WriteColor + ?Sized,
    {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match self.registry.get(name) {
            Some(command) => self.run(command, &args, out).await,
            None => {
                tracing::debug!(command = name, "preset command not found");
                self.write_command_list(out)?;
                out.flush()?;
                Ok(Outcome::ListedCommands)
            }
        }
    }

    /// Like [`Dispatcher::dispatch_command_to`], writing to stdout
    pub async fn dispatch_command<S: AsRef<str>>(
        &self,
        name: &str,
        args: &[S],
    ) -> Result<Outcome, DispatchError> {
        let mut stdout = StandardStream::stdout(self.stdout_color());
        self.dispatch_command_to(name, args, &mut stdout).await
    }

    async fn run<W>(
        &self,
        command: &dyn CommandFactory,
        args: &[&str],
        out: &mut W,
    ) -> Result<Outcome, DispatchError>
    where
        W: WriteColor + ?Sized,
    {
        let descriptor = command.descriptor();
        let name = descriptor.name().to_string();

        let mut instance = match prepare(command, args) {
            Ok(instance) => instance,
            Err(error) => {
                tracing::debug!(command = %name, %error, "dispatch rejected");
                self.write_diagnostic(&name, &error.to_string(), out)?;
                self.write_usage(descriptor, out)?;
                out.flush()?;
                return Ok(Outcome::Rejected {
                    command: name,
                    error,
                });
            }
        };

        out.flush()?;
        tracing::info!(command = %name, "invoking command");
        instance
            .execute()
            .await
            .map_err(|error| DispatchError::Invocation {
                command: name.clone(),
                error,
            })?;

        Ok(Outcome::Invoked { command: name })
    }

    fn write_command_list<W: WriteColor + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self
                .human
                .write_command_list(self.registry.descriptors(), out),
            OutputFormat::Jsonl => self
                .jsonl
                .write_command_list(self.registry.descriptors(), out),
        }
    }

    fn write_usage<W: WriteColor + ?Sized>(
        &self,
        descriptor: &CommandDescriptor,
        out: &mut W,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self.human.write_usage(descriptor, out),
            OutputFormat::Jsonl => self.jsonl.write_usage(descriptor, out),
        }
    }

    fn write_diagnostic<W: WriteColor + ?Sized>(
        &self,
        command: &str,
        message: &str,
        out: &mut W,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Human => self.human.write_diagnostic(message, out),
            OutputFormat::Jsonl => self.jsonl.write_diagnostic(Some(command), message, out),
        }
    }

    fn stdout_color(&self) -> ColorChoice {
        if self.color == ColorChoice::Auto && !io::stdout().is_terminal() {
            ColorChoice::Never
        } else {
            self.color
        }
    }
}

/// Runs prerequisites, then tokenizes and binds into a fresh instance
fn prepare<'r>(
    command: &'r dyn CommandFactory,
    args: &[&str],
) -> Result<Box<dyn Invocable + 'r>, Rejection> {
    let descriptor = command.descriptor();

    for prerequisite in command.prerequisites() {
        tracing::debug!(
            command = descriptor.name(),
            prerequisite = prerequisite.name(),
            "running prerequisite"
        );
        prerequisite
            .run()
            .map_err(|source| Rejection::Prerequisite {
                name: prerequisite.name().to_string(),
                source,
            })?;
    }

    let tokens = tokenize(args, descriptor)?;
    let mut instance = command.instantiate();
    bind(&tokens, descriptor, &mut *instance)?;
    Ok(instance)
}

/// The executable's file stem, falling back to this crate's name
fn default_program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
