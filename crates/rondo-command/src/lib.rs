//! Command contract, registry and dispatch for the rondo CLI.
//!
//! Everything the CLI can run is a *command unit*: an invocation syntax,
//! a description, declared positional arguments and options, and a
//! behavior. Built-in commands implement [`Command`] directly, so the
//! contract is checked by the compiler; bundle-contributed commands are
//! loaded from descriptor files and validated at startup, and their
//! behavior lives inside the host project's own runtime.
//!
//! The pipeline is linear: discover, validate, register, parse, dispatch.
//! The [`Registry`] accumulates units in three provenance tiers (builtin,
//! project, default), the grammar builder turns its entries into clap
//! subcommands, and the [`Dispatcher`] routes a matched invocation either
//! to the in-process handler or to the project's CLI adapter.

mod context;
mod dispatch;
mod registry;
pub mod syntax;

pub use context::{CommandInput, CommandOutput, ConsoleOutput, MemoryOutput, OptionValue};
pub use dispatch::{
    build_cli, extract_environment, CatchAllCommand, Dispatcher, DEFAULT_ENVIRONMENT,
};
pub use registry::{Registry, RegistryEntry, Tier};

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("invalid invocation syntax `{syntax}`: {reason}")]
    InvalidSyntax { syntax: String, reason: String },

    #[error("invalid flag spec `{spec}`: {reason}")]
    InvalidFlag { spec: String, reason: String },

    #[error("project delegate not found at {}", .0.display())]
    DelegateMissing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One declared command option.
///
/// `flags` is flag syntax (`"-r, --rest [model]"`) handed to the grammar
/// builder verbatim; `key` is the name the parsed value is exposed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub key: String,
    pub flags: String,
    pub help: String,
}

impl OptionSpec {
    pub fn new(key: impl Into<String>, flags: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            flags: flags.into(),
            help: help.into(),
        }
    }
}

/// The contract every in-process command implements.
#[async_trait]
pub trait Command: Send + Sync {
    /// Invocation syntax, including positional placeholders
    /// (`"create:bundle <name>"`).
    fn name(&self) -> &str;

    /// One-line human readable description.
    fn description(&self) -> &str;

    /// Names of the declared positional arguments, in order.
    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }

    /// Declared options.
    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Run the command.
    async fn execute(
        &self,
        input: &CommandInput,
        output: &mut dyn CommandOutput,
    ) -> miette::Result<()>;
}

/// Where a registered command's behavior lives.
#[derive(Clone)]
pub enum CommandSource {
    /// Executes in-process.
    Local(Arc<dyn Command>),

    /// Executes inside the project runtime. The path is the descriptor
    /// file handed to the project's CLI adapter.
    Project { descriptor: PathBuf },
}

impl std::fmt::Debug for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandSource::Local(_) => f.write_str("Local"),
            CommandSource::Project { descriptor } => {
                f.debug_struct("Project").field("descriptor", descriptor).finish()
            }
        }
    }
}

/// A validated, registrable command record.
#[derive(Debug, Clone)]
pub struct CommandUnit {
    pub name: String,
    pub description: String,
    pub arguments: Vec<String>,
    pub options: Vec<OptionSpec>,
    pub source: CommandSource,
}

impl CommandUnit {
    /// Build a unit from an in-process command implementation.
    pub fn from_command(command: Arc<dyn Command>) -> Self {
        Self {
            name: command.name().to_string(),
            description: command.description().to_string(),
            arguments: command.arguments(),
            options: command.options(),
            source: CommandSource::Local(command),
        }
    }
}
