//! Parser binding and invocation dispatch.
//!
//! Registry entries are bound to a clap grammar, one subcommand per
//! entry. Once the parser matches, the dispatcher rebuilds the declared
//! arguments and options into a [`CommandInput`] and routes it: local
//! units execute in-process, project units are handed to the project's
//! CLI adapter, and unmatched input falls through to the default tier.

use crate::context::{CommandInput, CommandOutput, ConsoleOutput, OptionValue};
use crate::syntax::{self, ValueArity};
use crate::{Command, CommandError, CommandSource, CommandUnit, Registry, Tier};
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches};
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment used when no `--env=` token is supplied.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Strip every `--env=<value>` token from the raw argument vector.
///
/// The parser never sees these tokens. The last occurrence wins; absence
/// yields [`DEFAULT_ENVIRONMENT`].
pub fn extract_environment(args: &mut Vec<String>) -> String {
    let mut environment = DEFAULT_ENVIRONMENT.to_string();
    args.retain(|arg| {
        if let Some(value) = arg.strip_prefix("--env=") {
            environment = value.to_string();
            false
        } else {
            true
        }
    });
    environment
}

/// Build the clap grammar for every non-default registry entry.
///
/// Unrecognized subcommands are let through the parser so the default
/// tier can handle them.
pub fn build_cli(registry: &Registry, version: &str) -> Result<clap::Command, CommandError> {
    let mut cli = clap::Command::new("rondo")
        .about("Command line tools for the rondo web framework")
        .version(version.to_string())
        .allow_external_subcommands(true);

    for entry in registry.entries() {
        if entry.tier == Tier::Default {
            continue;
        }
        cli = cli.subcommand(build_subcommand(&entry.unit)?);
    }

    Ok(cli)
}

fn build_subcommand(unit: &CommandUnit) -> Result<clap::Command, CommandError> {
    let parsed = syntax::parse_invocation(&unit.name)?;
    let mut cmd = clap::Command::new(parsed.name).about(unit.description.clone());

    for (index, positional) in parsed.positionals.into_iter().enumerate() {
        cmd = cmd.arg(
            Arg::new(positional.name)
                .index(index + 1)
                .required(positional.required),
        );
    }

    for spec in &unit.options {
        let flag = syntax::parse_flag(&spec.flags)?;
        let mut arg = Arg::new(spec.key.clone())
            .long(flag.long)
            .help(spec.help.clone());
        if let Some(short) = flag.short {
            arg = arg.short(short);
        }
        arg = match flag.arity {
            ValueArity::None => arg.action(ArgAction::SetTrue),
            ValueArity::Optional => arg.action(ArgAction::Set).num_args(0..=1),
            ValueArity::Required => arg.action(ArgAction::Set).num_args(1),
        };
        if let Some(value_name) = flag.value_name {
            arg = arg.value_name(value_name);
        }
        cmd = cmd.arg(arg);
    }

    Ok(cmd)
}

/// Routes parsed invocations to their command behavior.
pub struct Dispatcher {
    registry: Registry,
    environment: String,
    working_dir: PathBuf,
}

impl Dispatcher {
    pub fn new(registry: Registry, environment: impl Into<String>, working_dir: PathBuf) -> Self {
        Self {
            registry,
            environment: environment.into(),
            working_dir,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse the prepared argument vector and dispatch what it matched.
    pub async fn run(&self, argv: Vec<String>, version: &str) -> Result<()> {
        let cli = build_cli(&self.registry, version).into_diagnostic()?;
        let matches = cli.get_matches_from(argv);

        match matches.subcommand() {
            Some((name, sub_matches)) => {
                self.dispatch(name, sub_matches, &mut ConsoleOutput).await
            }
            None => {
                let mut cli = build_cli(&self.registry, version).into_diagnostic()?;
                cli.print_help().into_diagnostic()?;
                Ok(())
            }
        }
    }

    /// Dispatch one matched subcommand.
    ///
    /// Errors from a local unit's own `execute` propagate unwrapped; the
    /// dispatcher has no recovery policy for command-body failures.
    pub async fn dispatch(
        &self,
        name: &str,
        matches: &ArgMatches,
        output: &mut dyn CommandOutput,
    ) -> Result<()> {
        let Some(entry) = self.registry.find(name) else {
            return self.dispatch_default(name, output).await;
        };

        let input = self.build_input(&entry.unit, matches).into_diagnostic()?;

        match &entry.unit.source {
            CommandSource::Local(command) => command.execute(&input, output).await,
            CommandSource::Project { descriptor } => self.run_delegate(descriptor, &input).await,
        }
    }

    /// Build the invocation context for a matched unit.
    ///
    /// Options are read by declared key; keys the parser never saw stay
    /// `Absent`. Positionals are read in placeholder order and paired
    /// with the declared argument names by index.
    fn build_input(
        &self,
        unit: &CommandUnit,
        matches: &ArgMatches,
    ) -> Result<CommandInput, CommandError> {
        let mut options = BTreeMap::new();
        for spec in &unit.options {
            let flag = syntax::parse_flag(&spec.flags)?;
            let value = match flag.arity {
                ValueArity::None => {
                    if matches.get_flag(&spec.key) {
                        OptionValue::Set
                    } else {
                        OptionValue::Absent
                    }
                }
                ValueArity::Optional | ValueArity::Required => {
                    match matches.get_one::<String>(&spec.key) {
                        Some(value) => OptionValue::Value(value.clone()),
                        None if matches.value_source(&spec.key).is_some() => OptionValue::Set,
                        None => OptionValue::Absent,
                    }
                }
            };
            options.insert(spec.key.clone(), value);
        }

        let parsed = syntax::parse_invocation(&unit.name)?;
        let captured: Vec<Option<String>> = parsed
            .positionals
            .iter()
            .map(|positional| matches.get_one::<String>(&positional.name).cloned())
            .collect();

        let mut arguments = BTreeMap::new();
        for (index, name) in unit.arguments.iter().enumerate() {
            arguments.insert(name.clone(), captured.get(index).cloned().flatten());
        }

        Ok(CommandInput::new(
            arguments,
            options,
            self.environment.clone(),
            self.working_dir.clone(),
        ))
    }

    /// Route unmatched input to the default catch-all tier.
    async fn dispatch_default(&self, name: &str, output: &mut dyn CommandOutput) -> Result<()> {
        let Some(entry) = self.registry.default_entry() else {
            output.writeln(&format!("command not found: {name}"));
            return Ok(());
        };

        let mut arguments = BTreeMap::new();
        if let Some(first) = entry.unit.arguments.first() {
            arguments.insert(first.clone(), Some(name.to_string()));
        }
        let input = CommandInput::new(
            arguments,
            BTreeMap::new(),
            self.environment.clone(),
            self.working_dir.clone(),
        );

        match &entry.unit.source {
            CommandSource::Local(command) => command.execute(&input, output).await,
            // The default tier never delegates.
            CommandSource::Project { .. } => Ok(()),
        }
    }

    /// Hand a project-tier command to the project's CLI adapter.
    ///
    /// The adapter is invoked with four positional parameters: descriptor
    /// path, environment, JSON-encoded arguments, JSON-encoded options.
    /// It owns kernel bootstrap, execution and process exit; a non-zero
    /// exit status is mirrored.
    async fn run_delegate(&self, descriptor: &Path, input: &CommandInput) -> Result<()> {
        let adapter = self.working_dir.join("app").join("cli.js");
        if !adapter.is_file() {
            return Err(CommandError::DelegateMissing(adapter)).into_diagnostic();
        }

        let arguments = serde_json::to_string(input.arguments()).into_diagnostic()?;
        let options = serde_json::to_string(input.options()).into_diagnostic()?;

        tracing::debug!(descriptor = %descriptor.display(), "delegating to project runtime");

        let status = tokio::process::Command::new("node")
            .arg(&adapter)
            .arg(descriptor)
            .arg(input.environment())
            .arg(arguments)
            .arg(options)
            .current_dir(&self.working_dir)
            .status()
            .await
            .into_diagnostic()?;

        if !status.success() {
            std::process::exit(status.code().unwrap_or(1));
        }

        Ok(())
    }
}

/// Catch-all registered in the default tier.
///
/// Bound to no grammar of its own; the dispatcher routes any input that
/// matched nothing else here. Reports and succeeds — an unknown command
/// is not a crash.
#[derive(Debug, Default)]
pub struct CatchAllCommand;

#[async_trait]
impl Command for CatchAllCommand {
    fn name(&self) -> &str {
        "*"
    }

    fn description(&self) -> &str {
        "Report an unknown command"
    }

    fn arguments(&self) -> Vec<String> {
        vec!["command".to_string()]
    }

    async fn execute(
        &self,
        input: &CommandInput,
        output: &mut dyn CommandOutput,
    ) -> Result<()> {
        let requested = input.argument("command").unwrap_or_default();
        output.writeln(&format!("command not found: {requested}"));
        Ok(())
    }
}
