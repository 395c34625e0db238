//! rondo - command line tools for the rondo web framework.

use miette::{IntoDiagnostic, Result, WrapErr};
use rondo_command::{CatchAllCommand, CommandUnit, Dispatcher, Registry, Tier};
use std::sync::Arc;

mod commands;
mod scaffold;

#[tokio::main]
async fn main() -> Result<()> {
    rondo_diagnostics::setup();

    // The environment token is consumed before the parser ever runs.
    let mut argv: Vec<String> = std::env::args().collect();
    let environment = rondo_command::extract_environment(&mut argv);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .with_env_var("RONDO_LOG")
                .from_env_lossy(),
        )
        .with_target(false)
        .init();

    let working_dir = std::env::current_dir().into_diagnostic()?;

    // Builtin, then project bundles, then the catch-all: the default tier
    // only ever sees input nothing else matched.
    let mut registry = Registry::new();
    for command in commands::builtins() {
        registry.register(CommandUnit::from_command(command), Tier::Builtin);
    }
    rondo_bundle::register_project_commands(&mut registry, &working_dir, &environment)
        .into_diagnostic()
        .wrap_err("unable to register project commands")?;
    registry.register(
        CommandUnit::from_command(Arc::new(CatchAllCommand)),
        Tier::Default,
    );

    let dispatcher = Dispatcher::new(registry, environment, working_dir);
    dispatcher.run(argv, env!("CARGO_PKG_VERSION")).await
}
