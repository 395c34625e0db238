//! Bundle scaffolding command.

use crate::commands::ui;
use crate::scaffold;
use async_trait::async_trait;
use miette::{IntoDiagnostic, Result};
use rondo_command::{Command, CommandInput, CommandOutput};
use rondo_diagnostics::RondoError;

/// Create a new bundle in the current project.
///
/// `$ rondo create:bundle hello`
pub struct CreateBundleCommand;

#[async_trait]
impl Command for CreateBundleCommand {
    fn name(&self) -> &str {
        "create:bundle <name>"
    }

    fn description(&self) -> &str {
        "Create a new bundle in the current project"
    }

    fn arguments(&self) -> Vec<String> {
        vec!["name".to_string()]
    }

    async fn execute(&self, input: &CommandInput, output: &mut dyn CommandOutput) -> Result<()> {
        let name = input.argument("name").unwrap_or_default();
        let cwd = input.working_dir();
        let bundle_dir = cwd.join("src").join(name);

        if !rondo_bundle::is_project_root(cwd) {
            return Err(RondoError::NotAProject.into());
        }
        if bundle_dir.exists() {
            return Err(RondoError::target_exists(&bundle_dir).into());
        }

        output.writeln("----------------------------------------------");
        output.writeln(&format!("Creating bundle: {name}"));
        output.writeln(&format!("Target: {}", bundle_dir.display()));
        output.writeln("----------------------------------------------");

        scaffold::write_bundle(&bundle_dir, name).into_diagnostic()?;

        output.writeln(&format!(
            "Finished creating bundle! Remember to add \"{name}\" to the bundles list in app/config/config.toml"
        ));
        ui::success(format!("Created bundle {name}"));
        Ok(())
    }
}
