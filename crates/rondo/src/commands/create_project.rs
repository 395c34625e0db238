//! Project scaffolding command.

use crate::commands::{npm, ui};
use crate::scaffold;
use async_trait::async_trait;
use miette::{IntoDiagnostic, Result};
use rondo_command::{Command, CommandInput, CommandOutput, OptionSpec};
use rondo_diagnostics::RondoError;
use std::fs;

/// Generate a new rondo project and install its dependencies.
///
/// `$ rondo create:project myproject`
pub struct CreateProjectCommand;

#[async_trait]
impl Command for CreateProjectCommand {
    fn name(&self) -> &str {
        "create:project <name>"
    }

    fn description(&self) -> &str {
        "Create a new rondo project"
    }

    fn arguments(&self) -> Vec<String> {
        vec!["name".to_string()]
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::new(
            "skip-install",
            "--skip-install",
            "Skip installing package dependencies",
        )]
    }

    async fn execute(&self, input: &CommandInput, output: &mut dyn CommandOutput) -> Result<()> {
        let name = input.argument("name").unwrap_or_default();
        let cwd = input.working_dir();
        let project_dir = cwd.join(name);

        if rondo_bundle::is_project_root(cwd) {
            return Err(RondoError::AlreadyAProject.into());
        }
        if project_dir.exists() {
            return Err(RondoError::target_exists(&project_dir).into());
        }

        output.writeln("----------------------------------------------");
        output.writeln(&format!("Generating project: {name}"));
        output.writeln(&format!("Target: {}", project_dir.display()));
        output.writeln("----------------------------------------------");

        output.writeln("Step 1/3: creating project directory");
        scaffold::write_project(&project_dir, name).into_diagnostic()?;

        output.writeln("Step 2/3: copying default parameters");
        let config_dir = project_dir.join("app").join("config");
        fs::copy(
            config_dir.join("parameters.toml.dist"),
            config_dir.join("parameters.toml"),
        )
        .into_diagnostic()?;

        if input.option("skip-install").is_present() {
            output.writeln("Step 3/3: skipping dependency install");
        } else {
            output.writeln("Step 3/3: installing package dependencies");
            let status = npm::run(&["install"], &project_dir, output).await?;
            if !status.success() {
                return Err(miette::miette!(
                    "npm install exited with code {}",
                    status.code().unwrap_or(1)
                ));
            }
        }

        ui::success(format!("Created project {name}"));
        Ok(())
    }
}
