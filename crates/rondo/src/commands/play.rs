//! Watch-mode runner command.

use crate::commands::{npm, ui};
use async_trait::async_trait;
use miette::Result;
use rondo_command::{Command, CommandInput, CommandOutput};
use rondo_diagnostics::RondoError;

/// Run the current application in watch mode.
///
/// A thin proxy to the `watch` script in the project's package.json;
/// output is relayed until the child exits.
///
/// `$ rondo play`
pub struct PlayCommand;

#[async_trait]
impl Command for PlayCommand {
    fn name(&self) -> &str {
        "play"
    }

    fn description(&self) -> &str {
        "Run the application HTTP context in watch mode"
    }

    async fn execute(&self, input: &CommandInput, output: &mut dyn CommandOutput) -> Result<()> {
        let cwd = input.working_dir();
        if !rondo_bundle::is_project_root(cwd) {
            return Err(RondoError::NotAProject.into());
        }

        ui::info("Starting watch mode");
        let status = npm::run(&["run", "watch"], cwd, output).await?;
        output.writeln(&format!(
            "watch process exited with code {}",
            status.code().unwrap_or(1)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondo_command::MemoryOutput;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn requires_a_project() {
        let dir = tempfile::tempdir().unwrap();
        let input = CommandInput::new(
            BTreeMap::new(),
            BTreeMap::new(),
            "development",
            dir.path().to_path_buf(),
        );
        let mut output = MemoryOutput::default();

        let err = PlayCommand.execute(&input, &mut output).await.unwrap_err();
        assert!(err.to_string().contains("not inside"));
    }
}
