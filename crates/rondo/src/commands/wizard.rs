//! Welcome banner command.

use crate::commands::ui;
use async_trait::async_trait;
use console::style;
use miette::Result;
use rondo_command::{Command, CommandInput, CommandOutput};

const BANNER: &str = r"
██████╗  ██████╗ ███╗   ██╗██████╗  ██████╗
██╔══██╗██╔═══██╗████╗  ██║██╔══██╗██╔═══██╗
██████╔╝██║   ██║██╔██╗ ██║██║  ██║██║   ██║
██╔══██╗██║   ██║██║╚██╗██║██║  ██║██║   ██║
██║  ██║╚██████╔╝██║ ╚████║██████╔╝╚██████╔╝
╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═══╝╚═════╝  ╚═════╝
";

/// Print the welcome screen.
pub struct WizardCommand;

#[async_trait]
impl Command for WizardCommand {
    fn name(&self) -> &str {
        "wizard"
    }

    fn description(&self) -> &str {
        "Show the welcome screen"
    }

    async fn execute(&self, _input: &CommandInput, _output: &mut dyn CommandOutput) -> Result<()> {
        println!("{}", style(BANNER).green());
        println!("{}", style("Welcome to rondo").bold());
        println!();
        println!(
            "Run {} to list the available commands.",
            ui::name("rondo --help")
        );
        Ok(())
    }
}
