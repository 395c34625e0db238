//! Built-in CLI commands.

mod create_bundle;
mod create_controller;
mod create_project;
mod npm;
mod play;
mod wizard;

pub mod ui;

pub use create_bundle::CreateBundleCommand;
pub use create_controller::CreateControllerCommand;
pub use create_project::CreateProjectCommand;
pub use play::PlayCommand;
pub use wizard::WizardCommand;

use rondo_command::Command;
use std::sync::Arc;

/// Every command shipped with the tool, in registration order.
pub fn builtins() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(CreateProjectCommand),
        Arc::new(CreateBundleCommand),
        Arc::new(CreateControllerCommand),
        Arc::new(PlayCommand),
        Arc::new(WizardCommand),
    ]
}
