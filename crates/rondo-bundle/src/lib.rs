//! Bundle command discovery for the rondo CLI.
//!
//! A project contributes commands through its bundles: each bundle may
//! ship `lib/command/*Command.toml` descriptor files, resolved first from
//! the installed dependency layout and then from the project source tree.
//! This crate locates those descriptors, validates them against the
//! command contract, and registers them in the project tier.

mod loader;
mod resolver;

pub use loader::load_descriptor;
pub use resolver::{find_command_paths, is_project_root, FRAMEWORK_BUNDLE, PROJECT_MARKER};

use rondo_command::{Registry, Tier};
use rondo_config::ProjectConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("failed to read command file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid command descriptor", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Contract violation: a required descriptor element is absent.
    #[error("{} is missing `{field}`", .path.display())]
    Missing { path: PathBuf, field: &'static str },

    #[error(transparent)]
    Config(#[from] rondo_config::ConfigError),
}

/// Register every command contributed by the current project's bundles.
///
/// Without the project marker at `project_root` this is a no-op: no
/// configuration or bundle directory is touched. The bundle list is the
/// configured base list plus the active environment's overlay, with the
/// framework bundle appended unconditionally at the end. A descriptor
/// validation failure is fatal to the caller.
pub fn register_project_commands(
    registry: &mut Registry,
    project_root: &Path,
    environment: &str,
) -> Result<(), BundleError> {
    if !is_project_root(project_root) {
        return Ok(());
    }

    let config = ProjectConfig::load(project_root)?;
    let mut bundles = config.bundles(environment);
    bundles.push(FRAMEWORK_BUNDLE.to_string());

    tracing::debug!(?bundles, "registering project commands");

    for path in find_command_paths(project_root, &bundles) {
        if let Some(unit) = load_descriptor(&path)? {
            registry.register(unit, Tier::Project);
        }
    }

    Ok(())
}
