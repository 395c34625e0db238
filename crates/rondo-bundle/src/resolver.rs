//! Locating bundle command directories on disk.

use std::path::{Path, PathBuf};

/// Marker file identifying a rondo project root.
pub const PROJECT_MARKER: &str = ".rondo";

/// The core framework bundle, appended to every project's bundle list.
pub const FRAMEWORK_BUNDLE: &str = "@rondo/framework";

/// Whether the given directory is the root of a rondo project.
pub fn is_project_root(path: &Path) -> bool {
    path.join(PROJECT_MARKER).exists()
}

/// Resolve the command descriptor paths contributed by the given bundles.
///
/// For each identifier, in order, the installed layout
/// (`node_modules/<bundle>/lib/command`) is probed before the source
/// layout (`src/<bundle>/lib/command`); the first existing directory is
/// enumerated for `*Command.toml` files, without recursing into
/// subdirectories. An identifier with neither layout contributes nothing.
pub fn find_command_paths(project_root: &Path, bundles: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for bundle in bundles {
        let Some(dir) = command_dir(project_root, bundle) else {
            tracing::debug!(bundle = %bundle, "no command directory");
            continue;
        };

        let pattern = dir.join("*Command.toml");
        match glob::glob(&pattern.to_string_lossy()) {
            Ok(entries) => paths.extend(entries.flatten()),
            Err(e) => tracing::warn!(bundle = %bundle, "skipping unreadable command directory: {e}"),
        }
    }

    paths
}

fn command_dir(project_root: &Path, bundle: &str) -> Option<PathBuf> {
    let installed = project_root
        .join("node_modules")
        .join(bundle)
        .join("lib")
        .join("command");
    if installed.is_dir() {
        return Some(installed);
    }

    let source = project_root.join("src").join(bundle).join("lib").join("command");
    source.is_dir().then_some(source)
}
