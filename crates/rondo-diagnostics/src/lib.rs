//! User-facing error diagnostics for the rondo CLI.
//!
//! Uses miette for rich error output with suggestions.

pub use miette::{Diagnostic, Report, Result};
use std::path::PathBuf;
use thiserror::Error;

/// A CLI-facing error with rich diagnostics.
#[derive(Error, Diagnostic, Debug)]
pub enum RondoError {
    #[error("not inside a rondo project")]
    #[diagnostic(
        code(rondo::project::missing_marker),
        help("run this from a project root (the directory containing `.rondo`), or create a project first with `rondo create:project <name>`")
    )]
    NotAProject,

    #[error("already inside a rondo project")]
    #[diagnostic(
        code(rondo::project::nested),
        help("projects cannot be created inside an existing project")
    )]
    AlreadyAProject,

    #[error("target path already exists: {}", .path.display())]
    #[diagnostic(
        code(rondo::scaffold::target_exists),
        help("pick another name or remove the existing path")
    )]
    TargetExists { path: PathBuf },

    #[error("bundle `{name}` does not exist at {}", .path.display())]
    #[diagnostic(
        code(rondo::scaffold::bundle_missing),
        help("create it first with `rondo create:bundle {name}`")
    )]
    BundleMissing { name: String, path: PathBuf },

    #[error("`{tool}` was not found on PATH")]
    #[diagnostic(
        code(rondo::platform::tool_missing),
        help("install {tool} and try again")
    )]
    ToolMissing { tool: String },
}

impl RondoError {
    pub fn target_exists(path: impl Into<PathBuf>) -> Self {
        Self::TargetExists { path: path.into() }
    }

    pub fn bundle_missing(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::BundleMissing {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn tool_missing(tool: impl Into<String>) -> Self {
        Self::ToolMissing { tool: tool.into() }
    }
}

/// Install the miette hook for pretty terminal reports.
pub fn setup() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();
}
