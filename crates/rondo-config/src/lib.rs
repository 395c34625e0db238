//! Project configuration loading for the rondo CLI.
//!
//! The CLI consumes exactly two keys of a project's
//! `app/config/config.toml`: the base bundle list (`bundles.all`) and the
//! optional per-environment overlay (`bundles.<environment>`), which is
//! concatenated after the base list when the active environment matches.
//! Everything else in the document belongs to the project runtime and is
//! ignored here.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the configuration document, relative to the project root.
pub const CONFIG_PATH: &[&str] = &["app", "config", "config.toml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The `[bundles]` section.
#[derive(Debug, Clone, Default, Deserialize)]
struct BundleSection {
    /// Bundles active in every environment, in load order.
    #[serde(default)]
    all: Vec<String>,

    /// Additional bundles keyed by environment name.
    #[serde(flatten)]
    environments: BTreeMap<String, Vec<String>>,
}

/// A loaded project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    bundles: BundleSection,
}

impl ProjectConfig {
    /// Load the configuration document of a project root.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let mut path = project_root.to_path_buf();
        for part in CONFIG_PATH {
            path.push(part);
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// The ordered bundle list for an environment: the base list plus the
    /// environment overlay, when one is configured.
    pub fn bundles(&self, environment: &str) -> Vec<String> {
        let mut bundles = self.bundles.all.clone();
        if let Some(extra) = self.bundles.environments.get(environment) {
            bundles.extend(extra.iter().cloned());
        }
        bundles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> ProjectConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn base_list_only() {
        let config = config("[bundles]\nall = [\"auth\", \"mailer\"]\n");
        assert_eq!(config.bundles("development"), vec!["auth", "mailer"]);
    }

    #[test]
    fn environment_overlay_appends_in_order() {
        let config = config(
            "[bundles]\nall = [\"auth\"]\nproduction = [\"metrics\"]\n",
        );
        assert_eq!(config.bundles("production"), vec!["auth", "metrics"]);
    }

    #[test]
    fn unknown_environment_contributes_nothing() {
        let config = config(
            "[bundles]\nall = [\"auth\"]\nproduction = [\"metrics\"]\n",
        );
        assert_eq!(config.bundles("staging"), vec!["auth"]);
    }

    #[test]
    fn missing_bundle_section_is_empty() {
        let config = config("");
        assert!(config.bundles("development").is_empty());
    }

    #[test]
    fn load_reads_the_well_known_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("app").join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[bundles]\nall = [\"demo-bundle\"]\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config.bundles("development"), vec!["demo-bundle"]);
    }

    #[test]
    fn load_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
