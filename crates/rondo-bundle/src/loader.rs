//! Loading and validating command descriptors.
//!
//! A descriptor file declares the command contract — invocation syntax,
//! description, argument names, options — plus the handler entry point
//! the project kernel executes. Validation stops at the first violation
//! and names the offending file: an invalid descriptor aborts startup
//! rather than being skipped, because a CLI whose command set is silently
//! incomplete is worse than one that refuses to start.

use crate::BundleError;
use rondo_command::{CommandSource, CommandUnit, OptionSpec};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw on-disk shape. Every contract element is optional here so that
/// validation can point at the specific missing piece.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDescriptor {
    command: Option<String>,
    description: Option<String>,
    arguments: Vec<String>,
    options: BTreeMap<String, (String, String)>,
    handler: Option<String>,
    #[serde(rename = "abstract")]
    is_abstract: bool,
}

/// Load a command descriptor file.
///
/// Returns `Ok(None)` for an abstract base descriptor, which exists only
/// to be extended and is never registered.
pub fn load_descriptor(path: &Path) -> Result<Option<CommandUnit>, BundleError> {
    let text = fs::read_to_string(path).map_err(|source| BundleError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: RawDescriptor = toml::from_str(&text).map_err(|source| BundleError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if raw.is_abstract {
        tracing::debug!(path = %path.display(), "skipping abstract command descriptor");
        return Ok(None);
    }

    let missing = |field| BundleError::Missing {
        path: path.to_path_buf(),
        field,
    };

    let name = raw
        .command
        .filter(|c| !c.is_empty())
        .ok_or_else(|| missing("command"))?;
    let description = raw
        .description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| missing("description"))?;
    if raw.handler.as_deref().map_or(true, str::is_empty) {
        return Err(missing("handler"));
    }

    let options = raw
        .options
        .into_iter()
        .map(|(key, (flags, help))| OptionSpec::new(key, flags, help))
        .collect();

    Ok(Some(CommandUnit {
        name,
        description,
        arguments: raw.arguments,
        options,
        source: CommandSource::Project {
            descriptor: path.to_path_buf(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn descriptor(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix("Command.toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_descriptor_becomes_a_unit() {
        let file = descriptor(
            r#"
command = "train <dataset>"
description = "Train a model from a dataset"
arguments = ["dataset"]
handler = "lib/command/train.js"

[options]
rest = ["--rest [model]", "Expose the result over REST"]
"#,
        );

        let unit = load_descriptor(file.path()).unwrap().unwrap();
        assert_eq!(unit.name, "train <dataset>");
        assert_eq!(unit.description, "Train a model from a dataset");
        assert_eq!(unit.arguments, vec!["dataset"]);
        assert_eq!(unit.options.len(), 1);
        assert_eq!(unit.options[0].key, "rest");
        assert_eq!(unit.options[0].flags, "--rest [model]");
        match &unit.source {
            CommandSource::Project { descriptor } => assert_eq!(descriptor, file.path()),
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn arguments_and_options_default_to_empty() {
        let file = descriptor(
            "command = \"play\"\ndescription = \"Run it\"\nhandler = \"lib/command/play.js\"\n",
        );

        let unit = load_descriptor(file.path()).unwrap().unwrap();
        assert!(unit.arguments.is_empty());
        assert!(unit.options.is_empty());
    }

    #[test]
    fn abstract_descriptors_are_skipped_silently() {
        let file = descriptor("abstract = true\n");
        assert!(load_descriptor(file.path()).unwrap().is_none());
    }

    #[test]
    fn missing_command_is_the_first_failure() {
        let file = descriptor("description = \"No name\"\n");
        let err = load_descriptor(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`command`"));
        assert!(message.contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_description_is_reported_after_command() {
        let file = descriptor("command = \"train\"\n");
        let err = load_descriptor(file.path()).unwrap_err();
        assert!(err.to_string().contains("`description`"));
    }

    #[test]
    fn missing_handler_is_reported_last() {
        let file = descriptor("command = \"train\"\ndescription = \"Train\"\n");
        let err = load_descriptor(file.path()).unwrap_err();
        assert!(err.to_string().contains("`handler`"));
    }

    #[test]
    fn empty_strings_fail_validation() {
        let file = descriptor("command = \"\"\ndescription = \"x\"\nhandler = \"y\"\n");
        let err = load_descriptor(file.path()).unwrap_err();
        assert!(err.to_string().contains("`command`"));
    }
}
