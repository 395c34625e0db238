//! The invocation context handed to command behavior.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parsed value of a declared option.
///
/// `Absent` means the flag was not supplied at all; no default is
/// injected on behalf of the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Absent,

    /// Flag supplied without a value.
    Set,

    /// Flag supplied with a value.
    Value(String),
}

impl OptionValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, OptionValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl Serialize for OptionValue {
    /// Encoding used on the delegate handshake: `Absent` becomes `null`,
    /// `Set` becomes `true`, `Value` the string itself.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Absent => serializer.serialize_none(),
            OptionValue::Set => serializer.serialize_bool(true),
            OptionValue::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// Immutable snapshot of one parsed invocation.
///
/// Arguments are keyed by the names the matched unit declared, options by
/// the declared option keys, and only declared keys are present. The
/// environment label and working directory are captured once at process
/// start.
#[derive(Debug, Clone)]
pub struct CommandInput {
    arguments: BTreeMap<String, Option<String>>,
    options: BTreeMap<String, OptionValue>,
    environment: String,
    working_dir: PathBuf,
}

impl CommandInput {
    pub fn new(
        arguments: BTreeMap<String, Option<String>>,
        options: BTreeMap<String, OptionValue>,
        environment: impl Into<String>,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            arguments,
            options,
            environment: environment.into(),
            working_dir,
        }
    }

    /// Value of a declared positional argument, if one was captured.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(|value| value.as_deref())
    }

    /// Value of a declared option; `Absent` for undeclared keys.
    pub fn option(&self, key: &str) -> &OptionValue {
        self.options.get(key).unwrap_or(&OptionValue::Absent)
    }

    pub fn arguments(&self) -> &BTreeMap<String, Option<String>> {
        &self.arguments
    }

    pub fn options(&self) -> &BTreeMap<String, OptionValue> {
        &self.options
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// Sink for human-facing command output.
pub trait CommandOutput: Send {
    fn writeln(&mut self, line: &str);
}

/// Writes command output straight to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl CommandOutput for ConsoleOutput {
    fn writeln(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects command output in memory, for assertions.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    lines: Vec<String>,
}

impl MemoryOutput {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl CommandOutput for MemoryOutput {
    fn writeln(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
