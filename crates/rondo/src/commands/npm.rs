//! Spawning the package manager and relaying its output.

use miette::{IntoDiagnostic, Result};
use rondo_command::CommandOutput;
use rondo_diagnostics::RondoError;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run an npm invocation in `dir`, relaying stdout and stderr line by
/// line, and return its exit status.
pub async fn run(args: &[&str], dir: &Path, output: &mut dyn CommandOutput) -> Result<ExitStatus> {
    let npm = which::which("npm").map_err(|_| RondoError::tool_missing("npm"))?;

    let mut child = tokio::process::Command::new(npm)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .into_diagnostic()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| miette::miette!("npm stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| miette::miette!("npm stderr was not captured"))?;

    let mut out_lines = BufReader::new(stdout).lines();
    let mut err_lines = BufReader::new(stderr).lines();
    let mut out_done = false;
    let mut err_done = false;

    while !(out_done && err_done) {
        tokio::select! {
            line = out_lines.next_line(), if !out_done => match line.into_diagnostic()? {
                Some(line) => output.writeln(&line),
                None => out_done = true,
            },
            line = err_lines.next_line(), if !err_done => match line.into_diagnostic()? {
                Some(line) => output.writeln(&line),
                None => err_done = true,
            },
        }
    }

    child.wait().await.into_diagnostic()
}
