use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Write a catalog document into a fresh temp dir and return both so the dir
/// outlives the test body.
pub fn write_catalog(value: &Value) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new().context("failed to allocate catalog dir")?;
    let path = dir.path().join("tools.json");
    fs::write(&path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok((dir, path))
}

/// Run a command that is expected to succeed, surfacing its streams on failure.
pub fn run_ok(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {cmd:?}"))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn related_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_related"))
}

pub fn render_panel_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_render-panel"))
}

pub fn render_index_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_render-index"))
}

pub fn json_fmt_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_json-fmt"))
}

pub fn catalog_lint_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_catalog-lint"))
}

pub fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
