//! Svn command runner for svndiff.
//!
//! Provides a safe wrapper around svn commands with captured stdout/stderr
//! and structured error handling. All svn invocations go through this module.

use crate::diff::InfoLookup;
use crate::error::{Result, SvnDiffError};
use std::collections::HashMap;
use std::process::{Command, Output};

/// Result of a successful svn command execution.
#[derive(Debug, Clone)]
pub struct SvnOutput {
    /// Raw standard output from the command.
    ///
    /// Deliberately untrimmed: diff text is byte-sensitive and must keep
    /// its trailing newline.
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl SvnOutput {
    /// Create a new SvnOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Client for the svn binary.
///
/// The binary name comes from config so a wrapper script or an alternate
/// install location can be used. With `debug` set, each executed command
/// line is echoed to stderr.
#[derive(Debug, Clone)]
pub struct SvnClient {
    binary: String,
    debug: bool,
}

impl SvnClient {
    /// Create a client for the given svn binary.
    pub fn new(binary: impl Into<String>, debug: bool) -> Self {
        Self {
            binary: binary.into(),
            debug,
        }
    }

    fn echo_command(&self, args: &[&str]) {
        if self.debug {
            eprintln!(">>> {} {}", self.binary, args.join(" "));
        }
    }

    /// Run an svn command, failing on non-zero exit.
    ///
    /// # Arguments
    ///
    /// * `args` - The svn command arguments (without the binary name)
    ///
    /// # Returns
    ///
    /// * `Ok(SvnOutput)` - On successful execution (exit code 0)
    /// * `Err(SvnDiffError::SvnError)` - On spawn failure or non-zero exit
    pub fn run(&self, args: &[&str]) -> Result<SvnOutput> {
        self.echo_command(args);

        let output = Command::new(&self.binary).args(args).output().map_err(|e| {
            SvnDiffError::SvnError(format!(
                "failed to execute {} {}: {} (is svn installed?)",
                self.binary,
                args.first().unwrap_or(&""),
                e
            ))
        })?;

        let svn_output = SvnOutput::from_output(&output);

        if output.status.success() {
            Ok(svn_output)
        } else {
            let exit_code = output.status.code().unwrap_or(-1);
            let error_msg = if svn_output.stderr.is_empty() {
                svn_output.stdout.trim().to_string()
            } else {
                svn_output.stderr.clone()
            };

            Err(SvnDiffError::SvnError(format!(
                "{} {} failed (exit code {}): {}",
                self.binary,
                args.first().unwrap_or(&""),
                exit_code,
                error_msg
            )))
        }
    }

    /// Run an svn command, tolerating failure.
    ///
    /// Returns `None` when the command cannot be spawned or exits non-zero.
    /// This is the lookup-miss channel: `svn info` on an unversioned path
    /// exits non-zero rather than producing empty output, and the pipeline
    /// must treat that as "no metadata", never as a fatal error.
    pub fn run_tolerant(&self, args: &[&str]) -> Option<SvnOutput> {
        self.echo_command(args);

        let output = Command::new(&self.binary).args(args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        Some(SvnOutput::from_output(&output))
    }

    /// Raw `svn info` text for the working copy or an explicit URL.
    ///
    /// `--non-interactive` keeps the command from hanging on a credential
    /// prompt when pointed at an https repository path.
    pub fn info_text(&self, url: Option<&str>) -> Result<String> {
        let mut args = vec!["info"];
        if let Some(url) = url {
            args.push(url);
        }
        args.push("--non-interactive");

        Ok(self.run(&args)?.stdout)
    }

    /// True when any file has history scheduled with commit.
    ///
    /// `svn diff` silently flattens such files unless told otherwise, so
    /// callers gate on this before diffing a working copy.
    pub fn has_scheduled_history(&self) -> Result<bool> {
        let output = self.run(&["st"])?;
        Ok(status_has_scheduled_history(output.stdout.lines()))
    }

    /// Run `svn diff` with the given arguments, returning raw diff text.
    pub fn diff(&self, args: &[String]) -> Result<String> {
        let mut full: Vec<&str> = vec!["diff"];
        full.extend(args.iter().map(String::as_str));

        Ok(self.run(&full)?.stdout)
    }
}

impl InfoLookup for SvnClient {
    fn path_info(&self, path: &str) -> Option<HashMap<String, String>> {
        let output = self.run_tolerant(&["info", path])?;
        Some(parse_info_output(&output.stdout))
    }
}

/// Parse `svn info` output into a key/value map.
///
/// Each line is split on the first `": "`; lines without that separator
/// are ignored.
pub fn parse_info_output(text: &str) -> HashMap<String, String> {
    let mut info = HashMap::new();

    for line in text.lines() {
        if let Some((key, value)) = line.trim().split_once(": ") {
            info.insert(key.to_string(), value.to_string());
        }
    }

    info
}

/// Detect history scheduled with commit in `svn st` output.
///
/// The status line for a copied-with-history addition is `A  +  <path>`;
/// the `+` in the fourth column is the marker.
pub fn status_has_scheduled_history<'a>(lines: impl IntoIterator<Item = &'a str>) -> bool {
    lines.into_iter().any(|line| line.starts_with("A  +"))
}
