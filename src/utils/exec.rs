//! External command execution utilities.
//!
//! Provides a Builder-based API for running rasterizer programs on the
//! tokio runtime, capturing binary stdout.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let output = Cmd::new("rsvg-convert")
//!     .args(["--format", "png", "--width", "64"])
//!     .arg(input)
//!     .run()
//!     .await?;
//! let png = output.stdout;
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    process::{Output, Stdio},
};
use tokio::process::Command;

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command and return its output.
    ///
    /// Fails if the program cannot be spawned or exits unsuccessfully.
    pub async fn run(self) -> Result<Output> {
        let name = self.program_name();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to execute `{name}`"))?;

        if !output.status.success() {
            anyhow::bail!(format_error(&name, &output));
        }

        Ok(output)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Format error message for failed command.
///
/// Stdout carries image bytes, so only stderr is included.
fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut msg = format!("Command `{name}` failed with {}", output.status);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        msg.push('\n');
        msg.push_str(stderr);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================
