//! Configuration errors and validation findings.
//!
//! Loading fails with [`ConfigError`]. Validation never fails on its own:
//! it collects [`ConfigDiagnostic`]s, and the caller decides whether errors
//! are fatal (`check`) or only reported (`build`).

use super::FieldPath;
use owo_colors::{OwoColorize, Stream};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why `rsvg.toml` could not be loaded or accepted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse config")]
    Toml(#[from] toml::de::Error),

    // no #[from]: the diagnostics already print every finding
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The setting cannot work as written.
    Error,
    /// Usable, but probably not what was meant.
    Warning,
}

/// One finding about a configured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub field: FieldPath,
    /// Position in `conversions` when the finding is about one conversion.
    pub conversion: Option<usize>,
    pub message: String,
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    /// Attach the index of the conversion this finding is about.
    pub fn at(&mut self, conversion: usize) -> &mut Self {
        self.conversion = Some(conversion);
        self
    }

    pub fn hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hint = Some(hint.into());
        self
    }

    /// `plugins.rsvg.conversions[1]`, or the bare field path.
    pub fn location(&self) -> String {
        match self.conversion {
            Some(index) => format!("{}[{index}]", self.field.as_str()),
            None => self.field.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "{}: {}",
            location.if_supports_color(Stream::Stderr, |l| l.cyan()),
            self.message
        )?;
        if let Some(hint) = &self.hint {
            write!(
                f,
                " ({} {hint})",
                "hint:".if_supports_color(Stream::Stderr, |h| h.yellow())
            )?;
        }
        Ok(())
    }
}

/// Findings collected by one validation pass, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) -> &mut ConfigDiagnostic {
        self.push(Severity::Error, field, message.into())
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) -> &mut ConfigDiagnostic {
        self.push(Severity::Warning, field, message.into())
    }

    fn push(&mut self, severity: Severity, field: FieldPath, message: String) -> &mut ConfigDiagnostic {
        self.items.push(ConfigDiagnostic {
            severity,
            field,
            conversion: None,
            message,
            hint: None,
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.of(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.of(Severity::Warning)
    }

    fn of(&self, severity: Severity) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.items.iter().filter(move |d| d.severity == severity)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Log warnings only.
    pub fn report_warnings(&self) {
        for warning in self.warnings() {
            crate::log!("warning"; "{}", warning);
        }
    }

    /// Log every finding, errors included.
    pub fn report(&self) {
        for item in &self.items {
            match item.severity {
                Severity::Error => crate::log!("error"; "{}", item),
                Severity::Warning => crate::log!("warning"; "{}", item),
            }
        }
    }

    /// `Err(self)` when any finding is an error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors().count();
        write!(
            f,
            "{}",
            format!("invalid config ({count} error{})", crate::utils::plural_s(count))
                .if_supports_color(Stream::Stderr, |t| t.red())
        )?;
        for error in self.errors() {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
