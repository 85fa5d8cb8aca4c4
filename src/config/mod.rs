//! Host configuration management for `rsvg.toml`.
//!
//! The file mirrors the host build tool's merged configuration object:
//! the plugin only reads `[paths]` and its own `[plugins.rsvg]` table.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths]
//! │   └── rsvg       # [plugins.rsvg]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # HostConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

pub use util::{find_config_file, find_config_file_from};

pub use section::{Backend, ConversionConfig, PathsConfig, PluginsConfig, RsvgConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, Severity};

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing rsvg.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Host paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Plugin-scoped settings
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl HostConfig {
    /// Load configuration by searching upward from cwd for `config_name`.
    ///
    /// The project root is the config file's parent directory.
    pub fn load(config_name: &Path) -> Result<Self> {
        let config_path = find_config_file(config_name).with_context(|| {
            format!("Config file '{}' not found", config_name.display())
        })?;
        Self::from_path(&config_path)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Unknown fields are reported once and otherwise ignored.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = crate::utils::path::normalize_path(path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.finalize(&root);
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Set the root directory and resolve every configured path against it.
    pub fn finalize(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.paths.public = section::resolve_config_path(&self.paths.public, &root);
        if let Some(rsvg) = self.plugins.rsvg.as_mut() {
            rsvg.normalize(&root);
        }
        self.root = root;
    }

    /// Base directory for relative output paths.
    pub fn public_dir(&self) -> &Path {
        &self.paths.public
    }

    /// Override the public directory (resolved against the root).
    pub fn set_public_dir(&mut self, dir: &Path) {
        self.paths.public = section::resolve_config_path(dir, &self.root);
    }

    /// Plugin settings, if the `[plugins.rsvg]` table is present.
    pub fn rsvg(&self) -> Option<&RsvgConfig> {
        self.plugins.rsvg.as_ref()
    }

    /// Plugin settings, creating an empty table when absent.
    pub fn rsvg_mut(&mut self) -> &mut RsvgConfig {
        self.plugins.rsvg.get_or_insert_with(RsvgConfig::default)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    /// Warnings are printed but never fail.
    pub fn validate(&self) -> Result<()> {
        let diag = self.diagnose();
        diag.report_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Collect diagnostics without printing.
    pub fn diagnose(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        if self.paths.public.as_os_str().is_empty() {
            diag.error(PathsConfig::FIELDS.public, "public directory is empty");
        }

        if let Some(rsvg) = self.rsvg() {
            rsvg.validate(&mut diag);
        }

        diag
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> HostConfig {
    let (parsed, ignored) = HostConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
