//! `[paths]` section configuration.
//!
//! Mirrors the host build tool's path settings that the plugin reads.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! public = "public"   # Base directory for generated outputs
//! ```

use crate::config::FieldPath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Host path settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Public output directory. Relative output paths are joined under it.
    pub public: PathBuf,
}

pub struct PathsConfigFields {
    pub public: FieldPath,
}

impl PathsConfig {
    pub const FIELDS: PathsConfigFields = PathsConfigFields {
        public: FieldPath::new("paths.public"),
    };
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            public: PathBuf::from("public"),
        }
    }
}
