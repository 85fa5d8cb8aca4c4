//! Configuration section definitions.
//!
//! Each module corresponds to a section in `rsvg.toml`:
//!
//! | Module  | TOML Section      | Purpose                              |
//! |---------|-------------------|--------------------------------------|
//! | `paths` | `[paths]`         | Host output directory                |
//! | `rsvg`  | `[plugins.rsvg]`  | Rasterizer backend and conversions   |

mod paths;
mod rsvg;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use paths::PathsConfig;
pub use rsvg::{Backend, ConversionConfig, RsvgConfig};

/// Plugin-scoped settings, keyed by plugin name.
///
/// Other plugins' tables are left alone; only `rsvg` is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginsConfig {
    /// Settings for this plugin. Absent means "nothing to convert".
    pub rsvg: Option<RsvgConfig>,
}

/// Resolve a configured path against the project root, expanding `~`.
pub(crate) fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    crate::utils::path::normalize_path(&full_path)
}
