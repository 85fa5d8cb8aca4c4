//! Output settings and their normalization.
//!
//! Three layers of settings are merged field by field, highest first:
//!
//! ```text
//! output fields  >  conversion defaults  >  global defaults (format = "png")
//! ```
//!
//! After merging, a missing dimension mirrors the other one and the path is
//! rooted under the public directory and templated.

use super::template::expand_template;
use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw output settings as written in configuration. Every field is optional
/// so the same type serves as an output and as a defaults layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Raster format: `png`, `jpeg`/`jpg`, `webp` (builtin backend).
    pub format: Option<String>,
    /// Output width in pixels.
    pub width: Option<i64>,
    /// Output height in pixels.
    pub height: Option<i64>,
    /// Output path template, e.g. `icons/logo-{w}x{h}.{f}`.
    pub path: Option<String>,
    /// Export only the element with this id.
    pub id: Option<String>,
}

impl OutputSpec {
    /// Global defaults applied beneath every other layer.
    pub fn global() -> Self {
        Self {
            format: Some("png".to_string()),
            ..Self::default()
        }
    }

    /// Fill every unset field from `lower`.
    pub fn merge(self, lower: &OutputSpec) -> Self {
        Self {
            format: self.format.or_else(|| lower.format.clone()),
            width: self.width.or(lower.width),
            height: self.height.or(lower.height),
            path: self.path.or_else(|| lower.path.clone()),
            id: self.id.or_else(|| lower.id.clone()),
        }
    }
}

/// Fully resolved output.
///
/// `width` and `height` are either both set or both unset; the renderer
/// rejects the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub format: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub path: PathBuf,
    pub id: Option<String>,
}

/// Resolves raw outputs of one conversion.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    base_dir: &'a Path,
    defaults: OutputSpec,
}

impl<'a> Normalizer<'a> {
    /// `defaults` are the conversion's own defaults, `global` sits beneath them.
    pub fn new(base_dir: &'a Path, global: &OutputSpec, defaults: &OutputSpec) -> Self {
        Self {
            base_dir,
            defaults: defaults.clone().merge(global),
        }
    }

    /// Merge, mirror dimensions, root and template the path.
    pub fn normalize(&self, raw: &OutputSpec) -> Result<Output, ConvertError> {
        let merged = raw.clone().merge(&self.defaults);

        let (width, height) = match (merged.width, merged.height) {
            (None, height) => (height, height),
            (width, None) => (width, width),
            (width, height) => (width, height),
        };

        let template = merged.path.ok_or(ConvertError::MissingPath)?;

        let mut output = Output {
            format: merged.format.unwrap_or_default(),
            width,
            height,
            path: PathBuf::new(),
            id: merged.id,
        };
        // only the configured template is expanded, never `base_dir`
        output.path = root_path(self.base_dir, &expand_template(&template, &output));
        Ok(output)
    }
}

/// Join a relative path under `base_dir`; rooted paths pass through.
fn root_path(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.has_root() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
