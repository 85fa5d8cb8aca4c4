//! `[plugins.rsvg]` section configuration.
//!
//! SVG conversion settings: which rasterizer to use and the list of
//! conversions to run after every build.
//!
//! # Example
//!
//! ```toml
//! [plugins.rsvg]
//! backend = "builtin"        # Rasterizer: builtin | rsvg | magick
//! # program = "rsvg-convert" # Program name or path for external backends
//!
//! [[plugins.rsvg.conversions]]
//! input = "app/assets/logo.svg"
//!
//! [plugins.rsvg.conversions.defaults]
//! path = "icons/logo-{w}x{h}.{f}"
//!
//! [[plugins.rsvg.conversions.outputs]]
//! width = 32
//!
//! [[plugins.rsvg.conversions.outputs]]
//! width = 512
//! format = "webp"
//! ```
//!
//! # Resolution
//!
//! Every output field is looked up in the output itself, then in the
//! conversion's `defaults`, then in the global defaults (`format = "png"`).
//!
//! # Backend availability
//!
//! `builtin` is compiled in and therefore always available. `rsvg` and
//! `magick` depend on a program installed on the system; when it is missing
//! the plugin warns once at startup and skips every conversion. Pick an
//! external backend to get librsvg or ImageMagick output, at the cost of
//! that runtime dependency.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::convert::OutputSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rasterizer backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Use built-in Rust libraries (resvg).
    #[default]
    Builtin,
    /// Use librsvg's `rsvg-convert` command.
    Rsvg,
    /// Use ImageMagick (`magick` command).
    Magick,
}

impl Backend {
    /// Default program name for external backends.
    pub fn default_program(&self) -> Option<&'static str> {
        match self {
            Self::Builtin => None,
            Self::Rsvg => Some("rsvg-convert"),
            Self::Magick => Some("magick"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Rsvg => "rsvg",
            Self::Magick => "magick",
        }
    }
}

/// One input SVG and the raster outputs generated from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Source SVG file (relative to the config file's directory).
    pub input: PathBuf,

    /// Per-conversion defaults shared by every output.
    pub defaults: OutputSpec,

    /// Requested outputs, rendered concurrently.
    pub outputs: Vec<OutputSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsvgConfig {
    /// Rasterizer used for every conversion.
    pub backend: Backend,

    /// Program name or path for external backends.
    /// Defaults to `rsvg-convert` or `magick`.
    pub program: Option<String>,

    /// Conversions to run after each build.
    pub conversions: Vec<ConversionConfig>,
}

pub struct RsvgConfigFields {
    pub program: FieldPath,
    pub conversions: FieldPath,
}

impl RsvgConfig {
    pub const FIELDS: RsvgConfigFields = RsvgConfigFields {
        program: FieldPath::new("plugins.rsvg.program"),
        conversions: FieldPath::new("plugins.rsvg.conversions"),
    };

    /// Program probed for the configured backend, if it is external.
    pub fn program(&self) -> Option<&str> {
        self.program
            .as_deref()
            .or_else(|| self.backend.default_program())
    }

    /// Total number of outputs across all conversions.
    pub fn output_count(&self) -> usize {
        self.conversions.iter().map(|c| c.outputs.len()).sum()
    }

    /// Resolve input paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        for conversion in &mut self.conversions {
            if conversion.input.as_os_str().is_empty() {
                continue;
            }
            conversion.input = super::resolve_config_path(&conversion.input, root);
        }
    }

    /// Validate conversion settings.
    ///
    /// # Checks
    /// - Every conversion names an input (error).
    /// - Inputs exist on disk (warning: the host may generate them later).
    /// - Conversions without outputs (warning).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.backend != Backend::Builtin
            && let Some(program) = self.program.as_deref()
            && program.trim().is_empty()
        {
            diag.error(Self::FIELDS.program, "program is empty")
                .hint(format!("remove `{}` to use the default", Self::FIELDS.program.as_str()));
        }

        for (index, conversion) in self.conversions.iter().enumerate() {
            if conversion.input.as_os_str().is_empty() {
                diag.error(Self::FIELDS.conversions, "no input")
                    .at(index)
                    .hint("set `input` to the svg file to convert");
                continue;
            }
            if !conversion.input.exists() {
                diag.warn(
                    Self::FIELDS.conversions,
                    format!("input `{}` does not exist", conversion.input.display()),
                )
                .at(index);
            }
            if conversion.outputs.is_empty() {
                diag.warn(Self::FIELDS.conversions, "no outputs").at(index);
            }
        }
    }
}
