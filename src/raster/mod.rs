//! Rasterizer backends.
//!
//! A [`Rasterizer`] is a capability value: it is probed once when the plugin
//! is constructed and simply absent when the backend cannot be used.
//!
//! # Backends
//!
//! | Backend   | Implementation                    | Availability            |
//! |-----------|-----------------------------------|-------------------------|
//! | `builtin` | resvg + image encoders            | always                  |
//! | `rsvg`    | librsvg's `rsvg-convert` command  | program found on `PATH` |
//! | `magick`  | ImageMagick's `magick` command    | program found on `PATH` |

mod builtin;
mod external;

use crate::config::Backend;
use crate::convert::Output;
use crate::error::RenderError;
use std::path::{Path, PathBuf};

/// Parameters for one render, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub id: Option<String>,
}

impl RenderParams {
    /// Validate a resolved output's dimensions.
    ///
    /// Fails with `MissingSize` when neither dimension was configured and
    /// `InvalidSize` for values that are not positive `u32`s.
    pub fn from_output(output: &Output) -> Result<Self, RenderError> {
        let (width, height) = match (output.width, output.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(v), None) | (None, Some(v)) => (v, v),
            (None, None) => return Err(RenderError::MissingSize),
        };

        let invalid = || RenderError::InvalidSize { width, height };
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }

        Ok(Self {
            format: output.format.clone(),
            width: w,
            height: h,
            id: output.id.clone(),
        })
    }
}

/// An available rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rasterizer {
    /// resvg, in process.
    Builtin,
    /// `rsvg-convert` at the given path.
    Rsvg { program: PathBuf },
    /// `magick` at the given path.
    Magick { program: PathBuf },
}

impl Rasterizer {
    /// Probe a backend once.
    ///
    /// External backends are looked up with `which`; `program` overrides the
    /// default program name. Returns `None` when the program is missing.
    pub fn probe(backend: Backend, program: Option<&str>) -> Option<Self> {
        let locate = |default: &str| {
            let name = program.unwrap_or(default);
            match which::which(name) {
                Ok(path) => {
                    crate::debug!("raster"; "using `{}`", path.display());
                    Some(path)
                }
                Err(e) => {
                    crate::debug!("raster"; "`{}` not found: {}", name, e);
                    None
                }
            }
        };

        match backend {
            Backend::Builtin => Some(Self::Builtin),
            Backend::Rsvg => locate("rsvg-convert").map(|program| Self::Rsvg { program }),
            Backend::Magick => locate("magick").map(|program| Self::Magick { program }),
        }
    }

    /// Backend name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Builtin => Backend::Builtin.name(),
            Self::Rsvg { .. } => Backend::Rsvg.name(),
            Self::Magick { .. } => Backend::Magick.name(),
        }
    }

    /// Render `input` with `params`, returning the encoded image bytes.
    pub async fn rasterize(
        &self,
        input: &Path,
        params: &RenderParams,
    ) -> Result<Vec<u8>, RenderError> {
        match self {
            Self::Builtin => builtin::rasterize(input, params).await,
            Self::Rsvg { program } => external::rasterize_rsvg(program, input, params).await,
            Self::Magick { program } => external::rasterize_magick(program, input, params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(width: Option<i64>, height: Option<i64>) -> Output {
        Output {
            format: "png".into(),
            width,
            height,
            path: PathBuf::from("out.png"),
            id: None,
        }
    }

    #[test]
    fn test_params_from_output() {
        let params = RenderParams::from_output(&output(Some(32), Some(16))).unwrap();
        assert_eq!((params.width, params.height), (32, 16));
        assert_eq!(params.format, "png");
    }

    #[test]
    fn test_params_single_dimension() {
        let params = RenderParams::from_output(&output(None, Some(24))).unwrap();
        assert_eq!((params.width, params.height), (24, 24));
    }

    #[test]
    fn test_params_missing_size() {
        let err = RenderParams::from_output(&output(None, None)).unwrap_err();
        assert!(matches!(err, RenderError::MissingSize));
    }

    #[test]
    fn test_params_invalid_size() {
        for (w, h) in [(64, 0), (0, 64), (-5, 10), (10, i64::MAX)] {
            let err = RenderParams::from_output(&output(Some(w), Some(h))).unwrap_err();
            assert!(
                matches!(err, RenderError::InvalidSize { width, height } if width == w && height == h),
                "{w}x{h}"
            );
        }
    }

    #[test]
    fn test_probe_builtin_always_available() {
        assert_eq!(
            Rasterizer::probe(Backend::Builtin, None),
            Some(Rasterizer::Builtin)
        );
        // program is irrelevant for builtin
        assert_eq!(
            Rasterizer::probe(Backend::Builtin, Some("rsvg-batch-missing")),
            Some(Rasterizer::Builtin)
        );
    }

    #[test]
    fn test_probe_missing_program() {
        assert!(Rasterizer::probe(Backend::Rsvg, Some("rsvg-batch-missing-rsvg-convert")).is_none());
        assert!(Rasterizer::probe(Backend::Magick, Some("rsvg-batch-missing-magick")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_found_program() {
        let rasterizer = Rasterizer::probe(Backend::Rsvg, Some("sh")).unwrap();
        assert_eq!(rasterizer.name(), "rsvg");
        assert!(matches!(rasterizer, Rasterizer::Rsvg { program } if program.ends_with("sh")));
    }
}
