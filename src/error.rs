//! Error types for output rendering.
//!
//! Every variant describes why a single output failed. None of them ever
//! escape the batch: they are reported and counted.

use std::path::PathBuf;
use thiserror::Error;

/// Why the rasterizer could not produce or write an output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("neither width nor height is set")]
    MissingSize,

    #[error("invalid size {width}x{height}, width and height must be positive")]
    InvalidSize { width: i64, height: i64 },

    #[error("unsupported format `{0}`")]
    UnsupportedFormat(String),

    #[error("no element with id `{0}`")]
    ElementNotFound(String),

    #[error("{0}")]
    UnsupportedOption(String),

    #[error("failed to parse svg")]
    Parse(#[from] usvg::Error),

    #[error("{0}")]
    Render(String),

    #[error("failed to encode image")]
    Encode(#[from] image::ImageError),

    #[error("IO error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Backend(String),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why one output of a conversion failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no output path set")]
    MissingPath,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Render an error and its sources as one line: `outer: inner: root`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_chain_includes_source() {
        let err = RenderError::io(
            "public/icon-64.png",
            Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(
            error_chain(&err),
            "IO error at `public/icon-64.png`: permission denied"
        );
    }

    #[test]
    fn test_transparent_render_error() {
        let err = ConvertError::from(RenderError::InvalidSize {
            width: 64,
            height: 0,
        });
        assert_eq!(
            error_chain(&err),
            "invalid size 64x0, width and height must be positive"
        );
    }

    #[test]
    fn test_missing_size_message() {
        assert_eq!(
            RenderError::MissingSize.to_string(),
            "neither width nor height is set"
        );
    }
}
