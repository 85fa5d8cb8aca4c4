//! Rasterization through system programs.
//!
//! Both programs read the input file themselves and write the encoded
//! image to stdout.

use crate::error::RenderError;
use crate::utils::exec::Cmd;
use std::path::Path;

use super::RenderParams;

/// Convert using librsvg's `rsvg-convert`.
///
/// Without `--keep-aspect-ratio` the document is stretched to the exact size.
pub(super) async fn rasterize_rsvg(
    program: &Path,
    input: &Path,
    params: &RenderParams,
) -> Result<Vec<u8>, RenderError> {
    let output = Cmd::new(program)
        .args(rsvg_args(params))
        .arg(input)
        .run()
        .await
        .map_err(|e| RenderError::Backend(format!("{e:#}")))?;
    Ok(output.stdout)
}

/// Convert using ImageMagick.
pub(super) async fn rasterize_magick(
    program: &Path,
    input: &Path,
    params: &RenderParams,
) -> Result<Vec<u8>, RenderError> {
    if params.id.is_some() {
        return Err(RenderError::UnsupportedOption(
            "the magick backend cannot export a single element, use `id` with builtin or rsvg"
                .to_string(),
        ));
    }

    let output = Cmd::new(program)
        .args(["-background", "none"])
        .arg(input)
        .args(magick_args(params))
        .run()
        .await
        .map_err(|e| RenderError::Backend(format!("{e:#}")))?;
    Ok(output.stdout)
}

fn rsvg_args(params: &RenderParams) -> Vec<String> {
    let mut args = vec![
        "--format".to_string(),
        params.format.to_ascii_lowercase(),
        "--width".to_string(),
        params.width.to_string(),
        "--height".to_string(),
        params.height.to_string(),
    ];
    if let Some(id) = &params.id {
        args.push("--export-id".to_string());
        args.push(id.clone());
    }
    args
}

fn magick_args(params: &RenderParams) -> [String; 3] {
    [
        "-resize".to_string(),
        format!("{}x{}!", params.width, params.height),
        format!("{}:-", params.format.to_ascii_lowercase()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(id: Option<&str>) -> RenderParams {
        RenderParams {
            format: "PNG".to_string(),
            width: 64,
            height: 32,
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_rsvg_args() {
        assert_eq!(
            rsvg_args(&params(None)),
            ["--format", "png", "--width", "64", "--height", "32"]
        );
        let args = rsvg_args(&params(Some("mark")));
        assert_eq!(&args[6..], ["--export-id", "mark"]);
    }

    #[test]
    fn test_magick_args() {
        assert_eq!(magick_args(&params(None)), ["-resize", "64x32!", "png:-"]);
    }

    #[tokio::test]
    async fn test_magick_rejects_id() {
        let err = rasterize_magick(Path::new("magick"), Path::new("logo.svg"), &params(Some("x")))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedOption(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_program_failure_is_backend_error() {
        let err = rasterize_rsvg(Path::new("false"), Path::new("logo.svg"), &params(None))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Backend(msg) if msg.contains("`false` failed")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_is_returned() {
        // `echo` prints its arguments, standing in for the encoded image
        let bytes = rasterize_rsvg(Path::new("echo"), Path::new("logo.svg"), &params(None))
            .await
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim(), "--format png --width 64 --height 32 logo.svg");
    }
}
