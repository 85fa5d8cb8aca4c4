//! Render one resolved output to disk.

use super::spec::Output;
use crate::error::RenderError;
use crate::raster::{RenderParams, Rasterizer};
use std::path::Path;

/// Rasterize `input` for `output` and write the bytes to `output.path`.
///
/// Parameters are validated and the image is produced before anything is
/// written, so a failed render leaves no file behind.
pub async fn render_output(
    rasterizer: &Rasterizer,
    input: &Path,
    output: &Output,
) -> Result<(), RenderError> {
    let params = RenderParams::from_output(output)?;
    let bytes = rasterizer.rasterize(input, &params).await?;
    write_output(&output.path, &bytes).await?;

    crate::debug!("rsvg"; "wrote {} ({} bytes)", output.path.display(), bytes.len());
    Ok(())
}

/// Write bytes, creating missing parent directories first.
///
/// `create_dir_all` succeeds when a concurrent writer created the same
/// directories first.
async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| RenderError::io(parent, e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| RenderError::io(path, e))
}
