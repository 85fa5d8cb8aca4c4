//! In-process rasterization with resvg.
//!
//! Parsing, rendering and encoding are CPU-bound and run on tokio's
//! blocking pool so sibling outputs keep making progress.

use crate::error::RenderError;
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::RenderParams;

/// Formats the builtin backend can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncodeFormat {
    Png,
    Jpeg,
    WebP,
}

impl EncodeFormat {
    fn parse(format: &str) -> Result<Self, RenderError> {
        match format.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            _ => Err(RenderError::UnsupportedFormat(format.to_string())),
        }
    }

    /// Formats without an alpha channel are flattened onto white.
    fn is_opaque(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

pub(super) async fn rasterize(input: &Path, params: &RenderParams) -> Result<Vec<u8>, RenderError> {
    let format = EncodeFormat::parse(&params.format)?;
    let data = tokio::fs::read(input)
        .await
        .map_err(|e| RenderError::io(input, e))?;

    let resources_dir = input.parent().map(Path::to_path_buf);
    let params = params.clone();
    tokio::task::spawn_blocking(move || render(&data, resources_dir, &params, format))
        .await
        .map_err(|e| RenderError::Render(format!("render task failed: {e}")))?
}

fn render(
    data: &[u8],
    resources_dir: Option<PathBuf>,
    params: &RenderParams,
    format: EncodeFormat,
) -> Result<Vec<u8>, RenderError> {
    let options = usvg::Options {
        resources_dir,
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_data(data, &options)?;

    let mut pixmap = Pixmap::new(params.width, params.height).ok_or_else(|| {
        RenderError::Render(format!(
            "failed to allocate {}x{} pixmap",
            params.width, params.height
        ))
    })?;
    if format.is_opaque() {
        pixmap.fill(Color::WHITE);
    }

    match params.id.as_deref() {
        None => render_document(&tree, params, &mut pixmap),
        Some(id) => render_element(&tree, id, params, &mut pixmap)?,
    }

    encode(&pixmap, format)
}

/// Stretch the whole document to the requested size.
#[allow(clippy::cast_precision_loss)]
fn render_document(tree: &usvg::Tree, params: &RenderParams, pixmap: &mut Pixmap) {
    let size = tree.size();
    let sx = params.width as f32 / size.width();
    let sy = params.height as f32 / size.height();
    resvg::render(tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());
}

/// Stretch one element's bounding box to the requested size.
#[allow(clippy::cast_precision_loss)]
fn render_element(
    tree: &usvg::Tree,
    id: &str,
    params: &RenderParams,
    pixmap: &mut Pixmap,
) -> Result<(), RenderError> {
    let node = tree
        .node_by_id(id)
        .ok_or_else(|| RenderError::ElementNotFound(id.to_string()))?;
    let bbox = node
        .abs_layer_bounding_box()
        .ok_or_else(|| RenderError::Render(format!("element `{id}` has an empty bounding box")))?;

    let sx = params.width as f32 / bbox.width();
    let sy = params.height as f32 / bbox.height();
    resvg::render_node(node, Transform::from_scale(sx, sy), &mut pixmap.as_mut())
        .ok_or_else(|| RenderError::Render(format!("failed to render element `{id}`")))
}

/// Encode a premultiplied pixmap into the target format.
fn encode(pixmap: &Pixmap, format: EncodeFormat) -> Result<Vec<u8>, RenderError> {
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| RenderError::Render("pixel buffer size mismatch".to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    match format {
        EncodeFormat::Png => image.write_to(&mut buf, ImageFormat::Png)?,
        EncodeFormat::Jpeg => DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_to(&mut buf, ImageFormat::Jpeg)?,
        EncodeFormat::WebP => image.write_to(&mut buf, ImageFormat::WebP)?,
    }
    Ok(buf.into_inner())
}
