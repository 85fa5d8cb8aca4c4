//! rsvg-batch - Render SVG sources to PNG, JPEG and WebP after every build.
//!
//! The host loads a [`config::HostConfig`], constructs a [`plugin::RsvgPlugin`]
//! once and calls [`plugin::RsvgPlugin::on_compile`] after each build pass.

pub mod logger;

pub mod config;
pub mod convert;
pub mod error;
pub mod plugin;
pub mod raster;
pub mod report;
pub mod utils;

pub use config::HostConfig;
pub use convert::{BatchReport, OutputFailure};
pub use error::{ConvertError, RenderError};
pub use plugin::RsvgPlugin;
pub use report::{LogReporter, Reporter};
