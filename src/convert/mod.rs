//! SVG conversion.
//!
//! ```text
//! ConversionConfig ──► Normalizer ──► expand_template ──► render_output
//!        │                 (spec)         (template)         (render)
//!        └──────────── run_conversion: one task per output (batch)
//! ```

mod batch;
mod render;
mod spec;
mod template;

pub use batch::{BatchContext, BatchReport, OutputFailure, run_conversion};
pub use render::render_output;
pub use spec::{Normalizer, Output, OutputSpec};
pub use template::expand_template;
