//! `check`: validate configuration and probe the rasterizer.

use anyhow::{Result, bail};
use rsvg_batch::raster::Rasterizer;
use rsvg_batch::utils::plural_count;
use rsvg_batch::{HostConfig, log};

pub fn run_check(config: &HostConfig) -> Result<()> {
    config.validate()?;

    let settings = config.rsvg().cloned().unwrap_or_default();
    let conversions = settings.conversions.len();
    let outputs = settings.output_count();

    log!(
        "check";
        "{}, {} into {}",
        plural_count(conversions, "conversion"),
        plural_count(outputs, "output"),
        config.public_dir().display()
    );

    match Rasterizer::probe(settings.backend, settings.program()) {
        Some(rasterizer) => {
            log!("check"; "{} backend available", rasterizer.name());
            Ok(())
        }
        None => bail!(
            "{} backend unavailable: `{}` not found",
            settings.backend.name(),
            settings.program().unwrap_or_default()
        ),
    }
}
