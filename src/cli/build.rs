//! `build`: run the post-build hook once.
//!
//! Neither configuration findings nor output failures change the exit
//! status: they are logged, and every conversion that can run does. Only a
//! configuration that cannot be loaded fails the command.

use super::BuildArgs;
use anyhow::{Context, Result};
use rsvg_batch::{BatchReport, HostConfig, RsvgPlugin, debug};

pub fn run_build(config: &mut HostConfig, args: &BuildArgs) -> Result<Vec<BatchReport>> {
    if let Some(backend) = args.backend {
        config.rsvg_mut().backend = backend;
    }
    config.diagnose().report();

    let plugin = RsvgPlugin::new(config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let reports = runtime.block_on(plugin.on_compile());

    let failed: usize = reports.iter().map(|r| r.failed.len()).sum();
    debug!("build"; "{} conversions settled, {} failed outputs", reports.len(), failed);
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8"/></svg>"#;

    fn load(dir: &TempDir, content: &str) -> HostConfig {
        fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        let path = dir.path().join("rsvg.toml");
        fs::write(&path, content).unwrap();
        HostConfig::from_path(&path).unwrap()
    }

    #[test]
    fn test_conversion_without_input_does_not_block_others() {
        let dir = TempDir::new().unwrap();
        let mut config = load(
            &dir,
            r#"
[[plugins.rsvg.conversions]]
input = "logo.svg"
outputs = [{ width = 16, path = "logo-{w}.png" }]

[[plugins.rsvg.conversions]]
outputs = [{ width = 32, path = "broken-{w}.png" }]
"#,
        );
        assert!(config.diagnose().has_errors());

        let args = BuildArgs {
            backend: None,
            verbose: false,
        };
        let mut reports = run_build(&mut config, &args).unwrap();
        reports.sort_by_key(|r| r.succeeded);

        assert_eq!(reports.len(), 2);
        assert_eq!((reports[0].succeeded, reports[0].total), (0, 1));
        assert_eq!((reports[1].succeeded, reports[1].total), (1, 1));
        assert!(config.public_dir().join("logo-16.png").exists());
        assert!(!config.public_dir().join("broken-32.png").exists());
    }

    #[test]
    fn test_backend_override() {
        let dir = TempDir::new().unwrap();
        let mut config = load(&dir, "[plugins.rsvg]\nbackend = \"builtin\"");
        let args = BuildArgs {
            backend: Some(rsvg_batch::config::Backend::Magick),
            verbose: false,
        };
        run_build(&mut config, &args).unwrap();
        assert_eq!(
            config.rsvg().unwrap().backend,
            rsvg_batch::config::Backend::Magick
        );
    }
}
