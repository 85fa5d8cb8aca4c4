//! Post-build plugin surface.
//!
//! The host constructs [`RsvgPlugin`] once from its merged configuration and
//! calls [`RsvgPlugin::on_compile`] after every build. Nothing is returned to
//! the host as an error: failures go to the [`Reporter`].

use crate::config::{HostConfig, RsvgConfig};
use crate::convert::{BatchContext, BatchReport, OutputSpec, run_conversion};
use crate::raster::Rasterizer;
use crate::report::{LogReporter, Reporter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

pub struct RsvgPlugin {
    settings: RsvgConfig,
    public_dir: PathBuf,
    /// Probed once; `None` turns the hook into a no-op.
    rasterizer: Option<Rasterizer>,
    reporter: Arc<dyn Reporter>,
}

impl RsvgPlugin {
    /// Construct with the default logging reporter.
    pub fn new(config: &HostConfig) -> Self {
        Self::with_reporter(config, Arc::new(LogReporter))
    }

    /// Construct, probing the configured backend.
    ///
    /// An unavailable backend is reported once here, not on every build.
    pub fn with_reporter(config: &HostConfig, reporter: Arc<dyn Reporter>) -> Self {
        let settings = config.rsvg().cloned().unwrap_or_default();
        let rasterizer = Rasterizer::probe(settings.backend, settings.program());

        if rasterizer.is_none() {
            reporter.warn(&format!(
                "{} backend unavailable: `{}` not found, svg conversions will be skipped",
                settings.backend.name(),
                settings.program().unwrap_or_default(),
            ));
        }

        Self {
            settings,
            public_dir: config.public_dir().to_path_buf(),
            rasterizer,
            reporter,
        }
    }

    pub fn is_available(&self) -> bool {
        self.rasterizer.is_some()
    }

    pub fn rasterizer(&self) -> Option<&Rasterizer> {
        self.rasterizer.as_ref()
    }

    pub fn settings(&self) -> &RsvgConfig {
        &self.settings
    }

    /// Post-build hook: run every conversion concurrently.
    ///
    /// Reports come back in completion order.
    pub async fn on_compile(&self) -> Vec<BatchReport> {
        let Some(rasterizer) = &self.rasterizer else {
            return Vec::new();
        };

        let ctx = Arc::new(BatchContext {
            rasterizer: rasterizer.clone(),
            public_dir: self.public_dir.clone(),
            global: OutputSpec::global(),
            reporter: Arc::clone(&self.reporter),
        });

        let mut tasks = JoinSet::new();
        for conversion in &self.settings.conversions {
            tasks.spawn(run_conversion(Arc::clone(&ctx), conversion.clone()));
        }

        let mut reports = Vec::with_capacity(self.settings.conversions.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => self.reporter.warn(&format!("conversion task failed: {e}")),
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Backend, ConversionConfig};
    use crate::report::RecordingReporter;
    use std::fs;
    use tempfile::TempDir;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><circle cx="12" cy="12" r="12"/></svg>"#;

    fn host_config(dir: &TempDir, extra: &str) -> HostConfig {
        fs::write(dir.path().join("logo.svg"), SVG).unwrap();
        let content = format!(
            r#"
[plugins.rsvg]
{extra}

[[plugins.rsvg.conversions]]
input = "logo.svg"

[plugins.rsvg.conversions.defaults]
path = "icons/logo-{{w}}.{{f}}"

[[plugins.rsvg.conversions.outputs]]
width = 32

[[plugins.rsvg.conversions.outputs]]
width = 64

[[plugins.rsvg.conversions.outputs]]
width = 128
"#
        );
        let path = dir.path().join("rsvg.toml");
        fs::write(&path, content).unwrap();
        HostConfig::from_path(&path).unwrap()
    }

    fn build_plugin(config: &HostConfig) -> (RsvgPlugin, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        (RsvgPlugin::with_reporter(config, reporter.clone()), reporter)
    }

    fn icons(config: &HostConfig) -> PathBuf {
        config.public_dir().join("icons")
    }

    #[tokio::test]
    async fn test_three_outputs() {
        let dir = TempDir::new().unwrap();
        let config = host_config(&dir, "");
        let (plugin, reporter) = build_plugin(&config);

        let reports = plugin.on_compile().await;

        assert_eq!(reports.len(), 1);
        assert_eq!((reports[0].succeeded, reports[0].total), (3, 3));
        for width in [32, 64, 128] {
            assert!(icons(&config).join(format!("logo-{width}.png")).exists());
        }
        let summaries = reporter.summaries();
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].starts_with("3 of 3 outputs generated from "));
        assert!(summaries[0].ends_with("logo.svg"));
    }

    #[tokio::test]
    async fn test_zero_height_fails_one_output() {
        let dir = TempDir::new().unwrap();
        let mut config = host_config(&dir, "");
        config.rsvg_mut().conversions[0].outputs[1].height = Some(0);
        let (plugin, reporter) = build_plugin(&config);

        let reports = plugin.on_compile().await;

        assert_eq!((reports[0].succeeded, reports[0].total), (2, 3));
        assert!(icons(&config).join("logo-32.png").exists());
        assert!(icons(&config).join("logo-128.png").exists());
        assert!(!icons(&config).join("logo-64.png").exists());

        let failures = reporter.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].target.contains("64"));
        assert!(reporter.summaries()[0].starts_with("2 of 3 "));
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_noop() {
        let dir = TempDir::new().unwrap();
        let config = host_config(
            &dir,
            "backend = \"rsvg\"\nprogram = \"rsvg-batch-missing-rsvg-convert\"",
        );
        let (plugin, reporter) = build_plugin(&config);

        assert!(!plugin.is_available());
        let warnings = reporter.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("rsvg-batch-missing-rsvg-convert"));

        // every build is a silent no-op
        for _ in 0..2 {
            assert!(plugin.on_compile().await.is_empty());
        }
        assert!(!config.public_dir().exists());
        assert!(reporter.summaries().is_empty());
        assert!(reporter.failures().is_empty());
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_backend_skips_every_conversion() {
        let dir = TempDir::new().unwrap();
        let mut config = host_config(
            &dir,
            "backend = \"magick\"\nprogram = \"rsvg-batch-missing-magick\"",
        );
        let first = config.rsvg().unwrap().conversions[0].clone();
        config.rsvg_mut().conversions.extend([first.clone(), first]);
        assert_eq!(config.rsvg().unwrap().conversions.len(), 3);
        let (plugin, reporter) = build_plugin(&config);

        assert!(plugin.on_compile().await.is_empty());
        assert!(!config.public_dir().exists());
        assert!(reporter.summaries().is_empty());
        assert!(reporter.failures().is_empty());
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_no_plugin_section() {
        let config = HostConfig::from_str("[paths]\npublic = \"out\"").unwrap();
        let (plugin, reporter) = build_plugin(&config);

        assert!(plugin.is_available());
        assert_eq!(plugin.rasterizer(), Some(&Rasterizer::Builtin));
        assert!(plugin.on_compile().await.is_empty());
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_multiple_conversions() {
        let dir = TempDir::new().unwrap();
        let mut config = host_config(&dir, "");
        let second = dir.path().join("mark.svg");
        fs::write(&second, SVG).unwrap();
        config.rsvg_mut().conversions.push(ConversionConfig {
            input: second,
            defaults: OutputSpec::default(),
            outputs: vec![OutputSpec {
                width: Some(16),
                format: Some("webp".into()),
                path: Some("mark-{w}.{f}".into()),
                ..Default::default()
            }],
        });
        let (plugin, reporter) = build_plugin(&config);

        let mut reports = plugin.on_compile().await;
        reports.sort_by_key(|r| r.total);

        assert_eq!(reports.len(), 2);
        assert_eq!((reports[0].succeeded, reports[0].total), (1, 1));
        assert_eq!((reports[1].succeeded, reports[1].total), (3, 3));
        assert!(config.public_dir().join("mark-16.webp").exists());
        assert_eq!(reporter.summaries().len(), 2);
    }

    #[tokio::test]
    async fn test_rebuild_overwrites() {
        let dir = TempDir::new().unwrap();
        let config = host_config(&dir, "");
        let (plugin, reporter) = build_plugin(&config);

        plugin.on_compile().await;
        let target = icons(&config).join("logo-32.png");
        fs::write(&target, b"stale").unwrap();
        plugin.on_compile().await;

        assert_ne!(fs::read(&target).unwrap(), b"stale");
        assert_eq!(reporter.summaries().len(), 2);
    }

    #[test]
    fn test_backend_setting_is_kept() {
        let config = HostConfig::from_str("[plugins.rsvg]\nbackend = \"magick\"").unwrap();
        let plugin = RsvgPlugin::with_reporter(&config, Arc::new(RecordingReporter::default()));
        assert_eq!(plugin.settings().backend, Backend::Magick);
        assert_eq!(plugin.settings().program(), Some("magick"));
    }
}
