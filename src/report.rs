//! Reporting sink for plugin messages.
//!
//! Nothing the plugin does is returned to the host as an error; everything
//! ends up here instead.

use crate::convert::{BatchReport, OutputFailure};

/// Receives warnings, per-output failures and batch summaries.
pub trait Reporter: Send + Sync {
    /// A non-fatal condition, e.g. the rasterizer is not installed.
    fn warn(&self, message: &str);

    /// One output failed. Called as soon as the failure happens.
    fn output_failed(&self, failure: &OutputFailure);

    /// Every output of a conversion has settled.
    fn batch_settled(&self, report: &BatchReport);
}

/// Default reporter: writes through the crate logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn warn(&self, message: &str) {
        crate::log!("warning"; "{}", message);
    }

    fn output_failed(&self, failure: &OutputFailure) {
        crate::log!("error"; "failed to generate {}: {}", failure.target, failure.detail);
    }

    fn batch_settled(&self, report: &BatchReport) {
        crate::log!("rsvg"; "{}", report.summary());
    }
}

#[cfg(test)]
pub(crate) use recording::{Event, RecordingReporter};
