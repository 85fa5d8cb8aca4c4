//! Run every output of one conversion concurrently.
//!
//! Outputs are independent: each is normalized, rendered and written by its
//! own task, and a failure never stops its siblings. Failures are reported
//! the moment they happen; the summary is reported once all tasks settled.

use super::render::render_output;
use super::spec::{Normalizer, OutputSpec};
use crate::config::ConversionConfig;
use crate::error::{ConvertError, error_chain};
use crate::raster::Rasterizer;
use crate::report::Reporter;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Everything a conversion needs, shared by all of its tasks.
pub struct BatchContext {
    pub rasterizer: Rasterizer,
    /// Base directory for relative output paths.
    pub public_dir: PathBuf,
    /// Lowest settings layer.
    pub global: OutputSpec,
    pub reporter: Arc<dyn Reporter>,
}

/// One output that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFailure {
    /// Resolved output path, or `outputs[i] of <input>` when the path
    /// could not be resolved.
    pub target: String,
    pub detail: String,
}

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub input: PathBuf,
    pub total: usize,
    pub succeeded: usize,
    pub failed: Vec<OutputFailure>,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "{} of {} outputs generated from {}",
            self.succeeded,
            self.total,
            self.input.display()
        )
    }
}

/// Render all outputs of `conversion` and report the result.
///
/// Never fails. Every output ends up either counted in `succeeded` or
/// listed in `failed`.
pub async fn run_conversion(ctx: Arc<BatchContext>, conversion: ConversionConfig) -> BatchReport {
    let input = Arc::new(conversion.input);
    let total = conversion.outputs.len();
    let normalizer = Normalizer::new(&ctx.public_dir, &ctx.global, &conversion.defaults);

    let mut tasks = JoinSet::new();
    for (index, raw) in conversion.outputs.iter().enumerate() {
        let resolved = normalizer.normalize(raw);
        let ctx = Arc::clone(&ctx);
        let input = Arc::clone(&input);

        tasks.spawn(async move {
            let (target, result) = match resolved {
                Ok(output) => {
                    let result = render_output(&ctx.rasterizer, &input, &output)
                        .await
                        .map_err(ConvertError::from);
                    (output.path.display().to_string(), result)
                }
                Err(e) => (format!("outputs[{index}] of {}", input.display()), Err(e)),
            };

            result.map_err(|e| {
                let failure = OutputFailure {
                    target,
                    detail: error_chain(&e),
                };
                ctx.reporter.output_failed(&failure);
                failure
            })
        });
    }

    let mut succeeded = 0;
    let mut failed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => succeeded += 1,
            Ok(Err(failure)) => failed.push(failure),
            Err(e) => {
                let failure = OutputFailure {
                    target: input.display().to_string(),
                    detail: error_chain(&ConvertError::Task(e.to_string())),
                };
                ctx.reporter.output_failed(&failure);
                failed.push(failure);
            }
        }
    }

    let report = BatchReport {
        input: Arc::unwrap_or_clone(input),
        total,
        succeeded,
        failed,
    };
    ctx.reporter.batch_settled(&report);
    report
}
