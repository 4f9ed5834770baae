//! Parallel rendering of many documents.

use docflow_core::DocflowError;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Instant;

use crate::options::ContentProps;
use crate::renderer::{ContentRenderer, RenderedContent};

/// A single document to render.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the content path).
    pub id: String,
    /// Render props for this document.
    pub props: ContentProps,
}

/// What happened to one document.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Rendered successfully.
    Rendered(RenderedContent),
    /// Rendering failed.
    Failed(DocflowError),
    /// Not attempted because an earlier document failed.
    Skipped,
}

/// Result for a single document, in input order.
#[derive(Debug)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Outcome for this document.
    pub outcome: BatchOutcome,
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Total number of inputs.
    pub total: u32,
    /// Documents rendered successfully.
    pub succeeded: u32,
    /// Documents that failed.
    pub failed: u32,
    /// Documents skipped after a failure.
    pub skipped: u32,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch rendering.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of worker threads. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Keep rendering after a failure. Defaults to true.
    pub continue_on_error: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_threads: None,
            continue_on_error: true,
        }
    }
}

/// All results of a batch run plus statistics.
#[derive(Debug)]
pub struct BatchOutput {
    /// One result per input, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders `inputs` in parallel with one shared renderer.
///
/// With `continue_on_error` off, documents that have not started when the
/// first failure is seen come back as [`BatchOutcome::Skipped`]. Documents
/// already in flight still finish.
pub fn render_batch(
    renderer: &ContentRenderer,
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
) -> BatchOutput {
    let start = Instant::now();

    let pool = options.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .map_err(|err| log::warn!("Falling back to the global thread pool: {}", err))
            .ok()
    });

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);
    let skipped = AtomicU32::new(0);
    let stop = AtomicBool::new(false);

    let process_input = |input: BatchInput| -> BatchResult {
        if stop.load(Ordering::Relaxed) {
            skipped.fetch_add(1, Ordering::Relaxed);
            return BatchResult {
                id: input.id,
                outcome: BatchOutcome::Skipped,
            };
        }

        let outcome = match renderer.render_props(&input.props) {
            Ok(content) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchOutcome::Rendered(content)
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::error!("Failed to render {}: {}", input.id, err);
                if !options.continue_on_error {
                    stop.store(true, Ordering::Relaxed);
                }
                BatchOutcome::Failed(err)
            }
        };
        BatchResult {
            id: input.id,
            outcome,
        }
    };

    let results: Vec<BatchResult> = match pool {
        Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
        None => inputs.into_par_iter().map(process_input).collect(),
    };

    let stats = BatchStats {
        total,
        succeeded: succeeded.into_inner(),
        failed: failed.into_inner(),
        skipped: skipped.into_inner(),
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::debug!(
        "Batch rendered {}/{} documents in {:.1}ms",
        stats.succeeded,
        stats.total,
        stats.processing_time_ms
    );

    BatchOutput { results, stats }
}
