//! Favicon derivation pipeline.
//!
//! Turns one [`SourceImage`] into a zip holding every target of the
//! [asset plan](crate::plan).
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────── per-run rayon pool ────────────────┐
//! source ──► │ png 512 · png 192 · ... · png 16 · svg             │
//!   │        │        16/32/48 done ──► ico (spawned later)       │
//!   │        └──────────────────────┬─────────────────────────────┘
//!   │                               │ crossbeam channel
//!   ▼                               ▼
//! decode ──► coordinator (caller thread) ──► ArchiveBuilder ──► zip bytes
//!                      │
//!                      └──► LogSequence ──► observer (live progress)
//! ```
//!
//! The first task error raises a cancellation flag, the coordinator stops
//! accepting results, and the partial archive is dropped. Tasks that have
//! not started skip their work; in-flight ones finish and are discarded.

mod log;
mod state;
mod task;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{self, Receiver, Sender};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::archive::ArchiveBuilder;
use crate::config::FaviconConfig;
use crate::error::{FaviconError, Result};
use crate::image::{ResampleFilter, Resampler, SourceImage};
use crate::plan::{self, ASSET_PLAN, ICO_SIZES};

pub use log::{LogObserver, LogSequence};
pub use state::RunState;
use task::{Completed, Task};

// =============================================================================
// Types
// =============================================================================

/// Tunables of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub filter: ResampleFilter,
    /// Deflate level, 0..=9.
    pub compression_level: u8,
    /// Worker threads, 0 = available parallelism.
    pub jobs: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            compression_level: crate::archive::MAX_COMPRESSION_LEVEL,
            jobs: 0,
        }
    }
}

impl From<&FaviconConfig> for PipelineOptions {
    fn from(config: &FaviconConfig) -> Self {
        Self {
            filter: config.resample.filter,
            compression_level: config.archive.compression_level,
            jobs: config.pipeline.jobs,
        }
    }
}

/// Successful run: archive bytes plus the complete log.
#[derive(Debug)]
pub struct PipelineOutput {
    pub archive: Vec<u8>,
    pub logs: Vec<String>,
}

/// Failed run: the terminal error plus every line logged before it.
// NOTE: no #[source] on `error`, anyhow would print it twice
#[derive(Debug, Error)]
#[error("{error}")]
pub struct PipelineFailure {
    pub error: FaviconError,
    pub logs: Vec<String>,
}

// =============================================================================
// Run
// =============================================================================

/// Run the whole pipeline for `source`.
///
/// Blocks the calling thread, which acts as coordinator while the run's own
/// pool executes tasks. Call from outside any rayon pool.
pub fn run(
    source: &SourceImage,
    options: &PipelineOptions,
    observer: Option<&LogObserver<'_>>,
) -> Result<PipelineOutput, PipelineFailure> {
    PipelineRun::new(source, options, observer).execute()
}

/// One pipeline invocation. Shares nothing mutable with other runs.
pub struct PipelineRun<'a> {
    source: &'a SourceImage,
    options: &'a PipelineOptions,
    state: RunState,
    logs: LogSequence<'a>,
}

impl<'a> PipelineRun<'a> {
    pub fn new(
        source: &'a SourceImage,
        options: &'a PipelineOptions,
        observer: Option<&'a LogObserver<'a>>,
    ) -> Self {
        Self {
            source,
            options,
            state: RunState::Idle,
            logs: LogSequence::new(observer),
        }
    }

    #[cfg(test)]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Drive the run to a terminal state.
    pub fn execute(self) -> Result<PipelineOutput, PipelineFailure> {
        self.execute_tasks(initial_tasks())
    }

    /// Run with `tasks` as the first wave; the ICO task is still added once
    /// its constituents arrive.
    fn execute_tasks(mut self, tasks: Vec<Task>) -> Result<PipelineOutput, PipelineFailure> {
        self.state.start();
        self.logs.push("Starting image conversion process...");

        match self.produce(tasks) {
            Ok(archive) => {
                self.state.complete();
                crate::debug!("pipeline"; "run {:?}, archive {} bytes", self.state, archive.len());
                Ok(PipelineOutput {
                    archive,
                    logs: self.logs.into_lines(),
                })
            }
            Err(error) => {
                self.state.fail();
                self.logs.push(format!("Image conversion failed: {error}"));
                Err(PipelineFailure {
                    error,
                    logs: self.logs.into_lines(),
                })
            }
        }
    }

    fn produce(&self, tasks: Vec<Task>) -> Result<Vec<u8>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .thread_name(|i| format!("favipack-{i}"))
            .build()?;

        let resampler = Resampler::decode(self.source, self.options.filter)?;
        crate::debug!("pipeline"; "decoded {} source, master {:?}",
            self.source.media_type(), resampler.dimensions());

        let mut archive = ArchiveBuilder::in_memory(self.options.compression_level);
        self.logs.push("Starting ZIP file creation...");

        let (tx, rx) = channel::unbounded();
        let workers = Workers {
            resampler: &resampler,
            source: self.source,
            cancelled: AtomicBool::new(false),
            tx,
        };

        pool.in_place_scope(|scope| {
            self.coordinate(scope, &workers, tasks, &rx, &mut archive)
                .inspect_err(|_| workers.cancel())
        })?;

        self.logs.push("All image conversions completed.");
        let bytes = archive.finish_bytes()?;
        self.logs.push("ZIP file creation completed.");
        Ok(bytes)
    }

    /// Receive task results until every plan target is archived.
    fn coordinate<'s>(
        &self,
        scope: &rayon::Scope<'s>,
        workers: &'s Workers<'_>,
        tasks: Vec<Task>,
        rx: &Receiver<Result<Completed>>,
        archive: &mut ArchiveBuilder,
    ) -> Result<()> {
        for task in tasks {
            workers.spawn(scope, task);
        }

        let mut ico_parts: FxHashMap<u32, Vec<u8>> = FxHashMap::default();
        let mut remaining = ASSET_PLAN.len();

        while remaining > 0 {
            let completed = match rx.recv() {
                Ok(outcome) => outcome,
                Err(_) => return Err(FaviconError::Pool("worker channel closed".into())),
            };
            let completed = completed?;
            remaining -= 1;

            if let Some(size) = completed.ico_size {
                ico_parts.insert(size, completed.asset.bytes.clone());
                if ico_parts.len() == ICO_SIZES.len() {
                    let parts = ICO_SIZES
                        .iter()
                        .filter_map(|size| ico_parts.remove(size).map(|png| (*size, png)))
                        .collect();
                    workers.spawn(scope, Task::Ico(parts));
                }
            }

            self.logs.push(completed.message);
            archive.add(&completed.asset)?;
        }

        Ok(())
    }
}

/// Every PNG target plus `favicon.svg`.
fn initial_tasks() -> Vec<Task> {
    plan::png_targets()
        .map(Task::Png)
        .chain(std::iter::once(Task::Svg))
        .collect()
}

// =============================================================================
// Workers
// =============================================================================

/// Read-only state shared by every task of one run.
struct Workers<'a> {
    resampler: &'a Resampler,
    source: &'a SourceImage,
    cancelled: AtomicBool,
    tx: Sender<Result<Completed>>,
}

impl Workers<'_> {
    fn spawn<'s>(&'s self, scope: &rayon::Scope<'s>, task: Task) {
        scope.spawn(move |_| {
            if self.cancelled.load(Ordering::SeqCst) {
                return;
            }
            // only effective where panics unwind (dev and test profiles);
            // the release profile sets `panic = 'abort'`
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                task.execute(self.resampler, self.source)
            }))
            .unwrap_or_else(|_| Err(FaviconError::Pool("worker task panicked".into())));
            // receiver outlives the scope; after a failure nobody reads this
            let _ = self.tx.send(outcome);
        });
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

// =============================================================================
// Tests
// =============================================================================
