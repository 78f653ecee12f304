//! Batch driver.
//!
//! Takes the `[[jobs]]` list from [`BatchConfig`], resolves each job to a
//! source file, and renders it to the target size. This is the only place
//! where files, config and crop geometry meet; the policy (which file, which
//! anchor, which output name) is data in the config, the geometry lives in
//! [`imaging`](crate::imaging).
//!
//! ## Failure model
//!
//! Only problems that make the whole run meaningless are errors: an
//! unreadable source directory or an output directory that can't be created.
//! A job whose file is missing, can't be decoded, or can't be written is
//! recorded in the [`BatchReport`] and the remaining jobs still run.
//!
//! ## Parallel Processing
//!
//! Jobs run on the global [rayon](https://docs.rs/rayon) pool. Results come
//! back in config order regardless of completion order; progress events are
//! sent as each job finishes.

use crate::config::BatchConfig;
use crate::imaging::{
    Anchor, Compression, CropBox, CropError, ImageBackend, OperationError, RustBackend,
    StoreImageConfig, create_store_image, get_dimensions, operations::plan_store_image,
};
use crate::scan::{ResolvedJob, ScanError, list_png_files, resolve_jobs, same_dir};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
enum JobError {
    #[error(transparent)]
    Operation(#[from] OperationError),
    #[error("Crop failed: {0}")]
    Crop(#[from] CropError),
}

/// Whether a run writes files or only plans them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    DryRun,
}

/// What happened to one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    /// Output written.
    Written {
        source: String,
        source_dims: (u32, u32),
        crop: CropBox,
        /// Size of the written file, when it could be read back.
        #[serde(skip_serializing_if = "Option::is_none")]
        bytes: Option<u64>,
    },
    /// Dry run: the crop that would be applied.
    Planned {
        source: String,
        source_dims: (u32, u32),
        crop: CropBox,
    },
    /// No file matched the job.
    Missing { wanted: String },
    /// A file matched but processing it failed.
    Failed { source: String, error: String },
}

/// Result of one job, in config order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    /// 1-based position in the config.
    pub index: usize,
    pub label: String,
    pub output: String,
    pub anchor: Anchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Number of files that matched; more than one is worth a warning.
    pub candidates: usize,
    pub outcome: JobOutcome,
}

/// Progress events sent while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        source_dir: PathBuf,
        png_files: usize,
        jobs: usize,
    },
    JobFinished(JobResult),
}

/// Everything a run did.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub target: (u32, u32),
    pub output_dir: PathBuf,
    pub results: Vec<JobResult>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Written { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Planned { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Missing { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed { .. }))
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), BatchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Run all configured jobs with the production backend.
pub fn run(
    config: &BatchConfig,
    mode: RunMode,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    run_with_backend(&RustBackend::new(), config, mode, events)
}

/// Run all configured jobs using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    config: &BatchConfig,
    mode: RunMode,
    events: Option<Sender<BatchEvent>>,
) -> Result<BatchReport, BatchError> {
    let source_dir = config.source_dir.as_path();
    let output_dir = config.resolved_output_dir();

    let files = list_png_files(source_dir)?;
    let resolved = resolve_jobs(&config.jobs, &files, same_dir(source_dir, output_dir));

    if let Some(tx) = &events {
        // A dropped receiver only means nobody is watching
        tx.send(BatchEvent::Started {
            source_dir: source_dir.to_path_buf(),
            png_files: files.len(),
            jobs: resolved.len(),
        })
        .ok();
    }

    if mode == RunMode::Write {
        std::fs::create_dir_all(output_dir)?;
    }

    let ctx = JobContext {
        source_dir,
        output_dir,
        target: config.target.as_tuple(),
        compression: config.output.compression,
        mode,
    };

    let results: Vec<JobResult> = resolved
        .par_iter()
        .map_with(events, |tx, job| {
            let result = run_job(backend, &ctx, job);
            if let Some(tx) = tx {
                tx.send(BatchEvent::JobFinished(result.clone())).ok();
            }
            result
        })
        .collect();

    Ok(BatchReport {
        target: ctx.target,
        output_dir: output_dir.to_path_buf(),
        results,
    })
}

/// Settings shared by every job of a run.
struct JobContext<'a> {
    source_dir: &'a Path,
    output_dir: &'a Path,
    target: (u32, u32),
    compression: Compression,
    mode: RunMode,
}

fn run_job(
    backend: &impl ImageBackend,
    ctx: &JobContext<'_>,
    resolved: &ResolvedJob<'_>,
) -> JobResult {
    let job = resolved.job;

    let outcome = match &resolved.source {
        None => JobOutcome::Missing {
            wanted: job.matcher().map(|m| m.to_string()).unwrap_or_default(),
        },
        Some(name) => {
            let store_config = StoreImageConfig {
                target: ctx.target,
                anchor: job.anchor,
                compression: ctx.compression,
            };
            process_source(backend, ctx, name, &job.output, &store_config).unwrap_or_else(|e| {
                JobOutcome::Failed {
                    source: name.clone(),
                    error: e.to_string(),
                }
            })
        }
    };

    JobResult {
        index: resolved.index,
        label: job.label().to_string(),
        output: job.output.clone(),
        anchor: job.anchor,
        notes: job.notes.clone(),
        candidates: resolved.candidates,
        outcome,
    }
}

fn process_source(
    backend: &impl ImageBackend,
    ctx: &JobContext<'_>,
    name: &str,
    output_name: &str,
    config: &StoreImageConfig,
) -> Result<JobOutcome, JobError> {
    let source = ctx.source_dir.join(name);
    let output = ctx.output_dir.join(output_name);

    match ctx.mode {
        RunMode::Write => {
            let image = create_store_image(backend, &source, &output, config)?;
            Ok(JobOutcome::Written {
                source: name.to_string(),
                source_dims: image.source_dims,
                crop: image.crop,
                bytes: std::fs::metadata(&output).ok().map(|m| m.len()),
            })
        }
        RunMode::DryRun => {
            let source_dims = get_dimensions(backend, &source)?;
            let params = plan_store_image(&source, &output, source_dims, config)?;
            Ok(JobOutcome::Planned {
                source: name.to_string(),
                source_dims,
                crop: params.crop,
            })
        }
    }
}
