//! Fan-out of file executions over a bounded worker pool
//!
//! Each input file is one independent pipeline execution. Executions share
//! no mutable state; the only shared resources are the notice log, which
//! takes one serialized append per finished file, and the run totals.

use colored::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::error::{RedactError, Result};
use crate::notice::{NoticeBatch, NoticeLog};
use crate::output::{OUTPUT_TEMP_SUFFIX, WORKING_SUFFIX};
use crate::pipeline::{FileProcessingPipeline, PipelineFailure, PipelineSuccess, Stage};
use crate::progress::{create_bytes_progress_bar, RunStats};

/// Outcome of one file execution
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    /// Compressed input size in bytes (0 if unreadable)
    pub size: u64,
    pub result: std::result::Result<PipelineSuccess, PipelineFailure>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// All reports of one run, in input order
#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> i32 {
        if self.all_ok() {
            0
        } else {
            1
        }
    }
}

/// Runs one pipeline execution per input file
pub struct Dispatcher {
    pipeline: FileProcessingPipeline,
    jobs: usize,
    notice_log: Option<NoticeLog>,
    stats: Arc<RunStats>,
    quiet: bool,
}

impl Dispatcher {
    pub fn new(config: &RunConfig) -> Result<Self> {
        let notice_log = config
            .notice_log
            .as_deref()
            .map(NoticeLog::open)
            .transpose()?;

        Ok(Self {
            pipeline: FileProcessingPipeline::new(config.pipeline.clone())?,
            jobs: config.jobs.max(1),
            notice_log,
            stats: Arc::new(RunStats::new()),
            quiet: config.quiet,
        })
    }

    /// Process every input; a failed file never stops the others
    pub fn run(&self, inputs: &[PathBuf]) -> Result<RunSummary> {
        let started = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("logscrub-worker-{}", i))
            .build()?;

        let sizes: Vec<u64> = inputs
            .iter()
            .map(|p| fs::metadata(p).map(|m| m.len()).unwrap_or(0))
            .collect();
        for size in &sizes {
            self.stats.add_file(*size);
        }

        // Two inputs resolving to one output (a/x.gz, b/x.gz with -o) would race
        let mut seen = HashSet::new();
        let duplicate: Vec<bool> = inputs
            .iter()
            .map(|p| !seen.insert(self.pipeline.paths_for(p).output))
            .collect();

        let total_bytes: u64 = sizes.iter().sum();
        let pb = if self.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_bytes_progress_bar(total_bytes, "Redacting...")
        };

        log::info!(
            "Dispatching {} files over {} workers",
            inputs.len(),
            self.jobs
        );

        let reports: Vec<FileReport> = pool.install(|| {
            inputs
                .par_iter()
                .zip(sizes.par_iter())
                .zip(duplicate.par_iter())
                .with_max_len(1)
                .map(|((input, size), duplicate)| {
                    let report = if *duplicate {
                        self.reject_duplicate(input, *size)
                    } else {
                        self.process_one(input, *size)
                    };
                    pb.inc(*size);
                    report
                })
                .collect()
        });

        pb.finish_with_message("Complete".green().to_string());

        Ok(RunSummary {
            reports,
            elapsed: started.elapsed(),
        })
    }

    /// Run totals across finished files
    pub fn stats(&self) -> Arc<RunStats> {
        Arc::clone(&self.stats)
    }

    fn reject_duplicate(&self, input: &Path, size: u64) -> FileReport {
        let error = RedactError::InvalidInput {
            path: input.to_path_buf(),
            reason: "another input in this run writes the same output".to_string(),
        };
        log::error!("Skipping {:?}: {}", input, error);
        self.stats.fail_file();
        FileReport {
            input: input.to_path_buf(),
            size,
            result: Err(PipelineFailure {
                stage: Stage::Decompressing,
                error,
            }),
        }
    }

    fn process_one(&self, input: &Path, size: u64) -> FileReport {
        let label = self.pipeline.label_for(input);

        let mut batch = match self.notice_log {
            Some(_) => NoticeBatch::new(label.as_str()).unwrap_or_else(|e| {
                log::warn!("Could not create notice spool for {:?}: {}", input, e);
                NoticeBatch::disabled(label.as_str())
            }),
            None => NoticeBatch::disabled(label.as_str()),
        };

        let result = self.pipeline.run(input, &mut batch);

        let status = match &result {
            Ok(_) => "redacted".to_string(),
            Err(failure) => format!("failed while {} ({})", failure.stage, failure.error.kind()),
        };
        if let Err(e) = batch.close(&status) {
            log::warn!("Could not close notice spool for {:?}: {}", input, e);
        }
        if let Some(notice_log) = &self.notice_log {
            if let Err(e) = notice_log.append(batch) {
                log::warn!("Could not append notices for {:?} to {:?}: {}", input, notice_log.path(), e);
            }
        }

        match &result {
            Ok(success) => self.stats.complete_file(size, &success.record),
            Err(_) => self.stats.fail_file(),
        }

        FileReport {
            input: input.to_path_buf(),
            size,
            result,
        }
    }
}

/// Expand inputs into the list of files to process.
///
/// Files are taken as given; directories contribute files whose extension is
/// in `extensions`, except earlier outputs (names ending in `output_suffix`)
/// and leftover working files. Paths that do not exist are kept so they are
/// reported as failed rather than silently dropped.
pub fn collect_inputs(
    paths: &[PathBuf],
    recursive: bool,
    extensions: &[String],
    output_suffix: &str,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let walker = if recursive {
            WalkDir::new(path)
        } else {
            WalkDir::new(path).max_depth(1)
        };

        let mut found: Vec<PathBuf> = walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| extensions.contains(&e.to_lowercase()))
                    .unwrap_or(false)
            })
            .filter(|p| !is_own_artifact(p, output_suffix))
            .collect();
        found.sort();
        files.extend(found);
    }

    files
}

fn is_own_artifact(path: &Path, output_suffix: &str) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    name.ends_with(output_suffix)
        || (name.starts_with('.') && (name.ends_with(WORKING_SUFFIX) || name.ends_with(OUTPUT_TEMP_SUFFIX)))
}
