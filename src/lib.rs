//! # Logscrub
//!
//! PII redaction for large gzip-compressed log files.
//!
//! ## Features
//!
//! - **SSN and credit card masking**: `ddd-dd-dddd` and `dddd-dddd-dddd-dddd`
//!   values are overwritten in place with same-length masks
//! - **Large file support**: Working copies are memory-mapped, so memory stays
//!   flat for 512MB+ logs
//! - **Originals untouched**: Inputs are opened read-only; output goes to
//!   `<name>.redacted.gz`
//! - **Audit trail**: A `<name>.audit` sidecar with line and redaction counts,
//!   and a shared notice log, neither carrying any log content
//! - **Parallel processing**: One file per worker on a bounded pool
//!
//! ## Usage
//!
//! ```bash
//! # Redact two archives
//! logscrub app-1.log.gz app-2.log.gz
//!
//! # Redact a directory tree, 4 files at a time
//! logscrub /var/log/archive --recursive --jobs 4
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use logscrub::notice::NoticeBatch;
//! use logscrub::pipeline::{FileProcessingPipeline, PipelineConfig};
//! use std::path::Path;
//!
//! let pipeline = FileProcessingPipeline::new(PipelineConfig::default()).unwrap();
//! let mut notices = NoticeBatch::disabled("app.log.gz");
//! match pipeline.run(Path::new("app.log.gz"), &mut notices) {
//!     Ok(done) => println!("{}", done.record),
//!     Err(failure) => eprintln!("{}", failure),
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod notice;
pub mod output;
pub mod pattern;
pub mod pipeline;
pub mod progress;
pub mod redact;
pub mod scanner;

pub use cli::Args;
pub use config::RunConfig;
pub use dispatcher::{Dispatcher, RunSummary};
pub use error::{RedactError, Result};
pub use pipeline::{FileProcessingPipeline, PipelineConfig};
