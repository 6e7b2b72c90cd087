//! Per-file audit accounting
//!
//! The recorder only ever sees [`RedactionOutcome`] values, so an audit
//! record cannot carry any line content.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{RedactError, Result};
use crate::redact::RedactionOutcome;

/// Finalized counters for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub file_name: String,
    pub lines_processed: u64,
    pub lines_redacted: u64,
    pub ssn_redacted_count: u64,
    pub cc_redacted_count: u64,
    pub elapsed: Duration,
}

impl AuditRecord {
    /// Sidecar text, one `key: value` per line
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Atomically write the sidecar next to the redacted output
    pub fn write_sidecar(&self, path: &Path) -> Result<()> {
        let audit_err = |source| RedactError::AuditWrite {
            path: path.to_path_buf(),
            source,
        };
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

        let mut tmp = tempfile::Builder::new()
            .prefix(".audit.")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(audit_err)?;
        tmp.write_all(self.render().as_bytes()).map_err(audit_err)?;
        tmp.as_file().sync_all().map_err(audit_err)?;
        tmp.persist(path).map_err(|e| audit_err(e.error))?;

        Ok(())
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_name)?;
        writeln!(f, "Total number of lines processed: {}", self.lines_processed)?;
        writeln!(f, "Total number of lines redacted: {}", self.lines_redacted)?;
        writeln!(f, "Total number of lines with SSN data redacted: {}", self.ssn_redacted_count)?;
        writeln!(f, "Total number of lines with Credit Card data redacted: {}", self.cc_redacted_count)?;
        writeln!(f, "Total time spent redacting: {:.3}s", self.elapsed.as_secs_f64())
    }
}

/// Accumulates counters while a file is processed
#[derive(Debug)]
pub struct AuditRecorder {
    started: Instant,
    lines_processed: u64,
    lines_redacted: u64,
    ssn_redacted_count: u64,
    cc_redacted_count: u64,
}

impl AuditRecorder {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            lines_processed: 0,
            lines_redacted: 0,
            ssn_redacted_count: 0,
            cc_redacted_count: 0,
        }
    }

    pub fn record_line(&mut self, outcome: &RedactionOutcome) {
        self.lines_processed += 1;
        if outcome.modified {
            self.lines_redacted += 1;
        }
        if outcome.had_ssn {
            self.ssn_redacted_count += 1;
        }
        if outcome.had_cc {
            self.cc_redacted_count += 1;
        }
    }

    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    pub fn finish(self, file_name: impl Into<String>) -> AuditRecord {
        AuditRecord {
            file_name: file_name.into(),
            lines_processed: self.lines_processed,
            lines_redacted: self.lines_redacted,
            ssn_redacted_count: self.ssn_redacted_count,
            cc_redacted_count: self.cc_redacted_count,
            elapsed: self.started.elapsed(),
        }
    }
}
