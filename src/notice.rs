//! Human-readable redaction notices
//!
//! Each file execution spools its notices into its own anonymous temp file.
//! When the execution ends, the whole batch is appended to the shared log in
//! one locked copy, so concurrent executions never interleave writes and
//! memory use does not grow with the number of redacted lines.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::redact::RedactionOutcome;
use crate::scanner::LogLine;

/// Notices for one file execution
pub struct NoticeBatch {
    label: String,
    spool: Option<BufWriter<File>>,
    entries: u64,
}

impl NoticeBatch {
    /// Batch spooled to an anonymous temp file
    pub fn new(label: impl Into<String>) -> io::Result<Self> {
        Ok(Self {
            label: label.into(),
            spool: Some(BufWriter::new(tempfile::tempfile()?)),
            entries: 0,
        })
    }

    /// Batch that counts notices but keeps nothing
    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            spool: None,
            entries: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Record one redacted line. Only numbers and kind names are written.
    pub fn record(&mut self, line: &LogLine, outcome: &RedactionOutcome) -> io::Result<()> {
        if !outcome.modified {
            return Ok(());
        }
        self.entries += 1;
        if let Some(spool) = self.spool.as_mut() {
            writeln!(
                spool,
                "{}: line {} at offset {} redacted ({})",
                self.label,
                line.number,
                line.start,
                outcome.kinds_label()
            )?;
        }
        Ok(())
    }

    /// Closing status line for the batch
    pub fn close(&mut self, status: &str) -> io::Result<()> {
        if let Some(spool) = self.spool.as_mut() {
            writeln!(spool, "{}: {} ({} lines redacted)", self.label, status, self.entries)?;
        }
        Ok(())
    }

    fn into_spool(self) -> io::Result<Option<File>> {
        match self.spool {
            Some(writer) => {
                let mut file = writer.into_inner().map_err(|e| e.into_error())?;
                file.seek(SeekFrom::Start(0))?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }
}

/// Shared append-only notice log
pub struct NoticeLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl NoticeLog {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a finished batch in one serialized copy
    pub fn append(&self, batch: NoticeBatch) -> io::Result<u64> {
        let Some(mut spool) = batch.into_spool()? else {
            return Ok(0);
        };
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "notice log lock poisoned"))?;
        let copied = io::copy(&mut spool, &mut *file)?;
        file.flush()?;
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn redacted(had_ssn: bool, had_cc: bool) -> RedactionOutcome {
        RedactionOutcome {
            modified: true,
            had_ssn,
            had_cc,
            masks_written: 1,
        }
    }

    #[test]
    fn test_batch_append() {
        let temp_dir = TempDir::new().unwrap();
        let log = NoticeLog::open(&temp_dir.path().join("redacted.log")).unwrap();

        let mut batch = NoticeBatch::new("a.log.gz").unwrap();
        batch.record(&LogLine { number: 2, start: 10, end: 30 }, &redacted(true, false)).unwrap();
        batch.record(&LogLine { number: 3, start: 30, end: 40 }, &RedactionOutcome::default()).unwrap();
        batch.record(&LogLine { number: 5, start: 50, end: 90 }, &redacted(true, true)).unwrap();
        batch.close("ok").unwrap();
        assert_eq!(batch.entries(), 2);

        log.append(batch).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "a.log.gz: line 2 at offset 10 redacted (SSN)\n\
             a.log.gz: line 5 at offset 50 redacted (SSN+CC)\n\
             a.log.gz: ok (2 lines redacted)\n"
        );
    }

    #[test]
    fn test_batches_do_not_interleave() {
        let temp_dir = TempDir::new().unwrap();
        let log = NoticeLog::open(&temp_dir.path().join("redacted.log")).unwrap();

        let mut first = NoticeBatch::new("a").unwrap();
        let mut second = NoticeBatch::new("b").unwrap();
        for n in 1..=3 {
            let line = LogLine { number: n, start: 0, end: 1 };
            first.record(&line, &redacted(false, true)).unwrap();
            second.record(&line, &redacted(false, true)).unwrap();
        }
        log.append(second).unwrap();
        log.append(first).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let labels: Vec<_> = content.lines().map(|l| &l[..1]).collect();
        assert_eq!(labels, vec!["b", "b", "b", "a", "a", "a"]);
    }

    #[test]
    fn test_disabled_batch() {
        let temp_dir = TempDir::new().unwrap();
        let log = NoticeLog::open(&temp_dir.path().join("redacted.log")).unwrap();

        let mut batch = NoticeBatch::disabled("x");
        batch.record(&LogLine { number: 1, start: 0, end: 5 }, &redacted(true, false)).unwrap();
        assert_eq!(batch.entries(), 1);
        assert_eq!(log.append(batch).unwrap(), 0);
    }
}
