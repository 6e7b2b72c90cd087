//! In-place masking of matched spans
//!
//! A mapped buffer cannot grow or shrink, so every redaction is a
//! same-length overwrite. The engine checks that invariant for every match
//! on a line before it writes any byte of that line.

use crate::error::{RedactError, Result};
use crate::pattern::{MatchStyle, PatternMatcher, PiiKind, PiiMatch};
use crate::scanner::LogLine;

/// What happened to one line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedactionOutcome {
    pub modified: bool,
    pub had_ssn: bool,
    pub had_cc: bool,
    /// Number of spans overwritten on this line
    pub masks_written: u32,
}

impl RedactionOutcome {
    /// Kind label for notices: `SSN`, `CC` or `SSN+CC`
    pub fn kinds_label(&self) -> &'static str {
        match (self.had_ssn, self.had_cc) {
            (true, true) => "SSN+CC",
            (true, false) => "SSN",
            (false, true) => "CC",
            (false, false) => "none",
        }
    }
}

/// Writes masks over matched spans
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionEngine {
    style: MatchStyle,
}

impl RedactionEngine {
    pub fn new(style: MatchStyle) -> Self {
        Self { style }
    }

    /// Overwrite every match of `line` in `buf` with its mask.
    ///
    /// Match offsets are relative to `line.start`. Fails without touching
    /// the buffer if any match would change the line length.
    pub fn apply(&self, buf: &mut [u8], line: &LogLine, matches: &[PiiMatch]) -> Result<RedactionOutcome> {
        if matches.is_empty() {
            return Ok(RedactionOutcome::default());
        }

        for m in matches {
            let mask = self.style.mask(m.kind);
            if m.end < m.start || m.len() != mask.len() || line.start + m.end > line.end {
                return Err(RedactError::RedactionInvariant {
                    line: line.number,
                    kind: m.kind,
                    expected: mask.len(),
                    found: m.end.saturating_sub(m.start),
                });
            }
        }

        let mut outcome = RedactionOutcome::default();
        for m in matches {
            let mask = self.style.mask(m.kind);
            let start = line.start + m.start;
            let end = line.start + m.end;
            log::debug!(
                "Redacting {} on line {} at offset slice [{}, {})",
                m.kind,
                line.number,
                start,
                end
            );
            buf[start..end].copy_from_slice(mask);

            match m.kind {
                PiiKind::Ssn => outcome.had_ssn = true,
                PiiKind::CreditCard => outcome.had_cc = true,
            }
            outcome.masks_written += 1;
        }
        outcome.modified = true;

        Ok(outcome)
    }

    /// Masked copy of a short label such as a file name. A label that cannot
    /// be masked is replaced entirely.
    pub fn scrub_label(&self, matcher: &PatternMatcher, label: &str) -> String {
        let mut buf = label.as_bytes().to_vec();
        let line = LogLine {
            number: 0,
            start: 0,
            end: buf.len(),
        };
        let matches = matcher.find(&buf);
        match self.apply(&mut buf, &line, &matches) {
            Ok(_) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => "x".repeat(label.len()),
        }
    }
}
