//! Line scanning over a mapped buffer
//!
//! Lines are located with `memchr` and described by offset ranges; nothing
//! is copied out of the buffer. The scanner is a cursor rather than a
//! borrowing iterator so the driver can mutate the buffer between lines.

use crate::error::Result;
use crate::pattern::{PatternMatcher, PiiMatch};
use crate::redact::{RedactionEngine, RedactionOutcome};

/// One line of the buffer: `[start, end)`, including its trailing `\n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine {
    /// 1-based line number
    pub number: u64,
    pub start: usize,
    pub end: usize,
}

impl LogLine {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// Cursor over the lines of a buffer
#[derive(Debug, Default, Clone)]
pub struct LineScanner {
    position: usize,
    number: u64,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next line of `buf`, or `None` once the buffer is exhausted
    pub fn next_line(&mut self, buf: &[u8]) -> Option<LogLine> {
        if self.position >= buf.len() {
            return None;
        }

        let remaining = &buf[self.position..];
        let line_len = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let start = self.position;
        self.position += line_len;
        self.number += 1;

        Some(LogLine {
            number: self.number,
            start,
            end: self.position,
        })
    }

    /// Rewind to the start of the buffer
    pub fn reset(&mut self) {
        self.position = 0;
        self.number = 0;
    }

    pub fn lines_seen(&self) -> u64 {
        self.number
    }
}

/// Read-only iterator over the lines of a buffer
pub struct Lines<'a> {
    buf: &'a [u8],
    cursor: LineScanner,
}

impl<'a> Lines<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            cursor: LineScanner::new(),
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = LogLine;

    fn next(&mut self) -> Option<LogLine> {
        self.cursor.next_line(self.buf)
    }
}

/// Run one pass over `buf`: match each line and redact it in place.
///
/// `on_line` sees every line with its outcome, in order. The first fatal
/// error stops the pass; lines before it have already been rewritten.
pub fn scan<F>(
    buf: &mut [u8],
    matcher: &PatternMatcher,
    engine: &RedactionEngine,
    mut on_line: F,
) -> Result<u64>
where
    F: FnMut(&LogLine, &RedactionOutcome),
{
    let mut scanner = LineScanner::new();
    let mut matches: Vec<PiiMatch> = Vec::new();

    while let Some(line) = scanner.next_line(buf) {
        matcher.find_into(line.bytes(buf), &mut matches);
        let outcome = engine.apply(buf, &line, &matches)?;
        on_line(&line, &outcome);
    }

    Ok(scanner.lines_seen())
}
