//! Command-line interface definition for logscrub
//!
//! Provides argument parsing and validation for the log redaction tool.

use clap::Parser;
use std::path::PathBuf;

use crate::output::DEFAULT_OUTPUT_SUFFIX;
use crate::pattern::MatchStyle;
use crate::pipeline::DEFAULT_COMPRESSION_LEVEL;

/// PII redaction for large gzip-compressed log files
///
/// Masks SSN and credit card numbers in place and writes a redacted gzip
/// copy plus an audit sidecar per input. Originals are never modified.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "logscrub",
    author = "m0h1nd4",
    version,
    about = "PII redaction for large gzip-compressed log files",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                              LOGSCRUB v1.0.0                                 ║
║                 SSN / Credit Card Redaction for Gzip Logs                    ║
╚══════════════════════════════════════════════════════════════════════════════╝

Decompresses each input next to its output, memory-maps the working copy,
masks every SSN (ddd-dd-dddd) and credit card number (dddd-dddd-dddd-dddd)
in place and recompresses it. For app.log.gz this produces:

    app.log.redacted.gz   redacted copy (original left untouched)
    app.log.audit         line and redaction counts, no log content

Notices for every redacted line (line number, offset, kind) are appended
to a shared notice log, one file at a time.

EXAMPLES:
    # Redact two files using all cores
    logscrub app-1.log.gz app-2.log.gz

    # Redact every .gz under a directory, 4 files at a time
    logscrub /var/log/archive --recursive --jobs 4

    # Only redact keyed entries such as SSN="123-45-6789"
    logscrub app.log.gz --style keyed

    # Write artifacts elsewhere and skip the notice log
    logscrub app.log.gz -o /srv/redacted --no-notice-log
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/logscrub"
)]
pub struct Args {
    /// Gzip-compressed log files or directories containing them
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of files processed concurrently (default: auto-detect)
    #[arg(short = 'j', long, value_name = "NUM")]
    pub jobs: Option<usize>,

    /// Which PII forms to recognize
    #[arg(long, value_enum, default_value_t = MatchStyle::Bare)]
    pub style: MatchStyle,

    /// Gzip compression level for the redacted output (0-9)
    #[arg(long, value_name = "LEVEL", default_value_t = DEFAULT_COMPRESSION_LEVEL, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,

    /// Suffix of the redacted output file
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_OUTPUT_SUFFIX)]
    pub suffix: String,

    /// Shared log of redacted-line notices
    #[arg(long, value_name = "FILE", default_value = "redacted.log")]
    pub notice_log: PathBuf,

    /// Do not write the notice log
    #[arg(long, default_value_t = false)]
    pub no_notice_log: bool,

    /// Buffer size for gzip streams (default: 8MB)
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Process directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// File extensions picked up from directories (default: gz)
    #[arg(long, value_name = "EXT", default_value = "gz")]
    pub extensions: String,

    /// Dry run - show what would be written without touching any file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size)
    }

    /// Parse file extensions to process
    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Notice log path, unless disabled
    pub fn get_notice_log(&self) -> Option<PathBuf> {
        if self.no_notice_log {
            None
        } else {
            Some(self.notice_log.clone())
        }
    }
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Size too large: '{}'", size_str))
}
