//! Progress display module
//!
//! Provides styled progress bars, status lines and the end-of-run summary.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::audit::AuditRecord;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██╗      ██████╗  ██████╗ ███████╗ ██████╗██████╗ ██╗   ██╗██████╗        ║
║   ██║     ██╔═══██╗██╔════╝ ██╔════╝██╔════╝██╔══██╗██║   ██║██╔══██╗       ║
║   ██║     ██║   ██║██║  ███╗███████╗██║     ██████╔╝██║   ██║██████╔╝       ║
║   ██║     ██║   ██║██║   ██║╚════██║██║     ██╔══██╗██║   ██║██╔══██╗       ║
║   ███████╗╚██████╔╝╚██████╔╝███████║╚██████╗██║  ██║╚██████╔╝██████╔╝       ║
║   ╚══════╝ ╚═════╝  ╚═════╝ ╚══════╝ ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚═════╝        ║
║                                                                              ║
║                 SSN / Credit Card Redaction for Gzip Logs                    ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a bytes-based progress bar
pub fn create_bytes_progress_bar(total_bytes: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Run-wide totals, updated once per finished file
#[derive(Debug)]
pub struct RunStats {
    pub total_files: AtomicU64,
    pub processed_files: AtomicU64,
    pub failed_files: AtomicU64,
    pub total_bytes: AtomicU64,
    pub processed_bytes: AtomicU64,
    pub total_lines: AtomicU64,
    pub redacted_lines: AtomicU64,
    pub ssn_lines: AtomicU64,
    pub cc_lines: AtomicU64,
    pub start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            total_files: AtomicU64::new(0),
            processed_files: AtomicU64::new(0),
            failed_files: AtomicU64::new(0),
            total_bytes: AtomicU64::new(0),
            processed_bytes: AtomicU64::new(0),
            total_lines: AtomicU64::new(0),
            redacted_lines: AtomicU64::new(0),
            ssn_lines: AtomicU64::new(0),
            cc_lines: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn add_file(&self, size: u64) {
        self.total_files.fetch_add(1, Ordering::Relaxed);
        self.total_bytes.fetch_add(size, Ordering::Relaxed);
    }

    pub fn complete_file(&self, size: u64, record: &AuditRecord) {
        self.processed_files.fetch_add(1, Ordering::Relaxed);
        self.processed_bytes.fetch_add(size, Ordering::Relaxed);
        self.total_lines.fetch_add(record.lines_processed, Ordering::Relaxed);
        self.redacted_lines.fetch_add(record.lines_redacted, Ordering::Relaxed);
        self.ssn_lines.fetch_add(record.ssn_redacted_count, Ordering::Relaxed);
        self.cc_lines.fetch_add(record.cc_redacted_count, Ordering::Relaxed);
    }

    pub fn fail_file(&self) {
        self.failed_files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_files(&self) -> u64 {
        self.total_files.load(Ordering::Relaxed)
    }

    pub fn get_processed_files(&self) -> u64 {
        self.processed_files.load(Ordering::Relaxed)
    }

    pub fn get_failed_files(&self) -> u64 {
        self.failed_files.load(Ordering::Relaxed)
    }

    pub fn get_total_lines(&self) -> u64 {
        self.total_lines.load(Ordering::Relaxed)
    }

    pub fn get_redacted_lines(&self) -> u64 {
        self.redacted_lines.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.get_total_lines() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let failed = self.get_failed_files();

        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                    REDACTION COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}/{}", "Files redacted: ".green(),
            self.get_processed_files(), self.get_total_files());
        if failed > 0 {
            println!("  {} {}", "Files failed:   ".red(), failed.to_string().red());
        }
        println!("  {} {}", "Input size:     ".green(),
            ByteSize(self.processed_bytes.load(Ordering::Relaxed)));
        println!();

        println!("  {} {}", "Lines scanned:  ".green(), format_number(self.get_total_lines()));
        println!("  {} {}", "Lines redacted: ".green().bold(),
            format_number(self.get_redacted_lines()).green().bold());
        println!("  {} {}", "  with SSN:     ".green(),
            format_number(self.ssn_lines.load(Ordering::Relaxed)));
        println!("  {} {}", "  with CC:      ".green(),
            format_number(self.cc_lines.load(Ordering::Relaxed)));

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        println!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}
