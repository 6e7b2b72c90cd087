//! Artifact naming
//!
//! Derives the redacted output, audit sidecar and working copy locations for
//! an input file. All three live in one directory so the final renames stay
//! on a single filesystem.

use std::path::{Path, PathBuf};

/// Default suffix of the redacted gzip output
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".redacted.gz";

/// Suffix of the audit sidecar
pub const AUDIT_SUFFIX: &str = ".audit";

/// Suffix of the hidden decompressed working copy
pub const WORKING_SUFFIX: &str = ".work";

/// Suffix of the hidden compressed output before its final rename
pub const OUTPUT_TEMP_SUFFIX: &str = ".gz.tmp";

/// Where the artifacts for one input go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory holding output, sidecar and working copy
    pub dir: PathBuf,
    /// Input file name without a trailing `.gz`
    pub stem: String,
    pub output: PathBuf,
    pub audit: PathBuf,
}

impl OutputPaths {
    /// Resolve artifact paths for `input`.
    ///
    /// `output_dir` overrides the input's own directory.
    pub fn for_input(input: &Path, output_dir: Option<&Path>, suffix: &str) -> Self {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let stem = file_name
            .strip_suffix(".gz")
            .filter(|s| !s.is_empty())
            .unwrap_or(file_name.as_str())
            .to_string();

        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Self {
            output: dir.join(format!("{}{}", stem, suffix)),
            audit: dir.join(format!("{}{}", stem, AUDIT_SUFFIX)),
            dir,
            stem,
        }
    }

    /// Prefix for the hidden working copy
    pub fn working_prefix(&self) -> String {
        format!(".{}.", self.stem)
    }
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
