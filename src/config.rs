//! Run configuration
//!
//! Translates parsed command-line arguments into the settings used by the
//! dispatcher and the per-file pipeline.

use std::path::PathBuf;

use crate::cli::Args;
use crate::pipeline::PipelineConfig;

/// Settings for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pipeline: PipelineConfig,
    /// Size of the worker pool
    pub jobs: usize,
    pub notice_log: Option<PathBuf>,
    pub recursive: bool,
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let jobs = match args.jobs {
            Some(0) => anyhow::bail!("--jobs must be at least 1"),
            Some(n) => n,
            None => num_cpus::get(),
        };

        if args.suffix.is_empty() {
            anyhow::bail!("--suffix must not be empty");
        }

        Ok(Self {
            pipeline: PipelineConfig {
                output_dir: args.output_dir.clone(),
                style: args.style,
                compression_level: args.level,
                output_suffix: args.suffix.clone(),
                buffer_size: args.parse_buffer_size()?,
            },
            jobs,
            notice_log: args.get_notice_log(),
            recursive: args.recursive,
            extensions: args.get_extensions(),
            dry_run: args.dry_run,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MatchStyle;
    use clap::Parser;

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from([
            "logscrub", "a.gz", "-o", "/tmp/out", "--jobs", "2", "--style", "keyed", "--buffer-size", "1MB",
        ])
        .unwrap();
        let config = RunConfig::from_args(&args).unwrap();

        assert_eq!(config.jobs, 2);
        assert_eq!(config.pipeline.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.pipeline.style, MatchStyle::Keyed);
        assert_eq!(config.pipeline.buffer_size, 1024 * 1024);
        assert_eq!(config.notice_log, Some(PathBuf::from("redacted.log")));
    }

    #[test]
    fn test_jobs_default_to_cores() {
        let args = Args::try_parse_from(["logscrub", "a.gz"]).unwrap();
        let config = RunConfig::from_args(&args).unwrap();
        assert_eq!(config.jobs, num_cpus::get());
    }

    #[test]
    fn test_rejects_zero_jobs() {
        let args = Args::try_parse_from(["logscrub", "a.gz", "-j", "0"]).unwrap();
        assert!(RunConfig::from_args(&args).is_err());
    }
}
