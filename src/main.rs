//! Logscrub - PII redaction for large gzip-compressed log files
//!
//! Main entry point for the command-line application.

use bytesize::ByteSize;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

use logscrub::cli::Args;
use logscrub::config::RunConfig;
use logscrub::dispatcher::{collect_inputs, Dispatcher, RunSummary};
use logscrub::output::OutputPaths;
use logscrub::progress::{
    print_banner, print_bullet, print_error, print_header, print_info, print_success, print_warning,
};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still wins
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(&format!("{}", e));

            // Print chain of errors
            for cause in e.chain().skip(1) {
                print_error(&format!("  Caused by: {}", cause));
            }

            process::exit(2);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    let config = RunConfig::from_args(&args)?;

    let inputs = collect_inputs(
        &args.inputs,
        config.recursive,
        &config.extensions,
        &config.pipeline.output_suffix,
    );
    if inputs.is_empty() {
        print_warning("No files found to process!");
        return Ok(0);
    }

    if !config.quiet && config.verbose {
        print_config(&config, &inputs);
    }

    if config.dry_run {
        dry_run_report(&config, &inputs);
        return Ok(0);
    }

    let dispatcher = Dispatcher::new(&config)?;
    let summary = dispatcher.run(&inputs)?;

    if !config.quiet {
        print_results(&summary);
        dispatcher.stats().print_summary();
    } else {
        for report in &summary.reports {
            if let Err(failure) = &report.result {
                print_error(&format!("{:?}: {}", report.input, failure));
            }
        }
    }

    Ok(summary.exit_code())
}

/// Print per-file outcome
fn print_results(summary: &RunSummary) {
    print_header("Results");

    for report in &summary.reports {
        match &report.result {
            Ok(success) => {
                print_success(&format!("{:?} -> {:?}", report.input, success.paths.output));
                if !success.metadata_warnings.is_empty() {
                    print_warning(&format!(
                        "{} metadata field(s) not copied onto {:?}",
                        success.metadata_warnings.len(),
                        success.paths.output
                    ));
                }
            }
            Err(failure) => print_error(&format!("{:?}: {}", report.input, failure)),
        }
    }
}

/// Print configuration summary
fn print_config(config: &RunConfig, inputs: &[PathBuf]) {
    print_header("Configuration");

    print_info(&format!("Inputs:       {}", inputs.len()));
    match &config.pipeline.output_dir {
        Some(dir) => print_info(&format!("Output dir:   {:?}", dir)),
        None => print_info("Output dir:   next to each input"),
    }
    print_info(&format!("Style:        {:?}", config.pipeline.style));
    print_info(&format!("Suffix:       {}", config.pipeline.output_suffix));
    print_info(&format!("Level:        {}", config.pipeline.compression_level));
    match &config.notice_log {
        Some(path) => print_info(&format!("Notice log:   {:?}", path)),
        None => print_info("Notice log:   disabled"),
    }
    print_info(&format!("Buffer size:  {}", ByteSize(config.pipeline.buffer_size as u64)));
    print_info(&format!("Jobs:         {}", config.jobs));
}

/// Dry run report
fn dry_run_report(config: &RunConfig, inputs: &[PathBuf]) {
    print_header("DRY RUN - No files will be written");

    for input in inputs {
        let paths = OutputPaths::for_input(
            input,
            config.pipeline.output_dir.as_deref(),
            &config.pipeline.output_suffix,
        );
        let size = fs::metadata(input).map(|m| m.len()).ok();
        match size {
            Some(size) => print_bullet(&format!("{:?} ({})", input, ByteSize(size))),
            None => print_bullet(&format!("{:?} (missing)", input)),
        }
        print_info(&format!("  -> {:?}", paths.output));
        print_info(&format!("  -> {:?}", paths.audit));
    }

    match &config.notice_log {
        Some(path) => print_bullet(&format!("Notice log: {:?}", path)),
        None => print_bullet("Notice log: disabled"),
    }
}
