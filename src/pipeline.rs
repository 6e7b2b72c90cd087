//! Per-file processing pipeline
//!
//! Decompress to a working copy, map it, redact every line in place,
//! recompress, copy metadata, write the audit sidecar. The original input is
//! only ever opened read-only. Working copy and output are temp files in the
//! output directory until the final rename, so a failed run leaves nothing
//! behind.

use flate2::read::MultiGzDecoder;
use flate2::{Compression, GzBuilder};
use memmap2::MmapMut;
use std::fmt;
use std::fs::{self, File, Metadata};
use std::io::{self, BufReader, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tempfile::NamedTempFile;

use crate::audit::{AuditRecord, AuditRecorder};
use crate::error::{MetadataWarning, RedactError, Result};
use crate::notice::NoticeBatch;
use crate::output::{ensure_output_dir, OutputPaths, DEFAULT_OUTPUT_SUFFIX, OUTPUT_TEMP_SUFFIX, WORKING_SUFFIX};
use crate::pattern::{MatchStyle, PatternMatcher};
use crate::redact::RedactionEngine;
use crate::scanner;

/// Default buffer size for gzip streams (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Default gzip level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Settings shared by every file execution
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Output directory (None: next to each input)
    pub output_dir: Option<PathBuf>,
    pub style: MatchStyle,
    pub compression_level: u32,
    pub output_suffix: String,
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            style: MatchStyle::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decompressing,
    MappedScanning,
    Recompressing,
    MetadataCopy,
    AuditWritten,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decompressing => "decompressing",
            Self::MappedScanning => "scanning",
            Self::Recompressing => "recompressing",
            Self::MetadataCopy => "copying metadata",
            Self::AuditWritten => "writing audit",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// A file that reached `Done`
#[derive(Debug)]
pub struct PipelineSuccess {
    pub record: AuditRecord,
    pub paths: OutputPaths,
    pub metadata_warnings: Vec<MetadataWarning>,
}

/// A file that reached `Failed`, with the stage it failed in
#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub error: RedactError,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} while {}: {}", self.error.kind(), self.stage, self.error)
    }
}

/// Runs the redaction stages for one input at a time
pub struct FileProcessingPipeline {
    config: PipelineConfig,
    matcher: PatternMatcher,
    engine: RedactionEngine,
    /// Bare recognizer for file names, whatever the body style
    label_matcher: PatternMatcher,
}

impl FileProcessingPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let engine = RedactionEngine::new(config.style);
        Self::with_engine(config, engine)
    }

    fn with_engine(config: PipelineConfig, engine: RedactionEngine) -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(config.style)?,
            engine,
            label_matcher: PatternMatcher::new(MatchStyle::Bare)?,
            config,
        })
    }

    /// File name of `input` as written to audit and notice output, with any
    /// PII-shaped text masked
    pub fn label_for(&self, input: &Path) -> String {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        RedactionEngine::new(MatchStyle::Bare).scrub_label(&self.label_matcher, &name)
    }

    /// Artifact paths for `input` under this configuration
    pub fn paths_for(&self, input: &Path) -> OutputPaths {
        OutputPaths::for_input(input, self.config.output_dir.as_deref(), &self.config.output_suffix)
    }

    /// Process one input file end to end
    pub fn run(&self, input: &Path, notices: &mut NoticeBatch) -> std::result::Result<PipelineSuccess, PipelineFailure> {
        log::debug!("Starting processing on file {:?}", input);

        let mut stage = Stage::Decompressing;
        match self.run_stages(input, notices, &mut stage) {
            Ok(success) => Ok(success),
            Err(error) => {
                log::error!(
                    "Processing failed for {:?} while {} ({}): {}",
                    input,
                    stage,
                    error.kind(),
                    error
                );
                Err(PipelineFailure { stage, error })
            }
        }
    }

    fn run_stages(&self, input: &Path, notices: &mut NoticeBatch, stage: &mut Stage) -> Result<PipelineSuccess> {
        let meta = validate_input(input)?;
        let paths = self.paths_for(input);
        ensure_output_dir(&paths.dir)?;
        if is_same_file(&paths.output, input) || is_same_file(&paths.audit, input) {
            return Err(RedactError::InvalidInput {
                path: input.to_path_buf(),
                reason: "output would overwrite the input".to_string(),
            });
        }

        let recorder = AuditRecorder::start();

        *stage = Stage::Decompressing;
        let mut working = self.decompress(input, &meta, &paths)?;

        *stage = Stage::MappedScanning;
        let recorder = self.scan_working_copy(&working, recorder, notices)?;

        *stage = Stage::Recompressing;
        let output = self.recompress(&mut working, &meta, &paths)?;
        if let Err(e) = working.close() {
            log::warn!("Could not remove working copy for {:?}: {}", input, e);
        }

        *stage = Stage::MetadataCopy;
        let metadata_warnings = copy_metadata(&meta, output.path());
        output.persist(&paths.output).map_err(|e| RedactError::Recompression {
            path: paths.output.clone(),
            source: e.error,
        })?;

        *stage = Stage::AuditWritten;
        let record = recorder.finish(self.label_for(input));
        if let Err(e) = record.write_sidecar(&paths.audit) {
            let _ = fs::remove_file(&paths.output);
            return Err(e);
        }

        *stage = Stage::Done;
        log::info!(
            "Redacted {:?}: {} lines processed, {} redacted ({} SSN, {} CC) in {:.3}s",
            input,
            record.lines_processed,
            record.lines_redacted,
            record.ssn_redacted_count,
            record.cc_redacted_count,
            record.elapsed.as_secs_f64()
        );

        Ok(PipelineSuccess {
            record,
            paths,
            metadata_warnings,
        })
    }

    /// Decompress `input` into a fresh working copy next to the output
    fn decompress(&self, input: &Path, meta: &Metadata, paths: &OutputPaths) -> Result<NamedTempFile> {
        let decompression_err = |source| RedactError::Decompression {
            path: input.to_path_buf(),
            source,
        };

        if meta.len() == 0 {
            return Err(decompression_err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input is empty, not a gzip stream",
            )));
        }

        let source = File::open(input).map_err(decompression_err)?;
        let mut decoder = MultiGzDecoder::new(BufReader::with_capacity(self.config.buffer_size, source));

        let mut working = tempfile::Builder::new()
            .prefix(&paths.working_prefix())
            .suffix(WORKING_SUFFIX)
            .tempfile_in(&paths.dir)?;

        let bytes = {
            let mut writer = BufWriter::with_capacity(self.config.buffer_size, working.as_file_mut());
            let bytes = io::copy(&mut decoder, &mut writer).map_err(decompression_err)?;
            writer.flush()?;
            bytes
        };

        log::debug!(
            "Decompressed {:?} into {:?} ({} bytes)",
            input,
            working.path(),
            bytes
        );
        Ok(working)
    }

    /// Map the working copy and redact it in place. Empty copies are not mapped.
    fn scan_working_copy(
        &self,
        working: &NamedTempFile,
        mut recorder: AuditRecorder,
        notices: &mut NoticeBatch,
    ) -> Result<AuditRecorder> {
        let mapping_err = |source| RedactError::Mapping {
            path: working.path().to_path_buf(),
            source,
        };

        let len = working.as_file().metadata().map_err(mapping_err)?.len();
        if len == 0 {
            return Ok(recorder);
        }

        // SAFETY: the working copy is a private temp file created by this
        // execution; nothing else opens or truncates it while it is mapped.
        let mut map = unsafe { MmapMut::map_mut(working.as_file()) }.map_err(mapping_err)?;

        let mut notice_failed = false;
        scanner::scan(&mut map, &self.matcher, &self.engine, |line, outcome| {
            recorder.record_line(outcome);
            if let Err(e) = notices.record(line, outcome) {
                if !notice_failed {
                    log::warn!("Could not spool redaction notice: {}", e);
                    notice_failed = true;
                }
            }
        })?;

        map.flush().map_err(mapping_err)?;
        drop(map);

        log::debug!(
            "Scanned {:?}: {} lines",
            working.path(),
            recorder.lines_processed()
        );
        Ok(recorder)
    }

    /// Compress the redacted working copy into a temp file beside the final output
    fn recompress(&self, working: &mut NamedTempFile, meta: &Metadata, paths: &OutputPaths) -> Result<NamedTempFile> {
        let recompression_err = |source| RedactError::Recompression {
            path: paths.output.clone(),
            source,
        };

        let output = tempfile::Builder::new()
            .prefix(&paths.working_prefix())
            .suffix(OUTPUT_TEMP_SUFFIX)
            .tempfile_in(&paths.dir)
            .map_err(recompression_err)?;

        working.as_file_mut().rewind().map_err(recompression_err)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, working.as_file());

        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs().min(u32::MAX as u64) as u32)
            .unwrap_or(0);
        let writer = BufWriter::with_capacity(self.config.buffer_size, output.as_file());
        let mut encoder = GzBuilder::new()
            .filename(paths.stem.as_bytes())
            .mtime(mtime)
            .write(writer, Compression::new(self.config.compression_level));

        io::copy(&mut reader, &mut encoder).map_err(recompression_err)?;
        let writer = encoder.finish().map_err(recompression_err)?;
        let file = writer.into_inner().map_err(|e| recompression_err(e.into_error()))?;
        file.sync_all().map_err(recompression_err)?;

        Ok(output)
    }
}

fn validate_input(input: &Path) -> Result<Metadata> {
    let meta = fs::metadata(input).map_err(|e| RedactError::InvalidInput {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !meta.is_file() {
        return Err(RedactError::InvalidInput {
            path: input.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    Ok(meta)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Best-effort copy of ownership, permissions and timestamps from `src`
pub fn copy_metadata(src: &Metadata, dst: &Path) -> Vec<MetadataWarning> {
    let mut warnings = Vec::new();
    let mut warn = |what: &'static str, source: io::Error| {
        warnings.push(MetadataWarning {
            what,
            path: dst.to_path_buf(),
            source,
        });
    };

    // Ownership first: chown may clear setuid/setgid bits
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Err(e) = std::os::unix::fs::chown(dst, Some(src.uid()), Some(src.gid())) {
            warn("ownership", e);
        }
    }

    if let Err(e) = fs::set_permissions(dst, src.permissions()) {
        warn("permissions", e);
    }

    let atime = filetime::FileTime::from_last_access_time(src);
    let mtime = filetime::FileTime::from_last_modification_time(src);
    if let Err(e) = filetime::set_file_times(dst, atime, mtime) {
        warn("timestamps", e);
    }

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternMatcher;
    use flate2::read::GzDecoder;
    use flate2::write::GzEncoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn write_gz(path: &Path, content: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content).unwrap();
        encoder.finish().unwrap();
    }

    fn read_gz(path: &Path) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(File::open(path).unwrap()).read_to_end(&mut out).unwrap();
        out
    }

    fn pipeline() -> FileProcessingPipeline {
        FileProcessingPipeline::new(PipelineConfig::default()).unwrap()
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    const SAMPLE: &[u8] = b"User SSN=\"123-45-6789\" logged in\n\
Card CC=\"4111-2222-3333-4444\" charged\n\
123-45-6789 paid with 4111-2222-3333-4444\n\
No sensitive data here\n";

    #[test]
    fn test_redacts_scenarios() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, SAMPLE);

        let mut notices = NoticeBatch::disabled("app.log.gz");
        let success = pipeline().run(&input, &mut notices).unwrap();

        let output = read_gz(&success.paths.output);
        assert_eq!(
            output,
            b"User SSN=\"xxx-xx-xxxx\" logged in\n\
Card CC=\"xxxx-xxxx-xxxx-xxxx\" charged\n\
xxx-xx-xxxx paid with xxxx-xxxx-xxxx-xxxx\n\
No sensitive data here\n"
                .to_vec()
        );
        assert_eq!(output.len(), SAMPLE.len());

        let record = &success.record;
        assert_eq!(record.file_name, "app.log.gz");
        assert_eq!(record.lines_processed, 4);
        assert_eq!(record.lines_redacted, 3);
        assert_eq!(record.ssn_redacted_count, 2);
        assert_eq!(record.cc_redacted_count, 2);
        assert_eq!(notices.entries(), 3);

        let audit = fs::read_to_string(&success.paths.audit).unwrap();
        assert_eq!(audit, record.render());
        assert_eq!(
            dir_entries(temp_dir.path()),
            vec!["app.log.audit", "app.log.gz", "app.log.redacted.gz"]
        );
    }

    #[test]
    fn test_output_has_no_pii() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        let mut content = Vec::new();
        for i in 0..500 {
            content.extend_from_slice(format!("row {i} id={:03}-45-6789 card=4111-2222-3333-{:04}\n", i % 1000, i).as_bytes());
        }
        write_gz(&input, &content);

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        let matcher = PatternMatcher::new(MatchStyle::Bare).unwrap();
        let output = read_gz(&success.paths.output);
        assert!(!matcher.contains_pii(&output));
        assert!(!matcher.contains_pii(fs::read_to_string(&success.paths.audit).unwrap().as_bytes()));
        assert_eq!(success.record.lines_processed, 500);
        assert_eq!(success.record.lines_redacted, 500);
    }

    #[test]
    fn test_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("empty.log.gz");
        write_gz(&input, b"");

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        assert_eq!(success.record.lines_processed, 0);
        assert_eq!(success.record.lines_redacted, 0);
        assert_eq!(success.record.ssn_redacted_count, 0);
        assert_eq!(success.record.cc_redacted_count, 0);
        assert!(read_gz(&success.paths.output).is_empty());
        assert!(success.paths.audit.exists());
    }

    #[test]
    fn test_final_line_without_newline() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("tail.gz");
        write_gz(&input, b"first\nlast 123-45-6789");

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        assert_eq!(success.record.lines_processed, 2);
        assert_eq!(success.record.ssn_redacted_count, 1);
        assert_eq!(read_gz(&success.paths.output), b"first\nlast xxx-xx-xxxx".to_vec());
    }

    #[test]
    fn test_original_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, SAMPLE);
        let old = filetime::FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_times(&input, old, old).unwrap();

        let before_bytes = fs::read(&input).unwrap();
        let before_meta = fs::metadata(&input).unwrap();

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        let after_meta = fs::metadata(&input).unwrap();
        assert_eq!(fs::read(&input).unwrap(), before_bytes);
        assert_eq!(after_meta.permissions(), before_meta.permissions());
        assert_eq!(
            filetime::FileTime::from_last_modification_time(&after_meta),
            filetime::FileTime::from_last_modification_time(&before_meta)
        );

        // Timestamps and permissions carried over to the output
        let out_meta = fs::metadata(&success.paths.output).unwrap();
        assert_eq!(filetime::FileTime::from_last_modification_time(&out_meta), old);
        assert_eq!(out_meta.permissions(), before_meta.permissions());
    }

    #[test]
    fn test_corrupt_input_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.log.gz");
        fs::write(&input, b"this is not gzip data at all").unwrap();
        let before = fs::read(&input).unwrap();

        let failure = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap_err();

        assert_eq!(failure.stage, Stage::Decompressing);
        assert_eq!(failure.error.kind(), "DecompressionError");
        assert_eq!(fs::read(&input).unwrap(), before);
        assert_eq!(dir_entries(temp_dir.path()), vec!["broken.log.gz"]);
    }

    #[test]
    fn test_truncated_input_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("cut.log.gz");
        write_gz(&input, SAMPLE);
        let bytes = fs::read(&input).unwrap();
        fs::write(&input, &bytes[..bytes.len() / 2]).unwrap();

        let failure = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap_err();

        assert_eq!(failure.error.kind(), "DecompressionError");
        assert_eq!(dir_entries(temp_dir.path()), vec!["cut.log.gz"]);
    }

    #[test]
    fn test_zero_byte_input_is_not_gzip() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("zero.gz");
        File::create(&input).unwrap();

        let failure = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap_err();
        assert_eq!(failure.error.kind(), "DecompressionError");
        assert_eq!(dir_entries(temp_dir.path()), vec!["zero.gz"]);
    }

    #[test]
    fn test_scan_failure_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, b"clean line\nid 123-45-6789\n");
        let before = fs::read(&input).unwrap();

        // Keyed masks never fit bare matches
        let pipeline =
            FileProcessingPipeline::with_engine(PipelineConfig::default(), RedactionEngine::new(MatchStyle::Keyed))
                .unwrap();
        let failure = pipeline.run(&input, &mut NoticeBatch::disabled("x")).unwrap_err();

        assert_eq!(failure.stage, Stage::MappedScanning);
        assert_eq!(failure.error.kind(), "RedactionInvariantError");
        assert_eq!(fs::read(&input).unwrap(), before);
        assert_eq!(dir_entries(temp_dir.path()), vec!["app.log.gz"]);
    }

    #[test]
    fn test_output_rename_failure_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, SAMPLE);
        let before = fs::read(&input).unwrap();
        // A directory where the output should go makes the final rename fail
        let blocker = temp_dir.path().join("app.log.redacted.gz");
        fs::create_dir(&blocker).unwrap();

        let failure = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap_err();

        assert_eq!(failure.error.kind(), "RecompressionError");
        assert_eq!(fs::read(&input).unwrap(), before);
        assert_eq!(dir_entries(temp_dir.path()), vec!["app.log.gz", "app.log.redacted.gz"]);
        assert!(blocker.is_dir());
        assert!(dir_entries(&blocker).is_empty());
    }

    #[test]
    fn test_file_name_is_scrubbed() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("cust-123-45-6789.log.gz");
        write_gz(&input, b"plain\n");

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        assert_eq!(success.record.file_name, "cust-xxx-xx-xxxx.log.gz");
        let audit = fs::read_to_string(&success.paths.audit).unwrap();
        assert!(!PatternMatcher::new(MatchStyle::Bare).unwrap().contains_pii(audit.as_bytes()));
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let failure = pipeline()
            .run(&temp_dir.path().join("nope.gz"), &mut NoticeBatch::disabled("x"))
            .unwrap_err();
        assert_eq!(failure.error.kind(), "InvalidInputError");
    }

    #[test]
    fn test_multi_member_gzip() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("multi.gz");
        let first = temp_dir.path().join("a.gz");
        let second = temp_dir.path().join("b.gz");
        write_gz(&first, b"one 123-45-6789\n");
        write_gz(&second, b"two 4111-2222-3333-4444\n");
        let mut joined = fs::read(&first).unwrap();
        joined.extend(fs::read(&second).unwrap());
        fs::write(&input, joined).unwrap();

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();
        assert_eq!(success.record.lines_processed, 2);
        assert_eq!(
            read_gz_multi(&success.paths.output),
            b"one xxx-xx-xxxx\ntwo xxxx-xxxx-xxxx-xxxx\n".to_vec()
        );
    }

    fn read_gz_multi(path: &Path) -> Vec<u8> {
        let mut out = Vec::new();
        MultiGzDecoder::new(File::open(path).unwrap()).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_output_dir_and_keyed_style() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, b"SSN=\"123-45-6789\" ref=987-65-4321\n");
        let out_dir = temp_dir.path().join("out");

        let config = PipelineConfig {
            output_dir: Some(out_dir.clone()),
            style: MatchStyle::Keyed,
            ..PipelineConfig::default()
        };
        let success = FileProcessingPipeline::new(config)
            .unwrap()
            .run(&input, &mut NoticeBatch::disabled("x"))
            .unwrap();

        assert_eq!(success.paths.output, out_dir.join("app.log.redacted.gz"));
        assert_eq!(read_gz(&success.paths.output), b"SSN=\"xxx-xx-xxxx\" ref=987-65-4321\n".to_vec());
        assert_eq!(dir_entries(&out_dir), vec!["app.log.audit", "app.log.redacted.gz"]);
    }

    #[test]
    fn test_gzip_header_name() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("app.log.gz");
        write_gz(&input, b"x\n");

        let success = pipeline().run(&input, &mut NoticeBatch::disabled("x")).unwrap();

        let mut decoder = GzDecoder::new(File::open(&success.paths.output).unwrap());
        let mut body = Vec::new();
        decoder.read_to_end(&mut body).unwrap();
        assert_eq!(body, b"x\n".to_vec());
        let header = decoder.header().unwrap();
        assert_eq!(header.filename(), Some(&b"app.log"[..]));
    }
}
