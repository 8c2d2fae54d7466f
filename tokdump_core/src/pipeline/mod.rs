//! Tokenization pipeline
//!
//! Files are processed strictly in order, one at a time. Output already
//! written for earlier files stays written if a later file fails.

mod error;

use crate::config::RuntimeConfig;
use crate::file_processor::{FileMetadata, FileProcessor, FileProcessorError, LineReader};
use crate::invocation::{Invocation, Mode};
use crate::lexical::{LexicalAnalyzer, LexicalMetrics};
use crate::logging::{self, codes};
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use error::PipelineError;

/// What tokenizing one file produced
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub mode: Mode,
    /// Lines that exceeded the configured bound and were delivered in chunks
    pub split_lines: usize,
    pub duration_ms: f64,
    pub metrics: LexicalMetrics,
}

/// Totals across every file of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileSummary>,
}

impl RunSummary {
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.metrics.lines).sum()
    }

    pub fn total_tokens(&self) -> usize {
        self.files.iter().map(|f| f.metrics.total_tokens).sum()
    }

    pub fn emitted_lines(&self) -> usize {
        self.files.iter().map(|f| f.metrics.emitted_lines).sum()
    }
}

/// Tokenize everything `reader` yields, writing rendered tokens to `out`
pub fn tokenize_reader<R, W>(
    source: &Path,
    mut reader: LineReader<R>,
    mode: Mode,
    config: &RuntimeConfig,
    out: &mut W,
) -> Result<FileSummary, PipelineError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let start_time = Instant::now();
    let mut analyzer = LexicalAnalyzer::with_preferences(mode, config.lexical.clone());
    let mut line = LineReader::<R>::line_buffer();

    loop {
        let read = reader
            .read_line(&mut line)
            .map_err(|e| FileProcessorError::from_io(source, &e))?;
        if read == 0 {
            break;
        }

        analyzer
            .tokenize_line(&line, out)
            .map_err(PipelineError::Output)?;
    }

    Ok(FileSummary {
        path: source.to_path_buf(),
        mode,
        split_lines: reader.split_lines(),
        duration_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        metrics: analyzer.into_metrics(),
    })
}

/// Open one validated file and tokenize it
pub fn tokenize_file<W: Write + ?Sized>(
    file: &FileMetadata,
    mode: Mode,
    config: &RuntimeConfig,
    out: &mut W,
) -> Result<FileSummary, PipelineError> {
    logging::with_file_context(&file.path, || -> Result<FileSummary, PipelineError> {
        log_debug!("Tokenizing file", "mode" => mode, "size_bytes" => file.size);

        let processor = FileProcessor::from_preferences(&config.file_processor);
        let reader = processor.open(file)?;
        let summary = tokenize_reader(&file.path, reader, mode, config, out)?;

        log_file_summary(&summary, config);
        Ok(summary)
    })
}

/// Tokenize every file of a validated invocation, in argument order, then flush
pub fn run<W: Write + ?Sized>(
    invocation: &Invocation,
    config: &RuntimeConfig,
    out: &mut W,
) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary::default();

    for file in invocation.files() {
        summary
            .files
            .push(tokenize_file(file, invocation.mode(), config, out)?);
    }

    out.flush().map_err(PipelineError::Output)?;

    log_success!(
        codes::success::RUN_COMPLETED,
        "All files tokenized",
        "files" => summary.files.len(),
        "lines" => summary.total_lines(),
        "tokens" => summary.total_tokens()
    );

    Ok(summary)
}

fn log_file_summary(summary: &FileSummary, config: &RuntimeConfig) {
    let metrics = &summary.metrics;

    if summary.split_lines > 0 {
        log_warning!(
            code = codes::lexical::LINE_SPLIT,
            "Long lines were split at the configured bound",
            "split_lines" => summary.split_lines,
            "max_line_length" => config.file_processor.max_line_length.unwrap_or_default()
        );
    }

    if metrics.unterminated_strings > 0 {
        log_debug!("Quoted strings ran to end of line",
            "count" => metrics.unterminated_strings);
    }

    if config.file_processor.log_file_metrics {
        log_success!(
            codes::success::FILE_TOKENIZED,
            "File tokenized",
            "lines" => metrics.lines,
            "bytes" => metrics.bytes,
            "tokens" => metrics.total_tokens,
            "emitted" => metrics.emitted_lines,
            "suppressed" => metrics.suppressed_tokens,
            "duration_ms" => format!("{:.2}", summary.duration_ms)
        );
    }

    log_debug!("File summary",
        "json" => serde_json::to_string(summary).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::ModeFlags;
    use crate::logging::test_memory_logger;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::fs;
    use std::io::{self, Cursor};
    use tempfile::tempdir;

    fn config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.file_processor.max_line_length = None;
        config.file_processor.log_file_metrics = true;
        config.lexical.collect_metrics = true;
        config
    }

    /// Accepts `limit` bytes, then fails every write
    struct FailingWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tokenize_reader() {
        let reader = LineReader::new(Cursor::new(b"a b\n\tc\n".to_vec()), None);
        let mut out = Vec::new();

        let summary =
            tokenize_reader(Path::new("mem"), reader, Mode::Literal, &config(), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a\n(SPACE)\nb\n(NEWLINE)\n(TAB)\nc\n(NEWLINE)\n"
        );
        assert_eq!(summary.metrics.lines, 2);
        assert_eq!(summary.metrics.count(TokenKind::Newline), 2);
        assert_eq!(summary.split_lines, 0);
    }

    #[test]
    fn test_split_lines_keep_every_byte() {
        let mut config = config();
        config.file_processor.max_line_length = Some(4);
        let reader = LineReader::new(Cursor::new(b"abcdefgh\n".to_vec()), Some(4));
        let mut out = Vec::new();

        let summary =
            tokenize_reader(Path::new("mem"), reader, Mode::Literal, &config, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "abcd\nefgh\n(NEWLINE)\n");
        assert_eq!(summary.split_lines, 1);
    }

    #[test]
    fn test_run_processes_files_in_argument_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("z.txt");
        let second = dir.path().join("a.txt");
        fs::write(&first, "first\n").unwrap();
        fs::write(&second, "second").unwrap();

        let invocation = Invocation::new(
            ModeFlags {
                suppress_blank: true,
                ..Default::default()
            },
            vec![first, second],
        )
        .unwrap();
        let mut out = Vec::new();

        let summary = run(&invocation, &config(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "first\nsecond\n");
        assert_eq!(summary.files.len(), 2);
        assert_eq!(summary.total_lines(), 2);
        assert_eq!(summary.emitted_lines(), 2);
    }

    #[test]
    fn test_output_error_keeps_earlier_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "aa bb cc dd\n").unwrap();

        let invocation = Invocation::new(ModeFlags::default(), vec![path]).unwrap();
        let mut out = FailingWriter {
            written: Vec::new(),
            limit: 6,
        };

        let error = run(&invocation, &config(), &mut out).unwrap_err();

        assert_matches!(error, PipelineError::Output(_));
        assert!(error.is_broken_pipe());
        assert_eq!(error.error_code(), codes::system::OUTPUT_FAILURE);
        assert_eq!(out.written, b"aa\n".to_vec());
    }

    #[test]
    fn test_file_removed_after_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        fs::write(&path, "x").unwrap();

        let invocation = Invocation::new(ModeFlags::default(), vec![path.clone()]).unwrap();
        fs::remove_file(&path).unwrap();

        let result = run(&invocation, &config(), &mut Vec::new());
        assert_matches!(
            result,
            Err(PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. }))
        );
    }

    #[test]
    fn test_file_summary_is_logged_with_file_context() {
        let memory = test_memory_logger();
        let dir = tempdir().unwrap();
        let path = dir.path().join("logged.txt");
        fs::write(&path, "x y\n").unwrap();

        let invocation = Invocation::new(ModeFlags::default(), vec![path.clone()]).unwrap();
        run(&invocation, &config(), &mut Vec::new()).unwrap();

        let expected = path.display().to_string();
        let logged = memory
            .get_events_with_code(codes::success::FILE_TOKENIZED)
            .into_iter()
            .find(|e| e.context.get("file") == Some(&expected))
            .expect("file summary event");
        assert_eq!(logged.context.get("tokens"), Some(&"4".to_string()));
    }
}
