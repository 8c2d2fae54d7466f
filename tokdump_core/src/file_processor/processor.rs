//! Path validation and line reading

use crate::config::compile_time::file_processing::INITIAL_LINE_CAPACITY;
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("given file path ({path}) does not exist: {message}")]
    FileNotFound { path: String, message: String },

    #[error("given file path ({path}) is not a regular file or block device")]
    InvalidPath { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error on {path}: {message}")]
    IoError { path: String, message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    /// Classify an I/O error raised while touching `path`
    pub(crate) fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path,
                message: error.to_string(),
            },
            ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            _ => FileProcessorError::IoError {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// What kind of file system object an accepted path names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Regular,
    BlockDevice,
}

impl FileKind {
    fn of(file_type: &fs::FileType) -> Option<Self> {
        if file_type.is_file() {
            return Some(FileKind::Regular);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_block_device() {
                return Some(FileKind::BlockDevice);
            }
        }

        None
    }
}

/// File metadata collected during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    /// Path exactly as given
    pub path: PathBuf,
    /// File size in bytes (0 for most block devices)
    pub size: u64,
    pub kind: FileKind,
}

/// Validates input paths and opens them for line reading
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    /// Split lines longer than this into chunks (unbounded when `None`)
    pub max_line_length: Option<usize>,
}

impl FileProcessor {
    /// Create a processor with unbounded lines
    pub fn new() -> Self {
        Self {
            max_line_length: None,
        }
    }

    /// Create file processor from runtime preferences
    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            max_line_length: prefs.max_line_length,
        }
    }

    /// Stat the path (following symlinks) and accept regular files and block devices
    pub fn validate_path(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(path, &e);
            log_error!(error.error_code(), "Failed to stat input path",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let Some(kind) = FileKind::of(&metadata.file_type()) else {
            let error = FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a regular file or block device",
                "path" => path.display());
            return Err(error);
        };

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            kind,
        };

        log_success!(
            codes::success::FILE_VALIDATED,
            "Input path validated",
            "path" => path.display(),
            "size_bytes" => file_metadata.size,
            "kind" => format!("{:?}", kind)
        );

        Ok(file_metadata)
    }

    /// Open a validated file for line reading
    pub fn open(
        &self,
        metadata: &FileMetadata,
    ) -> Result<LineReader<BufReader<File>>, FileProcessorError> {
        let file = File::open(&metadata.path).map_err(|e| {
            let error = FileProcessorError::from_io(&metadata.path, &e);
            log_error!(error.error_code(), "Failed to open file for reading",
                "path" => metadata.path.display(),
                "io_error" => e);
            error
        })?;

        log_debug!("Opened input file", "path" => metadata.path.display());

        Ok(self.reader(BufReader::new(file)))
    }

    /// Wrap any buffered reader with this processor's line bound
    pub fn reader<R: BufRead>(&self, reader: R) -> LineReader<R> {
        LineReader::new(reader, self.max_line_length)
    }
}

/// Reads successive lines, including their trailing `\n`, into a reusable buffer
pub struct LineReader<R> {
    reader: R,
    max_line_length: Option<usize>,
    split_lines: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, max_line_length: Option<usize>) -> Self {
        Self {
            reader,
            max_line_length: max_line_length.filter(|&limit| limit > 0),
            split_lines: 0,
        }
    }

    /// Fresh buffer sized for typical lines
    pub fn line_buffer() -> Vec<u8> {
        Vec::with_capacity(INITIAL_LINE_CAPACITY)
    }

    /// Read the next line (or chunk of an over-long line) into `buf`.
    /// Returns the number of bytes read; 0 means end of input.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();

        let Some(limit) = self.max_line_length else {
            return self.reader.read_until(b'\n', buf);
        };

        let read = (&mut self.reader).take(limit as u64).read_until(b'\n', buf)?;

        if read == limit && buf.last() != Some(&b'\n') && !self.reader.fill_buf()?.is_empty() {
            self.split_lines += 1;
        }

        Ok(read)
    }

    /// How many times a line had to be split at the length bound
    pub fn split_lines(&self) -> usize {
        self.split_lines
    }
}
