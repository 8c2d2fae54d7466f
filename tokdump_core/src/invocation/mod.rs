//! Validated invocations
//!
//! Every check that can reject a run happens here, before any file is read,
//! so a rejected run never produces partial token output.

mod error;
mod mode;

use crate::config::compile_time::arguments::MAX_FILES_COUNT;
use crate::file_processor::{FileMetadata, FileProcessor};
use crate::logging::codes;
use crate::{log_error, log_success};
use std::path::PathBuf;

pub use error::{ArgumentError, InvocationError};
pub use mode::{Mode, ModeFlags};

/// A fully validated request: one mode and the files to tokenize, in order
#[derive(Debug, Clone)]
pub struct Invocation {
    mode: Mode,
    files: Vec<FileMetadata>,
}

impl Invocation {
    /// Validate flags, then the file count, then every path
    pub fn new(flags: ModeFlags, files: Vec<PathBuf>) -> Result<Self, InvocationError> {
        Self::with_processor(flags, files, &FileProcessor::new())
    }

    /// Same as [`Invocation::new`] with an explicit file processor
    pub fn with_processor(
        flags: ModeFlags,
        files: Vec<PathBuf>,
        processor: &FileProcessor,
    ) -> Result<Self, InvocationError> {
        let mode = Mode::from_flags(flags).inspect_err(|e| {
            log_error!(e.error_code(), "Rejected mode flags", "reason" => e);
        })?;

        if files.is_empty() {
            let error = ArgumentError::NoInputFiles;
            log_error!(error.error_code(), "No input files");
            return Err(error.into());
        }

        if files.len() > MAX_FILES_COUNT {
            let error = ArgumentError::TooManyFiles {
                count: files.len(),
                max: MAX_FILES_COUNT,
            };
            log_error!(error.error_code(), "Too many input files",
                "count" => files.len(),
                "max" => MAX_FILES_COUNT);
            return Err(error.into());
        }

        let files = files
            .iter()
            .map(|path| processor.validate_path(path))
            .collect::<Result<Vec<_>, _>>()?;

        log_success!(
            codes::success::ARGUMENTS_VALIDATED,
            "Invocation validated",
            "mode" => mode,
            "files" => files.len()
        );

        Ok(Self { mode, files })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn files(&self) -> &[FileMetadata] {
        &self.files
    }
}
