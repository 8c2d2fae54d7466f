use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use std::io;

/// Errors raised while tokenizing validated files
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    FileProcessing(#[from] FileProcessorError),

    #[error("failed to write token output: {0}")]
    Output(#[source] io::Error),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Output(_) => codes::system::OUTPUT_FAILURE,
        }
    }

    /// True when the consumer of stdout went away (e.g. `tokdump big.c | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, PipelineError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
