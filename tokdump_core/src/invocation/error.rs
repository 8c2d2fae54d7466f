use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};

/// Command-line argument errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("unknown flag passed: {flag}")]
    UnknownFlag { flag: String },

    #[error("flag {flag} is not compatible with {}", .conflicts.join(" or "))]
    IncompatibleFlags {
        flag: &'static str,
        conflicts: Vec<&'static str>,
    },

    #[error("no input files given")]
    NoInputFiles,

    #[error("too many files were given ({count}), max supported is {max}")]
    TooManyFiles { count: usize, max: usize },
}

impl ArgumentError {
    pub fn error_code(&self) -> Code {
        match self {
            ArgumentError::UnknownFlag { .. } => codes::arguments::UNKNOWN_FLAG,
            ArgumentError::IncompatibleFlags { .. } => codes::arguments::INCOMPATIBLE_FLAGS,
            ArgumentError::NoInputFiles => codes::arguments::NO_INPUT_FILES,
            ArgumentError::TooManyFiles { .. } => codes::arguments::TOO_MANY_FILES,
        }
    }
}

/// Anything that stops an invocation before the first token is written
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvocationError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    FileProcessing(#[from] FileProcessorError),
}

impl InvocationError {
    pub fn error_code(&self) -> Code {
        match self {
            InvocationError::Argument(e) => e.error_code(),
            InvocationError::FileProcessing(e) => e.error_code(),
        }
    }
}
