use tokdump_core::config::ConfigError;
use tokdump_core::logging::{codes, Code, LoggingError};
use tokdump_core::{ArgumentError, InvocationError, PipelineError};

/// Anything that ends a `tokdump` run with a failure status
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl CliError {
    pub fn error_code(&self) -> Code {
        match self {
            CliError::Argument(e) => e.error_code(),
            CliError::Config(e) => e.error_code(),
            CliError::Logging(e) => e.error_code(),
            CliError::Invocation(e) => e.error_code(),
            CliError::Pipeline(e) => e.error_code(),
        }
    }

    /// Argument mistakes get a pointer to `--help`
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            CliError::Argument(_) | CliError::Invocation(InvocationError::Argument(_))
        ) && self.error_code() != codes::arguments::TOO_MANY_FILES
    }
}
