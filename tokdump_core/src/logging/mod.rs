//! Global logging for tokdump
//!
//! Events are code-tagged and routed through a write-once global service.
//! Nothing here writes to stdout; that stream carries only token output.

pub mod codes;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::LoggingPreferences;
use crate::log_success;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{FacadeLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Logging setup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggingError {
    #[error("global logger already initialized")]
    AlreadyInitialized,
}

impl LoggingError {
    pub fn error_code(&self) -> Code {
        codes::system::INITIALIZATION_FAILURE
    }
}

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from preferences
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), LoggingError> {
    let service = Arc::new(LoggingService::from_preferences(preferences));
    init_global_logging_with_service(service)?;

    log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
        "structured" => preferences.use_structured_logging,
        "min_level" => preferences.min_log_level.as_str()
    );

    Ok(())
}

/// Install a prebuilt service; fails if one is already installed
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), LoggingError> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| LoggingError::AlreadyInitialized)
}

/// `None` until logging is initialized
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Whether debug events would reach the sink (used by `log_debug!`)
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// FILE CONTEXT
// ============================================================================

/// Execute function with the given file attached to every event it logs
pub fn with_file_context<F, R>(file_path: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.replace(Some(file_path.to_path_buf())));
    let result = f();
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

/// Get current file context
pub fn get_current_file_context() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Attach context and hand the event to the global service (used by the macros)
pub fn dispatch(mut event: LogEvent, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in &context {
        event = event.with_context(key, value);
    }

    if logger.include_file_context() {
        if let Some(file) = get_current_file_context() {
            event = event.with_context("file", &file.display().to_string());
        }
    }

    logger.log_event(event);
}

/// Installs a process-wide memory logger for unit tests
#[cfg(test)]
pub(crate) fn test_memory_logger() -> Arc<MemoryLogger> {
    static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
    MEMORY
        .get_or_init(|| {
            let memory = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(memory.clone(), LogLevel::Debug);
            let _ = init_global_logging_with_service(Arc::new(service));
            memory
        })
        .clone()
}
