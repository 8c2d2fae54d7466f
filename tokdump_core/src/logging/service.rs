//! Logging service and sinks

use super::codes::Code;
use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::MEMORY_LOGGER_CAPACITY;
use crate::config::LoggingPreferences;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Routes events to one sink, dropping those below the minimum level
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
    include_file_context: bool,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self {
            logger,
            min_level,
            include_file_context: true,
        }
    }

    /// Create service from logging preferences
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let logger: Arc<dyn Logger> = if preferences.use_structured_logging {
            Arc::new(StructuredLogger::new())
        } else {
            Arc::new(FacadeLogger)
        };

        Self {
            logger,
            min_level: preferences.min_log_level,
            include_file_context: preferences.include_file_context,
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn include_file_context(&self) -> bool {
        self.include_file_context
    }

    /// Levels at or above `min_level` in severity pass
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Forwards events to the `log` facade; the binary installs `env_logger` behind it
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        log::log!(
            target: "tokdump",
            event.level.to_facade_level(),
            "{}",
            event.format_body()
        );
    }
}

/// Structured logger writing one JSON object per line to stderr
pub struct StructuredLogger {
    stderr: Mutex<std::io::Stderr>,
}

impl StructuredLogger {
    pub fn new() -> Self {
        Self {
            stderr: Mutex::new(std::io::stderr()),
        }
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        if let Ok(mut stderr) = self.stderr.lock() {
            // Ignore write errors to avoid logging recursion
            let _ = writeln!(stderr, "{}", line);
        }
    }
}

/// Keeps events in memory, oldest evicted first once full
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.get_events()
            .into_iter()
            .filter(|e| e.code == code)
            .collect()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() >= MEMORY_LOGGER_CAPACITY {
                events.remove(0);
            }
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::info("dropped"));
        service.log_event(LogEvent::debug("dropped"));
        service.log_event(LogEvent::warning("kept"));
        service.log_event(LogEvent::error(codes::system::OUTPUT_FAILURE, "kept"));

        let events = memory.get_events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.message == "kept"));
        assert_eq!(memory.get_events_with_code(codes::system::OUTPUT_FAILURE).len(), 1);
    }

    #[test]
    fn test_from_preferences() {
        let preferences = LoggingPreferences {
            use_structured_logging: true,
            min_log_level: LogLevel::Error,
            include_file_context: false,
        };
        let service = LoggingService::from_preferences(&preferences);

        assert_eq!(service.min_level(), LogLevel::Error);
        assert!(!service.include_file_context());
        assert!(!service.should_log(LogLevel::Warning));
    }

    #[test]
    fn test_memory_logger_lookup_by_code() {
        let memory = MemoryLogger::new();
        memory.log(&LogEvent::success(codes::success::FILE_TOKENIZED, "one"));
        memory.log(&LogEvent::success(codes::success::RUN_COMPLETED, "two"));

        let found = memory.get_events_with_code(codes::success::FILE_TOKENIZED);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "one");
    }
}
