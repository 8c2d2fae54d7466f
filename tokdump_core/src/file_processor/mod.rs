//! File processor: input path validation and line-oriented reading

mod processor;

pub use processor::{FileKind, FileMetadata, FileProcessor, FileProcessorError, LineReader};
