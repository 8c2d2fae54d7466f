// Internal modules
pub mod config;
pub mod file_processor;
pub mod invocation;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::RuntimeConfig;
pub use invocation::{ArgumentError, Invocation, InvocationError, Mode, ModeFlags};
pub use lexical::{scan, scan_tokens};
pub use pipeline::{run, tokenize_file, tokenize_reader, FileSummary, PipelineError, RunSummary};
pub use tokens::{RenderedLine, Token, TokenKind};
