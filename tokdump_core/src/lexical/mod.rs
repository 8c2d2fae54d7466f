//! Lexical scanning of single lines
//!
//! Tokens borrow from the line they came from and are rendered straight
//! away; nothing here owns or mutates the line buffer.

pub mod analyzer;

use crate::invocation::Mode;
use crate::tokens::RenderedLine;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics, Scanner};

/// Rendered output lines for `line` in `mode`, in source order
pub fn scan(line: &[u8], mode: Mode) -> impl Iterator<Item = RenderedLine<'_>> {
    Scanner::new(line, mode).filter_map(move |spanned| spanned.node.render(mode))
}

/// Raw token stream for `line`, with byte spans
pub fn scan_tokens(line: &[u8], mode: Mode) -> Scanner<'_> {
    Scanner::new(line, mode)
}
