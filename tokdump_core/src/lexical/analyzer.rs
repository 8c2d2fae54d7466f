//! Byte scanner and per-file lexical analyzer
//!
//! [`Scanner`] is a single left-to-right pass over one line. It never fails:
//! every byte falls into some token, and each byte belongs to exactly one.

use crate::config::compile_time::lexical::MIN_GROUPED_SPACE_RUN;
use crate::config::runtime::LexicalPreferences;
use crate::invocation::Mode;
use crate::log_debug;
use crate::tokens::{Token, TokenKind, Whitespace};
use crate::utils::{Span, Spanned};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Scanner position within the current token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InWord { start: usize },
    InNumber { start: usize },
    InQuoted {
        start: usize,
        delimiter: u8,
        escaped: bool,
    },
    InSpaceRun { start: usize },
}

/// Iterator over the tokens of one line
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    line: &'a [u8],
    pos: usize,
    mode: Mode,
}

impl<'a> Scanner<'a> {
    pub fn new(line: &'a [u8], mode: Mode) -> Self {
        Self { line, pos: 0, mode }
    }

    fn peek(&self) -> Option<u8> {
        self.line.get(self.pos).copied()
    }

    fn finish(&self, start: usize, token: Token<'a>) -> Spanned<Token<'a>> {
        Spanned::new(token, Span::new(start, self.pos))
    }

    fn text(&self, start: usize) -> &'a [u8] {
        Span::new(start, self.pos).slice(self.line)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Spanned<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut state = State::Idle;

        loop {
            let current = self.peek();

            state = match state {
                State::Idle => {
                    let byte = current?;
                    let start = self.pos;
                    self.pos += 1;

                    match byte {
                        b' ' if self.mode == Mode::GroupSpaces && self.peek() == Some(b' ') => {
                            State::InSpaceRun { start }
                        }
                        b' ' => return Some(self.finish(start, Token::Whitespace(Whitespace::Space))),
                        b'\t' => return Some(self.finish(start, Token::Whitespace(Whitespace::Tab))),
                        b'\n' => {
                            return Some(self.finish(start, Token::Whitespace(Whitespace::Newline)))
                        }
                        b'0'..=b'9' => State::InNumber { start },
                        b'"' | b'\'' => State::InQuoted {
                            start,
                            delimiter: byte,
                            escaped: false,
                        },
                        b if b.is_ascii_alphabetic() => State::InWord { start },
                        other => return Some(self.finish(start, Token::Symbol(other))),
                    }
                }

                State::InWord { start } => match current {
                    Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                        self.pos += 1;
                        state
                    }
                    _ => return Some(self.finish(start, Token::Word(self.text(start)))),
                },

                State::InNumber { start } => match current {
                    Some(b) if b.is_ascii_alphanumeric() || b == b'.' => {
                        self.pos += 1;
                        state
                    }
                    _ => return Some(self.finish(start, Token::Number(self.text(start)))),
                },

                State::InSpaceRun { start } => match current {
                    Some(b' ') => {
                        self.pos += 1;
                        state
                    }
                    _ => {
                        let count = self.pos - start;
                        debug_assert!(count >= MIN_GROUPED_SPACE_RUN);
                        return Some(self.finish(start, Token::SpaceRun(count)));
                    }
                },

                State::InQuoted {
                    start,
                    delimiter,
                    escaped,
                } => match current {
                    None => {
                        let text = self.text(start);
                        return Some(self.finish(
                            start,
                            Token::QuotedString {
                                text,
                                terminated: false,
                            },
                        ));
                    }
                    Some(b) => {
                        self.pos += 1;
                        if b == delimiter && !escaped {
                            let text = self.text(start);
                            return Some(self.finish(
                                start,
                                Token::QuotedString {
                                    text,
                                    terminated: true,
                                },
                            ));
                        }
                        // A run of backslashes toggles; anything else clears
                        State::InQuoted {
                            start,
                            delimiter,
                            escaped: b == b'\\' && !escaped,
                        }
                    }
                },
            };
        }
    }
}

/// Per-file token statistics
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub lines: usize,
    pub bytes: usize,
    pub total_tokens: usize,
    pub emitted_lines: usize,
    pub suppressed_tokens: usize,
    pub longest_space_run: usize,
    pub unterminated_strings: usize,
    pub by_kind: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_line(&mut self, line: &[u8]) {
        self.lines += 1;
        self.bytes += line.len();
    }

    pub(crate) fn record_token(
        &mut self,
        token: &Token<'_>,
        emitted: bool,
        preferences: &LexicalPreferences,
    ) {
        self.total_tokens += 1;

        if emitted {
            self.emitted_lines += 1;
        } else {
            self.suppressed_tokens += 1;
        }

        if !preferences.collect_metrics {
            return;
        }

        *self.by_kind.entry(token.kind()).or_insert(0) += 1;

        match token {
            Token::SpaceRun(count) => {
                self.longest_space_run = self.longest_space_run.max(*count);
            }
            Token::Whitespace(Whitespace::Space) => {
                self.longest_space_run = self.longest_space_run.max(1);
            }
            Token::QuotedString {
                terminated: false, ..
            } => self.unterminated_strings += 1,
            _ => {}
        }
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Scans lines for one file and writes the rendered tokens
pub struct LexicalAnalyzer {
    mode: Mode,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer {
    pub fn new(mode: Mode) -> Self {
        Self::with_preferences(mode, LexicalPreferences::default())
    }

    pub fn with_preferences(mode: Mode, preferences: LexicalPreferences) -> Self {
        Self {
            mode,
            preferences,
            metrics: LexicalMetrics::default(),
        }
    }

    /// Scan one line and write each rendered token followed by `\n`
    pub fn tokenize_line<W: Write + ?Sized>(&mut self, line: &[u8], out: &mut W) -> io::Result<()> {
        self.metrics.record_line(line);

        for spanned in Scanner::new(line, self.mode) {
            let rendered = spanned.node.render(self.mode);
            self.metrics
                .record_token(&spanned.node, rendered.is_some(), &self.preferences);

            if let Token::QuotedString {
                terminated: false, ..
            } = spanned.node
            {
                log_debug!("Unterminated quoted string", "span" => spanned.span);
            }

            if let Some(rendered) = rendered {
                rendered.write_to(out)?;
            }
        }

        Ok(())
    }

    pub fn into_metrics(self) -> LexicalMetrics {
        self.metrics
    }
}
