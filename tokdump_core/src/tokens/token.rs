use serde::Serialize;
use std::fmt;

/// The three whitespace bytes that get labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Whitespace {
    Space,
    Tab,
    Newline,
}

impl Whitespace {
    pub fn as_byte(&self) -> u8 {
        match self {
            Whitespace::Space => b' ',
            Whitespace::Tab => b'\t',
            Whitespace::Newline => b'\n',
        }
    }
}

/// One output unit, borrowing its text from the line being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Whitespace(Whitespace),
    /// Two or more consecutive spaces (group-spaces mode only)
    SpaceRun(usize),
    /// Digit followed by ASCII alphanumerics and dots, e.g. `3.14x`
    Number(&'a [u8]),
    /// Quoted text including both delimiters, or up to end of line if unterminated
    QuotedString { text: &'a [u8], terminated: bool },
    /// Letter followed by letters and underscores
    Word(&'a [u8]),
    /// Any other single byte
    Symbol(u8),
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Whitespace(Whitespace::Space) => TokenKind::Space,
            Token::Whitespace(Whitespace::Tab) => TokenKind::Tab,
            Token::Whitespace(Whitespace::Newline) => TokenKind::Newline,
            Token::SpaceRun(_) => TokenKind::SpaceRun,
            Token::Number(_) => TokenKind::Number,
            Token::QuotedString { .. } => TokenKind::QuotedString,
            Token::Word(_) => TokenKind::Word,
            Token::Symbol(_) => TokenKind::Symbol,
        }
    }

    /// Whitespace and space runs; these are dropped in suppress-blank mode
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::SpaceRun(_))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace(Whitespace::Space) => write!(f, "space"),
            Token::Whitespace(Whitespace::Tab) => write!(f, "tab"),
            Token::Whitespace(Whitespace::Newline) => write!(f, "newline"),
            Token::SpaceRun(count) => write!(f, "{} spaces", count),
            Token::Number(text) => write!(f, "number '{}'", String::from_utf8_lossy(text)),
            Token::QuotedString { text, .. } => {
                write!(f, "string {}", String::from_utf8_lossy(text))
            }
            Token::Word(text) => write!(f, "word '{}'", String::from_utf8_lossy(text)),
            Token::Symbol(byte) => write!(f, "symbol 0x{:02x}", byte),
        }
    }
}

/// Token category, used for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Space,
    Tab,
    Newline,
    SpaceRun,
    Number,
    QuotedString,
    Word,
    Symbol,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Space => "space",
            TokenKind::Tab => "tab",
            TokenKind::Newline => "newline",
            TokenKind::SpaceRun => "space_run",
            TokenKind::Number => "number",
            TokenKind::QuotedString => "quoted_string",
            TokenKind::Word => "word",
            TokenKind::Symbol => "symbol",
        }
    }
}
