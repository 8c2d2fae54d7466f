//! Turning tokens into output lines

use super::token::{Token, Whitespace};
use crate::config::compile_time::lexical::{NEWLINE_LABEL, SPACE_LABEL, TAB_LABEL};
use crate::invocation::Mode;
use std::borrow::Cow;
use std::io::{self, Write};

/// The bytes of one output line, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine<'a>(Cow<'a, [u8]>);

impl<'a> RenderedLine<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Write the line followed by `\n`
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.0)?;
        out.write_all(b"\n")
    }
}

impl<'a> From<&'a [u8]> for RenderedLine<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RenderedLine(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for RenderedLine<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        RenderedLine(Cow::Owned(bytes))
    }
}

impl<'a> Token<'a> {
    /// Render for `mode`; `None` means the token produces no output line
    pub fn render(&self, mode: Mode) -> Option<RenderedLine<'a>> {
        match *self {
            _ if mode == Mode::SuppressBlank && self.is_blank() => None,
            Token::Whitespace(ws) if mode == Mode::Raw => {
                Some(RenderedLine::from(vec![ws.as_byte()]))
            }
            Token::Whitespace(ws) => Some(RenderedLine::from(whitespace_label(ws).as_bytes())),
            Token::SpaceRun(count) => {
                Some(RenderedLine::from(format!("(SPACEx{})", count).into_bytes()))
            }
            Token::Number(text) | Token::QuotedString { text, .. } | Token::Word(text) => {
                Some(RenderedLine::from(text))
            }
            Token::Symbol(byte) => Some(RenderedLine::from(vec![byte])),
        }
    }
}

fn whitespace_label(ws: Whitespace) -> &'static str {
    match ws {
        Whitespace::Space => SPACE_LABEL,
        Whitespace::Tab => TAB_LABEL,
        Whitespace::Newline => NEWLINE_LABEL,
    }
}
