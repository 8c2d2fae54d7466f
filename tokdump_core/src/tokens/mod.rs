pub mod render;
pub mod token;

pub use render::RenderedLine;
pub use token::{Token, TokenKind, Whitespace};
