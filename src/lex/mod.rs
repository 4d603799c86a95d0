mod scan;
mod span;
mod token;

pub use scan::{tokenize, Scanner};
pub use span::Span;
pub use token::{LexError, Token, TokenKind};
