use crate::lex::{LexError, Span, TokenKind};
use std::fmt;

pub type Result<T> = std::result::Result<T, ParseError>;

/// The first error found in a source unit. Parsing stops as soon as one is
/// produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The lookahead was a lexical-error token.
    Lexical { error: LexError, text: String },
    /// `expected` was required but some other kind of token came.
    Expected {
        expected: TokenKind,
        found: TokenKind,
    },
    /// No alternative of the rule named by `context` starts with this token.
    Unexpected { context: &'static str, text: String },
    /// A declaration is not terminated by `;`.
    MissingSemicolon { name: String },
    /// Statements or expressions nested more than `limit` levels deep.
    TooDeep { limit: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR at line {}, position {}: ", self.line, self.column)?;
        match &self.kind {
            ErrorKind::Lexical { error, text } => write!(f, "{} (found '{}')", error, text),
            ErrorKind::Expected { expected, found } => {
                write!(f, "Expected '{}', found '{}'", expected, found)
            }
            ErrorKind::Unexpected { context, text } => {
                write!(f, "{} (found '{}')", context, text)
            }
            ErrorKind::MissingSemicolon { name } => {
                write!(f, "Expected ';' after declaration of '{}'", name)
            }
            ErrorKind::TooDeep { limit } => {
                write!(f, "Nesting deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Prints diagnostics against the source they were found in.
pub struct Handler<'a> {
    src: &'a str,
}

impl<'a> Handler<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    pub fn report(&self, err: &ParseError) {
        println!("{}", err);

        let (line, marker) = self.underline(err.span);
        println!("{}", line);
        println!("{}", marker);
    }

    /// Returns the source line containing `span` and a `^` marker line
    /// beneath it.
    fn underline(&self, span: Span) -> (&'a str, String) {
        let lo = span.lo().min(self.src.len());
        let hi = span.hi().max(lo).min(self.src.len());

        let start = self.line_start(lo);
        let end = self.line_end(lo);
        let line = &self.src[start..end];

        let pad: String = self.src[start..lo]
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = self.src[lo..hi.min(end).max(lo)].chars().count().max(1);

        (line, format!("{}{}", pad, "^".repeat(width)))
    }

    fn line_start(&self, pos: usize) -> usize {
        self.src[..pos]
            .rfind(|c: char| c == '\n' || c == '\r')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.src[pos..]
            .find(|c: char| c == '\n' || c == '\r')
            .map(|i| pos + i)
            .unwrap_or(self.src.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underline_marks_span_on_its_line() {
        let src = "Program P {\n  x = ;\n}";
        let handler = Handler::new(src);
        let (line, marker) = handler.underline(Span::new(18, 19));
        assert_eq!(line, "  x = ;");
        assert_eq!(marker, "      ^");
    }

    #[test]
    fn underline_at_end_of_input() {
        let src = "Program P {";
        let handler = Handler::new(src);
        let (line, marker) = handler.underline(Span::new(src.len(), src.len()));
        assert_eq!(line, "Program P {");
        assert_eq!(marker, format!("{}^", " ".repeat(src.len())));
    }

    #[test]
    fn underline_empty_source() {
        let handler = Handler::new("");
        let (line, marker) = handler.underline(Span::new(0, 0));
        assert_eq!(line, "");
        assert_eq!(marker, "^");
    }

    #[test]
    fn display_expected() {
        let err = ParseError {
            kind: ErrorKind::Expected {
                expected: TokenKind::SemiColon,
                found: TokenKind::CloseBrace,
            },
            line: 3,
            column: 7,
            span: Span::default(),
        };
        assert_eq!(
            err.to_string(),
            "ERROR at line 3, position 7: Expected ';', found '}'"
        );
    }

    #[test]
    fn display_too_deep() {
        let err = ParseError {
            kind: ErrorKind::TooDeep { limit: 256 },
            line: 1,
            column: 272,
            span: Span::default(),
        };
        assert_eq!(
            err.to_string(),
            "ERROR at line 1, position 272: Nesting deeper than 256 levels"
        );
    }
}
