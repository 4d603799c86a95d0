use crate::lex::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The source text of the token. Empty for `Eof`.
    pub text: &'a str,
    pub span: Span,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl<'a> Token<'a> {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn lex_error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    // Keywords
    Program,
    Int,
    Float,
    If,
    Else,
    While,

    // Operators.
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    Ne,

    // Punctuation.
    SemiColon,
    Comma,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,

    Ident,
    Number,

    Eof,
    Error(LexError),
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Program => "Program",
            Int => "int",
            Float => "float",
            If => "if",
            Else => "else",
            While => "while",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Eq => "=",
            Lt => "<",
            Gt => ">",
            Le => "<=",
            Ge => ">=",
            EqEq => "==",
            Ne => "!=",
            SemiColon => ";",
            Comma => ",",
            OpenParen => "(",
            CloseParen => ")",
            OpenBrace => "{",
            CloseBrace => "}",
            Ident => "identifier",
            Number => "number",
            Eof => "end-of-input",
            Error(_) => "lexical error",
        }
    }

    pub fn is_type_name(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float)
    }

    pub fn is_relop(&self) -> bool {
        use TokenKind::*;
        matches!(self, Lt | Gt | Le | Ge | EqEq | Ne)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LexError {
    UnclosedComment,
    /// `!` with no `=` after it.
    MissingEq,
    MissingFraction,
    MissingExponent,
    UnexpectedChar(char),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnclosedComment => f.write_str("unclosed comment"),
            LexError::MissingEq => f.write_str("expected '=' after '!'"),
            LexError::MissingFraction => {
                f.write_str("malformed number: expected digit after '.'")
            }
            LexError::MissingExponent => {
                f.write_str("malformed number: expected digit in exponent")
            }
            LexError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
        }
    }
}
