use crate::lex::{
    LexError, Span, Token,
    TokenKind::{self, *},
};

/// Turns a source buffer into tokens, one `next_token` call at a time.
///
/// Lines and columns are 1-based. Columns count characters, not bytes, and
/// reset at every line ending (`\n`, `\r\n` or a lone `\r`).
pub struct Scanner<'a> {
    src: &'a str,
    start_pos: usize,
    start_line: usize,
    start_column: usize,
    pos: usize,
    line: usize,
    column: usize,
    // Column of the most recently consumed character.
    last_column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
            pos: 0,
            line: 1,
            column: 1,
            last_column: 1,
        }
    }

    pub fn reset(&mut self, src: &'a str) {
        *self = Self::new(src);
    }

    /// Line and column of the next unconsumed character.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Scans the next token. Once the input is exhausted every call returns
    /// an `Eof` token at the same position.
    pub fn next_token(&mut self) -> Token<'a> {
        let t = self.scan_token();
        log::trace!(
            "{}:{}-{} {} {:?}",
            t.line,
            t.start_column,
            t.end_column,
            t.kind,
            t.text
        );
        t
    }

    fn scan_token(&mut self) -> Token<'a> {
        loop {
            self.start_pos = self.pos;
            self.start_line = self.line;
            self.start_column = self.column;

            let c = match self.peek() {
                Some(c) => c,
                None => return self.eof_token(),
            };
            self.advance();

            let kind = match c {
                ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' => continue,
                '/' => {
                    if self.eat('*') {
                        if self.comment() {
                            continue;
                        }
                        Error(LexError::UnclosedComment)
                    } else {
                        Slash
                    }
                }
                '+' => Plus,
                '-' => Minus,
                '*' => Star,
                ';' => SemiColon,
                ',' => Comma,
                '(' => OpenParen,
                ')' => CloseParen,
                '{' => OpenBrace,
                '}' => CloseBrace,
                '=' => {
                    if self.eat('=') {
                        EqEq
                    } else {
                        Eq
                    }
                }
                '<' => {
                    if self.eat('=') {
                        Le
                    } else {
                        Lt
                    }
                }
                '>' => {
                    if self.eat('=') {
                        Ge
                    } else {
                        Gt
                    }
                }
                '!' => {
                    if self.eat('=') {
                        Ne
                    } else {
                        Error(LexError::MissingEq)
                    }
                }
                c if c.is_ascii_digit() => self.number(),
                c if c.is_ascii_alphabetic() => self.ident(),
                c => Error(LexError::UnexpectedChar(c)),
            };
            return self.add_token(kind);
        }
    }

    fn add_token(&self, kind: TokenKind) -> Token<'a> {
        Token {
            kind,
            text: &self.src[self.start_pos..self.pos],
            span: Span::new(self.start_pos, self.pos),
            line: self.start_line,
            start_column: self.start_column,
            end_column: self.last_column,
        }
    }

    fn eof_token(&self) -> Token<'a> {
        Token {
            kind: Eof,
            text: "",
            span: Span::new(self.src.len(), self.src.len()),
            line: self.line,
            start_column: self.column,
            end_column: self.column,
        }
    }

    /// Skips the body of a block comment whose `/*` is already consumed.
    /// Returns false if the input ends before the closing `*/`.
    fn comment(&mut self) -> bool {
        loop {
            match self.peek() {
                None => return false,
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return true;
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        self.digits();

        if self.eat('.') && !self.digits() {
            return Error(LexError::MissingFraction);
        }

        if self.eat('e') || self.eat('E') {
            if !self.eat('+') {
                self.eat('-');
            }
            if !self.digits() {
                return Error(LexError::MissingExponent);
            }
        }

        Number
    }

    /// Consumes a run of digits, returning whether there was at least one.
    fn digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.pos > start
    }

    fn ident(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.advance();
        }
        keyword(&self.src[self.start_pos..self.pos]).unwrap_or(Ident)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) {
        let c = match self.peek() {
            Some(c) => c,
            None => return,
        };
        self.last_column = self.column;
        self.pos += c.len_utf8();

        match c {
            '\n' => self.newline(),
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
                self.newline();
            }
            _ => self.column += 1,
        }
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

/// Scans the whole of `src`. The last token is always `Eof`.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut scanner = Scanner::new(src);
    let mut tokens = vec![];
    loop {
        let t = scanner.next_token();
        tokens.push(t);
        if t.is_eof() {
            return tokens;
        }
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    let kind = match s {
        "Program" => Program,
        "int" => Int,
        "float" => Float,
        "if" => If,
        "else" => Else,
        "while" => While,
        _ => return None,
    };
    Some(kind)
}
