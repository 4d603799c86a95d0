use crate::{
    err::{ErrorKind, ParseError, Result},
    lex::{Scanner, Span, Token, TokenKind, TokenKind::*},
};

/// Deepest nesting of statements and expressions accepted before parsing
/// gives up.
pub const MAX_DEPTH: usize = 256;

/// Recursive descent recognizer for one `Program` unit.
///
/// The parser holds a single token of lookahead and stops at the first
/// error; it builds no tree.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    curr: Token<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut scanner = Scanner::new(src);
        let curr = scanner.next_token();
        Self {
            scanner,
            curr,
            depth: 0,
        }
    }

    /// Accepts the source if it is exactly one well formed program followed
    /// by the end of input.
    pub fn parse(mut self) -> Result<()> {
        self.program()?;
        self.expect(Eof)?;
        Ok(())
    }

    // program := 'Program' identifier '{' declaration_list statement_list '}'
    fn program(&mut self) -> Result<()> {
        self.expect(Program)?;
        self.expect(Ident)?;
        self.expect(OpenBrace)?;
        self.declaration_list()?;
        self.statement_list()?;
        self.expect(CloseBrace)?;
        Ok(())
    }

    fn declaration_list(&mut self) -> Result<()> {
        while self.peek().kind.is_type_name() {
            self.advance();
            let name = self.expect(Ident)?;

            if !self.check(SemiColon) {
                if let Some(err) = self.lex_error() {
                    return Err(err);
                }
                return Err(ParseError {
                    kind: ErrorKind::MissingSemicolon {
                        name: name.text.to_owned(),
                    },
                    line: name.line,
                    column: name.end_column + 1,
                    span: Span::new(name.span.hi(), name.span.hi()),
                });
            }
            self.advance();
        }
        Ok(())
    }

    fn statement_list(&mut self) -> Result<()> {
        log::debug!("entering statement list");
        while !self.check(CloseBrace) && !self.check(Eof) {
            log::debug!(
                "statement starts with {} (line {})",
                self.peek().kind,
                self.peek().line
            );
            self.statement()?;
        }
        log::debug!("leaving statement list");
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        self.descend()?;
        match self.peek().kind {
            Ident => self.assignment_stmt()?,
            If => self.selection_stmt()?,
            While => self.iteration_stmt()?,
            OpenBrace => self.compound_stmt()?,
            _ => return Err(self.unexpected("Unexpected token at start of statement")),
        }
        self.depth -= 1;
        Ok(())
    }

    // assignment_stmt := identifier '=' expression ';'
    fn assignment_stmt(&mut self) -> Result<()> {
        self.expect(Ident)?;
        self.expect(Eq)?;
        self.expression()?;
        self.expect(SemiColon)?;
        Ok(())
    }

    // selection_stmt := 'if' '(' expression ')' statement ( 'else' statement )?
    fn selection_stmt(&mut self) -> Result<()> {
        self.expect(If)?;
        self.expect(OpenParen)?;
        self.expression()?;
        self.expect(CloseParen)?;
        self.statement()?;
        // A dangling else belongs to the innermost if.
        if self.eat(Else) {
            self.statement()?;
        }
        Ok(())
    }

    // iteration_stmt := 'while' '(' expression ')' statement
    fn iteration_stmt(&mut self) -> Result<()> {
        self.expect(While)?;
        self.expect(OpenParen)?;
        self.expression()?;
        self.expect(CloseParen)?;
        self.statement()
    }

    // compound_stmt := '{' declaration_list statement_list '}'
    fn compound_stmt(&mut self) -> Result<()> {
        self.expect(OpenBrace)?;
        self.declaration_list()?;
        self.statement_list()?;
        self.expect(CloseBrace)?;
        Ok(())
    }

    /// At most one relational operator: `a < b < c` stops after `a < b`.
    fn expression(&mut self) -> Result<()> {
        log::debug!("parsing expression at line {}", self.peek().line);
        self.descend()?;
        self.additive_expression()?;

        if self.peek().kind.is_relop() {
            log::debug!("relational operator {}", self.peek().kind);
            self.advance();
            self.additive_expression()?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn additive_expression(&mut self) -> Result<()> {
        self.term()?;
        while self.eat(Plus) || self.eat(Minus) {
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Result<()> {
        self.factor()?;
        while self.eat(Star) || self.eat(Slash) {
            self.factor()?;
        }
        Ok(())
    }

    fn factor(&mut self) -> Result<()> {
        match self.peek().kind {
            Ident | Number => {
                self.advance();
                Ok(())
            }
            OpenParen => {
                self.advance();
                self.expression()?;
                self.expect(CloseParen)?;
                Ok(())
            }
            _ => Err(self.unexpected("Unexpected token in factor")),
        }
    }

    /// Enters one more level of nesting. Callers leave it by decrementing
    /// `depth` on success; on error the parse is over anyway.
    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth <= MAX_DEPTH {
            return Ok(());
        }

        let found = self.peek();
        Err(ParseError {
            kind: ErrorKind::TooDeep { limit: MAX_DEPTH },
            line: found.line,
            column: found.start_column,
            span: found.span,
        })
    }

    /// Consumes the lookahead if it is of `kind`, returning it.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        if let Some(err) = self.lex_error() {
            return Err(err);
        }

        let found = self.peek();
        Err(ParseError {
            kind: ErrorKind::Expected {
                expected: kind,
                found: found.kind,
            },
            line: found.line,
            column: found.start_column,
            span: found.span,
        })
    }

    fn unexpected(&self, context: &'static str) -> ParseError {
        if let Some(err) = self.lex_error() {
            return err;
        }

        let found = self.peek();
        ParseError {
            kind: ErrorKind::Unexpected {
                context,
                text: found.text.to_owned(),
            },
            line: found.line,
            column: found.end_column,
            span: found.span,
        }
    }

    /// The error for a lexical-error lookahead, if that is what it is.
    fn lex_error(&self) -> Option<ParseError> {
        let t = self.peek();
        let error = t.lex_error()?;
        Some(ParseError {
            kind: ErrorKind::Lexical {
                error,
                text: t.text.to_owned(),
            },
            line: t.line,
            column: t.start_column,
            span: t.span,
        })
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn peek(&self) -> &Token<'a> {
        &self.curr
    }

    /// Moves to the next token, returning the one just consumed.
    fn advance(&mut self) -> Token<'a> {
        std::mem::replace(&mut self.curr, self.scanner.next_token())
    }
}

/// Checks that `src` is a well formed program.
pub fn parse(src: &str) -> Result<()> {
    Parser::new(src).parse()
}
