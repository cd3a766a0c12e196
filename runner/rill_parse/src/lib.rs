//! Rill Parse - recursive-descent parser for the plain rill dialect.
//!
//! Consumes the spanned token stream from `rill_lexer` and produces the
//! `rill_ir` AST. Only the plain dialect is accepted here: the transpiler
//! runs first, so any trill syntax that survives to this point is a
//! plain syntax error, reported JS-style as an unexpected token.
//!
//! Semicolons between statements are optional; `;` is consumed where
//! present and never required.

mod error;
mod expr;
mod stmt;

pub use error::ParseError;

use rill_ir::{Span, Stmt};
use rill_lexer::{SpannedToken, Token};

/// Parse a whole program.
pub fn parse(tokens: &[SpannedToken]) -> Result<Vec<Stmt>, ParseError> {
    let mut parser = Parser { tokens, pos: 0 };
    let mut stmts = Vec::new();
    while parser.peek().is_some() {
        stmts.push(parser.parse_stmt()?);
    }
    Ok(stmts)
}

/// Token cursor shared by the statement and expression grammars.
pub(crate) struct Parser<'t> {
    tokens: &'t [SpannedToken],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Span of the current token, or an empty span at the end of input.
    pub(crate) fn here(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(tok) => tok.span,
            None => self.end_span(),
        }
    }

    fn end_span(&self) -> Span {
        let end = self.tokens.last().map_or(0, |t| t.span.end);
        Span::new(end, end)
    }

    pub(crate) fn advance(&mut self) -> Option<&'t SpannedToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the current token or fail with an unexpected-token error.
    pub(crate) fn expect(&mut self, expected: &Token, context: &str) -> Result<Span, ParseError> {
        match self.tokens.get(self.pos) {
            Some(tok) if tok.token == *expected => {
                self.pos += 1;
                Ok(tok.span)
            }
            found => Err(ParseError::unexpected(found, context, self.here())),
        }
    }

    /// Consume an identifier or fail.
    pub(crate) fn expect_ident(&mut self, context: &str) -> Result<(String, Span), ParseError> {
        match self.tokens.get(self.pos) {
            Some(SpannedToken {
                token: Token::Ident(name),
                span,
            }) => {
                self.pos += 1;
                Ok((name.clone(), *span))
            }
            found => Err(ParseError::unexpected(found, context, self.here())),
        }
    }
}
