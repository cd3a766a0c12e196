//! Statement grammar.

use rill_ir::{AssignTarget, Expr, Stmt};
use rill_lexer::Token;
use rill_stack::ensure_sufficient_stack;

use crate::{error::describe, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| match self.peek() {
            Some(Token::Let) => self.parse_let(true),
            Some(Token::Const) => self.parse_let(false),
            Some(Token::Function) => self.parse_function(),
            Some(Token::Return) => self.parse_return(),
            Some(Token::If) => self.parse_if(),
            Some(Token::While) => self.parse_while(),
            Some(Token::Throw) => self.parse_throw(),
            Some(Token::LBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(_) => self.parse_expr_or_assign(),
            None => Err(ParseError::new("Unexpected end of input", self.here())),
        })
    }

    fn parse_let(&mut self, mutable: bool) -> Result<Stmt, ParseError> {
        let start = self.here();
        self.pos_advance();
        let (name, name_span) = self.expect_ident("declaration")?;
        let init = if self.eat(&Token::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end = init.as_ref().map_or(name_span, Expr::span);
        self.eat(&Token::Semi);
        Ok(Stmt::Let {
            name,
            mutable,
            init,
            span: start.to(end),
        })
    }

    fn parse_function(&mut self) -> Result<Stmt, ParseError> {
        let start = self.here();
        self.pos_advance();
        let (name, _) = self.expect_ident("function declaration")?;
        self.expect(&Token::LParen, "function declaration")?;
        let mut params = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                let (param, _) = self.expect_ident("parameter list")?;
                params.push(param);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(&Token::RParen, "parameter list")?;
        let body = self.parse_block()?;
        Ok(Stmt::Function {
            name,
            params,
            body,
            span: start.to(end),
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let span = self.here();
        self.pos_advance();
        let value = match self.peek() {
            None | Some(Token::Semi | Token::RBrace) => None,
            Some(_) => Some(self.parse_expr()?),
        };
        self.eat(&Token::Semi);
        Ok(Stmt::Return { value, span })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let span = self.here();
        self.pos_advance();
        self.expect(&Token::LParen, "if condition")?;
        let cond = self.parse_expr()?;
        self.expect(&Token::RParen, "if condition")?;
        let then_branch = self.parse_branch()?;
        let else_branch = if self.eat(&Token::Else) {
            Some(self.parse_branch()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
            span,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let span = self.here();
        self.pos_advance();
        self.expect(&Token::LParen, "while condition")?;
        let cond = self.parse_expr()?;
        self.expect(&Token::RParen, "while condition")?;
        let body = self.parse_branch()?;
        Ok(Stmt::While { cond, body, span })
    }

    fn parse_throw(&mut self) -> Result<Stmt, ParseError> {
        let span = self.here();
        self.pos_advance();
        let value = self.parse_expr()?;
        self.eat(&Token::Semi);
        Ok(Stmt::Throw { value, span })
    }

    /// `{ ... }` or a single statement, as in JS `if`/`while` bodies.
    fn parse_branch(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if self.peek() == Some(&Token::LBrace) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_stmt()?])
        }
    }

    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&Token::LBrace, "block")?;
        let mut stmts = Vec::new();
        while self.peek().is_some() && self.peek() != Some(&Token::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&Token::RBrace, "block")?;
        Ok(stmts)
    }

    /// An expression statement, or an assignment when `=` follows.
    fn parse_expr_or_assign(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        if self.peek() != Some(&Token::Assign) {
            self.eat(&Token::Semi);
            return Ok(Stmt::Expr(expr));
        }
        let eq_span = self.here();
        self.pos_advance();
        let target = match expr {
            Expr::Ident(name, _) => AssignTarget::Name(name),
            Expr::Member {
                object,
                property,
                optional: false,
                ..
            } => AssignTarget::Member {
                object: *object,
                property,
            },
            Expr::Index { object, index, .. } => AssignTarget::Index {
                object: *object,
                index: *index,
            },
            other => {
                return Err(ParseError::new(
                    "Invalid assignment target",
                    other.span(),
                ))
            }
        };
        let value = self.parse_expr()?;
        let span = eq_span.to(value.span());
        self.eat(&Token::Semi);
        Ok(Stmt::Assign {
            target,
            value,
            span,
        })
    }

    /// Advance past a token already matched by `peek`.
    fn pos_advance(&mut self) {
        let _ = self.advance();
    }

    /// Error for a token that cannot begin an expression.
    pub(crate) fn unexpected_here(&self, context: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::new(
                format!("Unexpected token {} in {context}", describe(tok)),
                self.here(),
            ),
            None => ParseError::new(format!("Unexpected end of input in {context}"), self.here()),
        }
    }
}
