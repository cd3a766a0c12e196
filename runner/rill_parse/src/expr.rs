//! Expression grammar (Pratt-style precedence climbing).
//!
//! Precedence, loosest first: ternary, `??`, `||`, `&&`, equality,
//! relational, additive, multiplicative, unary, postfix, primary.

use rill_ir::{BinaryOp, Expr, UnaryOp};
use rill_lexer::Token;
use rill_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        // Every expression nesting level re-enters here, so this is the
        // one spot that has to guard the native stack.
        ensure_sufficient_stack(|| self.parse_ternary())
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_binary(0)?;
        if !self.eat(&Token::Question) {
            return Ok(cond);
        }
        let then = self.parse_expr()?;
        self.expect(&Token::Colon, "conditional expression")?;
        let otherwise = self.parse_expr()?;
        let span = cond.span().to(otherwise.span());
        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
            span,
        })
    }

    /// Left-associative binary operators, by precedence level.
    fn parse_binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        const LEVELS: &[&[(Token, BinaryOp)]] = &[
            &[(Token::QuestionQuestion, BinaryOp::Nullish)],
            &[(Token::OrOr, BinaryOp::Or)],
            &[(Token::AndAnd, BinaryOp::And)],
            &[
                (Token::EqEq, BinaryOp::Eq),
                (Token::StrictEq, BinaryOp::Eq),
                (Token::Ne, BinaryOp::Ne),
                (Token::StrictNe, BinaryOp::Ne),
            ],
            &[
                (Token::Lt, BinaryOp::Lt),
                (Token::Le, BinaryOp::Le),
                (Token::Gt, BinaryOp::Gt),
                (Token::Ge, BinaryOp::Ge),
            ],
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::Percent, BinaryOp::Mod),
            ],
        ];

        if level == LEVELS.len() {
            return self.parse_unary();
        }
        let mut lhs = self.parse_binary(level + 1)?;
        'outer: loop {
            for (token, op) in LEVELS[level] {
                if self.eat(token) {
                    let rhs = self.parse_binary(level + 1)?;
                    let span = lhs.span().to(rhs.span());
                    lhs = Expr::Binary {
                        op: *op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                        span,
                    };
                    continue 'outer;
                }
            }
            break;
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let span = self.here();
        let op = match self.peek() {
            Some(Token::Bang) => Some(UnaryOp::Not),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix();
        };
        let _ = self.advance();
        let expr = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = span.to(expr.span());
        Ok(Expr::Unary {
            op,
            expr: Box::new(expr),
            span,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::LParen) => {
                    let _ = self.advance();
                    let mut args = Vec::new();
                    if self.peek() != Some(&Token::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if !self.eat(&Token::Comma) {
                                break;
                            }
                        }
                    }
                    let close = self.expect(&Token::RParen, "argument list")?;
                    let span = expr.span().to(close);
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                        span,
                    };
                }
                Some(Token::Dot) => {
                    let _ = self.advance();
                    let (property, prop_span) = self.expect_ident("member access")?;
                    let span = expr.span().to(prop_span);
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property,
                        optional: false,
                        span,
                    };
                }
                Some(Token::QuestionDot) => {
                    let _ = self.advance();
                    let (property, prop_span) = self.expect_ident("member access")?;
                    let span = expr.span().to(prop_span);
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property,
                        optional: true,
                        span,
                    };
                }
                Some(Token::LBracket) => {
                    let _ = self.advance();
                    let index = self.parse_expr()?;
                    let close = self.expect(&Token::RBracket, "index expression")?;
                    let span = expr.span().to(close);
                    expr = Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.here();
        match self.peek() {
            Some(Token::Num(n)) => {
                let n = *n;
                let _ = self.advance();
                Ok(Expr::Num(n, span))
            }
            Some(Token::Str(s)) => {
                let s = s.clone();
                let _ = self.advance();
                Ok(Expr::Str(s, span))
            }
            Some(Token::True) => {
                let _ = self.advance();
                Ok(Expr::Bool(true, span))
            }
            Some(Token::False) => {
                let _ = self.advance();
                Ok(Expr::Bool(false, span))
            }
            Some(Token::Null | Token::Undefined) => {
                let _ = self.advance();
                Ok(Expr::Null(span))
            }
            Some(Token::Ident(name)) => {
                let name = name.clone();
                let _ = self.advance();
                Ok(Expr::Ident(name, span))
            }
            Some(Token::LParen) => {
                let _ = self.advance();
                let expr = self.parse_expr()?;
                self.expect(&Token::RParen, "parenthesized expression")?;
                Ok(expr)
            }
            Some(Token::LBracket) => self.parse_list(),
            Some(Token::LBrace) => self.parse_object(),
            _ => Err(self.unexpected_here("expression")),
        }
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let start = self.here();
        let _ = self.advance();
        let mut items = Vec::new();
        if self.peek() != Some(&Token::RBracket) {
            loop {
                items.push(self.parse_expr()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
                // trailing comma
                if self.peek() == Some(&Token::RBracket) {
                    break;
                }
            }
        }
        let close = self.expect(&Token::RBracket, "list literal")?;
        Ok(Expr::List(items, start.to(close)))
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let start = self.here();
        let _ = self.advance();
        let mut entries = Vec::new();
        if self.peek() != Some(&Token::RBrace) {
            loop {
                let key = match self.peek() {
                    Some(Token::Ident(name)) => {
                        let name = name.clone();
                        let _ = self.advance();
                        name
                    }
                    Some(Token::Str(s)) => {
                        let s = s.clone();
                        let _ = self.advance();
                        s
                    }
                    _ => return Err(self.unexpected_here("object literal")),
                };
                self.expect(&Token::Colon, "object literal")?;
                entries.push((key, self.parse_expr()?));
                if !self.eat(&Token::Comma) {
                    break;
                }
                if self.peek() == Some(&Token::RBrace) {
                    break;
                }
            }
        }
        let close = self.expect(&Token::RBrace, "object literal")?;
        Ok(Expr::Object(entries, start.to(close)))
    }
}
