//! Parse errors.

use rill_ir::Span;
use rill_lexer::{SpannedToken, Token};
use thiserror::Error;

/// A syntax error with its source location.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    /// Create an error from a message and location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// Standard unexpected-token error for `expect` failures.
    pub(crate) fn unexpected(found: Option<&SpannedToken>, context: &str, at: Span) -> Self {
        match found {
            Some(tok) => ParseError::new(
                format!("Unexpected token {} in {context}", describe(&tok.token)),
                tok.span,
            ),
            None => ParseError::new(format!("Unexpected end of input in {context}"), at),
        }
    }
}

/// Human-readable token name for diagnostics.
pub(crate) fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("'{name}'"),
        Token::Num(n) => format!("number {n}"),
        Token::Str(_) => "string literal".to_owned(),
        Token::Let => "'let'".to_owned(),
        Token::Const => "'const'".to_owned(),
        Token::Function => "'function'".to_owned(),
        Token::Return => "'return'".to_owned(),
        Token::If => "'if'".to_owned(),
        Token::Else => "'else'".to_owned(),
        Token::While => "'while'".to_owned(),
        Token::Throw => "'throw'".to_owned(),
        Token::Enum => "'enum'".to_owned(),
        Token::True => "'true'".to_owned(),
        Token::False => "'false'".to_owned(),
        Token::Null => "'null'".to_owned(),
        Token::Undefined => "'undefined'".to_owned(),
        Token::LParen => "'('".to_owned(),
        Token::RParen => "')'".to_owned(),
        Token::LBrace => "'{'".to_owned(),
        Token::RBrace => "'}'".to_owned(),
        Token::LBracket => "'['".to_owned(),
        Token::RBracket => "']'".to_owned(),
        Token::Comma => "','".to_owned(),
        Token::Semi => "';'".to_owned(),
        Token::Colon => "':'".to_owned(),
        Token::Dot => "'.'".to_owned(),
        Token::QuestionDot => "'?.'".to_owned(),
        Token::QuestionQuestion => "'??'".to_owned(),
        Token::Question => "'?'".to_owned(),
        Token::Bang => "'!'".to_owned(),
        Token::Pipe => "'|'".to_owned(),
        Token::Amp => "'&'".to_owned(),
        Token::StrictEq => "'==='".to_owned(),
        Token::StrictNe => "'!=='".to_owned(),
        Token::EqEq => "'=='".to_owned(),
        Token::Ne => "'!='".to_owned(),
        Token::Assign => "'='".to_owned(),
        Token::Le => "'<='".to_owned(),
        Token::Ge => "'>='".to_owned(),
        Token::Lt => "'<'".to_owned(),
        Token::Gt => "'>'".to_owned(),
        Token::Plus => "'+'".to_owned(),
        Token::Minus => "'-'".to_owned(),
        Token::Star => "'*'".to_owned(),
        Token::Slash => "'/'".to_owned(),
        Token::Percent => "'%'".to_owned(),
        Token::AndAnd => "'&&'".to_owned(),
        Token::OrOr => "'||'".to_owned(),
    }
}
