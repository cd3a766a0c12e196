//! Token definitions.
//!
//! One token set covers both dialects. Trill's type keywords (`interface`,
//! `type`, `namespace`, `readonly`, `as`, access modifiers) are contextual
//! in the superset, so they lex as plain identifiers and the transpiler
//! recognizes them by text. Only `enum` is reserved in both dialects.

use logos::{Lexer, Logos};

/// A single token of rill/trill source.
#[derive(Logos, Clone, PartialEq, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("function")]
    Function,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("throw")]
    Throw,
    #[token("enum")]
    Enum,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("undefined")]
    Undefined,

    // Literals and identifiers
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_owned())]
    Ident(String),
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    Num(f64),
    #[regex(r#""([^"\\\n]|\\.)*""#, cook_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", cook_string)]
    Str(String),

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,

    // Operators
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("=")]
    Assign,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
}

impl Token {
    /// Whether this token can end an expression.
    ///
    /// Used by the transpiler to tell a postfix non-null `!` (which follows
    /// an expression) from a prefix logical `!` (which precedes one).
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Num(_)
                | Token::Str(_)
                | Token::True
                | Token::False
                | Token::Null
                | Token::Undefined
                | Token::RParen
                | Token::RBracket
                | Token::RBrace
        )
    }

    /// Whether this identifier-like token begins a plain-dialect statement.
    ///
    /// Used by the transpiler to find the end of newline-terminated type
    /// alias declarations.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            Token::Let
                | Token::Const
                | Token::Function
                | Token::Return
                | Token::If
                | Token::While
                | Token::Throw
                | Token::Enum
        )
    }
}

fn parse_number(lex: &mut Lexer<'_, Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn cook_string(lex: &mut Lexer<'_, Token>) -> String {
    let slice = lex.slice();
    // Strip the matched quote pair before cooking escapes.
    cook_escapes(&slice[1..slice.len() - 1])
}

/// Resolve backslash escapes in a string literal body.
///
/// Unknown escapes keep the escaped character, matching the lenient
/// behavior of the plain dialect.
fn cook_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
