//! Rill Lexer - tokenizer for rill and the trill typed superset.
//!
//! Produces spanned tokens over the whole superset so that both the
//! transpiler (which erases type syntax by span) and the parser (which
//! only accepts the plain dialect) consume the same stream.

mod token;

pub use token::Token;

use logos::Logos;
use rill_ir::Span;
use thiserror::Error;

/// A token with its source span.
#[derive(Clone, PartialEq, Debug)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Lexing failure.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum LexError {
    #[error("Unterminated string literal at {span}")]
    UnterminatedString { span: Span },
    #[error("Unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },
}

impl LexError {
    /// Source span of the offending text.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span } | LexError::UnexpectedChar { ch: _, span } => {
                *span
            }
        }
    }
}

/// Tokenize `source`, returning the full token stream or the first error.
pub fn lex(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(token) => tokens.push(SpannedToken { token, span }),
            Err(()) => {
                let ch = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                if ch == '\'' || ch == '"' {
                    return Err(LexError::UnterminatedString { span });
                }
                return Err(LexError::UnexpectedChar { ch, span });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn lexes_console_call() {
        assert_eq!(
            kinds("console.log('x');"),
            vec![
                Token::Ident("console".to_owned()),
                Token::Dot,
                Token::Ident("log".to_owned()),
                Token::LParen,
                Token::Str("x".to_owned()),
                Token::RParen,
                Token::Semi,
            ]
        );
    }

    #[test]
    fn type_keywords_lex_as_identifiers() {
        // Contextual in the superset: only `enum` is reserved.
        assert_eq!(
            kinds("interface type namespace readonly as public"),
            vec![
                Token::Ident("interface".to_owned()),
                Token::Ident("type".to_owned()),
                Token::Ident("namespace".to_owned()),
                Token::Ident("readonly".to_owned()),
                Token::Ident("as".to_owned()),
                Token::Ident("public".to_owned()),
            ]
        );
        assert_eq!(kinds("enum"), vec![Token::Enum]);
    }

    #[test]
    fn question_tokens_disambiguate() {
        assert_eq!(
            kinds("a?.b ?? c ? d : e"),
            vec![
                Token::Ident("a".to_owned()),
                Token::QuestionDot,
                Token::Ident("b".to_owned()),
                Token::QuestionQuestion,
                Token::Ident("c".to_owned()),
                Token::Question,
                Token::Ident("d".to_owned()),
                Token::Colon,
                Token::Ident("e".to_owned()),
            ]
        );
    }

    #[test]
    fn equality_tokens_longest_match() {
        assert_eq!(
            kinds("a === b == c != d !== e"),
            vec![
                Token::Ident("a".to_owned()),
                Token::StrictEq,
                Token::Ident("b".to_owned()),
                Token::EqEq,
                Token::Ident("c".to_owned()),
                Token::Ne,
                Token::Ident("d".to_owned()),
                Token::StrictNe,
                Token::Ident("e".to_owned()),
            ]
        );
    }

    #[test]
    fn numbers_parse() {
        assert_eq!(
            kinds("1 2.5 1e3"),
            vec![Token::Num(1.0), Token::Num(2.5), Token::Num(1000.0)]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("1 // line\n/* block\n * still block **/ 2"),
            vec![Token::Num(1.0), Token::Num(2.0)]
        );
    }

    #[test]
    fn unterminated_string_errors() {
        assert!(matches!(
            lex("let s = 'oops"),
            Err(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn unexpected_char_errors() {
        assert!(matches!(
            lex("let a = 1 @ 2"),
            Err(LexError::UnexpectedChar { ch: '@', .. })
        ));
    }

    #[test]
    fn spans_cover_source_slices() {
        let tokens = lex("let abc = 1").unwrap();
        assert_eq!(tokens[1].span, Span::new(4, 7));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Tokenizing arbitrary input must never panic; it either
            // yields a stream or a positioned error.
            #[test]
            fn lex_never_panics(input in ".*") {
                let _ = lex(&input);
            }
        }
    }
}
