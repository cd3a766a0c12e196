//! Type erasure: trill source in, plain rill source out.
//!
//! The stripper walks the spanned token stream and records edits - spans
//! to delete (annotations, interfaces, aliases, assertions, modifiers)
//! or replace (`enum` lowering) - then re-emits the source with the edits
//! applied. Everything it does not recognize passes through verbatim, so
//! the transform is total on plain rill: a false-positive classification
//! still round-trips to runnable code.

use rill_ir::Span;
use rill_lexer::{lex, SpannedToken, Token};

use crate::CompilerError;

/// One source rewrite. An empty replacement deletes the span.
struct Edit {
    span: Span,
    replacement: String,
}

impl Edit {
    fn delete(span: Span) -> Self {
        Edit {
            span,
            replacement: String::new(),
        }
    }
}

/// Annotation positions inside a function header, each with its own
/// terminators. Binding annotations are bounded type expressions instead
/// ([`skip_type_expr`]).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum TypeCtx {
    /// `(a: T, b: T)` - ends at `,` or `)`.
    Param,
    /// `): T {` - ends at the body's `{`.
    Return,
}

/// Erase trill type syntax from `source`, emitting plain rill.
pub(crate) fn strip_types(source: &str) -> Result<String, CompilerError> {
    let tokens = lex(source).map_err(|err| CompilerError::Transform(err.to_string()))?;
    let mut edits: Vec<Edit> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i].token {
            Token::Ident(name) => match name.as_str() {
                "interface" => {
                    if let Some(next) = strip_interface(&tokens, i, &mut edits)? {
                        i = next;
                        continue;
                    }
                }
                "type" => {
                    if let Some(next) = strip_type_alias(&tokens, i, &mut edits) {
                        i = next;
                        continue;
                    }
                }
                "namespace" => {
                    if matches!(peek(&tokens, i + 1), Some(Token::Ident(_))) {
                        return Err(CompilerError::Transform(
                            "namespace declarations are not supported".into(),
                        ));
                    }
                }
                "readonly" | "public" | "private" | "protected" | "static" => {
                    if matches!(peek(&tokens, i + 1), Some(Token::Ident(_))) {
                        edits.push(Edit::delete(tokens[i].span));
                    }
                }
                "as" => {
                    if matches!(peek(&tokens, i + 1), Some(Token::Ident(_))) {
                        let end = skip_type_ref(&tokens, i + 1);
                        // Absorb the gap before `as` so the output has no
                        // doubled space where the assertion was.
                        let span = Span::new(
                            ws_run_start(source, tokens[i].span.start),
                            tokens[end - 1].span.end,
                        );
                        edits.push(Edit::delete(span));
                        i = end;
                        continue;
                    }
                }
                _ => {}
            },
            Token::Let | Token::Const => {
                // The annotation is a bounded type expression, never a
                // forward scan: an uninitialized `let x: Num` must not
                // swallow whatever statement follows it.
                if matches!(peek(&tokens, i + 1), Some(Token::Ident(_)))
                    && matches!(peek(&tokens, i + 2), Some(Token::Colon))
                {
                    if let Some(end) = skip_type_expr(&tokens, i + 3) {
                        edits.push(Edit::delete(tokens[i + 2].span.to(tokens[end - 1].span)));
                        i = end;
                        continue;
                    }
                }
            }
            Token::Function => {
                i = strip_function_header(&tokens, i, &mut edits)?;
                continue;
            }
            Token::Enum => {
                i = lower_enum(&tokens, i, &mut edits)?;
                continue;
            }
            Token::Bang => {
                // Postfix non-null assertion; a prefix `!` follows an
                // operator or delimiter, never an expression end.
                if i > 0 && tokens[i - 1].token.ends_expression() {
                    edits.push(Edit::delete(tokens[i].span));
                }
            }
            Token::Lt => {
                if let Some(next) = strip_call_generics(&tokens, i, &mut edits) {
                    i = next;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(apply_edits(source, &edits))
}

fn peek<'t>(tokens: &'t [SpannedToken], idx: usize) -> Option<&'t Token> {
    tokens.get(idx).map(|t| &t.token)
}

/// Skip a type expression starting at `start`, returning the exclusive
/// end index. Balanced delimiters nest; context-specific terminators and
/// any unbalanced closer end the type at depth zero.
fn skip_type(tokens: &[SpannedToken], start: usize, ctx: TypeCtx) -> usize {
    let mut depth: u32 = 0;
    let mut idx = start;
    while idx < tokens.len() {
        let tok = &tokens[idx].token;
        if depth == 0 {
            let ends = match ctx {
                TypeCtx::Param => matches!(tok, Token::Comma),
                TypeCtx::Return => matches!(tok, Token::LBrace),
            };
            if ends || matches!(tok, Token::RParen | Token::RBracket | Token::RBrace) {
                break;
            }
        }
        match tok {
            Token::LParen | Token::LBracket | Token::Lt => depth += 1,
            Token::LBrace if ctx != TypeCtx::Return || depth > 0 => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace | Token::Gt => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        idx += 1;
    }
    idx
}

/// Skip a complete type expression: one type atom, optionally chained
/// with `|` / `&`. Returns the exclusive end index, or `None` when no
/// type starts here. Unlike the header contexts this never scans
/// forward to a terminator, so whatever follows a complete type is left
/// alone.
fn skip_type_expr(tokens: &[SpannedToken], start: usize) -> Option<usize> {
    let mut idx = skip_type_atom(tokens, start)?;
    while matches!(peek(tokens, idx), Some(Token::Pipe | Token::Amp)) {
        idx = skip_type_atom(tokens, idx + 1)?;
    }
    Some(idx)
}

/// Skip one type atom: a named type with its suffixes, a literal type,
/// a braced object type, or a bracketed tuple type.
fn skip_type_atom(tokens: &[SpannedToken], start: usize) -> Option<usize> {
    match peek(tokens, start)? {
        Token::Ident(_) | Token::Null | Token::Undefined | Token::True | Token::False => {
            Some(skip_type_ref(tokens, start))
        }
        Token::Str(_) | Token::Num(_) => Some(start + 1),
        Token::LBrace => match_brace(tokens, start).map(|close| close + 1),
        Token::LBracket => match_bracket(tokens, start).map(|close| close + 1),
        _ => None,
    }
}

/// Skip a type reference (`Name`, `a.b.Name`, `Name<...>`, `Name[]`)
/// starting at its head identifier. Returns the exclusive end index.
fn skip_type_ref(tokens: &[SpannedToken], start: usize) -> usize {
    let mut idx = start + 1;
    loop {
        match (peek(tokens, idx), peek(tokens, idx + 1)) {
            (Some(Token::Dot), Some(Token::Ident(_))) => idx += 2,
            (Some(Token::LBracket), Some(Token::RBracket)) => idx += 2,
            (Some(Token::Lt), _) => match close_angle(tokens, idx) {
                Some(close) => idx = close + 1,
                None => break,
            },
            _ => break,
        }
    }
    idx
}

/// Find the `>` matching the `<` at `lt_idx`, accepting only tokens that
/// can appear in a type argument list. Returns `None` when the brackets
/// read as comparisons instead.
fn close_angle(tokens: &[SpannedToken], lt_idx: usize) -> Option<usize> {
    let mut depth: u32 = 0;
    let mut idx = lt_idx;
    while idx < tokens.len() {
        match &tokens[idx].token {
            Token::Lt => depth += 1,
            Token::Gt => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            Token::Ident(_)
            | Token::Comma
            | Token::Dot
            | Token::LBracket
            | Token::RBracket
            | Token::Pipe
            | Token::Amp
            | Token::Num(_)
            | Token::Str(_)
            | Token::Null
            | Token::Undefined
            | Token::True
            | Token::False => {}
            _ => return None,
        }
        idx += 1;
    }
    None
}

/// Find the `}` matching the `{` at `lbrace_idx`.
fn match_brace(tokens: &[SpannedToken], lbrace_idx: usize) -> Option<usize> {
    let mut depth: u32 = 0;
    for (offset, tok) in tokens[lbrace_idx..].iter().enumerate() {
        match tok.token {
            Token::LBrace => depth += 1,
            Token::RBrace => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(lbrace_idx + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Find the `]` matching the `[` at `lbracket_idx`.
fn match_bracket(tokens: &[SpannedToken], lbracket_idx: usize) -> Option<usize> {
    let mut depth: u32 = 0;
    for (offset, tok) in tokens[lbracket_idx..].iter().enumerate() {
        match tok.token {
            Token::LBracket => depth += 1,
            Token::RBracket => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(lbracket_idx + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Start of the whitespace run immediately before `start`.
fn ws_run_start(source: &str, start: u32) -> u32 {
    let bytes = source.as_bytes();
    let mut idx = start as usize;
    while idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
        idx -= 1;
    }
    idx as u32
}

/// Delete an `interface Name ... { ... }` declaration. Returns `None`
/// when the tokens do not form a declaration (e.g. `interface` used as a
/// plain identifier).
fn strip_interface(
    tokens: &[SpannedToken],
    i: usize,
    edits: &mut Vec<Edit>,
) -> Result<Option<usize>, CompilerError> {
    if !matches!(peek(tokens, i + 1), Some(Token::Ident(_))) {
        return Ok(None);
    }
    let mut j = i + 2;
    while let Some(tok) = peek(tokens, j) {
        match tok {
            // extends clauses and generic parameters before the body
            Token::Ident(_) | Token::Comma | Token::Lt | Token::Gt | Token::Pipe | Token::Amp => {
                j += 1;
            }
            Token::LBrace => {
                let close = match_brace(tokens, j).ok_or_else(|| {
                    CompilerError::Transform("unclosed interface declaration".into())
                })?;
                edits.push(Edit::delete(tokens[i].span.to(tokens[close].span)));
                return Ok(Some(close + 1));
            }
            _ => return Ok(None),
        }
    }
    Ok(None)
}

/// Delete a `type Name = ...` alias. Returns `None` when `type` is a
/// plain identifier here.
fn strip_type_alias(tokens: &[SpannedToken], i: usize, edits: &mut Vec<Edit>) -> Option<usize> {
    if !matches!(peek(tokens, i + 1), Some(Token::Ident(_))) {
        return None;
    }
    let mut j = i + 2;
    if matches!(peek(tokens, j), Some(Token::Lt)) {
        j = close_angle(tokens, j)? + 1;
    }
    if !matches!(peek(tokens, j), Some(Token::Assign)) {
        return None;
    }
    // Skip the aliased type. A `;` terminates and is deleted with the
    // alias; otherwise the next statement keyword (or stream end) ends it.
    let mut depth: u32 = 0;
    let mut end = j + 1;
    while let Some(tok) = peek(tokens, end) {
        if depth == 0 {
            if matches!(tok, Token::Semi) {
                end += 1;
                break;
            }
            if tok.starts_statement()
                || matches!(tok, Token::RParen | Token::RBracket | Token::RBrace)
            {
                break;
            }
        }
        match tok {
            Token::LParen | Token::LBracket | Token::LBrace | Token::Lt => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace | Token::Gt => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        end += 1;
    }
    edits.push(Edit::delete(tokens[i].span.to(tokens[end - 1].span)));
    Some(end)
}

/// Erase generics, parameter annotations, optional-parameter markers, and
/// the return annotation from a `function` header. Returns the index
/// after the header.
fn strip_function_header(
    tokens: &[SpannedToken],
    i: usize,
    edits: &mut Vec<Edit>,
) -> Result<usize, CompilerError> {
    let mut j = i + 1;
    if matches!(peek(tokens, j), Some(Token::Ident(_))) {
        j += 1;
    }
    if matches!(peek(tokens, j), Some(Token::Lt)) {
        let close = close_angle(tokens, j).ok_or_else(|| {
            CompilerError::Transform("unclosed generic parameter list".into())
        })?;
        edits.push(Edit::delete(tokens[j].span.to(tokens[close].span)));
        j = close + 1;
    }
    if !matches!(peek(tokens, j), Some(Token::LParen)) {
        return Ok(j);
    }
    j += 1;
    let mut depth: u32 = 0;
    // Annotation colons only occur outside default-value expressions;
    // a ternary in a default value has a colon of its own.
    let mut in_default = false;
    while let Some(tok) = peek(tokens, j) {
        if depth == 0 {
            match tok {
                Token::RParen => break,
                Token::Comma => in_default = false,
                Token::Assign => in_default = true,
                Token::Question if !in_default => {
                    edits.push(Edit::delete(tokens[j].span));
                    j += 1;
                    continue;
                }
                Token::Colon if !in_default => {
                    let end = skip_type(tokens, j + 1, TypeCtx::Param);
                    let span = if end > j + 1 {
                        tokens[j].span.to(tokens[end - 1].span)
                    } else {
                        tokens[j].span
                    };
                    edits.push(Edit::delete(span));
                    j = end;
                    continue;
                }
                _ => {}
            }
        }
        match tok {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
        j += 1;
    }
    if matches!(peek(tokens, j), Some(Token::RParen)) {
        j += 1;
        if matches!(peek(tokens, j), Some(Token::Colon)) {
            let end = skip_type(tokens, j + 1, TypeCtx::Return);
            let span = if end > j + 1 {
                tokens[j].span.to(tokens[end - 1].span)
            } else {
                tokens[j].span
            };
            edits.push(Edit::delete(span));
            j = end;
        }
    }
    Ok(j)
}

/// Lower an `enum` declaration to a plain object binding with forward
/// mappings: `enum C { A, B = 5 }` becomes `let C = { A: 0, B: 5 };`.
fn lower_enum(
    tokens: &[SpannedToken],
    i: usize,
    edits: &mut Vec<Edit>,
) -> Result<usize, CompilerError> {
    let Some(Token::Ident(name)) = peek(tokens, i + 1) else {
        return Err(CompilerError::Transform("expected enum name".into()));
    };
    if !matches!(peek(tokens, i + 2), Some(Token::LBrace)) {
        return Err(CompilerError::Transform("expected '{' after enum name".into()));
    }
    let mut members: Vec<(String, f64)> = Vec::new();
    let mut next_value = 0.0_f64;
    let mut j = i + 3;
    let close = loop {
        match peek(tokens, j) {
            Some(Token::RBrace) => break j,
            Some(Token::Ident(member)) => {
                let member = member.clone();
                let mut value = next_value;
                j += 1;
                if matches!(peek(tokens, j), Some(Token::Assign)) {
                    j += 1;
                    let negated = matches!(peek(tokens, j), Some(Token::Minus));
                    if negated {
                        j += 1;
                    }
                    match peek(tokens, j) {
                        Some(Token::Num(n)) => {
                            value = if negated { -n } else { *n };
                            j += 1;
                        }
                        _ => {
                            return Err(CompilerError::Transform(
                                "enum member initializers must be numeric literals".into(),
                            ))
                        }
                    }
                }
                members.push((member, value));
                next_value = value + 1.0;
                if matches!(peek(tokens, j), Some(Token::Comma)) {
                    j += 1;
                }
            }
            Some(_) => {
                return Err(CompilerError::Transform(
                    "unexpected token in enum declaration".into(),
                ))
            }
            None => return Err(CompilerError::Transform("unclosed enum declaration".into())),
        }
    };
    let replacement = if members.is_empty() {
        format!("let {name} = {{}};")
    } else {
        let body = members
            .iter()
            .map(|(member, value)| format!("{member}: {}", fmt_num(*value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("let {name} = {{ {body} }};")
    };
    edits.push(Edit {
        span: tokens[i].span.to(tokens[close].span),
        replacement,
    });
    Ok(close + 1)
}

/// Delete the type arguments of a generic call (`id<Num>(x)`). Returns
/// `None` when the angle brackets read as comparisons.
fn strip_call_generics(tokens: &[SpannedToken], i: usize, edits: &mut Vec<Edit>) -> Option<usize> {
    if i == 0 || !matches!(tokens[i - 1].token, Token::Ident(_)) {
        return None;
    }
    let close = close_angle(tokens, i)?;
    if !matches!(peek(tokens, close + 1), Some(Token::LParen)) {
        return None;
    }
    edits.push(Edit::delete(tokens[i].span.to(tokens[close].span)));
    Some(close + 1)
}

/// Format an enum member value the way the plain dialect prints numbers.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Re-emit the source with all edits applied. Edits arrive in walk order
/// (ascending, non-overlapping); anything already covered is skipped.
fn apply_edits(source: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for edit in edits {
        let start = edit.span.start as usize;
        let end = edit.span.end as usize;
        if start < last {
            continue;
        }
        out.push_str(&source[last..start]);
        out.push_str(&edit.replacement);
        last = end;
    }
    out.push_str(&source[last..]);
    out
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
