//! Pattern detectors for trill-only constructs.
//!
//! Each detector answers "does this construct appear anywhere in the
//! text". Scanning is character-level with no lexical structure, on
//! purpose: a match inside a comment or string still counts, exactly as
//! accepted by the classification contract.

/// One trill-only construct detector.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Detector {
    /// `: T` - a colon followed by a word (annotation, ternary, object key
    /// value position - all match).
    ColonAnnotation,
    /// `interface Name`
    InterfaceDecl,
    /// `type Name =`
    TypeAlias,
    /// `<Word>` - a single word between angle brackets.
    GenericParams,
    /// `enum Name`
    EnumDecl,
    /// `namespace Name`
    NamespaceDecl,
    /// `readonly ` modifier.
    ReadonlyModifier,
    /// `public `/`private `/`protected `/`static ` modifiers.
    AccessModifier,
    /// `as Word` type assertion.
    AsAssertion,
    /// `!.` non-null assertion before member access.
    NonNullAssertion,
    /// `??` nullish coalescing.
    NullishCoalescing,
    /// `?.` optional chaining.
    OptionalChaining,
}

impl Detector {
    /// Whether the construct appears anywhere in `source`.
    pub fn matches(self, source: &str) -> bool {
        match self {
            Detector::ColonAnnotation => colon_then_word(source),
            Detector::InterfaceDecl => word_then_ws_word(source, "interface"),
            Detector::TypeAlias => type_alias(source),
            Detector::GenericParams => angle_bracket_word(source),
            Detector::EnumDecl => word_then_ws_word(source, "enum"),
            Detector::NamespaceDecl => word_then_ws_word(source, "namespace"),
            Detector::ReadonlyModifier => word_then_ws(source, "readonly"),
            Detector::AccessModifier => {
                ["public", "private", "protected", "static"]
                    .iter()
                    .any(|word| word_then_ws(source, word))
            }
            Detector::AsAssertion => word_then_ws_word(source, "as"),
            Detector::NonNullAssertion => bang_then_dot(source),
            Detector::NullishCoalescing => source.contains("??"),
            Detector::OptionalChaining => source.contains("?."),
        }
    }
}

fn is_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// `:` then optional whitespace then a word character.
fn colon_then_word(source: &str) -> bool {
    for (idx, _) in source.match_indices(':') {
        let rest = source[idx + 1..].trim_start();
        if rest.chars().next().is_some_and(is_word) {
            return true;
        }
    }
    false
}

/// `word` then at least one whitespace character.
///
/// No left word boundary: a match inside a longer word still counts, as
/// accepted by the contract.
fn word_then_ws(source: &str, word: &str) -> bool {
    source
        .match_indices(word)
        .any(|(idx, _)| after_has_ws(source, idx + word.len()) > 0)
}

/// `word` then whitespace then a word character.
fn word_then_ws_word(source: &str, word: &str) -> bool {
    source.match_indices(word).any(|(idx, _)| {
        let after = idx + word.len();
        let ws = after_has_ws(source, after);
        ws > 0 && source[after + ws..].chars().next().is_some_and(is_word)
    })
}

/// `type` then whitespace then a word then optional whitespace then `=`.
fn type_alias(source: &str) -> bool {
    source.match_indices("type").any(|(idx, _)| {
        let mut rest = &source[idx + 4..];
        let ws = after_has_ws(source, idx + 4);
        if ws == 0 {
            return false;
        }
        rest = &rest[ws..];
        let word_len = rest.chars().take_while(|&c| is_word(c)).count();
        if word_len == 0 {
            return false;
        }
        rest[word_len..].trim_start().starts_with('=')
    })
}

/// `<` then one or more word characters then `>`.
fn angle_bracket_word(source: &str) -> bool {
    for (idx, _) in source.match_indices('<') {
        let rest = &source[idx + 1..];
        let word_len = rest.chars().take_while(|&c| is_word(c)).count();
        if word_len > 0 && rest[word_len..].starts_with('>') {
            return true;
        }
    }
    false
}

/// `!` then optional whitespace then `.`.
fn bang_then_dot(source: &str) -> bool {
    source
        .match_indices('!')
        .any(|(idx, _)| source[idx + 1..].trim_start().starts_with('.'))
}

/// Byte length of the whitespace run starting at `idx`.
fn after_has_ws(source: &str, idx: usize) -> usize {
    source[idx..]
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_requires_word_after() {
        assert!(colon_then_word("x: y"));
        assert!(colon_then_word("x:y"));
        assert!(colon_then_word("x:\n  1"));
        assert!(!colon_then_word("x: 'str"));
        assert!(!colon_then_word("x:"));
    }

    #[test]
    fn angle_brackets_need_single_word() {
        assert!(angle_bracket_word("id<T>"));
        assert!(angle_bracket_word("Map<K2>"));
        assert!(!angle_bracket_word("a < b"));
        assert!(!angle_bracket_word("a <T, U>")); // comma breaks the word
    }

    #[test]
    fn word_boundaries_are_not_enforced() {
        // The contract scans raw text, so an embedded match counts.
        assert!(word_then_ws_word("myinterface Foo", "interface"));
    }

    #[test]
    fn type_alias_needs_equals() {
        assert!(type_alias("type Alias = x"));
        assert!(type_alias("type Alias=x"));
        assert!(!type_alias("type Alias"));
        assert!(!type_alias("typeAlias = x"));
    }

    #[test]
    fn bang_dot_allows_whitespace() {
        assert!(bang_then_dot("a!.b"));
        assert!(bang_then_dot("a! .b"));
        assert!(!bang_then_dot("!flag"));
    }
}
