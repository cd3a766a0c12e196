//! Language classification tags.

use std::fmt;

/// The classifier's verdict on a piece of source text.
///
/// Derived, stateless, recomputed on every run request.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LanguageTag {
    /// Plain rill: executed directly, no transformation.
    Plain,
    /// Typed trill: transpiled to plain rill before execution.
    Typed,
}

impl LanguageTag {
    /// Whether the source needs the transpiler before it can run.
    #[inline]
    pub fn needs_transpile(self) -> bool {
        matches!(self, LanguageTag::Typed)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageTag::Plain => write!(f, "RILL"),
            LanguageTag::Typed => write!(f, "TRILL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_is_uppercase_dialect_name() {
        assert_eq!(LanguageTag::Plain.to_string(), "RILL");
        assert_eq!(LanguageTag::Typed.to_string(), "TRILL");
    }

    #[test]
    fn only_typed_needs_transpile() {
        assert!(LanguageTag::Typed.needs_transpile());
        assert!(!LanguageTag::Plain.needs_transpile());
    }
}
