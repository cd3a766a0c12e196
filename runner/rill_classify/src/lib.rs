//! Rill Classify - heuristic language detection.
//!
//! Tags raw source text as plain rill or typed trill by scanning for
//! trill-only constructs. This is a best-effort textual heuristic, not a
//! parse: detectors run in a fixed order over the whole text and the first
//! hit wins. False positives are accepted (a ternary's `: x` or a `?.`
//! inside a string literal classify plain code as trill) and so are false
//! negatives (trill that uses none of the listed constructs). The
//! transpiler is total on plain code, so a false positive still produces
//! runnable output.

mod detect;

use detect::Detector;
pub use rill_ir::LanguageTag;

/// Trill-only construct detectors, in detection order.
///
/// The order is part of the observable contract: classification
/// short-circuits on the first match.
const DETECTORS: [Detector; 12] = [
    Detector::ColonAnnotation,
    Detector::InterfaceDecl,
    Detector::TypeAlias,
    Detector::GenericParams,
    Detector::EnumDecl,
    Detector::NamespaceDecl,
    Detector::ReadonlyModifier,
    Detector::AccessModifier,
    Detector::AsAssertion,
    Detector::NonNullAssertion,
    Detector::NullishCoalescing,
    Detector::OptionalChaining,
];

/// Classify source text as plain rill or typed trill.
///
/// Never fails: an ambiguous input still gets a best-effort tag.
pub fn classify(source: &str) -> LanguageTag {
    for detector in &DETECTORS {
        if detector.matches(source) {
            return LanguageTag::Typed;
        }
    }
    LanguageTag::Plain
}
