//! Transpiler failure modes.

use thiserror::Error;

/// Failures surfaced by the transpiler adapter.
///
/// All are recoverable per run: an `Init` failure is retried on the next
/// run request, a `Transform` failure only affects the offending source.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum CompilerError {
    /// The compiler capability failed to load.
    #[error("{0}")]
    Init(String),
    /// The source is not valid trill, or uses an unsupported construct.
    #[error("{0}")]
    Transform(String),
    /// `transpile` was called before a successful `ensure_ready`.
    #[error("compiler is not initialized")]
    NotReady,
}
