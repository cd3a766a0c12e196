//! Rill Stack - stack safety for deep recursion.
//!
//! The parser and the evaluator use one native stack frame per nesting
//! level, so pathologically nested (but valid) input would otherwise
//! overflow the fixed OS stack and abort the whole process. Recursive
//! entry points wrap themselves in [`ensure_sufficient_stack`], which
//! grows the stack on demand instead.

/// Remaining stack below this triggers a growth (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each additional stack segment (1MB).
const STACK_PER_GROWTH: usize = 1024 * 1024;

/// Run `f`, allocating a fresh stack segment first when less than the
/// red zone remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_GROWTH, f)
}
