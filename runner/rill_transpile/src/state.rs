//! Compiler lifecycle states.

use std::fmt;

/// Lifecycle of the compiler capability.
///
/// Transitions move forward only: `Uninitialized -> Initializing ->
/// Ready`. A failed initialization is the one exception - it restores
/// `Uninitialized`, leaving the capability callable again on the next
/// run. `Ready` is never torn down during a session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CompilerState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
}

impl CompilerState {
    /// Whether the compiler can serve transforms.
    #[inline]
    pub fn is_ready(self) -> bool {
        matches!(self, CompilerState::Ready)
    }
}

impl fmt::Display for CompilerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilerState::Uninitialized => write!(f, "uninitialized"),
            CompilerState::Initializing => write!(f, "initializing"),
            CompilerState::Ready => write!(f, "ready"),
        }
    }
}
