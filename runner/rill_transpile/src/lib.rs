//! Rill Transpile - the trill-to-rill transpiler adapter.
//!
//! Wraps the type-stripping compiler capability behind a lazily
//! initialized, reusable [`Compiler`] handle. The lifecycle is the
//! tri-state [`CompilerState`]: created `Uninitialized`, transitions
//! forward through `Initializing` to `Ready`, and a failed initialization
//! falls back to `Uninitialized` so the next run can retry.
//!
//! The transform itself ([`Compiler::transpile`]) erases trill's type
//! syntax and lowers `enum` declarations, emitting plain rill targeting
//! the dialect's modern baseline: optional chaining and nullish
//! coalescing pass through untouched.

mod compiler;
mod config;
mod error;
mod state;
mod strip;

pub use compiler::Compiler;
pub use config::CompilerConfig;
pub use error::CompilerError;
pub use state::CompilerState;
