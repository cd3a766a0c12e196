//! Compiler initialization options.

use std::path::PathBuf;

/// Options recognized by [`Compiler::ensure_ready`](crate::Compiler::ensure_ready).
#[derive(Clone, Debug, Default)]
pub struct CompilerConfig {
    /// Where to load the compiler's payload from. `None` uses the
    /// built-in stripper with no payload; a path that cannot be read is
    /// an initialization failure.
    pub asset_location: Option<PathBuf>,
    /// Run each transform on a dedicated worker thread, isolating the
    /// caller from compiler panics.
    pub run_in_worker: bool,
}

impl CompilerConfig {
    /// Built-in compiler, in-process transforms.
    pub fn new() -> Self {
        CompilerConfig::default()
    }
}
