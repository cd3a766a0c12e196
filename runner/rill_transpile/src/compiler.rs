//! The lazily initialized compiler handle.

use std::fs;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tracing::debug;

use crate::{strip, CompilerConfig, CompilerError, CompilerState};

/// Handle to the compiler capability.
///
/// Created once per session and shared by clone; all clones observe the
/// same [`CompilerState`]. Initialization is lazy and idempotent:
/// [`Compiler::ensure_ready`] is a fast no-op once the state is `Ready`,
/// and concurrent callers serialize on the state lock, so at most one
/// initialization attempt is in flight at a time.
#[derive(Clone)]
pub struct Compiler {
    config: CompilerConfig,
    state: Arc<Mutex<CompilerState>>,
}

impl Compiler {
    /// Create an uninitialized compiler with the given options.
    pub fn new(config: CompilerConfig) -> Self {
        Compiler {
            config,
            state: Arc::new(Mutex::new(CompilerState::Uninitialized)),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CompilerState {
        *self.state.lock()
    }

    /// Load the compiler capability if it is not loaded yet.
    ///
    /// Idempotent: returns immediately when already `Ready`. On failure
    /// the state falls back to `Uninitialized` and the error describes
    /// what could not be loaded; the next call retries from scratch.
    pub fn ensure_ready(&self) -> Result<(), CompilerError> {
        let mut state = self.state.lock();
        if state.is_ready() {
            return Ok(());
        }
        *state = CompilerState::Initializing;
        match self.load_capability() {
            Ok(()) => {
                *state = CompilerState::Ready;
                debug!(worker = self.config.run_in_worker, "compiler ready");
                Ok(())
            }
            Err(err) => {
                *state = CompilerState::Uninitialized;
                debug!(error = %err, "compiler initialization failed");
                Err(err)
            }
        }
    }

    /// Transform trill source into plain rill.
    ///
    /// Requires a prior successful [`Compiler::ensure_ready`]; the runner
    /// controller is responsible for that ordering.
    pub fn transpile(&self, source: &str) -> Result<String, CompilerError> {
        if !self.state().is_ready() {
            return Err(CompilerError::NotReady);
        }
        debug!(len = source.len(), "transforming trill source");
        if self.config.run_in_worker {
            transform_in_worker(source)
        } else {
            strip::strip_types(source)
        }
    }

    fn load_capability(&self) -> Result<(), CompilerError> {
        if let Some(path) = &self.config.asset_location {
            fs::read(path).map_err(|err| {
                CompilerError::Init(format!(
                    "failed to load compiler asset {}: {err}",
                    path.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(CompilerConfig::default())
    }
}

/// Run the transform on a dedicated worker thread.
///
/// A panicking transform takes down only the worker; the caller sees a
/// transform error instead.
fn transform_in_worker(source: &str) -> Result<String, CompilerError> {
    thread::scope(|scope| {
        let handle = scope.spawn(|| strip::strip_types(source));
        handle
            .join()
            .unwrap_or_else(|_| Err(CompilerError::Transform("compiler worker panicked".into())))
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn starts_uninitialized() {
        let compiler = Compiler::default();
        assert_eq!(compiler.state(), CompilerState::Uninitialized);
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let compiler = Compiler::default();
        compiler.ensure_ready().unwrap();
        assert_eq!(compiler.state(), CompilerState::Ready);
        // Second call must succeed without further work.
        compiler.ensure_ready().unwrap();
        assert_eq!(compiler.state(), CompilerState::Ready);
    }

    #[test]
    fn missing_asset_fails_init_and_stays_retryable() {
        let compiler = Compiler::new(CompilerConfig {
            asset_location: Some(PathBuf::from("/nonexistent/compiler.payload")),
            run_in_worker: false,
        });
        let err = compiler.ensure_ready().unwrap_err();
        assert!(matches!(err, CompilerError::Init(_)));
        // Failure leaves the state callable again.
        assert_eq!(compiler.state(), CompilerState::Uninitialized);
        assert!(compiler.ensure_ready().is_err());
    }

    #[test]
    fn transpile_before_init_is_rejected() {
        let compiler = Compiler::default();
        assert_eq!(
            compiler.transpile("let x: Num = 1;"),
            Err(CompilerError::NotReady)
        );
    }

    #[test]
    fn clones_share_state() {
        let compiler = Compiler::default();
        let clone = compiler.clone();
        compiler.ensure_ready().unwrap();
        assert_eq!(clone.state(), CompilerState::Ready);
    }

    #[test]
    fn worker_mode_transforms() {
        let compiler = Compiler::new(CompilerConfig {
            asset_location: None,
            run_in_worker: true,
        });
        compiler.ensure_ready().unwrap();
        let out = compiler.transpile("let x: Num = 1;").unwrap();
        assert!(out.contains("let x"));
        assert!(!out.contains("Num"));
    }
}
