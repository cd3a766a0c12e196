//! Plain-dialect execution.
//!
//! "Sandbox" here means a captured-output execution context, not an
//! isolation boundary: code runs in-process with no resource limits,
//! and the only thing intercepted is console output, which flows into
//! the injected [`CaptureConsole`]. Treat input as trusted.

use rill_console::CaptureConsole;
use rill_eval::Interpreter;
use tracing::debug;

/// Any failure while executing plain rill: lex errors, parse errors,
/// thrown values, and engine errors all surface here as one message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
        }
    }
}

/// Execute plain rill source, forwarding console calls to `console`.
///
/// Console lines produced before a failure stay in the console's
/// buffer; the error only describes where execution stopped.
pub fn execute(source: &str, console: CaptureConsole) -> Result<(), RuntimeError> {
    let tokens = rill_lexer::lex(source).map_err(|err| RuntimeError::new(err.to_string()))?;
    let program = rill_parse::parse(&tokens).map_err(|err| RuntimeError::new(err.to_string()))?;
    debug!(statements = program.len(), "executing program");
    Interpreter::new(console)
        .run(&program)
        .map_err(|err| RuntimeError::new(err.message))
}
