//! The shared output buffer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{OutputLine, Severity};

/// Shared handle to an [`OutputBuffer`].
pub type SharedOutputBuffer = Arc<OutputBuffer>;

/// Ordered, append-only sequence of output lines.
///
/// Insertion order is the chronological execution trace. Lines are never
/// mutated or removed except by [`OutputBuffer::clear`], which resets the
/// whole sequence.
#[derive(Default)]
pub struct OutputBuffer {
    lines: Mutex<Vec<OutputLine>>,
}

impl OutputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        OutputBuffer::default()
    }

    /// Append one severity-tagged line.
    pub fn push(&self, severity: Severity, text: impl Into<String>) {
        self.lines.lock().push(OutputLine::new(severity, text));
    }

    /// Snapshot of all lines in insertion order.
    pub fn lines(&self) -> Vec<OutputLine> {
        self.lines.lock().clone()
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Reset the buffer to empty.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Create a buffer ready to share between a console and its owner.
pub fn shared_buffer() -> SharedOutputBuffer {
    Arc::new(OutputBuffer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_preserves_insertion_order() {
        let buffer = OutputBuffer::new();
        buffer.push(Severity::Info, "first");
        buffer.push(Severity::Error, "second");
        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], OutputLine::new(Severity::Info, "first"));
        assert_eq!(lines[1], OutputLine::new(Severity::Error, "second"));
    }

    #[test]
    fn clear_empties_regardless_of_prior_state() {
        let buffer = OutputBuffer::new();
        buffer.clear();
        assert!(buffer.is_empty());

        buffer.push(Severity::Warning, "line");
        assert_eq!(buffer.len(), 1);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
