//! Output lines and their severities.

use std::fmt;

/// Severity of one output line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// CSS class used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "console-log",
            Severity::Warning => "console-warn",
            Severity::Error => "console-error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One rendered, severity-tagged line of output.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OutputLine {
    pub severity: Severity,
    pub text: String,
}

impl OutputLine {
    /// Create a new line.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        OutputLine {
            severity,
            text: text.into(),
        }
    }
}
