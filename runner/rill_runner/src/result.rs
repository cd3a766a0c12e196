//! Machine-readable run summary for the CLI's `--json` mode.

use rill_console::OutputLine;
use serde::{Deserialize, Serialize};

use crate::runner::RunReport;

/// One captured output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    pub severity: String,
    pub text: String,
}

/// The serialized outcome of one run: whether it succeeded, which
/// dialect was detected, the full ordered output trace, and the error
/// message when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub detected: String,
    pub lines: Vec<ResultLine>,
    pub error: Option<String>,
}

impl RunResult {
    pub fn new(report: &RunReport, lines: &[OutputLine]) -> Self {
        RunResult {
            success: report.success(),
            detected: report.detected.to_string(),
            lines: lines
                .iter()
                .map(|line| ResultLine {
                    severity: line.severity.to_string(),
                    text: line.text.clone(),
                })
                .collect(),
            error: report.error.clone(),
        }
    }
}
