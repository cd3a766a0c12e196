//! The run controller.
//!
//! Owns the pieces one editing session needs: the current source, the
//! shared output buffer, the compiler handle, and an advisory running
//! flag. A run walks classify → (transpile) → execute and converts
//! every failure into exactly one error-severity line; nothing
//! propagates out of [`Runner::run`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rill_console::{shared_buffer, CaptureConsole, Severity, SharedOutputBuffer};
use rill_ir::LanguageTag;
use rill_transpile::Compiler;
use tracing::debug;

use crate::sandbox;

/// Summary of one run. The full trace lives in the output buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub detected: LanguageTag,
    pub error: Option<String>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Runner {
    source: Mutex<String>,
    buffer: SharedOutputBuffer,
    running: AtomicBool,
    compiler: Compiler,
}

impl Runner {
    /// Create a runner around an existing compiler handle, so several
    /// runners (or an eager initializer) can share one.
    pub fn new(compiler: Compiler) -> Self {
        Runner {
            source: Mutex::new(String::new()),
            buffer: shared_buffer(),
            running: AtomicBool::new(false),
            compiler,
        }
    }

    pub fn set_source(&self, source: impl Into<String>) {
        *self.source.lock() = source.into();
    }

    /// Shared handle to the output buffer; snapshot with `lines()`.
    pub fn buffer(&self) -> &SharedOutputBuffer {
        &self.buffer
    }

    /// Advisory single-flight flag. The runner does not enforce it;
    /// callers that want one run at a time check it before calling
    /// [`Runner::run`].
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Empty the output buffer. Independent of any run in flight.
    pub fn clear(&self) {
        self.buffer.clear();
    }

    /// Run the current source end to end.
    ///
    /// The buffer is reset first, then receives the detection line,
    /// any compiler lifecycle lines, the program's console output, and
    /// at most one error line. The running flag clears on every exit
    /// path.
    pub fn run(&self) -> RunReport {
        self.buffer.clear();
        let _guard = RunningGuard::engage(&self.running);
        let source = self.source.lock().clone();

        let detected = rill_classify::classify(&source);
        debug!(%detected, "classified source");
        self.buffer
            .push(Severity::Info, format!("Detected language: {detected}"));

        let plain = if detected.needs_transpile() {
            if !self.compiler.state().is_ready() {
                self.buffer
                    .push(Severity::Info, "Trill compiler is initializing...");
            }
            if let Err(err) = self.compiler.ensure_ready() {
                return self.fail(detected, format!("Error initializing Trill compiler: {err}"));
            }
            match self.compiler.transpile(&source) {
                Ok(plain) => plain,
                Err(err) => {
                    return self.fail(detected, format!("Trill compilation error: {err}"));
                }
            }
        } else {
            source
        };

        let console = CaptureConsole::new(Arc::clone(&self.buffer));
        if let Err(err) = sandbox::execute(&plain, console) {
            return self.fail(detected, format!("Runtime error: {err}"));
        }
        RunReport {
            detected,
            error: None,
        }
    }

    fn fail(&self, detected: LanguageTag, message: String) -> RunReport {
        debug!(%message, "run failed");
        self.buffer.push(Severity::Error, message.clone());
        RunReport {
            detected,
            error: Some(message),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Runner::new(Compiler::default())
    }
}

/// Sets the flag for the duration of a run; drop clears it even when a
/// pipeline stage exits early.
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunningGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        RunningGuard { flag }
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;
    use rill_console::OutputLine;
    use rill_transpile::CompilerConfig;

    use super::*;

    fn texts(runner: &Runner) -> Vec<String> {
        runner
            .buffer()
            .lines()
            .into_iter()
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn plain_run_emits_detection_line_then_output() {
        let runner = Runner::default();
        runner.set_source("console.log('x'); console.log('x');");
        let report = runner.run();
        assert!(report.success());
        assert_eq!(report.detected, LanguageTag::Plain);
        assert_eq!(
            texts(&runner),
            vec!["Detected language: RILL", "x", "x"]
        );
    }

    #[test]
    fn typed_run_announces_initialization_once() {
        let runner = Runner::default();
        runner.set_source("let n: Num = 2; console.log(n);");
        let report = runner.run();
        assert!(report.success());
        assert_eq!(report.detected, LanguageTag::Typed);
        assert_eq!(
            texts(&runner),
            vec![
                "Detected language: TRILL",
                "Trill compiler is initializing...",
                "2",
            ]
        );

        // The compiler stays ready, so the second run skips the notice.
        runner.run();
        assert_eq!(texts(&runner), vec!["Detected language: TRILL", "2"]);
    }

    #[test]
    fn transpiled_trill_features_execute() {
        let runner = Runner::default();
        runner.set_source(
            "enum Color { Red, Green = 5 }\n\
             function pick(c: Num): Num { return c; }\n\
             console.log(pick(Color.Green));",
        );
        let report = runner.run();
        assert!(report.success());
        assert_eq!(texts(&runner).last().map(String::as_str), Some("5"));
    }

    #[test]
    fn deeply_nested_source_runs_instead_of_aborting() {
        let depth = 100_000;
        let runner = Runner::default();
        runner.set_source(format!(
            "console.log({}1{});",
            "(".repeat(depth),
            ")".repeat(depth)
        ));
        let report = runner.run();
        assert!(report.success());
        assert_eq!(texts(&runner), vec!["Detected language: RILL", "1"]);
        assert!(!runner.is_running());
    }

    #[test]
    fn syntax_error_yields_one_error_line_and_no_program_output() {
        let runner = Runner::default();
        runner.set_source("let = 1;");
        let report = runner.run();
        assert!(!report.success());
        let lines = runner.buffer().lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].severity, Severity::Info);
        assert_eq!(lines[1].severity, Severity::Error);
        assert!(lines[1].text.starts_with("Runtime error: "));
    }

    #[test]
    fn thrown_value_keeps_partial_output() {
        let runner = Runner::default();
        runner.set_source("console.log('before'); throw 'stop'; console.log('after');");
        let report = runner.run();
        assert_eq!(
            report.error.as_deref(),
            Some("Runtime error: Uncaught stop")
        );
        assert_eq!(
            runner.buffer().lines(),
            vec![
                OutputLine::new(Severity::Info, "Detected language: RILL"),
                OutputLine::new(Severity::Info, "before"),
                OutputLine::new(Severity::Error, "Runtime error: Uncaught stop"),
            ]
        );
        assert!(!runner.is_running());
    }

    #[test]
    fn unsupported_trill_construct_is_a_compilation_error() {
        let runner = Runner::default();
        runner.set_source("namespace Util { }");
        let report = runner.run();
        assert_eq!(
            report.error.as_deref(),
            Some("Trill compilation error: namespace declarations are not supported")
        );
        // Detection, initialization notice, then exactly one error.
        assert_eq!(runner.buffer().len(), 3);
    }

    #[test]
    fn failed_initialization_stops_before_transpiling() {
        let compiler = Compiler::new(CompilerConfig {
            asset_location: Some("/nonexistent/trill.payload".into()),
            run_in_worker: false,
        });
        let runner = Runner::new(compiler);
        runner.set_source("let n: Num = 2;");
        let report = runner.run();
        let error = report.error.unwrap();
        assert!(error.starts_with("Error initializing Trill compiler: "));
        let lines = runner.buffer().lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].severity, Severity::Error);

        // Initialization failure is retryable; the next run announces again.
        runner.run();
        assert_eq!(
            texts(&runner)[1],
            "Trill compiler is initializing..."
        );
    }

    #[test]
    fn each_run_resets_the_buffer() {
        let runner = Runner::default();
        runner.set_source("console.log('one');");
        runner.run();
        runner.run();
        assert_eq!(texts(&runner), vec!["Detected language: RILL", "one"]);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let runner = Runner::default();
        runner.set_source("console.log('x');");
        runner.run();
        runner.clear();
        assert!(runner.buffer().is_empty());
    }

    #[test]
    fn running_flag_clears_after_success_and_failure() {
        let runner = Runner::default();
        runner.set_source("console.log(1);");
        runner.run();
        assert!(!runner.is_running());
        runner.set_source("throw 'x';");
        runner.run();
        assert!(!runner.is_running());
    }
}
