//! The capture console itself.

use crate::{Severity, SharedOutputBuffer};

/// How a value renders as a single console argument.
///
/// The console stays value-agnostic: the evaluator's value type implements
/// this (composites as indented structural serialization, scalars via
/// display conversion), and tests can pass plain strings.
pub trait ConsoleRender {
    /// Render this value as one console argument.
    fn console_render(&self) -> String;
}

impl ConsoleRender for &str {
    fn console_render(&self) -> String {
        (*self).to_owned()
    }
}

impl ConsoleRender for String {
    fn console_render(&self) -> String {
        self.clone()
    }
}

/// Console whose entry points append tagged lines to a shared buffer.
///
/// One fresh console is wired per run; the buffer it feeds outlives it.
pub struct CaptureConsole {
    buffer: SharedOutputBuffer,
}

impl CaptureConsole {
    /// Create a console writing into `buffer`.
    pub fn new(buffer: SharedOutputBuffer) -> Self {
        CaptureConsole { buffer }
    }

    /// `console.log(...)` - one info line.
    pub fn log<T: ConsoleRender>(&self, args: &[T]) {
        self.append(Severity::Info, args);
    }

    /// `console.warn(...)` - one warning line.
    pub fn warn<T: ConsoleRender>(&self, args: &[T]) {
        self.append(Severity::Warning, args);
    }

    /// `console.error(...)` - one error line.
    pub fn error<T: ConsoleRender>(&self, args: &[T]) {
        self.append(Severity::Error, args);
    }

    fn append<T: ConsoleRender>(&self, severity: Severity, args: &[T]) {
        let text = args
            .iter()
            .map(ConsoleRender::console_render)
            .collect::<Vec<_>>()
            .join(" ");
        self.buffer.push(severity, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shared_buffer, OutputLine};
    use pretty_assertions::assert_eq;

    #[test]
    fn each_call_appends_one_tagged_line() {
        let buffer = shared_buffer();
        let console = CaptureConsole::new(buffer.clone());
        console.log(&["hello", "world"]);
        console.warn(&["careful"]);
        console.error(&["boom"]);
        assert_eq!(
            buffer.lines(),
            vec![
                OutputLine::new(Severity::Info, "hello world"),
                OutputLine::new(Severity::Warning, "careful"),
                OutputLine::new(Severity::Error, "boom"),
            ]
        );
    }

    #[test]
    fn empty_argument_list_appends_empty_line() {
        let buffer = shared_buffer();
        let console = CaptureConsole::new(buffer.clone());
        console.log::<&str>(&[]);
        assert_eq!(buffer.lines(), vec![OutputLine::new(Severity::Info, "")]);
    }
}
