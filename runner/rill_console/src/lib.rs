//! Rill Console - captured console output.
//!
//! Executed scripts do not get the host's stdout. Their `console` calls
//! route through a [`CaptureConsole`] that renders arguments, joins them
//! into one line, tags the line with a [`Severity`], and appends it to a
//! shared [`OutputBuffer`] - the chronological execution trace the
//! collaborator renders.
//!
//! Line text is opaque data here. The HTML helper in [`html`] escapes it
//! at render time; nothing in this crate ever injects raw text into
//! markup.

mod buffer;
mod console;
pub mod html;
mod line;

pub use buffer::{shared_buffer, OutputBuffer, SharedOutputBuffer};
pub use console::{CaptureConsole, ConsoleRender};
pub use line::{OutputLine, Severity};
