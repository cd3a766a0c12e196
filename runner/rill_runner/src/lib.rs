//! Rill Runner - the run pipeline behind the `rill` CLI.
//!
//! Composes the other crates into the classify → (transpile) → execute
//! pipeline: [`Runner`] drives a run end to end against a shared output
//! buffer, [`sandbox`] executes plain rill, and [`RunResult`] is the
//! machine-readable summary the CLI serializes.

pub mod result;
pub mod runner;
pub mod sandbox;

pub use result::{ResultLine, RunResult};
pub use runner::{RunReport, Runner};
pub use sandbox::RuntimeError;
