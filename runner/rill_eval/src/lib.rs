//! Rill Eval - tree-walking evaluator for the plain rill dialect.
//!
//! This is an in-process evaluator, not a security boundary: executed
//! code shares the host process and is limited only in what the dialect
//! itself can express. The one thing it intercepts is console output,
//! which routes through an explicitly injected
//! [`CaptureConsole`](rill_console::CaptureConsole) rather than any
//! ambient global.
//!
//! # Architecture
//!
//! - [`Value`]: runtime values; lists and objects have reference
//!   semantics via shared interior mutability, objects keep insertion
//!   order
//! - [`Scope`]/[`LocalScope`]: lexical scope chain for variables and
//!   closures
//! - [`Interpreter`]: statement execution and expression evaluation
//! - `json`: the structural serializer behind composite console output

mod environment;
pub mod errors;
mod interpreter;
mod json;
mod value;

pub use environment::{AssignError, LocalScope, Mutability, Scope};
pub use errors::{EvalError, EvalResult};
pub use interpreter::Interpreter;
pub use value::{Builtin, FunctionValue, Value};
