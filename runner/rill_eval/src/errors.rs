//! Runtime errors.
//!
//! Messages follow the phrasing script hosts use, since they surface
//! verbatim in captured console output.

use crate::value::Value;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn undefined(name: &str) -> Self {
        Self::new(format!("{name} is not defined"))
    }

    pub fn not_a_function(value: &Value) -> Self {
        Self::new(format!("{value:?} is not a function"))
    }

    pub fn constant_assignment() -> Self {
        Self::new("Assignment to constant variable.")
    }

    pub fn read_of_null(property: &str) -> Self {
        Self::new(format!(
            "Cannot read properties of null (reading '{property}')"
        ))
    }

    pub fn set_on_null(property: &str) -> Self {
        Self::new(format!(
            "Cannot set properties of null (setting '{property}')"
        ))
    }

    pub fn bad_operand(op: &str, value: &Value) -> Self {
        Self::new(format!("Cannot apply '{op}' to {}", value.type_name()))
    }

    /// A `throw` that no handler intercepts. The thrown value renders
    /// through its display coercion.
    pub fn thrown(value: &Value) -> Self {
        Self::new(format!("Uncaught {value}"))
    }
}
