//! Runtime values.
//!
//! Lists and objects are shared references: cloning a [`Value`] clones
//! the handle, not the contents, so mutation through one binding is
//! visible through every other. Object entries keep insertion order,
//! which is what makes rendered output deterministic.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rill_console::ConsoleRender;
use rill_ir::Stmt;

use crate::environment::LocalScope;
use crate::json;

/// A user-defined function together with its captured scope.
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
    pub closure: LocalScope,
}

/// Host-provided callables. The only host surface the dialect exposes
/// is the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    ConsoleLog,
    ConsoleWarn,
    ConsoleError,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Self::ConsoleLog => "log",
            Self::ConsoleWarn => "warn",
            Self::ConsoleError => "error",
        }
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<Vec<(String, Value)>>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Self::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Self::List(Rc::new(RefCell::new(items)))
    }

    pub fn object(entries: Vec<(String, Value)>) -> Self {
        Self::Object(Rc::new(RefCell::new(entries)))
    }

    /// Truthiness for conditions and `&&`/`||`/`!`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Num(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(_) | Self::Object(_) | Self::Function(_) | Self::Builtin(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Num(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Function(_) | Self::Builtin(_) => "function",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::List(_) | Self::Object(_))
    }
}

/// Number formatting: integral values drop the fractional point, the
/// non-finite values render by their conventional script names.
pub fn fmt_num(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    #[expect(clippy::cast_possible_truncation, reason = "range-checked above")]
    if n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_992.0 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

impl fmt::Display for Value {
    /// Coercion to text, as used by string concatenation and error
    /// rendering. Lists flatten to their comma-joined elements and
    /// objects collapse to a placeholder, matching script-host habits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Num(n) => f.write_str(&fmt_num(*n)),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                let items = items.borrow();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(item, Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(func) => write!(f, "function {}", func.name),
            Self::Builtin(builtin) => write!(f, "function {}", builtin.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Function(func) => write!(f, "function {}", func.name),
            other => write!(f, "{other}"),
        }
    }
}

impl PartialEq for Value {
    /// Strict equality: no coercion, composites compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Num(a), Self::Num(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

impl ConsoleRender for Value {
    /// Console argument form: composites render as indented structural
    /// text, everything else uses the display coercion. A composite
    /// that cannot be serialized (self-referencing) falls back to the
    /// display coercion as well.
    fn console_render(&self) -> String {
        if self.is_composite() {
            if let Ok(text) = json::to_pretty(self) {
                return text;
            }
        }
        self.to_string()
    }
}
