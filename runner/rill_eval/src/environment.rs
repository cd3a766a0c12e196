//! Lexical scopes.
//!
//! Scopes form a parent chain of shared handles so that closures can
//! hold the scope they were defined in. Lookup and assignment walk the
//! chain outward; definition always lands in the innermost scope.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

pub type LocalScope = Rc<RefCell<Scope>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    /// The name is not bound in any enclosing scope.
    Undefined,
    /// The name is bound by a constant declaration.
    Constant,
}

struct Binding {
    value: Value,
    mutability: Mutability,
}

#[derive(Default)]
pub struct Scope {
    vars: FxHashMap<String, Binding>,
    parent: Option<LocalScope>,
}

impl Scope {
    pub fn root() -> LocalScope {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn child(parent: &LocalScope) -> LocalScope {
        Rc::new(RefCell::new(Self {
            vars: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Bind a name in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value, mutability: Mutability) {
        self.vars.insert(name.into(), Binding { value, mutability });
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.vars.get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().lookup(name))
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.vars.get_mut(name) {
            if binding.mutability == Mutability::Constant {
                return Err(AssignError::Constant);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}
