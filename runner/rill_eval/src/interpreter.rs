//! Statement execution and expression evaluation.

use std::rc::Rc;

use rill_console::CaptureConsole;
use rill_ir::{AssignTarget, BinaryOp, Expr, Stmt, UnaryOp};
use rill_stack::ensure_sufficient_stack;

use crate::environment::{AssignError, LocalScope, Mutability, Scope};
use crate::errors::{EvalError, EvalResult};
use crate::value::{fmt_num, Builtin, FunctionValue, Value};

/// How a statement sequence finished.
enum Flow {
    Normal,
    Return(Value),
}

/// Evaluates a parsed program against an injected capture console.
///
/// The interpreter holds the global scope, which carries exactly one
/// host binding: the `console` object. Everything else a program sees
/// is what it defines itself.
pub struct Interpreter {
    globals: LocalScope,
    console: CaptureConsole,
}

impl Interpreter {
    pub fn new(console: CaptureConsole) -> Self {
        let globals = Scope::root();
        globals.borrow_mut().define(
            "console",
            Value::object(vec![
                ("log".to_owned(), Value::Builtin(Builtin::ConsoleLog)),
                ("warn".to_owned(), Value::Builtin(Builtin::ConsoleWarn)),
                ("error".to_owned(), Value::Builtin(Builtin::ConsoleError)),
            ]),
            Mutability::Constant,
        );
        Interpreter { globals, console }
    }

    /// Execute a whole program in the global scope.
    pub fn run(&self, program: &[Stmt]) -> EvalResult<()> {
        match self.exec_stmts(program, &self.globals)? {
            Flow::Normal => Ok(()),
            Flow::Return(_) => Err(EvalError::new("Illegal return statement")),
        }
    }

    fn exec_stmts(&self, stmts: &[Stmt], scope: &LocalScope) -> EvalResult<Flow> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_stmt(stmt, scope)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&self, stmt: &Stmt, scope: &LocalScope) -> EvalResult<Flow> {
        // Nested blocks and user function calls recurse through here.
        ensure_sufficient_stack(|| match stmt {
            Stmt::Let {
                name,
                mutable,
                init,
                ..
            } => {
                let value = match init {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                let mutability = if *mutable {
                    Mutability::Mutable
                } else {
                    Mutability::Constant
                };
                scope.borrow_mut().define(name.clone(), value, mutability);
                Ok(Flow::Normal)
            }
            Stmt::Assign { target, value, .. } => {
                self.exec_assign(target, value, scope)?;
                Ok(Flow::Normal)
            }
            Stmt::Function {
                name, params, body, ..
            } => {
                let function = Value::Function(Rc::new(FunctionValue {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone().into(),
                    closure: Rc::clone(scope),
                }));
                scope
                    .borrow_mut()
                    .define(name.clone(), function, Mutability::Mutable);
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                let taken = if self.eval_expr(cond, scope)?.is_truthy() {
                    Some(then_branch)
                } else {
                    else_branch.as_ref()
                };
                match taken {
                    Some(branch) => self.exec_stmts(branch, &Scope::child(scope)),
                    None => Ok(Flow::Normal),
                }
            }
            Stmt::While { cond, body, .. } => {
                while self.eval_expr(cond, scope)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_stmts(body, &Scope::child(scope))? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::Throw { value, .. } => {
                let value = self.eval_expr(value, scope)?;
                Err(EvalError::thrown(&value))
            }
            Stmt::Block(stmts) => self.exec_stmts(stmts, &Scope::child(scope)),
            Stmt::Expr(expr) => {
                self.eval_expr(expr, scope)?;
                Ok(Flow::Normal)
            }
        })
    }

    fn exec_assign(&self, target: &AssignTarget, value: &Expr, scope: &LocalScope) -> EvalResult<()> {
        match target {
            AssignTarget::Name(name) => {
                let value = self.eval_expr(value, scope)?;
                scope
                    .borrow_mut()
                    .assign(name, value)
                    .map_err(|err| match err {
                        AssignError::Undefined => EvalError::undefined(name),
                        AssignError::Constant => EvalError::constant_assignment(),
                    })
            }
            AssignTarget::Member { object, property } => {
                let object = self.eval_expr(object, scope)?;
                let value = self.eval_expr(value, scope)?;
                match object {
                    Value::Object(entries) => {
                        set_entry(&mut entries.borrow_mut(), property, value);
                        Ok(())
                    }
                    Value::Null => Err(EvalError::set_on_null(property)),
                    other => Err(EvalError::new(format!(
                        "Cannot set property '{property}' on {}",
                        other.type_name()
                    ))),
                }
            }
            AssignTarget::Index { object, index } => {
                let object = self.eval_expr(object, scope)?;
                let index = self.eval_expr(index, scope)?;
                let value = self.eval_expr(value, scope)?;
                match (&object, &index) {
                    (Value::List(items), Value::Num(n)) => {
                        let Some(idx) = list_index_for_write(*n) else {
                            return Err(EvalError::new(format!(
                                "Invalid list index {}",
                                fmt_num(*n)
                            )));
                        };
                        let mut items = items.borrow_mut();
                        if idx >= items.len() {
                            items.resize(idx + 1, Value::Null);
                        }
                        items[idx] = value;
                        Ok(())
                    }
                    (Value::Object(entries), _) => {
                        set_entry(&mut entries.borrow_mut(), &index.to_string(), value);
                        Ok(())
                    }
                    (Value::Null, _) => Err(EvalError::set_on_null(&index.to_string())),
                    (other, _) => Err(EvalError::new(format!(
                        "Cannot set index on {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }

    fn eval_expr(&self, expr: &Expr, scope: &LocalScope) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::Null(_) => Ok(Value::Null),
            Expr::Bool(b, _) => Ok(Value::Bool(*b)),
            Expr::Num(n, _) => Ok(Value::Num(*n)),
            Expr::Str(s, _) => Ok(Value::str(s.as_str())),
            Expr::Ident(name, _) => scope
                .borrow()
                .lookup(name)
                .ok_or_else(|| EvalError::undefined(name)),
            Expr::List(items, _) => {
                let items = items
                    .iter()
                    .map(|item| self.eval_expr(item, scope))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::list(items))
            }
            Expr::Object(entries, _) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, entry) in entries {
                    out.push((key.clone(), self.eval_expr(entry, scope)?));
                }
                Ok(Value::object(out))
            }
            Expr::Unary { op, expr, .. } => {
                let value = self.eval_expr(expr, scope)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Neg => match value {
                        Value::Num(n) => Ok(Value::Num(-n)),
                        other => Err(EvalError::bad_operand("-", &other)),
                    },
                }
            }
            Expr::Binary { op, lhs, rhs, .. } => self.eval_binary(*op, lhs, rhs, scope),
            Expr::Ternary {
                cond,
                then,
                otherwise,
                ..
            } => {
                if self.eval_expr(cond, scope)?.is_truthy() {
                    self.eval_expr(then, scope)
                } else {
                    self.eval_expr(otherwise, scope)
                }
            }
            Expr::Call { callee, args, .. } => {
                let callee = self.eval_expr(callee, scope)?;
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(self.eval_expr(arg, scope)?);
                }
                self.call(&callee, evaluated)
            }
            Expr::Member {
                object,
                property,
                optional,
                ..
            } => {
                let object = self.eval_expr(object, scope)?;
                if matches!(object, Value::Null) {
                    return if *optional {
                        Ok(Value::Null)
                    } else {
                        Err(EvalError::read_of_null(property))
                    };
                }
                Ok(member_get(&object, property))
            }
            Expr::Index { object, index, .. } => {
                let object = self.eval_expr(object, scope)?;
                let index = self.eval_expr(index, scope)?;
                if matches!(object, Value::Null) {
                    return Err(EvalError::read_of_null(&index.to_string()));
                }
                Ok(index_get(&object, &index))
            }
        })
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
        scope: &LocalScope,
    ) -> EvalResult<Value> {
        if op.short_circuits() {
            let lhs = self.eval_expr(lhs, scope)?;
            let take_rhs = match op {
                BinaryOp::And => lhs.is_truthy(),
                BinaryOp::Or => !lhs.is_truthy(),
                BinaryOp::Nullish => matches!(lhs, Value::Null),
                _ => unreachable!("short_circuits covers And/Or/Nullish"),
            };
            return if take_rhs {
                self.eval_expr(rhs, scope)
            } else {
                Ok(lhs)
            };
        }

        let lhs = self.eval_expr(lhs, scope)?;
        let rhs = self.eval_expr(rhs, scope)?;
        match op {
            BinaryOp::Add => match (&lhs, &rhs) {
                (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                (Value::Str(_), _) | (_, Value::Str(_)) => {
                    Ok(Value::str(format!("{lhs}{rhs}")))
                }
                _ => Err(EvalError::bad_operand("+", &lhs)),
            },
            BinaryOp::Sub => numeric(op, &lhs, &rhs, |a, b| a - b),
            BinaryOp::Mul => numeric(op, &lhs, &rhs, |a, b| a * b),
            BinaryOp::Div => numeric(op, &lhs, &rhs, |a, b| a / b),
            BinaryOp::Mod => numeric(op, &lhs, &rhs, |a, b| a % b),
            BinaryOp::Eq => Ok(Value::Bool(lhs == rhs)),
            BinaryOp::Ne => Ok(Value::Bool(lhs != rhs)),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                compare(op, &lhs, &rhs)
            }
            BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish => {
                unreachable!("handled by the short-circuit path")
            }
        }
    }

    fn call(&self, callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
        match callee {
            Value::Builtin(builtin) => {
                match builtin {
                    Builtin::ConsoleLog => self.console.log(&args),
                    Builtin::ConsoleWarn => self.console.warn(&args),
                    Builtin::ConsoleError => self.console.error(&args),
                }
                Ok(Value::Null)
            }
            Value::Function(function) => {
                let frame = Scope::child(&function.closure);
                {
                    let mut frame = frame.borrow_mut();
                    for (i, param) in function.params.iter().enumerate() {
                        let arg = args.get(i).cloned().unwrap_or(Value::Null);
                        frame.define(param.clone(), arg, Mutability::Mutable);
                    }
                }
                match self.exec_stmts(&function.body, &frame)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Null),
                }
            }
            other => Err(EvalError::not_a_function(other)),
        }
    }
}

fn numeric(op: BinaryOp, lhs: &Value, rhs: &Value, apply: fn(f64, f64) -> f64) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => Ok(Value::Num(apply(*a, *b))),
        (Value::Num(_), other) | (other, _) => Err(EvalError::bad_operand(op_symbol(op), other)),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let ordering = match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(EvalError::bad_operand(op_symbol(op), lhs)),
    };
    // NaN compares false on every relation
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let holds = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Le => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::Ge => ordering.is_ge(),
        _ => false,
    };
    Ok(Value::Bool(holds))
}

fn op_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::Nullish => "??",
    }
}

/// Replace an existing entry in place or append, preserving insertion
/// order for rendered output.
fn set_entry(entries: &mut Vec<(String, Value)>, key: &str, value: Value) {
    if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value;
        return;
    }
    entries.push((key.to_owned(), value));
}

fn member_get(object: &Value, property: &str) -> Value {
    match object {
        Value::Object(entries) => entries
            .borrow()
            .iter()
            .find(|(k, _)| k == property)
            .map_or(Value::Null, |(_, v)| v.clone()),
        Value::List(items) if property == "length" => num_from_len(items.borrow().len()),
        Value::Str(s) if property == "length" => num_from_len(s.chars().count()),
        _ => Value::Null,
    }
}

fn index_get(object: &Value, index: &Value) -> Value {
    match (object, index) {
        (Value::List(items), Value::Num(n)) => list_index(*n)
            .and_then(|idx| items.borrow().get(idx).cloned())
            .unwrap_or(Value::Null),
        (Value::Object(_), _) => member_get(object, &index.to_string()),
        (Value::Str(s), Value::Num(n)) => list_index(*n)
            .and_then(|idx| s.chars().nth(idx))
            .map_or(Value::Null, |ch| Value::str(ch.to_string())),
        _ => Value::Null,
    }
}

#[expect(clippy::cast_sign_loss, reason = "sign-checked before casting")]
fn list_index(n: f64) -> Option<usize> {
    if n.fract() == 0.0 && n >= 0.0 && n <= 4_294_967_295.0 {
        Some(n as usize)
    } else {
        None
    }
}

/// Write indices are capped well below the read range so a stray huge
/// index cannot balloon a list.
fn list_index_for_write(n: f64) -> Option<usize> {
    list_index(n).filter(|&idx| idx <= 1 << 24)
}

#[expect(clippy::cast_precision_loss, reason = "lengths stay far below 2^52")]
fn num_from_len(len: usize) -> Value {
    Value::Num(len as f64)
}

#[cfg(test)]
mod tests;
