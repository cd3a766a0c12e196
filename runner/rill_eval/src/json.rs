//! Structural serialization of composite values for console output.
//!
//! Two-space indented, insertion-ordered, with script-host
//! serialization rules: non-finite numbers become `null`, function
//! entries are omitted from objects but hold their place as `null` in
//! lists, and a self-referencing value refuses to serialize.

use std::fmt::Write as _;
use std::rc::Rc;

use crate::value::{fmt_num, Value};

/// A value that contains itself cannot be serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircularRef;

pub fn to_pretty(value: &Value) -> Result<String, CircularRef> {
    let mut out = String::new();
    let mut seen: Vec<*const ()> = Vec::new();
    write_value(&mut out, value, 0, &mut seen)?;
    Ok(out)
}

fn write_value(
    out: &mut String,
    value: &Value,
    indent: usize,
    seen: &mut Vec<*const ()>,
) -> Result<(), CircularRef> {
    match value {
        Value::Null | Value::Function(_) | Value::Builtin(_) => out.push_str("null"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Num(n) => {
            if n.is_finite() {
                out.push_str(&fmt_num(*n));
            } else {
                out.push_str("null");
            }
        }
        Value::Str(s) => write_string(out, s),
        Value::List(items) => {
            let ptr = Rc::as_ptr(items).cast::<()>();
            enter(seen, ptr)?;
            let items = items.borrow();
            if items.is_empty() {
                out.push_str("[]");
            } else {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    newline(out, indent + 1);
                    write_value(out, item, indent + 1, seen)?;
                }
                newline(out, indent);
                out.push(']');
            }
            seen.pop();
        }
        Value::Object(entries) => {
            let ptr = Rc::as_ptr(entries).cast::<()>();
            enter(seen, ptr)?;
            let entries = entries.borrow();
            let mut first = true;
            let mut body = String::new();
            for (key, entry) in entries.iter() {
                if matches!(entry, Value::Function(_) | Value::Builtin(_)) {
                    continue;
                }
                if !first {
                    body.push(',');
                }
                first = false;
                newline(&mut body, indent + 1);
                write_string(&mut body, key);
                body.push_str(": ");
                write_value(&mut body, entry, indent + 1, seen)?;
            }
            if first {
                out.push_str("{}");
            } else {
                out.push('{');
                out.push_str(&body);
                newline(out, indent);
                out.push('}');
            }
            seen.pop();
        }
    }
    Ok(())
}

fn enter(seen: &mut Vec<*const ()>, ptr: *const ()) -> Result<(), CircularRef> {
    if seen.contains(&ptr) {
        return Err(CircularRef);
    }
    seen.push(ptr);
    Ok(())
}

fn newline(out: &mut String, indent: usize) {
    out.push('\n');
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
