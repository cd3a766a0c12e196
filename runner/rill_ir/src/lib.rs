//! Rill IR - shared types for the Rill code runner.
//!
//! This crate holds the types every pipeline stage speaks:
//!
//! - [`Span`]: compact byte-offset source locations
//! - [`LanguageTag`]: the classifier's verdict (plain rill or typed trill)
//! - the plain-dialect AST ([`Stmt`], [`Expr`] and operator enums)
//!
//! It has no dependencies so that leaf crates (lexer, classifier, console)
//! can share types without pulling in the rest of the pipeline.

mod ast;
mod language;
mod span;

pub use ast::{AssignTarget, BinaryOp, Expr, Stmt, UnaryOp};
pub use language::LanguageTag;
pub use span::Span;
