//! AST for the plain rill dialect.
//!
//! Only plain-dialect constructs appear here: the transpiler erases trill
//! type syntax before anything is parsed, so the parser and evaluator
//! never see annotations, interfaces, or the rest of the superset.

use crate::Span;

/// Binary operators, in source notation.
///
/// `==`/`===` and `!=`/`!==` collapse to [`BinaryOp::Eq`]/[`BinaryOp::Ne`]:
/// rill values have no coercing equality, so the loose and strict forms
/// agree.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `&&` - short-circuits on a falsy left operand.
    And,
    /// `||` - short-circuits on a truthy left operand.
    Or,
    /// `??` - short-circuits on a non-null left operand.
    Nullish,
}

impl BinaryOp {
    /// Whether the right operand is conditionally evaluated.
    pub fn short_circuits(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Nullish)
    }
}

/// Unary prefix operators.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnaryOp {
    /// `!` - logical negation on truthiness.
    Not,
    /// `-` - numeric negation.
    Neg,
}

/// Expressions.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Null(Span),
    Bool(bool, Span),
    Num(f64, Span),
    Str(String, Span),
    Ident(String, Span),
    List(Vec<Expr>, Span),
    /// Object literal. Entries keep source order; the evaluator and the
    /// console serializer both preserve it.
    Object(Vec<(String, Expr)>, Span),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    /// `cond ? then : else`
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
    /// `object.property` or `object?.property`.
    Member {
        object: Box<Expr>,
        property: String,
        /// `?.` - yields null instead of erroring when the object is null.
        optional: bool,
        span: Span,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Null(span)
            | Expr::Bool(_, span)
            | Expr::Num(_, span)
            | Expr::Str(_, span)
            | Expr::Ident(_, span)
            | Expr::List(_, span)
            | Expr::Object(_, span)
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Call { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. } => *span,
        }
    }
}

/// Assignment targets: the subset of expressions that name a storage
/// location.
#[derive(Clone, PartialEq, Debug)]
pub enum AssignTarget {
    Name(String),
    Member { object: Expr, property: String },
    Index { object: Expr, index: Expr },
}

/// Statements.
#[derive(Clone, PartialEq, Debug)]
pub enum Stmt {
    /// `let x = ...` / `const x = ...`
    Let {
        name: String,
        /// `let` bindings can be reassigned, `const` bindings cannot.
        mutable: bool,
        init: Option<Expr>,
        span: Span,
    },
    /// `target = value`
    Assign {
        target: AssignTarget,
        value: Expr,
        span: Span,
    },
    /// `function name(params) { body }`
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        span: Span,
    },
    Return {
        value: Option<Expr>,
        span: Span,
    },
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
        span: Span,
    },
    Throw {
        value: Expr,
        span: Span,
    },
    Block(Vec<Stmt>),
    Expr(Expr),
}
