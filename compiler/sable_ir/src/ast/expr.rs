//! Surface expression nodes.
//!
//! Children are boxed; the tree is built once by the parser and then
//! lowered, so sharing and arena allocation buy nothing here.

use crate::{Name, Span};

use super::operators::{BinaryOp, UnaryOp};
use super::ty::TypeExpr;

/// Expression node with its source span.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    // ===== Literals =====
    /// Integer literal: `42`
    Int(i64),

    /// Boolean literal: `true`, `false`
    Bool(bool),

    /// String literal (contents interned): `"hi"`, `'hi'`
    Str(Name),

    // ===== References =====
    /// Variable reference
    Ident(Name),

    // ===== Aggregates =====
    /// List literal: `[1, 2, 3]`
    List(Vec<Expr>),

    /// Record literal: `{x = 1, y = 2}`
    Record(Vec<FieldInit>),

    /// Field projection: `r.x`
    Field { base: Box<Expr>, label: Name },

    // ===== Abstraction and application =====
    /// Term lambda: `\x: Int. x + 1`
    Lambda {
        param: Name,
        param_ty: Box<TypeExpr>,
        body: Box<Expr>,
    },

    /// Type abstraction: `\a. e` or `\a impl Show+Eq. e`
    TyLambda {
        param: Name,
        bounds: Vec<Name>,
        body: Box<Expr>,
    },

    /// Application by juxtaposition: `f x`
    Apply { func: Box<Expr>, arg: Box<Expr> },

    /// Type application: `f @Int`
    TyApply {
        func: Box<Expr>,
        arg: Box<TypeExpr>,
    },

    /// Type annotation: `e : T`
    Annot {
        expr: Box<Expr>,
        ty: Box<TypeExpr>,
    },

    // ===== Control and operators =====
    /// Conditional: `if c then a else b` (else is mandatory)
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// Binary operation: `a + b`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Unary operation: `-x`, `not b`
    Unary { op: UnaryOp, operand: Box<Expr> },
}

/// One `label = value` entry of a record literal.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FieldInit {
    pub label: Name,
    pub value: Expr,
    pub span: Span,
}
