//! Surface type syntax.
//!
//! These are the types as written in the source. Name resolution happens
//! later: `Named` may turn out to be a builtin, a struct, a trait, or a
//! `forall`-bound variable, and the lowering stage decides which.

use crate::{Name, Span};

/// Parsed type with its source span.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeExprKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }
}

/// Parsed type variants.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeExprKind {
    /// A bare name: `Int`, `Point`, `a`
    Named(Name),

    /// List type: `[Int]`
    List(Box<TypeExpr>),

    /// Record type: `{x: Int, y: Int}`
    Record(Vec<FieldTy>),

    /// Function type: `Int -> Bool` (right-associative)
    Arrow {
        param: Box<TypeExpr>,
        ret: Box<TypeExpr>,
    },

    /// Type-level application: `Show Int`
    Apply {
        func: Box<TypeExpr>,
        arg: Box<TypeExpr>,
    },

    /// Universal type: `forall a. T` or `forall a impl Show+Eq. T`
    Forall {
        param: Name,
        bounds: Vec<Name>,
        body: Box<TypeExpr>,
    },
}

/// One `label: Type` entry of a record type.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FieldTy {
    pub label: Name,
    pub ty: TypeExpr,
    pub span: Span,
}
