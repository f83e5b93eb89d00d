//! Surface statements and declarations.

use crate::{Name, Span};

use super::expr::Expr;
use super::ty::TypeExpr;

/// A parsed program: statements in source order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// Statement node with its source span.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Statement variants.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    /// Top-level binding: `name = e;`
    Bind { name: Name, value: Expr },

    /// Bare expression statement: `e;`
    Expr(Expr),

    /// `struct S where x: Int; end`
    Struct(StructDecl),

    /// `trait Show a where show: a -> String; end`
    Trait(TraitDecl),

    /// `impl Show for Int where show = ...; end`
    Impl(ImplDecl),
}

/// A struct declaration: name and ordered fields.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StructDecl {
    pub name: Name,
    pub fields: Vec<FieldSig>,
}

/// A trait declaration: name, the single type parameter, ordered methods.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TraitDecl {
    pub name: Name,
    pub ty_param: Name,
    pub methods: Vec<FieldSig>,
}

/// An impl declaration: trait name, the implementing type, method bodies.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ImplDecl {
    pub trait_name: Name,
    /// Span of the trait name, for bound-related errors.
    pub trait_span: Span,
    pub self_ty: TypeExpr,
    pub methods: Vec<MethodBind>,
}

/// One `label: Type` item of a struct or trait body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FieldSig {
    pub label: Name,
    pub ty: TypeExpr,
    pub span: Span,
}

/// One `label = expr` item of an impl body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MethodBind {
    pub label: Name,
    pub value: Expr,
    pub span: Span,
}
