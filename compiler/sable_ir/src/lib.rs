//! Sable IR - source representation types.
//!
//! This crate contains the data structures shared by every front-end
//! stage of the Sable interpreter:
//! - `Span` for byte ranges into the source text
//! - `Name` for interned identifiers
//! - `StringInterner` / `SharedInterner` for identifier storage
//! - the surface AST (`Program`, `Stmt`, `Expr`, `TypeExpr`)
//!
//! The core term and type model that the desugarer produces lives in
//! `sable_types`; this crate stays at the syntax level.

pub mod ast;
mod interner;
mod name;
mod span;

pub use ast::{
    BinaryOp, Expr, ExprKind, FieldInit, FieldSig, FieldTy, ImplDecl, MethodBind, Program,
    Stmt, StmtKind, StructDecl, TraitDecl, TypeExpr, TypeExprKind, UnaryOp,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
