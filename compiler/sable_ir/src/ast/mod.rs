//! Surface AST produced by the parser.

mod expr;
mod operators;
mod stmt;
mod ty;

pub use expr::{Expr, ExprKind, FieldInit};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{
    FieldSig, ImplDecl, MethodBind, Program, Stmt, StmtKind, StructDecl, TraitDecl,
};
pub use ty::{FieldTy, TypeExpr, TypeExprKind};
