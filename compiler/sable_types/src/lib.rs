//! Sable type system and core term model.
//!
//! This crate holds the semantic objects shared by the middle of the
//! pipeline: the resolved [`Type`] language, the core [`Term`] model the
//! desugarer produces, the typing environment, capture-avoiding type
//! substitution, and the restricted single-metavariable unifier used for
//! type-argument inference.

mod env;
pub mod subst;
mod term;
mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use term::{Builtin, CoreStmt, CoreStmtKind, Term, TermKind};
pub use ty::Type;
pub use unify::{unify_single, UnifyError};
