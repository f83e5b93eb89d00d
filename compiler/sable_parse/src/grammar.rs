//! Grammar productions, split by syntactic category.
//!
//! Each submodule extends [`crate::Parser`] with the productions for one
//! category: statements and declarations, expressions, and types.

mod expr;
mod stmt;
mod ty;
