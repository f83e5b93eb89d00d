//! Sable Typeck - Type checker for the Sable interpreter.
//!
//! This crate provides the impl registry and the bidirectional checker.
//! Registration happens first: every desugared impl is keyed by
//! `(trait, type)` and validated against its trait's method set, so the
//! checker and the dispatcher can answer "does `T` implement `F`?" for
//! the whole program. Checking then walks the desugared statements in
//! order, threading the typing environment through `x = e;` bindings and
//! rewriting each term so that omitted type arguments are materialized
//! as explicit applications.
//!
//! # Main Entry Points
//!
//! - [`ImplRegistry`]: Σ-style impl table built from desugared impls
//! - [`Checker`]: per-statement inference over a growing environment
//!
//! # Module Organization
//!
//! - `builtins`: types of the built-in I/O and list operations
//! - `check`: statement checking and expression inference
//! - `registry`: impl registration, uniqueness, exhaustiveness

mod builtins;
mod check;
mod registry;
mod stack;

pub use builtins::builtin_type;
pub use check::{CheckedStmt, Checker};
pub use registry::{ImplEntry, ImplRegistry};
