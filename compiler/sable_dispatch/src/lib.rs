//! Sable Dispatch - Static trait-method dispatch for the Sable interpreter.
//!
//! Between checking and evaluation, every trait-method reference is
//! resolved to a concrete dictionary: a method instantiated at a type
//! with a registered impl becomes a projection out of that impl's
//! dictionary binding, a constrained type abstraction grows one
//! dictionary parameter per bound, and instantiations of constrained
//! values receive the matching dictionary arguments. The evaluator
//! never sees a trait; it only ever applies functions to records.
//!
//! Dispatch relies on the checker having materialized every type
//! argument and echoed binder bounds onto type applications. Statements
//! are rewritten in program order because a top-level rebinding of a
//! method name changes what that name means afterwards.
//!
//! # Main Entry Point
//!
//! - [`Dispatcher`]: per-statement rewriting with program-level state

mod rewrite;
mod scope;
mod stack;

pub use rewrite::Dispatcher;
