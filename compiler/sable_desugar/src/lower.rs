//! Surface-to-core lowering.
//!
//! Expressions become [`sable_types::Term`]s and parsed types become
//! resolved [`sable_types::Type`]s. Named types are resolved against the
//! signatures built so far, so everything downstream of this pass is
//! purely structural.

mod expr;
mod ty;
