//! Sable Eval - Call-by-value evaluator for the Sable interpreter.
//!
//! Runs dispatched core statements by substitution: β-reduction is
//! capture-avoiding substitution of the argument for the parameter, types
//! are erased at type applications, and the trace builtins perform their
//! I/O through a pluggable handler. Each statement reduces to a value the
//! driver renders alongside its checked type.
//!
//! # Main Entry Points
//!
//! - [`Evaluator`]: evaluates statements against the global environment
//! - [`render_value`]: formats a reduced value for the trace
//! - [`stdio_handler`] / [`buffer_handler`]: I/O wiring for the terminal
//!   and for tests
//!
//! # Module Organization
//!
//! - `interp`: the reduction rules
//! - `builtins`: the builtin operations
//! - `subst`: capture-avoiding term substitution
//! - `env`: the global environment
//! - `io`: the I/O handler
//! - `display`: value rendering
//! - `error`: runtime error types

mod builtins;
mod display;
mod env;
mod error;
mod interp;
mod io;
mod stack;
mod subst;

pub use display::render_value;
pub use error::{EvalResult, RuntimeError, RuntimeErrorKind};
pub use interp::{EvaluatedStmt, Evaluator};
pub use io::{buffer_handler, stdio_handler, BufferIo, IoHandlerImpl, SharedIo, StdIo};
