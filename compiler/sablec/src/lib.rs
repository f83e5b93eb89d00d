//! Sable CLI - command-line driver for the Sable interpreter.
//!
//! The `sable` binary wires the pipeline crates together: lex, parse,
//! desugar, Σ registration, then per statement check, dispatch, and
//! evaluate. Subcommands:
//!
//! - `sable run <file.sb>` evaluates a program and prints each
//!   statement's value; `--trace` adds the inferred type above each value
//! - `sable check <file.sb>` type-checks and prints each statement's type
//! - `sable parse <file.sb>` and `sable lex <file.sb>` dump parser and
//!   lexer output for debugging
//!
//! User-facing failures are rendered diagnostics on stderr; the process
//! exits 1 when any were produced. Command functions return exit codes
//! and only `main` calls `std::process::exit`.

use std::sync::Once;

pub mod cli;
pub mod pipeline;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with env-filter support.
///
/// Reads `RUST_LOG` for stage-level debug output and stays silent when
/// the variable is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
