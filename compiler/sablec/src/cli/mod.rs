//! Command handlers for the `sable` binary.
//!
//! Each submodule implements one subcommand as a `*_source` function
//! returning a report (the testable layer) and a `*_file` function that
//! reads the file, prints the report, and returns the exit code. Shared
//! plumbing lives here in the module root.

mod check;
mod lex;
mod parse;
mod run;

pub use check::{check_file, check_source, CheckReport};
pub use lex::{lex_file, lex_source};
pub use parse::{parse_file, parse_source};
pub use run::{run_file, run_source, RunReport};

use sable_eval::render_value;
use sable_ir::{Name, StringInterner};
use sable_types::{Term, Type};
use thiserror::Error;

/// Driver plumbing failures, before the pipeline sees any source.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' is not valid UTF-8")]
    InvalidData { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a source file, classifying the common failure modes.
pub fn read_file(path: &str) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.to_string();
        match e.kind() {
            std::io::ErrorKind::NotFound => DriverError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => DriverError::PermissionDenied { path },
            std::io::ErrorKind::InvalidData => DriverError::InvalidData { path },
            _ => DriverError::Io { path, source: e },
        }
    })
}

/// Format a statement's reported type: `name: type` for bindings, the
/// bare type for expression statements.
pub(crate) fn type_line(name: Option<Name>, ty: &Type, interner: &StringInterner) -> String {
    match name {
        Some(name) => format!("{}: {}", interner.lookup(name), ty.display(interner)),
        None => ty.display(interner),
    }
}

/// Format a statement's reported value: `name = value` for bindings, the
/// bare value for expression statements.
pub(crate) fn value_line(name: Option<Name>, value: &Term, interner: &StringInterner) -> String {
    match name {
        Some(name) => format!(
            "{} = {}",
            interner.lookup(name),
            render_value(value, interner)
        ),
        None => render_value(value, interner),
    }
}

/// Print trace lines to stdout and diagnostics to stderr.
///
/// Returns the exit code: 1 when any diagnostics were reported.
pub(crate) fn print_report(lines: &[String], errors: &[String]) -> i32 {
    for line in lines {
        println!("{line}");
    }
    for error in errors {
        eprintln!("{error}");
    }
    i32::from(!errors.is_empty())
}

/// Print usage to stderr.
pub fn print_usage() {
    eprintln!("Sable interpreter");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  sable run <file.sb> [--trace]   Evaluate a program (--trace adds types)");
    eprintln!("  sable check <file.sb>           Type-check without evaluating");
    eprintln!("  sable parse <file.sb>           Dump the parsed statements");
    eprintln!("  sable lex <file.sb>             Dump the token stream");
    eprintln!("  sable version                   Print the version");
    eprintln!("  sable help                      Show this message");
    eprintln!();
    eprintln!("  sable <file.sb>                 Shorthand for `sable run`");
}
