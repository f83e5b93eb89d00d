//! The per-program half of the driver: source text to checkable statements.
//!
//! [`load`] runs the stages that happen once per program (lex, parse,
//! desugar, Σ registration) and returns everything the per-statement
//! stages need. Checking, dispatch, and evaluation stay in the command
//! layer, so `run` and `check` share this half and differ only in what
//! they do with each statement.

use rustc_hash::FxHashSet;
use sable_desugar::SignatureTable;
use sable_diagnostic::Diagnostic;
use sable_ir::{Name, StringInterner};
use sable_typeck::ImplRegistry;
use sable_types::CoreStmt;

/// A program that made it through lexing, parsing, desugaring, and Σ
/// registration.
#[derive(Debug)]
pub struct LoadedProgram {
    pub interner: StringInterner,
    /// Core statements in source order, declarations rewritten away.
    pub stmts: Vec<CoreStmt>,
    /// The signature context Δ.
    pub signatures: SignatureTable,
    /// The Σ registry, complete before any statement is checked.
    pub registry: ImplRegistry,
    /// Dictionary bindings whose impl failed registration. The command
    /// layer skips these statements instead of piling follow-on errors
    /// onto an impl that was already reported.
    pub rejected: FxHashSet<Name>,
    /// Desugar and registration diagnostics. The program is still
    /// runnable; the statements behind these were dropped or rejected.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the per-program stages over one source text.
///
/// Lex and parse failures abort with their diagnostics: there is no
/// statement stream to work with. Desugar and registration failures do
/// not abort. The desugarer already dropped the statements that failed
/// to lower, and a rejected impl only removes one Σ entry, so the rest
/// of the program still loads and the diagnostics come back on the
/// [`LoadedProgram`] for the caller to report.
pub fn load(source: &str) -> Result<LoadedProgram, Vec<Diagnostic>> {
    let interner = StringInterner::new();
    let tokens = sable_lexer::lex(source, &interner).map_err(|diag| vec![diag])?;
    let parsed = sable_parse::parse(&tokens, &interner);
    if !parsed.errors.is_empty() {
        return Err(parsed.errors);
    }

    let desugared = sable_desugar::desugar(&parsed.program, &interner);
    let mut diagnostics = desugared.diagnostics;

    let mut registry = ImplRegistry::new();
    let mut rejected = FxHashSet::default();
    for pending in &desugared.pending_impls {
        if let Err(diag) = registry.register(pending, &desugared.signatures, &interner) {
            rejected.insert(pending.binding);
            diagnostics.push(diag);
        }
    }

    tracing::debug!(
        statements = desugared.stmts.len(),
        impls = desugared.pending_impls.len(),
        rejected = rejected.len(),
        diagnostics = diagnostics.len(),
        "loaded program"
    );

    Ok(LoadedProgram {
        interner,
        stmts: desugared.stmts,
        signatures: desugared.signatures,
        registry,
        rejected,
        diagnostics,
    })
}
