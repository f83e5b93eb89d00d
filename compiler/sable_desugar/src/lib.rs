//! Declaration desugaring and surface-to-core lowering for Sable.
//!
//! This stage walks the parsed statement stream once, in order. Ordinary
//! statements lower structurally into core terms; `struct`, `trait`, and
//! `impl` declarations are rewritten away, leaving behind the signature
//! context Δ, constructor and dictionary bindings, and a queue of impls
//! for the Σ registry to validate.
//!
//! A statement that fails to lower is reported and dropped; later
//! statements still lower against the signatures accumulated so far.

mod decl;
mod lower;
mod signatures;
mod stack;

pub use signatures::{SignatureTable, StructLayout, TraitSig};

use sable_diagnostic::Diagnostic;
use sable_ir::{Name, Program, Span, Stmt, StmtKind, StringInterner};
use sable_types::{CoreStmt, CoreStmtKind, Type};

/// An impl awaiting Σ registration.
///
/// The dictionary value itself lives in the emitted `__F_inst_k` binding;
/// this record carries what the registry needs to key and validate the
/// impl.
#[derive(Clone, Debug)]
pub struct PendingImpl {
    pub trait_name: Name,
    /// Span of the trait name in the impl header.
    pub trait_span: Span,
    /// The concrete type the impl targets.
    pub self_ty: Type,
    /// The binding holding the dictionary value.
    pub binding: Name,
    /// Provided method labels with their spans, in declaration order.
    pub provided: Vec<(Name, Span)>,
    /// Span of the whole declaration.
    pub span: Span,
}

/// Everything the desugarer hands to the rest of the pipeline.
#[derive(Debug, Default)]
pub struct DesugarResult {
    /// Core statements in source order, declarations rewritten away.
    pub stmts: Vec<CoreStmt>,
    /// The signature context Δ.
    pub signatures: SignatureTable,
    /// Impls queued for Σ registration, in declaration order.
    pub pending_impls: Vec<PendingImpl>,
    /// One diagnostic per statement that failed to lower.
    pub diagnostics: Vec<Diagnostic>,
}

impl DesugarResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Desugar a parsed program.
pub fn desugar(program: &Program, interner: &StringInterner) -> DesugarResult {
    let mut desugarer = Desugarer::new(interner);
    for stmt in &program.stmts {
        desugarer.desugar_stmt(stmt);
    }
    tracing::debug!(
        statements = desugarer.stmts.len(),
        structs = desugarer.signatures.struct_count(),
        traits = desugarer.signatures.trait_count(),
        impls = desugarer.pending_impls.len(),
        errors = desugarer.diagnostics.len(),
        "desugared program"
    );
    DesugarResult {
        stmts: desugarer.stmts,
        signatures: desugarer.signatures,
        pending_impls: desugarer.pending_impls,
        diagnostics: desugarer.diagnostics,
    }
}

/// State for one desugaring run.
pub(crate) struct Desugarer<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) signatures: SignatureTable,
    pub(crate) stmts: Vec<CoreStmt>,
    pub(crate) pending_impls: Vec<PendingImpl>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Type variables bound by enclosing type binders, innermost last.
    pub(crate) bound_vars: Vec<Name>,
    /// Impls seen so far, for `__F_inst_k` numbering.
    pub(crate) impl_count: u32,
    // Pre-interned builtin type names
    pub(crate) ty_int: Name,
    pub(crate) ty_bool: Name,
    pub(crate) ty_string: Name,
}

impl<'a> Desugarer<'a> {
    fn new(interner: &'a StringInterner) -> Self {
        Desugarer {
            interner,
            signatures: SignatureTable::new(),
            stmts: Vec::new(),
            pending_impls: Vec::new(),
            diagnostics: Vec::new(),
            bound_vars: Vec::new(),
            impl_count: 0,
            ty_int: interner.intern("Int"),
            ty_bool: interner.intern("Bool"),
            ty_string: interner.intern("String"),
        }
    }

    fn desugar_stmt(&mut self, stmt: &Stmt) {
        let result = match &stmt.kind {
            StmtKind::Bind { name, value } => self.desugar_bind(*name, value, stmt.span),
            StmtKind::Expr(expr) => self.desugar_expr_stmt(expr, stmt.span),
            StmtKind::Struct(decl) => self.desugar_struct(decl, stmt.span),
            StmtKind::Trait(decl) => self.desugar_trait(decl, stmt.span),
            StmtKind::Impl(decl) => self.desugar_impl(decl, stmt.span),
        };
        if let Err(diagnostic) = result {
            self.diagnostics.push(diagnostic);
        }
    }

    fn desugar_bind(
        &mut self,
        name: Name,
        value: &sable_ir::Expr,
        span: Span,
    ) -> Result<(), Diagnostic> {
        let value = self.lower_expr(value)?;
        self.stmts
            .push(CoreStmt::new(CoreStmtKind::Bind { name, value }, span));
        Ok(())
    }

    fn desugar_expr_stmt(
        &mut self,
        expr: &sable_ir::Expr,
        span: Span,
    ) -> Result<(), Diagnostic> {
        let term = self.lower_expr(expr)?;
        self.stmts
            .push(CoreStmt::new(CoreStmtKind::Expr(term), span));
        Ok(())
    }
}
