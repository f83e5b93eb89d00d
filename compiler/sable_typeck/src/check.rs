//! Bidirectional type checking over core terms.
//!
//! The checker walks each statement once and rebuilds it: every type
//! application in the output carries the bound set of the binder it
//! instantiates, and applications that omitted a type argument get an
//! explicit one materialized from the restricted unifier. The dispatcher
//! downstream never reconstructs a type.
//!
//! Checking a statement is all-or-nothing. A failure reports one
//! diagnostic, leaves Γ exactly as it was, and the caller moves on to the
//! next statement.

mod app;
mod op;
mod term;

use crate::builtins;
use crate::registry::ImplRegistry;
use crate::stack::ensure_sufficient_stack;
use sable_desugar::SignatureTable;
use sable_diagnostic::{type_mismatch, Diagnostic};
use sable_ir::{Name, Span, StringInterner};
use sable_types::{CoreStmt, CoreStmtKind, Term, TermKind, Type, TypeEnv};

/// A statement that passed checking: the rewritten statement plus the type
/// to report for it.
#[derive(Clone, Debug)]
pub struct CheckedStmt {
    pub stmt: CoreStmt,
    pub ty: Type,
}

/// Checker state across one program.
///
/// Γ starts from the builtins and the trait-method schemes (Δ is complete
/// before checking begins, so schemes are visible program-wide, like Σ).
/// Top-level bindings then accumulate in statement order and shadow.
pub struct Checker<'a> {
    interner: &'a StringInterner,
    signatures: &'a SignatureTable,
    registry: &'a ImplRegistry,
    /// Current scope; the outermost level is the global Γ.
    env: TypeEnv,
    /// Bounds assumed by enclosing type binders, innermost last.
    assumptions: Vec<(Name, Vec<Name>)>,
}

impl<'a> Checker<'a> {
    pub fn new(
        interner: &'a StringInterner,
        signatures: &'a SignatureTable,
        registry: &'a ImplRegistry,
    ) -> Self {
        let mut env = builtins::initial_env(interner);
        for sig in signatures.iter_traits() {
            for (method, _) in &sig.methods {
                // A later trait redeclaring a method name owns it; skip
                // the stale entry so seeding is order-independent
                if signatures.trait_of_method(*method) != Some(sig.name) {
                    continue;
                }
                if let Some(scheme) = sig.method_scheme(*method) {
                    env.bind(*method, scheme);
                }
            }
        }
        Checker {
            interner,
            signatures,
            registry,
            env,
            assumptions: Vec::new(),
        }
    }

    /// Check one statement, extending Γ on success.
    pub fn check_stmt(&mut self, stmt: &CoreStmt) -> Result<CheckedStmt, Diagnostic> {
        match &stmt.kind {
            CoreStmtKind::Bind { name, value } => {
                let (value, ty) = self.infer(value)?;
                self.env.bind(*name, ty.clone());
                tracing::trace!(
                    name = self.interner.lookup(*name),
                    ty = %ty.display(self.interner),
                    "checked binding"
                );
                Ok(CheckedStmt {
                    stmt: CoreStmt::new(CoreStmtKind::Bind { name: *name, value }, stmt.span),
                    ty,
                })
            }
            CoreStmtKind::Expr(term) => {
                let (term, ty) = self.infer(term)?;
                tracing::trace!(ty = %ty.display(self.interner), "checked expression");
                Ok(CheckedStmt {
                    stmt: CoreStmt::new(CoreStmtKind::Expr(term), stmt.span),
                    ty,
                })
            }
        }
    }

    /// Infer a term's type, rebuilding the term as it goes.
    pub(crate) fn infer(&mut self, term: &Term) -> Result<(Term, Type), Diagnostic> {
        ensure_sufficient_stack(|| self.infer_inner(term))
    }

    fn infer_inner(&mut self, term: &Term) -> Result<(Term, Type), Diagnostic> {
        match &term.kind {
            TermKind::Int(_) => Ok((term.clone(), Type::Int)),
            TermKind::Bool(_) => Ok((term.clone(), Type::Bool)),
            TermKind::Str(_) => Ok((term.clone(), Type::Str)),
            TermKind::Builtin(builtin) => Ok((
                term.clone(),
                builtins::builtin_type(*builtin, self.interner),
            )),
            TermKind::Var(name) => self.infer_var(*name, term.span),
            TermKind::Lam {
                param,
                param_ty,
                body,
            } => self.infer_lambda(*param, param_ty, body, term.span),
            TermKind::TyLam {
                param,
                bounds,
                body,
            } => self.infer_ty_lambda(*param, bounds, body, term.span),
            TermKind::App { func, arg } => self.infer_app(func, arg, term.span),
            TermKind::TyApp { func, arg, .. } => self.infer_ty_app(func, arg, term.span),
            TermKind::Annot { term: inner, ty } => self.infer_annot(inner, ty, term.span),
            TermKind::List(elems) => self.infer_list(elems, term.span),
            TermKind::Record(fields) => self.infer_record(fields, term.span),
            TermKind::Proj { base, label } => self.infer_proj(base, *label, term.span),
            TermKind::If {
                cond,
                then_branch,
                else_branch,
            } => self.infer_if(cond, then_branch, else_branch, term.span),
            TermKind::Binary { op, left, right } => {
                self.infer_binary(*op, left, right, term.span)
            }
            TermKind::Unary { op, operand } => self.infer_unary(*op, operand, term.span),
            // Produced by evaluation only
            TermKind::Error => Err(sable_diagnostic::internal_error(
                term.span,
                "error value reached the checker",
            )),
        }
    }

    /// Require `actual` to equal `expected` exactly.
    pub(crate) fn expect_ty(
        &self,
        expected: &Type,
        actual: &Type,
        span: Span,
    ) -> Result<(), Diagnostic> {
        if actual == expected {
            Ok(())
        } else {
            Err(type_mismatch(
                span,
                &expected.display(self.interner),
                &actual.display(self.interner),
            ))
        }
    }

    /// The bound holds if Σ has an impl, or the type is a variable whose
    /// enclosing abstraction assumed the bound.
    pub(crate) fn bound_holds(&self, bound: Name, ty: &Type) -> bool {
        match ty {
            Type::Var(var) => self
                .assumptions
                .iter()
                .rev()
                .find(|(name, _)| name == var)
                .is_some_and(|(_, assumed)| assumed.contains(&bound)),
            _ => self.registry.implements(bound, ty),
        }
    }
}
