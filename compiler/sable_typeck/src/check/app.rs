//! Inference for applications and type applications.
//!
//! The interesting case is an application whose callee is polymorphic with
//! no explicit type argument. The single binder is treated as a
//! metavariable and solved against the argument's inferred type by the
//! restricted unifier; on success the checker materializes the `@S`
//! explicitly and the application proceeds as if the program had written
//! it. Everything downstream therefore sees fully applied binders.

use crate::check::Checker;
use sable_diagnostic::{unsatisfied_bound, Diagnostic, ErrorCode};
use sable_ir::{Name, Span};
use sable_types::{subst, unify_single, Term, TermKind, Type, UnifyError};

impl Checker<'_> {
    pub(crate) fn infer_app(
        &mut self,
        func: &Term,
        arg: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (func, func_ty) = self.infer(func)?;
        let (arg, arg_ty) = self.infer(arg)?;

        match &func_ty {
            Type::Arrow { param, ret } => {
                self.expect_ty(param, &arg_ty, arg.span)?;
                let ret = ret.as_ref().clone();
                Ok((Self::app(func, arg, span), ret))
            }
            Type::Forall { var, bounds, body } => {
                // Omitted type argument; solve the binder from the
                // argument's type
                let Some((param, _)) = body.as_arrow() else {
                    return Err(self.not_a_function(&func_ty, func.span));
                };
                let solved = unify_single(*var, param, &arg_ty)
                    .map_err(|error| self.unification_failure(&error, *var, span))?;

                let method = self.method_reference(&func);
                self.check_bounds(bounds, &solved, span, method)?;

                let instantiated = subst::substitute(body, *var, &solved, self.interner);
                let func_span = func.span;
                let func = Term::new(
                    TermKind::TyApp {
                        func: Box::new(func),
                        arg: solved,
                        bounds: bounds.clone(),
                    },
                    func_span,
                );

                // Re-check the application at the instantiated type
                let Type::Arrow { param, ret } = &instantiated else {
                    return Err(self.not_a_function(&instantiated, func.span));
                };
                self.expect_ty(param, &arg_ty, arg.span)?;
                let ret = ret.as_ref().clone();
                Ok((Self::app(func, arg, span), ret))
            }
            _ => Err(self.not_a_function(&func_ty, func.span)),
        }
    }

    pub(crate) fn infer_ty_app(
        &mut self,
        func: &Term,
        arg: &Type,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (func, func_ty) = self.infer(func)?;

        let Type::Forall { var, bounds, body } = &func_ty else {
            return Err(Diagnostic::error(ErrorCode::E3001)
                .with_message(format!(
                    "expected a `forall` type, found `{}`",
                    func_ty.display(self.interner)
                ))
                .with_label(func.span, "cannot take a type argument"));
        };

        let method = self.method_reference(&func);
        self.check_bounds(bounds, arg, span, method)?;

        let result_ty = subst::substitute(body, *var, arg, self.interner);
        Ok((
            Term::new(
                TermKind::TyApp {
                    func: Box::new(func),
                    arg: arg.clone(),
                    bounds: bounds.clone(),
                },
                span,
            ),
            result_ty,
        ))
    }

    /// Require every bound on the instantiated binder to hold at `ty`.
    fn check_bounds(
        &self,
        bounds: &[Name],
        ty: &Type,
        span: Span,
        method: Option<Name>,
    ) -> Result<(), Diagnostic> {
        for &bound in bounds {
            if self.bound_holds(bound, ty) {
                continue;
            }
            // Name the method when the failing callee was a bare
            // reference to one of this trait's methods
            let method_str = method
                .filter(|m| self.signatures.trait_of_method(*m) == Some(bound))
                .map(|m| self.interner.lookup(m));
            return Err(unsatisfied_bound(
                span,
                &ty.display(self.interner),
                self.interner.lookup(bound),
                method_str,
            ));
        }
        Ok(())
    }

    fn method_reference(&self, func: &Term) -> Option<Name> {
        match &func.kind {
            TermKind::Var(name) if self.signatures.trait_of_method(*name).is_some() => {
                Some(*name)
            }
            _ => None,
        }
    }

    fn app(func: Term, arg: Term, span: Span) -> Term {
        Term::new(
            TermKind::App {
                func: Box::new(func),
                arg: Box::new(arg),
            },
            span,
        )
    }

    fn not_a_function(&self, found: &Type, span: Span) -> Diagnostic {
        Diagnostic::error(ErrorCode::E3001)
            .with_message(format!(
                "expected a function, found `{}`",
                found.display(self.interner)
            ))
            .with_label(span, "cannot apply this")
    }

    fn unification_failure(&self, error: &UnifyError, var: Name, span: Span) -> Diagnostic {
        let var_str = self.interner.lookup(var);
        let diagnostic = Diagnostic::error(ErrorCode::E3004);
        match error {
            UnifyError::NoOccurrence => diagnostic
                .with_message(format!("cannot infer the type argument `{var_str}`"))
                .with_label(span, "the argument type does not determine it")
                .with_note("pass the type argument explicitly with `@`"),
            UnifyError::Conflict { first, second } => diagnostic
                .with_message(format!(
                    "conflicting requirements for `{var_str}`: `{}` and `{}`",
                    first.display(self.interner),
                    second.display(self.interner)
                ))
                .with_label(span, "inferred two different type arguments"),
            UnifyError::Mismatch { pattern, actual } => diagnostic
                .with_message(format!(
                    "cannot match `{}` against `{}`",
                    pattern.display(self.interner),
                    actual.display(self.interner)
                ))
                .with_label(span, "argument shape does not fit the parameter"),
        }
    }
}
