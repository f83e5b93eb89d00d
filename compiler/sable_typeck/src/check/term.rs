//! Inference for variables, binders, aggregates, and control flow.

use crate::check::Checker;
use sable_diagnostic::{unbound_variable, Diagnostic, ErrorCode};
use sable_ir::{Name, Span};
use sable_types::{Term, TermKind, Type};

impl Checker<'_> {
    pub(crate) fn infer_var(
        &mut self,
        name: Name,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        match self.env.lookup(name) {
            Some(ty) => Ok((Term::new(TermKind::Var(name), span), ty.clone())),
            None => Err(unbound_variable(span, self.interner.lookup(name))),
        }
    }

    pub(crate) fn infer_lambda(
        &mut self,
        param: Name,
        param_ty: &Type,
        body: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let mut lambda_env = self.env.child();
        lambda_env.bind(param, param_ty.clone());

        let old_env = std::mem::replace(&mut self.env, lambda_env);
        let body_result = self.infer(body);
        self.env = old_env;

        let (body, body_ty) = body_result?;
        Ok((
            Term::new(
                TermKind::Lam {
                    param,
                    param_ty: param_ty.clone(),
                    body: Box::new(body),
                },
                span,
            ),
            Type::arrow(param_ty.clone(), body_ty),
        ))
    }

    pub(crate) fn infer_ty_lambda(
        &mut self,
        param: Name,
        bounds: &[Name],
        body: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        // The binder is opaque in the body; its bounds are assumed
        self.assumptions.push((param, bounds.to_vec()));
        let body_result = self.infer(body);
        self.assumptions.pop();

        let (body, body_ty) = body_result?;
        Ok((
            Term::new(
                TermKind::TyLam {
                    param,
                    bounds: bounds.to_vec(),
                    body: Box::new(body),
                },
                span,
            ),
            Type::Forall {
                var: param,
                bounds: bounds.to_vec(),
                body: Box::new(body_ty),
            },
        ))
    }

    pub(crate) fn infer_annot(
        &mut self,
        inner: &Term,
        ty: &Type,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (inner, inner_ty) = self.infer(inner)?;
        self.expect_ty(ty, &inner_ty, span)?;
        Ok((
            Term::new(
                TermKind::Annot {
                    term: Box::new(inner),
                    ty: ty.clone(),
                },
                span,
            ),
            ty.clone(),
        ))
    }

    pub(crate) fn infer_list(
        &mut self,
        elems: &[Term],
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let Some((first, rest)) = elems.split_first() else {
            // The empty list is polymorphic; instantiate it with `@` or
            // let an application site infer the element type
            let var = self.interner.intern("a");
            return Ok((
                Term::new(TermKind::List(Vec::new()), span),
                Type::forall(var, Type::list(Type::Var(var))),
            ));
        };

        let (first, first_ty) = self.infer(first)?;
        let mut checked = Vec::with_capacity(elems.len());
        checked.push(first);
        for elem in rest {
            let (elem_checked, elem_ty) = self.infer(elem)?;
            self.expect_ty(&first_ty, &elem_ty, elem.span)?;
            checked.push(elem_checked);
        }
        Ok((
            Term::new(TermKind::List(checked), span),
            Type::list(first_ty),
        ))
    }

    pub(crate) fn infer_record(
        &mut self,
        fields: &[(Name, Term)],
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let mut checked = Vec::with_capacity(fields.len());
        let mut field_tys = Vec::with_capacity(fields.len());
        for (label, value) in fields {
            let (value, value_ty) = self.infer(value)?;
            checked.push((*label, value));
            field_tys.push((*label, value_ty));
        }
        Ok((
            Term::new(TermKind::Record(checked), span),
            Type::Record(field_tys),
        ))
    }

    pub(crate) fn infer_proj(
        &mut self,
        base: &Term,
        label: Name,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (base, base_ty) = self.infer(base)?;
        let Some(field_ty) = base_ty.record_field(label).cloned() else {
            let diagnostic = if matches!(base_ty, Type::Record(_)) {
                Diagnostic::error(ErrorCode::E3001)
                    .with_message(format!(
                        "no field `{}` in `{}`",
                        self.interner.lookup(label),
                        base_ty.display(self.interner)
                    ))
                    .with_label(span, "unknown field")
            } else {
                Diagnostic::error(ErrorCode::E3001)
                    .with_message(format!(
                        "expected a record, found `{}`",
                        base_ty.display(self.interner)
                    ))
                    .with_label(base.span, "cannot project a field out of this")
            };
            return Err(diagnostic);
        };
        Ok((
            Term::new(
                TermKind::Proj {
                    base: Box::new(base),
                    label,
                },
                span,
            ),
            field_ty,
        ))
    }

    pub(crate) fn infer_if(
        &mut self,
        cond: &Term,
        then_branch: &Term,
        else_branch: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (cond, cond_ty) = self.infer(cond)?;
        self.expect_ty(&Type::Bool, &cond_ty, cond.span)?;

        let (then_branch, then_ty) = self.infer(then_branch)?;
        let (else_branch, else_ty) = self.infer(else_branch)?;
        if then_ty != else_ty {
            return Err(sable_diagnostic::type_mismatch(
                else_branch.span,
                &then_ty.display(self.interner),
                &else_ty.display(self.interner),
            )
            .with_note("both branches of an `if` must have the same type"));
        }

        Ok((
            Term::new(
                TermKind::If {
                    cond: Box::new(cond),
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                },
                span,
            ),
            then_ty,
        ))
    }
}
