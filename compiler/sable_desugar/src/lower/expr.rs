//! Expression lowering.
//!
//! A structural walk from the surface AST to core terms. The only scope
//! bookkeeping is for type-abstraction binders, which bring a type
//! variable into scope for the types lowered inside their bodies.

use sable_diagnostic::Diagnostic;
use sable_ir::{Expr, ExprKind};
use sable_types::{Term, TermKind};

use crate::stack::ensure_sufficient_stack;
use crate::Desugarer;

impl Desugarer<'_> {
    /// Lower a surface expression to a core term.
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<Term, Diagnostic> {
        let kind = ensure_sufficient_stack(|| -> Result<TermKind, Diagnostic> {
            match &expr.kind {
                ExprKind::Int(value) => Ok(TermKind::Int(*value)),
                ExprKind::Bool(value) => Ok(TermKind::Bool(*value)),
                ExprKind::Str(contents) => Ok(TermKind::Str(*contents)),
                ExprKind::Ident(name) => Ok(TermKind::Var(*name)),
                ExprKind::List(items) => {
                    let mut lowered = Vec::with_capacity(items.len());
                    for item in items {
                        lowered.push(self.lower_expr(item)?);
                    }
                    Ok(TermKind::List(lowered))
                }
                ExprKind::Record(fields) => {
                    let mut lowered = Vec::with_capacity(fields.len());
                    for field in fields {
                        lowered.push((field.label, self.lower_expr(&field.value)?));
                    }
                    Ok(TermKind::Record(lowered))
                }
                ExprKind::Field { base, label } => Ok(TermKind::Proj {
                    base: Box::new(self.lower_expr(base)?),
                    label: *label,
                }),
                ExprKind::Lambda {
                    param,
                    param_ty,
                    body,
                } => Ok(TermKind::Lam {
                    param: *param,
                    param_ty: self.lower_type(param_ty)?,
                    body: Box::new(self.lower_expr(body)?),
                }),
                ExprKind::TyLambda {
                    param,
                    bounds,
                    body,
                } => {
                    self.check_bounds(bounds, expr.span)?;
                    self.bound_vars.push(*param);
                    let body = self.lower_expr(body);
                    self.bound_vars.pop();
                    Ok(TermKind::TyLam {
                        param: *param,
                        bounds: bounds.clone(),
                        body: Box::new(body?),
                    })
                }
                ExprKind::Apply { func, arg } => Ok(TermKind::App {
                    func: Box::new(self.lower_expr(func)?),
                    arg: Box::new(self.lower_expr(arg)?),
                }),
                ExprKind::TyApply { func, arg } => Ok(TermKind::TyApp {
                    func: Box::new(self.lower_expr(func)?),
                    arg: self.lower_type(arg)?,
                    // The checker fills these in from the binder it
                    // instantiates
                    bounds: Vec::new(),
                }),
                ExprKind::Annot { expr: inner, ty } => Ok(TermKind::Annot {
                    term: Box::new(self.lower_expr(inner)?),
                    ty: self.lower_type(ty)?,
                }),
                ExprKind::If {
                    cond,
                    then_branch,
                    else_branch,
                } => Ok(TermKind::If {
                    cond: Box::new(self.lower_expr(cond)?),
                    then_branch: Box::new(self.lower_expr(then_branch)?),
                    else_branch: Box::new(self.lower_expr(else_branch)?),
                }),
                ExprKind::Binary { op, left, right } => Ok(TermKind::Binary {
                    op: *op,
                    left: Box::new(self.lower_expr(left)?),
                    right: Box::new(self.lower_expr(right)?),
                }),
                ExprKind::Unary { op, operand } => Ok(TermKind::Unary {
                    op: *op,
                    operand: Box::new(self.lower_expr(operand)?),
                }),
            }
        })?;
        Ok(Term::new(kind, expr.span))
    }
}
