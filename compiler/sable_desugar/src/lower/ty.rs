//! Parsed-type resolution.
//!
//! `Int`/`Bool`/`String` are builtin; a name bound by an enclosing type
//! binder is a variable; a struct name is its record layout; a trait name
//! is its universally quantified dictionary type, and applying it to a
//! type argument instantiates the dictionary. Anything else is an unknown
//! declaration.

use sable_diagnostic::{unknown_declaration, Diagnostic, ErrorCode};
use sable_ir::{Name, Span, TypeExpr, TypeExprKind};
use sable_types::{subst, Type};

use crate::stack::ensure_sufficient_stack;
use crate::Desugarer;

impl Desugarer<'_> {
    /// Lower a parsed type to a resolved type.
    pub(crate) fn lower_type(&mut self, ty: &TypeExpr) -> Result<Type, Diagnostic> {
        ensure_sufficient_stack(|| match &ty.kind {
            TypeExprKind::Named(name) => self.lower_named_type(*name, ty.span),
            TypeExprKind::List(elem) => Ok(Type::list(self.lower_type(elem)?)),
            TypeExprKind::Record(fields) => {
                let mut lowered = Vec::with_capacity(fields.len());
                for field in fields {
                    lowered.push((field.label, self.lower_type(&field.ty)?));
                }
                Ok(Type::Record(lowered))
            }
            TypeExprKind::Arrow { param, ret } => {
                Ok(Type::arrow(self.lower_type(param)?, self.lower_type(ret)?))
            }
            TypeExprKind::Forall {
                param,
                bounds,
                body,
            } => {
                self.check_bounds(bounds, ty.span)?;
                self.bound_vars.push(*param);
                let body = self.lower_type(body);
                self.bound_vars.pop();
                Ok(Type::Forall {
                    var: *param,
                    bounds: bounds.clone(),
                    body: Box::new(body?),
                })
            }
            TypeExprKind::Apply { func, arg } => {
                let func_ty = self.lower_type(func)?;
                let arg_ty = self.lower_type(arg)?;
                match func_ty {
                    Type::Forall { var, body, .. } => {
                        Ok(subst::substitute(&body, var, &arg_ty, self.interner))
                    }
                    other => Err(Diagnostic::error(ErrorCode::E2002)
                        .with_message(format!(
                            "`{}` does not take type arguments",
                            other.display(self.interner)
                        ))
                        .with_label(ty.span, "expected a trait or `forall` type here")),
                }
            }
        })
    }

    fn lower_named_type(&self, name: Name, span: Span) -> Result<Type, Diagnostic> {
        if name == self.ty_int {
            return Ok(Type::Int);
        }
        if name == self.ty_bool {
            return Ok(Type::Bool);
        }
        if name == self.ty_string {
            return Ok(Type::Str);
        }
        if self.bound_vars.contains(&name) {
            return Ok(Type::Var(name));
        }
        if let Some(layout) = self.signatures.struct_layout(name) {
            return Ok(Type::Record(layout.fields.clone()));
        }
        if let Some(sig) = self.signatures.trait_sig(name) {
            return Ok(sig.forall_dictionary());
        }
        Err(unknown_declaration(span, self.interner.lookup(name)))
    }

    /// Reject bounds that do not name declared traits. Without this, a
    /// bad bound would surface at dispatch time as an internal failure
    /// instead of a user error.
    pub(crate) fn check_bounds(&self, bounds: &[Name], span: Span) -> Result<(), Diagnostic> {
        for &bound in bounds {
            if self.signatures.trait_sig(bound).is_none() {
                return Err(Diagnostic::error(ErrorCode::E2002)
                    .with_message(format!(
                        "unknown trait `{}` in bound",
                        self.interner.lookup(bound)
                    ))
                    .with_label(span, "bounds must name declared traits"));
            }
        }
        Ok(())
    }
}
