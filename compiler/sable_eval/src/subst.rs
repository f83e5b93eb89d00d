//! Capture-avoiding term substitution.
//!
//! β-reduction is `substitute(body, param, argument)`. Only lambdas bind
//! term variables; type abstractions bind type variables and are skipped
//! over. Types inside terms are never touched, since evaluation erases
//! them.

use crate::stack::ensure_sufficient_stack;
use rustc_hash::FxHashSet;
use sable_ir::{Name, StringInterner};
use sable_types::{subst::fresh_name, Term, TermKind};

/// Collect the free term variables of a term.
pub(crate) fn free_vars(term: &Term) -> FxHashSet<Name> {
    let mut free = FxHashSet::default();
    let mut bound = FxHashSet::default();
    collect_free(term, &mut bound, &mut free);
    free
}

fn collect_free(term: &Term, bound: &mut FxHashSet<Name>, free: &mut FxHashSet<Name>) {
    match &term.kind {
        TermKind::Int(_)
        | TermKind::Bool(_)
        | TermKind::Str(_)
        | TermKind::Builtin(_)
        | TermKind::Error => {}
        TermKind::Var(name) => {
            if !bound.contains(name) {
                free.insert(*name);
            }
        }
        TermKind::Lam { param, body, .. } => {
            let newly_bound = bound.insert(*param);
            collect_free(body, bound, free);
            if newly_bound {
                bound.remove(param);
            }
        }
        TermKind::TyLam { body, .. } | TermKind::Annot { term: body, .. } => {
            collect_free(body, bound, free);
        }
        TermKind::App { func, arg } => {
            collect_free(func, bound, free);
            collect_free(arg, bound, free);
        }
        TermKind::TyApp { func, .. } => collect_free(func, bound, free),
        TermKind::List(items) => {
            for item in items {
                collect_free(item, bound, free);
            }
        }
        TermKind::Record(fields) => {
            for (_, value) in fields {
                collect_free(value, bound, free);
            }
        }
        TermKind::Proj { base, .. } => collect_free(base, bound, free),
        TermKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            collect_free(cond, bound, free);
            collect_free(then_branch, bound, free);
            collect_free(else_branch, bound, free);
        }
        TermKind::Binary { left, right, .. } => {
            collect_free(left, bound, free);
            collect_free(right, bound, free);
        }
        TermKind::Unary { operand, .. } => collect_free(operand, bound, free),
    }
}

/// Substitute `replacement` for every free occurrence of `target` in `term`.
///
/// Lambda binders that would capture a free variable of `replacement` are
/// renamed first (`x` becomes `x$1`, `x$2`, ...), preserving the spans of
/// the renamed occurrences.
pub(crate) fn substitute(
    term: &Term,
    target: Name,
    replacement: &Term,
    interner: &StringInterner,
) -> Term {
    ensure_sufficient_stack(|| substitute_inner(term, target, replacement, interner))
}

fn substitute_inner(
    term: &Term,
    target: Name,
    replacement: &Term,
    interner: &StringInterner,
) -> Term {
    let kind = match &term.kind {
        TermKind::Int(_)
        | TermKind::Bool(_)
        | TermKind::Str(_)
        | TermKind::Builtin(_)
        | TermKind::Error => term.kind.clone(),
        TermKind::Var(name) => {
            if *name == target {
                return replacement.clone();
            }
            term.kind.clone()
        }
        TermKind::Lam {
            param,
            param_ty,
            body,
        } => {
            if *param == target {
                // The binder shadows the substituted variable
                return term.clone();
            }
            let replacement_free = free_vars(replacement);
            if replacement_free.contains(param) {
                // Renaming the binder keeps the replacement's variable free
                let mut avoid = replacement_free;
                avoid.extend(free_vars(body));
                avoid.insert(target);
                let fresh = fresh_name(*param, &avoid, interner);

                let renamed_body = rename(body, *param, fresh);
                TermKind::Lam {
                    param: fresh,
                    param_ty: param_ty.clone(),
                    body: Box::new(substitute(&renamed_body, target, replacement, interner)),
                }
            } else {
                TermKind::Lam {
                    param: *param,
                    param_ty: param_ty.clone(),
                    body: Box::new(substitute(body, target, replacement, interner)),
                }
            }
        }
        TermKind::TyLam {
            param,
            bounds,
            body,
        } => TermKind::TyLam {
            param: *param,
            bounds: bounds.clone(),
            body: Box::new(substitute(body, target, replacement, interner)),
        },
        TermKind::App { func, arg } => TermKind::App {
            func: Box::new(substitute(func, target, replacement, interner)),
            arg: Box::new(substitute(arg, target, replacement, interner)),
        },
        TermKind::TyApp { func, arg, bounds } => TermKind::TyApp {
            func: Box::new(substitute(func, target, replacement, interner)),
            arg: arg.clone(),
            bounds: bounds.clone(),
        },
        TermKind::Annot { term: inner, ty } => TermKind::Annot {
            term: Box::new(substitute(inner, target, replacement, interner)),
            ty: ty.clone(),
        },
        TermKind::List(items) => TermKind::List(
            items
                .iter()
                .map(|item| substitute(item, target, replacement, interner))
                .collect(),
        ),
        TermKind::Record(fields) => TermKind::Record(
            fields
                .iter()
                .map(|(label, value)| (*label, substitute(value, target, replacement, interner)))
                .collect(),
        ),
        TermKind::Proj { base, label } => TermKind::Proj {
            base: Box::new(substitute(base, target, replacement, interner)),
            label: *label,
        },
        TermKind::If {
            cond,
            then_branch,
            else_branch,
        } => TermKind::If {
            cond: Box::new(substitute(cond, target, replacement, interner)),
            then_branch: Box::new(substitute(then_branch, target, replacement, interner)),
            else_branch: Box::new(substitute(else_branch, target, replacement, interner)),
        },
        TermKind::Binary { op, left, right } => TermKind::Binary {
            op: *op,
            left: Box::new(substitute(left, target, replacement, interner)),
            right: Box::new(substitute(right, target, replacement, interner)),
        },
        TermKind::Unary { op, operand } => TermKind::Unary {
            op: *op,
            operand: Box::new(substitute(operand, target, replacement, interner)),
        },
    };
    Term::new(kind, term.span)
}

/// Rename free occurrences of `from` to `to`, keeping every node's span.
///
/// `to` is always freshly generated, so no occurrence of it can exist in
/// `term` and renaming cannot itself capture.
fn rename(term: &Term, from: Name, to: Name) -> Term {
    let kind = match &term.kind {
        TermKind::Int(_)
        | TermKind::Bool(_)
        | TermKind::Str(_)
        | TermKind::Builtin(_)
        | TermKind::Error => term.kind.clone(),
        TermKind::Var(name) => TermKind::Var(if *name == from { to } else { *name }),
        TermKind::Lam {
            param,
            param_ty,
            body,
        } => {
            if *param == from {
                return term.clone();
            }
            TermKind::Lam {
                param: *param,
                param_ty: param_ty.clone(),
                body: Box::new(rename(body, from, to)),
            }
        }
        TermKind::TyLam {
            param,
            bounds,
            body,
        } => TermKind::TyLam {
            param: *param,
            bounds: bounds.clone(),
            body: Box::new(rename(body, from, to)),
        },
        TermKind::App { func, arg } => TermKind::App {
            func: Box::new(rename(func, from, to)),
            arg: Box::new(rename(arg, from, to)),
        },
        TermKind::TyApp { func, arg, bounds } => TermKind::TyApp {
            func: Box::new(rename(func, from, to)),
            arg: arg.clone(),
            bounds: bounds.clone(),
        },
        TermKind::Annot { term: inner, ty } => TermKind::Annot {
            term: Box::new(rename(inner, from, to)),
            ty: ty.clone(),
        },
        TermKind::List(items) => {
            TermKind::List(items.iter().map(|item| rename(item, from, to)).collect())
        }
        TermKind::Record(fields) => TermKind::Record(
            fields
                .iter()
                .map(|(label, value)| (*label, rename(value, from, to)))
                .collect(),
        ),
        TermKind::Proj { base, label } => TermKind::Proj {
            base: Box::new(rename(base, from, to)),
            label: *label,
        },
        TermKind::If {
            cond,
            then_branch,
            else_branch,
        } => TermKind::If {
            cond: Box::new(rename(cond, from, to)),
            then_branch: Box::new(rename(then_branch, from, to)),
            else_branch: Box::new(rename(else_branch, from, to)),
        },
        TermKind::Binary { op, left, right } => TermKind::Binary {
            op: *op,
            left: Box::new(rename(left, from, to)),
            right: Box::new(rename(right, from, to)),
        },
        TermKind::Unary { op, operand } => TermKind::Unary {
            op: *op,
            operand: Box::new(rename(operand, from, to)),
        },
    };
    Term::new(kind, term.span)
}
