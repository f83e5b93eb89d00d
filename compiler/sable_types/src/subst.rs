//! Capture-avoiding type substitution.

use crate::Type;
use rustc_hash::FxHashSet;
use sable_ir::{Name, StringInterner};

/// Collect the free type variables of a type.
pub fn free_vars(ty: &Type) -> FxHashSet<Name> {
    let mut free = FxHashSet::default();
    let mut bound = FxHashSet::default();
    collect_free(ty, &mut bound, &mut free);
    free
}

fn collect_free(ty: &Type, bound: &mut FxHashSet<Name>, free: &mut FxHashSet<Name>) {
    match ty {
        Type::Int | Type::Bool | Type::Str => {}
        Type::Var(name) => {
            if !bound.contains(name) {
                free.insert(*name);
            }
        }
        Type::List(elem) => collect_free(elem, bound, free),
        Type::Record(fields) => {
            for (_, field_ty) in fields {
                collect_free(field_ty, bound, free);
            }
        }
        Type::Arrow { param, ret } => {
            collect_free(param, bound, free);
            collect_free(ret, bound, free);
        }
        Type::Forall { var, body, .. } => {
            let newly_bound = bound.insert(*var);
            collect_free(body, bound, free);
            if newly_bound {
                bound.remove(var);
            }
        }
    }
}

/// Substitute `replacement` for every free occurrence of `var` in `ty`.
///
/// Inner binders that would capture a free variable of `replacement` are
/// renamed first (`a` becomes `a$1`, `a$2`, ...), so the result never
/// confuses distinct variables that share a spelling.
pub fn substitute(
    ty: &Type,
    var: Name,
    replacement: &Type,
    interner: &StringInterner,
) -> Type {
    match ty {
        Type::Int | Type::Bool | Type::Str => ty.clone(),
        Type::Var(name) => {
            if *name == var {
                replacement.clone()
            } else {
                ty.clone()
            }
        }
        Type::List(elem) => Type::List(Box::new(substitute(elem, var, replacement, interner))),
        Type::Record(fields) => Type::Record(
            fields
                .iter()
                .map(|(label, field_ty)| {
                    (*label, substitute(field_ty, var, replacement, interner))
                })
                .collect(),
        ),
        Type::Arrow { param, ret } => Type::Arrow {
            param: Box::new(substitute(param, var, replacement, interner)),
            ret: Box::new(substitute(ret, var, replacement, interner)),
        },
        Type::Forall { var: binder, bounds, body } => {
            if *binder == var {
                // The binder shadows the substituted variable
                return ty.clone();
            }
            let replacement_free = free_vars(replacement);
            if replacement_free.contains(binder) {
                // Renaming the binder keeps the replacement's variable free
                let mut avoid = replacement_free;
                avoid.extend(free_vars(body));
                avoid.insert(var);
                let fresh = fresh_name(*binder, &avoid, interner);

                let renamed_body = substitute(body, *binder, &Type::Var(fresh), interner);
                Type::Forall {
                    var: fresh,
                    bounds: bounds.clone(),
                    body: Box::new(substitute(&renamed_body, var, replacement, interner)),
                }
            } else {
                Type::Forall {
                    var: *binder,
                    bounds: bounds.clone(),
                    body: Box::new(substitute(body, var, replacement, interner)),
                }
            }
        }
    }
}

/// Produce a name spelled `base$N` that is not in `avoid`.
///
/// The smallest suffix wins, so freshening is deterministic for a given
/// input rather than depending on an ambient counter.
pub fn fresh_name(base: Name, avoid: &FxHashSet<Name>, interner: &StringInterner) -> Name {
    let base_str = interner.lookup(base).to_string();
    for n in 1u32.. {
        let candidate = interner.intern(&format!("{base_str}${n}"));
        if !avoid.contains(&candidate) {
            return candidate;
        }
    }
    unreachable!("ran out of fresh name suffixes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::SharedInterner;

    #[test]
    fn test_substitute_base_positions() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");

        let ty = Type::arrow(Type::Var(a), Type::list(Type::Var(a)));
        let result = substitute(&ty, a, &Type::Int, &interner);
        assert_eq!(result, Type::arrow(Type::Int, Type::list(Type::Int)));
    }

    #[test]
    fn test_substitute_respects_shadowing() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");

        // forall a. a  keeps its own binder
        let ty = Type::forall(a, Type::Var(a));
        let result = substitute(&ty, a, &Type::Int, &interner);
        assert_eq!(result, ty);
    }

    #[test]
    fn test_substitute_avoids_capture() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let b_fresh = interner.intern("b$1");

        // [a := b] (forall b. a -> b) must not capture the free b
        let ty = Type::forall(b, Type::arrow(Type::Var(a), Type::Var(b)));
        let result = substitute(&ty, a, &Type::Var(b), &interner);

        let expected = Type::forall(b_fresh, Type::arrow(Type::Var(b), Type::Var(b_fresh)));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_free_vars() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");

        let ty = Type::forall(a, Type::arrow(Type::Var(a), Type::Var(b)));
        let free = free_vars(&ty);
        assert!(!free.contains(&a));
        assert!(free.contains(&b));
    }

    #[test]
    fn test_fresh_name_skips_taken() {
        let interner = SharedInterner::new();
        let x = interner.intern("x");
        let x1 = interner.intern("x$1");

        let mut avoid = FxHashSet::default();
        avoid.insert(x1);
        let fresh = fresh_name(x, &avoid, &interner);
        assert_eq!(interner.lookup(fresh), "x$2");
    }
}
