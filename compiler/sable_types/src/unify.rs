//! Restricted unification for type-argument inference.
//!
//! This is not general unification: there is exactly one metavariable (the
//! binder of the `forall` being instantiated) and the other side is a fully
//! known type. The walk recurses through arrows, lists, and records;
//! a `forall` nested inside the parameter type is opaque and must match
//! exactly. The first position to reach the metavariable fixes its binding
//! and every later occurrence must agree.

use crate::Type;
use sable_ir::Name;

/// Why the metavariable could not be solved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnifyError {
    /// The types disagree at a position with no metavariable.
    Mismatch { pattern: Type, actual: Type },
    /// Two occurrences of the metavariable demanded different types.
    Conflict { first: Type, second: Type },
    /// The metavariable does not occur in the parameter type at all.
    NoOccurrence,
}

/// Solve `meta` so that `pattern` matches `actual`.
///
/// `pattern` is the parameter type of the instantiated arrow (it may
/// mention `meta`); `actual` is the inferred argument type (it may not).
/// Returns the unique binding for `meta`.
pub fn unify_single(meta: Name, pattern: &Type, actual: &Type) -> Result<Type, UnifyError> {
    let mut binding = None;
    walk(meta, pattern, actual, &mut binding)?;
    binding.ok_or(UnifyError::NoOccurrence)
}

fn walk(
    meta: Name,
    pattern: &Type,
    actual: &Type,
    binding: &mut Option<Type>,
) -> Result<(), UnifyError> {
    match (pattern, actual) {
        (Type::Var(v), _) if *v == meta => match binding {
            None => {
                *binding = Some(actual.clone());
                Ok(())
            }
            Some(prev) if prev == actual => Ok(()),
            Some(prev) => Err(UnifyError::Conflict {
                first: prev.clone(),
                second: actual.clone(),
            }),
        },
        (Type::List(p), Type::List(a)) => walk(meta, p, a, binding),
        (
            Type::Arrow { param: p1, ret: r1 },
            Type::Arrow { param: p2, ret: r2 },
        ) => {
            walk(meta, p1, p2, binding)?;
            walk(meta, r1, r2, binding)
        }
        (Type::Record(pf), Type::Record(af)) if pf.len() == af.len() => {
            // Recurse per label, in the pattern's declaration order
            for (label, pat_field) in pf {
                let Some((_, act_field)) = af.iter().find(|(l, _)| l == label) else {
                    return Err(UnifyError::Mismatch {
                        pattern: pattern.clone(),
                        actual: actual.clone(),
                    });
                };
                walk(meta, pat_field, act_field, binding)?;
            }
            Ok(())
        }
        // Base position: nested foralls, primitives, foreign variables.
        // Plain equality decides; the metavariable never binds here.
        _ => {
            if pattern == actual {
                Ok(())
            } else {
                Err(UnifyError::Mismatch {
                    pattern: pattern.clone(),
                    actual: actual.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subst::substitute;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use sable_ir::SharedInterner;

    #[test]
    fn test_bind_at_base_position() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");

        let result = unify_single(x, &Type::Var(x), &Type::Int);
        assert_eq!(result, Ok(Type::Int));
    }

    #[test]
    fn test_bind_through_structure() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");
        let label = interner.intern("v");

        // {v: [X]} against {v: [Bool]}
        let pattern = Type::Record(vec![(label, Type::list(Type::Var(x)))]);
        let actual = Type::Record(vec![(label, Type::list(Type::Bool))]);
        assert_eq!(unify_single(x, &pattern, &actual), Ok(Type::Bool));
    }

    #[test]
    fn test_conflicting_occurrences() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");

        // X -> X against Int -> Bool
        let pattern = Type::arrow(Type::Var(x), Type::Var(x));
        let actual = Type::arrow(Type::Int, Type::Bool);
        assert_eq!(
            unify_single(x, &pattern, &actual),
            Err(UnifyError::Conflict {
                first: Type::Int,
                second: Type::Bool,
            })
        );
    }

    #[test]
    fn test_agreeing_occurrences() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");

        let pattern = Type::arrow(Type::Var(x), Type::Var(x));
        let actual = Type::arrow(Type::list(Type::Int), Type::list(Type::Int));
        assert_eq!(unify_single(x, &pattern, &actual), Ok(Type::list(Type::Int)));
    }

    #[test]
    fn test_no_occurrence() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");

        assert_eq!(
            unify_single(x, &Type::Int, &Type::Int),
            Err(UnifyError::NoOccurrence)
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");

        let pattern = Type::list(Type::Var(x));
        let result = unify_single(x, &pattern, &Type::Int);
        assert!(matches!(result, Err(UnifyError::Mismatch { .. })));
    }

    #[test]
    fn test_nested_forall_is_opaque() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");
        let b = interner.intern("b");

        // (forall b. b -> X) is a base position: it must match exactly,
        // and an exact match still leaves the metavariable unbound
        let pattern = Type::forall(b, Type::arrow(Type::Var(b), Type::Var(x)));
        let actual = pattern.clone();
        assert_eq!(
            unify_single(x, &pattern, &actual),
            Err(UnifyError::NoOccurrence)
        );

        let different = Type::forall(b, Type::arrow(Type::Var(b), Type::Int));
        assert!(matches!(
            unify_single(x, &pattern, &different),
            Err(UnifyError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_record_field_order_irrelevant() {
        let interner = SharedInterner::new();
        let x = interner.intern("X");
        let fst = interner.intern("fst");
        let snd = interner.intern("snd");

        let pattern = Type::Record(vec![(fst, Type::Var(x)), (snd, Type::Bool)]);
        let actual = Type::Record(vec![(snd, Type::Bool), (fst, Type::Str)]);
        assert_eq!(unify_single(x, &pattern, &actual), Ok(Type::Str));
    }

    // ===== Property tests =====

    /// Interner-free type skeleton used to drive the property tests.
    #[derive(Clone, Debug)]
    enum Shape {
        Meta,
        Int,
        Bool,
        Str,
        List(Box<Shape>),
        Arrow(Box<Shape>, Box<Shape>),
    }

    fn arb_shape(with_meta: bool) -> impl Strategy<Value = Shape> {
        let leaf = if with_meta {
            prop_oneof![
                Just(Shape::Meta),
                Just(Shape::Int),
                Just(Shape::Bool),
                Just(Shape::Str),
            ]
            .boxed()
        } else {
            prop_oneof![Just(Shape::Int), Just(Shape::Bool), Just(Shape::Str)].boxed()
        };
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|s| Shape::List(Box::new(s))),
                (inner.clone(), inner)
                    .prop_map(|(p, r)| Shape::Arrow(Box::new(p), Box::new(r))),
            ]
        })
    }

    fn to_type(shape: &Shape, meta: Name) -> Type {
        match shape {
            Shape::Meta => Type::Var(meta),
            Shape::Int => Type::Int,
            Shape::Bool => Type::Bool,
            Shape::Str => Type::Str,
            Shape::List(inner) => Type::list(to_type(inner, meta)),
            Shape::Arrow(p, r) => Type::arrow(to_type(p, meta), to_type(r, meta)),
        }
    }

    fn contains_meta(shape: &Shape) -> bool {
        match shape {
            Shape::Meta => true,
            Shape::Int | Shape::Bool | Shape::Str => false,
            Shape::List(inner) => contains_meta(inner),
            Shape::Arrow(p, r) => contains_meta(p) || contains_meta(r),
        }
    }

    proptest! {
        /// Substituting a type for the metavariable and unifying back
        /// recovers exactly that type.
        #[test]
        fn prop_unify_recovers_substitution(
            pattern_shape in arb_shape(true),
            arg_shape in arb_shape(false),
        ) {
            prop_assume!(contains_meta(&pattern_shape));

            let interner = SharedInterner::new();
            let meta = interner.intern("X");
            let pattern = to_type(&pattern_shape, meta);
            let arg = to_type(&arg_shape, meta);

            let actual = substitute(&pattern, meta, &arg, &interner);
            prop_assert_eq!(unify_single(meta, &pattern, &actual), Ok(arg));
        }

        /// A pattern without the metavariable never produces a binding,
        /// and the failure is deterministic across runs.
        #[test]
        fn prop_unify_without_meta_fails(shape in arb_shape(false)) {
            let interner = SharedInterner::new();
            let meta = interner.intern("X");
            let ty = to_type(&shape, meta);

            let first = unify_single(meta, &ty, &ty);
            let second = unify_single(meta, &ty, &ty);
            prop_assert_eq!(first.clone(), second);
            prop_assert_eq!(first, Err(UnifyError::NoOccurrence));
        }
    }
}
