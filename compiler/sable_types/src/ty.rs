//! Core type representation.
//!
//! Surface named types are resolved away before a `Type` is built: struct
//! names become their record layouts and trait applications become
//! dictionary records, so the checker never sees a nominal reference.

use sable_ir::{Name, StringInterner};
use std::hash::{Hash, Hasher};

/// A fully resolved type.
///
/// Equality is structural, with two deliberate exceptions: record types
/// compare by label set (declaration order is display-only), and the
/// bounds on a `Forall` binder compare as a set.
#[derive(Clone, Debug)]
pub enum Type {
    /// Integer type
    Int,
    /// Boolean type
    Bool,
    /// String type
    Str,
    /// List type: `[T]`
    List(Box<Type>),
    /// Record type with fields in declaration order: `{x: Int, y: Int}`
    Record(Vec<(Name, Type)>),
    /// Function type: `T -> U`
    Arrow { param: Box<Type>, ret: Box<Type> },
    /// Universal type: `forall a impl F+G. T`
    Forall {
        var: Name,
        bounds: Vec<Name>,
        body: Box<Type>,
    },
    /// A type variable bound by an enclosing `Forall`
    Var(Name),
}

impl Type {
    /// Build an arrow type.
    pub fn arrow(param: Type, ret: Type) -> Type {
        Type::Arrow {
            param: Box::new(param),
            ret: Box::new(ret),
        }
    }

    /// Build a list type.
    pub fn list(elem: Type) -> Type {
        Type::List(Box::new(elem))
    }

    /// Build an unbounded universal type.
    pub fn forall(var: Name, body: Type) -> Type {
        Type::Forall {
            var,
            bounds: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Check if this is a universal type.
    pub fn is_forall(&self) -> bool {
        matches!(self, Type::Forall { .. })
    }

    /// View as an arrow, if it is one.
    pub fn as_arrow(&self) -> Option<(&Type, &Type)> {
        match self {
            Type::Arrow { param, ret } => Some((param, ret)),
            _ => None,
        }
    }

    /// Look up a record field by label.
    pub fn record_field(&self, label: Name) -> Option<&Type> {
        match self {
            Type::Record(fields) => fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, ty)| ty),
            _ => None,
        }
    }

    /// Format the type as surface syntax.
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Str => "String".to_string(),
            Type::List(elem) => format!("[{}]", elem.display(interner)),
            Type::Record(fields) => {
                let fields_str: Vec<_> = fields
                    .iter()
                    .map(|(label, ty)| {
                        format!("{}: {}", interner.lookup(*label), ty.display(interner))
                    })
                    .collect();
                format!("{{{}}}", fields_str.join(", "))
            }
            Type::Arrow { param, ret } => {
                // Arrows associate right; a higher-order parameter needs parens
                let param_str = match param.as_ref() {
                    Type::Arrow { .. } | Type::Forall { .. } => {
                        format!("({})", param.display(interner))
                    }
                    _ => param.display(interner),
                };
                format!("{} -> {}", param_str, ret.display(interner))
            }
            Type::Forall { var, bounds, body } => {
                if bounds.is_empty() {
                    format!("forall {}. {}", interner.lookup(*var), body.display(interner))
                } else {
                    let bounds_str: Vec<_> =
                        bounds.iter().map(|b| interner.lookup(*b)).collect();
                    format!(
                        "forall {} impl {}. {}",
                        interner.lookup(*var),
                        bounds_str.join("+"),
                        body.display(interner)
                    )
                }
            }
            Type::Var(name) => interner.lookup(*name).to_string(),
        }
    }
}

fn bound_set_eq(a: &[Name], b: &[Name]) -> bool {
    a.len() == b.len() && a.iter().all(|bound| b.contains(bound))
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) | (Type::Bool, Type::Bool) | (Type::Str, Type::Str) => true,
            (Type::List(a), Type::List(b)) => a == b,
            (Type::Record(a), Type::Record(b)) => {
                // Labels are unique per record, so equal length plus
                // per-label agreement is a bijection
                a.len() == b.len()
                    && a.iter().all(|(label, ty)| {
                        b.iter().any(|(l, t)| l == label && t == ty)
                    })
            }
            (
                Type::Arrow { param: p1, ret: r1 },
                Type::Arrow { param: p2, ret: r2 },
            ) => p1 == p2 && r1 == r2,
            (
                Type::Forall { var: v1, bounds: b1, body: t1 },
                Type::Forall { var: v2, bounds: b2, body: t2 },
            ) => v1 == v2 && bound_set_eq(b1, b2) && t1 == t2,
            (Type::Var(a), Type::Var(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Type::Int | Type::Bool | Type::Str => {}
            Type::List(elem) => elem.hash(state),
            Type::Record(fields) => {
                // Order-insensitive equality needs order-insensitive hashing
                let mut sorted: Vec<_> = fields.iter().collect();
                sorted.sort_by_key(|(label, _)| label.raw());
                for (label, ty) in sorted {
                    label.hash(state);
                    ty.hash(state);
                }
            }
            Type::Arrow { param, ret } => {
                param.hash(state);
                ret.hash(state);
            }
            Type::Forall { var, bounds, body } => {
                var.hash(state);
                let mut sorted: Vec<_> = bounds.iter().map(|b| b.raw()).collect();
                sorted.sort_unstable();
                sorted.hash(state);
                body.hash(state);
            }
            Type::Var(name) => name.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_ir::SharedInterner;

    #[test]
    fn test_record_equality_ignores_order() {
        let interner = SharedInterner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let a = Type::Record(vec![(x, Type::Int), (y, Type::Bool)]);
        let b = Type::Record(vec![(y, Type::Bool), (x, Type::Int)]);
        let c = Type::Record(vec![(x, Type::Bool), (y, Type::Int)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;

        let interner = SharedInterner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let a = Type::Record(vec![(x, Type::Int), (y, Type::Bool)]);
        let b = Type::Record(vec![(y, Type::Bool), (x, Type::Int)]);

        let hash = |ty: &Type| {
            let mut hasher = DefaultHasher::new();
            ty.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_forall_bound_order_ignored() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");
        let show = interner.intern("Show");
        let eq = interner.intern("Eq");

        let t1 = Type::Forall {
            var: a,
            bounds: vec![show, eq],
            body: Box::new(Type::Var(a)),
        };
        let t2 = Type::Forall {
            var: a,
            bounds: vec![eq, show],
            body: Box::new(Type::Var(a)),
        };
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_display_arrow_parens() {
        let interner = SharedInterner::new();

        let curried = Type::arrow(Type::Int, Type::arrow(Type::Int, Type::Bool));
        assert_eq!(curried.display(&interner), "Int -> Int -> Bool");

        let higher_order = Type::arrow(Type::arrow(Type::Int, Type::Int), Type::Bool);
        assert_eq!(higher_order.display(&interner), "(Int -> Int) -> Bool");
    }

    #[test]
    fn test_display_forall_with_bounds() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");
        let show = interner.intern("Show");
        let eq = interner.intern("Eq");

        let ty = Type::Forall {
            var: a,
            bounds: vec![show, eq],
            body: Box::new(Type::arrow(Type::Var(a), Type::Var(a))),
        };
        assert_eq!(ty.display(&interner), "forall a impl Show+Eq. a -> a");

        let plain = Type::forall(a, Type::list(Type::Var(a)));
        assert_eq!(plain.display(&interner), "forall a. [a]");
    }

    #[test]
    fn test_display_record_preserves_order() {
        let interner = SharedInterner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let ty = Type::Record(vec![(y, Type::Int), (x, Type::Int)]);
        assert_eq!(ty.display(&interner), "{y: Int, x: Int}");
    }
}
