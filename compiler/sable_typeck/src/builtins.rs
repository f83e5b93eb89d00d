//! Types of the builtin environment.

use sable_ir::StringInterner;
use sable_types::{Builtin, Type, TypeEnv};

/// The Γ type of a builtin.
///
/// `read` is a `String` value rather than a function; referencing its name
/// performs the read. The list builtins are polymorphic and instantiate
/// like any other `forall`-typed value.
pub fn builtin_type(builtin: Builtin, interner: &StringInterner) -> Type {
    match builtin {
        Builtin::Print | Builtin::Println => Type::arrow(Type::Str, Type::Str),
        Builtin::Read => Type::Str,
        Builtin::StringToInt => Type::arrow(Type::Str, Type::Int),
        Builtin::IntToString => Type::arrow(Type::Int, Type::Str),
        Builtin::Cons => {
            let a = interner.intern("a");
            Type::forall(
                a,
                Type::arrow(
                    Type::Var(a),
                    Type::arrow(Type::list(Type::Var(a)), Type::list(Type::Var(a))),
                ),
            )
        }
        Builtin::Head => {
            let a = interner.intern("a");
            Type::forall(a, Type::arrow(Type::list(Type::Var(a)), Type::Var(a)))
        }
        Builtin::Tail => {
            let a = interner.intern("a");
            Type::forall(a, Type::arrow(Type::list(Type::Var(a)), Type::list(Type::Var(a))))
        }
    }
}

/// Seed a fresh Γ with the builtin bindings. Later bindings of the same
/// names, trait methods included, shadow these.
pub(crate) fn initial_env(interner: &StringInterner) -> TypeEnv {
    let mut env = TypeEnv::new();
    for builtin in Builtin::ALL {
        env.bind(interner.intern(builtin.name()), builtin_type(builtin, interner));
    }
    env
}
