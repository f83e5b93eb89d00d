//! Typing environment.

use crate::Type;
use rustc_hash::FxHashMap;
use sable_ir::Name;

/// Typing environment mapping variables to types.
///
/// Lexical scopes form a parent chain: lambda and type-abstraction binders
/// check their bodies in a child scope, while top-level bindings extend the
/// outermost scope (later bindings shadow earlier ones).
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    /// Variable bindings in this scope.
    bindings: FxHashMap<Name, Type>,
    /// Parent scope, for nested scopes.
    parent: Option<Box<TypeEnv>>,
}

impl TypeEnv {
    /// Create a new empty environment.
    pub fn new() -> Self {
        TypeEnv::default()
    }

    /// Create a child scope.
    #[must_use]
    pub fn child(&self) -> Self {
        TypeEnv {
            bindings: FxHashMap::default(),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Bind a name in the current scope.
    pub fn bind(&mut self, name: Name, ty: Type) {
        self.bindings.insert(name, ty);
    }

    /// Look up a name, searching parent scopes.
    pub fn lookup(&self, name: Name) -> Option<&Type> {
        self.bindings
            .get(&name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Check if a name is bound in the current scope only.
    pub fn is_bound_locally(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }
}
