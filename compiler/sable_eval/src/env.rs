//! Runtime environment.

use rustc_hash::FxHashMap;
use sable_ir::Name;
use sable_types::Term;

/// Global value environment.
///
/// Only top-level bindings live here; lambda parameters are eliminated by
/// substitution, so evaluation never needs nested scopes. Binding a name
/// again replaces the old value, which is how top-level rebinding shadows.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    values: FxHashMap<Name, Term>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Environment::default()
    }

    /// Bind a name to an evaluated value.
    pub fn bind(&mut self, name: Name, value: Term) {
        self.values.insert(name, value);
    }

    /// Look up a global binding.
    pub fn lookup(&self, name: Name) -> Option<&Term> {
        self.values.get(&name)
    }
}
