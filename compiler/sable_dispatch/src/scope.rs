//! Lexical scope tracking for method-name resolution.
//!
//! Dispatch rewrites a method reference only while the name still means
//! the trait method. Three things can take the name away: a lambda
//! parameter, a type-abstraction binder, and a top-level rebinding. The
//! first two are a stack that follows the term walk; the last is
//! permanent for the rest of the program.

use rustc_hash::FxHashSet;
use sable_ir::Name;

/// One constrained type binder and the dictionary parameters inserted
/// for it, in declared bound order.
#[derive(Clone, Debug)]
pub(crate) struct Assumption {
    pub(crate) param: Name,
    /// `(trait, dictionary parameter)` pairs.
    pub(crate) dicts: Vec<(Name, Name)>,
}

/// The dispatcher's view of what each name currently means.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScopeStack {
    /// Lexical binders in scope, innermost last.
    binders: Vec<Name>,
    /// Constrained type binders in scope, innermost last. Unconstrained
    /// binders push an empty frame so inner frames mask outer ones.
    assumptions: Vec<Assumption>,
    /// Names permanently taken over by a top-level binding.
    rebound: FxHashSet<Name>,
}

impl ScopeStack {
    pub(crate) fn new() -> Self {
        ScopeStack::default()
    }

    pub(crate) fn push_binder(&mut self, name: Name) {
        self.binders.push(name);
    }

    pub(crate) fn pop_binder(&mut self) {
        self.binders.pop();
    }

    pub(crate) fn push_assumption(&mut self, param: Name, dicts: Vec<(Name, Name)>) {
        self.assumptions.push(Assumption { param, dicts });
    }

    pub(crate) fn pop_assumption(&mut self) {
        self.assumptions.pop();
    }

    /// Record a top-level binding. Later statements see the name as an
    /// ordinary variable even if a trait declared a method by it.
    pub(crate) fn rebind_top_level(&mut self, name: Name) {
        self.rebound.insert(name);
    }

    /// Check if a name no longer refers to its trait method here.
    pub(crate) fn is_shadowed(&self, name: Name) -> bool {
        self.rebound.contains(&name) || self.binders.contains(&name)
    }

    /// The dictionary parameter covering `trait_name` for the innermost
    /// binder of `param`, if that binder assumed it.
    pub(crate) fn dictionary_for(&self, param: Name, trait_name: Name) -> Option<Name> {
        let frame = self
            .assumptions
            .iter()
            .rev()
            .find(|assumption| assumption.param == param)?;
        frame
            .dicts
            .iter()
            .find(|(bound, _)| *bound == trait_name)
            .map(|(_, dict)| *dict)
    }
}
