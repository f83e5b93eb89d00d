//! Declaration signatures: struct layouts and trait method tables.
//!
//! This is the Δ context of the pipeline. The desugarer fills it while
//! walking declarations; the checker reads struct layouts for named-type
//! resolution and seeds Γ with trait-method schemes; the dispatcher uses
//! the method-to-trait index to recognize dispatchable names.

use rustc_hash::FxHashMap;
use sable_ir::{Name, Span, StringInterner};
use sable_types::{subst, Type};

/// A declared struct's record layout.
#[derive(Clone, Debug)]
pub struct StructLayout {
    pub name: Name,
    /// Fields in declaration order.
    pub fields: Vec<(Name, Type)>,
    /// Span of the declaration.
    pub span: Span,
}

/// A declared trait's method table.
#[derive(Clone, Debug)]
pub struct TraitSig {
    pub name: Name,
    /// The trait's single type parameter, free in the method types.
    pub ty_param: Name,
    /// Methods in declaration order; the type parameter appears as `Var`.
    pub methods: Vec<(Name, Type)>,
    /// Span of the declaration.
    pub span: Span,
}

impl TraitSig {
    /// The dictionary record type at a concrete type: every method type
    /// with the trait parameter substituted away.
    pub fn dictionary_at(&self, concrete: &Type, interner: &StringInterner) -> Type {
        Type::Record(
            self.methods
                .iter()
                .map(|(label, ty)| {
                    (*label, subst::substitute(ty, self.ty_param, concrete, interner))
                })
                .collect(),
        )
    }

    /// The scheme a method enters Γ with: `forall a impl F. Ui`.
    pub fn method_scheme(&self, method: Name) -> Option<Type> {
        self.methods
            .iter()
            .find(|(label, _)| *label == method)
            .map(|(_, ty)| Type::Forall {
                var: self.ty_param,
                bounds: vec![self.name],
                body: Box::new(ty.clone()),
            })
    }

    /// The trait's own type when named in type position:
    /// `forall a impl F. {methods}`.
    pub fn forall_dictionary(&self) -> Type {
        Type::Forall {
            var: self.ty_param,
            bounds: vec![self.name],
            body: Box::new(Type::Record(self.methods.clone())),
        }
    }

    /// Check if the trait declares a method with this label.
    pub fn has_method(&self, method: Name) -> bool {
        self.methods.iter().any(|(label, _)| *label == method)
    }
}

/// The signature context Δ: struct layouts and trait method tables,
/// plus an index from method name to declaring trait.
#[derive(Clone, Debug, Default)]
pub struct SignatureTable {
    structs: FxHashMap<Name, StructLayout>,
    traits: FxHashMap<Name, TraitSig>,
    /// Method name to declaring trait. A later trait redeclaring a method
    /// name takes the name over.
    method_traits: FxHashMap<Name, Name>,
}

impl SignatureTable {
    pub fn new() -> Self {
        SignatureTable::default()
    }

    /// Check if a name is already declared as a struct or trait.
    pub fn is_declared(&self, name: Name) -> bool {
        self.structs.contains_key(&name) || self.traits.contains_key(&name)
    }

    /// The span of an existing declaration, for duplicate reporting.
    pub fn declaration_span(&self, name: Name) -> Option<Span> {
        self.structs
            .get(&name)
            .map(|layout| layout.span)
            .or_else(|| self.traits.get(&name).map(|sig| sig.span))
    }

    /// Record a struct layout. The caller has already rejected duplicates.
    pub fn declare_struct(&mut self, layout: StructLayout) {
        self.structs.insert(layout.name, layout);
    }

    /// Record a trait signature and index its methods. The caller has
    /// already rejected duplicates.
    pub fn declare_trait(&mut self, sig: TraitSig) {
        for (method, _) in &sig.methods {
            self.method_traits.insert(*method, sig.name);
        }
        self.traits.insert(sig.name, sig);
    }

    /// Look up a struct's record layout.
    pub fn struct_layout(&self, name: Name) -> Option<&StructLayout> {
        self.structs.get(&name)
    }

    /// Look up a trait's method table.
    pub fn trait_sig(&self, name: Name) -> Option<&TraitSig> {
        self.traits.get(&name)
    }

    /// The trait a method name belongs to, if any.
    pub fn trait_of_method(&self, method: Name) -> Option<Name> {
        self.method_traits.get(&method).copied()
    }

    /// Iterate all declared traits, for Γ seeding.
    pub fn iter_traits(&self) -> impl Iterator<Item = &TraitSig> {
        self.traits.values()
    }

    /// Number of declared structs.
    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    /// Number of declared traits.
    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }
}
