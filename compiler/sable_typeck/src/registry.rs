//! Trait implementation registry.
//!
//! This is the Σ context: every validated impl, keyed by the pair of trait
//! name and concrete type. Registration enforces the exhaustiveness rule
//! (an impl provides exactly the trait's method labels, in any order) and
//! coherence (one impl per pair). Method bodies are not checked here; the
//! desugarer annotated each dictionary binding with its instantiated trait
//! table, so the checker validates bodies when it reaches that binding.

use rustc_hash::FxHashMap;
use sable_desugar::{PendingImpl, SignatureTable};
use sable_diagnostic::{Diagnostic, ErrorCode};
use sable_ir::{Name, Span, StringInterner};
use sable_types::Type;

/// A validated impl: where its dictionary lives.
#[derive(Clone, Debug)]
pub struct ImplEntry {
    pub trait_name: Name,
    pub self_ty: Type,
    /// The `__F_inst_k` binding holding the dictionary value.
    pub binding: Name,
    /// Span of the impl declaration.
    pub span: Span,
}

/// The Σ context: validated impls keyed by (trait, concrete type).
#[derive(Clone, Debug, Default)]
pub struct ImplRegistry {
    impls: FxHashMap<(Name, Type), ImplEntry>,
}

impl ImplRegistry {
    pub fn new() -> Self {
        ImplRegistry::default()
    }

    /// Validate a queued impl and record it.
    ///
    /// The provided method label set must equal the trait's label set
    /// exactly; a second impl for the same (trait, type) pair is rejected.
    /// On rejection the caller should also drop the impl's dictionary
    /// binding statement, since its annotation was built from the same
    /// mismatched table.
    pub fn register(
        &mut self,
        pending: &PendingImpl,
        signatures: &SignatureTable,
        interner: &StringInterner,
    ) -> Result<(), Diagnostic> {
        let Some(sig) = signatures.trait_sig(pending.trait_name) else {
            // The desugarer rejects impls of undeclared traits before
            // queueing them
            return Err(sable_diagnostic::internal_error(
                pending.span,
                format!(
                    "impl queued for undeclared trait `{}`",
                    interner.lookup(pending.trait_name)
                ),
            ));
        };

        let trait_str = interner.lookup(pending.trait_name);
        let ty_str = pending.self_ty.display(interner);

        let missing: Vec<Name> = sig
            .methods
            .iter()
            .map(|(method, _)| *method)
            .filter(|method| !pending.provided.iter().any(|(label, _)| label == method))
            .collect();
        let extra: Vec<(Name, Span)> = pending
            .provided
            .iter()
            .filter(|(label, _)| !sig.has_method(*label))
            .copied()
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            let mut diagnostic = Diagnostic::error(ErrorCode::E2003)
                .with_message(format!(
                    "impl of `{trait_str}` for `{ty_str}` does not match the trait"
                ))
                .with_label(pending.trait_span, "method set differs from the trait's")
                .with_note(format!(
                    "the trait requires `{}`",
                    sig.dictionary_at(&pending.self_ty, interner).display(interner)
                ));
            for method in &missing {
                diagnostic = diagnostic
                    .with_note(format!("missing method `{}`", interner.lookup(*method)));
            }
            for (method, span) in &extra {
                diagnostic = diagnostic.with_secondary_label(
                    *span,
                    format!("`{}` is not a method of `{trait_str}`", interner.lookup(*method)),
                );
            }
            return Err(diagnostic);
        }

        let key = (pending.trait_name, pending.self_ty.clone());
        if let Some(existing) = self.impls.get(&key) {
            return Err(Diagnostic::error(ErrorCode::E2004)
                .with_message(format!("duplicate impl of `{trait_str}` for `{ty_str}`"))
                .with_label(pending.span, "this trait is already implemented for this type")
                .with_secondary_label(existing.span, "first implemented here"));
        }

        tracing::trace!(
            trait_name = trait_str,
            ty = %ty_str,
            binding = interner.lookup(pending.binding),
            "registered impl"
        );
        self.impls.insert(
            key,
            ImplEntry {
                trait_name: pending.trait_name,
                self_ty: pending.self_ty.clone(),
                binding: pending.binding,
                span: pending.span,
            },
        );
        Ok(())
    }

    /// Check whether Σ has an impl of `trait_name` for `ty`.
    pub fn implements(&self, trait_name: Name, ty: &Type) -> bool {
        self.impls.contains_key(&(trait_name, ty.clone()))
    }

    /// The impl entry for a (trait, type) pair.
    pub fn lookup(&self, trait_name: Name, ty: &Type) -> Option<&ImplEntry> {
        self.impls.get(&(trait_name, ty.clone()))
    }

    /// Number of registered impls.
    pub fn len(&self) -> usize {
        self.impls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impls.is_empty()
    }
}
