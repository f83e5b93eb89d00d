//! Declaration rewriting.
//!
//! The three declaration forms leave no trace in the core term stream:
//!
//! - `struct S where l1: T1; ... end` records the layout in Δ and binds
//!   `S` to a curried constructor `\__x0: T1. ... {l1 = __x0, ...}`.
//! - `trait F a where f1: U1; ... end` records the method table in Δ;
//!   the methods reach Γ later, when the checker seeds itself from Δ.
//! - `impl F for S where f1 = e1; ... end` binds `__F_inst_k` to the
//!   dictionary record, annotated with `Δ[F]` instantiated at `S` so the
//!   checker validates every method body, and queues the impl for Σ
//!   registration.

use sable_diagnostic::{duplicate_declaration, unknown_declaration, Diagnostic};
use sable_ir::{FieldSig, ImplDecl, Name, Span, StructDecl, TraitDecl};
use sable_types::{CoreStmt, CoreStmtKind, Term, TermKind, Type};

use crate::signatures::{StructLayout, TraitSig};
use crate::{Desugarer, PendingImpl};

impl Desugarer<'_> {
    pub(crate) fn desugar_struct(
        &mut self,
        decl: &StructDecl,
        span: Span,
    ) -> Result<(), Diagnostic> {
        self.check_fresh_declaration(decl.name, span)?;
        let fields = self.lower_field_sigs(&decl.fields, None)?;

        let params: Vec<Name> = (0..fields.len())
            .map(|i| self.interner.intern(&format!("__x{i}")))
            .collect();
        let record = Term::new(
            TermKind::Record(
                fields
                    .iter()
                    .zip(&params)
                    .map(|((label, _), param)| {
                        (*label, Term::new(TermKind::Var(*param), span))
                    })
                    .collect(),
            ),
            span,
        );
        let constructor = fields.iter().zip(&params).rev().fold(
            record,
            |body, ((_, field_ty), param)| {
                Term::new(
                    TermKind::Lam {
                        param: *param,
                        param_ty: field_ty.clone(),
                        body: Box::new(body),
                    },
                    span,
                )
            },
        );

        self.signatures.declare_struct(StructLayout {
            name: decl.name,
            fields,
            span,
        });
        self.stmts.push(CoreStmt::new(
            CoreStmtKind::Bind {
                name: decl.name,
                value: constructor,
            },
            span,
        ));
        Ok(())
    }

    pub(crate) fn desugar_trait(
        &mut self,
        decl: &TraitDecl,
        span: Span,
    ) -> Result<(), Diagnostic> {
        self.check_fresh_declaration(decl.name, span)?;
        let methods = self.lower_field_sigs(&decl.methods, Some(decl.ty_param))?;

        self.signatures.declare_trait(TraitSig {
            name: decl.name,
            ty_param: decl.ty_param,
            methods,
            span,
        });
        Ok(())
    }

    pub(crate) fn desugar_impl(&mut self, decl: &ImplDecl, span: Span) -> Result<(), Diagnostic> {
        let Some(sig) = self.signatures.trait_sig(decl.trait_name).cloned() else {
            return Err(unknown_declaration(
                decl.trait_span,
                self.interner.lookup(decl.trait_name),
            ));
        };
        let self_ty = self.lower_type(&decl.self_ty)?;
        let dictionary_ty = sig.dictionary_at(&self_ty, self.interner);

        let mut fields = Vec::with_capacity(decl.methods.len());
        let mut provided = Vec::with_capacity(decl.methods.len());
        for bind in &decl.methods {
            fields.push((bind.label, self.lower_expr(&bind.value)?));
            provided.push((bind.label, bind.span));
        }
        let dictionary = Term::new(
            TermKind::Annot {
                term: Box::new(Term::new(TermKind::Record(fields), span)),
                ty: dictionary_ty,
            },
            span,
        );

        let binding = self.interner.intern(&format!(
            "__{}_inst_{}",
            self.interner.lookup(decl.trait_name),
            self.impl_count
        ));
        self.impl_count += 1;

        self.stmts.push(CoreStmt::new(
            CoreStmtKind::Bind {
                name: binding,
                value: dictionary,
            },
            span,
        ));
        self.pending_impls.push(PendingImpl {
            trait_name: decl.trait_name,
            trait_span: decl.trait_span,
            self_ty,
            binding,
            provided,
            span,
        });
        Ok(())
    }

    /// Reject a struct/trait name that is already taken, by a builtin type
    /// or an earlier declaration.
    fn check_fresh_declaration(&self, name: Name, span: Span) -> Result<(), Diagnostic> {
        if name == self.ty_int || name == self.ty_bool || name == self.ty_string {
            return Err(duplicate_declaration(span, self.interner.lookup(name))
                .with_note(format!(
                    "`{}` is a builtin type",
                    self.interner.lookup(name)
                )));
        }
        if let Some(existing) = self.signatures.declaration_span(name) {
            return Err(duplicate_declaration(span, self.interner.lookup(name))
                .with_secondary_label(existing, "first declared here"));
        }
        Ok(())
    }

    /// Lower a struct or trait body to a label/type table, with the trait's
    /// type parameter in scope when there is one.
    fn lower_field_sigs(
        &mut self,
        sigs: &[FieldSig],
        ty_param: Option<Name>,
    ) -> Result<Vec<(Name, Type)>, Diagnostic> {
        if let Some(param) = ty_param {
            self.bound_vars.push(param);
        }
        let mut table = Vec::with_capacity(sigs.len());
        let mut result = Ok(());
        for sig in sigs {
            match self.lower_type(&sig.ty) {
                Ok(ty) => table.push((sig.label, ty)),
                Err(diagnostic) => {
                    result = Err(diagnostic);
                    break;
                }
            }
        }
        if ty_param.is_some() {
            self.bound_vars.pop();
        }
        result.map(|()| table)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::{desugar, DesugarResult};
    use pretty_assertions::assert_eq;
    use sable_diagnostic::ErrorCode;
    use sable_ir::StringInterner;

    fn desugar_source(source: &str) -> (DesugarResult, StringInterner) {
        let interner = StringInterner::new();
        let tokens = sable_lexer::lex(source, &interner).unwrap();
        let parsed = sable_parse::parse(&tokens, &interner);
        assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
        let result = desugar(&parsed.program, &interner);
        (result, interner)
    }

    #[test]
    fn test_struct_becomes_layout_and_constructor() {
        let (result, interner) = desugar_source(
            "struct Point where x: Int; y: Bool; end",
        );
        assert!(result.diagnostics.is_empty());

        let point = interner.intern("Point");
        let layout = result.signatures.struct_layout(point).unwrap();
        assert_eq!(layout.fields.len(), 2);
        assert_eq!(layout.fields[0].1, Type::Int);
        assert_eq!(layout.fields[1].1, Type::Bool);

        // Point = \__x0: Int. \__x1: Bool. {x = __x0, y = __x1}
        assert_eq!(result.stmts.len(), 1);
        let CoreStmtKind::Bind { name, value } = &result.stmts[0].kind else {
            panic!("expected a binding");
        };
        assert_eq!(*name, point);
        let TermKind::Lam { param, param_ty, body } = &value.kind else {
            panic!("expected outer lambda, got {:?}", value.kind);
        };
        assert_eq!(interner.lookup(*param), "__x0");
        assert_eq!(*param_ty, Type::Int);
        let TermKind::Lam { body: inner, .. } = &body.kind else {
            panic!("expected inner lambda, got {:?}", body.kind);
        };
        let TermKind::Record(fields) = &inner.kind else {
            panic!("expected record body, got {:?}", inner.kind);
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[0].1.kind, TermKind::Var(v) if interner.lookup(v) == "__x0"));
    }

    #[test]
    fn test_empty_struct_constructor_is_bare_record() {
        let (result, interner) = desugar_source("struct Unit where end");
        assert!(result.diagnostics.is_empty());

        let CoreStmtKind::Bind { value, .. } = &result.stmts[0].kind else {
            panic!("expected a binding");
        };
        assert!(matches!(&value.kind, TermKind::Record(fields) if fields.is_empty()));
        let unit = interner.intern("Unit");
        assert!(result.signatures.struct_layout(unit).is_some());
    }

    #[test]
    fn test_trait_records_method_table_only() {
        let (result, interner) = desugar_source(
            "trait Show a where show: a -> String; end",
        );
        assert!(result.diagnostics.is_empty());
        // No core statement: methods reach the checker through Δ
        assert!(result.stmts.is_empty());

        let show_trait = result.signatures.trait_sig(interner.intern("Show")).unwrap();
        let a = interner.intern("a");
        assert_eq!(show_trait.ty_param, a);
        assert_eq!(
            show_trait.methods,
            vec![(interner.intern("show"), Type::arrow(Type::Var(a), Type::Str))]
        );
    }

    #[test]
    fn test_impl_emits_annotated_dictionary_binding() {
        let (result, interner) = desugar_source(
            "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end",
        );
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.stmts.len(), 1);
        assert_eq!(result.pending_impls.len(), 1);

        let CoreStmtKind::Bind { name, value } = &result.stmts[0].kind else {
            panic!("expected a binding");
        };
        assert_eq!(interner.lookup(*name), "__Show_inst_0");
        let TermKind::Annot { term, ty } = &value.kind else {
            panic!("expected annotated dictionary, got {:?}", value.kind);
        };
        assert!(matches!(term.kind, TermKind::Record(_)));
        assert_eq!(
            *ty,
            Type::Record(vec![(
                interner.intern("show"),
                Type::arrow(Type::Int, Type::Str)
            )])
        );

        let pending = &result.pending_impls[0];
        assert_eq!(pending.trait_name, interner.intern("Show"));
        assert_eq!(pending.self_ty, Type::Int);
        assert_eq!(interner.lookup(pending.binding), "__Show_inst_0");
    }

    #[test]
    fn test_impl_counter_is_program_wide() {
        let (result, interner) = desugar_source(
            "trait Show a where show: a -> String; end\n\
             trait Eq a where eq: a -> a -> Bool; end\n\
             impl Show for Int where show = int_to_string; end\n\
             impl Eq for Int where eq = f; end",
        );
        assert!(result.diagnostics.is_empty());
        assert_eq!(interner.lookup(result.pending_impls[0].binding), "__Show_inst_0");
        assert_eq!(interner.lookup(result.pending_impls[1].binding), "__Eq_inst_1");
    }

    #[test]
    fn test_impl_for_undeclared_trait_is_rejected() {
        let (result, _) = desugar_source(
            "impl Show for Int where show = int_to_string; end",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, ErrorCode::E2002);
        assert!(result.stmts.is_empty());
        assert!(result.pending_impls.is_empty());
    }

    #[test]
    fn test_duplicate_declaration_is_rejected() {
        let (result, _) = desugar_source(
            "struct Point where x: Int; end\n\
             trait Point a where get: a -> Int; end",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, ErrorCode::E2001);
        // The failed trait leaves no signature behind
        assert_eq!(result.signatures.trait_count(), 0);
    }

    #[test]
    fn test_builtin_type_names_are_reserved() {
        let (result, _) = desugar_source("struct Int where x: Int; end");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, ErrorCode::E2001);
        assert!(result.diagnostics[0].notes[0].contains("builtin"));
    }

    #[test]
    fn test_impl_self_type_may_be_compound() {
        let (result, _) = desugar_source(
            "trait Container a where first: a -> Int; end\n\
             impl Container for [Int] where first = f; end",
        );
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.pending_impls[0].self_ty, Type::list(Type::Int));
    }

    #[test]
    fn test_struct_field_may_reference_earlier_struct() {
        let (result, interner) = desugar_source(
            "struct Point where x: Int; end\n\
             struct Line where from: Point; to: Point; end",
        );
        assert!(result.diagnostics.is_empty());

        let line = result.signatures.struct_layout(interner.intern("Line")).unwrap();
        let x = interner.intern("x");
        assert_eq!(line.fields[0].1, Type::Record(vec![(x, Type::Int)]));
    }

    #[test]
    fn test_recursive_struct_field_is_unknown() {
        let (result, _) = desugar_source("struct S where next: S; end");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, ErrorCode::E2002);
    }
}
