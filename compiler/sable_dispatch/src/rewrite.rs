//! Term rewriting from checked terms to dispatched terms.
//!
//! Three rewrites happen here, all driven by the bound sets the checker
//! left on type applications:
//!
//! - a live method reference `show @S` becomes a projection out of the
//!   dictionary for `(Show, S)`, either an impl's global binding or an
//!   enclosing dictionary parameter;
//! - a constrained type abstraction `\a impl F1+F2. body` becomes an
//!   unconstrained one whose body takes one dictionary parameter per
//!   bound, in declared order;
//! - every other type application carrying bounds receives the matching
//!   dictionary arguments right after the type argument.
//!
//! No types are reconstructed and nothing is re-checked; a dictionary
//! the registry cannot produce at this point is a pipeline defect and
//! comes back as an internal diagnostic.

use crate::scope::ScopeStack;
use crate::stack::ensure_sufficient_stack;
use sable_desugar::SignatureTable;
use sable_diagnostic::{internal_error, Diagnostic};
use sable_ir::{Name, Span, StringInterner};
use sable_typeck::ImplRegistry;
use sable_types::{CoreStmt, CoreStmtKind, Term, TermKind, Type};

/// Rewrites checked statements into dictionary-passing form.
///
/// One dispatcher serves a whole program: it remembers top-level
/// rebindings of method names, and its dictionary-parameter counter
/// keeps inserted names unique across statements.
pub struct Dispatcher<'a> {
    interner: &'a StringInterner,
    signatures: &'a SignatureTable,
    registry: &'a ImplRegistry,
    scope: ScopeStack,
    dict_count: u32,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        interner: &'a StringInterner,
        signatures: &'a SignatureTable,
        registry: &'a ImplRegistry,
    ) -> Self {
        Dispatcher {
            interner,
            signatures,
            registry,
            scope: ScopeStack::new(),
            dict_count: 0,
        }
    }

    /// Rewrite one checked statement.
    pub fn dispatch_stmt(&mut self, stmt: &CoreStmt) -> Result<CoreStmt, Diagnostic> {
        match &stmt.kind {
            CoreStmtKind::Bind { name, value } => {
                // The right-hand side still sees the outer meaning of
                // the bound name; the rebinding takes effect afterwards
                let value = self.rewrite(value)?;
                self.scope.rebind_top_level(*name);
                Ok(CoreStmt::new(
                    CoreStmtKind::Bind { name: *name, value },
                    stmt.span,
                ))
            }
            CoreStmtKind::Expr(term) => {
                let term = self.rewrite(term)?;
                Ok(CoreStmt::new(CoreStmtKind::Expr(term), stmt.span))
            }
        }
    }

    fn rewrite(&mut self, term: &Term) -> Result<Term, Diagnostic> {
        ensure_sufficient_stack(|| self.rewrite_inner(term))
    }

    fn rewrite_inner(&mut self, term: &Term) -> Result<Term, Diagnostic> {
        let span = term.span;
        match &term.kind {
            TermKind::Int(_)
            | TermKind::Bool(_)
            | TermKind::Str(_)
            | TermKind::Var(_)
            | TermKind::Builtin(_)
            | TermKind::Error => Ok(term.clone()),

            TermKind::Lam {
                param,
                param_ty,
                body,
            } => {
                self.scope.push_binder(*param);
                let body = self.rewrite(body);
                self.scope.pop_binder();
                Ok(Term::new(
                    TermKind::Lam {
                        param: *param,
                        param_ty: param_ty.clone(),
                        body: Box::new(body?),
                    },
                    span,
                ))
            }

            TermKind::TyLam {
                param,
                bounds,
                body,
            } => self.rewrite_ty_lam(*param, bounds, body, span),

            TermKind::App { func, arg } => {
                let func = self.rewrite(func)?;
                let arg = self.rewrite(arg)?;
                Ok(Term::new(
                    TermKind::App {
                        func: Box::new(func),
                        arg: Box::new(arg),
                    },
                    span,
                ))
            }

            TermKind::TyApp { func, arg, bounds } => {
                self.rewrite_ty_app(func, arg, bounds, span)
            }

            TermKind::Annot { term: inner, ty } => {
                let inner = self.rewrite(inner)?;
                Ok(Term::new(
                    TermKind::Annot {
                        term: Box::new(inner),
                        ty: ty.clone(),
                    },
                    span,
                ))
            }

            TermKind::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.rewrite(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::new(TermKind::List(items), span))
            }

            TermKind::Record(fields) => {
                let fields = fields
                    .iter()
                    .map(|(label, value)| Ok((*label, self.rewrite(value)?)))
                    .collect::<Result<Vec<_>, Diagnostic>>()?;
                Ok(Term::new(TermKind::Record(fields), span))
            }

            TermKind::Proj { base, label } => {
                let base = self.rewrite(base)?;
                Ok(Term::new(
                    TermKind::Proj {
                        base: Box::new(base),
                        label: *label,
                    },
                    span,
                ))
            }

            TermKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.rewrite(cond)?;
                let then_branch = self.rewrite(then_branch)?;
                let else_branch = self.rewrite(else_branch)?;
                Ok(Term::new(
                    TermKind::If {
                        cond: Box::new(cond),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(else_branch),
                    },
                    span,
                ))
            }

            TermKind::Binary { op, left, right } => {
                let left = self.rewrite(left)?;
                let right = self.rewrite(right)?;
                Ok(Term::new(
                    TermKind::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }

            TermKind::Unary { op, operand } => {
                let operand = self.rewrite(operand)?;
                Ok(Term::new(
                    TermKind::Unary {
                        op: *op,
                        operand: Box::new(operand),
                    },
                    span,
                ))
            }
        }
    }

    /// `\a impl F1+F2. body` elaborates to
    /// `\a. \d1:R1. \d2:R2. body'` with `Ri` the dictionary record of
    /// `Fi` at `a`. Inside `body'`, methods instantiated at `a` project
    /// from `d1`/`d2`.
    fn rewrite_ty_lam(
        &mut self,
        param: Name,
        bounds: &[Name],
        body: &Term,
        span: Span,
    ) -> Result<Term, Diagnostic> {
        let dicts: Vec<(Name, Name)> = bounds
            .iter()
            .map(|&bound| (bound, self.fresh_dict_name(bound)))
            .collect();

        // The binder shadows any method of the same name in the body
        self.scope.push_binder(param);
        self.scope.push_assumption(param, dicts.clone());
        let body = self.rewrite(body);
        self.scope.pop_assumption();
        self.scope.pop_binder();
        let mut body = body?;

        for &(bound, dict_name) in dicts.iter().rev() {
            let Some(sig) = self.signatures.trait_sig(bound) else {
                return Err(internal_error(
                    span,
                    format!(
                        "bound `{}` names no declared trait",
                        self.interner.lookup(bound)
                    ),
                ));
            };
            let param_ty = sig.dictionary_at(&Type::Var(param), self.interner);
            body = Term::new(
                TermKind::Lam {
                    param: dict_name,
                    param_ty,
                    body: Box::new(body),
                },
                span,
            );
        }

        Ok(Term::new(
            TermKind::TyLam {
                param,
                bounds: Vec::new(),
                body: Box::new(body),
            },
            span,
        ))
    }

    fn rewrite_ty_app(
        &mut self,
        func: &Term,
        arg: &Type,
        bounds: &[Name],
        span: Span,
    ) -> Result<Term, Diagnostic> {
        // A live method reference resolves through its dictionary; the
        // projection replaces the dictionary-argument insertion below
        if let Some((method, trait_name)) = self.live_method(func) {
            let dict = self.dictionary_argument(trait_name, arg, func.span)?;
            tracing::trace!(
                method = self.interner.lookup(method),
                ty = %arg.display(self.interner),
                "dispatched method reference"
            );
            let proj = Term::new(
                TermKind::Proj {
                    base: Box::new(dict),
                    label: method,
                },
                func.span,
            );
            return Ok(Term::new(
                TermKind::TyApp {
                    func: Box::new(proj),
                    arg: arg.clone(),
                    bounds: Vec::new(),
                },
                span,
            ));
        }

        let func = self.rewrite(func)?;
        let mut term = Term::new(
            TermKind::TyApp {
                func: Box::new(func),
                arg: arg.clone(),
                bounds: Vec::new(),
            },
            span,
        );
        for &bound in bounds {
            let dict = self.dictionary_argument(bound, arg, span)?;
            term = Term::new(
                TermKind::App {
                    func: Box::new(term),
                    arg: Box::new(dict),
                },
                span,
            );
        }
        Ok(term)
    }

    /// The dictionary covering `bound` at `arg`: an enclosing dictionary
    /// parameter when `arg` is an assumed type variable, otherwise the
    /// registered impl's global binding.
    fn dictionary_argument(
        &self,
        bound: Name,
        arg: &Type,
        span: Span,
    ) -> Result<Term, Diagnostic> {
        if let Type::Var(param) = arg {
            if let Some(dict_param) = self.scope.dictionary_for(*param, bound) {
                return Ok(Term::new(TermKind::Var(dict_param), span));
            }
        }
        match self.registry.lookup(bound, arg) {
            Some(entry) => Ok(Term::new(TermKind::Var(entry.binding), span)),
            None => Err(internal_error(
                span,
                format!(
                    "no impl of `{}` for `{}` survived checking",
                    self.interner.lookup(bound),
                    arg.display(self.interner)
                ),
            )),
        }
    }

    /// The method name and its trait, when `func` is a variable that
    /// still refers to a trait method here.
    fn live_method(&self, func: &Term) -> Option<(Name, Name)> {
        let TermKind::Var(name) = &func.kind else {
            return None;
        };
        if self.scope.is_shadowed(*name) {
            return None;
        }
        let trait_name = self.signatures.trait_of_method(*name)?;
        Some((*name, trait_name))
    }

    fn fresh_dict_name(&mut self, bound: Name) -> Name {
        let name = format!(
            "__{}_dict_{}",
            self.interner.lookup(bound),
            self.dict_count
        );
        self.dict_count += 1;
        self.interner.intern(&name)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_diagnostic::ErrorCode;
    use sable_typeck::Checker;

    /// Run the pipeline through checking, then dispatch; returns the
    /// checked statements alongside the dispatched ones.
    fn run_pipeline(source: &str) -> (Vec<CoreStmt>, Vec<CoreStmt>, StringInterner) {
        let interner = StringInterner::new();
        let tokens = sable_lexer::lex(source, &interner).unwrap();
        let parsed = sable_parse::parse(&tokens, &interner);
        assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
        let desugared = sable_desugar::desugar(&parsed.program, &interner);
        assert!(
            desugared.diagnostics.is_empty(),
            "desugar errors: {:?}",
            desugared.diagnostics
        );

        let mut registry = ImplRegistry::new();
        for pending in &desugared.pending_impls {
            registry
                .register(pending, &desugared.signatures, &interner)
                .unwrap();
        }

        let mut checker = Checker::new(&interner, &desugared.signatures, &registry);
        let mut dispatcher = Dispatcher::new(&interner, &desugared.signatures, &registry);

        let mut checked = Vec::new();
        let mut dispatched = Vec::new();
        for stmt in &desugared.stmts {
            let stmt = checker.check_stmt(stmt).unwrap().stmt;
            dispatched.push(dispatcher.dispatch_stmt(&stmt).unwrap());
            checked.push(stmt);
        }
        (checked, dispatched, interner)
    }

    fn dispatch_source(source: &str) -> (Vec<CoreStmt>, StringInterner) {
        let (_, dispatched, interner) = run_pipeline(source);
        (dispatched, interner)
    }

    fn expr_of(stmt: &CoreStmt) -> &Term {
        match &stmt.kind {
            CoreStmtKind::Expr(term) => term,
            CoreStmtKind::Bind { .. } => panic!("expected expression statement"),
        }
    }

    fn bound_value(stmt: &CoreStmt) -> &Term {
        match &stmt.kind {
            CoreStmtKind::Bind { value, .. } => value,
            CoreStmtKind::Expr(_) => panic!("expected binding statement"),
        }
    }

    const SHOW_PRELUDE: &str = "trait Show a where show: a -> String; end\n\
         impl Show for Int where show = int_to_string; end\n";

    #[test]
    fn test_method_call_projects_from_the_impl_dictionary() {
        let (stmts, interner) = dispatch_source(&format!("{SHOW_PRELUDE}show 1;"));

        let TermKind::App { func, arg } = &expr_of(&stmts[1]).kind else {
            panic!("expected application");
        };
        assert_eq!(arg.kind, TermKind::Int(1));
        let TermKind::TyApp { func, arg, bounds } = &func.kind else {
            panic!("expected type application, got {:?}", func.kind);
        };
        assert_eq!(*arg, Type::Int);
        assert!(bounds.is_empty(), "bounds should be discharged");
        let TermKind::Proj { base, label } = &func.kind else {
            panic!("expected dictionary projection, got {:?}", func.kind);
        };
        assert_eq!(*label, interner.intern("show"));
        assert_eq!(base.kind, TermKind::Var(interner.intern("__Show_inst_0")));
    }

    #[test]
    fn test_explicit_method_instantiation() {
        let (stmts, interner) = dispatch_source(&format!("{SHOW_PRELUDE}show @Int;"));

        let TermKind::TyApp { func, .. } = &expr_of(&stmts[1]).kind else {
            panic!("expected type application");
        };
        let TermKind::Proj { base, .. } = &func.kind else {
            panic!("expected dictionary projection, got {:?}", func.kind);
        };
        assert_eq!(base.kind, TermKind::Var(interner.intern("__Show_inst_0")));
    }

    #[test]
    fn test_constrained_abstraction_inserts_dictionary_parameters() {
        let (stmts, interner) = dispatch_source(&format!(
            "{SHOW_PRELUDE}show_twice = \\T impl Show. \\x:T. (show x) + (show x);"
        ));
        let t = interner.intern("T");
        let dict = interner.intern("__Show_dict_0");

        let TermKind::TyLam {
            param,
            bounds,
            body,
        } = &bound_value(&stmts[1]).kind
        else {
            panic!("expected type abstraction");
        };
        assert_eq!(*param, t);
        assert!(bounds.is_empty(), "bounds should be discharged");

        let TermKind::Lam {
            param, param_ty, ..
        } = &body.kind
        else {
            panic!("expected inserted dictionary lambda, got {:?}", body.kind);
        };
        assert_eq!(*param, dict);
        assert_eq!(
            *param_ty,
            Type::Record(vec![(
                interner.intern("show"),
                Type::arrow(Type::Var(t), Type::Str),
            )])
        );

        // The method calls inside project from the inserted parameter
        let TermKind::Lam { body, .. } = &body.kind else {
            panic!("expected dictionary lambda");
        };
        let TermKind::Lam { body, .. } = &body.kind else {
            panic!("expected the original value lambda, got {:?}", body.kind);
        };
        let TermKind::Binary { left, .. } = &body.kind else {
            panic!("expected the original sum, got {:?}", body.kind);
        };
        let TermKind::App { func, .. } = &left.kind else {
            panic!("expected method application");
        };
        let TermKind::TyApp { func, arg, .. } = &func.kind else {
            panic!("expected type application");
        };
        assert_eq!(*arg, Type::Var(t));
        let TermKind::Proj { base, .. } = &func.kind else {
            panic!("expected projection from the dictionary parameter");
        };
        assert_eq!(base.kind, TermKind::Var(dict));
    }

    #[test]
    fn test_generic_call_receives_dictionary_arguments() {
        let (stmts, interner) = dispatch_source(&format!(
            "{SHOW_PRELUDE}show_twice = \\T impl Show. \\x:T. (show x) + (show x);\n\
             show_twice 1;"
        ));

        let TermKind::App { func, arg } = &expr_of(&stmts[2]).kind else {
            panic!("expected application");
        };
        assert_eq!(arg.kind, TermKind::Int(1));

        // The dictionary argument sits between the type argument and the
        // value argument
        let TermKind::App { func, arg } = &func.kind else {
            panic!("expected dictionary application, got {:?}", func.kind);
        };
        assert_eq!(arg.kind, TermKind::Var(interner.intern("__Show_inst_0")));
        let TermKind::TyApp { func, arg, bounds } = &func.kind else {
            panic!("expected type application, got {:?}", func.kind);
        };
        assert_eq!(*arg, Type::Int);
        assert!(bounds.is_empty());
        assert_eq!(func.kind, TermKind::Var(interner.intern("show_twice")));
    }

    #[test]
    fn test_assumed_dictionary_flows_to_generic_calls() {
        let (stmts, interner) = dispatch_source(&format!(
            "{SHOW_PRELUDE}show_twice = \\T impl Show. \\x:T. (show x) + (show x);\n\
             wrap = \\T impl Show. \\x:T. show_twice x;"
        ));
        let t = interner.intern("T");

        let TermKind::TyLam { body, .. } = &bound_value(&stmts[2]).kind else {
            panic!("expected type abstraction");
        };
        let TermKind::Lam { param, body, .. } = &body.kind else {
            panic!("expected dictionary lambda");
        };
        // Second inserted dictionary overall, so the counter reads 1
        assert_eq!(*param, interner.intern("__Show_dict_1"));
        let TermKind::Lam { body, .. } = &body.kind else {
            panic!("expected value lambda");
        };
        let TermKind::App { func, .. } = &body.kind else {
            panic!("expected application");
        };
        let TermKind::App { func, arg } = &func.kind else {
            panic!("expected dictionary application, got {:?}", func.kind);
        };
        assert_eq!(arg.kind, TermKind::Var(interner.intern("__Show_dict_1")));
        let TermKind::TyApp { func, arg, .. } = &func.kind else {
            panic!("expected type application");
        };
        assert_eq!(*arg, Type::Var(t));
        assert_eq!(func.kind, TermKind::Var(interner.intern("show_twice")));
    }

    #[test]
    fn test_multiple_bounds_in_declared_order() {
        let source = "trait Show a where show: a -> String; end\n\
                      trait Hash a where hash: a -> Int; end\n\
                      impl Show for Int where show = int_to_string; end\n\
                      impl Hash for Int where hash = \\x:Int. x; end\n\
                      f = \\T impl Show+Hash. \\x:T. hash x;\n\
                      f 1;";
        let (stmts, interner) = dispatch_source(source);

        // Two dictionary parameters, Show first
        let TermKind::TyLam { body, .. } = &bound_value(&stmts[2]).kind else {
            panic!("expected type abstraction");
        };
        let TermKind::Lam { param, body, .. } = &body.kind else {
            panic!("expected first dictionary lambda");
        };
        assert_eq!(*param, interner.intern("__Show_dict_0"));
        let TermKind::Lam { param, .. } = &body.kind else {
            panic!("expected second dictionary lambda");
        };
        assert_eq!(*param, interner.intern("__Hash_dict_1"));

        // Call site passes both dictionaries in the same order
        let TermKind::App { func, .. } = &expr_of(&stmts[3]).kind else {
            panic!("expected application");
        };
        let TermKind::App { func, arg } = &func.kind else {
            panic!("expected second dictionary application");
        };
        assert_eq!(arg.kind, TermKind::Var(interner.intern("__Hash_inst_1")));
        let TermKind::App { func, arg } = &func.kind else {
            panic!("expected first dictionary application");
        };
        assert_eq!(arg.kind, TermKind::Var(interner.intern("__Show_inst_0")));
        let TermKind::TyApp { .. } = &func.kind else {
            panic!("expected type application, got {:?}", func.kind);
        };
    }

    #[test]
    fn test_method_dispatch_inside_dictionary_values() {
        let source = "trait Show a where show: a -> String; end\n\
                      impl Show for Int where show = int_to_string; end\n\
                      impl Show for Bool where show = \\b:Bool. show 1; end";
        let (stmts, interner) = dispatch_source(source);

        let TermKind::Annot { term, .. } = &bound_value(&stmts[1]).kind else {
            panic!("expected annotated dictionary");
        };
        let TermKind::Record(fields) = &term.kind else {
            panic!("expected dictionary record");
        };
        let TermKind::Lam { body, .. } = &fields[0].1.kind else {
            panic!("expected method lambda");
        };
        let TermKind::App { func, .. } = &body.kind else {
            panic!("expected application");
        };
        let TermKind::TyApp { func, .. } = &func.kind else {
            panic!("expected type application");
        };
        let TermKind::Proj { base, .. } = &func.kind else {
            panic!("expected projection, got {:?}", func.kind);
        };
        assert_eq!(base.kind, TermKind::Var(interner.intern("__Show_inst_0")));
    }

    #[test]
    fn test_top_level_rebinding_makes_method_ordinary() {
        let source = format!(
            "{SHOW_PRELUDE}show = \\T. \\x:T. \"custom\";\n\
             show @Int 1;"
        );
        let (stmts, interner) = dispatch_source(&source);

        let TermKind::App { func, .. } = &expr_of(&stmts[2]).kind else {
            panic!("expected application");
        };
        let TermKind::TyApp { func, .. } = &func.kind else {
            panic!("expected type application");
        };
        assert_eq!(func.kind, TermKind::Var(interner.intern("show")));
    }

    #[test]
    fn test_lambda_parameter_shadows_method() {
        // The parameter is typed by the trait name, so instantiating it
        // still takes a dictionary argument, but the callee stays a
        // plain variable
        let source = format!("{SHOW_PRELUDE}f = \\show:Show. show @Int;");
        let (stmts, interner) = dispatch_source(&source);

        let TermKind::Lam { body, .. } = &bound_value(&stmts[1]).kind else {
            panic!("expected lambda");
        };
        let TermKind::App { func, arg } = &body.kind else {
            panic!("expected dictionary application, got {:?}", body.kind);
        };
        assert_eq!(arg.kind, TermKind::Var(interner.intern("__Show_inst_0")));
        let TermKind::TyApp { func, .. } = &func.kind else {
            panic!("expected type application");
        };
        assert_eq!(func.kind, TermKind::Var(interner.intern("show")));
    }

    #[test]
    fn test_type_binder_shadows_method() {
        let source = format!("{SHOW_PRELUDE}f = \\show. show @Int;");
        let (stmts, interner) = dispatch_source(&source);

        let TermKind::TyLam { body, .. } = &bound_value(&stmts[1]).kind else {
            panic!("expected type abstraction");
        };
        let TermKind::App { func, .. } = &body.kind else {
            panic!("expected dictionary application, got {:?}", body.kind);
        };
        let TermKind::TyApp { func, .. } = &func.kind else {
            panic!("expected type application");
        };
        assert_eq!(func.kind, TermKind::Var(interner.intern("show")));
    }

    #[test]
    fn test_unconstrained_programs_pass_through_unchanged() {
        let (checked, dispatched, _interner) = run_pipeline(
            "id = \\T. \\x:T. x;\n\
             id false;\n\
             xs = cons 1 [2, 3];\n\
             {x = head xs, rest = tail xs};",
        );
        assert_eq!(checked, dispatched);
    }

    #[test]
    fn test_missing_impl_is_an_internal_error() {
        let interner = StringInterner::new();
        let tokens =
            sable_lexer::lex("trait Show a where show: a -> String; end", &interner).unwrap();
        let parsed = sable_parse::parse(&tokens, &interner);
        let desugared = sable_desugar::desugar(&parsed.program, &interner);
        let registry = ImplRegistry::new();
        let mut dispatcher = Dispatcher::new(&interner, &desugared.signatures, &registry);

        let stmt = CoreStmt::new(
            CoreStmtKind::Expr(Term::new(
                TermKind::TyApp {
                    func: Box::new(Term::new(
                        TermKind::Var(interner.intern("show")),
                        Span::new(0, 4),
                    )),
                    arg: Type::Int,
                    bounds: vec![interner.intern("Show")],
                },
                Span::new(0, 9),
            )),
            Span::new(0, 10),
        );

        let err = dispatcher.dispatch_stmt(&stmt).unwrap_err();
        assert_eq!(err.code, ErrorCode::E9001);
        assert!(err.message.contains("no impl of `Show` for `Int`"));
    }
}
