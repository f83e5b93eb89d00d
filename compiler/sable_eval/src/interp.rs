//! The evaluator.
//!
//! Call-by-value reduction over core terms: an application evaluates the
//! function, then the argument, then β-reduces by substitution. Types are
//! erased; a type application evaluates its callee and, when that is a
//! type abstraction, evaluates the body at that point, which is when any
//! effects inside it fire. Top-level bindings reduce fully before they
//! enter the global environment, and later statements look them up by
//! name when they evaluate.

use crate::builtins::apply_builtin;
use crate::env::Environment;
use crate::error::{EvalResult, RuntimeError, RuntimeErrorKind};
use crate::io::SharedIo;
use crate::stack::ensure_sufficient_stack;
use crate::subst;
use sable_ir::{BinaryOp, Name, Span, StringInterner, UnaryOp};
use sable_types::{Builtin, CoreStmt, CoreStmtKind, Term, TermKind};

/// The outcome of evaluating one statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EvaluatedStmt {
    /// The fully reduced value.
    pub value: Term,
    /// The bound name, for binding statements.
    pub name: Option<Name>,
}

/// Statement-by-statement evaluator.
///
/// Holds the global environment across statements; lambda parameters are
/// handled by substitution and never enter it. The environment starts
/// with the builtins under their source names, so a program can rebind
/// `head` like any other name.
pub struct Evaluator<'a> {
    interner: &'a StringInterner,
    io: SharedIo,
    globals: Environment,
}

impl<'a> Evaluator<'a> {
    pub fn new(interner: &'a StringInterner, io: SharedIo) -> Self {
        let mut globals = Environment::new();
        for builtin in Builtin::ALL {
            globals.bind(
                interner.intern(builtin.name()),
                Term::new(TermKind::Builtin(builtin), Span::DUMMY),
            );
        }
        Evaluator {
            interner,
            io,
            globals,
        }
    }

    /// Evaluate one statement. A binding extends the global environment
    /// only after its right-hand side has fully reduced.
    pub fn eval_stmt(&mut self, stmt: &CoreStmt) -> Result<EvaluatedStmt, RuntimeError> {
        match &stmt.kind {
            CoreStmtKind::Bind { name, value } => {
                let value = self.eval(value)?;
                self.globals.bind(*name, value.clone());
                tracing::trace!(
                    name = self.interner.lookup(*name),
                    "bound top-level value"
                );
                Ok(EvaluatedStmt {
                    value,
                    name: Some(*name),
                })
            }
            CoreStmtKind::Expr(term) => {
                let value = self.eval(term)?;
                Ok(EvaluatedStmt { value, name: None })
            }
        }
    }

    fn eval(&self, term: &Term) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(term))
    }

    fn eval_inner(&self, term: &Term) -> EvalResult {
        match &term.kind {
            TermKind::Int(_)
            | TermKind::Bool(_)
            | TermKind::Str(_)
            | TermKind::Lam { .. }
            | TermKind::TyLam { .. }
            | TermKind::Error => Ok(term.clone()),

            // `read` fires on every reference to its name
            TermKind::Builtin(Builtin::Read) => {
                let line = self.io.read_line();
                Ok(Term::new(TermKind::Str(self.interner.intern(&line)), term.span))
            }
            TermKind::Builtin(_) => Ok(term.clone()),

            TermKind::Var(name) => match self.globals.lookup(*name) {
                Some(value) => {
                    // A name still bound to `read` fires on every reference
                    if matches!(value.kind, TermKind::Builtin(Builtin::Read)) {
                        let line = self.io.read_line();
                        return Ok(Term::new(
                            TermKind::Str(self.interner.intern(&line)),
                            term.span,
                        ));
                    }
                    Ok(value.clone())
                }
                None => Err(RuntimeError::new(
                    RuntimeErrorKind::UnboundName {
                        name: self.interner.lookup(*name).to_string(),
                    },
                    term.span,
                )),
            },

            TermKind::App { func, arg } => {
                let func_val = self.eval(func)?;
                let arg_val = self.eval(arg)?;
                self.apply(func_val, arg_val, term.span)
            }

            TermKind::TyApp { func, .. } => {
                let func_val = self.eval(func)?;
                match func_val.kind {
                    TermKind::TyLam { body, .. } => self.eval(&body),
                    // Builtins and `Error` simply shed the instantiation
                    _ => Ok(func_val),
                }
            }

            TermKind::Annot { term: inner, .. } => self.eval(inner),

            TermKind::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item)?);
                }
                Ok(Term::new(TermKind::List(values), term.span))
            }

            TermKind::Record(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                for (label, value) in fields {
                    values.push((*label, self.eval(value)?));
                }
                Ok(Term::new(TermKind::Record(values), term.span))
            }

            TermKind::Proj { base, label } => {
                let base_val = self.eval(base)?;
                match &base_val.kind {
                    TermKind::Error => Ok(Term::new(TermKind::Error, term.span)),
                    TermKind::Record(fields) => {
                        match fields.iter().find(|(l, _)| l == label) {
                            Some((_, value)) => Ok(value.clone()),
                            None => stuck(
                                format!(
                                    "no field `{}` in the record",
                                    self.interner.lookup(*label)
                                ),
                                term.span,
                            ),
                        }
                    }
                    _ => stuck(
                        "projecting from a value that is not a record".to_string(),
                        term.span,
                    ),
                }
            }

            TermKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_val = self.eval(cond)?;
                match cond_val.kind {
                    TermKind::Bool(true) => self.eval(then_branch),
                    TermKind::Bool(false) => self.eval(else_branch),
                    TermKind::Error => Ok(Term::new(TermKind::Error, term.span)),
                    _ => stuck(
                        "branching on a value that is not a boolean".to_string(),
                        term.span,
                    ),
                }
            }

            TermKind::Binary { op, left, right } => {
                self.eval_binary(*op, left, right, term.span)
            }

            TermKind::Unary { op, operand } => {
                let operand_val = self.eval(operand)?;
                let kind = match (op, &operand_val.kind) {
                    (_, TermKind::Error) => TermKind::Error,
                    (UnaryOp::Neg, TermKind::Int(value)) => TermKind::Int(value.wrapping_neg()),
                    (UnaryOp::Not, TermKind::Bool(value)) => TermKind::Bool(!value),
                    _ => {
                        return stuck(
                            format!("`{op}` applied to an incompatible value"),
                            term.span,
                        )
                    }
                };
                Ok(Term::new(kind, term.span))
            }
        }
    }

    fn apply(&self, func: Term, arg: Term, span: Span) -> EvalResult {
        let func_span = func.span;
        match func.kind {
            TermKind::Lam { param, body, .. } => {
                let reduced = subst::substitute(&body, param, &arg, self.interner);
                self.eval(&reduced)
            }
            // `cons` waits for its second argument; the partial
            // application is itself a value
            TermKind::Builtin(Builtin::Cons) => Ok(Term::new(
                TermKind::App {
                    func: Box::new(Term::new(TermKind::Builtin(Builtin::Cons), func_span)),
                    arg: Box::new(arg),
                },
                span,
            )),
            TermKind::Builtin(builtin) => {
                apply_builtin(builtin, &[arg], span, self.io.as_ref(), self.interner)
            }
            TermKind::App {
                func: inner,
                arg: first,
            } if matches!(inner.kind, TermKind::Builtin(Builtin::Cons)) => {
                apply_builtin(
                    Builtin::Cons,
                    &[*first, arg],
                    span,
                    self.io.as_ref(),
                    self.interner,
                )
            }
            TermKind::Error => Ok(Term::new(TermKind::Error, span)),
            _ => stuck("applying a value that is not a function".to_string(), span),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        left: &Term,
        right: &Term,
        span: Span,
    ) -> EvalResult {
        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            return self.eval_logical(op, left, right, span);
        }

        let left_val = self.eval(left)?;
        let right_val = self.eval(right)?;
        if matches!(left_val.kind, TermKind::Error)
            || matches!(right_val.kind, TermKind::Error)
        {
            return Ok(Term::new(TermKind::Error, span));
        }

        // Overflow wraps; only a zero divisor is a runtime error
        let kind = match (op, &left_val.kind, &right_val.kind) {
            (BinaryOp::Add, TermKind::Int(a), TermKind::Int(b)) => {
                TermKind::Int(a.wrapping_add(*b))
            }
            (BinaryOp::Add, TermKind::Str(a), TermKind::Str(b)) => {
                let joined = format!(
                    "{}{}",
                    self.interner.lookup(*a),
                    self.interner.lookup(*b)
                );
                TermKind::Str(self.interner.intern(&joined))
            }
            (BinaryOp::Sub, TermKind::Int(a), TermKind::Int(b)) => {
                TermKind::Int(a.wrapping_sub(*b))
            }
            (BinaryOp::Mul, TermKind::Int(a), TermKind::Int(b)) => {
                TermKind::Int(a.wrapping_mul(*b))
            }
            (BinaryOp::Div, TermKind::Int(a), TermKind::Int(b)) => {
                if *b == 0 {
                    return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, span));
                }
                TermKind::Int(a.wrapping_div(*b))
            }
            (BinaryOp::Lt, TermKind::Int(a), TermKind::Int(b)) => TermKind::Bool(a < b),
            (BinaryOp::LtEq, TermKind::Int(a), TermKind::Int(b)) => TermKind::Bool(a <= b),
            (BinaryOp::Gt, TermKind::Int(a), TermKind::Int(b)) => TermKind::Bool(a > b),
            (BinaryOp::GtEq, TermKind::Int(a), TermKind::Int(b)) => TermKind::Bool(a >= b),
            (BinaryOp::Eq, _, _) => TermKind::Bool(value_eq(&left_val, &right_val)),
            (BinaryOp::NotEq, _, _) => TermKind::Bool(!value_eq(&left_val, &right_val)),
            _ => {
                return stuck(format!("`{op}` applied to incompatible values"), span);
            }
        };
        Ok(Term::new(kind, span))
    }

    /// `and` and `or` evaluate the right operand only when the left does
    /// not already decide the result.
    fn eval_logical(
        &self,
        op: BinaryOp,
        left: &Term,
        right: &Term,
        span: Span,
    ) -> EvalResult {
        let left_val = self.eval(left)?;
        match left_val.kind {
            TermKind::Error => return Ok(Term::new(TermKind::Error, span)),
            TermKind::Bool(false) if op == BinaryOp::And => {
                return Ok(Term::new(TermKind::Bool(false), span));
            }
            TermKind::Bool(true) if op == BinaryOp::Or => {
                return Ok(Term::new(TermKind::Bool(true), span));
            }
            TermKind::Bool(_) => {}
            _ => {
                return stuck(
                    format!("`{op}` applied to an incompatible value"),
                    span,
                );
            }
        }

        let right_val = self.eval(right)?;
        match right_val.kind {
            TermKind::Error => Ok(Term::new(TermKind::Error, span)),
            TermKind::Bool(value) => Ok(Term::new(TermKind::Bool(value), span)),
            _ => stuck(format!("`{op}` applied to an incompatible value"), span),
        }
    }
}

/// Structural equality over evaluated terms, ignoring spans.
///
/// Record fields compare by label, not position. Closures compare node by
/// node, binder names included, so two lambdas are equal exactly when
/// their code is.
pub(crate) fn value_eq(a: &Term, b: &Term) -> bool {
    match (&a.kind, &b.kind) {
        (TermKind::Int(x), TermKind::Int(y)) => x == y,
        (TermKind::Bool(x), TermKind::Bool(y)) => x == y,
        (TermKind::Str(x), TermKind::Str(y)) | (TermKind::Var(x), TermKind::Var(y)) => x == y,
        (TermKind::Builtin(x), TermKind::Builtin(y)) => x == y,
        (TermKind::Error, TermKind::Error) => true,
        (TermKind::List(xs), TermKind::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| value_eq(x, y))
        }
        (TermKind::Record(xs), TermKind::Record(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(label, x)| ys.iter().any(|(l, y)| l == label && value_eq(x, y)))
        }
        (
            TermKind::Lam {
                param: p1,
                param_ty: t1,
                body: b1,
            },
            TermKind::Lam {
                param: p2,
                param_ty: t2,
                body: b2,
            },
        ) => p1 == p2 && t1 == t2 && value_eq(b1, b2),
        (
            TermKind::TyLam {
                param: p1,
                bounds: x1,
                body: b1,
            },
            TermKind::TyLam {
                param: p2,
                bounds: x2,
                body: b2,
            },
        ) => p1 == p2 && x1 == x2 && value_eq(b1, b2),
        (
            TermKind::App { func: f1, arg: a1 },
            TermKind::App { func: f2, arg: a2 },
        ) => value_eq(f1, f2) && value_eq(a1, a2),
        (
            TermKind::TyApp {
                func: f1,
                arg: t1,
                bounds: x1,
            },
            TermKind::TyApp {
                func: f2,
                arg: t2,
                bounds: x2,
            },
        ) => t1 == t2 && x1 == x2 && value_eq(f1, f2),
        (
            TermKind::Annot { term: i1, ty: t1 },
            TermKind::Annot { term: i2, ty: t2 },
        ) => t1 == t2 && value_eq(i1, i2),
        (
            TermKind::Proj { base: b1, label: l1 },
            TermKind::Proj { base: b2, label: l2 },
        ) => l1 == l2 && value_eq(b1, b2),
        (
            TermKind::If {
                cond: c1,
                then_branch: t1,
                else_branch: e1,
            },
            TermKind::If {
                cond: c2,
                then_branch: t2,
                else_branch: e2,
            },
        ) => value_eq(c1, c2) && value_eq(t1, t2) && value_eq(e1, e2),
        (
            TermKind::Binary {
                op: o1,
                left: l1,
                right: r1,
            },
            TermKind::Binary {
                op: o2,
                left: l2,
                right: r2,
            },
        ) => o1 == o2 && value_eq(l1, l2) && value_eq(r1, r2),
        (
            TermKind::Unary { op: o1, operand: x1 },
            TermKind::Unary { op: o2, operand: x2 },
        ) => o1 == o2 && value_eq(x1, x2),
        _ => false,
    }
}

fn stuck(what: String, span: Span) -> EvalResult {
    Err(RuntimeError::new(RuntimeErrorKind::Stuck { what }, span))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::display::render_value;
    use crate::io::buffer_handler;
    use pretty_assertions::assert_eq;
    use sable_diagnostic::ErrorCode;
    use sable_typeck::{Checker, ImplRegistry};
    use std::sync::Arc;

    /// Run the whole pipeline and evaluate every statement.
    fn run_program(
        source: &str,
        inputs: Vec<String>,
    ) -> (
        Vec<Result<EvaluatedStmt, RuntimeError>>,
        SharedIo,
        StringInterner,
    ) {
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
        let mut dispatcher =
            sable_dispatch::Dispatcher::new(&interner, &desugared.signatures, &registry);
        let io = buffer_handler(inputs);
        let mut evaluator = Evaluator::new(&interner, Arc::clone(&io));

        let mut results = Vec::new();
        for stmt in &desugared.stmts {
            let checked = checker.check_stmt(stmt).unwrap().stmt;
            let dispatched = dispatcher.dispatch_stmt(&checked).unwrap();
            results.push(evaluator.eval_stmt(&dispatched));
        }
        (results, io, interner)
    }

    /// The final statement's value, for programs that should not fail.
    fn last_value(source: &str) -> (Term, StringInterner) {
        last_value_with_input(source, Vec::new())
    }

    fn last_value_with_input(source: &str, inputs: Vec<String>) -> (Term, StringInterner) {
        let (results, _, interner) = run_program(source, inputs);
        let value = results.last().unwrap().clone().unwrap().value;
        (value, interner)
    }

    fn last_render(source: &str) -> String {
        let (value, interner) = last_value(source);
        render_value(&value, &interner)
    }

    #[test]
    fn test_arithmetic_reduces() {
        let (value, _) = last_value("1 + 2 * 3;");
        assert_eq!(value.kind, TermKind::Int(7));

        let (value, _) = last_value("not (1 < 2) or 3 <= 3;");
        assert_eq!(value.kind, TermKind::Bool(true));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let (value, _) = last_value("7 / 2;");
        assert_eq!(value.kind, TermKind::Int(3));

        let (value, _) = last_value("-7 / 2;");
        assert_eq!(value.kind, TermKind::Int(-3));
    }

    #[test]
    fn test_division_by_zero_is_a_runtime_error() {
        let (results, _, _) = run_program("1 / (2 - 2);", Vec::new());
        let error = results[0].clone().unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::DivisionByZero);
        assert_eq!(error.code(), ErrorCode::E4001);
    }

    #[test]
    fn test_bindings_extend_the_environment() {
        let (results, _, interner) = run_program("x = 2; y = x * x; y + 1;", Vec::new());

        let first = results[0].clone().unwrap();
        assert_eq!(first.name, Some(interner.intern("x")));
        assert_eq!(first.value.kind, TermKind::Int(2));

        let last = results[2].clone().unwrap();
        assert_eq!(last.name, None);
        assert_eq!(last.value.kind, TermKind::Int(5));
    }

    #[test]
    fn test_rebinding_shadows_for_later_statements() {
        let (value, _) = last_value("x = 1; x = x + 1; x;");
        assert_eq!(value.kind, TermKind::Int(2));
    }

    #[test]
    fn test_beta_reduction_avoids_capture() {
        // Without freshening, the global x would be captured by the inner
        // binder and the result would be 3
        let source = "x = 100;\n\
             add_x = \\y:Int. y + x;\n\
             twice = \\f:Int -> Int. \\x:Int. f (f x);\n\
             twice add_x 1;";
        let (value, _) = last_value(source);
        assert_eq!(value.kind, TermKind::Int(201));
    }

    #[test]
    fn test_short_circuit_skips_the_right_operand() {
        let (results, io, _) = run_program(
            "false and ((println \"bad\") == \"bad\");\n\
             true or ((println \"bad\") == \"bad\");",
            Vec::new(),
        );
        assert_eq!(results[0].clone().unwrap().value.kind, TermKind::Bool(false));
        assert_eq!(results[1].clone().unwrap().value.kind, TermKind::Bool(true));
        assert_eq!(io.output(), "");
    }

    #[test]
    fn test_conditional_evaluates_one_branch() {
        let (results, io, interner) = run_program(
            "if true then (println \"yes\") else (println \"no\");",
            Vec::new(),
        );
        let value = results[0].clone().unwrap().value;
        assert_eq!(value.kind, TermKind::Str(interner.intern("yes")));
        assert_eq!(io.output(), "yes\n");
    }

    #[test]
    fn test_print_writes_in_statement_order() {
        let (_, io, _) = run_program("print \"a\"; println \"b\"; print \"c\";", Vec::new());
        assert_eq!(io.output(), "ab\nc");
    }

    #[test]
    fn test_read_fires_once_per_reference() {
        let (results, _, interner) = run_program(
            "a = read; b = read; a + b + read;",
            vec!["foo".to_string(), "bar".to_string()],
        );
        // The third read finds the script exhausted
        let value = results[2].clone().unwrap().value;
        assert_eq!(value.kind, TermKind::Str(interner.intern("foobar")));
    }

    #[test]
    fn test_read_composes_with_string_to_int() {
        let (value, _) = last_value_with_input("string_to_int read + 1;", vec!["41".to_string()]);
        assert_eq!(value.kind, TermKind::Int(42));
    }

    #[test]
    fn test_malformed_int_is_a_runtime_error() {
        let (results, _, _) = run_program("string_to_int \"abc\";", Vec::new());
        let error = results[0].clone().unwrap_err();
        assert_eq!(
            error.kind,
            RuntimeErrorKind::MalformedInt {
                input: "abc".to_string()
            }
        );
        assert_eq!(error.code(), ErrorCode::E4002);
    }

    #[test]
    fn test_head_of_empty_propagates_through_operators() {
        assert_eq!(last_render("(head ([] @Int)) + 1;"), "Error");
        assert_eq!(last_render("[head ([] @Int), 2];"), "[Error, 2]");
    }

    #[test]
    fn test_tail_of_empty_stays_empty() {
        assert_eq!(last_render("tail ([] @Int);"), "[]");
    }

    #[test]
    fn test_under_applied_cons_is_a_value() {
        assert_eq!(last_render("cons @Int 1;"), "<builtin cons>");
        assert_eq!(last_render("c = cons @Int 1; c [2, 3];"), "[1, 2, 3]");
    }

    #[test]
    fn test_record_projection() {
        let (value, _) = last_value("p = {x = 1, y = 2}; p.x + p.y;");
        assert_eq!(value.kind, TermKind::Int(3));
    }

    #[test]
    fn test_instantiation_erases_but_effects_fire() {
        let (results, io, interner) = run_program(
            "f = \\T. println \"instantiated\"; f @Int; f @Bool;",
            Vec::new(),
        );
        // Building the abstraction runs nothing; each instantiation does
        assert_eq!(io.output(), "instantiated\ninstantiated\n");
        let value = results[0].clone().unwrap().value;
        assert_eq!(render_value(&value, &interner), "<forall>");
    }

    #[test]
    fn test_equality_is_structural() {
        let (value, _) = last_value("[1, 2] == [1, 2];");
        assert_eq!(value.kind, TermKind::Bool(true));

        let (value, _) = last_value("{x = 1, y = 2} == {y = 2, x = 1};");
        assert_eq!(value.kind, TermKind::Bool(true));

        let (value, _) = last_value("\"a\" == \"b\";");
        assert_eq!(value.kind, TermKind::Bool(false));
    }

    #[test]
    fn test_method_dispatch_end_to_end() {
        let source = "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end\n\
             show_twice = \\T impl Show. \\x:T. (show x) + (show x);\n\
             show_twice @Int 1;";
        let (results, _, interner) = run_program(source, Vec::new());
        let value = results.last().unwrap().clone().unwrap().value;
        assert_eq!(value.kind, TermKind::Str(interner.intern("11")));
    }

    #[test]
    fn test_method_use_before_impl_fails_at_runtime() {
        let source = "trait Show a where show: a -> String; end\n\
             early = show 1;\n\
             impl Show for Int where show = int_to_string; end";
        let (results, _, _) = run_program(source, Vec::new());

        let error = results[0].clone().unwrap_err();
        assert_eq!(error.code(), ErrorCode::E4003);
        let RuntimeErrorKind::UnboundName { name } = error.kind else {
            panic!("expected an unbound name, got {:?}", error.kind);
        };
        assert_eq!(name, "__Show_inst_0");

        // The impl's own binding still evaluates
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_stuck_reduction_is_an_internal_error() {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let bad = Term::new(
            TermKind::Proj {
                base: Box::new(Term::new(TermKind::Int(1), Span::DUMMY)),
                label: x,
            },
            Span::DUMMY,
        );
        let stmt = CoreStmt::new(CoreStmtKind::Expr(bad), Span::DUMMY);

        let mut evaluator = Evaluator::new(&interner, buffer_handler(Vec::new()));
        let error = evaluator.eval_stmt(&stmt).unwrap_err();
        assert_eq!(error.code(), ErrorCode::E9001);
        assert!(matches!(error.kind, RuntimeErrorKind::Stuck { .. }));
    }
}
