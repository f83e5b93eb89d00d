//! Typing rules for the built-in operators.
//!
//! `+` is overloaded over `Int` and `String`; the left operand picks the
//! overload and the right operand must follow. The remaining arithmetic
//! and ordering operators are `Int`-only, equality accepts any pair of
//! equal types, and the logical operators are `Bool`-only with
//! short-circuit evaluation handled later by the evaluator.

use crate::check::Checker;
use sable_diagnostic::{type_mismatch, Diagnostic};
use sable_ir::{BinaryOp, Span, UnaryOp};
use sable_types::{Term, TermKind, Type};

impl Checker<'_> {
    pub(crate) fn infer_binary(
        &mut self,
        op: BinaryOp,
        left: &Term,
        right: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (left, left_ty) = self.infer(left)?;
        let (right, right_ty) = self.infer(right)?;
        let ty = self.binary_result(op, &left_ty, &right_ty, left.span, right.span)?;
        let term = Term::new(
            TermKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        );
        Ok((term, ty))
    }

    pub(crate) fn infer_unary(
        &mut self,
        op: UnaryOp,
        operand: &Term,
        span: Span,
    ) -> Result<(Term, Type), Diagnostic> {
        let (operand, operand_ty) = self.infer(operand)?;
        let ty = match op {
            UnaryOp::Neg => {
                self.expect_ty(&Type::Int, &operand_ty, operand.span)?;
                Type::Int
            }
            UnaryOp::Not => {
                self.expect_ty(&Type::Bool, &operand_ty, operand.span)?;
                Type::Bool
            }
        };
        let term = Term::new(
            TermKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        );
        Ok((term, ty))
    }

    fn binary_result(
        &self,
        op: BinaryOp,
        left_ty: &Type,
        right_ty: &Type,
        left_span: Span,
        right_span: Span,
    ) -> Result<Type, Diagnostic> {
        match op {
            BinaryOp::Add => match (left_ty, right_ty) {
                (Type::Int, Type::Int) => Ok(Type::Int),
                (Type::Str, Type::Str) => Ok(Type::Str),
                (Type::Int, other) => Err(self.mismatch(right_span, &Type::Int, other)),
                (Type::Str, other) => Err(self.mismatch(right_span, &Type::Str, other)),
                (other, _) => Err(self
                    .mismatch(left_span, &Type::Int, other)
                    .with_note("`+` applies to two `Int`s or two `String`s")),
            },
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                self.expect_ty(&Type::Int, left_ty, left_span)?;
                self.expect_ty(&Type::Int, right_ty, right_span)?;
                Ok(Type::Int)
            }
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                self.expect_ty(&Type::Int, left_ty, left_span)?;
                self.expect_ty(&Type::Int, right_ty, right_span)?;
                Ok(Type::Bool)
            }
            BinaryOp::Eq | BinaryOp::NotEq => {
                if left_ty == right_ty {
                    Ok(Type::Bool)
                } else {
                    Err(self.mismatch(right_span, left_ty, right_ty))
                }
            }
            BinaryOp::And | BinaryOp::Or => {
                self.expect_ty(&Type::Bool, left_ty, left_span)?;
                self.expect_ty(&Type::Bool, right_ty, right_span)?;
                Ok(Type::Bool)
            }
        }
    }

    fn mismatch(&self, span: Span, expected: &Type, found: &Type) -> Diagnostic {
        type_mismatch(
            span,
            &expected.display(self.interner),
            &found.display(self.interner),
        )
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::check::CheckedStmt;
    use crate::registry::ImplRegistry;
    use pretty_assertions::assert_eq;
    use sable_diagnostic::ErrorCode;
    use sable_ir::StringInterner;

    fn check_source(source: &str) -> (Vec<Result<CheckedStmt, Diagnostic>>, StringInterner) {
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

        let registry = ImplRegistry::new();
        let mut checker = Checker::new(&interner, &desugared.signatures, &registry);
        let results = desugared
            .stmts
            .iter()
            .map(|stmt| checker.check_stmt(stmt))
            .collect();
        (results, interner)
    }

    fn expr_type(source: &str) -> String {
        let (results, interner) = check_source(source);
        results
            .into_iter()
            .last()
            .unwrap()
            .unwrap()
            .ty
            .display(&interner)
    }

    fn first_error(source: &str) -> Diagnostic {
        let (results, _interner) = check_source(source);
        results.into_iter().find_map(Result::err).unwrap()
    }

    #[test]
    fn test_integer_addition() {
        assert_eq!(expr_type("1 + 2;"), "Int");
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(expr_type("\"ab\" + \"cd\";"), "String");
    }

    #[test]
    fn test_mixed_addition_blames_the_right_operand() {
        let err = first_error("1 + \"Int\";");
        assert_eq!(err.code, ErrorCode::E3001);
        assert_eq!(err.message, "expected `Int`, found `String`");

        let err = first_error("\"x\" + 1;");
        assert_eq!(err.message, "expected `String`, found `Int`");
    }

    #[test]
    fn test_addition_on_unsupported_type() {
        let err = first_error("true + 1;");
        assert_eq!(err.code, ErrorCode::E3001);
        assert_eq!(err.message, "expected `Int`, found `Bool`");
        assert!(err
            .notes
            .iter()
            .any(|note| note.contains("two `Int`s or two `String`s")));
    }

    #[test]
    fn test_arithmetic_is_int_only() {
        assert_eq!(expr_type("7 - 2 * 3;"), "Int");
        assert_eq!(expr_type("7 / 2;"), "Int");

        let err = first_error("\"a\" - \"b\";");
        assert_eq!(err.message, "expected `Int`, found `String`");
    }

    #[test]
    fn test_comparisons_give_bool() {
        assert_eq!(expr_type("1 < 2;"), "Bool");
        assert_eq!(expr_type("1 <= 2;"), "Bool");
        assert_eq!(expr_type("1 > 2;"), "Bool");
        assert_eq!(expr_type("1 >= 2;"), "Bool");

        let err = first_error("true < false;");
        assert_eq!(err.message, "expected `Int`, found `Bool`");
    }

    #[test]
    fn test_equality_accepts_any_equal_pair() {
        assert_eq!(expr_type("1 == 2;"), "Bool");
        assert_eq!(expr_type("\"a\" != \"b\";"), "Bool");
        assert_eq!(expr_type("[1] == [2];"), "Bool");
        assert_eq!(expr_type("{x = 1} == {x = 2};"), "Bool");
    }

    #[test]
    fn test_equality_rejects_unequal_types() {
        let err = first_error("1 == true;");
        assert_eq!(err.code, ErrorCode::E3001);
        assert_eq!(err.message, "expected `Int`, found `Bool`");
    }

    #[test]
    fn test_logical_operators() {
        assert_eq!(expr_type("true and false;"), "Bool");
        assert_eq!(expr_type("true or false;"), "Bool");

        let err = first_error("1 and true;");
        assert_eq!(err.message, "expected `Bool`, found `Int`");
    }

    #[test]
    fn test_negation() {
        assert_eq!(expr_type("-5;"), "Int");
        assert_eq!(expr_type("not true;"), "Bool");

        let err = first_error("-true;");
        assert_eq!(err.message, "expected `Int`, found `Bool`");

        let err = first_error("not 1;");
        assert_eq!(err.message, "expected `Bool`, found `Int`");
    }
}
