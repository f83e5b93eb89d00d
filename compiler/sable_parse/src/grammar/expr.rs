//! Expression parsing.
//!
//! Precedence, loosest to tightest: lambda and `if`, `or`, `and`, `not`,
//! the relational operators (non-associative), `+ -`, `* /`, unary `-`,
//! application by juxtaposition, `: Type` annotation, postfix `@T` and
//! `.label`, atoms. The arithmetic levels associate to the right:
//! `1 - 2 - 3` is `1 - (2 - 3)`.

use sable_diagnostic::{duplicate_label, Diagnostic, ErrorCode};
use sable_ir::{BinaryOp, Expr, ExprKind, FieldInit, Span, UnaryOp};
use sable_lexer::TokenKind;

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, Diagnostic> {
        ensure_sufficient_stack(|| match self.kind() {
            TokenKind::Backslash => self.parse_lambda(),
            TokenKind::If => self.parse_if(),
            _ => self.parse_or(),
        })
    }

    /// `\x: T. e` is a term lambda; `\a. e` and `\a impl F+G. e` are type
    /// abstractions. The `:` after the binder decides.
    fn parse_lambda(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.span();
        self.advance(); // backslash
        let (param, _) = self.expect_ident()?;

        if self.eat(TokenKind::Colon) {
            let param_ty = self.parse_type()?;
            self.expect(TokenKind::Dot)?;
            let body = self.parse_expr()?;
            let span = start.merge(body.span);
            Ok(Expr::new(
                ExprKind::Lambda {
                    param,
                    param_ty: Box::new(param_ty),
                    body: Box::new(body),
                },
                span,
            ))
        } else {
            let bounds = if self.eat(TokenKind::Impl) {
                self.parse_bound_list()?
            } else {
                Vec::new()
            };
            self.expect(TokenKind::Dot)?;
            let body = self.parse_expr()?;
            let span = start.merge(body.span);
            Ok(Expr::new(
                ExprKind::TyLambda {
                    param,
                    bounds,
                    body: Box::new(body),
                },
                span,
            ))
        }
    }

    fn parse_if(&mut self) -> Result<Expr, Diagnostic> {
        let start = self.span();
        self.advance(); // if
        let cond = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_expr()?;
        self.expect(TokenKind::Else)?;
        let else_branch = self.parse_expr()?;
        let span = start.merge(else_branch.span);
        Ok(Expr::new(
            ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, Diagnostic> {
        let left = self.parse_and()?;
        if self.eat(TokenKind::Or) {
            let right = self.parse_or()?;
            Ok(binary(BinaryOp::Or, left, right))
        } else {
            Ok(left)
        }
    }

    fn parse_and(&mut self) -> Result<Expr, Diagnostic> {
        let left = self.parse_not()?;
        if self.eat(TokenKind::And) {
            let right = self.parse_and()?;
            Ok(binary(BinaryOp::And, left, right))
        } else {
            Ok(left)
        }
    }

    fn parse_not(&mut self) -> Result<Expr, Diagnostic> {
        if self.check(TokenKind::Not) {
            let start = self.span();
            self.advance();
            let operand = self.parse_not()?;
            let span = start.merge(operand.span);
            Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                },
                span,
            ))
        } else {
            self.parse_rel()
        }
    }

    /// At most one relational operator per level: `1 < 2 < 3` does not
    /// parse.
    fn parse_rel(&mut self) -> Result<Expr, Diagnostic> {
        let left = self.parse_add()?;
        let op = match self.kind() {
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_add()?;
        Ok(binary(op, left, right))
    }

    fn parse_add(&mut self) -> Result<Expr, Diagnostic> {
        let left = self.parse_mul()?;
        let op = match self.kind() {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_add()?;
        Ok(binary(op, left, right))
    }

    fn parse_mul(&mut self) -> Result<Expr, Diagnostic> {
        let left = self.parse_unary()?;
        let op = match self.kind() {
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_mul()?;
        Ok(binary(op, left, right))
    }

    fn parse_unary(&mut self) -> Result<Expr, Diagnostic> {
        if self.check(TokenKind::Minus) {
            let start = self.span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span);
            Ok(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                },
                span,
            ))
        } else {
            self.parse_app()
        }
    }

    /// Application by juxtaposition, grouping left: `f x y` is `(f x) y`.
    fn parse_app(&mut self) -> Result<Expr, Diagnostic> {
        let mut expr = self.parse_annot()?;
        while self.kind().starts_atom() {
            let arg = self.parse_annot()?;
            let span = expr.span.merge(arg.span);
            expr = Expr::new(
                ExprKind::Apply {
                    func: Box::new(expr),
                    arg: Box::new(arg),
                },
                span,
            );
        }
        Ok(expr)
    }

    /// An optional `: Type` annotation, binding tighter than application:
    /// `f x : Int` annotates `x`.
    fn parse_annot(&mut self) -> Result<Expr, Diagnostic> {
        let expr = self.parse_postfix()?;
        if self.eat(TokenKind::Colon) {
            let ty = self.parse_type()?;
            let span = expr.span.merge(ty.span);
            Ok(Expr::new(
                ExprKind::Annot {
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                },
                span,
            ))
        } else {
            Ok(expr)
        }
    }

    /// Postfix `@T` type application and `.label` projection chains.
    fn parse_postfix(&mut self) -> Result<Expr, Diagnostic> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.eat(TokenKind::At) {
                let arg = self.parse_atom_type()?;
                let span = expr.span.merge(arg.span);
                expr = Expr::new(
                    ExprKind::TyApply {
                        func: Box::new(expr),
                        arg: Box::new(arg),
                    },
                    span,
                );
            } else if self.eat(TokenKind::Dot) {
                let (label, label_span) = self.expect_ident()?;
                let span = expr.span.merge(label_span);
                expr = Expr::new(
                    ExprKind::Field {
                        base: Box::new(expr),
                        label,
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_atom(&mut self) -> Result<Expr, Diagnostic> {
        let token = self.current();
        match token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::new(ExprKind::Int(value), token.span))
            }
            TokenKind::Str(contents) => {
                self.advance();
                Ok(Expr::new(ExprKind::Str(contents), token.span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(true), token.span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::Bool(false), token.span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::new(ExprKind::Ident(name), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let end = self.expect(TokenKind::RParen)?.span;
                Ok(Expr::new(inner.kind, token.span.merge(end)))
            }
            TokenKind::LBracket => self.parse_list(token.span),
            TokenKind::LBrace => self.parse_record(token.span),
            other => Err(expected_expression(token.span, other.describe())),
        }
    }

    fn parse_list(&mut self, start: Span) -> Result<Expr, Diagnostic> {
        self.advance(); // [
        let mut items = Vec::new();
        if !self.check(TokenKind::RBracket) {
            loop {
                items.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RBracket)?.span;
        Ok(Expr::new(ExprKind::List(items), start.merge(end)))
    }

    /// `{l1 = e1, ...}` with at least one field; `{}` is not an
    /// expression.
    fn parse_record(&mut self, start: Span) -> Result<Expr, Diagnostic> {
        self.advance(); // {
        let mut fields: Vec<FieldInit> = Vec::new();
        loop {
            let (label, label_span) = self.expect_ident()?;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            if fields.iter().any(|f| f.label == label) {
                return Err(duplicate_label(
                    label_span,
                    self.interner.lookup(label),
                    "record literal",
                ));
            }
            let field_span = label_span.merge(value.span);
            fields.push(FieldInit {
                label,
                value,
                span: field_span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Expr::new(ExprKind::Record(fields), start.merge(end)))
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

fn expected_expression(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("expected an expression, found {found}"))
        .with_label(span, "expected an expression here")
}
