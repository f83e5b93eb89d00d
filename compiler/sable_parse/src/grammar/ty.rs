//! Type parsing.
//!
//! `forall` scopes over everything to its right; arrows associate to the
//! right; application by juxtaposition groups left. A `forall` on the
//! right of an arrow needs parentheses.

use sable_diagnostic::{duplicate_label, Diagnostic, ErrorCode};
use sable_ir::{FieldTy, Name, TypeExpr, TypeExprKind};
use sable_lexer::TokenKind;

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    /// Parse a type.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpr, Diagnostic> {
        ensure_sufficient_stack(|| {
            if self.check(TokenKind::Forall) {
                self.parse_forall()
            } else {
                self.parse_arrow()
            }
        })
    }

    fn parse_forall(&mut self) -> Result<TypeExpr, Diagnostic> {
        let start = self.span();
        self.advance(); // forall
        let (param, _) = self.expect_ident()?;
        let bounds = if self.eat(TokenKind::Impl) {
            self.parse_bound_list()?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Dot)?;
        let body = self.parse_type()?;
        let span = start.merge(body.span);
        Ok(TypeExpr::new(
            TypeExprKind::Forall {
                param,
                bounds,
                body: Box::new(body),
            },
            span,
        ))
    }

    fn parse_arrow(&mut self) -> Result<TypeExpr, Diagnostic> {
        let param = self.parse_type_app()?;
        if self.eat(TokenKind::Arrow) {
            let ret = self.parse_arrow()?;
            let span = param.span.merge(ret.span);
            Ok(TypeExpr::new(
                TypeExprKind::Arrow {
                    param: Box::new(param),
                    ret: Box::new(ret),
                },
                span,
            ))
        } else {
            Ok(param)
        }
    }

    fn parse_type_app(&mut self) -> Result<TypeExpr, Diagnostic> {
        let mut ty = self.parse_atom_type()?;
        while self.check_type_atom() {
            let arg = self.parse_atom_type()?;
            let span = ty.span.merge(arg.span);
            ty = TypeExpr::new(
                TypeExprKind::Apply {
                    func: Box::new(ty),
                    arg: Box::new(arg),
                },
                span,
            );
        }
        Ok(ty)
    }

    fn check_type_atom(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::LParen | TokenKind::Ident(_) | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// An atomic type: a name, a parenthesized type, a list type, or a
    /// record type. This is also the grammar position after `@`.
    pub(crate) fn parse_atom_type(&mut self) -> Result<TypeExpr, Diagnostic> {
        let token = self.current();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(TypeExpr::new(TypeExprKind::Named(name), token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                let end = self.expect(TokenKind::RParen)?.span;
                Ok(TypeExpr::new(inner.kind, token.span.merge(end)))
            }
            TokenKind::LBracket => {
                self.advance();
                let elem = self.parse_type()?;
                let end = self.expect(TokenKind::RBracket)?.span;
                Ok(TypeExpr::new(
                    TypeExprKind::List(Box::new(elem)),
                    token.span.merge(end),
                ))
            }
            TokenKind::LBrace => self.parse_record_type(),
            other => Err(expected_type(token.span, other.describe())),
        }
    }

    /// `{l1: T1, ...}` with at least one field; `{}` is not a type.
    fn parse_record_type(&mut self) -> Result<TypeExpr, Diagnostic> {
        let start = self.span();
        self.advance(); // {
        let mut fields: Vec<FieldTy> = Vec::new();
        loop {
            let (label, label_span) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            if fields.iter().any(|f| f.label == label) {
                return Err(duplicate_label(
                    label_span,
                    self.interner.lookup(label),
                    "record type",
                ));
            }
            let field_span = label_span.merge(ty.span);
            fields.push(FieldTy {
                label,
                ty,
                span: field_span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(TypeExpr::new(
            TypeExprKind::Record(fields),
            start.merge(end),
        ))
    }

    /// A `+`-separated list of trait names, as written after `impl` in
    /// binders and `forall` types. Repeating a name is an error.
    pub(crate) fn parse_bound_list(&mut self) -> Result<Vec<Name>, Diagnostic> {
        let mut bounds = Vec::new();
        loop {
            let (bound, bound_span) = self.expect_ident()?;
            if bounds.contains(&bound) {
                return Err(Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!(
                        "duplicate bound `{}`",
                        self.interner.lookup(bound)
                    ))
                    .with_label(bound_span, "bound appears twice"));
            }
            bounds.push(bound);
            if !self.eat(TokenKind::Plus) {
                break;
            }
        }
        Ok(bounds)
    }
}

fn expected_type(span: sable_ir::Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("expected a type, found {found}"))
        .with_label(span, "expected a type here")
}
