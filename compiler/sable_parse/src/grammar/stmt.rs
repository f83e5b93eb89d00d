//! Statement and declaration parsing.

use sable_diagnostic::{duplicate_label, Diagnostic};
use sable_ir::{
    FieldSig, ImplDecl, MethodBind, Name, Stmt, StmtKind, StructDecl, TraitDecl,
};
use sable_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Parse one statement. The caller has already skipped stray
    /// semicolons.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        match self.kind() {
            TokenKind::Trait => self.parse_trait_decl(),
            TokenKind::Struct => self.parse_struct_decl(),
            TokenKind::Impl => self.parse_impl_decl(),
            // `x = e;` is a binding; `x == e;` and every other identifier
            // head is an expression statement.
            TokenKind::Ident(name) if matches!(self.peek(), TokenKind::Assign) => {
                self.parse_binding(name)
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_binding(&mut self, name: Name) -> Result<Stmt, Diagnostic> {
        let start = self.span();
        self.advance(); // name
        self.advance(); // =
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Bind { name, value }, start.merge(end)))
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.span();
        let expr = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(Stmt::new(StmtKind::Expr(expr), start.merge(end)))
    }

    /// `struct S where l1: T1; ... end` - an empty body is legal.
    fn parse_struct_decl(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.span();
        self.advance(); // struct
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::Where)?;
        let fields = self.parse_field_sigs("struct body")?;
        let end = self.expect(TokenKind::End)?.span;
        Ok(Stmt::new(
            StmtKind::Struct(StructDecl { name, fields }),
            start.merge(end),
        ))
    }

    /// `trait F a where f1: U1; ... end` - exactly one type parameter.
    fn parse_trait_decl(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.span();
        self.advance(); // trait
        let (name, _) = self.expect_ident()?;
        let (ty_param, _) = self.expect_ident()?;
        self.expect(TokenKind::Where)?;
        let methods = self.parse_field_sigs("trait body")?;
        let end = self.expect(TokenKind::End)?.span;
        Ok(Stmt::new(
            StmtKind::Trait(TraitDecl {
                name,
                ty_param,
                methods,
            }),
            start.merge(end),
        ))
    }

    /// `impl F for T where f1 = e1; ... end` - the implementing type is
    /// full type syntax, so `impl Show for [Int]` works.
    fn parse_impl_decl(&mut self) -> Result<Stmt, Diagnostic> {
        let start = self.span();
        self.advance(); // impl
        let (trait_name, trait_span) = self.expect_ident()?;
        self.expect(TokenKind::For)?;
        let self_ty = self.parse_type()?;
        self.expect(TokenKind::Where)?;
        let methods = self.parse_method_binds()?;
        let end = self.expect(TokenKind::End)?.span;
        Ok(Stmt::new(
            StmtKind::Impl(ImplDecl {
                trait_name,
                trait_span,
                self_ty,
                methods,
            }),
            start.merge(end),
        ))
    }

    /// `label: Type;` items of a struct or trait body, up to `end`.
    fn parse_field_sigs(&mut self, context: &str) -> Result<Vec<FieldSig>, Diagnostic> {
        let mut fields: Vec<FieldSig> = Vec::new();
        while self.check_ident() {
            let (label, label_span) = self.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            let end = self.expect(TokenKind::Semicolon)?.span;
            if fields.iter().any(|f| f.label == label) {
                return Err(duplicate_label(
                    label_span,
                    self.interner.lookup(label),
                    context,
                ));
            }
            fields.push(FieldSig {
                label,
                ty,
                span: label_span.merge(end),
            });
        }
        Ok(fields)
    }

    /// `label = Expr;` items of an impl body, up to `end`.
    fn parse_method_binds(&mut self) -> Result<Vec<MethodBind>, Diagnostic> {
        let mut methods: Vec<MethodBind> = Vec::new();
        while self.check_ident() {
            let (label, label_span) = self.expect_ident()?;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            let end = self.expect(TokenKind::Semicolon)?.span;
            if methods.iter().any(|m| m.label == label) {
                return Err(duplicate_label(
                    label_span,
                    self.interner.lookup(label),
                    "impl body",
                ));
            }
            methods.push(MethodBind {
                label,
                value,
                span: label_span.merge(end),
            });
        }
        Ok(methods)
    }
}
