//! Recursive descent parser for Sable.
//!
//! Statements are `;`-terminated; declarations close with `end`. A parse
//! error abandons the current statement, records a diagnostic, and
//! resynchronizes at the next statement boundary, so one malformed
//! statement does not hide errors in the rest of the file.

mod cursor;
mod grammar;
mod stack;

pub use cursor::Cursor;

use sable_diagnostic::Diagnostic;
use sable_ir::{Name, Program, Span, StringInterner};
use sable_lexer::{Token, TokenKind, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a lexed token stream.
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            interner,
        }
    }

    // ===== Cursor delegation =====

    #[inline]
    fn current(&self) -> Token {
        self.cursor.current()
    }

    #[inline]
    fn kind(&self) -> TokenKind {
        self.cursor.kind()
    }

    #[inline]
    fn span(&self) -> Span {
        self.cursor.span()
    }

    #[inline]
    fn peek(&self) -> TokenKind {
        self.cursor.peek()
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn check_ident(&self) -> bool {
        self.cursor.check_ident()
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        self.cursor.expect(kind)
    }

    #[inline]
    fn expect_ident(&mut self) -> Result<(Name, Span), Diagnostic> {
        self.cursor.expect_ident()
    }

    // ===== Driver =====

    /// Parse the whole program, collecting one diagnostic per failed
    /// statement.
    pub fn parse_program(mut self) -> ParseResult {
        let mut program = Program::default();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            // Stray semicolons between statements are skipped.
            if self.eat(TokenKind::Semicolon) {
                continue;
            }

            let is_decl = matches!(
                self.kind(),
                TokenKind::Trait | TokenKind::Struct | TokenKind::Impl
            );
            match self.parse_stmt() {
                Ok(stmt) => program.stmts.push(stmt),
                Err(diag) => {
                    errors.push(diag);
                    if is_decl {
                        self.recover_past_end();
                    } else {
                        self.recover_past_semicolon();
                    }
                }
            }
        }

        tracing::debug!(
            statements = program.stmts.len(),
            errors = errors.len(),
            "parsed program"
        );

        ParseResult { program, errors }
    }

    // ===== Recovery =====

    /// Skip to just past the `end` that closes the declaration being
    /// abandoned.
    fn recover_past_end(&mut self) {
        while !self.is_at_end() {
            if self.eat(TokenKind::End) {
                return;
            }
            self.advance();
        }
    }

    /// Skip to just past the next `;`. Stops short of a declaration
    /// keyword: a missing terminator must not swallow the next
    /// declaration's body.
    fn recover_past_semicolon(&mut self) {
        while !self.is_at_end() {
            match self.kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Trait | TokenKind::Struct | TokenKind::Impl => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Parse result: the statements that parsed, plus diagnostics for those
/// that did not.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parse a token stream into a program.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseResult {
    Parser::new(tokens, interner).parse_program()
}
