//! Token cursor for navigating the lexed stream.

use sable_diagnostic::{unexpected_token, Diagnostic};
use sable_ir::{Name, Span};
use sable_lexer::{Token, TokenKind, TokenList};

/// Cursor over a token list.
///
/// The list always ends with `Eof`, so the cursor never runs off the end:
/// reads past the last token keep returning `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the stream.
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// The current token.
    pub fn current(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, Span::DUMMY),
        }
    }

    /// The current token's kind.
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// The current token's span.
    pub fn span(&self) -> Span {
        self.current().span
    }

    /// The kind one token ahead, without advancing.
    pub fn peek(&self) -> TokenKind {
        self.tokens.get(self.pos + 1).map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Check if the cursor has reached `Eof`.
    pub fn is_at_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind.
    ///
    /// Payload variants compare by variant, not by payload: `check` against
    /// `Int(0)` matches any integer literal.
    pub fn check(&self, kind: TokenKind) -> bool {
        std::mem::discriminant(&self.kind()) == std::mem::discriminant(&kind)
    }

    /// Check if the current token is an identifier.
    pub fn check_ident(&self) -> bool {
        matches!(self.kind(), TokenKind::Ident(_))
    }

    /// Consume and return the current token. At `Eof` this is a no-op
    /// that keeps returning the `Eof` token.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with a diagnostic.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(unexpected_token(
                self.span(),
                kind.describe(),
                self.kind().describe(),
            ))
        }
    }

    /// Consume an identifier, returning its name and span.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), Diagnostic> {
        match self.kind() {
            TokenKind::Ident(name) => {
                let span = self.span();
                self.advance();
                Ok((name, span))
            }
            other => Err(unexpected_token(self.span(), "identifier", other.describe())),
        }
    }
}
