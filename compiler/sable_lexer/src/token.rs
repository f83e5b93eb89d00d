//! Cooked tokens, after interning.

use sable_ir::{Name, Span};
use std::ops::Index;

/// A token with its source span.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token variants.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
    // ===== Literals and identifiers =====
    /// Integer literal
    Int(i64),
    /// String literal (contents interned, quotes stripped)
    Str(Name),
    /// Identifier
    Ident(Name),

    // ===== Keywords =====
    And,
    Or,
    Not,
    True,
    False,
    If,
    Then,
    Else,
    Where,
    End,
    Trait,
    Struct,
    Impl,
    For,
    Forall,
    /// Reserved, not used by any production
    Let,
    /// Reserved, not used by any production
    In,

    // ===== Punctuation =====
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    /// `=`
    Assign,
    /// `->`
    Arrow,
    /// `\`
    Backslash,
    /// `@`
    At,

    // ===== Operators =====
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::Where => "`where`",
            TokenKind::End => "`end`",
            TokenKind::Trait => "`trait`",
            TokenKind::Struct => "`struct`",
            TokenKind::Impl => "`impl`",
            TokenKind::For => "`for`",
            TokenKind::Forall => "`forall`",
            TokenKind::Let => "`let`",
            TokenKind::In => "`in`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Assign => "`=`",
            TokenKind::Arrow => "`->`",
            TokenKind::Backslash => "`\\`",
            TokenKind::At => "`@`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Eof => "end of input",
        }
    }

    /// Check whether a token of this kind can start an atom. The parser
    /// uses this to decide whether a juxtaposed application continues.
    pub fn starts_atom(self) -> bool {
        matches!(
            self,
            TokenKind::Int(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
        )
    }
}

/// A lexed token sequence, always terminated by an `Eof` token.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty token list.
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Append a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Number of tokens, including the trailing `Eof`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get a token by index.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
