//! Lexer for Sable, built on logos with string interning.
//!
//! Whitespace and `//` comments are trivia; statements are terminated by
//! `;`, so newlines carry no meaning and are skipped outright. The first
//! unlexable character aborts the whole run: later stages work
//! per-statement, but without a token stream there are no statements.

mod token;

pub use token::{Token, TokenKind, TokenList};

use logos::Logos;
use sable_diagnostic::span_utils::offset_to_line_col;
use sable_diagnostic::{unknown_character, Diagnostic, ErrorCode};
use sable_ir::{Span, StringInterner};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("where")]
    Where,
    #[token("end")]
    End,
    #[token("trait")]
    Trait,
    #[token("struct")]
    Struct,
    #[token("impl")]
    Impl,
    #[token("for")]
    For,
    #[token("forall")]
    Forall,
    #[token("let")]
    Let,
    #[token("in")]
    In,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token("\\")]
    Backslash,
    #[token("@")]
    At,

    #[token("->")]
    Arrow,
    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // Unsigned; unary minus is an operator, not part of the literal
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // Two quote forms, no escapes, no embedded newline
    #[regex(r#""[^"\n]*""#)]
    DoubleStr,
    #[regex(r"'[^'\n]*'")]
    SingleStr,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Lex source code into a `TokenList`.
///
/// # Errors
/// Fails on the first character with no token interpretation, on an
/// unterminated string, or on an integer literal that does not fit `i64`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, Diagnostic> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(raw) => {
                result.push(Token::new(convert_token(raw, slice, interner), span));
            }
            Err(()) => return Err(lex_error(span, slice, source)),
        }
    }

    let eof_pos = u32::try_from(source.len())
        .unwrap_or_else(|_| panic!("source exceeds {} bytes", u32::MAX));
    result.push(Token::new(TokenKind::Eof, Span::point(eof_pos)));

    Ok(result)
}

/// Convert a raw token to a `TokenKind`, interning strings.
fn convert_token(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::Int(n) => TokenKind::Int(n),
        RawToken::DoubleStr | RawToken::SingleStr => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(content))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),

        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::If => TokenKind::If,
        RawToken::Then => TokenKind::Then,
        RawToken::Else => TokenKind::Else,
        RawToken::Where => TokenKind::Where,
        RawToken::End => TokenKind::End,
        RawToken::Trait => TokenKind::Trait,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Impl => TokenKind::Impl,
        RawToken::For => TokenKind::For,
        RawToken::Forall => TokenKind::Forall,
        RawToken::Let => TokenKind::Let,
        RawToken::In => TokenKind::In,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Backslash => TokenKind::Backslash,
        RawToken::At => TokenKind::At,

        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Assign => TokenKind::Assign,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
    }
}

/// Classify a logos error slice into a lex diagnostic.
fn lex_error(span: Span, slice: &str, source: &str) -> Diagnostic {
    let first = slice.chars().next().unwrap_or('\0');
    let (_, column) = offset_to_line_col(source, span.start);

    if first == '"' || first == '\'' {
        Diagnostic::error(ErrorCode::E0002)
            .with_message(format!("unterminated string starting at column {column}"))
            .with_label(span, "string is never closed on this line")
    } else if first.is_ascii_digit() {
        Diagnostic::error(ErrorCode::E0003)
            .with_message("integer literal out of range")
            .with_label(span, "does not fit a 64-bit signed integer")
    } else {
        unknown_character(span, first, column)
    }
}
