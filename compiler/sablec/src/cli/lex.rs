//! The `lex` command: dump the token stream.

use sable_diagnostic::render::render;
use sable_ir::StringInterner;
use sable_lexer::{Token, TokenKind};

use super::read_file;

/// Describe each token with its span, one line per token.
pub fn lex_source(source: &str) -> Result<Vec<String>, String> {
    let interner = StringInterner::new();
    let tokens = sable_lexer::lex(source, &interner).map_err(|diag| render(&diag, source))?;

    Ok(tokens
        .iter()
        .map(|token| format!("{} @ {}", describe_token(token, &interner), token.span))
        .collect())
}

/// The token's grammar description, with literal payloads spelled out.
fn describe_token(token: &Token, interner: &StringInterner) -> String {
    match token.kind {
        TokenKind::Int(value) => format!("integer `{value}`"),
        TokenKind::Str(name) => format!("string {:?}", interner.lookup(name)),
        TokenKind::Ident(name) => format!("identifier `{}`", interner.lookup(name)),
        other => other.describe().to_string(),
    }
}

/// Lex a file and print the token stream.
pub fn lex_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    match lex_source(&source) {
        Ok(lines) => {
            println!("Tokens for '{path}' ({}):", lines.len());
            for line in &lines {
                println!("  {line}");
            }
            0
        }
        Err(error) => {
            eprintln!("{error}");
            1
        }
    }
}
