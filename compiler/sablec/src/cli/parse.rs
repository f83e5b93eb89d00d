//! The `parse` command: dump the parsed statement stream.

use sable_diagnostic::render::render;
use sable_diagnostic::span_utils::line_number;
use sable_ir::{Stmt, StmtKind, StringInterner};

use super::read_file;

/// Summarize each parsed statement, one line per statement.
///
/// Fails with rendered diagnostics when the source does not lex or
/// parse; there is no statement stream to summarize then.
pub fn parse_source(source: &str) -> Result<Vec<String>, Vec<String>> {
    let interner = StringInterner::new();
    let tokens =
        sable_lexer::lex(source, &interner).map_err(|diag| vec![render(&diag, source)])?;
    let parsed = sable_parse::parse(&tokens, &interner);
    if !parsed.errors.is_empty() {
        return Err(parsed
            .errors
            .iter()
            .map(|diag| render(diag, source))
            .collect());
    }

    Ok(parsed
        .program
        .stmts
        .iter()
        .map(|stmt| {
            format!(
                "line {}: {}",
                line_number(source, stmt.span),
                describe_stmt(stmt, &interner)
            )
        })
        .collect())
}

fn describe_stmt(stmt: &Stmt, interner: &StringInterner) -> String {
    match &stmt.kind {
        StmtKind::Bind { name, .. } => format!("bind `{}`", interner.lookup(*name)),
        StmtKind::Expr(_) => "expression".to_string(),
        StmtKind::Struct(decl) => format!(
            "struct `{}` (fields: {})",
            interner.lookup(decl.name),
            decl.fields.len()
        ),
        StmtKind::Trait(decl) => format!(
            "trait `{}` (methods: {})",
            interner.lookup(decl.name),
            decl.methods.len()
        ),
        StmtKind::Impl(decl) => format!(
            "impl `{}` (methods: {})",
            interner.lookup(decl.trait_name),
            decl.methods.len()
        ),
    }
}

/// Parse a file and print the statement summaries.
pub fn parse_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    match parse_source(&source) {
        Ok(lines) => {
            println!("Parsed {} statements:", lines.len());
            for line in &lines {
                println!("  {line}");
            }
            0
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            1
        }
    }
}
