//! Plain-text diagnostic rendering.
//!
//! The header line keeps the interpreter's traditional register,
//! `[Line N] Runtime Error: division by zero`, with the error code
//! appended for searchability. Labels and notes follow indented.

use crate::span_utils::line_number;
use crate::Diagnostic;
use std::fmt::Write as _;

/// Render one diagnostic against the source it was produced from.
pub fn render(diag: &Diagnostic, source: &str) -> String {
    let mut out = String::new();

    if let Some(span) = diag.primary_span() {
        let line = line_number(source, span);
        let _ = write!(out, "[Line {line}] ");
    }
    let _ = write!(
        out,
        "{} {}: {} ({})",
        diag.code.category(),
        capitalized(diag.severity.to_string().as_str()),
        diag.message,
        diag.code
    );

    for label in &diag.labels {
        let line = line_number(source, label.span);
        if label.is_primary {
            let _ = write!(out, "\n  --> line {line}: {}", label.message);
        } else {
            let _ = write!(out, "\n   -  line {line}: {}", label.message);
        }
    }

    for note in &diag.notes {
        let _ = write!(out, "\n   =  note: {note}");
    }

    out
}

/// Render a batch of diagnostics, one block per diagnostic.
pub fn render_all(diags: &[Diagnostic], source: &str) -> String {
    let mut out = String::new();
    for (i, diag) in diags.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render(diag, source));
    }
    out
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
