//! Value rendering for the statement trace.
//!
//! Values print in surface syntax where they have one. Functions do not:
//! lambdas render as `<fun>`, type abstractions as `<forall>`, and
//! builtins as `<builtin name>`, whether bare or partially applied.

use sable_ir::StringInterner;
use sable_types::{Term, TermKind};

/// Format an evaluated term for the trace.
pub fn render_value(term: &Term, interner: &StringInterner) -> String {
    match &term.kind {
        TermKind::Int(value) => value.to_string(),
        TermKind::Bool(value) => value.to_string(),
        TermKind::Str(contents) => format!("\"{}\"", interner.lookup(*contents)),
        TermKind::List(items) => {
            let items_str: Vec<_> = items
                .iter()
                .map(|item| render_value(item, interner))
                .collect();
            format!("[{}]", items_str.join(", "))
        }
        TermKind::Record(fields) => {
            let fields_str: Vec<_> = fields
                .iter()
                .map(|(label, value)| {
                    format!("{} = {}", interner.lookup(*label), render_value(value, interner))
                })
                .collect();
            format!("{{{}}}", fields_str.join(", "))
        }
        TermKind::Builtin(builtin) => format!("<builtin {}>", builtin.name()),
        TermKind::App { func, .. } => {
            // The only application that survives as a value is an
            // under-applied builtin
            match &func.kind {
                TermKind::Builtin(builtin) => format!("<builtin {}>", builtin.name()),
                _ => "<fun>".to_string(),
            }
        }
        TermKind::TyLam { .. } => "<forall>".to_string(),
        TermKind::Error => "Error".to_string(),
        TermKind::Lam { .. }
        | TermKind::Var(_)
        | TermKind::TyApp { .. }
        | TermKind::Annot { .. }
        | TermKind::Proj { .. }
        | TermKind::If { .. }
        | TermKind::Binary { .. }
        | TermKind::Unary { .. } => "<fun>".to_string(),
    }
}
