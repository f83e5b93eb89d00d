//! The `check` command: type-check a program without evaluating it.

use sable_diagnostic::render::render;
use sable_typeck::Checker;

use super::{print_report, read_file, type_line};
use crate::pipeline;

/// What a check produced: one type line per statement that checked, and
/// rendered diagnostics for every statement that did not.
pub struct CheckReport {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

/// Type-check Sable source.
///
/// Reports every statement's error, not just the first: a failed
/// statement is skipped and checking continues against the context
/// built so far.
pub fn check_source(source: &str) -> CheckReport {
    let loaded = match pipeline::load(source) {
        Ok(loaded) => loaded,
        Err(diags) => {
            return CheckReport {
                lines: Vec::new(),
                errors: diags.iter().map(|d| render(d, source)).collect(),
            }
        }
    };

    let mut errors: Vec<String> = loaded
        .diagnostics
        .iter()
        .map(|d| render(d, source))
        .collect();
    let mut lines = Vec::new();

    let mut checker = Checker::new(&loaded.interner, &loaded.signatures, &loaded.registry);
    for stmt in &loaded.stmts {
        if stmt
            .bound_name()
            .is_some_and(|name| loaded.rejected.contains(&name))
        {
            continue;
        }
        match checker.check_stmt(stmt) {
            Ok(checked) => {
                lines.push(type_line(stmt.bound_name(), &checked.ty, &loaded.interner));
            }
            Err(diag) => errors.push(render(&diag, source)),
        }
    }

    CheckReport { lines, errors }
}

/// Check a file and print the report.
pub fn check_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let report = check_source(&source);
    print_report(&report.lines, &report.errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_reports_types_without_evaluating() {
        // Division by zero only exists at runtime; checking never sees it
        let report = check_source("x = 1 + 2;\nx / 0;");

        assert_eq!(report.lines, ["x: Int", "Int"]);
        assert_eq!(report.errors, Vec::<String>::new());
    }

    #[test]
    fn test_explicit_and_inferred_type_application() {
        let report = check_source("id = \\T. \\x:T. x;\nid @Int 5;\nid true;");

        assert_eq!(
            report.lines,
            ["id: forall T. T -> T", "Int", "Bool"]
        );
        assert_eq!(report.errors, Vec::<String>::new());
    }

    #[test]
    fn test_unsatisfied_bound_names_the_method() {
        let source = "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end\n\
             show @Bool true;";
        let report = check_source(source);

        assert_eq!(report.lines, ["__Show_inst_0: {show: Int -> String}"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("no impl of `Show` for `Bool` provides `show`"));
        assert!(report.errors[0].contains("(E3003)"));
    }

    #[test]
    fn test_type_mismatch_carries_line_numbers() {
        let report = check_source("x = 1;\ny = 2;\nz = x + true;");

        assert_eq!(report.lines, ["x: Int", "y: Int"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("[Line 3] Type Error:"));
        assert!(report.errors[0].contains("(E3001)"));
    }

    #[test]
    fn test_impl_mismatch_names_the_missing_method() {
        let source = "trait Pair a where fst: a -> Int; snd: a -> Int; end\n\
             impl Pair for Int where fst = \\x:Int. x; end";
        let report = check_source(source);

        assert_eq!(report.lines, Vec::<String>::new());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("missing method `snd`"));
        assert!(report.errors[0].contains("(E2003)"));
    }

    #[test]
    fn test_every_failing_statement_is_reported() {
        let report = check_source("1 + true;\nfalse + 2;");

        assert_eq!(report.lines, Vec::<String>::new());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].starts_with("[Line 1] Type Error:"));
        assert!(report.errors[1].starts_with("[Line 2] Type Error:"));
    }

    #[test]
    fn test_forward_impl_use_checks_cleanly() {
        // Σ is built from the whole program before any statement checks
        let source = "trait Show a where show: a -> String; end\n\
             early = show @Int 1;\n\
             impl Show for Int where show = int_to_string; end";
        let report = check_source(source);

        assert_eq!(
            report.lines,
            ["early: String", "__Show_inst_0: {show: Int -> String}"]
        );
        assert_eq!(report.errors, Vec::<String>::new());
    }
}
