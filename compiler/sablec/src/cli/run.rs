//! The `run` command: check, dispatch, and evaluate statement by statement.

use std::sync::Arc;

use sable_diagnostic::render::render;
use sable_dispatch::Dispatcher;
use sable_eval::{stdio_handler, Evaluator, SharedIo};
use sable_typeck::Checker;

use super::{print_report, read_file, type_line, value_line};
use crate::pipeline;

/// What a run produced: one value line per evaluated statement (with a
/// type line above each when tracing), and rendered diagnostics in the
/// order they surfaced.
pub struct RunReport {
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

/// Evaluate Sable source against the given I/O handler.
///
/// A statement that fails to check is reported and skipped; later
/// statements still check and evaluate against the context built so far.
/// A runtime error is final: the program's remaining statements could
/// only observe a world the failed one never finished building.
pub fn run_source(source: &str, io: &SharedIo, trace: bool) -> RunReport {
    let loaded = match pipeline::load(source) {
        Ok(loaded) => loaded,
        Err(diags) => {
            return RunReport {
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
    let mut dispatcher = Dispatcher::new(&loaded.interner, &loaded.signatures, &loaded.registry);
    let mut evaluator = Evaluator::new(&loaded.interner, Arc::clone(io));

    for stmt in &loaded.stmts {
        if stmt
            .bound_name()
            .is_some_and(|name| loaded.rejected.contains(&name))
        {
            continue;
        }

        let checked = match checker.check_stmt(stmt) {
            Ok(checked) => checked,
            Err(diag) => {
                errors.push(render(&diag, source));
                continue;
            }
        };
        let dispatched = match dispatcher.dispatch_stmt(&checked.stmt) {
            Ok(dispatched) => dispatched,
            Err(diag) => {
                errors.push(render(&diag, source));
                continue;
            }
        };

        if trace {
            lines.push(type_line(stmt.bound_name(), &checked.ty, &loaded.interner));
        }
        match evaluator.eval_stmt(&dispatched) {
            Ok(evaluated) => {
                lines.push(value_line(
                    evaluated.name,
                    &evaluated.value,
                    &loaded.interner,
                ));
            }
            Err(err) => {
                errors.push(render(&err.to_diagnostic(), source));
                break;
            }
        }
    }

    RunReport { lines, errors }
}

/// Run a file against real stdin/stdout and print the report.
pub fn run_file(path: &str, trace: bool) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let io = stdio_handler();
    let report = run_source(&source, &io, trace);
    print_report(&report.lines, &report.errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sable_eval::buffer_handler;

    fn run_captured(source: &str, inputs: Vec<String>, trace: bool) -> (RunReport, String) {
        let io = buffer_handler(inputs);
        let report = run_source(source, &io, trace);
        let output = io.output();
        (report, output)
    }

    #[test]
    fn test_values_print_in_statement_order() {
        let (report, _) = run_captured("x = 1 + 2 * 3;\nx - 7;", Vec::new(), false);

        assert_eq!(report.lines, ["x = 7", "0"]);
        assert_eq!(report.errors, Vec::<String>::new());
    }

    #[test]
    fn test_trace_adds_type_lines() {
        let (report, _) = run_captured("x = 1 + 2 * 3;\nx - 7;", Vec::new(), true);

        assert_eq!(report.lines, ["x: Int", "x = 7", "Int", "0"]);
    }

    #[test]
    fn test_constrained_abstraction_dispatches() {
        let source = "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end\n\
             show_twice = \\T impl Show. \\x:T. (show x) + (show x);\n\
             show_twice @Int 1;";
        let (report, _) = run_captured(source, Vec::new(), false);

        assert_eq!(report.errors, Vec::<String>::new());
        assert_eq!(
            report.lines,
            [
                "__Show_inst_0 = {show = <builtin int_to_string>}",
                "show_twice = <forall>",
                "\"11\"",
            ]
        );
    }

    #[test]
    fn test_dispatch_sites_share_one_dictionary() {
        let source = "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end\n\
             a = show @Int 1;\n\
             b = show @Int 2;\n\
             a + b;";
        let (report, _) = run_captured(source, Vec::new(), false);

        assert_eq!(
            report.lines,
            [
                "__Show_inst_0 = {show = <builtin int_to_string>}",
                "a = \"1\"",
                "b = \"2\"",
                "\"12\"",
            ]
        );
    }

    #[test]
    fn test_head_of_empty_list_is_the_error_value() {
        let (report, _) = run_captured("head ([] @Int);", Vec::new(), false);

        // `Error` is a value, not a diagnostic
        assert_eq!(report.lines, ["Error"]);
        assert_eq!(report.errors, Vec::<String>::new());
    }

    #[test]
    fn test_runtime_error_stops_the_run() {
        let (report, _) = run_captured("x = 1;\n1 / (x - x);\n999;", Vec::new(), false);

        assert_eq!(report.lines, ["x = 1"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("[Line 2] Runtime Error: division by zero"));
        assert!(report.errors[0].contains("(E4001)"));
    }

    #[test]
    fn test_check_error_skips_statement_but_run_continues() {
        let (report, _) = run_captured("x = 1 + true;\ny = 2;\ny + 1;", Vec::new(), false);

        assert_eq!(report.lines, ["y = 2", "3"]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("[Line 1] Type Error:"));
    }

    #[test]
    fn test_forward_impl_use_fails_at_runtime() {
        let source = "trait Show a where show: a -> String; end\n\
             early = show @Int 1;\n\
             impl Show for Int where show = int_to_string; end";
        let (report, _) = run_captured(source, Vec::new(), false);

        // Σ is complete before checking, so `early` checks; the
        // dictionary binding has not evaluated yet when `early` runs
        assert_eq!(report.lines, Vec::<String>::new());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0]
            .starts_with("[Line 2] Runtime Error: unbound name `__Show_inst_0`"));
        assert!(report.errors[0].contains("(E4003)"));
    }

    #[test]
    fn test_rejected_impl_binding_is_skipped() {
        let source = "trait Show a where show: a -> String; end\n\
             impl Show for Int where show = int_to_string; end\n\
             impl Show for Int where show = int_to_string; end\n\
             show @Int 3;";
        let (report, _) = run_captured(source, Vec::new(), false);

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("duplicate impl of `Show` for `Int`"));
        // The first impl's dictionary still evaluates and dispatches
        assert_eq!(
            report.lines,
            [
                "__Show_inst_0 = {show = <builtin int_to_string>}",
                "\"3\"",
            ]
        );
    }

    #[test]
    fn test_program_output_is_separate_from_the_trace() {
        let (report, output) = run_captured("println \"hi\";\n5;", Vec::new(), false);

        assert_eq!(output, "hi\n");
        // `println` returns its argument, so the trace still shows it
        assert_eq!(report.lines, ["\"hi\"", "5"]);
    }

    #[test]
    fn test_scripted_input_feeds_read() {
        let (report, _) = run_captured(
            "string_to_int read + 1;",
            vec!["41".to_string()],
            false,
        );

        assert_eq!(report.lines, ["42"]);
    }

    #[test]
    fn test_load_failure_produces_no_lines() {
        let (report, _) = run_captured("x = ;", Vec::new(), false);

        assert_eq!(report.lines, Vec::<String>::new());
        assert!(!report.errors.is_empty());
        assert!(report.errors[0].contains("Syntax Error"));
    }
}
