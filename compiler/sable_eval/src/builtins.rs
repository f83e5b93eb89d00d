//! Builtin application.
//!
//! Arguments arrive fully evaluated. A builtin that inspects an argument
//! propagates an `Error` found there; `cons` stores its first argument
//! without looking at it, so lists may hold `Error` like any other value,
//! while an `Error` in its list position propagates.

use crate::error::{EvalResult, RuntimeError, RuntimeErrorKind};
use crate::io::IoHandlerImpl;
use sable_ir::{Span, StringInterner};
use sable_types::{Builtin, Term, TermKind};

/// Apply a builtin to its evaluated arguments.
///
/// `read` never reaches here; it takes no arguments and fires when its
/// name is evaluated.
pub(crate) fn apply_builtin(
    builtin: Builtin,
    args: &[Term],
    span: Span,
    io: &IoHandlerImpl,
    interner: &StringInterner,
) -> EvalResult {
    if builtin != Builtin::Cons && args.iter().any(|arg| matches!(arg.kind, TermKind::Error)) {
        return Ok(Term::new(TermKind::Error, span));
    }

    match (builtin, args) {
        (Builtin::Print, [arg]) => {
            let TermKind::Str(contents) = &arg.kind else {
                return stuck(builtin, span);
            };
            io.write(interner.lookup(*contents));
            Ok(arg.clone())
        }
        (Builtin::Println, [arg]) => {
            let TermKind::Str(contents) = &arg.kind else {
                return stuck(builtin, span);
            };
            io.writeln(interner.lookup(*contents));
            Ok(arg.clone())
        }
        (Builtin::StringToInt, [arg]) => {
            let TermKind::Str(contents) = &arg.kind else {
                return stuck(builtin, span);
            };
            let text = interner.lookup(*contents);
            match text.parse::<i64>() {
                Ok(value) => Ok(Term::new(TermKind::Int(value), span)),
                Err(_) => Err(RuntimeError::new(
                    RuntimeErrorKind::MalformedInt {
                        input: text.to_string(),
                    },
                    span,
                )),
            }
        }
        (Builtin::IntToString, [arg]) => {
            let TermKind::Int(value) = &arg.kind else {
                return stuck(builtin, span);
            };
            let contents = interner.intern(&value.to_string());
            Ok(Term::new(TermKind::Str(contents), span))
        }
        (Builtin::Cons, [first, rest]) => {
            if matches!(rest.kind, TermKind::Error) {
                return Ok(Term::new(TermKind::Error, span));
            }
            let TermKind::List(items) = &rest.kind else {
                return stuck(builtin, span);
            };
            let mut extended = Vec::with_capacity(items.len() + 1);
            extended.push(first.clone());
            extended.extend(items.iter().cloned());
            Ok(Term::new(TermKind::List(extended), span))
        }
        (Builtin::Head, [arg]) => {
            let TermKind::List(items) = &arg.kind else {
                return stuck(builtin, span);
            };
            match items.first() {
                Some(first) => Ok(first.clone()),
                None => Ok(Term::new(TermKind::Error, span)),
            }
        }
        (Builtin::Tail, [arg]) => {
            let TermKind::List(items) = &arg.kind else {
                return stuck(builtin, span);
            };
            let rest = if items.is_empty() {
                Vec::new()
            } else {
                items[1..].to_vec()
            };
            Ok(Term::new(TermKind::List(rest), span))
        }
        _ => stuck(builtin, span),
    }
}

fn stuck(builtin: Builtin, span: Span) -> EvalResult {
    Err(RuntimeError::new(
        RuntimeErrorKind::Stuck {
            what: format!("`{}` applied to an incompatible value", builtin.name()),
        },
        span,
    ))
}
