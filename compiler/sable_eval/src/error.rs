//! Runtime errors.
//!
//! Evaluation failures are values of [`RuntimeError`]: a kind plus the span
//! of the term that was being reduced. The driver converts them to
//! [`Diagnostic`]s for rendering; the kind decides the error code and the
//! label text.

use sable_diagnostic::{internal_error, Diagnostic, ErrorCode};
use sable_ir::Span;
use thiserror::Error;

/// Result of evaluating a term.
pub type EvalResult = Result<sable_types::Term, RuntimeError>;

/// What went wrong during evaluation.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum RuntimeErrorKind {
    /// Integer division with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `string_to_int` applied to text that is not a decimal integer.
    #[error("`string_to_int` cannot parse {input:?}")]
    MalformedInt { input: String },

    /// A variable with no binding in the global environment.
    ///
    /// The checker rules these out for ordinary programs, but a trait
    /// method used before its impl's dictionary binding has been evaluated
    /// still reaches this point.
    #[error("unbound name `{name}`")]
    UnboundName { name: String },

    /// A well-typed program reached a reduction no rule covers.
    ///
    /// This means a bug upstream (checker or dispatcher), so it renders as
    /// an internal error rather than a user-program error.
    #[error("evaluation got stuck: {what}")]
    Stuck { what: String },
}

/// A runtime error carrying the span of the offending term.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, span: Span) -> Self {
        RuntimeError { kind, span }
    }

    /// The error code this kind reports under.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            RuntimeErrorKind::DivisionByZero => ErrorCode::E4001,
            RuntimeErrorKind::MalformedInt { .. } => ErrorCode::E4002,
            RuntimeErrorKind::UnboundName { .. } => ErrorCode::E4003,
            RuntimeErrorKind::Stuck { .. } => ErrorCode::E9001,
        }
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.kind {
            RuntimeErrorKind::DivisionByZero => "the divisor is zero",
            RuntimeErrorKind::MalformedInt { .. } => "not a decimal integer",
            RuntimeErrorKind::UnboundName { .. } => "no value bound to this name",
            RuntimeErrorKind::Stuck { .. } => {
                return internal_error(self.span, self.kind.to_string());
            }
        };
        Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_messages() {
        assert_eq!(RuntimeErrorKind::DivisionByZero.to_string(), "division by zero");
        let malformed = RuntimeErrorKind::MalformedInt {
            input: "abc".to_string(),
        };
        assert_eq!(malformed.to_string(), "`string_to_int` cannot parse \"abc\"");
        let unbound = RuntimeErrorKind::UnboundName {
            name: "show".to_string(),
        };
        assert_eq!(unbound.to_string(), "unbound name `show`");
    }

    #[test]
    fn test_codes() {
        let at = |kind| RuntimeError::new(kind, Span::new(0, 1));
        assert_eq!(at(RuntimeErrorKind::DivisionByZero).code(), ErrorCode::E4001);
        let malformed = at(RuntimeErrorKind::MalformedInt {
            input: String::new(),
        });
        assert_eq!(malformed.code(), ErrorCode::E4002);
        let stuck = at(RuntimeErrorKind::Stuck {
            what: "test".to_string(),
        });
        assert_eq!(stuck.code(), ErrorCode::E9001);
    }

    #[test]
    fn test_user_error_diagnostic() {
        let error = RuntimeError::new(RuntimeErrorKind::DivisionByZero, Span::new(4, 9));
        let diag = error.to_diagnostic();

        assert_eq!(diag.code, ErrorCode::E4001);
        assert_eq!(diag.message, "division by zero");
        assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn test_stuck_renders_as_internal() {
        let error = RuntimeError::new(
            RuntimeErrorKind::Stuck {
                what: "projecting from an integer".to_string(),
            },
            Span::new(0, 3),
        );
        let diag = error.to_diagnostic();

        assert_eq!(diag.code, ErrorCode::E9001);
        assert!(diag.message.contains("got stuck"));
        assert!(diag.notes[0].contains("defect in the interpreter"));
    }
}
