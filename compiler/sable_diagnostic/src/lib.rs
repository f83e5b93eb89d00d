//! Diagnostics for every stage of the Sable pipeline.
//!
//! Each user-facing failure is a [`Diagnostic`]: an error code, a message,
//! and labeled spans into the source text. Line numbers are not stored on
//! the diagnostic; the renderer recovers them from the span and the source
//! (see [`span_utils`] and [`render`]).

pub mod render;
pub mod span_utils;

use sable_ir::Span;
use std::fmt;

/// Error codes for all pipeline diagnostics.
///
/// Format: E#### where the first digit names the stage:
/// - E0xxx: lexer errors
/// - E1xxx: parser errors
/// - E2xxx: declaration and context errors
/// - E3xxx: type errors
/// - E4xxx: runtime errors
/// - E9xxx: internal consistency failures
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // ===== Lexer Errors (E0xxx) =====
    /// Character with no token interpretation
    E0001,
    /// Unterminated string literal
    E0002,
    /// Integer literal out of range
    E0003,

    // ===== Parser Errors (E1xxx) =====
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected type
    E1003,
    /// Duplicate label in a record, struct, trait, or impl body
    E1004,

    // ===== Declaration Errors (E2xxx) =====
    /// Duplicate declaration of a struct or trait name
    E2001,
    /// Reference to an undeclared struct or trait
    E2002,
    /// Impl methods do not match the trait's method table
    E2003,
    /// Second impl of a trait for the same type
    E2004,

    // ===== Type Errors (E3xxx) =====
    /// Type mismatch
    E3001,
    /// Unbound variable
    E3002,
    /// Unsatisfied trait bound at a type application
    E3003,
    /// Type-argument inference failed
    E3004,

    // ===== Runtime Errors (E4xxx) =====
    /// Division by zero
    E4001,
    /// Malformed `string_to_int` input
    E4002,
    /// Unbound name at evaluation time
    E4003,

    // ===== Internal Errors (E9xxx) =====
    /// Dispatcher consistency failure
    E9001,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E3001").
    pub fn as_str(self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            // Declaration
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Type
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            // Runtime
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// The stage category used in rendered headers ("Syntax", "Type", ...).
    pub fn category(self) -> &'static str {
        match self {
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003 | ErrorCode::E1001
            | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004 => "Syntax",
            ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003 | ErrorCode::E2004 => {
                "Declaration"
            }
            ErrorCode::E3001 | ErrorCode::E3002 | ErrorCode::E3003 | ErrorCode::E3004 => "Type",
            ErrorCode::E4001 | ErrorCode::E4002 | ErrorCode::E4003 => "Runtime",
            ErrorCode::E9001 => "Internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic: error code, message, labeled spans, and notes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

// ===== Diagnostic Helpers =====

/// Create an "unexpected character" lex diagnostic.
///
/// `column` is 1-based and char-counted, per [`span_utils::offset_to_line_col`].
pub fn unknown_character(span: Span, ch: char, column: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E0001)
        .with_message(format!("unexpected character `{ch}` at column {column}"))
        .with_label(span, "no token starts with this character")
}

/// Create an "unexpected token" parse diagnostic.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("expected {expected}, found {found}"))
        .with_label(span, format!("expected {expected}"))
}

/// Create a "duplicate label" parse diagnostic.
pub fn duplicate_label(span: Span, label: &str, context: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004)
        .with_message(format!("duplicate label `{label}` in {context}"))
        .with_label(span, "label appears twice")
}

/// Create a "duplicate declaration" diagnostic.
pub fn duplicate_declaration(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message(format!("duplicate declaration of `{name}`"))
        .with_label(span, "name already declared")
}

/// Create an "unknown declaration" diagnostic.
pub fn unknown_declaration(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message(format!("unknown declaration `{name}`"))
        .with_label(span, "not a declared struct, trait, or builtin type")
}

/// Create a "type mismatch" diagnostic.
pub fn type_mismatch(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3001)
        .with_message(format!("expected `{expected}`, found `{found}`"))
        .with_label(span, format!("this has type `{found}`"))
}

/// Create an "unbound variable" diagnostic.
pub fn unbound_variable(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002)
        .with_message(format!("unbound variable `{name}`"))
        .with_label(span, "not found in this scope")
}

/// Create an "unsatisfied trait bound" diagnostic.
///
/// `method` names the trait method being dispatched, when the failure came
/// from a method reference rather than a plain type application.
pub fn unsatisfied_bound(
    span: Span,
    ty: &str,
    trait_name: &str,
    method: Option<&str>,
) -> Diagnostic {
    let message = match method {
        Some(m) => format!("no impl of `{trait_name}` for `{ty}` provides `{m}`"),
        None => format!("`{ty}` does not satisfy the bound `{trait_name}`"),
    };
    Diagnostic::error(ErrorCode::E3003)
        .with_message(message)
        .with_label(span, format!("the bound `{trait_name}` is not satisfied here"))
}

/// Create an internal consistency diagnostic.
///
/// Internal failures indicate a defect in the pipeline itself, not in the
/// user's program; the message says so explicitly.
pub fn internal_error(span: Span, detail: impl Into<String>) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(detail)
        .with_label(span, "while processing this statement")
        .with_note("this is a defect in the interpreter, not in your program")
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}
