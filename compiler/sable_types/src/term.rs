//! Core term model.
//!
//! The desugarer lowers the surface AST into these terms; the checker,
//! dispatcher, and evaluator all rewrite and reduce them. Because
//! evaluation is substitution-based, values are terms too: a fully reduced
//! term is a literal, a lambda, a type abstraction, an under-applied
//! builtin, a list or record of values, or `Error`.

use crate::Type;
use sable_ir::{BinaryOp, Name, Span, UnaryOp};

/// Core term with its source span.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Term {
    pub kind: TermKind,
    pub span: Span,
}

impl Term {
    pub fn new(kind: TermKind, span: Span) -> Self {
        Term { kind, span }
    }
}

/// Core term variants.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TermKind {
    // ===== Literals =====
    /// Integer literal
    Int(i64),

    /// Boolean literal
    Bool(bool),

    /// String literal (contents interned)
    Str(Name),

    // ===== Variables and builtins =====
    /// Variable reference
    Var(Name),

    /// Builtin reference; these live in the initial environment and are
    /// substituted in when their names are referenced
    Builtin(Builtin),

    // ===== Abstraction and application =====
    /// Term lambda with a typed parameter
    Lam {
        param: Name,
        param_ty: Type,
        body: Box<Term>,
    },

    /// Type abstraction, possibly with trait bounds on the binder
    TyLam {
        param: Name,
        bounds: Vec<Name>,
        body: Box<Term>,
    },

    /// Application
    App { func: Box<Term>, arg: Box<Term> },

    /// Type application. `bounds` echoes the bounds of the binder being
    /// instantiated; the desugarer leaves it empty and the checker fills
    /// it in, so the dispatcher never reconstructs types.
    TyApp {
        func: Box<Term>,
        arg: Type,
        bounds: Vec<Name>,
    },

    /// Type annotation: checked against, then erased
    Annot { term: Box<Term>, ty: Type },

    // ===== Aggregates =====
    /// List literal
    List(Vec<Term>),

    /// Record literal with fields in declaration order
    Record(Vec<(Name, Term)>),

    /// Field projection
    Proj { base: Box<Term>, label: Name },

    // ===== Control and operators =====
    /// Conditional
    If {
        cond: Box<Term>,
        then_branch: Box<Term>,
        else_branch: Box<Term>,
    },

    /// Binary operation
    Binary {
        op: BinaryOp,
        left: Box<Term>,
        right: Box<Term>,
    },

    /// Unary operation
    Unary { op: UnaryOp, operand: Box<Term> },

    /// The distinguished error value. Not user-writable; produced by
    /// `head` of an empty list and propagated by operators.
    Error,
}

/// The builtin operations wired into the initial environment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Builtin {
    /// `print : String -> String`, writes its argument, returns it
    Print,
    /// `println : String -> String`, like `print` plus a newline
    Println,
    /// `read : String`, reads one input line on each reference
    Read,
    /// `string_to_int : String -> Int`
    StringToInt,
    /// `int_to_string : Int -> String`
    IntToString,
    /// `cons : forall a. a -> [a] -> [a]`
    Cons,
    /// `head : forall a. [a] -> a`, yields `Error` on `[]`
    Head,
    /// `tail : forall a. [a] -> [a]`, yields `[]` on `[]`
    Tail,
}

impl Builtin {
    /// All builtins, for seeding environments.
    pub const ALL: [Builtin; 8] = [
        Builtin::Print,
        Builtin::Println,
        Builtin::Read,
        Builtin::StringToInt,
        Builtin::IntToString,
        Builtin::Cons,
        Builtin::Head,
        Builtin::Tail,
    ];

    /// The source-level name of the builtin.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Println => "println",
            Builtin::Read => "read",
            Builtin::StringToInt => "string_to_int",
            Builtin::IntToString => "int_to_string",
            Builtin::Cons => "cons",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
        }
    }

    /// How many term arguments the builtin consumes. `read` takes none;
    /// it fires when its name is evaluated.
    pub fn arity(self) -> usize {
        match self {
            Builtin::Read => 0,
            Builtin::Cons => 2,
            Builtin::Print
            | Builtin::Println
            | Builtin::StringToInt
            | Builtin::IntToString
            | Builtin::Head
            | Builtin::Tail => 1,
        }
    }
}

/// A lowered top-level statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CoreStmt {
    pub kind: CoreStmtKind,
    pub span: Span,
}

impl CoreStmt {
    pub fn new(kind: CoreStmtKind, span: Span) -> Self {
        CoreStmt { kind, span }
    }

    /// The bound name, for binding statements.
    pub fn bound_name(&self) -> Option<Name> {
        match &self.kind {
            CoreStmtKind::Bind { name, .. } => Some(*name),
            CoreStmtKind::Expr(_) => None,
        }
    }
}

/// Lowered statement variants. Declarations are gone by this point; a
/// `struct` became a constructor binding and an `impl` became a dictionary
/// binding.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CoreStmtKind {
    /// Top-level binding
    Bind { name: Name, value: Term },

    /// Bare expression statement
    Expr(Term),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_and_arities() {
        assert_eq!(Builtin::Print.name(), "print");
        assert_eq!(Builtin::StringToInt.name(), "string_to_int");
        assert_eq!(Builtin::Read.arity(), 0);
        assert_eq!(Builtin::Cons.arity(), 2);
        assert_eq!(Builtin::Head.arity(), 1);
        assert_eq!(Builtin::ALL.len(), 8);
    }

    #[test]
    fn test_bound_name() {
        let interner = sable_ir::SharedInterner::new();
        let x = interner.intern("x");

        let bind = CoreStmt::new(
            CoreStmtKind::Bind {
                name: x,
                value: Term::new(TermKind::Int(1), Span::DUMMY),
            },
            Span::DUMMY,
        );
        assert_eq!(bind.bound_name(), Some(x));

        let expr = CoreStmt::new(
            CoreStmtKind::Expr(Term::new(TermKind::Int(1), Span::DUMMY)),
            Span::DUMMY,
        );
        assert_eq!(expr.bound_name(), None);
    }
}
