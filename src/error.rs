// ABOUTME: Error types for lexing, parsing, and evaluation failures

use crate::lexer::SourceLocation;
use crate::value::Value;
use thiserror::Error;

// ===== Arity constant strings (eliminates allocations in error paths) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";

/// What went wrong while turning source text into a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid escape character")]
    InvalidEscape,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("newline in string literal")]
    NewlineInString,

    #[error("expected `]` before end of file")]
    UnbalancedBracket,

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
}

/// A lexical or syntactic failure pinned to the token that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{location}] {kind}")]
pub struct ParseError {
    pub location: SourceLocation,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(location: SourceLocation, kind: ParseErrorKind) -> Self {
        ParseError { location, kind }
    }
}

/// What went wrong while evaluating a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Type mismatch with function name, expected type, actual type, and position
    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    /// Arity error with function name, expected count/range, and actual count
    #[error("{function}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    ArityMismatch {
        function: String,
        expected: String, // "2", "at least 1"
        actual: usize,
    },

    #[error("use of undeclared variable `{0}`")]
    UndeclaredVariable(String),

    #[error("variable `{0}` is already declared in this scope")]
    Redeclaration(String),

    #[error("attempted procedure call on an empty vector")]
    EmptyCall,

    #[error("expression is not callable")]
    NotCallable,

    #[error("attempted to stringify builtin")]
    StringifyBuiltin,

    #[error("evaluation exceeded the recursion limit of {0}")]
    RecursionLimit(usize),

    /// Runtime error with function context
    #[error("{function}: {message}")]
    Runtime { function: String, message: String },
}

/// An evaluation failure annotated with the call site it was observed at.
///
/// Every vector call re-locates errors escaping it, so the surfaced
/// diagnostic names the outermost call rather than the builtin that
/// first noticed the problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{location}] {kind}")]
pub struct EvalError {
    pub location: SourceLocation,
    pub kind: EvalErrorKind,
}

impl EvalError {
    pub fn new(location: SourceLocation, kind: EvalErrorKind) -> Self {
        EvalError { location, kind }
    }

    /// Re-pin this error to an enclosing call site.
    pub fn at(mut self, location: &SourceLocation) -> Self {
        self.location = location.clone();
        self
    }

    /// Create a type mismatch error with full context
    pub fn type_error(
        location: &SourceLocation,
        function: &str,
        expected: &str,
        actual: &Value,
        position: usize,
    ) -> Self {
        EvalError::new(
            location.clone(),
            EvalErrorKind::TypeMismatch {
                function: function.to_string(),
                expected: expected.to_string(),
                actual: actual.type_name().to_string(),
                position,
            },
        )
    }

    /// Create an arity error with expected and actual counts
    pub fn arity_error(
        location: &SourceLocation,
        function: &str,
        expected: impl Into<String>,
        actual: usize,
    ) -> Self {
        EvalError::new(
            location.clone(),
            EvalErrorKind::ArityMismatch {
                function: function.to_string(),
                expected: expected.into(),
                actual,
            },
        )
    }

    /// Create a runtime error with function context
    pub fn runtime_error(
        location: &SourceLocation,
        function: &str,
        message: impl Into<String>,
    ) -> Self {
        EvalError::new(
            location.clone(),
            EvalErrorKind::Runtime {
                function: function.to_string(),
                message: message.into(),
            },
        )
    }
}

/// Everything the driver can fail with.
#[derive(Error, Debug)]
pub enum TartError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot read `{path}`: {message}")]
    Io { path: String, message: String },
}
