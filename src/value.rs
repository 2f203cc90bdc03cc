// ABOUTME: Value types representing Tart runtime data

use crate::env::Environment;
use crate::error::{EvalError, EvalErrorKind};
use crate::lexer::SourceLocation;
use crate::parser::Node;
use std::fmt;
use std::rc::Rc;

/// The calling convention for primitives: the call-site location, the
/// *unevaluated* argument nodes, and the environment of the call. Builtins
/// decide for themselves what to evaluate, which is what lets `lambda`
/// capture its body as syntax.
pub type BuiltinFn = fn(&SourceLocation, &[Node], &Rc<Environment>) -> Result<Value, EvalError>;

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// A user-defined procedure together with its captured environment.
/// `params` holds the variadic tail with the `...` suffix already
/// stripped; `variadic` remembers that it was there.
pub struct Lambda {
    pub params: Vec<String>,
    pub variadic: bool,
    pub body: Vec<Node>,
    pub env: Rc<Environment>,
}

// The captured environment routinely contains the lambda itself, so the
// derived Debug would recurse forever.
impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("params", &self.params)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Vector(Vec<Value>),
    Lambda(Rc<Lambda>),
    Builtin(Builtin),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::Lambda(_) => "lambda",
            Value::Builtin(_) => "builtin",
        }
    }

    /// Render a value as document text.
    ///
    /// Vectors stringify their elements, drop the empty ones, and join the
    /// rest with a single space. Lambdas render a diagnostic form with no
    /// stability promise. Builtins are opaque and refuse.
    pub fn stringify(&self) -> Result<String, EvalErrorKind> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Vector(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    let part = item.stringify()?;
                    if !part.is_empty() {
                        parts.push(part);
                    }
                }
                Ok(parts.join(" "))
            }
            Value::Lambda(lambda) => {
                let mut params = lambda.params.clone();
                if lambda.variadic {
                    if let Some(last) = params.last_mut() {
                        last.push_str("...");
                    }
                }
                Ok(format!("[lambda [{}] ...]", params.join(" ")))
            }
            Value::Builtin(_) => Err(EvalErrorKind::StringifyBuiltin),
        }
    }
}

/// Combine already-stringified parts with whitespace-aware separation.
///
/// Empty parts are dropped. Between consecutive parts a single ASCII space
/// is inserted, unless the accumulator already ends in whitespace or the
/// next part begins with whitespace. Explicit `"\n"` and `"\t"` strings
/// therefore control layout without picking up extra spacing.
pub fn assemble<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            let left_ws = out.chars().next_back().is_some_and(char::is_whitespace);
            let right_ws = part.chars().next().is_some_and(char::is_whitespace);
            if !left_ws && !right_ws {
                out.push(' ');
            }
        }
        out.push_str(&part);
    }
    out
}
