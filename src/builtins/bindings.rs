//! Name binding operations: let, set, get
//!
//! - `let`: declare a name in the current scope; shadowing within the
//!   same scope is an error
//! - `set`: overwrite a name already declared in the current scope
//! - `get`: look a name up through the scope chain
//!
//! `set` deliberately does not search enclosing scopes: a document that
//! wants to mutate an outer binding must do so from the scope that
//! declared it. `let` and `set` both return the empty string.

use crate::env::Environment;
use crate::error::{EvalError, EvalErrorKind, ARITY_ONE, ARITY_TWO};
use crate::eval::evaluate;
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Builtin, Value};
use std::rc::Rc;

/// Evaluate an argument that must name a binding.
fn identifier(
    location: &SourceLocation,
    function: &str,
    node: &Node,
    env: &Rc<Environment>,
) -> Result<String, EvalError> {
    match evaluate(node, env)? {
        Value::String(name) => Ok(name),
        other => Err(EvalError::type_error(location, function, "string", &other, 1)),
    }
}

pub fn builtin_let(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(location, "let", ARITY_TWO, args.len()));
    }

    let name = identifier(location, "let", &args[0], env)?;
    let value = evaluate(&args[1], env)?;
    env.declare(&name, value)
        .map_err(|kind| EvalError::new(location.clone(), kind))?;
    Ok(Value::String(String::new()))
}

pub fn builtin_set(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(location, "set", ARITY_TWO, args.len()));
    }

    let name = identifier(location, "set", &args[0], env)?;
    let value = evaluate(&args[1], env)?;
    env.set(&name, value)
        .map_err(|kind| EvalError::new(location.clone(), kind))?;
    Ok(Value::String(String::new()))
}

pub fn builtin_get(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(location, "get", ARITY_ONE, args.len()));
    }

    let name = identifier(location, "get", &args[0], env)?;
    env.get(&name)
        .ok_or_else(|| EvalError::new(location.clone(), EvalErrorKind::UndeclaredVariable(name)))
}

/// Register the binding builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define("let", Value::Builtin(Builtin { name: "let", func: builtin_let }));
    env.define("set", Value::Builtin(Builtin { name: "set", func: builtin_set }));
    env.define("get", Value::Builtin(Builtin { name: "get", func: builtin_get }));
}
