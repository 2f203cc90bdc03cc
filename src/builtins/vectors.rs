//! Vector operations: vector, map
//!
//! Vectors are produced whole and never mutated afterwards; `map` builds
//! a fresh vector from the results of applying a lambda to each element.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_TWO};
use crate::eval::{apply_lambda, evaluate};
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Builtin, Value};
use std::rc::Rc;

/// Collects the evaluated arguments into a vector, preserving order.
pub fn builtin_vector(
    _location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let mut items = Vec::with_capacity(args.len());
    for node in args {
        items.push(evaluate(node, env)?);
    }
    Ok(Value::Vector(items))
}

/// Applies a lambda to each element, yielding the vector of results.
pub fn builtin_map(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(location, "map", ARITY_TWO, args.len()));
    }

    let lambda = match evaluate(&args[0], env)? {
        Value::Lambda(lambda) => lambda,
        other => return Err(EvalError::type_error(location, "map", "lambda", &other, 1)),
    };
    let items = match evaluate(&args[1], env)? {
        Value::Vector(items) => items,
        other => return Err(EvalError::type_error(location, "map", "vector", &other, 2)),
    };

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        results.push(apply_lambda(&lambda, vec![item], location)?);
    }
    Ok(Value::Vector(results))
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "vector",
        Value::Builtin(Builtin { name: "vector", func: builtin_vector }),
    );
    env.define("map", Value::Builtin(Builtin { name: "map", func: builtin_map }));
}
