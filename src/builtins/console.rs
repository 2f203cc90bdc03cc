//! Console output: print
//!
//! `print` is a debugging aid: it stringifies its arguments, drops the
//! empty ones, joins with single spaces, and always appends a newline.
//! Document assembly goes through `string` and the top-level emitter
//! instead, which apply the whitespace-aware rule.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::evaluate;
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Builtin, Value};
use std::rc::Rc;

/// Prints stringified arguments to stdout as one line. Returns `""`.
pub fn builtin_print(
    _location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let mut parts = Vec::with_capacity(args.len());
    for node in args {
        let value = evaluate(node, env)?;
        let part = value
            .stringify()
            .map_err(|kind| EvalError::new(node.location().clone(), kind))?;
        if !part.is_empty() {
            parts.push(part);
        }
    }
    println!("{}", parts.join(" "));
    Ok(Value::String(String::new()))
}

/// Register the console builtin in the environment
pub fn register(env: &Rc<Environment>) {
    env.define("print", Value::Builtin(Builtin { name: "print", func: builtin_print }));
}
