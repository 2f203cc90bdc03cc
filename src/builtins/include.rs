//! Source inclusion: run
//!
//! `run` is the module mechanism: the referenced document executes
//! against the *caller's* environment, so every binding it introduces
//! persists after the call. Paths resolve relative to the directory of
//! the document currently executing, as named by the `file` binding;
//! `file` is swapped to the included document for its duration and
//! restored afterward, whether or not it succeeded.

use crate::env::Environment;
use crate::error::{EvalError, EvalErrorKind, TartError, ARITY_ONE};
use crate::eval::evaluate;
use crate::interp::execute_document;
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Builtin, Value};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn builtin_run(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(location, "run", ARITY_ONE, args.len()));
    }

    let operand = match evaluate(&args[0], env)? {
        Value::String(path) => path,
        other => return Err(EvalError::type_error(location, "run", "string", &other, 1)),
    };

    let current = match env.get("file") {
        Some(Value::String(path)) => path,
        Some(other) => {
            return Err(EvalError::runtime_error(
                location,
                "run",
                format!("`file` is bound to a {}, not a string", other.type_name()),
            ));
        }
        None => {
            return Err(EvalError::new(
                location.clone(),
                EvalErrorKind::UndeclaredVariable("file".to_string()),
            ));
        }
    };

    let base = Path::new(&current)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let target = base.join(&operand);
    let canonical = fs::canonicalize(&target).map_err(|err| {
        EvalError::runtime_error(
            location,
            "run",
            format!("cannot read `{}`: {}", target.display(), err),
        )
    })?;
    let source = fs::read_to_string(&canonical).map_err(|err| {
        EvalError::runtime_error(
            location,
            "run",
            format!("cannot read `{}`: {}", canonical.display(), err),
        )
    })?;

    let included = canonical.to_string_lossy().into_owned();
    debug!("including {included}");

    env.rebind("file", Value::String(included.clone()))
        .map_err(|kind| EvalError::new(location.clone(), kind))?;
    let result = execute_document(&source, SourceLocation::new(included), env);
    env.rebind("file", Value::String(current))
        .map_err(|kind| EvalError::new(location.clone(), kind))?;

    match result {
        // the included document's own output is discarded; only its
        // bindings and side effects persist
        Ok(_) => Ok(Value::String(String::new())),
        Err(TartError::Eval(err)) => Err(err),
        Err(other) => Err(EvalError::runtime_error(location, "run", other.to_string())),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define("run", Value::Builtin(Builtin { name: "run", func: builtin_run }));
}
