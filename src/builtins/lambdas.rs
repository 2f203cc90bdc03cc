//! User-defined procedure construction: lambda
//!
//! `lambda` is the one builtin that never evaluates its arguments: the
//! parameter vector and the body are captured as syntax. A parameter
//! name suffixed `...` marks the procedure variadic; the suffix may
//! appear only on the last parameter, and the surplus call arguments
//! are collected into a vector bound under the stripped name.

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE};
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Builtin, Lambda, Value};
use std::rc::Rc;

pub fn builtin_lambda(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(
            location,
            "lambda",
            ARITY_AT_LEAST_ONE,
            0,
        ));
    }

    let param_nodes = match &args[0] {
        Node::Vector { elements, .. } => elements,
        Node::String { .. } => {
            return Err(EvalError::runtime_error(
                location,
                "lambda",
                "expected a parameter vector",
            ));
        }
    };

    let mut params = Vec::with_capacity(param_nodes.len());
    let mut variadic = false;
    for (index, node) in param_nodes.iter().enumerate() {
        let name = match node {
            Node::String { value, .. } => value,
            Node::Vector { .. } => {
                return Err(EvalError::runtime_error(
                    location,
                    "lambda",
                    "parameter names must be bare strings",
                ));
            }
        };
        if let Some(stripped) = name.strip_suffix("...") {
            if index + 1 != param_nodes.len() {
                return Err(EvalError::runtime_error(
                    location,
                    "lambda",
                    "variadic parameter must be last",
                ));
            }
            variadic = true;
            params.push(stripped.to_string());
        } else {
            params.push(name.clone());
        }
    }

    Ok(Value::Lambda(Rc::new(Lambda {
        params,
        variadic,
        body: args[1..].to_vec(),
        env: env.clone(),
    })))
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "lambda",
        Value::Builtin(Builtin { name: "lambda", func: builtin_lambda }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::error::EvalErrorKind;
    use crate::eval::evaluate;
    use crate::parser::parse;

    fn run(source: &str) -> Result<Value, EvalError> {
        let env = Environment::new();
        register_builtins(&env);
        let program = parse(source, SourceLocation::new("test.tart")).expect("parse failure");
        let mut last = Value::String(String::new());
        for node in &program.nodes {
            last = evaluate(node, &env)?;
        }
        Ok(last)
    }

    #[test]
    fn test_constructs_a_lambda() {
        match run("[lambda [a b] [get a]]").unwrap() {
            Value::Lambda(lambda) => {
                assert_eq!(lambda.params, vec!["a", "b"]);
                assert!(!lambda.variadic);
                assert_eq!(lambda.body.len(), 1);
            }
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn test_variadic_suffix_is_stripped() {
        match run("[lambda [a rest...]]").unwrap() {
            Value::Lambda(lambda) => {
                assert_eq!(lambda.params, vec!["a", "rest"]);
                assert!(lambda.variadic);
                assert!(lambda.body.is_empty());
            }
            other => panic!("expected lambda, got {:?}", other),
        }
    }

    #[test]
    fn test_variadic_must_be_last() {
        let err = run("[lambda [rest... a]]").unwrap_err();
        assert!(
            matches!(&err.kind, EvalErrorKind::Runtime { message, .. } if message.contains("last"))
        );
    }

    #[test]
    fn test_params_must_be_a_vector() {
        let err = run("[lambda a [get a]]").unwrap_err();
        assert!(
            matches!(&err.kind, EvalErrorKind::Runtime { message, .. } if message.contains("parameter vector"))
        );
    }

    #[test]
    fn test_params_must_be_bare_strings() {
        let err = run("[lambda [[a]] b]").unwrap_err();
        assert!(
            matches!(&err.kind, EvalErrorKind::Runtime { message, .. } if message.contains("bare strings"))
        );
    }

    #[test]
    fn test_requires_parameter_vector_argument() {
        let err = run("[lambda]").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { .. }));
    }
}
