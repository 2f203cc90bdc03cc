//! Text assembly operations: string, join, cat
//!
//! - `string`: whitespace-aware assembly of its stringified arguments,
//!   the same rule the driver applies to a document's top level
//! - `join`: stringify a vector's elements and join with a separator
//! - `cat`: concatenation of strings or of vectors, never a mixture

use crate::env::Environment;
use crate::error::{EvalError, ARITY_TWO};
use crate::eval::evaluate;
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{assemble, Builtin, Value};
use std::rc::Rc;

pub fn builtin_string(
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
        parts.push(part);
    }
    Ok(Value::String(assemble(parts)))
}

pub fn builtin_join(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(location, "join", ARITY_TWO, args.len()));
    }

    let separator = match evaluate(&args[0], env)? {
        Value::String(s) => s,
        other => return Err(EvalError::type_error(location, "join", "string", &other, 1)),
    };
    let items = match evaluate(&args[1], env)? {
        Value::Vector(items) => items,
        other => return Err(EvalError::type_error(location, "join", "vector", &other, 2)),
    };

    let mut rendered = Vec::with_capacity(items.len());
    for item in &items {
        let part = item
            .stringify()
            .map_err(|kind| EvalError::new(args[1].location().clone(), kind))?;
        rendered.push(part);
    }
    Ok(Value::String(rendered.join(&separator)))
}

pub fn builtin_cat(
    location: &SourceLocation,
    args: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Ok(Value::String(String::new()));
    }

    match evaluate(&args[0], env)? {
        Value::String(mut acc) => {
            for (index, node) in args[1..].iter().enumerate() {
                match evaluate(node, env)? {
                    Value::String(s) => acc.push_str(&s),
                    other => {
                        return Err(EvalError::type_error(
                            location,
                            "cat",
                            "string",
                            &other,
                            index + 2,
                        ));
                    }
                }
            }
            Ok(Value::String(acc))
        }
        Value::Vector(mut acc) => {
            for (index, node) in args[1..].iter().enumerate() {
                match evaluate(node, env)? {
                    Value::Vector(items) => acc.extend(items),
                    other => {
                        return Err(EvalError::type_error(
                            location,
                            "cat",
                            "vector",
                            &other,
                            index + 2,
                        ));
                    }
                }
            }
            Ok(Value::Vector(acc))
        }
        other => Err(EvalError::type_error(
            location,
            "cat",
            "string or vector",
            &other,
            1,
        )),
    }
}

/// Register the text assembly builtins in the environment
pub fn register(env: &Rc<Environment>) {
    env.define(
        "string",
        Value::Builtin(Builtin { name: "string", func: builtin_string }),
    );
    env.define("join", Value::Builtin(Builtin { name: "join", func: builtin_join }));
    env.define("cat", Value::Builtin(Builtin { name: "cat", func: builtin_cat }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::error::EvalErrorKind;
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

    fn expect_string(result: Result<Value, EvalError>) -> String {
        match result.unwrap() {
            Value::String(s) => s,
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_string_assembles_with_spaces() {
        assert_eq!(expect_string(run("[string hello world]")), "hello world");
    }

    #[test]
    fn test_string_zero_args() {
        assert_eq!(expect_string(run("[string]")), "");
    }

    #[test]
    fn test_string_drops_empty_results() {
        assert_eq!(expect_string(run("[string [let x 1] hello]")), "hello");
    }

    #[test]
    fn test_string_whitespace_boundaries() {
        assert_eq!(expect_string(run("[string a \"\\n\" b]")), "a\nb");
        assert_eq!(expect_string(run("[string \"a \" b]")), "a b");
    }

    #[test]
    fn test_string_refuses_builtin_argument() {
        let err = run("[string [get print]]").unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StringifyBuiltin);
    }

    #[test]
    fn test_join_with_separator() {
        assert_eq!(expect_string(run("[join , [vector 1 2 3]]")), "1,2,3");
    }

    #[test]
    fn test_join_empty_and_singleton() {
        assert_eq!(expect_string(run("[join , [vector]]")), "");
        assert_eq!(expect_string(run("[join , [vector only]]")), "only");
    }

    #[test]
    fn test_join_keeps_empty_elements() {
        // unlike `string`, join does not drop empty parts
        assert_eq!(expect_string(run("[join , [vector a \"\" b]]")), "a,,b");
    }

    #[test]
    fn test_join_type_errors_cite_position() {
        let err = run("[join [vector] [vector]]").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch { position: 1, .. }
        ));

        let err = run("[join , x]").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch { position: 2, .. }
        ));
    }

    #[test]
    fn test_cat_strings() {
        assert_eq!(expect_string(run("[cat ab cd ef]")), "abcdef");
    }

    #[test]
    fn test_cat_zero_args() {
        assert_eq!(expect_string(run("[cat]")), "");
    }

    #[test]
    fn test_cat_vectors() {
        match run("[cat [vector a] [vector b c]]").unwrap() {
            Value::Vector(items) => assert_eq!(items.len(), 3),
            other => panic!("expected vector, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_identity_elements() {
        assert_eq!(expect_string(run("[cat \"\" x \"\"]")), "x");
        match run("[cat [vector] [vector a]]").unwrap() {
            Value::Vector(items) => assert_eq!(items.len(), 1),
            other => panic!("expected vector, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_rejects_mixed_types() {
        let err = run("[cat ab [vector c]]").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch { position: 2, .. }
        ));
    }

    #[test]
    fn test_cat_rejects_lambda() {
        let err = run("[cat [lambda []]]").unwrap_err();
        assert!(matches!(
            err.kind,
            EvalErrorKind::TypeMismatch { position: 1, .. }
        ));
    }
}
