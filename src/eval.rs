// ABOUTME: Evaluator module executing parsed Tart expressions

use crate::config;
use crate::env::Environment;
use crate::error::{EvalError, EvalErrorKind};
use crate::lexer::SourceLocation;
use crate::parser::Node;
use crate::value::{Lambda, Value};
use std::cell::Cell;
use std::rc::Rc;

// ============================================================================
// Recursion depth accounting
// ============================================================================

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static DEPTH_LIMIT: Cell<usize> = const { Cell::new(config::DEFAULT_RECURSION_LIMIT) };
}

/// Adjust the nested-call ceiling for this thread (`--max-depth`).
pub fn set_recursion_limit(limit: usize) {
    DEPTH_LIMIT.with(|cell| cell.set(limit));
}

/// Holds one level of call depth; released when the call unwinds.
struct DepthGuard;

impl DepthGuard {
    fn enter(location: &SourceLocation) -> Result<Self, EvalError> {
        let depth = DEPTH.with(|cell| {
            cell.set(cell.get() + 1);
            cell.get()
        });
        let limit = DEPTH_LIMIT.with(Cell::get);
        if depth > limit {
            DEPTH.with(|cell| cell.set(cell.get() - 1));
            return Err(EvalError::new(
                location.clone(),
                EvalErrorKind::RecursionLimit(limit),
            ));
        }
        Ok(DepthGuard)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|cell| cell.set(cell.get().saturating_sub(1)));
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate one expression against an environment.
///
/// Any error escaping a bracketed call is re-located to that call node, so
/// the surfaced diagnostic names the outermost call site.
pub fn evaluate(node: &Node, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match node {
        Node::String { value, .. } => Ok(Value::String(value.clone())),
        Node::Vector { location, elements } => {
            evaluate_call(location, elements, env).map_err(|err| err.at(location))
        }
    }
}

fn evaluate_call(
    location: &SourceLocation,
    elements: &[Node],
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let _guard = DepthGuard::enter(location)?;

    if elements.is_empty() {
        return Err(EvalError::new(location.clone(), EvalErrorKind::EmptyCall));
    }

    // A string head names a binding; anything else is used directly.
    let head = evaluate(&elements[0], env)?;
    let callee = match head {
        Value::String(name) => env.get(&name).ok_or_else(|| {
            EvalError::new(
                elements[0].location().clone(),
                EvalErrorKind::UndeclaredVariable(name),
            )
        })?,
        other => other,
    };

    match callee {
        // Builtins receive the argument nodes unevaluated.
        Value::Builtin(builtin) => (builtin.func)(location, &elements[1..], env),
        Value::Lambda(lambda) => {
            let mut args = Vec::with_capacity(elements.len() - 1);
            for element in &elements[1..] {
                args.push(evaluate(element, env)?);
            }
            apply_lambda(&lambda, args, location)
        }
        _ => Err(EvalError::new(location.clone(), EvalErrorKind::NotCallable)),
    }
}

/// Invoke a lambda with already-evaluated arguments.
///
/// A fresh scope is chained onto the captured environment; a variadic
/// tail collects the surplus arguments into a vector. The value of the
/// last body expression is the result; an empty body yields `""`.
pub fn apply_lambda(
    lambda: &Lambda,
    mut args: Vec<Value>,
    location: &SourceLocation,
) -> Result<Value, EvalError> {
    if lambda.variadic {
        let required = lambda.params.len() - 1;
        if args.len() < required {
            return Err(EvalError::arity_error(
                location,
                "lambda",
                format!("at least {required}"),
                args.len(),
            ));
        }

        let call_env = Environment::with_parent(lambda.env.clone());
        let rest = args.split_off(required);
        for (param, arg) in lambda.params[..required].iter().zip(args) {
            call_env.define(param.as_str(), arg);
        }
        call_env.define(lambda.params[required].as_str(), Value::Vector(rest));
        evaluate_body(lambda, &call_env)
    } else {
        if args.len() != lambda.params.len() {
            return Err(EvalError::arity_error(
                location,
                "lambda",
                lambda.params.len().to_string(),
                args.len(),
            ));
        }

        let call_env = Environment::with_parent(lambda.env.clone());
        for (param, arg) in lambda.params.iter().zip(args) {
            call_env.define(param.as_str(), arg);
        }
        evaluate_body(lambda, &call_env)
    }
}

fn evaluate_body(lambda: &Lambda, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::String(String::new());
    for node in &lambda.body {
        result = evaluate(node, env)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::parser::parse;

    fn eval_document(source: &str) -> Result<Vec<Value>, EvalError> {
        let env = Environment::new();
        register_builtins(&env);
        eval_in(source, &env)
    }

    fn eval_in(source: &str, env: &Rc<Environment>) -> Result<Vec<Value>, EvalError> {
        let program = parse(source, SourceLocation::new("test.tart")).expect("parse failure");
        program
            .nodes
            .iter()
            .map(|node| evaluate(node, env))
            .collect()
    }

    fn last_string(values: Vec<Value>) -> String {
        match values.into_iter().next_back() {
            Some(Value::String(s)) => s,
            other => panic!("expected string result, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_word_evaluates_to_itself() {
        let values = eval_document("hello").unwrap();
        assert!(matches!(&values[0], Value::String(s) if s == "hello"));
    }

    #[test]
    fn test_let_then_get() {
        let out = last_string(eval_document("[let name Alice] [get name]").unwrap());
        assert_eq!(out, "Alice");
    }

    #[test]
    fn test_empty_vector_call() {
        let err = eval_document("[]").unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::EmptyCall);
    }

    #[test]
    fn test_undeclared_head() {
        let err = eval_document("[foo]").unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UndeclaredVariable("foo".to_string())
        );
    }

    #[test]
    fn test_non_callable_head() {
        // a vector head is used directly and is not callable
        let err = eval_document("[[vector a b] z]").unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::NotCallable);
    }

    #[test]
    fn test_string_head_resolves_through_environment() {
        // the head evaluates to the string "f", which is then looked up
        let out = last_string(
            eval_document("[let f [lambda [] ok]] [let alias f] [[get alias]]").unwrap(),
        );
        assert_eq!(out, "ok");
    }

    #[test]
    fn test_error_reports_outer_call_site() {
        let err = eval_document("[string a\nb\n[boom]]").unwrap_err();
        // the failing call is on line 3, but the diagnostic names the
        // enclosing [string ...] call on line 1
        assert_eq!(err.location.line, 1);
    }

    #[test]
    fn test_lambda_call_and_closure() {
        let out = last_string(
            eval_document(
                "[let greeting hello]\
                 [let greet [lambda [n] [string [get greeting] [get n]]]]\
                 [greet Bob]",
            )
            .unwrap(),
        );
        assert_eq!(out, "hello Bob");
    }

    #[test]
    fn test_lambda_arity_mismatch() {
        let err = eval_document("[let f [lambda [a b] [get a]]] [f 1]").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { .. }));
    }

    #[test]
    fn test_variadic_capture() {
        let values = eval_document("[let f [lambda [a rest...] [get rest]]] [f 1 2 3]").unwrap();
        match values.into_iter().next_back() {
            Some(Value::Vector(items)) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], Value::String(s) if s == "2"));
                assert!(matches!(&items[1], Value::String(s) if s == "3"));
            }
            other => panic!("expected vector, got {:?}", other),
        }
    }

    #[test]
    fn test_variadic_accepts_exact_minimum() {
        let values = eval_document("[let f [lambda [a rest...] [get rest]]] [f 1]").unwrap();
        match values.into_iter().next_back() {
            Some(Value::Vector(items)) => assert!(items.is_empty()),
            other => panic!("expected empty vector, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_returns_empty_string() {
        let out = last_string(eval_document("[let f [lambda []]] [f]").unwrap());
        assert_eq!(out, "");
    }

    #[test]
    fn test_closure_sees_definition_environment() {
        // f captures the scope where it was defined; a later let in a
        // child scope of the call does not leak into it
        let env = Environment::new();
        register_builtins(&env);
        eval_in("[let x outer] [let f [lambda [] [get x]]]", &env).unwrap();
        let out = last_string(eval_in("[f]", &env).unwrap());
        assert_eq!(out, "outer");
    }

    #[test]
    fn test_recursion_limit() {
        set_recursion_limit(32);
        let err =
            eval_document("[let f [lambda [] [f]]] [f]").unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::RecursionLimit(32));
    }

    #[test]
    fn test_arguments_evaluate_left_to_right() {
        // [let a 1] must run before [get a] reaches for the binding
        let out = last_string(eval_document("[string [let a 1] [get a]]").unwrap());
        assert_eq!(out, "1");
    }
}
