// ABOUTME: Document execution shared by the CLI driver and the `run` builtin

use crate::env::Environment;
use crate::error::{EvalError, TartError};
use crate::eval::evaluate;
use crate::lexer::SourceLocation;
use crate::parser;
use crate::value::{assemble, Value};
use log::debug;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Parse and evaluate a whole document against an environment, returning
/// the whitespace-aware assembly of its top-level results.
///
/// The top-level nodes behave exactly like the arguments of a `string`
/// call: each result is stringified, empties are dropped, and the rest
/// are joined with single-space separation unless the boundary already
/// carries whitespace.
pub fn execute_document(
    source: &str,
    location: SourceLocation,
    env: &Rc<Environment>,
) -> Result<String, TartError> {
    let program = parser::parse(source, location)?;

    let mut parts = Vec::with_capacity(program.nodes.len());
    for node in &program.nodes {
        let value = evaluate(node, env)?;
        let part = value
            .stringify()
            .map_err(|kind| EvalError::new(node.location().clone(), kind))?;
        parts.push(part);
    }

    Ok(assemble(parts))
}

/// Execute a document from disk: canonicalize the path, bind `file` in the
/// environment, and return the assembled output.
///
/// Used by the driver at startup. Document sources are trusted input and
/// are read directly with `std::fs`.
pub fn run_file(path: &Path, env: &Rc<Environment>) -> Result<String, TartError> {
    let canonical = fs::canonicalize(path).map_err(|err| TartError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let source = fs::read_to_string(&canonical).map_err(|err| TartError::Io {
        path: canonical.display().to_string(),
        message: err.to_string(),
    })?;

    let path_text = canonical.to_string_lossy().into_owned();
    debug!("executing {path_text}");

    env.define("file", Value::String(path_text.clone()));
    execute_document(&source, SourceLocation::new(path_text), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn render(source: &str) -> Result<String, TartError> {
        let env = Environment::new();
        register_builtins(&env);
        execute_document(source, SourceLocation::new("test.tart"), &env)
    }

    #[test]
    fn test_top_level_assembly() {
        let out = render("[let x 1] hello \"world\"").unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render("").unwrap(), "");
        assert_eq!(render("# nothing but a comment").unwrap(), "");
    }

    #[test]
    fn test_explicit_newline_controls_layout() {
        let out = render("first \"\\n\" second").unwrap();
        assert_eq!(out, "first\nsecond");
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(matches!(render("[unclosed"), Err(TartError::Parse(_))));
    }

    #[test]
    fn test_eval_error_propagates() {
        assert!(matches!(render("[nope]"), Err(TartError::Eval(_))));
    }
}
