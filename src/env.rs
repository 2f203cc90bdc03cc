// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::EvalErrorKind;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A lexically scoped map from names to values. Environments form a tree
/// rooted at the builtin root; closures keep their captured parent alive
/// through the `Rc`.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Inserts a binding in THIS scope unconditionally. Used for builtin
    /// registration and lambda parameter binding, which cannot clash.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Inserts a binding in THIS scope; shadowing an existing binding of
    /// the same scope is an error.
    pub fn declare(&self, name: &str, value: Value) -> Result<(), EvalErrorKind> {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(name) {
            return Err(EvalErrorKind::Redeclaration(name.to_string()));
        }
        bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Overwrites a binding in THIS scope only. Enclosing scopes are
    /// deliberately not searched; see the `set` builtin.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalErrorKind> {
        let mut bindings = self.bindings.borrow_mut();
        if !bindings.contains_key(name) {
            return Err(EvalErrorKind::UndeclaredVariable(name.to_string()));
        }
        bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks up a name in THIS scope and parent scopes recursively
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Overwrites the binding in the innermost scope that holds it,
    /// walking the parent chain. Not exposed to documents; `run` uses it
    /// to swap the `file` binding where it actually lives.
    pub(crate) fn rebind(&self, name: &str, value: Value) -> Result<(), EvalErrorKind> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }

        if let Some(ref parent) = self.parent {
            return parent.rebind(name, value);
        }

        Err(EvalErrorKind::UndeclaredVariable(name.to_string()))
    }
}
