//! # Built-in Procedures Module
//!
//! The fixed primitive set installed into the root environment, organized
//! by concern:
//!
//! - **[bindings]** (3): let, set, get - Name binding and lookup
//! - **[lambdas]** (1): lambda - User-defined procedure construction
//! - **[strings]** (3): string, join, cat - Text assembly
//! - **[vectors]** (2): vector, map - Vector construction and mapping
//! - **[console]** (1): print - Debug output
//! - **[include]** (1): run - Source inclusion
//!
//! Every builtin receives the call-site location, its argument nodes
//! *unevaluated*, and the calling environment; each decides what to
//! evaluate. Argument counts are checked before types, and type errors
//! cite the 1-based argument index.

use crate::env::Environment;
use std::rc::Rc;

pub mod bindings;
pub mod console;
pub mod include;
pub mod lambdas;
pub mod strings;
pub mod vectors;

/// Register the whole builtin set in the environment
pub fn register_builtins(env: &Rc<Environment>) {
    bindings::register(env);
    lambdas::register(env);
    strings::register(env);
    vectors::register(env);
    console::register(env);
    include::register(env);
}
