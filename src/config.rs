// ABOUTME: Configuration and constants for the Tart interpreter
// This module contains version info, the REPL banner, and evaluation limits

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Tart v0.1";
pub const WELCOME_SUBTITLE: &str = "A procedural markup language";
pub const WELCOME_FOOTER: &str = "Type text or [calls]; Ctrl-D exits.";

/// Maximum depth of nested procedure calls before evaluation aborts.
/// Overridable per invocation with `--max-depth`.
pub const DEFAULT_RECURSION_LIMIT: usize = 1000;

/// Where the REPL persists its line history between sessions.
pub const HISTORY_FILE: &str = ".tart_history";
