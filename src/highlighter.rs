// ABOUTME: Syntax highlighter for the REPL with color support
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for Tart syntax elements while preserving display width

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow;
use std::collections::HashSet;

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_BRACKETS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)

/// Helper for the Tart REPL: colors brackets, quoted strings, `#`
/// comments, and the builtin names.
pub struct TartHelper;

impl TartHelper {
    pub fn new() -> Self {
        TartHelper
    }
}

impl Default for TartHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for TartHelper {}

impl Completer for TartHelper {
    type Candidate = String;
}

impl Hinter for TartHelper {
    type Hint = String;
}

impl Validator for TartHelper {}

impl Highlighter for TartHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let builtins = builtin_names();
        let highlighted = highlight_line(line, &builtins);

        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Walk a line and wrap recognized pieces in ANSI colors.
fn highlight_line(line: &str, builtins: &HashSet<&'static str>) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comments: everything from # to end of line
            '#' => {
                result.push_str(COLOR_COMMENT);
                while i < chars.len() && chars[i] != '\n' {
                    result.push(chars[i]);
                    i += 1;
                }
                result.push_str(COLOR_RESET);
            }

            // Strings: preserve exact content but colorize
            '"' => {
                result.push_str(COLOR_STRING);
                result.push('"');
                i += 1;

                while i < chars.len() {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        result.push(chars[i]);
                        result.push(chars[i + 1]);
                        i += 2;
                    } else if chars[i] == '"' {
                        result.push('"');
                        i += 1;
                        break;
                    } else {
                        result.push(chars[i]);
                        i += 1;
                    }
                }

                result.push_str(COLOR_RESET);
            }

            '[' | ']' => {
                result.push_str(COLOR_BRACKETS);
                result.push(chars[i]);
                i += 1;
                result.push_str(COLOR_RESET);
            }

            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }

            // Bare words (procedure names, text)
            _ => {
                let start = i;
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && chars[i] != '['
                    && chars[i] != ']'
                    && chars[i] != '"'
                    && chars[i] != '#'
                {
                    i += 1;
                }

                let word: String = chars[start..i].iter().collect();
                if builtins.contains(word.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                    result.push_str(&word);
                    result.push_str(COLOR_RESET);
                } else {
                    result.push_str(&word);
                }
            }
        }
    }

    result
}

fn builtin_names() -> HashSet<&'static str> {
    [
        "let", "set", "get", "lambda", "string", "vector", "print", "cat", "join", "map", "run",
    ]
    .iter()
    .copied()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_highlighting() {
        let highlighted = highlight_line("[print hi]", &builtin_names());
        assert!(highlighted.contains(COLOR_BRACKETS));
        assert!(highlighted.contains(COLOR_BUILTIN));
    }

    #[test]
    fn test_string_highlighting() {
        let highlighted = highlight_line("\"hello\"", &builtin_names());
        assert!(highlighted.contains(COLOR_STRING));
    }

    #[test]
    fn test_comment_highlighting() {
        let highlighted = highlight_line("# a comment", &builtin_names());
        assert!(highlighted.contains(COLOR_COMMENT));
    }

    #[test]
    fn test_plain_words_unstyled() {
        let highlighted = highlight_line("just words", &builtin_names());
        assert_eq!(highlighted, "just words");
    }
}
