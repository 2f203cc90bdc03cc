// ABOUTME: Lexer module turning source text into a positioned token stream

use crate::error::{ParseError, ParseErrorKind};
use std::fmt;
use std::rc::Rc;

/// A `(path, line)` pair threaded through lexing and diagnostics.
///
/// Created by the driver at file entry, advanced by the lexer on each
/// newline, and cloned into every token and AST node it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: Rc<str>,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(path: impl Into<Rc<str>>) -> Self {
        SourceLocation {
            path: path.into(),
            line: 1,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, line {}", self.path, self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LBracket,
    RBracket,
    Str,
    Eof,
}

/// `literal` preserves the raw lexeme for diagnostics; `value` carries the
/// decoded content (they differ only for quoted strings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub value: String,
    pub location: SourceLocation,
}

pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    location: SourceLocation,
}

impl Lexer {
    pub fn new(source: &str, location: SourceLocation) -> Self {
        Lexer {
            chars: source.chars().collect(),
            position: 0,
            location,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        if c == '\n' {
            self.location.line += 1;
        }
        Some(c)
    }

    /// Skip runs of whitespace and `#` line comments, keeping the line
    /// counter in step.
    fn eat_blank(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                return;
            }
        }
    }

    /// Produce the next token. Errors carry the location they were
    /// observed at; EOF yields an `Eof` token rather than an error.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.eat_blank();
        let location = self.location.clone();

        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                literal: String::new(),
                value: String::new(),
                location,
            });
        };

        match c {
            '[' => {
                self.bump();
                Ok(Token {
                    kind: TokenKind::LBracket,
                    literal: "[".to_string(),
                    value: "[".to_string(),
                    location,
                })
            }
            ']' => {
                self.bump();
                Ok(Token {
                    kind: TokenKind::RBracket,
                    literal: "]".to_string(),
                    value: "]".to_string(),
                    location,
                })
            }
            '"' => self.quoted_string(location),
            _ => Ok(self.bare_string(location)),
        }
    }

    /// A double-quoted string. Raw newlines are forbidden inside the
    /// quotes; the escape set is exactly `\\`, `\t`, `\n`.
    fn quoted_string(&mut self, location: SourceLocation) -> Result<Token, ParseError> {
        let mut literal = String::new();
        let mut value = String::new();
        literal.push('"');
        self.bump();

        loop {
            let Some(c) = self.bump() else {
                return Err(ParseError::new(location, ParseErrorKind::UnterminatedString));
            };
            match c {
                '"' => {
                    literal.push('"');
                    break;
                }
                '\n' => {
                    return Err(ParseError::new(location, ParseErrorKind::NewlineInString));
                }
                '\\' => {
                    let Some(escape) = self.bump() else {
                        return Err(ParseError::new(location, ParseErrorKind::UnterminatedString));
                    };
                    literal.push('\\');
                    literal.push(escape);
                    match escape {
                        '\\' => value.push('\\'),
                        't' => value.push('\t'),
                        'n' => value.push('\n'),
                        _ => {
                            return Err(ParseError::new(location, ParseErrorKind::InvalidEscape));
                        }
                    }
                }
                _ => {
                    literal.push(c);
                    value.push(c);
                }
            }
        }

        Ok(Token {
            kind: TokenKind::Str,
            literal,
            value,
            location,
        })
    }

    /// A bare word: a maximal run of characters that are not whitespace,
    /// brackets, or a quote.
    fn bare_string(&mut self, location: SourceLocation) -> Token {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '[' || c == ']' || c == '"' {
                break;
            }
            lexeme.push(c);
            self.bump();
        }
        Token {
            kind: TokenKind::Str,
            literal: lexeme.clone(),
            value: lexeme,
            location,
        }
    }
}
