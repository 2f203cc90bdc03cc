// ABOUTME: Parser module building the two-node AST from the token stream

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, SourceLocation, Token, TokenKind};
use std::mem;

/// An expression: a literal string (bare word or quoted) or a bracketed
/// vector whose first element conventionally names the callee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    String {
        location: SourceLocation,
        value: String,
    },
    Vector {
        location: SourceLocation,
        elements: Vec<Node>,
    },
}

impl Node {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Node::String { location, .. } => location,
            Node::Vector { location, .. } => location,
        }
    }
}

/// An ordered sequence of top-level expressions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub nodes: Vec<Node>,
}

pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    /// The first token is fetched eagerly; each expression parse leaves
    /// the parser positioned on the token after it.
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut nodes = Vec::new();
        while self.current.kind != TokenKind::Eof {
            nodes.push(self.parse_expression()?);
        }
        Ok(Program { nodes })
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        match self.current.kind {
            TokenKind::Str => {
                let token = self.advance()?;
                Ok(Node::String {
                    location: token.location,
                    value: token.value,
                })
            }
            TokenKind::LBracket => {
                let open = self.advance()?;
                let mut elements = Vec::new();
                while self.current.kind != TokenKind::RBracket {
                    if self.current.kind == TokenKind::Eof {
                        return Err(ParseError::new(
                            self.current.location.clone(),
                            ParseErrorKind::UnbalancedBracket,
                        ));
                    }
                    elements.push(self.parse_expression()?);
                }
                self.advance()?;
                Ok(Node::Vector {
                    location: open.location,
                    elements,
                })
            }
            TokenKind::RBracket | TokenKind::Eof => Err(ParseError::new(
                self.current.location.clone(),
                ParseErrorKind::UnexpectedToken(self.current.literal.clone()),
            )),
        }
    }
}

/// Parse a whole source string starting from the given location.
pub fn parse(source: &str, location: SourceLocation) -> Result<Program, ParseError> {
    Parser::new(Lexer::new(source, location))?.parse_program()
}
