//! Lexer and recursive-descent parser for binding expression text.
//!
//! Grammar, precedence low → high:
//!
//! ```text
//! expression := or
//! or         := and ( "|" and )*
//! and        := add ( "&" add )*
//! add        := unary ( "+" unary )*
//! unary      := "!" unary | atom
//! atom       := NUMBER | BARE_NAME | BACKTICK_QUOTED | "(" expression ")"
//! ```
//!
//! A bare name matches `[A-Za-z_][A-Za-z0-9_]*` and always refers to the
//! binding owner's default device. A backtick-quoted atom may contain any
//! characters and may pin the control to a device with a
//! `device-qualifier:` prefix, e.g. `` `XInput/0/Gamepad:Button A` ``.
//!
//! Malformed text is reported as a typed [`ParseError`]; parsing never
//! panics and never silently coerces.

use thiserror::Error;

use crate::device::{ControlQualifier, DeviceQualifier, QualifierParseError};
use crate::expression::ast::{BinaryOp, Expr};

/// Errors produced while lexing or parsing expression text.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The input was empty or whitespace-only.
    #[error("empty expression")]
    Empty,

    /// A backtick quote was opened but never closed.
    #[error("unterminated backtick quote starting at offset {0}")]
    UnterminatedQuote(usize),

    /// A `(` without a matching `)`, or a stray `)`.
    #[error("unbalanced parenthesis")]
    UnbalancedParen,

    /// A character that belongs to no token.
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),

    /// A quoted atom with no control name, e.g. `` `` `` or `` `Device:` ``.
    #[error("empty control name in quoted atom")]
    EmptyAtom,

    /// The `device:` prefix of a quoted atom is not a valid qualifier.
    #[error("invalid device qualifier {0:?}: {1}")]
    BadDeviceQualifier(String, QualifierParseError),

    /// A numeric literal that does not parse as a float.
    #[error("invalid numeric literal {0:?}")]
    BadLiteral(String),

    /// An operator with no operand following it.
    #[error("expected an operand after {0:?}")]
    MissingOperand(String),

    /// Leftover tokens after a complete expression.
    #[error("unexpected trailing input near {0:?}")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Or,
    And,
    Add,
    Not,
    LParen,
    RParen,
    Literal(f64),
    Control(ControlQualifier),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Or => "|".to_string(),
            Token::And => "&".to_string(),
            Token::Add => "+".to_string(),
            Token::Not => "!".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Literal(v) => v.to_string(),
            Token::Control(q) => q.control.clone(),
        }
    }
}

/// `true` when `name` is a valid bare (unquoted) control name.
pub fn is_bare_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '|' => {
                tokens.push(Token::Or);
                i += 1;
            }
            '&' => {
                tokens.push(Token::And);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Add);
                i += 1;
            }
            '!' => {
                tokens.push(Token::Not);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '`' => {
                let start = i;
                i += 1;
                let from = i;
                while i < chars.len() && chars[i] != '`' {
                    i += 1;
                }
                if i == chars.len() {
                    return Err(ParseError::UnterminatedQuote(start));
                }
                let inner: String = chars[from..i].iter().collect();
                i += 1; // consume the closing backtick
                tokens.push(Token::Control(parse_quoted_atom(&inner)?));
            }
            c if c.is_ascii_digit() || c == '.' => {
                let from = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[from..i].iter().collect();
                let value: f64 = text
                    .parse()
                    .map_err(|_| ParseError::BadLiteral(text.clone()))?;
                tokens.push(Token::Literal(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let from = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[from..i].iter().collect();
                tokens.push(Token::Control(ControlQualifier::unqualified(name)));
            }
            other => return Err(ParseError::UnexpectedChar(other, i)),
        }
    }

    Ok(tokens)
}

/// Splits the inside of a backtick quote into an optional device prefix and
/// the control name.
fn parse_quoted_atom(inner: &str) -> Result<ControlQualifier, ParseError> {
    match inner.split_once(':') {
        Some((device, control)) => {
            if control.is_empty() {
                return Err(ParseError::EmptyAtom);
            }
            let device: DeviceQualifier = device
                .parse()
                .map_err(|e| ParseError::BadDeviceQualifier(device.to_string(), e))?;
            Ok(ControlQualifier::qualified(device, control))
        }
        None => {
            if inner.is_empty() {
                return Err(ParseError::EmptyAtom);
            }
            Ok(ControlQualifier::unqualified(inner))
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat(&Token::Or) {
            let rhs = self.parse_and()?;
            lhs = Expr::Binary {
                op: BinaryOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_add()?;
        while self.eat(&Token::And) {
            let rhs = self.parse_add()?;
            lhs = Expr::Binary {
                op: BinaryOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while self.eat(&Token::Add) {
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&Token::Not) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::Literal(value)) => Ok(Expr::Literal(value)),
            Some(Token::Control(qualifier)) => Ok(Expr::Control(qualifier)),
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                if !self.eat(&Token::RParen) {
                    return Err(ParseError::UnbalancedParen);
                }
                Ok(inner)
            }
            Some(Token::RParen) => Err(ParseError::UnbalancedParen),
            Some(other) => Err(ParseError::MissingOperand(other.describe())),
            None => {
                // Ran out of tokens where an operand was required.
                let last = self
                    .tokens
                    .last()
                    .map(Token::describe)
                    .unwrap_or_default();
                Err(ParseError::MissingOperand(last))
            }
        }
    }
}

/// Parses expression text into an [`Expr`].
///
/// # Errors
///
/// Returns [`ParseError::Empty`] for blank input and the appropriate variant
/// for malformed text; see [`ParseError`].
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;

    if let Some(extra) = parser.peek() {
        return Err(ParseError::TrailingInput(extra.describe()));
    }
    Ok(expr)
}
