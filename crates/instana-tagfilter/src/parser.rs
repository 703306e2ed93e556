// crates/instana-tagfilter/src/parser.rs
// ============================================================================
// Module: Tag Filter Parser
// Description: Lexer and recursive-descent parser for tag filter text.
// Purpose: Turn operator-authored expressions into a typed `Expression` tree
//          with byte-accurate error positions.
// Dependencies: crate::expression, crate::error
// ============================================================================

//! ## Overview
//! Tag filter input is operator-authored and untrusted; the parser enforces a
//! size limit and a nesting limit before building the tree.
//!
//! ### Grammar (informal)
//! - `expression := or`
//! - `or := and ("OR" and)*`
//! - `and := primary ("AND" primary)*`
//! - `primary := "(" expression ")" | comparison`
//! - `comparison := tag ["@" origin] OPERATOR [literal]`
//! - `literal := string ["=" string] | number | "true" | "false"`
//!
//! Keywords, operators, and origins are case-insensitive. Tag names may
//! contain letters, digits, `.`, `_`, `-`, `:`, and `/`. A missing origin
//! defaults to `@dest`. Unary operators (`IS_EMPTY`, `NOT_EMPTY`, `IS_BLANK`,
//! `NOT_BLANK`) take no literal; all other operators require one.

use crate::error::TagFilterError;
use crate::expression::EntityOrigin;
use crate::expression::Expression;
use crate::expression::Literal;
use crate::expression::Operator;
use crate::expression::TagComparison;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum allowed tag filter input size in bytes.
pub const MAX_TAG_FILTER_INPUT_BYTES: usize = 1024 * 1024;
/// Maximum supported parenthesis nesting depth.
pub const MAX_TAG_FILTER_NESTING: usize = 32;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses a tag filter expression.
///
/// # Arguments
/// * `input` - Expression text, e.g. `"service.name EQUALS 'a' OR x@src IS_EMPTY"`.
///
/// # Errors
/// Returns [`TagFilterError`] for empty or oversized input, syntax errors,
/// invalid numbers, excessive nesting, or trailing input.
pub fn parse_expression(input: &str) -> Result<Expression, TagFilterError> {
    if input.len() > MAX_TAG_FILTER_INPUT_BYTES {
        return Err(TagFilterError::InputTooLarge {
            max_bytes: MAX_TAG_FILTER_INPUT_BYTES,
            actual_bytes: input.len(),
        });
    }
    let mut lexer = Lexer::new(input);
    let tokens = lexer.lex()?;

    let mut parser = Parser::new(tokens);
    let expression = parser.parse_or()?;
    parser.expect_eof()?;
    Ok(expression)
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Lexer token produced from tag filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Bare word: tag name, operator, origin, boolean.
    Word(&'a str),
    /// Integer literal text including an optional leading `-`.
    Number(&'a str),
    /// Unescaped contents of a single-quoted string.
    Str(String),
    /// `AND` keyword.
    And,
    /// `OR` keyword.
    Or,
    /// Entity origin separator.
    At,
    /// Key/value separator.
    Equals,
    /// Left parenthesis.
    LParen,
    /// Right parenthesis.
    RParen,
    /// End-of-input marker.
    Eof,
}

/// Token paired with its byte offset.
#[derive(Debug, Clone)]
struct SpannedToken<'a> {
    /// Token value.
    token: Token<'a>,
    /// Byte offset into the input.
    position: usize,
}

/// Lexer for tag filter text.
struct Lexer<'a> {
    /// Source input being tokenized.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
        }
    }

    /// Lexes the input into a sequence of tokens.
    fn lex(&mut self) -> Result<Vec<SpannedToken<'a>>, TagFilterError> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();

        while self.offset < bytes.len() {
            let ch = bytes[self.offset];
            match ch {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                }
                b'(' => {
                    tokens.push(self.simple(Token::LParen));
                    self.offset += 1;
                }
                b')' => {
                    tokens.push(self.simple(Token::RParen));
                    self.offset += 1;
                }
                b'@' => {
                    tokens.push(self.simple(Token::At));
                    self.offset += 1;
                }
                b'=' => {
                    tokens.push(self.simple(Token::Equals));
                    self.offset += 1;
                }
                b'\'' => {
                    let start = self.offset;
                    let value = self.lex_string(bytes)?;
                    tokens.push(SpannedToken {
                        token: Token::Str(value),
                        position: start,
                    });
                }
                b'-' if self.peek_char(bytes).is_some_and(|b| b.is_ascii_digit()) => {
                    let start = self.offset;
                    self.offset += 1;
                    self.consume_while(bytes, |b| b.is_ascii_digit());
                    tokens.push(SpannedToken {
                        token: Token::Number(&self.input[start .. self.offset]),
                        position: start,
                    });
                }
                b'0' ..= b'9' => {
                    let start = self.offset;
                    self.consume_while(bytes, |b| b.is_ascii_digit());
                    if bytes.get(self.offset).copied().is_some_and(is_word_byte) {
                        self.consume_while(bytes, is_word_byte);
                        tokens.push(SpannedToken {
                            token: Token::Word(&self.input[start .. self.offset]),
                            position: start,
                        });
                    } else {
                        tokens.push(SpannedToken {
                            token: Token::Number(&self.input[start .. self.offset]),
                            position: start,
                        });
                    }
                }
                b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                    let start = self.offset;
                    self.consume_while(bytes, is_word_byte);
                    let slice = &self.input[start .. self.offset];
                    tokens.push(SpannedToken {
                        token: Self::keyword_or_word(slice),
                        position: start,
                    });
                }
                _ => {
                    let found = self.input[self.offset ..]
                        .chars()
                        .next()
                        .map_or_else(String::new, |c| c.to_string());
                    return Err(TagFilterError::UnexpectedToken {
                        expected: "tag name, literal, or operator",
                        found,
                        position: self.offset,
                    });
                }
            }
        }

        if tokens.is_empty() {
            return Err(TagFilterError::EmptyInput);
        }

        tokens.push(SpannedToken {
            token: Token::Eof,
            position: self.offset,
        });
        Ok(tokens)
    }

    /// Lexes a single-quoted string starting at the current offset.
    fn lex_string(&mut self, bytes: &[u8]) -> Result<String, TagFilterError> {
        let start = self.offset;
        self.offset += 1;
        let mut value = String::new();
        let mut segment_start = self.offset;
        while let Some(&b) = bytes.get(self.offset) {
            match b {
                b'\'' => {
                    value.push_str(&self.input[segment_start .. self.offset]);
                    self.offset += 1;
                    return Ok(value);
                }
                b'\\' => {
                    value.push_str(&self.input[segment_start .. self.offset]);
                    match bytes.get(self.offset + 1) {
                        Some(&escaped @ (b'\'' | b'\\')) => {
                            value.push(char::from(escaped));
                            self.offset += 2;
                        }
                        _ => {
                            value.push('\\');
                            self.offset += 1;
                        }
                    }
                    segment_start = self.offset;
                }
                _ => {
                    self.offset += 1;
                }
            }
        }
        Err(TagFilterError::UnterminatedString {
            position: start,
        })
    }

    /// Builds a token at the current offset.
    const fn simple(&self, token: Token<'a>) -> SpannedToken<'a> {
        SpannedToken {
            token,
            position: self.offset,
        }
    }

    /// Returns the next byte without advancing.
    fn peek_char(&self, bytes: &[u8]) -> Option<u8> {
        bytes.get(self.offset + 1).copied()
    }

    /// Advances while the condition matches the current byte.
    fn consume_while<F>(&mut self, bytes: &[u8], condition: F)
    where
        F: Fn(u8) -> bool,
    {
        while let Some(&b) = bytes.get(self.offset) {
            if condition(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }

    /// Maps a slice to a keyword token or a bare word.
    fn keyword_or_word(slice: &'a str) -> Token<'a> {
        if slice.eq_ignore_ascii_case("and") {
            Token::And
        } else if slice.eq_ignore_ascii_case("or") {
            Token::Or
        } else {
            Token::Word(slice)
        }
    }
}

/// Returns true for bytes allowed inside a tag name.
const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-' | b':' | b'/')
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser for tag filter expressions.
struct Parser<'input> {
    /// Token stream with source positions.
    tokens: Vec<SpannedToken<'input>>,
    /// Current token index.
    index: usize,
    /// Current parenthesis nesting depth.
    nesting: usize,
}

impl<'input> Parser<'input> {
    /// Creates a parser over the token stream.
    const fn new(tokens: Vec<SpannedToken<'input>>) -> Self {
        Self {
            tokens,
            index: 0,
            nesting: 0,
        }
    }

    /// Parses OR expressions.
    fn parse_or(&mut self) -> Result<Expression, TagFilterError> {
        let mut parts = Vec::new();
        parts.push(self.parse_and()?);

        while self.matches(&Token::Or) {
            parts.push(self.parse_and()?);
        }

        if parts.len() == 1 { Ok(parts.remove(0)) } else { Ok(Expression::Or(parts)) }
    }

    /// Parses AND expressions.
    fn parse_and(&mut self) -> Result<Expression, TagFilterError> {
        let mut parts = Vec::new();
        parts.push(self.parse_primary()?);

        while self.matches(&Token::And) {
            parts.push(self.parse_primary()?);
        }

        if parts.len() == 1 { Ok(parts.remove(0)) } else { Ok(Expression::And(parts)) }
    }

    /// Parses a parenthesized group or a single comparison.
    fn parse_primary(&mut self) -> Result<Expression, TagFilterError> {
        let position = self.current().position;
        match &self.current().token {
            Token::LParen => {
                self.advance();
                self.with_nesting(position, |parser| {
                    let expr = parser.parse_or()?;
                    parser.expect(&Token::RParen, "`)`")?;
                    Ok(expr)
                })
            }
            Token::Word(name) => {
                let name = (*name).to_string();
                self.advance();
                self.parse_comparison(name).map(Expression::Comparison)
            }
            _ => Err(TagFilterError::UnexpectedToken {
                expected: "tag name or `(`",
                found: self.describe_current(),
                position,
            }),
        }
    }

    /// Parses the remainder of a comparison after its tag name.
    fn parse_comparison(&mut self, name: String) -> Result<TagComparison, TagFilterError> {
        let entity = if self.matches(&Token::At) {
            self.parse_origin()?
        } else {
            EntityOrigin::Destination
        };
        let operator = self.parse_operator()?;
        let value = if operator.is_unary() { None } else { Some(self.parse_literal()?) };
        Ok(TagComparison {
            name,
            entity,
            operator,
            value,
        })
    }

    /// Parses an entity origin after `@`.
    fn parse_origin(&mut self) -> Result<EntityOrigin, TagFilterError> {
        let position = self.current().position;
        if let Token::Word(raw) = &self.current().token
            && let Some(origin) = EntityOrigin::from_short_name(raw)
        {
            self.advance();
            return Ok(origin);
        }
        Err(TagFilterError::UnexpectedToken {
            expected: "entity origin `src`, `dest`, or `na`",
            found: self.describe_current(),
            position,
        })
    }

    /// Parses a comparison operator keyword.
    fn parse_operator(&mut self) -> Result<Operator, TagFilterError> {
        let position = self.current().position;
        if let Token::Word(raw) = &self.current().token
            && let Some(operator) = Operator::parse(raw)
        {
            self.advance();
            return Ok(operator);
        }
        Err(TagFilterError::UnexpectedToken {
            expected: "comparison operator",
            found: self.describe_current(),
            position,
        })
    }

    /// Parses the literal operand of a binary comparison.
    fn parse_literal(&mut self) -> Result<Literal, TagFilterError> {
        let position = self.current().position;
        match self.current().token.clone() {
            Token::Str(key) => {
                self.advance();
                if !self.matches(&Token::Equals) {
                    return Ok(Literal::String(key));
                }
                if let Token::Str(value) = self.current().token.clone() {
                    self.advance();
                    return Ok(Literal::KeyValue {
                        key,
                        value,
                    });
                }
                Err(TagFilterError::UnexpectedToken {
                    expected: "quoted value after `=`",
                    found: self.describe_current(),
                    position: self.current().position,
                })
            }
            Token::Number(raw) => {
                self.advance();
                raw.parse::<i64>().map(Literal::Number).map_err(|_| {
                    TagFilterError::InvalidNumber {
                        raw: raw.to_string(),
                        position,
                    }
                })
            }
            Token::Word(raw) if raw.eq_ignore_ascii_case("true") => {
                self.advance();
                Ok(Literal::Boolean(true))
            }
            Token::Word(raw) if raw.eq_ignore_ascii_case("false") => {
                self.advance();
                Ok(Literal::Boolean(false))
            }
            _ => Err(TagFilterError::UnexpectedToken {
                expected: "string, number, or boolean literal",
                found: self.describe_current(),
                position,
            }),
        }
    }

    /// Runs a parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, TagFilterError>,
    ) -> Result<T, TagFilterError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_TAG_FILTER_NESTING {
            return Err(TagFilterError::NestingTooDeep {
                max_depth: MAX_TAG_FILTER_NESTING,
                position,
            });
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Consumes the expected token or returns an error.
    fn expect(&mut self, token: &Token<'_>, expected: &'static str) -> Result<(), TagFilterError> {
        if self.matches(token) {
            Ok(())
        } else {
            Err(TagFilterError::UnexpectedToken {
                expected,
                found: self.describe_current(),
                position: self.current().position,
            })
        }
    }

    /// Ensures the parser is at end-of-input.
    fn expect_eof(&self) -> Result<(), TagFilterError> {
        if matches!(self.current().token, Token::Eof) {
            Ok(())
        } else {
            Err(TagFilterError::TrailingInput {
                position: self.current().position,
            })
        }
    }

    /// Consumes the token if it has the same kind as `kind`.
    fn matches(&mut self, kind: &Token<'_>) -> bool {
        if std::mem::discriminant(&self.current().token) == std::mem::discriminant(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the current token.
    fn current(&self) -> &SpannedToken<'input> {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.index.min(last)]
    }

    /// Advances to the next token.
    const fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Formats the current token for diagnostics.
    fn describe_current(&self) -> String {
        match &self.current().token {
            Token::Word(raw) | Token::Number(raw) => (*raw).to_string(),
            Token::Str(value) => format!("'{value}'"),
            Token::And => "AND".to_string(),
            Token::Or => "OR".to_string(),
            Token::At => "@".to_string(),
            Token::Equals => "=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
