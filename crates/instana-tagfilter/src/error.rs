// crates/instana-tagfilter/src/error.rs
// ============================================================================
// Module: Tag Filter Errors
// Description: Structured parse and mapping failures for tag filters.
// Purpose: Report byte positions for syntax errors and node kinds for
//          unsupported API trees.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A single error type covers both directions: text parsing failures carry a
//! byte offset into the source, API tree failures carry the offending node
//! kind or field.

use std::fmt;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Errors produced while parsing or translating a tag filter.
///
/// # Invariants
/// - Positions are byte offsets into the original source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilterError {
    /// Input was empty or contained only whitespace.
    EmptyInput,
    /// Input exceeded the configured size limit.
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Input exceeded the configured nesting depth.
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Unexpected token encountered during parsing.
    UnexpectedToken {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// The token that was actually seen.
        found: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// A quoted string was not closed before the end of input.
    UnterminatedString {
        /// Byte offset of the opening quote.
        position: usize,
    },
    /// Numeric literal failed to parse or overflowed.
    InvalidNumber {
        /// The raw numeric text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Unexpected trailing input after a complete expression.
    TrailingInput {
        /// Byte offset where unexpected input begins.
        position: usize,
    },
    /// The API tree contains a node type this mapper does not understand.
    UnsupportedFilterType {
        /// Raw node type reported by the API.
        kind: String,
    },
    /// An API node of a known type is missing data or carries invalid values.
    InvalidNode {
        /// Description of the defect.
        reason: String,
    },
}

impl fmt::Display for TagFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "tag filter expression is empty"),
            Self::InputTooLarge {
                max_bytes,
                actual_bytes,
            } => {
                write!(f, "tag filter exceeds size limit: {actual_bytes} bytes (max {max_bytes})")
            }
            Self::NestingTooDeep {
                max_depth,
                position,
            } => write!(f, "tag filter nesting exceeds limit of {max_depth} at {position}"),
            Self::UnexpectedToken {
                expected,
                found,
                position,
            } => {
                write!(f, "unexpected token `{found}` at {position}, expected {expected}")
            }
            Self::UnterminatedString {
                position,
            } => write!(f, "unterminated string starting at {position}"),
            Self::InvalidNumber {
                raw,
                position,
            } => write!(f, "invalid number `{raw}` at {position}"),
            Self::TrailingInput {
                position,
            } => write!(f, "unexpected trailing input at {position}"),
            Self::UnsupportedFilterType {
                kind,
            } => write!(f, "unsupported tag filter type `{kind}`"),
            Self::InvalidNode {
                reason,
            } => write!(f, "invalid tag filter node: {reason}"),
        }
    }
}

impl std::error::Error for TagFilterError {}
