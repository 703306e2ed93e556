// crates/instana-tagfilter/src/expression.rs
// ============================================================================
// Module: Tag Filter Expression Tree
// Description: Typed tree produced by the parser and consumed by the mappers.
// Purpose: Represent boolean composition over tag comparisons and render the
//          canonical textual form.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`Expression`] is a labeled tree: interior nodes are `And` / `Or` sequences,
//! leaves are [`TagComparison`]s. The [`fmt::Display`] implementation is the
//! normalized form: entity suffixes are always rendered, keywords are upper
//! case, strings are single quoted, and nested groups keep their parentheses.

use std::fmt;

// ============================================================================
// SECTION: Entity Origin
// ============================================================================

/// Which side of a call a tag is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityOrigin {
    /// Calling side (`@src`).
    Source,
    /// Called side (`@dest`), the default when no suffix is written.
    Destination,
    /// Tag is not bound to a call side (`@na`).
    NotApplicable,
}

impl EntityOrigin {
    /// All supported origins.
    pub const ALL: [Self; 3] = [Self::Source, Self::Destination, Self::NotApplicable];

    /// Returns the short suffix used in the textual form.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Source => "src",
            Self::Destination => "dest",
            Self::NotApplicable => "na",
        }
    }

    /// Returns the API representation.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Source => "SOURCE",
            Self::Destination => "DESTINATION",
            Self::NotApplicable => "NOT_APPLICABLE",
        }
    }

    /// Parses the textual suffix (without the `@`).
    #[must_use]
    pub fn from_short_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|origin| origin.short_name().eq_ignore_ascii_case(value))
    }

    /// Parses the API representation.
    #[must_use]
    pub fn from_api_name(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|origin| origin.api_name() == value)
    }
}

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operator of a tag filter leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// `EQUALS`
    Equals,
    /// `NOT_EQUAL`
    NotEqual,
    /// `CONTAINS`
    Contains,
    /// `NOT_CONTAIN`
    NotContain,
    /// `STARTS_WITH`
    StartsWith,
    /// `ENDS_WITH`
    EndsWith,
    /// `NOT_STARTS_WITH`
    NotStartsWith,
    /// `NOT_ENDS_WITH`
    NotEndsWith,
    /// `GREATER_OR_EQUAL_THAN`
    GreaterOrEqualThan,
    /// `LESS_OR_EQUAL_THAN`
    LessOrEqualThan,
    /// `GREATER_THAN`
    GreaterThan,
    /// `LESS_THAN`
    LessThan,
    /// `IS_EMPTY`
    IsEmpty,
    /// `NOT_EMPTY`
    NotEmpty,
    /// `IS_BLANK`
    IsBlank,
    /// `NOT_BLANK`
    NotBlank,
}

impl Operator {
    /// All supported operators.
    pub const ALL: [Self; 16] = [
        Self::Equals,
        Self::NotEqual,
        Self::Contains,
        Self::NotContain,
        Self::StartsWith,
        Self::EndsWith,
        Self::NotStartsWith,
        Self::NotEndsWith,
        Self::GreaterOrEqualThan,
        Self::LessOrEqualThan,
        Self::GreaterThan,
        Self::LessThan,
        Self::IsEmpty,
        Self::NotEmpty,
        Self::IsBlank,
        Self::NotBlank,
    ];

    /// Returns the keyword used in both the textual and API forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEqual => "NOT_EQUAL",
            Self::Contains => "CONTAINS",
            Self::NotContain => "NOT_CONTAIN",
            Self::StartsWith => "STARTS_WITH",
            Self::EndsWith => "ENDS_WITH",
            Self::NotStartsWith => "NOT_STARTS_WITH",
            Self::NotEndsWith => "NOT_ENDS_WITH",
            Self::GreaterOrEqualThan => "GREATER_OR_EQUAL_THAN",
            Self::LessOrEqualThan => "LESS_OR_EQUAL_THAN",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::IsEmpty => "IS_EMPTY",
            Self::NotEmpty => "NOT_EMPTY",
            Self::IsBlank => "IS_BLANK",
            Self::NotBlank => "NOT_BLANK",
        }
    }

    /// Returns true when the operator takes no value operand.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::IsEmpty | Self::NotEmpty | Self::IsBlank | Self::NotBlank)
    }

    /// Parses an operator keyword, ignoring ASCII case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operator| operator.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Literals
// ============================================================================

/// Right-hand side of a binary comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Single-quoted string.
    String(String),
    /// Signed integer.
    Number(i64),
    /// `true` or `false`.
    Boolean(bool),
    /// `'key'='value'` pair used for key/value tags such as labels.
    KeyValue {
        /// Tag key.
        key: String,
        /// Tag value.
        value: String,
    },
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write_quoted(f, value),
            Self::Number(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::KeyValue {
                key,
                value,
            } => {
                write_quoted(f, key)?;
                f.write_str("=")?;
                write_quoted(f, value)
            }
        }
    }
}

/// Writes a single-quoted string, escaping quotes and backslashes.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("'")
}

// ============================================================================
// SECTION: Comparisons
// ============================================================================

/// Leaf comparison `tag@origin OPERATOR literal`.
///
/// # Invariants
/// - `value` is `None` exactly when `operator.is_unary()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagComparison {
    /// Tag name, e.g. `service.name`.
    pub name: String,
    /// Call side the tag is evaluated on.
    pub entity: EntityOrigin,
    /// Comparison operator.
    pub operator: Operator,
    /// Comparison value for binary operators.
    pub value: Option<Literal>,
}

impl fmt::Display for TagComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} {}", self.name, self.entity.short_name(), self.operator)?;
        if let Some(value) = &self.value {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Expression
// ============================================================================

/// Boolean tag-filter expression.
///
/// # Invariants
/// - `And` and `Or` produced by the parser hold at least two operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// All operands must match.
    And(Vec<Self>),
    /// Any operand must match.
    Or(Vec<Self>),
    /// Single tag comparison.
    Comparison(TagComparison),
}

impl Expression {
    /// Returns the maximum depth of the tree (a comparison has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::And(items) | Self::Or(items) => {
                1 + items.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Comparison(_) => 1,
        }
    }

    /// Renders an operand of a group, adding parentheses where the operand
    /// would otherwise merge into its parent.
    fn fmt_operand(&self, parent_is_and: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_parens = match self {
            Self::Comparison(_) => false,
            Self::And(_) => parent_is_and,
            Self::Or(_) => true,
        };
        if needs_parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(comparison) => write!(f, "{comparison}"),
            Self::And(items) | Self::Or(items) => {
                let is_and = matches!(self, Self::And(_));
                let keyword = if is_and { " AND " } else { " OR " };
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(keyword)?;
                    }
                    item.fmt_operand(is_and, f)?;
                }
                Ok(())
            }
        }
    }
}
