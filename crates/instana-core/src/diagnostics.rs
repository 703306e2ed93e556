// crates/instana-core/src/diagnostics.rs
// ============================================================================
// Module: Diagnostics
// Description: Operator-facing messages bound to attribute paths.
// Purpose: Accumulate independent mapping failures instead of stopping at
//          the first one.
// Dependencies: crate::path
// ============================================================================

//! ## Overview
//! A [`Diagnostic`] carries severity, summary, detail, and an optional
//! [`AttributePath`]. Mappers collect them into [`Diagnostics`]; any error
//! diagnostic discards the payload being built.

use std::fmt;

use crate::path::AttributePath;

// ============================================================================
// SECTION: Diagnostic
// ============================================================================

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Aborts the operation.
    Error,
    /// Reported without aborting.
    Warning,
}

/// Message shown to the operator next to the offending attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: DiagnosticSeverity,
    /// One-line summary.
    pub summary: String,
    /// Detail text.
    pub detail: String,
    /// Offending attribute, if any.
    pub path: Option<AttributePath>,
}

impl Diagnostic {
    /// Builds an error diagnostic.
    #[must_use]
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Builds a warning diagnostic.
    #[must_use]
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Binds the diagnostic to an attribute.
    #[must_use]
    pub fn at(mut self, path: AttributePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Returns true for error diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_root() => {
                write!(f, "{}: {} (at {path})", self.summary, self.detail)
            }
            _ => write!(f, "{}: {}", self.summary, self.detail),
        }
    }
}

// ============================================================================
// SECTION: Collection
// ============================================================================

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Diagnostics in emission order.
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
        }
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Appends every diagnostic of another collection.
    pub fn append(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Records the error of a fallible step and returns its value on success.
    pub fn collect<T, E: Into<Self>>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.append(err.into());
                None
            }
        }
    }

    /// Records the error of a fallible step and continues with the default.
    ///
    /// The default never escapes: [`Diagnostics::finish`] discards the value
    /// once an error was recorded.
    pub fn take<T: Default, E: Into<Self>>(&mut self, result: Result<T, E>) -> T {
        self.collect(result).unwrap_or_default()
    }

    /// Returns `value` when no error was recorded.
    ///
    /// # Errors
    /// Returns the collection itself when it contains an error diagnostic.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.has_error() { Err(self) } else { Ok(value) }
    }

    /// Returns true when any diagnostic is an error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Returns true when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Converts into `Err(self)` when an error is present.
    ///
    /// # Errors
    /// Returns the collection itself when it contains an error diagnostic.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_error() { Err(self) } else { Ok(()) }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            items: vec![diagnostic],
        }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, diagnostic) in self.items.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
