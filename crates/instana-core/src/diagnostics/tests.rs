// crates/instana-core/src/diagnostics/tests.rs
// ============================================================================
// Module: Diagnostics Tests
// Description: Accumulation across independent fallible steps.
// Purpose: Pin that every failure is kept and any error discards the value.
// Dependencies: crate::error
// ============================================================================

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

use super::*;
use crate::error::MappingError;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn missing(name: &str) -> Result<String, MappingError> {
    Err(MappingError::invalid(&AttributePath::attribute(name), format!("{name} is required")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn take_keeps_going_after_each_failure() {
    let mut diagnostics = Diagnostics::new();
    let name = diagnostics.take(missing("name"));
    let label = diagnostics.take(Ok::<_, MappingError>("checkout".to_string()));
    let scope = diagnostics.take(missing("scope"));
    assert_eq!((name.as_str(), label.as_str(), scope.as_str()), ("", "checkout", ""));
    let paths: Vec<String> = diagnostics
        .iter()
        .filter_map(|diagnostic| diagnostic.path.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(paths, vec!["name", "scope"]);
}

#[test]
fn finish_discards_the_value_once_an_error_was_recorded() {
    let mut diagnostics = Diagnostics::new();
    let _ = diagnostics.take(missing("name"));
    let err = diagnostics.finish("partial").unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(err.has_error());
}

#[test]
fn finish_keeps_the_value_with_only_warnings() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(Diagnostic::warning("Deprecated attribute", "full_name is deprecated"));
    assert_eq!(diagnostics.finish(7).unwrap(), 7);
}
