// crates/instana-core/tests/severity.rs
// ============================================================================
// Module: Severity Codec Tests
// Description: Warning/critical codec checks and property tests.
// Purpose: Validate the bijection and rejection of unknown inputs.
// Dependencies: instana-core, proptest
// ============================================================================

//! Warning/critical codec checks and property tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use instana_core::MappingError;
use instana_core::Severity;
use instana_core::severity::severity_from_code;
use instana_core::severity::severity_to_code;
use proptest::prelude::*;

#[test]
fn critical_maps_to_ten_and_back() {
    assert_eq!(severity_to_code("critical").unwrap(), 10);
    assert_eq!(severity_from_code(10).unwrap(), "critical");
    assert_eq!(severity_to_code("warning").unwrap(), 5);
    assert_eq!(severity_from_code(5).unwrap(), "warning");
}

#[test]
fn unknown_severity_reports_input() {
    assert_eq!(
        severity_to_code("fatal").unwrap_err(),
        MappingError::UnknownSeverity {
            input: "fatal".to_string(),
        }
    );
    assert_eq!(
        Severity::from_code(7).unwrap_err(),
        MappingError::UnknownSeverity {
            input: "7".to_string(),
        }
    );
}

proptest! {
    #[test]
    fn every_severity_round_trips(index in 0usize .. 2) {
        let severity = Severity::ALL[index];
        prop_assert_eq!(Severity::from_term(severity.as_str()).unwrap(), severity);
        prop_assert_eq!(Severity::from_code(severity.code()).unwrap(), severity);
    }

    #[test]
    fn other_codes_are_rejected(
        code in any::<i64>().prop_filter("not a severity code", |c| *c != 5 && *c != 10)
    ) {
        let rejected =
            matches!(Severity::from_code(code), Err(MappingError::UnknownSeverity { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn other_terms_are_rejected(
        term in "[a-z]{0,12}"
            .prop_filter("not a severity term", |t| t != "warning" && t != "critical")
    ) {
        prop_assert!(Severity::from_term(&term).is_err());
    }
}
