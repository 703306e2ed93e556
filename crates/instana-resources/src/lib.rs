// crates/instana-resources/src/lib.rs
// ============================================================================
// Module: Instana Resources
// Description: Resource handles for every managed Instana configuration kind.
// Purpose: Map host state to REST payloads per resource kind and expose the
//          lifecycle drivers the provider registers.
// Dependencies: instana-core, instana-restapi, instana-tagfilter, serde_json,
//               tracing
// ============================================================================

//! ## Overview
//! Each module owns one resource kind: its schema, version, upgraders, and
//! the two mapping directions between state and payload. Shared field names
//! and attribute builders live in [`common`].
//!
//! [`resource_operations`] binds every handle to an API accessor and returns
//! the object-safe drivers keyed by their host resource names.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod alerting_channel;
pub mod alerting_config;
pub mod api_token;
pub mod application_alert;
pub mod application_config;
pub mod automation_action;
/// Policies binding triggers to automation actions.
pub mod automation_policy;
/// Attribute builders and value lists reused across handles.
pub mod common;
pub mod custom_dashboard;
pub mod custom_event_spec;
/// Groups with members and scoped permissions.
pub mod group;
pub mod infra_alert;
/// Smart alerts on log volume.
pub mod log_alert;
pub mod sli;
pub mod slo;
pub mod slo_alert;
/// Smart alerts on failing synthetic test runs.
pub mod synthetic_alert;
pub mod synthetic_test;
pub mod website_alert;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use alerting_channel::AlertingChannelHandle;
pub use alerting_config::AlertingConfigHandle;
pub use api_token::ApiTokenHandle;
pub use application_alert::ApplicationAlertConfigHandle;
pub use application_config::ApplicationConfigHandle;
pub use automation_action::AutomationActionHandle;
pub use automation_policy::AutomationPolicyHandle;
pub use custom_dashboard::CustomDashboardHandle;
pub use custom_event_spec::CustomEventSpecificationHandle;
pub use group::GroupHandle;
pub use infra_alert::InfraAlertConfigHandle;
pub use log_alert::LogAlertConfigHandle;
pub use sli::SliConfigHandle;
pub use slo::SloConfigHandle;
pub use slo_alert::SloAlertConfigHandle;
pub use synthetic_alert::SyntheticAlertConfigHandle;
pub use synthetic_test::SyntheticTestHandle;
pub use website_alert::WebsiteAlertConfigHandle;

use instana_core::ManagedResource;
use instana_core::ResourceHandle;
use instana_core::ResourceOperations;
use instana_restapi::InstanaApi;

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Boxes a handle as a lifecycle driver over `api`.
fn managed<H>(handle: H, api: &InstanaApi) -> Box<dyn ResourceOperations>
where
    H: ResourceHandle + 'static,
{
    Box::new(ManagedResource::new(handle, api.clone()))
}

/// Returns a driver for every managed resource kind.
///
/// The global application alert config shares the application alert handle
/// with a different resource name and endpoint.
#[must_use]
pub fn resource_operations(api: &InstanaApi) -> Vec<Box<dyn ResourceOperations>> {
    vec![
        managed(AlertingChannelHandle::new(), api),
        managed(AlertingConfigHandle::new(), api),
        managed(ApiTokenHandle::new(), api),
        managed(ApplicationAlertConfigHandle::new(), api),
        managed(ApplicationAlertConfigHandle::global(), api),
        managed(ApplicationConfigHandle::new(), api),
        managed(AutomationActionHandle::new(), api),
        managed(AutomationPolicyHandle::new(), api),
        managed(CustomDashboardHandle::new(), api),
        managed(CustomEventSpecificationHandle::new(), api),
        managed(GroupHandle::new(), api),
        managed(InfraAlertConfigHandle::new(), api),
        managed(LogAlertConfigHandle::new(), api),
        managed(SliConfigHandle::new(), api),
        managed(SloConfigHandle::new(), api),
        managed(SloAlertConfigHandle::new(), api),
        managed(SyntheticAlertConfigHandle::new(), api),
        managed(SyntheticTestHandle::new(), api),
        managed(WebsiteAlertConfigHandle::new(), api),
    ]
}
