// crates/instana-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Support
// Description: In-memory REST backend and a minimal resource handle.
// Purpose: Drive the lifecycle without a network.
// Dependencies: instana-core, instana-restapi, serde_json
// ============================================================================

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use instana_core::Attribute;
use instana_core::Diagnostics;
use instana_core::ObjectReader;
use instana_core::ResourceHandle;
use instana_core::ResourceMetadata;
use instana_core::Schema;
use instana_core::StateUpgrader;
use instana_core::StateValue;
use instana_core::upgrade::rename_full_name;
use instana_restapi::ApiError;
use instana_restapi::InstanaApi;
use instana_restapi::RestClient;
use instana_restapi::RestResource;
use instana_restapi::models::group::Group;
use serde_json::Value;

// ============================================================================
// SECTION: Memory Backend
// ============================================================================

/// In-memory [`RestClient`] keeping records per path and id.
#[derive(Default)]
pub struct MemoryClient {
    /// Stored records keyed by `(path, id)`.
    records: Mutex<BTreeMap<(String, String), Value>>,
    /// Calls as `(verb, path, id)`.
    calls: Mutex<Vec<(String, String, Option<String>)>>,
    /// Counter for backend-assigned ids.
    next_id: Mutex<u64>,
}

impl MemoryClient {
    /// Creates an empty backend.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns recorded calls.
    pub fn calls(&self) -> Vec<(String, String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns a stored record.
    pub fn record(&self, path: &str, id: &str) -> Option<Value> {
        self.records.lock().unwrap().get(&(path.to_string(), id.to_string())).cloned()
    }

    /// Stores a record directly.
    pub fn seed(&self, path: &str, id: &str, body: Value) {
        self.records.lock().unwrap().insert((path.to_string(), id.to_string()), body);
    }

    fn log(&self, verb: &str, path: &str, id: Option<&str>) {
        let call = (verb.to_string(), path.to_string(), id.map(str::to_string));
        self.calls.lock().unwrap().push(call);
    }

    fn store(&self, path: &str, id: Option<&str>, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        let mut value: Value =
            serde_json::from_slice(body).map_err(|err| ApiError::Decode(err.to_string()))?;
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let existing =
                    value.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
                if existing.is_empty() {
                    let mut next = self.next_id.lock().unwrap();
                    *next += 1;
                    let generated = format!("backend-{next}");
                    value["id"] = Value::String(generated.clone());
                    generated
                } else {
                    existing
                }
            }
        };
        self.records.lock().unwrap().insert((path.to_string(), id), value.clone());
        Ok(serde_json::to_vec(&value).unwrap())
    }
}

impl RestClient for MemoryClient {
    fn get(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.log("GET", path, None);
        let records = self.records.lock().unwrap();
        let all: Vec<&Value> = records
            .iter()
            .filter(|((stored, _), _)| stored == path)
            .map(|(_, value)| value)
            .collect();
        Ok(serde_json::to_vec(&all).unwrap())
    }

    fn get_one(&self, path: &str, id: &str) -> Result<Vec<u8>, ApiError> {
        self.log("GET", path, Some(id));
        self.record(path, id)
            .map(|value| serde_json::to_vec(&value).unwrap())
            .ok_or(ApiError::NotFound)
    }

    fn post(&self, path: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.log("POST", path, None);
        self.store(path, None, body)
    }

    fn post_with_id(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.log("POST", path, Some(id));
        self.store(path, Some(id), body)
    }

    fn put(&self, path: &str, id: &str, body: &[u8]) -> Result<Vec<u8>, ApiError> {
        self.log("PUT", path, Some(id));
        self.store(path, Some(id), body)
    }

    fn delete(&self, path: &str, id: &str) -> Result<(), ApiError> {
        self.log("DELETE", path, Some(id));
        self.records.lock().unwrap().remove(&(path.to_string(), id.to_string()));
        Ok(())
    }
}

/// Builds an API accessor over `client`.
pub fn api(client: &Arc<MemoryClient>) -> InstanaApi {
    InstanaApi::new(Arc::clone(client) as Arc<dyn RestClient>)
}

// ============================================================================
// SECTION: Test Handle
// ============================================================================

/// Minimal handle over RBAC groups carrying only a name.
pub struct NamedGroupHandle {
    /// Static description.
    metadata: ResourceMetadata,
}

impl NamedGroupHandle {
    /// Handle with generated ids and updates enabled.
    pub fn new() -> Self {
        let schema = Schema::new(
            "test group",
            vec![Attribute::string("id").computed(), Attribute::string("name").required()],
        );
        Self {
            metadata: ResourceMetadata::new("test_group", schema, 1)
                .with_upgraders(vec![StateUpgrader::new(0, rename_full_name)]),
        }
    }

    /// Handle rejecting updates.
    pub fn create_only() -> Self {
        let mut handle = Self::new();
        handle.metadata = handle.metadata.create_only();
        handle
    }
}

impl ResourceHandle for NamedGroupHandle {
    type Payload = Group;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_resource(&self, api: &InstanaApi) -> RestResource<Group> {
        api.groups()
    }

    fn state_to_payload(&self, state: &StateValue) -> Result<Group, Diagnostics> {
        let reader = ObjectReader::root(state);
        let name = reader.required_string("name").map_err(Diagnostics::from)?;
        let id = reader.optional_string("id").map_err(Diagnostics::from)?;
        Ok(Group {
            id: id.unwrap_or_default(),
            name,
            ..Group::default()
        })
    }

    fn payload_to_state(
        &self,
        payload: &Group,
        _prior: &StateValue,
    ) -> Result<StateValue, Diagnostics> {
        Ok(StateValue::object().with("id", &payload.id).with("name", &payload.name))
    }
}
