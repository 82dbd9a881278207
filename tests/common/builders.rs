//! Test builders: ergonomic constructors for RxNav payloads and wiring.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use rxfind_core::{
    config::Config, DetailsController, SearchController, SearchOptions, Terminology,
};
use rxfind_rxnav::RxNavClient;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

// ---------------------------------------------------------------------------
// DrugsPayload
// ---------------------------------------------------------------------------

/// Fluent builder for `/drugs.json` bodies.
///
/// # Example
///
/// ```rust
/// let body = DrugsPayload::new()
///     .group("SBD")
///     .concept("Tylenol 500 MG Oral Tablet", Some("209387"), Some("Tylenol"))
///     .build();
/// ```
#[derive(Default)]
pub struct DrugsPayload {
    groups: Vec<(String, Vec<Value>)>,
}

impl DrugsPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new concept group; following `concept` calls add to it.
    pub fn group(mut self, tty: &str) -> Self {
        self.groups.push((tty.to_string(), Vec::new()));
        self
    }

    pub fn concept(mut self, name: &str, rxcui: Option<&str>, synonym: Option<&str>) -> Self {
        let mut concept = json!({ "name": name, "tty": "SBD" });
        if let Some(rxcui) = rxcui {
            concept["rxcui"] = json!(rxcui);
        }
        if let Some(synonym) = synonym {
            concept["synonym"] = json!(synonym);
        }
        self.groups
            .last_mut()
            .expect("call .group() before .concept()")
            .1
            .push(concept);
        self
    }

    pub fn build(self) -> Value {
        let groups: Vec<Value> = self
            .groups
            .into_iter()
            .map(|(tty, props)| json!({ "tty": tty, "conceptProperties": props }))
            .collect();
        json!({ "drugGroup": { "name": null, "conceptGroup": groups } })
    }
}

/// `/rxcui/{id}/ndcs.json` body listing `codes`.
pub fn ndcs(codes: &[&str]) -> Value {
    json!({ "ndcGroup": { "rxcui": null, "ndcList": { "ndc": codes } } })
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Defaults pointed at `base_url`, with a short debounce so real-time tests
/// stay fast.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::defaults();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    config.search.debounce_ms = 20;
    config
}

pub fn client(base_url: &str) -> Arc<RxNavClient> {
    Arc::new(RxNavClient::new(base_url, Duration::from_secs(5)).unwrap())
}

pub fn search_controller(base_url: &str) -> SearchController {
    let config = test_config(base_url);
    let client: Arc<dyn Terminology> = client(base_url);
    SearchController::new(client, SearchOptions::from_config(&config), Handle::current())
}

pub fn details_controller(base_url: &str) -> DetailsController {
    let client: Arc<dyn Terminology> = client(base_url);
    DetailsController::new(client, "SBD", Handle::current())
}
