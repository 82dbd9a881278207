//! In-memory [`Terminology`] fake for controller unit tests.
//!
//! Responses are scripted per query string; anything unscripted answers with
//! an empty payload. Every call is recorded so tests can assert exactly which
//! requests were issued. A drug lookup can be held behind a gate to force
//! out-of-order completions.

use crate::{
    error::LookupError,
    terminology::{DrugsResponse, NdcResponse, SpellingResponse, Terminology},
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Drugs(String),
    Spelling(String),
    Ndcs(String),
}

#[derive(Default)]
pub(crate) struct FakeTerminology {
    drugs: Mutex<HashMap<String, Result<DrugsResponse, LookupError>>>,
    spelling: Mutex<HashMap<String, Result<SpellingResponse, LookupError>>>,
    ndcs: Mutex<HashMap<String, Result<NdcResponse, LookupError>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTerminology {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn script_drugs(&self, query: &str, resp: Result<DrugsResponse, LookupError>) {
        self.drugs.lock().unwrap().insert(query.to_string(), resp);
    }

    pub(crate) fn script_spelling(&self, query: &str, resp: Result<SpellingResponse, LookupError>) {
        self.spelling.lock().unwrap().insert(query.to_string(), resp);
    }

    pub(crate) fn script_ndcs(&self, rxcui: &str, resp: Result<NdcResponse, LookupError>) {
        self.ndcs.lock().unwrap().insert(rxcui.to_string(), resp);
    }

    /// Hold `drugs(query)` until [`FakeTerminology::release`] is called.
    pub(crate) fn gate_drugs(&self, query: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(query.to_string(), Arc::new(Notify::new()));
    }

    pub(crate) fn release(&self, query: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(query) {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Terminology for FakeTerminology {
    async fn drugs(&self, name: &str) -> Result<DrugsResponse, LookupError> {
        self.calls.lock().unwrap().push(Call::Drugs(name.to_string()));
        let gate = self.gates.lock().unwrap().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.drugs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(DrugsResponse::default()))
    }

    async fn spelling_suggestions(&self, name: &str) -> Result<SpellingResponse, LookupError> {
        self.calls.lock().unwrap().push(Call::Spelling(name.to_string()));
        self.spelling
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(SpellingResponse::default()))
    }

    async fn ndcs(&self, rxcui: &str) -> Result<NdcResponse, LookupError> {
        self.calls.lock().unwrap().push(Call::Ndcs(rxcui.to_string()));
        self.ndcs
            .lock()
            .unwrap()
            .get(rxcui)
            .cloned()
            .unwrap_or_else(|| Ok(NdcResponse::default()))
    }
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A `/drugs.json` payload with one concept group of term type `tty`.
/// Each concept is `(name, rxcui, synonym)`.
pub(crate) fn drugs_payload(
    tty: &str,
    concepts: &[(&str, Option<&str>, Option<&str>)],
) -> DrugsResponse {
    let props: Vec<_> = concepts
        .iter()
        .map(|(name, rxcui, synonym)| json!({ "name": name, "rxcui": rxcui, "synonym": synonym }))
        .collect();
    serde_json::from_value(json!({
        "drugGroup": {
            "name": null,
            "conceptGroup": [ { "tty": tty, "conceptProperties": props } ]
        }
    }))
    .unwrap()
}

pub(crate) fn spelling_payload(suggestions: &[&str]) -> SpellingResponse {
    serde_json::from_value(json!({
        "suggestionGroup": { "name": null, "suggestionList": { "suggestion": suggestions } }
    }))
    .unwrap()
}

pub(crate) fn ndc_payload(codes: &[&str]) -> NdcResponse {
    serde_json::from_value(json!({
        "ndcGroup": { "rxcui": null, "ndcList": { "ndc": codes } }
    }))
    .unwrap()
}

pub(crate) fn transport_error(endpoint: &'static str) -> LookupError {
    LookupError::Transport {
        endpoint,
        message: "connection refused".to_string(),
    }
}
