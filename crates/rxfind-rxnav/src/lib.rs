//! rxfind-rxnav: HTTP client for the NLM RxNav REST API.
//!
//! [`RxNavClient`] implements [`rxfind_core::Terminology`] over `reqwest`.
//! It maps every failure into a [`LookupError`] that names the endpoint:
//! connection and body-read problems become `Transport`, non-2xx answers
//! become `Status`, and payloads that do not match the wire types become
//! `Decode`.
//!
//! The base URL is configurable so tests can point the client at a local
//! fake server.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use rxfind_core::{
    config::ApiConfig,
    terminology::{DrugsResponse, NdcResponse, SpellingResponse},
    LookupError, Terminology,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const RXNAV_API_BASE: &str = "https://rxnav.nlm.nih.gov/REST";

const DRUGS: &str = "drugs.json";
const SPELLING: &str = "spellingsuggestions.json";
const NDCS: &str = "ndcs.json";

/// RxNav REST client.
#[derive(Debug, Clone)]
pub struct RxNavClient {
    http: Client,
    base: Url,
}

impl RxNavClient {
    /// Create a client rooted at `base_url`
    /// (e.g. `https://rxnav.nlm.nih.gov/REST`).
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = parse_base(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rxfind/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http, base })
    }

    pub fn from_config(api: &ApiConfig) -> anyhow::Result<Self> {
        Self::new(&api.base_url, api.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append path segments to the base URL, percent-escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `parse_base` rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
        name: Option<&str>,
    ) -> Result<T, LookupError> {
        let mut request = self.http.get(url);
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        tracing::debug!(endpoint, ?name, "rxnav: request");

        let transport = |err: reqwest::Error| LookupError::Transport {
            endpoint,
            message: err.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|err| LookupError::Decode {
            endpoint,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl Terminology for RxNavClient {
    async fn drugs(&self, name: &str) -> Result<DrugsResponse, LookupError> {
        self.get_json(DRUGS, self.endpoint(&[DRUGS]), Some(name)).await
    }

    async fn spelling_suggestions(&self, name: &str) -> Result<SpellingResponse, LookupError> {
        self.get_json(SPELLING, self.endpoint(&[SPELLING]), Some(name))
            .await
    }

    async fn ndcs(&self, rxcui: &str) -> Result<NdcResponse, LookupError> {
        self.get_json(NDCS, self.endpoint(&["rxcui", rxcui, NDCS]), None)
            .await
    }
}

fn parse_base(base_url: &str) -> Result<Url, LookupError> {
    let invalid = |reason: String| LookupError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
