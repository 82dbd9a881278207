//! Fake RxNav REST server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, mounted under `/REST` like the real service. Serves:
//! - `GET /REST/drugs.json?name=`, scripted per name
//! - `GET /REST/spellingsuggestions.json?name=`, scripted per name
//! - `GET /REST/rxcui/{id}/ndcs.json`, scripted per RXCUI
//!
//! Unscripted keys answer with the payload RxNav sends for "no results".
//! Per-endpoint status overrides and malformed bodies simulate outages, and
//! per-key delays let tests force responses to arrive out of order.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_rxnav::{Endpoint, FakeRxNav};
//!
//! let api = FakeRxNav::start().await.unwrap();
//! api.script_drugs("aspirin", common::aspirin_drugs()).await;
//! api.fail(Endpoint::Spelling, 503).await;
//!
//! // Point the client at api.base_url()
//! # }
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Drugs,
    Spelling,
    Ndcs,
}

impl Endpoint {
    /// What RxNav answers when nothing matches.
    fn empty_body(self) -> &'static str {
        match self {
            Endpoint::Drugs => r#"{"drugGroup":{"name":null}}"#,
            Endpoint::Spelling => r#"{"suggestionGroup":{"name":null,"suggestionList":null}}"#,
            Endpoint::Ndcs => r#"{"ndcGroup":{"rxcui":null,"ndcList":{}}}"#,
        }
    }
}

/// One request as seen by the server, with the decoded `name` or RXCUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub endpoint: Endpoint,
    pub key: String,
}

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    bodies: HashMap<(Endpoint, String), String>,
    statuses: HashMap<Endpoint, StatusCode>,
    malformed: HashMap<Endpoint, String>,
    delays: HashMap<(Endpoint, String), Duration>,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake RxNav server.
pub struct FakeRxNav {
    addr: SocketAddr,
    state: Shared,
}

impl FakeRxNav {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Shared::default();

        let rest = Router::new()
            .route("/drugs.json", get(drugs))
            .route("/spellingsuggestions.json", get(spelling))
            .route("/rxcui/{id}/ndcs.json", get(ndcs))
            .with_state(state.clone());
        let app = Router::new().nest("/REST", rest);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT/REST`).
    pub fn base_url(&self) -> String {
        format!("http://{}/REST", self.addr)
    }

    pub async fn script_drugs(&self, name: &str, body: Value) {
        self.script(Endpoint::Drugs, name, body).await;
    }

    pub async fn script_spelling(&self, name: &str, body: Value) {
        self.script(Endpoint::Spelling, name, body).await;
    }

    pub async fn script_ndcs(&self, rxcui: &str, body: Value) {
        self.script(Endpoint::Ndcs, rxcui, body).await;
    }

    async fn script(&self, endpoint: Endpoint, key: &str, body: Value) {
        let mut state = self.state.lock().await;
        state
            .bodies
            .insert((endpoint, key.to_string()), body.to_string());
    }

    /// Answer every request to `endpoint` with an empty body and `status`.
    pub async fn fail(&self, endpoint: Endpoint, status: u16) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().await.statuses.insert(endpoint, status);
    }

    /// Answer every request to `endpoint` with 200 and a non-JSON body.
    pub async fn malformed(&self, endpoint: Endpoint, body: &str) {
        self.state
            .lock()
            .await
            .malformed
            .insert(endpoint, body.to_string());
    }

    /// Hold the response for `key` on `endpoint` for `delay`.
    pub async fn delay(&self, endpoint: Endpoint, key: &str, delay: Duration) {
        self.state
            .lock()
            .await
            .delays
            .insert((endpoint, key.to_string()), delay);
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.lock().await.requests.clone()
    }

    /// Decoded keys of every request to `endpoint`, in arrival order.
    pub async fn requests_to(&self, endpoint: Endpoint) -> Vec<String> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.key)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn drugs(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Shared>,
) -> Response {
    let name = params.get("name").cloned().unwrap_or_default();
    respond(&state, Endpoint::Drugs, name).await
}

async fn spelling(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Shared>,
) -> Response {
    let name = params.get("name").cloned().unwrap_or_default();
    respond(&state, Endpoint::Spelling, name).await
}

async fn ndcs(Path(id): Path<String>, State(state): State<Shared>) -> Response {
    respond(&state, Endpoint::Ndcs, id).await
}

async fn respond(state: &Shared, endpoint: Endpoint, key: String) -> Response {
    let (delay, outcome) = {
        let mut s = state.lock().await;
        s.requests.push(Recorded {
            endpoint,
            key: key.clone(),
        });
        let delay = s.delays.get(&(endpoint, key.clone())).copied();
        let outcome = match (s.statuses.get(&endpoint), s.malformed.get(&endpoint)) {
            (Some(status), _) => Err(*status),
            (None, Some(body)) => Ok(body.clone()),
            (None, None) => Ok(s
                .bodies
                .get(&(endpoint, key))
                .cloned()
                .unwrap_or_else(|| endpoint.empty_body().to_string())),
        };
        (delay, outcome)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    match outcome {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(status) => (status, String::new()).into_response(),
    }
}
