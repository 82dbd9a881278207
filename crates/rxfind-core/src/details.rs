//! Details layer: resolve a drug name to its record and NDC codes.
//!
//! [`fetch_details`] is a strict two-step chain: name lookup, then NDC lookup
//! by the matched concept's RXCUI. Either short-circuit (no concept, no
//! RXCUI) stops before the second call.
//!
//! [`DetailsController`] runs one fetch per navigation. Leaving the view or
//! opening another drug bumps a generation counter, so a late completion for
//! a view that is no longer shown is dropped.

use crate::{
    error::DetailsFailure,
    terminology::Terminology,
    types::{DrugDetails, DrugRecord},
};
use std::sync::Arc;
use tokio::{runtime::Handle, sync::mpsc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailsState {
    #[default]
    Idle,
    Loading,
    Loaded(DrugDetails),
    Failed(DetailsFailure),
}

/// Fetch the record for `name` and the NDC codes of its RXCUI.
///
/// A transport failure on the NDC call fails the load. A payload that is not
/// the expected shape yields an empty NDC list instead.
pub async fn fetch_details(
    client: &dyn Terminology,
    name: &str,
    concept_tty: &str,
) -> Result<DrugDetails, DetailsFailure> {
    let response = client.drugs(name).await.map_err(|err| {
        tracing::warn!(%name, error = %err, "details: drug lookup failed");
        DetailsFailure::Fetch
    })?;

    let concept = response
        .concepts(concept_tty)
        .and_then(|concepts| concepts.first().copied())
        .ok_or(DetailsFailure::NotFound)?;
    let record = DrugRecord::from(concept);

    let Some(rxcui) = record.rxcui.as_deref().filter(|id| !id.is_empty()) else {
        tracing::debug!(%name, "details: matched concept has no rxcui");
        return Err(DetailsFailure::MissingIdentifier);
    };

    let ndcs = match client.ndcs(rxcui).await {
        Ok(resp) => resp.codes(),
        Err(err) if err.is_decode() => {
            tracing::warn!(%rxcui, error = %err, "details: unreadable NDC payload, showing none");
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(%rxcui, error = %err, "details: NDC lookup failed");
            return Err(DetailsFailure::Fetch);
        }
    };

    tracing::debug!(%name, %rxcui, ndcs = ndcs.len(), "details: loaded");
    Ok(DrugDetails { record, ndcs })
}

type Completion = (u64, Result<DrugDetails, DetailsFailure>);

/// Owns the details view state for the drug currently shown.
pub struct DetailsController {
    client: Arc<dyn Terminology>,
    runtime: Handle,
    concept_tty: String,
    name: Option<String>,
    state: DetailsState,
    generation: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl DetailsController {
    pub fn new(client: Arc<dyn Terminology>, concept_tty: impl Into<String>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            concept_tty: concept_tty.into(),
            name: None,
            state: DetailsState::Idle,
            generation: 0,
            tx,
            rx,
        }
    }

    /// The drug name this view is keyed by, if one is open.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }

    /// Start loading `name`, replacing whatever was shown.
    pub fn load(&mut self, name: &str) {
        self.generation += 1;
        let generation = self.generation;
        self.name = Some(name.to_string());
        self.state = DetailsState::Loading;
        tracing::debug!(%name, generation, "details: load started");

        let client = Arc::clone(&self.client);
        let name = name.to_string();
        let tty = self.concept_tty.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = fetch_details(client.as_ref(), &name, &tty).await;
            let _ = tx.send((generation, outcome));
        });
    }

    /// Discard the current record. Any load still in flight is ignored.
    pub fn leave(&mut self) {
        self.generation += 1;
        self.name = None;
        self.state = DetailsState::Idle;
        tracing::debug!(generation = self.generation, "details: view left");
    }

    /// Apply queued completions without blocking.
    /// Returns true if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait for the next completion and apply it.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => self.apply(completion),
            None => false,
        }
    }

    fn apply(&mut self, (generation, outcome): Completion) -> bool {
        if generation != self.generation || !matches!(self.state, DetailsState::Loading) {
            tracing::debug!(generation, current = self.generation, "details: stale completion discarded");
            return false;
        }
        self.state = match outcome {
            Ok(details) => DetailsState::Loaded(details),
            Err(failure) => DetailsState::Failed(failure),
        };
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
