//! Search layer: debounced remote search with a spelling-suggestion fallback.
//!
//! [`SearchController`] turns raw keystrokes into at most one lookup per
//! quiet period. [`run_search`] is the lookup itself: a name lookup against
//! the terminology service, falling back to spelling suggestions when no
//! concept of the configured term type matches.
//!
//! # Ordering
//!
//! Every issued search takes the next value of a monotonically increasing
//! sequence counter. Completions arrive over a channel in whatever order the
//! network delivers them; only the one carrying the latest sequence number is
//! applied. Clearing the input also advances the counter, so a search that
//! was in flight when the box was emptied cannot repopulate the dropdown.
//!
//! # Debounce
//!
//! Each non-blank keystroke aborts the pending timer task and spawns a new
//! one. A timer that already fired but whose message is still queued is
//! caught by the debounce generation check in [`SearchController::poll`].

use crate::{
    config::Config,
    error::SearchFailure,
    terminology::Terminology,
    types::{Route, SuggestionCandidate},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The dropdown state. Exactly one per [`SearchController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    /// Possibly empty, in which case the UI shows a "no matches" line.
    Loaded(Vec<SuggestionCandidate>),
    Failed(SearchFailure),
}

impl SearchState {
    /// Candidates to display. Empty unless [`SearchState::Loaded`].
    pub fn candidates(&self) -> &[SuggestionCandidate] {
        match self {
            SearchState::Loaded(candidates) => candidates,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

/// Tunables for [`SearchController`] and [`run_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub debounce: Duration,
    pub concept_tty: String,
    pub fallback_suggestion: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.search.debounce(),
            concept_tty: config.api.concept_tty.clone(),
            fallback_suggestion: config.search.fallback_suggestion.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Run one search for `query` to completion.
///
/// The query is passed to the service untrimmed. Concept matches are
/// additionally filtered to names containing `query` case-insensitively.
/// Lookup errors are logged here and collapsed into a [`SearchFailure`].
pub async fn run_search(
    client: &dyn Terminology,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<SuggestionCandidate>, SearchFailure> {
    let response = client.drugs(query).await.map_err(|err| {
        tracing::warn!(%query, error = %err, "drug lookup failed");
        SearchFailure::Lookup
    })?;

    if let Some(concepts) = response.concepts(&options.concept_tty) {
        let needle = query.to_lowercase();
        let total = concepts.len();
        let matches: Vec<SuggestionCandidate> = concepts
            .into_iter()
            .map(SuggestionCandidate::from)
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();
        tracing::debug!(%query, total, kept = matches.len(), "concept matches");
        return Ok(matches);
    }

    tracing::debug!(%query, "no concept matches, asking for spelling suggestions");
    let spelling = client.spelling_suggestions(query).await.map_err(|err| {
        tracing::warn!(%query, error = %err, "spelling suggestion lookup failed");
        SearchFailure::Suggestions
    })?;

    let suggestions = spelling.suggestions();
    if suggestions.is_empty() {
        tracing::debug!(%query, fallback = %options.fallback_suggestion, "no spelling suggestions");
        return Ok(vec![SuggestionCandidate::named(&options.fallback_suggestion)]);
    }
    Ok(suggestions.iter().map(SuggestionCandidate::named).collect())
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Message {
    DebounceElapsed {
        generation: u64,
        query: String,
    },
    Completed {
        seq: u64,
        outcome: Result<Vec<SuggestionCandidate>, SearchFailure>,
    },
}

/// Owns the query text and the dropdown state.
///
/// All methods must be called from the thread that owns the controller; the
/// network work happens on tasks spawned onto `runtime`. Call
/// [`SearchController::poll`] once per UI tick to apply completions.
pub struct SearchController {
    client: Arc<dyn Terminology>,
    runtime: Handle,
    options: SearchOptions,
    query: String,
    state: SearchState,
    debounce: Option<JoinHandle<()>>,
    debounce_generation: u64,
    /// Sequence number of the most recently issued search.
    issued: u64,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl SearchController {
    pub fn new(client: Arc<dyn Terminology>, options: SearchOptions, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            options,
            query: String::new(),
            state: SearchState::Idle,
            debounce: None,
            debounce_generation: 0,
            issued: 0,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn candidates(&self) -> &[SuggestionCandidate] {
        self.state.candidates()
    }

    /// True while a debounced search is scheduled but has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.debounce.is_some()
    }

    /// Record the full current field value after a keystroke.
    ///
    /// Blank input clears the dropdown immediately and cancels both the
    /// pending timer and any in-flight search. Anything else (re)starts the
    /// debounce timer.
    pub fn on_input_changed(&mut self, text: &str) {
        self.query = text.to_string();
        self.cancel_debounce();

        if text.trim().is_empty() {
            self.issued += 1;
            self.state = SearchState::Idle;
            tracing::debug!(seq = self.issued, "search: input cleared");
            return;
        }

        let generation = self.debounce_generation;
        let delay = self.options.debounce;
        let query = self.query.clone();
        let tx = self.tx.clone();
        self.debounce = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Message::DebounceElapsed { generation, query });
        }));
        tracing::debug!(query = %self.query, generation, "search: debounce scheduled");
    }

    /// Search the current query now, skipping the debounce.
    pub fn on_submit(&mut self) {
        self.cancel_debounce();
        if self.query.trim().is_empty() {
            return;
        }
        let query = self.query.clone();
        self.search(query);
    }

    /// Ask the shell to open the details view for `name`.
    pub fn on_select(&self, name: &str) -> Route {
        tracing::debug!(%name, "search: candidate selected");
        Route::Details(name.to_string())
    }

    /// Issue a search for `query` and return its sequence number.
    ///
    /// The state becomes [`SearchState::Loading`] immediately; the result is
    /// applied by a later [`poll`](Self::poll) or [`step`](Self::step).
    pub fn search(&mut self, query: String) -> u64 {
        self.issued += 1;
        let seq = self.issued;
        self.state = SearchState::Loading;
        tracing::debug!(%query, seq, "search: issued");

        let client = Arc::clone(&self.client);
        let options = self.options.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let outcome = run_search(client.as_ref(), &query, &options).await;
            let _ = tx.send(Message::Completed { seq, outcome });
        });
        seq
    }

    /// Apply every queued timer fire and completion without blocking.
    /// Returns true if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.apply(msg);
        }
        changed
    }

    /// Wait for the next queued message and apply it.
    /// Returns true if it changed the visible state.
    pub async fn step(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => self.apply(msg),
            None => false,
        }
    }

    fn apply(&mut self, msg: Message) -> bool {
        match msg {
            Message::DebounceElapsed { generation, query } => {
                if generation != self.debounce_generation || self.debounce.is_none() {
                    tracing::debug!(generation, "search: stale debounce fire ignored");
                    return false;
                }
                self.debounce = None;
                self.search(query);
                true
            }
            Message::Completed { seq, outcome } => {
                if seq != self.issued {
                    tracing::debug!(seq, latest = self.issued, "search: stale completion discarded");
                    return false;
                }
                self.state = match outcome {
                    Ok(candidates) => SearchState::Loaded(candidates),
                    Err(failure) => SearchState::Failed(failure),
                };
                tracing::debug!(seq, state = ?self.state, "search: completed");
                true
            }
        }
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        self.debounce_generation += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
