//! Core types shared across the search and details layers.
//!
//! [`SuggestionCandidate`] is what the search dropdown shows. [`DrugRecord`]
//! and [`DrugDetails`] back the details view. [`Route`] is how a controller
//! asks the shell to change views.

use serde::Serialize;

/// One entry in the search dropdown.
///
/// Candidates built from a concept match carry `rxcui` and `synonym`;
/// candidates built from spelling suggestions carry only a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionCandidate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rxcui: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
}

impl SuggestionCandidate {
    /// A name-only candidate, as produced by the spelling fallback.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rxcui: None,
            synonym: None,
        }
    }
}

/// Canonical properties of a drug concept, shown on the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugRecord {
    pub name: String,
    pub rxcui: Option<String>,
    pub synonym: Option<String>,
}

/// A fully loaded details view: the record plus its NDC codes in the order
/// the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugDetails {
    #[serde(flatten)]
    pub record: DrugRecord,
    pub ndcs: Vec<String>,
}

/// A navigation request emitted by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Search,
    /// Details view keyed by the literal drug name, not its identifier.
    Details(String),
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Search => write!(f, "/"),
            Route::Details(name) => write!(f, "/drugs/{name}"),
        }
    }
}
