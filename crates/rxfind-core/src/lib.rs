//! rxfind-core: drug lookup core library.
//!
//! This crate holds everything below the presentation layer: the shared
//! domain types, configuration, the [`Terminology`] seam that the RxNav
//! client implements, and the two controllers the UI drives.
//!
//! # Architecture
//!
//! ```text
//! keystrokes ──► SearchController ──► Terminology ──► RxNav REST
//!                     │ on_select
//!                     ▼
//!               DetailsController ──► Terminology
//! ```
//!
//! Network calls run on `tokio` tasks and report back over channels. The UI
//! thread owns both controllers and is the only place their state changes.

pub mod config;
pub mod details;
pub mod error;
pub mod search;
pub mod terminology;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use details::{DetailsController, DetailsState};
pub use error::{DetailsFailure, LookupError, SearchFailure};
pub use search::{SearchController, SearchOptions, SearchState};
pub use terminology::Terminology;
pub use types::{DrugDetails, DrugRecord, Route, SuggestionCandidate};
