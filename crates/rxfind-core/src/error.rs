//! Error types for rxfind-core.
//!
//! [`LookupError`] is what a [`Terminology`](crate::Terminology) call returns
//! and carries the diagnostic detail. [`SearchFailure`] and
//! [`DetailsFailure`] are what the UI sees: their `Display` output is the
//! exact user-facing message and never includes the underlying cause.

use thiserror::Error;

/// A failed call to the terminology service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("invalid RxNav base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("could not decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl LookupError {
    /// True when the service answered but the payload was not the expected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, LookupError::Decode { .. })
    }
}

/// Terminal failure of a search, as shown in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The primary name lookup failed.
    #[error("Error fetching data")]
    Lookup,
    /// The spelling-suggestion fallback failed.
    #[error("Error fetching suggestions")]
    Suggestions,
}

/// Terminal failure of a details load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetailsFailure {
    /// No concept of the expected category matched the name.
    #[error("Drug details not found")]
    NotFound,
    /// The matched concept has no identifier to look up NDCs with.
    #[error("RXCUI not found")]
    MissingIdentifier,
    /// Transport or payload failure at either call.
    #[error("Error fetching drug details")]
    Fetch,
}
