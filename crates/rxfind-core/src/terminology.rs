//! The terminology service seam and its wire types.
//!
//! [`Terminology`] is implemented by the RxNav HTTP client in `rxfind-rxnav`
//! and by in-memory fakes in tests. The response structs mirror the RxNav
//! JSON payloads and are deliberately lenient: every container is optional,
//! so an absent or `null` group reads as "no results" rather than a decode
//! failure.
//!
//! # NDC payload shape
//!
//! `/rxcui/{id}/ndcs.json` answers `{"ndcGroup":{"ndcList":{"ndc":[..]}}}`.
//! A bare array directly under `ndcList` is accepted too. Anything else
//! normalises to an empty list.

use crate::{
    error::LookupError,
    types::{DrugRecord, SuggestionCandidate},
};
use async_trait::async_trait;
use serde::Deserialize;

/// Read-only access to the three RxNav endpoints rxfind consumes.
#[async_trait]
pub trait Terminology: Send + Sync {
    /// `GET /drugs.json?name={name}`
    async fn drugs(&self, name: &str) -> Result<DrugsResponse, LookupError>;

    /// `GET /spellingsuggestions.json?name={name}`
    async fn spelling_suggestions(&self, name: &str) -> Result<SpellingResponse, LookupError>;

    /// `GET /rxcui/{rxcui}/ndcs.json`
    async fn ndcs(&self, rxcui: &str) -> Result<NdcResponse, LookupError>;
}

// ---------------------------------------------------------------------------
// /drugs.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugsResponse {
    #[serde(default)]
    pub drug_group: Option<DrugGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub concept_group: Option<Vec<ConceptGroup>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptGroup {
    #[serde(default)]
    pub tty: Option<String>,
    #[serde(default)]
    pub concept_properties: Option<Vec<ConceptProperties>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConceptProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rxcui: Option<String>,
    #[serde(default)]
    pub synonym: Option<String>,
}

impl DrugsResponse {
    /// Named concepts of the first group whose term type equals `tty`.
    ///
    /// Concepts without a name are skipped. Returns `None` when there is no
    /// such group or when nothing named is left in it, which callers treat
    /// as "no match". Other groups are never inspected.
    pub fn concepts(&self, tty: &str) -> Option<Vec<&ConceptProperties>> {
        let groups = self.drug_group.as_ref()?.concept_group.as_deref()?;
        let group = groups.iter().find(|g| g.tty.as_deref() == Some(tty))?;
        let named: Vec<&ConceptProperties> = group
            .concept_properties
            .as_deref()?
            .iter()
            .filter(|c| !c.name().is_empty())
            .collect();
        (!named.is_empty()).then_some(named)
    }
}

impl ConceptProperties {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl From<&ConceptProperties> for SuggestionCandidate {
    fn from(c: &ConceptProperties) -> Self {
        Self {
            name: c.name().to_string(),
            rxcui: c.rxcui.clone(),
            synonym: c.synonym.clone(),
        }
    }
}

impl From<&ConceptProperties> for DrugRecord {
    fn from(c: &ConceptProperties) -> Self {
        Self {
            name: c.name().to_string(),
            rxcui: c.rxcui.clone(),
            synonym: c.synonym.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// /spellingsuggestions.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingResponse {
    #[serde(default)]
    pub suggestion_group: Option<SuggestionGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionGroup {
    #[serde(default)]
    pub suggestion_list: Option<SuggestionList>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestionList {
    #[serde(default)]
    pub suggestion: Option<Vec<String>>,
}

impl SpellingResponse {
    pub fn suggestions(&self) -> &[String] {
        self.suggestion_group
            .as_ref()
            .and_then(|g| g.suggestion_list.as_ref())
            .and_then(|l| l.suggestion.as_deref())
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// /rxcui/{id}/ndcs.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdcResponse {
    #[serde(default)]
    pub ndc_group: Option<NdcGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdcGroup {
    /// Kept untyped so an unexpected shape degrades to an empty list.
    #[serde(default)]
    pub ndc_list: Option<serde_json::Value>,
}

impl NdcResponse {
    /// NDC codes in service order. Non-string entries are skipped.
    pub fn codes(&self) -> Vec<String> {
        use serde_json::Value;

        let list = match self.ndc_group.as_ref().and_then(|g| g.ndc_list.as_ref()) {
            Some(Value::Object(obj)) => obj.get("ndc"),
            Some(v @ Value::Array(_)) => Some(v),
            _ => None,
        };

        match list {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
