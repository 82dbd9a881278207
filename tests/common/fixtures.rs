//! RxNav JSON payloads used across harnesses, trimmed from real responses.
//!
//! Extra fields the client never reads (`language`, `suppress`, `umlscui`)
//! are kept so decoding is exercised against the real shape.

use serde_json::{json, Value};

/// `/drugs.json?name=aspirin`: an ingredient group, a clinical group and a
/// branded (`SBD`) group. Only the `SBD` concepts count as matches.
pub fn aspirin_drugs() -> Value {
    json!({
        "drugGroup": {
            "name": null,
            "conceptGroup": [
                { "tty": "BPCK" },
                { "tty": "IN", "conceptProperties": [
                    { "rxcui": "1191", "name": "aspirin", "synonym": "",
                      "tty": "IN", "language": "ENG", "suppress": "N", "umlscui": "" }
                ]},
                { "tty": "SCD", "conceptProperties": [
                    { "rxcui": "243670", "name": "aspirin 81 MG Oral Tablet", "synonym": "",
                      "tty": "SCD", "language": "ENG", "suppress": "N", "umlscui": "" }
                ]},
                { "tty": "SBD", "conceptProperties": [
                    { "rxcui": "1052678", "name": "aspirin 325 MG Oral Tablet [Bayer Aspirin]",
                      "synonym": "Bayer Aspirin 325 MG Oral Tablet", "tty": "SBD",
                      "language": "ENG", "suppress": "N", "umlscui": "" },
                    { "rxcui": "1536840", "name": "Ecotrin 81 MG Delayed Release Oral Tablet",
                      "synonym": "", "tty": "SBD", "language": "ENG", "suppress": "N",
                      "umlscui": "" },
                    { "rxcui": "2563431", "name": "aspirin 81 MG Chewable Tablet [St. Joseph]",
                      "synonym": "St. Joseph 81 MG Chewable Tablet", "tty": "SBD",
                      "language": "ENG", "suppress": "N", "umlscui": "" }
                ]}
            ]
        }
    })
}

/// `/drugs.json?name=ambien`.
pub fn ambien_drugs() -> Value {
    json!({
        "drugGroup": {
            "name": null,
            "conceptGroup": [
                { "tty": "SBD", "conceptProperties": [
                    { "rxcui": "854873", "name": "zolpidem tartrate 10 MG Oral Tablet [Ambien]",
                      "synonym": "Ambien 10 MG Oral Tablet", "tty": "SBD",
                      "language": "ENG", "suppress": "N", "umlscui": "" },
                    { "rxcui": "854875", "name": "zolpidem tartrate 5 MG Oral Tablet [Ambien]",
                      "synonym": "Ambien 5 MG Oral Tablet", "tty": "SBD",
                      "language": "ENG", "suppress": "N", "umlscui": "" }
                ]}
            ]
        }
    })
}

/// `/rxcui/854873/ndcs.json`.
pub fn ambien_ndcs() -> Value {
    json!({
        "ndcGroup": {
            "rxcui": null,
            "ndcList": { "ndc": ["00024542131", "00024542134", "00024542150"] }
        }
    })
}

/// An `SBD` concept that came back without an RXCUI.
pub fn concept_without_rxcui(name: &str) -> Value {
    json!({
        "drugGroup": {
            "conceptGroup": [
                { "tty": "SBD", "conceptProperties": [
                    { "name": name, "synonym": "", "tty": "SBD" }
                ]}
            ]
        }
    })
}

/// A pack group listed ahead of the branded group, holding a concept that
/// came back without a name.
pub fn nameless_pack_then_branded() -> Value {
    json!({
        "drugGroup": {
            "name": null,
            "conceptGroup": [
                { "tty": "BPCK", "conceptProperties": [ { "rxcui": "9", "tty": "BPCK" } ] },
                { "tty": "SBD", "conceptProperties": [
                    { "rxcui": "1191", "name": "Aspirin", "synonym": "ASA", "tty": "SBD" }
                ]}
            ]
        }
    })
}

/// `/spellingsuggestions.json`: a populated suggestion list.
pub fn spelling(suggestions: &[&str]) -> Value {
    json!({
        "suggestionGroup": {
            "name": null,
            "suggestionList": { "suggestion": suggestions }
        }
    })
}

/// `/spellingsuggestions.json` for a name with no close spellings.
pub fn no_spelling() -> Value {
    json!({ "suggestionGroup": { "name": null, "suggestionList": null } })
}

pub const NOT_JSON: &str = "<html><body>502 Bad Gateway</body></html>";
