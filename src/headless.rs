//! Non-interactive subcommands: one search or one details load, printed to
//! stdout. Failures print the same message the TUI would show to stderr and
//! exit with status 1.

use rxfind_core::{
    config::Config, details::fetch_details, search::run_search, DrugDetails, SearchOptions,
    SuggestionCandidate, Terminology,
};
use std::process::ExitCode;

/// Run the two-step lookup once for `query`, with no debounce and no
/// controller. The printed candidates match what a submitted search shows.
pub async fn search(
    client: &dyn Terminology,
    config: &Config,
    query: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    // Same as submitting a blank field: nothing to do.
    if query.trim().is_empty() {
        tracing::debug!("headless search: blank query ignored");
        return Ok(ExitCode::SUCCESS);
    }

    let options = SearchOptions::from_config(config);
    match run_search(client, query, &options).await {
        Ok(candidates) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                for line in candidates.iter().map(candidate_line) {
                    println!("{line}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn show(
    client: &dyn Terminology,
    config: &Config,
    name: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match fetch_details(client, name, &config.api.concept_tty).await {
        Ok(details) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                print!("{}", details_text(&details));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// `name<TAB>rxcui<TAB>synonym`, empty columns for missing fields.
fn candidate_line(c: &SuggestionCandidate) -> String {
    format!(
        "{}\t{}\t{}",
        c.name,
        c.rxcui.as_deref().unwrap_or(""),
        c.synonym.as_deref().unwrap_or("")
    )
}

fn details_text(details: &DrugDetails) -> String {
    let record = &details.record;
    let mut out = format!(
        "{}\nRXCUI:    {}\nSynonym:  {}\n",
        record.name,
        record.rxcui.as_deref().unwrap_or("-"),
        record.synonym.as_deref().filter(|s| !s.is_empty()).unwrap_or("-"),
    );
    if details.ndcs.is_empty() {
        out.push_str("No NDCs found\n");
    } else {
        out.push_str("NDCs:\n");
        for ndc in &details.ndcs {
            out.push_str("  ");
            out.push_str(ndc);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rxfind_core::DrugRecord;

    #[test]
    fn candidate_lines_leave_missing_columns_empty() {
        assert_eq!(candidate_line(&SuggestionCandidate::named("ambien")), "ambien\t\t");
        let full = SuggestionCandidate {
            name: "a".into(),
            rxcui: Some("1".into()),
            synonym: Some("s".into()),
        };
        assert_eq!(candidate_line(&full), "a\t1\ts");
    }

    #[test]
    fn details_text_lists_ndcs_or_says_none() {
        let mut details = DrugDetails {
            record: DrugRecord {
                name: "Ambien 10 MG Oral Tablet".into(),
                rxcui: Some("854873".into()),
                synonym: None,
            },
            ndcs: vec![],
        };
        assert_eq!(
            details_text(&details),
            "Ambien 10 MG Oral Tablet\nRXCUI:    854873\nSynonym:  -\nNo NDCs found\n"
        );

        details.ndcs = vec!["0024-5421-31".into()];
        assert!(details_text(&details).ends_with("NDCs:\n  0024-5421-31\n"));
    }
}
