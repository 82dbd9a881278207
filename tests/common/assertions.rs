//! Domain-specific assertion macros for rxfind harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! state the controller was actually in.

/// Assert that a `SearchState` is `Loaded` with exactly these names, in order.
///
/// ```rust
/// assert_candidates!(controller.state(), ["ambien"]);
/// ```
#[macro_export]
macro_rules! assert_candidates {
    ($state:expr, [$($name:expr),* $(,)?]) => {{
        let state: &rxfind_core::SearchState = $state;
        let expected: Vec<&str> = vec![$($name),*];
        match state {
            rxfind_core::SearchState::Loaded(candidates) => {
                let actual: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
                pretty_assertions::assert_eq!(actual, expected, "candidate names");
            }
            other => panic!(
                "assert_candidates! failed: expected Loaded({:?}), got {:?}",
                expected, other
            ),
        }
    }};
}

/// Assert that a `SearchState` failed and shows `message` to the user.
#[macro_export]
macro_rules! assert_search_failed {
    ($state:expr, $message:expr) => {{
        let state: &rxfind_core::SearchState = $state;
        match state {
            rxfind_core::SearchState::Failed(failure) => {
                pretty_assertions::assert_eq!(failure.to_string(), $message);
            }
            other => panic!(
                "assert_search_failed! failed: expected Failed({:?}), got {:?}",
                $message, other
            ),
        }
    }};
}

/// Assert that a `DetailsState` is `Loaded` with this name, RXCUI and NDC list.
#[macro_export]
macro_rules! assert_details_loaded {
    ($state:expr, name: $name:expr, rxcui: $rxcui:expr, ndcs: [$($ndc:expr),* $(,)?]) => {{
        let state: &rxfind_core::DetailsState = $state;
        match state {
            rxfind_core::DetailsState::Loaded(details) => {
                pretty_assertions::assert_eq!(details.record.name, $name);
                pretty_assertions::assert_eq!(details.record.rxcui.as_deref(), Some($rxcui));
                let expected: Vec<&str> = vec![$($ndc),*];
                let actual: Vec<&str> = details.ndcs.iter().map(String::as_str).collect();
                pretty_assertions::assert_eq!(actual, expected, "ndc list");
            }
            other => panic!(
                "assert_details_loaded! failed: expected Loaded({:?}), got {:?}",
                $name, other
            ),
        }
    }};
}

/// Assert that a `DetailsState` failed and shows `message` to the user.
#[macro_export]
macro_rules! assert_details_failed {
    ($state:expr, $message:expr) => {{
        let state: &rxfind_core::DetailsState = $state;
        match state {
            rxfind_core::DetailsState::Failed(failure) => {
                pretty_assertions::assert_eq!(failure.to_string(), $message);
            }
            other => panic!(
                "assert_details_failed! failed: expected Failed({:?}), got {:?}",
                $message, other
            ),
        }
    }};
}
