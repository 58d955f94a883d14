//! Search input state machine.
//!
//! The controller owns no I/O. Input events mutate its state and hand back
//! a [`SearchEffect`] for the driver to perform; fetch completions come
//! back through [`SearchBox::suggestions_arrived`]. Keeping the machine
//! pure makes every ordering race in the dropdown deterministic to test.
//!
//! Two races are handled explicitly:
//! - Overlapping suggestion fetches: each fetch carries a monotonically
//!   increasing sequence number, and only the latest issued one may apply
//!   its result. A slow early keystroke can no longer overwrite a fast
//!   later one.
//! - Blur-then-click: pointer-down marks a selection in progress before
//!   the input loses focus, and the blur handler leaves the dropdown open
//!   while that mark is set.

use crate::error::SuggestError;
use crate::model::{CitySuggestion, SearchQuery};

/// Dropdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No dropdown shown.
    Idle,
    /// Dropdown open with 0..N suggestions, possibly mid-fetch.
    Suggesting,
    /// A query was emitted upstream; dropdown closed.
    Resolved,
}

/// Work requested from the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEffect {
    /// Fetch suggestions for `text` and report back with the same `seq`.
    FetchSuggestions { seq: u64, text: String },
    /// Hand the resolved query to the orchestrator.
    Resolve { query: SearchQuery, label: String },
}

#[derive(Debug)]
pub struct SearchBox {
    input: String,
    suggestions: Vec<CitySuggestion>,
    state: SearchState,
    fetching: bool,
    /// Sequence of the most recently issued fetch; completions with any
    /// other sequence are stale and discarded.
    latest_seq: u64,
    selection_in_progress: bool,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            state: SearchState::Idle,
            fetching: false,
            latest_seq: 0,
            selection_in_progress: false,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[CitySuggestion] {
        &self.suggestions
    }

    /// Whether the dropdown should show its loading indicator.
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// The input changed. Non-empty text opens the dropdown and requests a
    /// fetch; empty text closes everything.
    pub fn input_changed(&mut self, text: &str) -> Option<SearchEffect> {
        self.input = text.to_string();

        if text.is_empty() {
            self.suggestions.clear();
            self.fetching = false;
            self.state = SearchState::Idle;
            return None;
        }

        self.state = SearchState::Suggesting;
        self.fetching = true;
        self.latest_seq += 1;

        Some(SearchEffect::FetchSuggestions {
            seq: self.latest_seq,
            text: text.to_string(),
        })
    }

    /// A suggestion fetch completed. Applies only if `seq` is the latest
    /// issued and the dropdown is still open; anything else is a no-op.
    /// Errors degrade to an empty list.
    pub fn suggestions_arrived(
        &mut self,
        seq: u64,
        result: Result<Vec<CitySuggestion>, SuggestError>,
    ) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale suggestions");
            return;
        }
        if self.state != SearchState::Suggesting {
            return;
        }

        self.fetching = false;
        self.suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                // Autocomplete is an enhancement; a failed fetch just
                // presents as "no suggestions found".
                tracing::warn!(error = %e, "suggestion fetch failed");
                Vec::new()
            }
        };
    }

    /// Pointer-down on a suggestion, before the input loses focus.
    pub fn begin_selection(&mut self) {
        self.selection_in_progress = true;
    }

    /// A suggestion was clicked. Resolves a coordinate query and closes
    /// the dropdown; the label keeps the human-readable place name.
    pub fn select(&mut self, index: usize) -> Option<SearchEffect> {
        let suggestion = self.suggestions.get(index)?.clone();
        let label = suggestion.label();

        self.input = label.clone();
        self.close();

        Some(SearchEffect::Resolve {
            query: SearchQuery::ByCoordinates {
                lat: suggestion.lat,
                lon: suggestion.lon,
            },
            label,
        })
    }

    /// Submission key pressed. Resolves the raw text as a name query.
    pub fn submit(&mut self) -> Option<SearchEffect> {
        if self.input.is_empty() {
            return None;
        }

        let text = self.input.clone();
        self.close();

        Some(SearchEffect::Resolve {
            query: SearchQuery::ByName { text: text.clone() },
            label: text,
        })
    }

    /// The input lost focus. Closes the dropdown unless a pointer
    /// selection is already in flight.
    pub fn blur(&mut self) {
        if self.selection_in_progress {
            return;
        }
        if self.state == SearchState::Suggesting {
            self.suggestions.clear();
            self.fetching = false;
            self.state = SearchState::Idle;
        }
    }

    fn close(&mut self) {
        self.suggestions.clear();
        self.fetching = false;
        self.selection_in_progress = false;
        self.state = SearchState::Resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> CitySuggestion {
        CitySuggestion {
            name: "London".to_string(),
            country: "GB".to_string(),
            state: None,
            lat: 51.51,
            lon: -0.13,
        }
    }

    fn lyon() -> CitySuggestion {
        CitySuggestion {
            name: "Lyon".to_string(),
            country: "FR".to_string(),
            state: None,
            lat: 45.76,
            lon: 4.84,
        }
    }

    #[test]
    fn typing_opens_the_dropdown_and_requests_a_fetch() {
        let mut search = SearchBox::new();

        let effect = search.input_changed("Lon");
        assert_eq!(
            effect,
            Some(SearchEffect::FetchSuggestions {
                seq: 1,
                text: "Lon".to_string()
            })
        );
        assert_eq!(search.state(), SearchState::Suggesting);
        assert!(search.is_fetching());
    }

    #[test]
    fn clearing_the_input_returns_to_idle() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        assert!(search.input_changed("").is_none());
        assert_eq!(search.state(), SearchState::Idle);
        assert!(search.suggestions().is_empty());
        assert!(!search.is_fetching());
    }

    #[test]
    fn selecting_a_suggestion_resolves_coordinates_and_closes() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        let effect = search.select(0);
        assert_eq!(
            effect,
            Some(SearchEffect::Resolve {
                query: SearchQuery::ByCoordinates {
                    lat: 51.51,
                    lon: -0.13
                },
                label: "London, GB".to_string(),
            })
        );
        assert_eq!(search.state(), SearchState::Resolved);
        assert!(search.suggestions().is_empty());
        assert_eq!(search.input(), "London, GB");
    }

    #[test]
    fn submitting_raw_text_resolves_a_name_query() {
        let mut search = SearchBox::new();
        search.input_changed("Valencia");

        let effect = search.submit();
        assert_eq!(
            effect,
            Some(SearchEffect::Resolve {
                query: SearchQuery::ByName {
                    text: "Valencia".to_string()
                },
                label: "Valencia".to_string(),
            })
        );
        assert_eq!(search.state(), SearchState::Resolved);
    }

    #[test]
    fn submitting_empty_input_does_nothing() {
        let mut search = SearchBox::new();
        assert!(search.submit().is_none());
        assert_eq!(search.state(), SearchState::Idle);
    }

    #[test]
    fn stale_suggestion_response_is_discarded() {
        let mut search = SearchBox::new();

        let first = search.input_changed("Lo");
        let second = search.input_changed("Lyo");
        let (seq1, seq2) = match (first, second) {
            (
                Some(SearchEffect::FetchSuggestions { seq: a, .. }),
                Some(SearchEffect::FetchSuggestions { seq: b, .. }),
            ) => (a, b),
            other => panic!("expected two fetches, got {other:?}"),
        };
        assert!(seq2 > seq1);

        // The fast later keystroke completes first.
        search.suggestions_arrived(seq2, Ok(vec![lyon()]));
        // The slow early one lands afterwards and must not overwrite.
        search.suggestions_arrived(seq1, Ok(vec![london()]));

        assert_eq!(search.suggestions(), &[lyon()]);
        assert!(!search.is_fetching());
    }

    #[test]
    fn late_response_after_clearing_does_not_reopen_the_dropdown() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.input_changed("");

        search.suggestions_arrived(1, Ok(vec![london()]));

        assert_eq!(search.state(), SearchState::Idle);
        assert!(search.suggestions().is_empty());
    }

    #[test]
    fn failed_fetch_degrades_to_an_empty_list() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");

        search.suggestions_arrived(1, Err(SuggestError::Http { status: 500 }));

        assert_eq!(search.state(), SearchState::Suggesting);
        assert!(search.suggestions().is_empty());
        assert!(!search.is_fetching());
    }

    #[test]
    fn blur_closes_the_dropdown() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        search.blur();

        assert_eq!(search.state(), SearchState::Idle);
        assert!(search.suggestions().is_empty());
    }

    #[test]
    fn blur_during_a_pointer_selection_keeps_the_dropdown_open() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        // Pointer-down fires before blur; the click must still land.
        search.begin_selection();
        search.blur();
        assert_eq!(search.state(), SearchState::Suggesting);

        let effect = search.select(0);
        assert!(matches!(effect, Some(SearchEffect::Resolve { .. })));
        assert_eq!(search.state(), SearchState::Resolved);
    }

    #[test]
    fn last_action_wins_when_selection_and_submit_race() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        let click = search.select(0).expect("selection resolves");

        // A submit processed after the click replaces it wholesale; the
        // driver forwards resolutions in arrival order.
        search.input_changed("Valencia");
        let submit = search.submit().expect("submit resolves");

        assert!(matches!(
            click,
            SearchEffect::Resolve {
                query: SearchQuery::ByCoordinates { .. },
                ..
            }
        ));
        assert_eq!(
            submit,
            SearchEffect::Resolve {
                query: SearchQuery::ByName {
                    text: "Valencia".to_string()
                },
                label: "Valencia".to_string(),
            }
        );
    }

    #[test]
    fn selecting_out_of_range_is_a_no_op() {
        let mut search = SearchBox::new();
        search.input_changed("Lon");
        search.suggestions_arrived(1, Ok(vec![london()]));

        assert!(search.select(5).is_none());
        assert_eq!(search.state(), SearchState::Suggesting);
    }
}
