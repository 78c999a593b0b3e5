//! UI state for the recipe browser and the events that move it.
//!
//! All mutation goes through [`UiState::apply`]. Network calls happen
//! elsewhere; their completions come back as events tagged with the
//! [`RequestId`] they were issued under. Completions commit in arrival
//! order, so a slow response can overwrite a newer one. That is reported
//! through [`UiState::is_stale_search`] / [`UiState::is_stale_detail`] and
//! logged, but not prevented.

use log::{debug, warn};

use crate::model::{MealDetail, MealSummary};
use crate::query::SearchQuery;

/// Identifies one issued network request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// Hands out increasing request ids
#[derive(Debug, Default)]
pub struct RequestIds {
    last: u64,
}

impl RequestIds {
    pub fn next(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// How a search request ended. `NoMatches` and `Failed` look the same on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<MealSummary>),
    NoMatches,
    Failed(String),
}

impl SearchOutcome {
    pub fn from_meals(meals: Vec<MealSummary>) -> Self {
        if meals.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Found(meals)
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

/// How a detail request ended
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Loaded(Box<MealDetail>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QueryChanged(String),
    SearchStarted {
        request: RequestId,
        query: SearchQuery,
    },
    SearchFinished {
        request: RequestId,
        outcome: SearchOutcome,
    },
    DetailRequested {
        request: RequestId,
        id: String,
    },
    DetailFinished {
        request: RequestId,
        outcome: DetailOutcome,
    },
    BackPressed,
    /// Raise the blocking validation message
    Alert(String),
    AlertDismissed,
}

/// What the user currently sees in the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Result grid with at least one meal
    Results,
    /// Grid area with nothing to show and nothing loading
    Empty,
    /// Grid area while the first results are still on their way
    Pending,
    /// A selected meal
    Detail,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub query: String,
    pub results: Vec<MealSummary>,
    pub selected: Option<MealDetail>,
    pub alert: Option<String>,
    outstanding: usize,
    latest_search: Option<RequestId>,
    latest_detail: Option<RequestId>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly while at least one request has not come back
    pub fn loading(&self) -> bool {
        self.outstanding > 0
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// A finished search that is not the most recently issued one
    pub fn is_stale_search(&self, request: RequestId) -> bool {
        self.latest_search.is_some_and(|latest| latest != request)
    }

    /// A finished lookup that is not the most recently issued one
    pub fn is_stale_detail(&self, request: RequestId) -> bool {
        self.latest_detail.is_some_and(|latest| latest != request)
    }

    pub fn view(&self) -> View {
        if self.selected.is_some() {
            View::Detail
        } else if !self.results.is_empty() {
            View::Results
        } else if self.loading() {
            View::Pending
        } else {
            View::Empty
        }
    }

    pub fn apply(&mut self, event: Event) {
        match event {
            Event::QueryChanged(query) => self.query = query,

            Event::SearchStarted { request, query } => {
                debug!("search {:?} started for '{}'", request, query);
                self.latest_search = Some(request);
                self.outstanding += 1;
            }

            Event::SearchFinished { request, outcome } => {
                if self.is_stale_search(request) {
                    warn!(
                        "search {:?} finished after a newer search; committing anyway",
                        request
                    );
                }
                match outcome {
                    SearchOutcome::Found(meals) => {
                        self.results = meals;
                        self.selected = None;
                    }
                    SearchOutcome::NoMatches => {
                        self.results.clear();
                        self.selected = None;
                    }
                    // Shown exactly like no matches; the selection is left alone
                    SearchOutcome::Failed(reason) => {
                        warn!("Error fetching recipes: {}", reason);
                        self.results.clear();
                    }
                }
                self.finish_request();
            }

            Event::DetailRequested { request, id } => {
                debug!("lookup {:?} started for meal {}", request, id);
                self.latest_detail = Some(request);
                self.outstanding += 1;
            }

            Event::DetailFinished { request, outcome } => {
                if self.is_stale_detail(request) {
                    warn!(
                        "lookup {:?} finished after a newer lookup; committing anyway",
                        request
                    );
                }
                match outcome {
                    DetailOutcome::Loaded(meal) => self.selected = Some(*meal),
                    DetailOutcome::Failed(reason) => {
                        warn!("Error fetching meal details: {}", reason);
                    }
                }
                self.finish_request();
            }

            Event::BackPressed => self.selected = None,

            Event::Alert(message) => self.alert = Some(message),

            Event::AlertDismissed => self.alert = None,
        }
    }

    fn finish_request(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str) -> MealSummary {
        MealSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: format!("u{}", id),
        }
    }

    fn detail(id: &str) -> MealDetail {
        serde_json::from_value(serde_json::json!({
            "idMeal": id,
            "strMeal": format!("Meal {}", id),
        }))
        .unwrap()
    }

    fn start_search(state: &mut UiState, ids: &mut RequestIds, text: &str) -> RequestId {
        let request = ids.next();
        state.apply(Event::SearchStarted {
            request,
            query: SearchQuery::parse(text).unwrap(),
        });
        request
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = UiState::new();
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert!(state.selected.is_none());
        assert!(!state.loading());
        assert_eq!(state.view(), View::Empty);
    }

    #[test]
    fn test_search_lifecycle() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();

        state.apply(Event::QueryChanged("chicken".to_string()));
        let request = start_search(&mut state, &mut ids, "chicken");
        assert!(state.loading());
        assert_eq!(state.view(), View::Pending);

        state.apply(Event::SearchFinished {
            request,
            outcome: SearchOutcome::Found(vec![summary("1", "Chicken Curry")]),
        });
        assert!(!state.loading());
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.view(), View::Results);
    }

    #[test]
    fn test_successful_search_clears_selection() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();
        state.selected = Some(detail("9"));

        let request = start_search(&mut state, &mut ids, "beef");
        state.apply(Event::SearchFinished {
            request,
            outcome: SearchOutcome::NoMatches,
        });

        assert!(state.selected.is_none());
        assert!(state.results.is_empty());
        assert_eq!(state.view(), View::Empty);
    }

    #[test]
    fn test_failed_search_looks_like_no_matches() {
        let mut failed = UiState::new();
        let mut empty = UiState::new();
        let mut ids = RequestIds::default();
        for state in [&mut failed, &mut empty] {
            state.results = vec![summary("1", "Old")];
        }

        let r1 = start_search(&mut failed, &mut ids, "x");
        failed.apply(Event::SearchFinished {
            request: r1,
            outcome: SearchOutcome::Failed("connection refused".to_string()),
        });
        let r2 = start_search(&mut empty, &mut ids, "x");
        empty.apply(Event::SearchFinished {
            request: r2,
            outcome: SearchOutcome::NoMatches,
        });

        assert_eq!(failed.view(), empty.view());
        assert_eq!(failed.results, empty.results);
        assert!(!failed.loading());
    }

    #[test]
    fn test_failed_search_keeps_selection() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();
        state.selected = Some(detail("3"));

        let request = start_search(&mut state, &mut ids, "x");
        state.apply(Event::SearchFinished {
            request,
            outcome: SearchOutcome::Failed("timeout".to_string()),
        });

        assert_eq!(state.selected.as_ref().map(|m| m.id.as_str()), Some("3"));
    }

    #[test]
    fn test_detail_failure_keeps_previous_selection() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();
        state.selected = Some(detail("1"));

        let request = ids.next();
        state.apply(Event::DetailRequested {
            request,
            id: "2".to_string(),
        });
        assert!(state.loading());
        state.apply(Event::DetailFinished {
            request,
            outcome: DetailOutcome::Failed("500".to_string()),
        });

        assert!(!state.loading());
        assert_eq!(state.selected.as_ref().map(|m| m.id.as_str()), Some("1"));
    }

    #[test]
    fn test_back_keeps_results() {
        let mut state = UiState::new();
        state.results = vec![summary("1", "A"), summary("2", "B")];
        state.selected = Some(detail("1"));
        assert_eq!(state.view(), View::Detail);

        state.apply(Event::BackPressed);

        assert!(state.selected.is_none());
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.view(), View::Results);
    }

    #[test]
    fn test_loading_tracks_every_outstanding_request() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();

        let first = start_search(&mut state, &mut ids, "a");
        let second = start_search(&mut state, &mut ids, "b");
        assert_eq!(state.outstanding(), 2);

        state.apply(Event::SearchFinished {
            request: second,
            outcome: SearchOutcome::NoMatches,
        });
        assert!(state.loading());

        state.apply(Event::SearchFinished {
            request: first,
            outcome: SearchOutcome::NoMatches,
        });
        assert!(!state.loading());
    }

    #[test]
    fn test_late_search_response_still_wins() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();

        let slow = start_search(&mut state, &mut ids, "beef");
        let fast = start_search(&mut state, &mut ids, "chicken");

        assert!(!state.is_stale_search(fast));
        state.apply(Event::SearchFinished {
            request: fast,
            outcome: SearchOutcome::Found(vec![summary("1", "Chicken Curry")]),
        });

        assert!(state.is_stale_search(slow));
        state.apply(Event::SearchFinished {
            request: slow,
            outcome: SearchOutcome::Found(vec![summary("7", "Beef Stew")]),
        });

        assert_eq!(state.results, vec![summary("7", "Beef Stew")]);
    }

    #[test]
    fn test_late_detail_response_still_wins() {
        let mut state = UiState::new();
        let mut ids = RequestIds::default();

        let slow = ids.next();
        state.apply(Event::DetailRequested {
            request: slow,
            id: "1".to_string(),
        });
        let fast = ids.next();
        state.apply(Event::DetailRequested {
            request: fast,
            id: "2".to_string(),
        });

        state.apply(Event::DetailFinished {
            request: fast,
            outcome: DetailOutcome::Loaded(Box::new(detail("2"))),
        });
        assert!(state.is_stale_detail(slow));
        state.apply(Event::DetailFinished {
            request: slow,
            outcome: DetailOutcome::Loaded(Box::new(detail("1"))),
        });

        assert_eq!(state.selected.map(|m| m.id), Some("1".to_string()));
    }

    #[test]
    fn test_alert_roundtrip() {
        let mut state = UiState::new();
        state.apply(Event::Alert("Type any recipe".to_string()));
        assert_eq!(state.alert.as_deref(), Some("Type any recipe"));
        state.apply(Event::AlertDismissed);
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_outcome_from_meals() {
        assert_eq!(SearchOutcome::from_meals(vec![]), SearchOutcome::NoMatches);
        assert!(matches!(
            SearchOutcome::from_meals(vec![summary("1", "A")]),
            SearchOutcome::Found(_)
        ));
        assert!(SearchOutcome::Failed("x".into()).is_failure());
    }
}
