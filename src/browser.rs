use log::debug;
use std::sync::Arc;

use crate::client::RecipeSource;
use crate::model::{MealDetail, MealSummary};
use crate::query::SearchQuery;
use crate::state::{DetailOutcome, Event, RequestIds, SearchOutcome, UiState};
use crate::BrowserError;

/// Run one filter request and classify how it ended
pub async fn fetch_search_outcome(
    source: &dyn RecipeSource,
    query: &SearchQuery,
) -> SearchOutcome {
    match source.filter_by_ingredient(&query.ingredient_key()).await {
        Ok(meals) => SearchOutcome::from_meals(meals),
        Err(e) => SearchOutcome::Failed(e.to_string()),
    }
}

/// Run one lookup request and classify how it ended
pub async fn fetch_detail_outcome(source: &dyn RecipeSource, id: &str) -> DetailOutcome {
    match source.lookup_by_id(id).await {
        Ok(meal) => DetailOutcome::Loaded(Box::new(meal)),
        Err(e) => DetailOutcome::Failed(e.to_string()),
    }
}

/// Drives [`UiState`] against a [`RecipeSource`], one awaited request at a time
pub struct RecipeBrowser {
    source: Arc<dyn RecipeSource>,
    state: UiState,
    requests: RequestIds,
}

impl RecipeBrowser {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            state: UiState::new(),
            requests: RequestIds::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn results(&self) -> &[MealSummary] {
        &self.state.results
    }

    pub fn selected(&self) -> Option<&MealDetail> {
        self.state.selected.as_ref()
    }

    /// Search by ingredient.
    ///
    /// Blank input raises the validation alert and returns
    /// `BrowserError::EmptyQuery` without touching the network. Any other
    /// failure is logged and shows up as an empty result list.
    pub async fn search(&mut self, raw: &str) -> Result<&[MealSummary], BrowserError> {
        self.state.apply(Event::QueryChanged(raw.to_string()));

        let query = match SearchQuery::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                self.state.apply(Event::Alert(e.to_string()));
                return Err(e);
            }
        };

        let request = self.requests.next();
        self.state.apply(Event::SearchStarted {
            request,
            query: query.clone(),
        });
        let outcome = fetch_search_outcome(self.source.as_ref(), &query).await;
        self.state.apply(Event::SearchFinished { request, outcome });

        Ok(&self.state.results)
    }

    /// Load the full record for a meal. On failure the previous selection stays.
    pub async fn select_meal(&mut self, id: &str) -> Option<&MealDetail> {
        let request = self.requests.next();
        self.state.apply(Event::DetailRequested {
            request,
            id: id.to_string(),
        });
        let outcome = fetch_detail_outcome(self.source.as_ref(), id).await;
        self.state.apply(Event::DetailFinished { request, outcome });

        self.state.selected.as_ref()
    }

    pub fn go_back(&mut self) {
        debug!("back to results");
        self.state.apply(Event::BackPressed);
    }

    pub fn dismiss_alert(&mut self) {
        self.state.apply(Event::AlertDismissed);
    }
}
