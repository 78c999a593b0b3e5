pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod render;
pub mod state;

// Terminal front end
pub mod app;
pub mod tui;
pub mod ui;

pub use browser::RecipeBrowser;
pub use client::{MealDbClient, RecipeSource};
pub use config::BrowserConfig;
pub use error::BrowserError;
pub use model::{IngredientSlot, MealDetail, MealSummary};
pub use query::SearchQuery;

/// Search TheMealDB for meals using an ingredient, with default configuration.
///
/// An empty or whitespace-only query is rejected without a request.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), mealdb_browser::BrowserError> {
/// let meals = mealdb_browser::search_meals("chicken").await?;
/// for meal in meals {
///     println!("{} {}", meal.id, meal.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_meals(query: &str) -> Result<Vec<MealSummary>, BrowserError> {
    let query = SearchQuery::parse(query)?;
    let client = MealDbClient::new(&BrowserConfig::default())?;
    client.filter_by_ingredient(&query.ingredient_key()).await
}

/// Look up one meal on TheMealDB by id, with default configuration.
pub async fn lookup_meal(id: &str) -> Result<MealDetail, BrowserError> {
    let client = MealDbClient::new(&BrowserConfig::default())?;
    client.lookup_by_id(id.trim()).await
}
