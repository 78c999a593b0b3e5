use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::BrowserConfig;
use crate::model::{MealDetail, MealSummary, MealsEnvelope};
use crate::BrowserError;

/// Where the browser gets its meals from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// List meals that use the given ingredient; an empty list means no matches
    async fn filter_by_ingredient(&self, ingredient: &str)
        -> Result<Vec<MealSummary>, BrowserError>;

    /// Fetch the full record for one meal
    async fn lookup_by_id(&self, id: &str) -> Result<MealDetail, BrowserError>;
}

/// HTTP client for the TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client from configuration
    pub fn new(config: &BrowserConfig) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        param: &str,
    ) -> Result<Vec<T>, BrowserError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}?i={}", url, param);

        let response = self.client.get(&url).query(&[("i", param)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_meals())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<MealSummary>, BrowserError> {
        let meals = self.get_meals("filter.php", ingredient).await?;
        debug!("{} meals use '{}'", meals.len(), ingredient);
        Ok(meals)
    }

    async fn lookup_by_id(&self, id: &str) -> Result<MealDetail, BrowserError> {
        self.get_meals::<MealDetail>("lookup.php", id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::MealNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_filter_by_ingredient() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals":[
                    {"idMeal":"1","strMeal":"Chicken Curry","strMealThumb":"u1"},
                    {"idMeal":"2","strMeal":"Chicken Pie","strMealThumb":"u2"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let meals = client.filter_by_ingredient("chicken").await.unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].id, "1");
        assert_eq!(meals[1].name, "Chicken Pie");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_filter_encodes_ingredient() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken breast & rice".into()))
            .with_status(200)
            .with_body(r#"{"meals":null}"#)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let meals = client
            .filter_by_ingredient("chicken breast & rice")
            .await
            .unwrap();

        assert!(meals.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_filter_missing_meals_field() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        assert!(client.filter_by_ingredient("x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let err = client.filter_by_ingredient("beef").await.unwrap_err();

        assert!(matches!(err, BrowserError::Status { status: 500, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_filter_malformed_body() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let err = client.filter_by_ingredient("beef").await.unwrap_err();
        assert!(matches!(err, BrowserError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
            .with_status(200)
            .with_body(
                r#"{"meals":[{
                    "idMeal":"52772",
                    "strMeal":"Teriyaki Chicken Casserole",
                    "strMealThumb":"https://example.com/t.jpg",
                    "strInstructions":"Preheat oven.\r\nBake.",
                    "strIngredient1":"soy sauce","strMeasure1":"3/4 cup",
                    "strIngredient2":"","strMeasure2":"",
                    "strIngredient3":null,"strMeasure3":null
                }]}"#,
            )
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(format!("{}/", server.url()));
        let meal = client.lookup_by_id("52772").await.unwrap();

        assert_eq!(meal.id, "52772");
        assert_eq!(meal.ingredient_lines(), vec!["soy sauce - 3/4 cup"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_unknown_id() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals":null}"#)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let err = client.lookup_by_id("0").await.unwrap_err();
        assert!(matches!(err, BrowserError::MealNotFound(id) if id == "0"));
    }

    #[test]
    fn test_new_from_config() {
        let config = BrowserConfig::default().with_base_url("http://localhost:8080/api/json/v1/1/");
        let client = MealDbClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/json/v1/1");
    }
}
