use thiserror::Error;

/// Errors that can occur while browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The search text was empty or whitespace only
    #[error("Type any recipe")]
    EmptyQuery,

    /// The request could not be sent or its body could not be read
    #[error("Failed to fetch: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The body was not the JSON shape the API documents
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Lookup returned no meal for the id
    #[error("No meal found with id {0}")]
    MealNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal or log file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Whether this error comes from input validation rather than the network
    pub fn is_validation(&self) -> bool {
        matches!(self, BrowserError::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_message_matches_alert() {
        assert_eq!(BrowserError::EmptyQuery.to_string(), "Type any recipe");
        assert!(BrowserError::EmptyQuery.is_validation());
    }

    #[test]
    fn test_status_error_mentions_url() {
        let err = BrowserError::Status {
            status: 503,
            url: "http://localhost/filter.php".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("/filter.php"));
        assert!(!err.is_validation());
    }
}
