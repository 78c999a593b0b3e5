use std::fmt;

use crate::BrowserError;

/// Validated search text; never empty after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim the raw input, rejecting empty and whitespace-only text
    pub fn parse(raw: &str) -> Result<Self, BrowserError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BrowserError::EmptyQuery);
        }
        Ok(SearchQuery(trimmed.to_string()))
    }

    /// The trimmed text as entered
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key sent to the filter endpoint: trimmed and lower-cased
    pub fn ingredient_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
