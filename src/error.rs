use thiserror::Error;

/// Errors that can occur while searching for or loading recipes
#[derive(Error, Debug)]
pub enum FinderError {
    /// A search was submitted with no ingredients
    #[error("Please add at least one ingredient")]
    NoIngredients,

    /// Failed to reach the recipe service or read its response
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe service answered with a non-success status
    #[error("API request failed with status {status}")]
    Status { status: reqwest::StatusCode },

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// No API key was configured
    #[error("No API key configured. Set RECIPE_FINDER__API_KEY or SPOONACULAR_API_KEY")]
    MissingApiKey,

    /// A search is already in flight
    #[error("A recipe search is already in progress")]
    SearchInFlight,

    /// A recipe detail request is already in flight
    #[error("Recipe details are already loading")]
    DetailInFlight,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl FinderError {
    /// Whether this error came from talking to the recipe service
    /// (transport, status or body shape) rather than from local state.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            FinderError::FetchError(_) | FinderError::Status { .. } | FinderError::ParseError(_)
        )
    }
}
