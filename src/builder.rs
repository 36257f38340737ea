use std::time::Duration;

use crate::client::SpoonacularClient;
use crate::config::FinderConfig;
use crate::FinderError;

/// Builder for configuring the recipe service client
#[derive(Debug, Default)]
pub struct RecipeFinderBuilder {
    config: Option<FinderConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeFinderBuilder {
    /// Start from a loaded configuration; explicit builder settings win
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().config(FinderConfig::default());
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key for the recipe service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at another deployment of the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `FinderError` if:
    /// - No API key is set here, in the configuration or in SPOONACULAR_API_KEY
    /// - The base URL is empty
    /// - The timeout is zero
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<SpoonacularClient, FinderError> {
        let mut config = self.config.unwrap_or_default();

        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        if config.base_url.trim().is_empty() {
            return Err(FinderError::BuilderError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        SpoonacularClient::from_config(&config, timeout)
    }
}

/// Main entry point for the builder API
pub struct RecipeFinder;

impl RecipeFinder {
    /// Creates a new builder for the recipe service client
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder();
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}
