use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::types::{DetailPayload, SummaryPayload};
use super::{RecipeService, SearchQuery};
use crate::config::FinderConfig;
use crate::model::{RecipeDetail, RecipeId, RecipeSummary};
use crate::FinderError;

/// HTTP client for the Spoonacular recipe API
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Create a new client from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, FinderError> {
        Self::from_config(config, Duration::from_secs(config.timeout))
    }

    /// Like [`new`](Self::new), with the timeout given at full precision
    pub(crate) fn from_config(
        config: &FinderConfig,
        timeout: Duration,
    ) -> Result<Self, FinderError> {
        let api_key = resolve_api_key(
            config.api_key.clone(),
            std::env::var("SPOONACULAR_API_KEY").ok(),
        )
        .ok_or(FinderError::MissingApiKey)?;

        Self::with_options(api_key, config.base_url.clone(), Some(timeout))
    }

    /// Create a client with explicit settings
    ///
    /// # Errors
    /// A zero timeout is rejected, since every request would fail with it.
    pub fn with_options(
        api_key: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, FinderError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        if timeout.is_zero() {
            return Err(FinderError::BuilderError(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(SpoonacularClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FinderError> {
        let url = format!("{}{}", self.base_url, path);
        // The API key is appended separately so it never reaches the logs
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} failed with status {}", url, status);
            return Err(FinderError::Status { status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected response shape from {}: {}", url, e);
            FinderError::ParseError(e)
        })
    }
}

/// Config key first, then the environment. Blank keys count as unset.
fn resolve_api_key(configured: Option<String>, from_env: Option<String>) -> Option<String> {
    let usable = |key: &String| !key.trim().is_empty();
    configured.filter(usable).or_else(|| from_env.filter(usable))
}

#[async_trait]
impl RecipeService for SpoonacularClient {
    async fn search_by_ingredients(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        let params = [
            ("ingredients", query.ingredients.clone()),
            ("number", query.number.to_string()),
            ("ranking", query.ranking.as_param().to_string()),
            ("ignorePantry", query.ignore_pantry.to_string()),
        ];

        let payload: Vec<SummaryPayload> = self
            .get_json("/recipes/findByIngredients", &params)
            .await?;
        debug!("Search returned {} recipes", payload.len());

        Ok(payload.into_iter().map(RecipeSummary::from).collect())
    }

    async fn recipe_details(&self, id: RecipeId) -> Result<RecipeDetail, FinderError> {
        let params = [("includeNutrition", "false".to_string())];

        let payload: DetailPayload = self
            .get_json(&format!("/recipes/{}/information", id), &params)
            .await?;

        Ok(RecipeDetail::from(payload))
    }
}
