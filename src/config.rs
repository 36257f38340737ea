use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;

use crate::model::MeasureSystem;

/// Main recipe finder configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// API key for the recipe service (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the recipe service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Measurement system used when listing ingredient amounts
    #[serde(default)]
    pub measure_system: MeasureSystem,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            measure_system: MeasureSystem::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe_finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from TOML text, still honouring environment overrides
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        build_config(File::from_str(toml, FileFormat::Toml))
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the layering rules.
pub fn load_config() -> Result<FinderConfig, ConfigError> {
    build_config(File::with_name("recipe_finder").required(false))
}

fn build_config<S>(file: S) -> Result<FinderConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        // Use double underscore after the prefix: RECIPE_FINDER__BASE_URL
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
