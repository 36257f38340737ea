mod spoonacular;
pub(crate) mod types;

pub use spoonacular::SpoonacularClient;

use async_trait::async_trait;

use crate::model::{RecipeDetail, RecipeId, RecipeSummary};
use crate::FinderError;

/// Number of summaries requested per search
pub const RESULT_COUNT: u32 = 9;

/// How the recipe service orders search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ranking {
    /// Prefer recipes that use as many of the given ingredients as possible
    #[default]
    MaximizeUsed,
    /// Prefer recipes that need as few extra ingredients as possible
    MinimizeMissing,
}

impl Ranking {
    pub fn as_param(&self) -> &'static str {
        match self {
            Ranking::MaximizeUsed => "1",
            Ranking::MinimizeMissing => "2",
        }
    }
}

/// A search-by-ingredients request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Ingredient names, comma separated in submission order
    pub ingredients: String,
    pub number: u32,
    pub ranking: Ranking,
    /// Skip staples such as water, salt and flour when matching
    pub ignore_pantry: bool,
}

impl SearchQuery {
    /// A query with the fixed result count and ranking
    pub fn new(ingredients: impl Into<String>) -> Self {
        SearchQuery {
            ingredients: ingredients.into(),
            number: RESULT_COUNT,
            ranking: Ranking::MaximizeUsed,
            ignore_pantry: true,
        }
    }
}

/// The remote recipe-search capability
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Resolve a set of ingredient names to ranked recipe summaries
    async fn search_by_ingredients(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<RecipeSummary>, FinderError>;

    /// Resolve a recipe identifier to its full details
    async fn recipe_details(&self, id: RecipeId) -> Result<RecipeDetail, FinderError>;
}
