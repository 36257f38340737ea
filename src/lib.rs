//! Find recipes from the ingredients you have on hand.
//!
//! A [`Session`] collects ingredients, searches the recipe service for
//! matching recipes and loads the details of the one the user picks. The
//! service itself sits behind the [`RecipeService`] trait; the
//! [`SpoonacularClient`] talks to the Spoonacular API.
//!
//! ```no_run
//! # use recipe_finder::{RecipeFinder, Screen, Session};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RecipeFinder::builder().api_key("your-api-key").build()?;
//! let mut session = Session::new();
//! session.add_ingredient("chicken");
//! session.add_ingredient("rice");
//! session.search(&client).await?;
//!
//! if let Some(first) = session.summaries().first() {
//!     let id = first.id;
//!     session.select_recipe(id, &client).await?;
//! }
//! if let Screen::Detail(screen) = session.screen() {
//!     println!("{}", screen.detail.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod controllers;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod session;
pub mod view;

pub use builder::{RecipeFinder, RecipeFinderBuilder};
pub use client::{Ranking, RecipeService, SearchQuery, SpoonacularClient};
pub use config::FinderConfig;
pub use controllers::{Phase, DETAIL_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
pub use error::FinderError;
pub use ingredients::{Ingredient, IngredientCollection};
pub use model::{
    ExtendedIngredient, InstructionStep, Instructions, Measure, MeasureSystem, RecipeDetail,
    RecipeId, RecipeSummary, UntrustedMarkup,
};
pub use session::Session;
pub use view::{DetailScreen, Screen, SearchResults, SearchScreen, SummaryCard};

/// Search for recipes using the configured client.
///
/// Blank names are skipped; an empty list is rejected before any request.
pub async fn find_recipes(ingredients: &[&str]) -> Result<Vec<RecipeSummary>, FinderError> {
    let mut collection = IngredientCollection::new();
    for ingredient in ingredients {
        collection.add(ingredient);
    }
    if collection.is_empty() {
        return Err(FinderError::NoIngredients);
    }

    let client = RecipeFinder::builder().config(FinderConfig::load()?).build()?;
    client
        .search_by_ingredients(&SearchQuery::new(collection.joined()))
        .await
}

/// Load one recipe's details using the configured client
pub async fn fetch_recipe_details(id: RecipeId) -> Result<RecipeDetail, FinderError> {
    let client = RecipeFinder::builder().config(FinderConfig::load()?).build()?;
    client.recipe_details(id).await
}
