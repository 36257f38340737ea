//! Read-only projections of a [`Session`](crate::Session) describing what the
//! user currently sees.

use crate::controllers::Phase;
use crate::ingredients::Ingredient;
use crate::model::{Instructions, MeasureSystem, RecipeDetail, RecipeId, RecipeSummary};

/// Matched ingredient names shown on a card
pub const USED_PREVIEW: usize = 3;
/// Missing ingredient names shown on a card
pub const MISSED_PREVIEW: usize = 2;

/// The two mutually exclusive screens
#[derive(Debug)]
pub enum Screen<'a> {
    Search(SearchScreen<'a>),
    Detail(DetailScreen<'a>),
}

#[derive(Debug)]
pub struct SearchScreen<'a> {
    pub ingredients: &'a [Ingredient],
    /// Whether the pending input would add an ingredient
    pub can_add: bool,
    /// Search in flight; the submit control is disabled
    pub searching: bool,
    /// The recipe whose details are loading
    pub loading_recipe: Option<RecipeId>,
    pub error: Option<&'a str>,
    pub results: SearchResults<'a>,
}

#[derive(Debug)]
pub enum SearchResults<'a> {
    NotSearched,
    Loading,
    Recipes(Vec<SummaryCard<'a>>),
    /// A search ran for the current ingredients and produced nothing
    NoneFound,
}

impl<'a> SearchResults<'a> {
    pub(crate) fn project(phase: &'a Phase<Vec<RecipeSummary>>, has_ingredients: bool) -> Self {
        match phase {
            Phase::Loading => SearchResults::Loading,
            Phase::Success(summaries) if !summaries.is_empty() => {
                SearchResults::Recipes(summaries.iter().map(SummaryCard::from).collect())
            }
            Phase::Success(_) if has_ingredients => SearchResults::NoneFound,
            // A failed or rejected search is reported through the error only
            _ => SearchResults::NotSearched,
        }
    }
}

/// One search result as displayed in the grid
#[derive(Debug)]
pub struct SummaryCard<'a> {
    pub id: RecipeId,
    pub title: &'a str,
    pub image: &'a str,
    pub used_label: String,
    /// Only present when the recipe needs more ingredients
    pub missed_label: Option<String>,
    pub used_preview: &'a [String],
    pub missed_preview: &'a [String],
}

impl<'a> From<&'a RecipeSummary> for SummaryCard<'a> {
    fn from(summary: &'a RecipeSummary) -> Self {
        let used_end = summary.used_ingredients.len().min(USED_PREVIEW);
        let missed_end = summary.missed_ingredients.len().min(MISSED_PREVIEW);

        SummaryCard {
            id: summary.id,
            title: &summary.title,
            image: &summary.image,
            used_label: format!(
                "{} of your ingredients used",
                summary.used_ingredient_count
            ),
            missed_label: (summary.missed_ingredient_count > 0)
                .then(|| format!("Need {} more", summary.missed_ingredient_count)),
            used_preview: &summary.used_ingredients[..used_end],
            missed_preview: &summary.missed_ingredients[..missed_end],
        }
    }
}

/// The detail screen always carries the recipe it shows
#[derive(Debug)]
pub struct DetailScreen<'a> {
    pub detail: &'a RecipeDetail,
}

impl<'a> DetailScreen<'a> {
    /// "amount unit name" for each ingredient
    pub fn ingredient_lines(&self, system: MeasureSystem) -> Vec<String> {
        self.detail
            .ingredients
            .iter()
            .map(|ingredient| format!("{} {}", ingredient.measure(system), ingredient.name))
            .collect()
    }

    /// Numbered steps, or the free-text instructions as plain text
    pub fn instruction_lines(&self) -> Vec<String> {
        match &self.detail.instructions {
            Instructions::Steps(steps) => steps
                .iter()
                .map(|s| format!("{}. {}", s.number, s.step))
                .collect(),
            Instructions::Markup(markup) if markup.is_empty() => Vec::new(),
            Instructions::Markup(markup) => vec![markup.to_plain_text()],
        }
    }

    pub fn summary_text(&self) -> String {
        self.detail.summary.to_plain_text()
    }
}
