use log::debug;

use crate::client::RecipeService;
use crate::controllers::{DetailController, DetailRequest, SearchController, SearchRequest, Ticket};
use crate::ingredients::{Ingredient, IngredientCollection};
use crate::model::{RecipeDetail, RecipeId, RecipeSummary};
use crate::view::{DetailScreen, Screen, SearchResults, SearchScreen};
use crate::FinderError;

/// Everything one user sees and does in a single run.
///
/// Holds the ingredient list and both controllers, routes user actions to
/// the right controller and derives the current [`Screen`]. The detail
/// screen shows exactly when a recipe detail is held.
#[derive(Debug, Default)]
pub struct Session {
    ingredients: IngredientCollection,
    search: SearchController,
    detail: DetailController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredients(&self) -> &IngredientCollection {
        &self.ingredients
    }

    pub fn add_ingredient(&mut self, text: &str) -> bool {
        self.ingredients.add(text)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.ingredients.set_input(text);
    }

    pub fn submit_input(&mut self) -> bool {
        self.ingredients.submit_input()
    }

    /// # Panics
    ///
    /// Panics if `index` is not a listed ingredient.
    pub fn remove_ingredient(&mut self, index: usize) -> Ingredient {
        self.ingredients.remove(index)
    }

    pub fn search_controller(&self) -> &SearchController {
        &self.search
    }

    pub fn detail_controller(&self) -> &DetailController {
        &self.detail
    }

    pub fn summaries(&self) -> &[RecipeSummary] {
        self.search.summaries()
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.detail()
    }

    pub fn is_loading(&self) -> bool {
        self.search.is_loading() || self.detail.is_loading()
    }

    /// The message currently shown to the user, if any
    pub fn error(&self) -> Option<&str> {
        self.detail.error().or_else(|| self.search.error())
    }

    /// Starts a search with the current ingredients.
    ///
    /// Any held detail, detail error or outstanding detail fetch is dropped
    /// unless the search is rejected for already being in flight.
    pub fn begin_search(&mut self) -> Result<SearchRequest, FinderError> {
        self.leave_detail_for_search();
        self.search.begin(&self.ingredients)
    }

    fn leave_detail_for_search(&mut self) {
        if !self.search.is_loading() {
            self.detail.reset();
        }
    }

    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<RecipeSummary>, FinderError>,
    ) -> bool {
        self.search.finish(ticket, result)
    }

    /// Runs a full search. Request failures are reported through
    /// [`error`](Self::error); rejected submissions are returned.
    pub async fn search(&mut self, service: &dyn RecipeService) -> Result<(), FinderError> {
        self.leave_detail_for_search();
        self.search.search(&self.ingredients, service).await
    }

    /// Starts loading the recipe with `id`. The screen only changes once
    /// the details arrive.
    pub fn begin_select(&mut self, id: RecipeId) -> Result<DetailRequest, FinderError> {
        self.detail.begin(id)
    }

    pub fn finish_select(
        &mut self,
        ticket: Ticket,
        result: Result<RecipeDetail, FinderError>,
    ) -> bool {
        self.detail.finish(ticket, result)
    }

    /// Loads the details for the selected summary and switches to the
    /// detail screen on success. A failure keeps the search screen and sets
    /// the error.
    pub async fn select_recipe(
        &mut self,
        id: RecipeId,
        service: &dyn RecipeService,
    ) -> Result<(), FinderError> {
        self.detail.load(id, service).await
    }

    /// Returns to the search screen, keeping the search results
    pub fn go_back(&mut self) {
        debug!("Back to search results");
        self.detail.reset();
    }

    pub fn screen(&self) -> Screen<'_> {
        if let Some(detail) = self.detail.detail() {
            return Screen::Detail(DetailScreen { detail });
        }

        Screen::Search(SearchScreen {
            ingredients: self.ingredients.as_slice(),
            can_add: self.ingredients.can_add(),
            searching: self.search.is_loading(),
            loading_recipe: self.detail.loading_id(),
            error: self.error(),
            results: SearchResults::project(self.search.phase(), !self.ingredients.is_empty()),
        })
    }
}
