use log::{debug, info, warn};

use super::{Generation, Phase, Ticket};
use crate::client::{RecipeService, SearchQuery};
use crate::ingredients::IngredientCollection;
use crate::model::RecipeSummary;
use crate::FinderError;

/// Message shown when the search request fails for any reason
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch recipes. Please try again.";

/// An accepted search waiting for its response
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub query: SearchQuery,
}

/// Owns the search-by-ingredients request cycle
#[derive(Debug, Default)]
pub struct SearchController {
    phase: Phase<Vec<RecipeSummary>>,
    generation: Generation,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase<Vec<RecipeSummary>> {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    /// Summaries from the last successful search, empty otherwise
    pub fn summaries(&self) -> &[RecipeSummary] {
        self.phase.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Starts a search for `ingredients`.
    ///
    /// An empty collection fails the phase with the validation message and
    /// returns [`FinderError::NoIngredients`] without producing a request.
    /// A search that is already loading is rejected and left untouched.
    pub fn begin(
        &mut self,
        ingredients: &IngredientCollection,
    ) -> Result<SearchRequest, FinderError> {
        if self.phase.is_loading() {
            return Err(FinderError::SearchInFlight);
        }

        if ingredients.is_empty() {
            let error = FinderError::NoIngredients;
            self.phase = Phase::Failed(error.to_string());
            return Err(error);
        }

        let query = SearchQuery::new(ingredients.joined());
        info!("Searching recipes for '{}'", query.ingredients);
        self.phase = Phase::Loading;

        Ok(SearchRequest {
            ticket: self.generation.next(),
            query,
        })
    }

    /// Applies the response for `ticket`. Returns false when the response
    /// was stale and got discarded.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<RecipeSummary>, FinderError>,
    ) -> bool {
        if !self.generation.is_current(ticket) || !self.phase.is_loading() {
            debug!("Discarding stale search response");
            return false;
        }

        self.phase = match result {
            Ok(summaries) => {
                debug!("Search succeeded with {} recipes", summaries.len());
                Phase::Success(summaries)
            }
            Err(e) => {
                warn!("Error fetching recipes: {}", e);
                Phase::Failed(SEARCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Runs a whole search against `service`.
    ///
    /// Request failures end up in [`phase`](Self::phase); only rejected
    /// submissions are returned as errors.
    pub async fn search(
        &mut self,
        ingredients: &IngredientCollection,
        service: &dyn RecipeService,
    ) -> Result<(), FinderError> {
        let request = self.begin(ingredients)?;
        let result = service.search_by_ingredients(&request.query).await;
        self.finish(request.ticket, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64) -> RecipeSummary {
        RecipeSummary {
            id,
            title: format!("Recipe {}", id),
            image: String::new(),
            used_ingredient_count: 1,
            missed_ingredient_count: 0,
            used_ingredients: vec![],
            missed_ingredients: vec![],
        }
    }

    fn collection(names: &[&str]) -> IngredientCollection {
        let mut collection = IngredientCollection::new();
        for name in names {
            collection.add(name);
        }
        collection
    }

    #[test]
    fn test_empty_collection_fails_validation() {
        let mut controller = SearchController::new();
        let result = controller.begin(&IngredientCollection::new());

        assert!(matches!(result, Err(FinderError::NoIngredients)));
        assert!(!controller.is_loading());
        assert_eq!(controller.error(), Some("Please add at least one ingredient"));
    }

    #[test]
    fn test_begin_builds_joined_query() {
        let mut controller = SearchController::new();
        let request = controller.begin(&collection(&["chicken", "rice"])).unwrap();

        assert_eq!(request.query.ingredients, "chicken,rice");
        assert!(controller.is_loading());
        assert!(controller.error().is_none());
    }

    #[test]
    fn test_success_replaces_previous_results() {
        let mut controller = SearchController::new();
        let ingredients = collection(&["egg"]);

        let first = controller.begin(&ingredients).unwrap();
        assert!(controller.finish(first.ticket, Ok(vec![summary(1), summary(2), summary(3)])));
        assert_eq!(controller.summaries().len(), 3);

        let second = controller.begin(&ingredients).unwrap();
        // Old results are gone while loading
        assert!(controller.summaries().is_empty());
        assert!(controller.finish(second.ticket, Ok(vec![summary(9)])));
        let ids: Vec<u64> = controller.summaries().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn test_failure_clears_results() {
        let mut controller = SearchController::new();
        let ingredients = collection(&["egg"]);

        let first = controller.begin(&ingredients).unwrap();
        controller.finish(first.ticket, Ok(vec![summary(1)]));

        let second = controller.begin(&ingredients).unwrap();
        let error = FinderError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(controller.finish(second.ticket, Err(error)));

        assert!(controller.summaries().is_empty());
        assert!(!controller.is_loading());
        assert_eq!(controller.error(), Some(SEARCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_empty_success_is_not_an_error() {
        let mut controller = SearchController::new();
        let request = controller.begin(&collection(&["durian"])).unwrap();
        controller.finish(request.ticket, Ok(vec![]));

        assert_eq!(controller.phase(), &Phase::Success(vec![]));
        assert!(controller.error().is_none());
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_rejects_second_search_while_loading() {
        let mut controller = SearchController::new();
        let ingredients = collection(&["egg"]);
        let request = controller.begin(&ingredients).unwrap();

        assert!(matches!(
            controller.begin(&ingredients),
            Err(FinderError::SearchInFlight)
        ));
        // The original request is still the live one
        assert!(controller.finish(request.ticket, Ok(vec![summary(1)])));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut controller = SearchController::new();
        let ingredients = collection(&["egg"]);

        let first = controller.begin(&ingredients).unwrap();
        controller.finish(first.ticket, Ok(vec![summary(1)]));
        let second = controller.begin(&ingredients).unwrap();

        assert!(!controller.finish(first.ticket, Ok(vec![summary(5)])));
        assert!(controller.is_loading());

        controller.finish(second.ticket, Ok(vec![summary(2)]));
        assert_eq!(controller.summaries()[0].id, 2);

        // A duplicate completion for a finished request changes nothing
        assert!(!controller.finish(second.ticket, Ok(vec![])));
        assert_eq!(controller.summaries().len(), 1);
    }
}
