use log::{debug, info, warn};

use super::{Generation, Phase, Ticket};
use crate::client::RecipeService;
use crate::model::{RecipeDetail, RecipeId};
use crate::FinderError;

/// Message shown when the detail request fails for any reason
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load recipe details. Please try again.";

/// An accepted detail fetch waiting for its response
#[derive(Debug, Clone, Copy)]
pub struct DetailRequest {
    pub ticket: Ticket,
    pub id: RecipeId,
}

/// Owns the recipe-detail request cycle
#[derive(Debug, Default)]
pub struct DetailController {
    phase: Phase<RecipeDetail>,
    pending: Option<RecipeId>,
    generation: Generation,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase<RecipeDetail> {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    /// The recipe being fetched, if any
    pub fn loading_id(&self) -> Option<RecipeId> {
        self.pending.filter(|_| self.phase.is_loading())
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.phase.data()
    }

    /// Starts fetching `id`. Rejected while another fetch is loading.
    pub fn begin(&mut self, id: RecipeId) -> Result<DetailRequest, FinderError> {
        if self.phase.is_loading() {
            return Err(FinderError::DetailInFlight);
        }

        info!("Loading details for recipe {}", id);
        self.phase = Phase::Loading;
        self.pending = Some(id);

        Ok(DetailRequest {
            ticket: self.generation.next(),
            id,
        })
    }

    /// Applies the response for `ticket`. Returns false when the response
    /// was stale and got discarded.
    pub fn finish(&mut self, ticket: Ticket, result: Result<RecipeDetail, FinderError>) -> bool {
        if !self.generation.is_current(ticket) || !self.phase.is_loading() {
            debug!("Discarding stale recipe detail response");
            return false;
        }

        self.pending = None;
        self.phase = match result {
            Ok(detail) => {
                debug!("Loaded recipe {} '{}'", detail.id, detail.title);
                Phase::Success(detail)
            }
            Err(e) => {
                warn!("Error fetching recipe details: {}", e);
                Phase::Failed(DETAIL_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Drops the held detail or error and abandons any in-flight fetch
    pub fn reset(&mut self) {
        self.generation.bump();
        self.pending = None;
        self.phase = Phase::Idle;
    }

    /// Runs a whole detail fetch against `service`.
    ///
    /// Request failures end up in [`phase`](Self::phase); only a rejected
    /// trigger is returned as an error.
    pub async fn load(
        &mut self,
        id: RecipeId,
        service: &dyn RecipeService,
    ) -> Result<(), FinderError> {
        let request = self.begin(id)?;
        let result = service.recipe_details(request.id).await;
        self.finish(request.ticket, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: RecipeId, title: &str) -> RecipeDetail {
        RecipeDetail {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_holds_detail() {
        let mut controller = DetailController::new();
        let request = controller.begin(42).unwrap();
        assert_eq!(controller.loading_id(), Some(42));

        assert!(controller.finish(request.ticket, Ok(detail(42, "X"))));
        assert_eq!(controller.detail().map(|d| d.title.as_str()), Some("X"));
        assert!(controller.loading_id().is_none());
    }

    #[test]
    fn test_failure_sets_message() {
        let mut controller = DetailController::new();
        let request = controller.begin(42).unwrap();
        let error = FinderError::Status {
            status: reqwest::StatusCode::NOT_FOUND,
        };
        controller.finish(request.ticket, Err(error));

        assert!(controller.detail().is_none());
        assert!(!controller.is_loading());
        assert_eq!(controller.error(), Some(DETAIL_FAILED_MESSAGE));
    }

    #[test]
    fn test_double_trigger_rejected() {
        let mut controller = DetailController::new();
        let first = controller.begin(1).unwrap();
        assert!(matches!(controller.begin(2), Err(FinderError::DetailInFlight)));

        controller.finish(first.ticket, Ok(detail(1, "One")));
        assert_eq!(controller.detail().unwrap().id, 1);
    }

    #[test]
    fn test_reset_discards_late_response() {
        let mut controller = DetailController::new();
        let request = controller.begin(5).unwrap();
        controller.reset();

        assert!(!controller.finish(request.ticket, Ok(detail(5, "Late"))));
        assert_eq!(controller.phase(), &Phase::Idle);
    }

    #[test]
    fn test_new_fetch_replaces_detail() {
        let mut controller = DetailController::new();
        let first = controller.begin(1).unwrap();
        controller.finish(first.ticket, Ok(detail(1, "One")));

        let second = controller.begin(2).unwrap();
        assert!(controller.detail().is_none());
        controller.finish(second.ticket, Ok(detail(2, "Two")));
        assert_eq!(controller.detail().unwrap().title, "Two");
    }
}
