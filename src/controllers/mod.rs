//! Request/response state machines for the search and detail phases.
//!
//! Each controller owns one [`Phase`] and hands out a [`Ticket`] when a
//! request starts. A response is applied only when its ticket is still the
//! current one, so late answers for abandoned requests are dropped.

pub mod detail;
pub mod search;

pub use detail::{DetailController, DetailRequest, DETAIL_FAILED_MESSAGE};
pub use search::{SearchController, SearchRequest, SEARCH_FAILED_MESSAGE};

/// State of one controller's request cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failed(String),
}

impl<T> Phase<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Phase::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that a request was started, matched against the controller's
/// current generation when the response arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Monotonic counter handing out tickets
#[derive(Debug, Default)]
pub(crate) struct Generation(u64);

impl Generation {
    /// Invalidates every outstanding ticket and returns a fresh one
    pub(crate) fn next(&mut self) -> Ticket {
        self.0 += 1;
        Ticket { generation: self.0 }
    }

    /// Invalidates every outstanding ticket
    pub(crate) fn bump(&mut self) {
        self.0 += 1;
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.0
    }
}
