/// URL lifecycle state definitions for tracking crawl progress
use std::fmt;

/// The lifecycle state of a URL known to the frontier.
///
/// A URL that is not in the frontier's state map at all is *unseen*. Legal
/// transitions are unseen -> `Queued` (discovery), `Queued` -> `InFlight`
/// (dispatch), and `InFlight` -> `Succeeded` | `Failed` (completion). A URL
/// in any of these states is never queued again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Discovered and waiting in the queue for a worker
    Queued,

    /// Handed to a worker; a fetch is in progress
    InFlight,

    /// Fetched and processed successfully
    Succeeded,

    /// Fetch or persistence failed; never retried
    Failed,
}

impl UrlState {
    /// Returns true if this is a terminal state (no further processing).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns true if the URL still counts as pending work.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::InFlight)
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "queued",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Terminal outcome reported by the worker that completed a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl From<Outcome> for UrlState {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => UrlState::Succeeded,
            Outcome::Failed => UrlState::Failed,
        }
    }
}
