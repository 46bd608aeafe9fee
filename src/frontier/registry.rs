use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use tokio::sync::Notify;

use crate::frontier::{Outcome, UrlState};
use crate::url::CanonicalUrl;
use crate::FrontierError;

/// The frontier: FIFO queue of URLs awaiting fetch plus the state map that
/// deduplicates discoveries.
///
/// All operations take the single internal lock, so check-and-set sequences
/// like [`Frontier::offer`] are linearizable: two workers discovering the
/// same new link concurrently result in exactly one of the offers succeeding.
///
/// Workers that find the queue momentarily empty park on
/// [`Frontier::wait_for_change`] rather than spinning; offers and completions
/// wake them.
pub struct Frontier {
    inner: Mutex<FrontierInner>,
    changed: Notify,
}

#[derive(Default)]
struct FrontierInner {
    queue: VecDeque<CanonicalUrl>,
    states: HashMap<CanonicalUrl, UrlState>,
    in_flight: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FrontierInner::default()),
            changed: Notify::new(),
        }
    }

    /// Registers `url` as queued and enqueues it for dispatch, but only if it
    /// has never been seen before. Returns whether the URL was newly queued.
    pub fn offer(&self, url: CanonicalUrl) -> bool {
        let newly_queued = {
            let mut inner = self.inner.lock().unwrap();
            if inner.states.contains_key(&url) {
                false
            } else {
                inner.states.insert(url.clone(), UrlState::Queued);
                inner.queue.push_back(url);
                true
            }
        };
        if newly_queued {
            self.changed.notify_waiters();
        }
        newly_queued
    }

    /// Removes and returns one queued URL in FIFO order, transitioning it to
    /// `InFlight`. `None` means the queue is momentarily empty, which does
    /// not imply the crawl is done: other URLs may be in flight and about to
    /// enqueue more. Consult [`Frontier::pending_work`].
    pub fn take(&self) -> Option<CanonicalUrl> {
        let mut inner = self.inner.lock().unwrap();
        let url = inner.queue.pop_front()?;
        inner.states.insert(url.clone(), UrlState::InFlight);
        inner.in_flight += 1;
        Some(url)
    }

    /// Registers an unseen URL directly as `InFlight` without queueing it.
    /// Returns whether the claim succeeded (false if the URL was already
    /// known in any state). Used for redirect targets that are processed as
    /// part of the fetch that discovered them, so they are never fetched a
    /// second time. A successful claim must later be resolved with
    /// [`Frontier::complete`].
    pub fn claim(&self, url: CanonicalUrl) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.states.contains_key(&url) {
            return false;
        }
        inner.states.insert(url, UrlState::InFlight);
        inner.in_flight += 1;
        true
    }

    /// Transitions `url` from `InFlight` to the given terminal state. Fails
    /// if `url` was not `InFlight`; that is a programming error and aborts
    /// the crawl.
    pub fn complete(&self, url: &CanonicalUrl, outcome: Outcome) -> Result<(), FrontierError> {
        {
            let mut inner = self.inner.lock().unwrap();
            let current = inner.states.get(url).copied();
            if current != Some(UrlState::InFlight) {
                return Err(FrontierError::InvalidTransition {
                    url: url.to_string(),
                    from: current,
                    to: outcome.into(),
                });
            }
            inner.states.insert(url.clone(), outcome.into());
            inner.in_flight -= 1;
        }
        self.changed.notify_waiters();
        Ok(())
    }

    /// True iff the queue is non-empty or at least one URL is in flight.
    /// This is the authoritative completion predicate: the crawl terminates
    /// once this becomes permanently false.
    pub fn pending_work(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        !inner.queue.is_empty() || inner.in_flight > 0
    }

    /// Parks until the frontier changes in a way an idle worker cares about:
    /// new work was queued, or the in-flight count dropped (possibly to
    /// zero, signalling completion). Never spins.
    pub async fn wait_for_change(&self) {
        let notified = self.changed.notified();
        tokio::pin!(notified);
        // Register interest before re-checking, so a notification between
        // the caller's check and this await is not lost.
        notified.as_mut().enable();
        {
            let inner = self.inner.lock().unwrap();
            if !inner.queue.is_empty() || inner.in_flight == 0 {
                return;
            }
        }
        notified.await;
    }

    /// Returns the recorded state of a URL, or `None` if it is unseen.
    pub fn state_of(&self, url: &CanonicalUrl) -> Option<UrlState> {
        self.inner.lock().unwrap().states.get(url).copied()
    }

    /// Number of URLs currently waiting in the queue.
    pub fn queued_len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Number of URLs currently being fetched.
    pub fn in_flight_len(&self) -> usize {
        self.inner.lock().unwrap().in_flight
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
