//! Frontier & dedup registry for Web-Wanderer
//!
//! The frontier is the single authority over per-URL lifecycle state and the
//! pending-work queue. No other component mutates crawl state directly; all
//! access goes through the atomic operations on [`Frontier`].

mod registry;
mod url_state;

pub use registry::Frontier;
pub use url_state::{Outcome, UrlState};
