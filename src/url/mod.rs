//! URL handling module for Web-Wanderer
//!
//! This module turns arbitrary URL strings into canonical, comparable forms
//! and derives collision-resistant file names for stored pages.

mod normalize;
mod storage;

use std::fmt;

use url::Url;

// Re-export main functions
pub use normalize::{normalize, resolve};
pub use storage::storage_file_name;

/// A normalized URL: scheme, authority, and path with repeated slashes
/// collapsed and no trailing slash. The query is kept (two URLs differing
/// only by query are distinct pages), the fragment is dropped.
///
/// Equality on the inner string is page identity: two URLs are the same page
/// iff their `CanonicalUrl` values are equal. Instances are only produced by
/// [`normalize`], which is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub(crate) fn from_normalized(inner: String) -> Self {
        Self(inner)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme + authority prefix of this URL, i.e. the canonical
    /// form of `scheme://host[:port]` with no path. Used as the crawl scope
    /// after a seed redirect.
    pub fn authority_root(&self) -> CanonicalUrl {
        // Canonical URLs always reparse; fall back to self if they somehow don't.
        match Url::parse(&self.0) {
            Ok(parsed) => {
                let mut root = format!(
                    "{}://{}",
                    parsed.scheme(),
                    parsed.host_str().unwrap_or_default()
                );
                if let Some(port) = parsed.port() {
                    root.push(':');
                    root.push_str(&port.to_string());
                }
                CanonicalUrl(root)
            }
            Err(_) => self.clone(),
        }
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_root_strips_path_and_query() {
        let url = normalize("http://example.test/a/b?x=1").unwrap();
        assert_eq!(url.authority_root().as_str(), "http://example.test");
    }

    #[test]
    fn test_authority_root_keeps_port() {
        let url = normalize("http://example.test:8080/a").unwrap();
        assert_eq!(url.authority_root().as_str(), "http://example.test:8080");
    }

    #[test]
    fn test_authority_root_of_root_is_identity() {
        let url = normalize("https://example.test").unwrap();
        assert_eq!(url.authority_root(), url);
    }
}
