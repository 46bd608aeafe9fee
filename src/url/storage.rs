use url::Url;

use crate::url::CanonicalUrl;

/// Placeholder name used when a URL maps to an empty file name (e.g. the
/// site root with `include_authority = false`).
const EMPTY_NAME: &str = "index";

/// Maps a canonical URL to a filesystem-safe relative name.
///
/// Path separators become underscores, leading/trailing underscores are
/// trimmed, and an empty result becomes `"index"`. The query string is kept
/// in the name (with its `?` flattened to an underscore) so query variants of
/// a page land in different files. Collisions between distinct URLs are
/// possible in principle and resolve as last-write-wins.
///
/// With `include_authority` the host (and port) prefixes the name; this is
/// used to name the per-crawl output directory after the seed's authority.
///
/// # Examples
///
/// ```
/// use web_wanderer::url::{normalize, storage_file_name};
///
/// let url = normalize("http://example.test/docs/intro/").unwrap();
/// assert_eq!(storage_file_name(&url, false), "docs_intro");
/// assert_eq!(storage_file_name(&url, true), "example.test_docs_intro");
/// ```
pub fn storage_file_name(url: &CanonicalUrl, include_authority: bool) -> String {
    let parsed = match Url::parse(url.as_str()) {
        Ok(parsed) => parsed,
        Err(_) => return EMPTY_NAME.to_string(),
    };

    let mut name = String::new();
    if include_authority {
        name.push_str(parsed.host_str().unwrap_or_default());
        if let Some(port) = parsed.port() {
            name.push(':');
            name.push_str(&port.to_string());
        }
    }
    name.push_str(parsed.path());
    if let Some(query) = parsed.query() {
        name.push('?');
        name.push_str(query);
    }

    let flattened: String = name
        .chars()
        .map(|c| if c == '/' || c == '?' { '_' } else { c })
        .collect();
    let trimmed = flattened.trim_matches('_');

    if trimmed.is_empty() {
        EMPTY_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
