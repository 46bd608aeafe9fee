use url::Url;

use crate::url::CanonicalUrl;
use crate::UrlError;

/// Normalizes a URL string into its canonical form.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative (no scheme)
/// 2. Reject URLs without an authority (host)
/// 3. Collapse repeated path separators to one
/// 4. Strip a single trailing separator
/// 5. Keep the query string verbatim (query variants are distinct pages)
/// 6. Drop the fragment
///
/// No percent-decoding is performed. Normalization is idempotent:
/// `normalize(normalize(u)) == normalize(u)` for every valid `u`.
///
/// # Examples
///
/// ```
/// use web_wanderer::url::normalize;
///
/// let url = normalize("http://example.test//a/b/").unwrap();
/// assert_eq!(url.as_str(), "http://example.test/a/b");
/// ```
pub fn normalize(raw: &str) -> Result<CanonicalUrl, UrlError> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingAuthority);
    }

    let mut canonical = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().unwrap_or_default()
    );
    if let Some(port) = url.port() {
        canonical.push(':');
        canonical.push_str(&port.to_string());
    }

    canonical.push_str(&collapse_path(url.path()));

    if let Some(query) = url.query() {
        canonical.push('?');
        canonical.push_str(query);
    }

    Ok(CanonicalUrl::from_normalized(canonical))
}

/// Collapses repeated slashes and removes the trailing one. The root path
/// collapses to the empty string, so `http://h/` and `http://h` are the same
/// page.
fn collapse_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return String::new();
    }
    format!("/{}", segments.join("/"))
}

/// Resolves a possibly-relative reference against a canonical base URL per
/// standard URL-resolution rules (scheme-relative, path-relative, and
/// fragment-only references are all handled). The result is an absolute URL
/// string that still needs to go through [`normalize`].
pub fn resolve(href: &str, base: &CanonicalUrl) -> Result<String, UrlError> {
    let base = Url::parse(base.as_str()).map_err(|e| UrlError::Parse(e.to_string()))?;
    let joined = base.join(href).map_err(|e| UrlError::Parse(e.to_string()))?;
    Ok(joined.to_string())
}
