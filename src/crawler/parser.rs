//! HTML parsing for link discovery
//!
//! Extracts candidate hrefs from `<a href="...">` tags. Hrefs are returned
//! raw; resolution against the page's final URL and normalization happen in
//! the coordinator, which knows which URL the page was actually served from.

use scraper::{Html, Selector};

/// Extracts link hrefs from an HTML document.
///
/// Skips hrefs that can never lead to a crawlable page:
/// - empty or whitespace-only hrefs
/// - `javascript:`, `mailto:`, `tel:`, and `data:` schemes
/// - fragment-only anchors (`#section`)
/// - `<a href="..." download>` links
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(href) = filter_href(href) {
                    hrefs.push(href.to_string());
                }
            }
        }
    }

    hrefs
}

fn filter_href(href: &str) -> Option<&str> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same-page anchors
    if href.starts_with('#') {
        return None;
    }

    Some(href)
}
