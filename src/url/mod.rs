//! URL handling module for Catalog-Crawler
//!
//! This module turns the configured base URL into the URLs the crawler visits:
//! the robots.txt location, the numbered listing pages, and detail pages linked
//! from listings.

use crate::{UrlError, UrlResult};
use url::Url;

/// Placeholder substituted with the page number in a listing path
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Parses and normalizes the catalog base URL
///
/// The result always uses http or https, carries no query or fragment, and
/// ends with a `/` so that relative listing paths resolve beneath it rather
/// than replacing its last segment.
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::normalize_base_url;
///
/// let base = normalize_base_url("https://books.toscrape.com").unwrap();
/// assert_eq!(base.as_str(), "https://books.toscrape.com/");
///
/// let nested = normalize_base_url("https://example.com/shop?x=1#top").unwrap();
/// assert_eq!(nested.as_str(), "https://example.com/shop/");
/// ```
pub fn normalize_base_url(raw: &str) -> UrlResult<Url> {
    let mut url = Url::parse(raw.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Returns the robots.txt URL for the site's origin
pub fn robots_url(base: &Url) -> UrlResult<Url> {
    Ok(base.join("/robots.txt")?)
}

/// Builds the URL of listing page `page` from a path pattern
///
/// # Arguments
///
/// * `base` - The normalized base URL
/// * `pattern` - Listing path relative to the base, containing `{page}`
/// * `page` - The 1-based page index
pub fn listing_url(base: &Url, pattern: &str, page: u32) -> UrlResult<Url> {
    if !pattern.contains(PAGE_PLACEHOLDER) {
        return Err(UrlError::MissingPagePlaceholder(pattern.to_string()));
    }

    let path = pattern.replace(PAGE_PLACEHOLDER, &page.to_string());
    Ok(base.join(&path)?)
}

/// Resolves a link href found on `page_url` to an absolute URL
///
/// Returns None if the link should not be followed:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to resolve, or resolve to a non-HTTP(S) URL
pub fn resolve_link(page_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = page_url.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
