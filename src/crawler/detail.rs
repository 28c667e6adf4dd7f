//! Detail page category resolution
//!
//! Each listing entry links to a detail page whose breadcrumb trail names the
//! item's category (`Home > Books > Poetry > Title`). Resolution costs one
//! extra request per item and is best-effort: every failure yields an empty
//! category.

use crate::crawler::fetch_page;
use crate::url::resolve_link;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

const BREADCRUMB_SELECTOR: &str = "ul.breadcrumb li a";

/// Resolves the category of one item
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `page_url` - URL of the listing page the link was found on
/// * `relative_link` - The item's detail link, as written in the listing
///
/// # Returns
///
/// The category text, or an empty string if the link cannot be resolved,
/// the detail page cannot be fetched, or its breadcrumb is too short.
pub async fn resolve_category(client: &Client, page_url: &Url, relative_link: &str) -> String {
    let Some(detail_url) = resolve_link(page_url, relative_link) else {
        tracing::debug!("Unresolvable detail link {:?} on {}", relative_link, page_url);
        return String::new();
    };

    match fetch_page(client, &detail_url).await {
        Ok(page) => category_from_breadcrumb(&page.body),
        Err(e) => {
            tracing::debug!("Category lookup failed: {}", e);
            String::new()
        }
    }
}

/// Derives the category from a detail page's breadcrumb links
///
/// | Breadcrumb links | Category |
/// |------------------|----------|
/// | 3 or more | text of the last link |
/// | 2 | text of the second link |
/// | 0 or 1 | empty |
pub fn category_from_breadcrumb(html: &str) -> String {
    let Ok(selector) = Selector::parse(BREADCRUMB_SELECTOR) else {
        return String::new();
    };

    let document = Html::parse_document(html);
    let segments: Vec<String> = document
        .select(&selector)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .collect();

    let category = match segments.len() {
        n if n >= 3 => segments.last(),
        2 => segments.get(1),
        _ => None,
    };

    category.cloned().unwrap_or_default()
}
