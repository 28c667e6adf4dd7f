//! Listing page parser
//!
//! This module extracts product entries from one listing page:
//! - title (from the title attribute of the heading link, else its text)
//! - price (currency-prefixed text, normalized to a decimal)
//! - availability (verbatim text)
//! - rating (word token from the `star-rating` class list)
//! - the relative detail-page link, kept for category resolution
//!
//! Items are extracted independently. A product whose markup lacks a required
//! element is logged and skipped; the rest of the page is still parsed.

use crate::record::{normalize_price, normalize_rating, ItemRecord, ListingEntry};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

const PRODUCT_SELECTOR: &str = "article.product_pod";
const TITLE_LINK_SELECTOR: &str = "h3 a";
const PRICE_SELECTOR: &str = "p.price_color";
const AVAILABILITY_SELECTOR: &str = "p.instock.availability";
const RATING_SELECTOR: &str = "p.star-rating";
const RATING_MARKER_CLASS: &str = "star-rating";

/// Per-item extraction failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemParseError {
    #[error("missing {0} element")]
    MissingElement(&'static str),

    #[error("invalid selector: {0}")]
    Selector(&'static str),
}

/// Compiled selectors for one listing layout
struct ListingSelectors {
    product: Selector,
    title_link: Selector,
    price: Selector,
    availability: Selector,
    rating: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ItemParseError> {
        Ok(Self {
            product: compile(PRODUCT_SELECTOR)?,
            title_link: compile(TITLE_LINK_SELECTOR)?,
            price: compile(PRICE_SELECTOR)?,
            availability: compile(AVAILABILITY_SELECTOR)?,
            rating: compile(RATING_SELECTOR)?,
        })
    }
}

fn compile(css: &'static str) -> Result<Selector, ItemParseError> {
    Selector::parse(css).map_err(|_| ItemParseError::Selector(css))
}

/// Parses a listing page into entries, in document order
///
/// # Example
///
/// ```
/// use catalog_crawler::crawler::parse_listing;
///
/// let html = r#"
///     <article class="product_pod">
///         <h3><a href="book_1/index.html" title="Example">Exam...</a></h3>
///         <p class="star-rating Four"></p>
///         <p class="price_color">£10.00</p>
///         <p class="instock availability">In stock</p>
///     </article>
/// "#;
///
/// let entries = parse_listing(html);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].record.title, "Example");
/// assert_eq!(entries[0].record.price, 10.0);
/// assert_eq!(entries[0].record.rating, 4);
/// assert_eq!(entries[0].detail_link.as_deref(), Some("book_1/index.html"));
/// ```
pub fn parse_listing(html: &str) -> Vec<ListingEntry> {
    let selectors = match ListingSelectors::new() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Listing selectors failed to compile: {}", e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for (index, product) in document.select(&selectors.product).enumerate() {
        match extract_entry(product, &selectors) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!("Skipping product #{} on listing page: {}", index + 1, e),
        }
    }

    entries
}

/// Extracts one product container
fn extract_entry(
    product: ElementRef<'_>,
    selectors: &ListingSelectors,
) -> Result<ListingEntry, ItemParseError> {
    let link = product
        .select(&selectors.title_link)
        .next()
        .ok_or(ItemParseError::MissingElement("title link"))?;

    // Listing text is truncated ("A Light in the ..."); the attribute has the full title
    let title = link
        .value()
        .attr("title")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| element_text(link));

    let raw_price = product
        .select(&selectors.price)
        .next()
        .map(element_text)
        .ok_or(ItemParseError::MissingElement("price"))?;

    let availability = product
        .select(&selectors.availability)
        .next()
        .map(element_text)
        .ok_or(ItemParseError::MissingElement("availability"))?;

    let price = normalize_price(&raw_price);
    if price.defaulted {
        tracing::warn!("Invalid price format for '{}': {:?}", title, raw_price);
    }

    let rating_token = product
        .select(&selectors.rating)
        .next()
        .and_then(|element| element.value().attr("class"))
        .and_then(|classes| {
            classes
                .split_whitespace()
                .find(|class| *class != RATING_MARKER_CLASS)
        });
    let rating = normalize_rating(rating_token);
    if rating.defaulted {
        tracing::debug!("No known rating token for '{}': {:?}", title, rating_token);
    }

    let detail_link = link
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string);

    Ok(ListingEntry {
        record: ItemRecord {
            title,
            price: price.value,
            availability,
            rating: rating.value,
            category: String::new(),
            price_defaulted: price.defaulted,
            rating_defaulted: rating.defaulted,
        },
        detail_link,
    })
}

/// Collects an element's text content, trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
