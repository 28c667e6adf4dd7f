//! Item records and field normalization
//!
//! # Components
//!
//! - `ItemRecord`: one product row of the output dataset
//! - `ListingEntry`: an item as parsed from a listing page, before enrichment
//! - `Rating`: the closed set of star-rating tokens
//! - `normalize`: text-to-value coercion with explicit fallbacks

mod normalize;
mod rating;

pub use normalize::{
    coerce_price_field, coerce_rating_field, normalize_price, normalize_rating, Normalized,
};
pub use rating::Rating;

use serde::Serialize;

/// Output columns, in the order they are written
pub const DATASET_COLUMNS: [&str; 5] = ["title", "price", "availability", "rating", "category"];

/// One product entry of the dataset
///
/// Field order is the dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub title: String,
    pub price: f64,
    pub availability: String,
    pub rating: u8,
    pub category: String,

    /// The price text could not be parsed and `price` is the fallback
    #[serde(skip)]
    pub price_defaulted: bool,

    /// The rating token was missing or unknown and `rating` is the fallback
    #[serde(skip)]
    pub rating_defaulted: bool,
}

impl ItemRecord {
    /// Returns true if any field was filled with its fallback value
    pub fn has_defaulted_fields(&self) -> bool {
        self.price_defaulted || self.rating_defaulted
    }
}

/// An item extracted from a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub record: ItemRecord,

    /// Relative link to the item's detail page, as written in the listing
    pub detail_link: Option<String>,
}
