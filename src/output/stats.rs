//! Statistics over a committed dataset
//!
//! This module summarizes a loaded dataset for the `--stats` mode of the
//! binary.

use crate::record::{ItemRecord, Rating};
use std::collections::BTreeMap;

/// Dataset statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatistics {
    /// Number of items in the dataset
    pub total_items: usize,

    /// Mean price, rounded to 2 decimals (0.0 for an empty dataset)
    pub mean_price: f64,

    /// Lowest price (0.0 for an empty dataset)
    pub min_price: f64,

    /// Highest price (0.0 for an empty dataset)
    pub max_price: f64,

    /// Distinct non-empty categories, sorted
    pub categories: Vec<String>,

    /// Count of items per rating value; every value 0..=5 is present
    pub items_by_rating: BTreeMap<u8, usize>,

    /// Items with no resolved category
    pub uncategorized: usize,
}

impl DatasetStatistics {
    /// Computes statistics for `items`
    pub fn from_items(items: &[ItemRecord]) -> Self {
        let mut items_by_rating: BTreeMap<u8, usize> =
            Rating::all().iter().map(|r| (r.value(), 0)).collect();
        for item in items {
            *items_by_rating.entry(item.rating).or_insert(0) += 1;
        }

        let mut categories: Vec<String> = items
            .iter()
            .filter(|i| !i.category.is_empty())
            .map(|i| i.category.clone())
            .collect();
        categories.sort();
        categories.dedup();

        let uncategorized = items.iter().filter(|i| i.category.is_empty()).count();

        if items.is_empty() {
            return Self {
                total_items: 0,
                mean_price: 0.0,
                min_price: 0.0,
                max_price: 0.0,
                categories,
                items_by_rating,
                uncategorized,
            };
        }

        let prices = items.iter().map(|i| i.price);
        let total: f64 = prices.clone().sum();
        let min_price = prices.clone().fold(f64::INFINITY, f64::min);
        let max_price = prices.fold(f64::NEG_INFINITY, f64::max);
        let mean = total / items.len() as f64;

        Self {
            total_items: items.len(),
            mean_price: (mean * 100.0).round() / 100.0,
            min_price,
            max_price,
            categories,
            items_by_rating,
            uncategorized,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &DatasetStatistics) {
    println!("=== Dataset Statistics ===\n");

    println!("Overview:");
    println!("  Total items: {}", stats.total_items);
    println!("  Categories: {}", stats.categories.len());
    println!("  Uncategorized items: {}", stats.uncategorized);
    println!();

    println!("Prices:");
    println!("  Mean: {:.2}", stats.mean_price);
    println!("  Min: {:.2}", stats.min_price);
    println!("  Max: {:.2}", stats.max_price);
    println!();

    println!("Items by Rating:");
    for (rating, count) in stats.items_by_rating.iter().rev() {
        let percentage = if stats.total_items > 0 {
            (*count as f64 / stats.total_items as f64) * 100.0
        } else {
            0.0
        };
        println!("  {} stars: {} ({:.1}%)", rating, count, percentage);
    }
    println!();

    if !stats.categories.is_empty() {
        println!("Categories ({}):", stats.categories.len());
        for category in &stats.categories {
            println!("  - {}", category);
        }
    }
}
