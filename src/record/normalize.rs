//! Coercion of raw extracted text into typed field values
//!
//! Every normalizer is total: unparseable input yields the field's fallback
//! (`0.0` for prices, `0` for ratings) with `defaulted` set, so callers can log
//! or count the fallback without changing the output schema.

use crate::record::Rating;

/// A normalized value together with whether it fell back to the default
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Normalized<T> {
    fn parsed(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Parses listing price text such as `£51.77`
///
/// Leading currency symbols (any run of non-ASCII-alphanumeric characters
/// other than a sign or decimal point) are stripped before parsing. Negative,
/// non-finite or unparseable prices become `0.0`.
///
/// # Examples
///
/// ```
/// use catalog_crawler::record::normalize_price;
///
/// assert_eq!(normalize_price("£10.00").value, 10.0);
/// assert!(normalize_price("call us").defaulted);
/// ```
pub fn normalize_price(raw: &str) -> Normalized<f64> {
    let digits = raw
        .trim()
        .trim_start_matches(|c: char| {
            !(c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '+')
        })
        .trim();

    match digits.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Normalized::parsed(price),
        _ => Normalized::fallback(0.0),
    }
}

/// Maps an optional rating class token to its value
///
/// A missing or unrecognized token yields `0`.
pub fn normalize_rating(token: Option<&str>) -> Normalized<u8> {
    match token.and_then(Rating::from_token) {
        Some(rating) => Normalized::parsed(rating.value()),
        None => Normalized::fallback(0),
    }
}

/// Re-reads a price column written to the dataset
pub fn coerce_price_field(field: &str) -> Normalized<f64> {
    normalize_price(field)
}

/// Re-reads a rating column written to the dataset
///
/// Accepts the integer form (`"4"`) and, leniently, the word token (`"Four"`).
/// Values outside `0..=5` fall back to `0`.
pub fn coerce_rating_field(field: &str) -> Normalized<u8> {
    let field = field.trim();
    let rating = field
        .parse::<u8>()
        .ok()
        .and_then(Rating::from_value)
        .or_else(|| Rating::from_token(field));

    match rating {
        Some(rating) => Normalized::parsed(rating.value()),
        None => Normalized::fallback(0),
    }
}
