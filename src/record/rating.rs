//! Star-rating definitions for catalog items
//!
//! Listings encode a 0-5 rating as a word-form class marker (`star-rating Four`).
//! The token set is closed; anything outside it is reported as `None` by
//! [`Rating::from_token`] and left to the normalizer to default.

use std::fmt;

/// A catalog star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rating {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    /// Maps a word token to a rating
    ///
    /// Matching is exact: `"Four"` is a rating, `"four"` is not.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Zero" => Some(Self::Zero),
            "One" => Some(Self::One),
            "Two" => Some(Self::Two),
            "Three" => Some(Self::Three),
            "Four" => Some(Self::Four),
            "Five" => Some(Self::Five),
            _ => None,
        }
    }

    /// Maps an integer back to a rating, if it lies in `0..=5`
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }

    /// The numeric value of the rating
    pub fn value(&self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// The word token used in listing markup
    pub fn token(&self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }

    /// Returns all ratings in ascending order
    pub fn all() -> [Self; 6] {
        [
            Self::Zero,
            Self::One,
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
        ]
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
