//! Crawl phase definitions for tracking a run's progress
//!
//! A run moves through these phases once per listing page, then writes the
//! dataset exactly once.

use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Nothing fetched yet; the robots policy is loaded from here
    Idle,

    /// A listing page request is in flight
    Fetching { page: u32 },

    /// A fetched listing page is being parsed into items
    Parsing { page: u32 },

    /// An item's detail page is being fetched for its category
    Enriching { page: u32, item: usize },

    /// The page's items have been appended to the session
    Accumulated { page: u32 },

    /// The dataset is being committed
    Writing,

    /// The run is over
    Done,
}

impl CrawlPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The listing page this phase belongs to, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Fetching { page }
            | Self::Parsing { page }
            | Self::Enriching { page, .. }
            | Self::Accumulated { page } => Some(*page),
            Self::Idle | Self::Writing | Self::Done => None,
        }
    }

    /// Checks whether moving from `self` to `next` is legal
    ///
    /// Pages and items only move forward: the next fetch after an accumulated
    /// page must be for a later page (pages disallowed by robots.txt are
    /// skipped without a phase of their own), and items without a detail link
    /// are not enriched. A failed listing fetch goes straight to `Writing`.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        use CrawlPhase::*;

        match (*self, *next) {
            (Idle, Fetching { .. }) | (Idle, Writing) => true,
            (Fetching { page: a }, Parsing { page: b }) => a == b,
            (Fetching { .. }, Writing) => true,
            (Parsing { page: a }, Enriching { page: b, .. }) => a == b,
            (Parsing { page: a }, Accumulated { page: b }) => a == b,
            (Enriching { page: a, item: i }, Enriching { page: b, item: j }) => {
                a == b && j > i
            }
            (Enriching { page: a, .. }, Accumulated { page: b }) => a == b,
            (Accumulated { page: a }, Fetching { page: b }) => b > a,
            (Accumulated { .. }, Writing) => true,
            (Writing, Done) => true,
            _ => false,
        }
    }

    /// Short name of the phase, without page or item numbers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching { .. } => "fetching",
            Self::Parsing { .. } => "parsing",
            Self::Enriching { .. } => "enriching",
            Self::Accumulated { .. } => "accumulated",
            Self::Writing => "writing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enriching { page, item } => write!(f, "enriching(page {}, item {})", page, item),
            other => match other.page() {
                Some(page) => write!(f, "{}(page {})", other.name(), page),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}
