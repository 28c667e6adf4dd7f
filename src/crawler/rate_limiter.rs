//! Listing page pacing
//!
//! The crawler is sequential, so rate limiting reduces to one fixed pause
//! after every listing page fetch. Detail requests are not paced.

use crate::config::MAX_PAGE_DELAY_MS;
use std::time::Duration;

/// Longest pause a robots.txt Crawl-delay can impose
pub const MAX_CRAWL_DELAY: Duration = Duration::from_millis(MAX_PAGE_DELAY_MS);

/// Enforces a fixed pause between successive listing-page fetches
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// The pause applied after each page
    interval: Duration,

    /// Number of pauses taken so far
    paces: u32,

    /// Sum of all pauses taken so far
    total_paused: Duration,
}

impl RateLimiter {
    /// Creates a rate limiter with a fixed interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            paces: 0,
            total_paused: Duration::ZERO,
        }
    }

    /// Creates a rate limiter honoring a robots.txt Crawl-delay
    ///
    /// The interval is the longer of the configured delay and the site's
    /// Crawl-delay, fixed for the whole run. A Crawl-delay above
    /// [`MAX_CRAWL_DELAY`] is capped.
    pub fn with_crawl_delay(configured: Duration, crawl_delay: Option<Duration>) -> Self {
        let crawl_delay = crawl_delay.map(|delay| {
            if delay > MAX_CRAWL_DELAY {
                tracing::warn!(
                    "robots.txt Crawl-delay of {:?} exceeds the {:?} limit; capping it",
                    delay,
                    MAX_CRAWL_DELAY
                );
                MAX_CRAWL_DELAY
            } else {
                delay
            }
        });

        let interval = match crawl_delay {
            Some(delay) if delay > configured => {
                tracing::info!(
                    "robots.txt Crawl-delay of {:?} exceeds configured delay {:?}; using it",
                    delay,
                    configured
                );
                delay
            }
            _ => configured,
        };
        Self::new(interval)
    }

    /// The pause applied after each page
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of pauses taken so far
    pub fn paces(&self) -> u32 {
        self.paces
    }

    /// Sum of all pauses taken so far
    pub fn total_paused(&self) -> Duration {
        self.total_paused
    }

    /// Blocks the calling task for the configured interval
    pub async fn pace(&mut self) {
        self.paces += 1;
        if self.interval.is_zero() {
            return;
        }

        tracing::trace!("Pausing {:?} before next listing page", self.interval);
        tokio::time::sleep(self.interval).await;
        self.total_paused += self.interval;
    }
}
