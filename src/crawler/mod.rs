//! Crawler module for listing-page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a shared, identified client
//! - Listing page parsing and item extraction
//! - Category resolution from detail pages
//! - Pacing between listing pages
//! - Overall crawl coordination

mod coordinator;
mod detail;
mod fetcher;
mod parser;
mod rate_limiter;

pub use coordinator::{AbortedPage, Coordinator, CrawlReport};
pub use detail::{category_from_breadcrumb, resolve_category};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page, FetchedPage, NetworkError};
pub use parser::{parse_listing, ItemParseError};
pub use rate_limiter::{RateLimiter, MAX_CRAWL_DELAY};

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Load robots.txt for the site
/// 3. Fetch and parse each listing page in order
/// 4. Resolve item categories, if enabled
/// 5. Write the dataset once
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed, possibly stopping early at a failed page
/// * `Err(CrawlError)` - Setup failed or the dataset could not be written
pub async fn crawl(config: Config) -> Result<CrawlReport, CrawlError> {
    Coordinator::new(config)?.run().await
}
