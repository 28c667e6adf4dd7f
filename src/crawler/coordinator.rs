//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the page loop that ties the crawl together:
//! - Loading the site's robots.txt policy once per run
//! - Walking listing pages `1..=max_pages` in order
//! - Parsing items and resolving their categories
//! - Pacing between listing pages
//! - Committing the accumulated dataset exactly once
//!
//! A listing fetch failure ends the loop early. Whatever was accumulated up to
//! that point is still written; only a persistence failure fails the run.

use crate::config::Config;
use crate::crawler::{
    build_http_client, fetch_page, parse_listing, resolve_category, RateLimiter,
};
use crate::output::{CsvDatasetWriter, DatasetWriter, WriteOutcome};
use crate::record::ItemRecord;
use crate::robots::RobotsPolicy;
use crate::state::{CrawlPhase, CrawlSession};
use crate::url::{listing_url, normalize_base_url};
use crate::CrawlError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// The listing page that ended the loop early
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortedPage {
    pub page: u32,
    pub url: String,
    pub error: String,
}

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,

    /// Set once the dataset has been written (or the write skipped)
    pub finished_at: Option<DateTime<Utc>>,

    /// Listing pages fetched successfully
    pub pages_fetched: u32,

    /// Listing pages not fetched because robots.txt disallows them
    pub pages_skipped: u32,

    pub items_collected: usize,

    /// Items with a price or rating fallback value
    pub items_defaulted: usize,

    /// Items whose category resolved to a non-empty value
    pub categories_resolved: usize,

    pub aborted: Option<AbortedPage>,

    /// robots.txt could not be loaded and every page was allowed
    pub robots_fail_open: bool,

    /// Pause applied between listing pages
    pub page_interval: Duration,

    /// Result of the dataset write; `None` until the write happens
    pub write: Option<WriteOutcome>,
}

impl CrawlReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            pages_fetched: 0,
            pages_skipped: 0,
            items_collected: 0,
            items_defaulted: 0,
            categories_resolved: 0,
            aborted: None,
            robots_fail_open: false,
            page_interval: Duration::ZERO,
            write: None,
        }
    }

    /// Returns true if the loop stopped before the last page
    pub fn is_partial(&self) -> bool {
        self.aborted.is_some()
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    base_url: Url,
    client: Client,
    writer: Box<dyn DatasetWriter>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - A validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run; the dataset goes to `output.dataset-path`
    /// * `Err(CrawlError)` - The base URL is unusable or the HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let base_url = normalize_base_url(&config.site.base_url)?;
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(&config.user_agent, timeout)?;
        let writer = Box::new(CsvDatasetWriter::new(&config.output.dataset_path));

        Ok(Self {
            config,
            base_url,
            client,
            writer,
        })
    }

    /// Replaces the dataset writer
    pub fn with_writer(mut self, writer: Box<dyn DatasetWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Runs the page loop and returns the accumulated items without writing them
    pub async fn collect(&self) -> Result<(Vec<ItemRecord>, CrawlReport), CrawlError> {
        let (session, report) = self.crawl_pages().await?;
        Ok((session.into_items(), report))
    }

    /// Runs the full crawl: the page loop, then one dataset write
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The dataset was committed, or skipped because
    ///   nothing was collected. Check [`CrawlReport::is_partial`] for an early stop.
    /// * `Err(CrawlError::Output)` - The dataset could not be persisted
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let (mut session, mut report) = self.crawl_pages().await?;

        let outcome = match self.writer.write(session.items()) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Failed to persist dataset: {}", e);
                return Err(e.into());
            }
        };

        session.advance(CrawlPhase::Done)?;
        report.write = Some(outcome);
        report.finished_at = Some(Utc::now());

        if let Some(duration) = report.duration() {
            tracing::info!(
                "Crawl finished: {} items from {} pages in {}s",
                report.items_collected,
                report.pages_fetched,
                duration.num_seconds()
            );
        }

        Ok(report)
    }

    /// The page loop; leaves the session in the `Writing` phase
    async fn crawl_pages(&self) -> Result<(CrawlSession, CrawlReport), CrawlError> {
        let mut report = CrawlReport::new(Utc::now());
        let max_pages = self.config.site.max_pages;

        let agent = &self.config.user_agent.crawler_name;
        let robots = RobotsPolicy::load(&self.client, &self.base_url, agent).await;
        report.robots_fail_open = robots.is_fail_open();

        let configured_delay = Duration::from_millis(self.config.crawler.page_delay_ms);
        let mut limiter = if self.config.crawler.honor_crawl_delay {
            RateLimiter::with_crawl_delay(configured_delay, robots.crawl_delay())
        } else {
            RateLimiter::new(configured_delay)
        };
        report.page_interval = limiter.interval();

        let mut session = CrawlSession::new(self.base_url.clone(), max_pages, robots);

        tracing::info!(
            "Crawling up to {} listing pages of {}",
            max_pages,
            self.base_url
        );

        for page in 1..=max_pages {
            let url = listing_url(&self.base_url, &self.config.site.listing_path, page)?;

            if !session.robots().can_fetch(&url) {
                tracing::warn!("Page {} ({}) disallowed by robots.txt; skipping", page, url);
                report.pages_skipped += 1;
                continue;
            }

            session.advance(CrawlPhase::Fetching { page })?;
            let fetched = match fetch_page(&self.client, &url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::error!("Stopping at page {}: {}", page, e);
                    report.aborted = Some(AbortedPage {
                        page,
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                    break;
                }
            };
            report.pages_fetched += 1;

            session.advance(CrawlPhase::Parsing { page })?;
            let entries = parse_listing(&fetched.body);

            let mut items = Vec::with_capacity(entries.len());
            for (item, entry) in entries.into_iter().enumerate() {
                let mut record = entry.record;

                if self.config.crawler.resolve_categories {
                    if let Some(link) = entry.detail_link.as_deref() {
                        session.advance(CrawlPhase::Enriching { page, item })?;
                        record.category =
                            resolve_category(&self.client, &fetched.final_url, link).await;
                        if !record.category.is_empty() {
                            report.categories_resolved += 1;
                        }
                    }
                }

                if record.has_defaulted_fields() {
                    report.items_defaulted += 1;
                }
                items.push(record);
            }

            session.advance(CrawlPhase::Accumulated { page })?;
            tracing::info!("Page {}: {} items", page, items.len());
            report.items_collected += items.len();
            session.accumulate(items);

            if page < max_pages {
                limiter.pace().await;
            }
        }

        session.advance(CrawlPhase::Writing)?;
        tracing::debug!(
            "Collected {} items; paused {:?} in total",
            report.items_collected,
            limiter.total_paused()
        );

        Ok((session, report))
    }
}
