//! Robots.txt handling module
//!
//! This module fetches a site's robots.txt once per run and turns it into a
//! permission check for listing-page URLs.
//!
//! Loading fails open: if robots.txt cannot be fetched or is unreadable, the
//! crawl proceeds unrestricted and a warning is logged. A missing or broken
//! policy file must not block the crawl.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::{fetch_bytes, NetworkError};
use crate::url::robots_url;
use crate::UrlError;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Agent token used when no crawler name is known
const WILDCARD_AGENT: &str = "*";

/// Reasons robots.txt could not be loaded
#[derive(Debug, Error)]
pub enum RobotsLoadError {
    #[error("Could not build robots.txt URL: {0}")]
    Url(#[from] UrlError),

    #[error("Could not fetch robots.txt: {0}")]
    Fetch(#[from] NetworkError),

    #[error("Malformed robots.txt: {0}")]
    Malformed(String),
}

/// The evaluated crawl policy of one site
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    rules: ParsedRobots,
    agent: String,
    fail_open: bool,
}

impl RobotsPolicy {
    /// Fetches and evaluates robots.txt for `base_url`
    ///
    /// Never fails: any load error yields a fail-open policy (see
    /// [`RobotsPolicy::is_fail_open`]).
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to use
    /// * `base_url` - The site's base URL; robots.txt is read from its origin
    /// * `agent` - The crawler's product token
    pub async fn load(client: &Client, base_url: &Url, agent: &str) -> Self {
        match fetch_robots(client, base_url).await {
            Ok(rules) => {
                tracing::info!("Loaded robots.txt for {}", base_url);
                Self::from_rules(rules, agent)
            }
            Err(e) => {
                tracing::warn!("{}; crawling {} without restrictions", e, base_url);
                Self::fail_open(agent)
            }
        }
    }

    /// Builds a policy from robots.txt text
    pub fn from_content(content: &str, agent: &str) -> Self {
        Self::from_rules(ParsedRobots::from_content(content), agent)
    }

    /// A policy that permits every URL
    pub fn allow_all() -> Self {
        Self::from_rules(ParsedRobots::allow_all(), WILDCARD_AGENT)
    }

    fn from_rules(rules: ParsedRobots, agent: &str) -> Self {
        Self {
            rules,
            agent: agent.to_string(),
            fail_open: false,
        }
    }

    fn fail_open(agent: &str) -> Self {
        Self {
            rules: ParsedRobots::allow_all(),
            agent: agent.to_string(),
            fail_open: true,
        }
    }

    /// Returns true if `url` may be fetched
    pub fn can_fetch(&self, url: &Url) -> bool {
        self.rules.is_allowed(url.as_str(), &self.agent)
    }

    /// The Crawl-delay robots.txt asks of this crawler, if any
    pub fn crawl_delay(&self) -> Option<Duration> {
        self.rules.crawl_delay(&self.agent)
    }

    /// Returns true if robots.txt could not be loaded and everything is allowed
    pub fn is_fail_open(&self) -> bool {
        self.fail_open
    }

    /// The agent token rules are evaluated for
    pub fn agent(&self) -> &str {
        &self.agent
    }
}

/// Fetches and parses robots.txt from the origin of `base_url`
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - Successfully fetched and parsed robots.txt
/// * `Err(RobotsLoadError)` - The fetch failed or the body is not UTF-8 text
pub async fn fetch_robots(client: &Client, base_url: &Url) -> Result<ParsedRobots, RobotsLoadError> {
    let url = robots_url(base_url)?;
    tracing::debug!("Fetching robots.txt from {}", url);

    let bytes = fetch_bytes(client, &url).await?;
    let content = String::from_utf8(bytes)
        .map_err(|e| RobotsLoadError::Malformed(format!("{} is not UTF-8: {}", url, e)))?;

    Ok(ParsedRobots::from_content(&content))
}
