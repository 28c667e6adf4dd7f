//! Robots.txt rule evaluation
//!
//! Allow/Disallow matching is delegated to the robotstxt crate (a port of
//! Google's matcher). Crawl-delay is not covered by that crate and is read
//! here directly.

use robotstxt::DefaultMatcher;
use std::time::Duration;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    /// Skip matching entirely and allow everything
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this instance allows everything unconditionally
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Checks if a URL is allowed for the given agent token
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `agent` - The crawler's product token (e.g. `CatalogCrawler`)
    pub fn is_allowed(&self, url: &str, agent: &str) -> bool {
        if self.allow_all || self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, agent, url)
    }

    /// Gets the Crawl-delay that applies to the given agent token
    ///
    /// A group naming the agent wins over the `*` group. Within a group the
    /// first valid Crawl-delay line counts.
    pub fn crawl_delay(&self, agent: &str) -> Option<Duration> {
        if self.allow_all {
            return None;
        }

        let agent = agent.to_ascii_lowercase();
        let mut group_agents: Vec<String> = Vec::new();
        let mut reading_agents = false;
        let mut for_agent: Option<Duration> = None;
        let mut for_wildcard: Option<Duration> = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    // Consecutive User-agent lines share one group
                    if !reading_agents {
                        group_agents.clear();
                    }
                    reading_agents = true;
                    group_agents.push(value.to_ascii_lowercase());
                }
                "crawl-delay" => {
                    reading_agents = false;
                    let Some(delay) = parse_crawl_delay(value) else {
                        tracing::debug!("Ignoring invalid Crawl-delay {:?}", value);
                        continue;
                    };
                    for group_agent in &group_agents {
                        if group_agent == "*" {
                            for_wildcard.get_or_insert(delay);
                        } else if *group_agent == agent {
                            for_agent.get_or_insert(delay);
                        }
                    }
                }
                _ => reading_agents = false,
            }
        }

        for_agent.or(for_wildcard)
    }
}

/// Parses a Crawl-delay value in seconds
///
/// Negative, non-finite and unrepresentable values are rejected.
fn parse_crawl_delay(value: &str) -> Option<Duration> {
    let secs = value.parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
