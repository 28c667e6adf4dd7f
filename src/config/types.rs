use serde::Deserialize;

/// Main configuration structure for Catalog-Crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The catalog being crawled
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Root URL of the catalog; robots.txt and listing paths resolve against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Listing page path relative to the base URL, with a `{page}` placeholder
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Number of listing pages to walk, starting at page 1
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Pause after each listing page fetch (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Whether to fetch each item's detail page to resolve its category
    #[serde(rename = "resolve-categories", default = "default_true")]
    pub resolve_categories: bool,

    /// Whether a robots.txt Crawl-delay may lengthen the page delay
    #[serde(rename = "honor-crawl-delay", default = "default_true")]
    pub honor_crawl_delay: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            page_delay_ms: default_page_delay(),
            resolve_categories: true,
            honor_crawl_delay: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler, also the robots.txt agent token
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the full User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV dataset
    #[serde(rename = "dataset-path", default = "default_dataset_path")]
    pub dataset_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
        }
    }
}

fn default_listing_path() -> String {
    "catalogue/page-{page}.html".to_string()
}

fn default_max_pages() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

fn default_page_delay() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_dataset_path() -> String {
    "data/books.csv".to_string()
}
