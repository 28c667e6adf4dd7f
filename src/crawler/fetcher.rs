//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a proper user agent string
//! - Single-attempt GET requests bounded by the client timeout
//! - Error classification into `NetworkError`
//!
//! There are no retries here. A failed request is reported once and the
//! caller decides what it means (abort the page loop, or drop a category).

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Upper bound for establishing a connection, independent of the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A request that did not produce a successful response
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },
}

impl NetworkError {
    /// The URL the failed request was made to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Request { url, .. } => url,
        }
    }

    /// The HTTP status, if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect {
                url,
                message: error.to_string(),
            }
        } else if error.is_body() || error.is_decode() {
            Self::Body {
                url,
                message: error.to_string(),
            }
        } else {
            Self::Request {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after any redirects the transport followed
    pub final_url: Url,

    /// HTTP status code (always 2xx)
    pub status_code: u16,

    /// Page body, decoded as text
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Per-request timeout covering connect, headers and body
///
/// # Example
///
/// ```no_run
/// use catalog_crawler::config::UserAgentConfig;
/// use catalog_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "CatalogCrawler".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page as text
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Timeout (connect or read) | `NetworkError::Timeout` |
/// | Connection refused / DNS / TLS | `NetworkError::Connect` |
/// | Non-2xx status | `NetworkError::Status` |
/// | Body read or decode failure | `NetworkError::Body` |
/// | Anything else | `NetworkError::Request` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, NetworkError> {
    let response = send(client, url).await?;
    let final_url = response.url().clone();
    let status_code = response.status().as_u16();

    let body = response
        .text()
        .await
        .map_err(|e| NetworkError::from_reqwest(url, e))?;

    tracing::debug!("Fetched {} ({} bytes)", final_url, body.len());

    Ok(FetchedPage {
        final_url,
        status_code,
        body,
    })
}

/// Fetches a resource as raw bytes
///
/// Used where the caller wants to judge the encoding itself (robots.txt).
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, NetworkError> {
    let response = send(client, url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| NetworkError::from_reqwest(url, e))?;
    Ok(bytes.to_vec())
}

/// Sends a single GET and rejects non-2xx responses
async fn send(client: &Client, url: &Url) -> Result<reqwest::Response, NetworkError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| NetworkError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    Ok(response)
}
