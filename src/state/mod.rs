//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the orchestrator's position in the page loop
//! - `CrawlSession`: the ephemeral state of one run (base URL, page limit,
//!   robots policy, accumulated items)

mod crawl_phase;
mod session;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use session::CrawlSession;
