use crate::record::ItemRecord;
use crate::robots::RobotsPolicy;
use crate::state::CrawlPhase;
use crate::CrawlError;
use url::Url;

/// Ephemeral state of one crawl run
///
/// Owned by the coordinator for the duration of a run. Items are appended in
/// page-ascending, then document order, and are only ever read back once, by
/// the dataset writer.
#[derive(Debug)]
pub struct CrawlSession {
    base_url: Url,
    max_pages: u32,
    robots: RobotsPolicy,
    items: Vec<ItemRecord>,
    phase: CrawlPhase,
}

impl CrawlSession {
    /// Creates a session in the `Idle` phase
    pub fn new(base_url: Url, max_pages: u32, robots: RobotsPolicy) -> Self {
        Self {
            base_url,
            max_pages,
            robots,
            items: Vec::new(),
            phase: CrawlPhase::Idle,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    pub fn robots(&self) -> &RobotsPolicy {
        &self.robots
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    /// Moves the session to `next`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transition is legal and has been applied
    /// * `Err(CrawlError::InvalidTransition)` - The phase is unchanged
    pub fn advance(&mut self, next: CrawlPhase) -> Result<(), CrawlError> {
        if !self.phase.can_transition_to(&next) {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Appends one page's items to the accumulator
    pub fn accumulate(&mut self, items: Vec<ItemRecord>) {
        self.items.extend(items);
    }

    /// Consumes the session, yielding the accumulated items
    pub fn into_items(self) -> Vec<ItemRecord> {
        self.items
    }
}
