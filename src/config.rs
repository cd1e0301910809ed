// src/config.rs
// =============================================================================
// Runtime settings for one mirror run.
//
// The CLI builds this from flags; the tool entry point uses the defaults.
// =============================================================================

use std::time::Duration;

// Some origins reject default client identities, so we present a desktop
// browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Value of the User-Agent header sent with every request
    pub user_agent: String,
    /// Maximum number of assets being fetched at the same time
    pub concurrency: usize,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Politeness pause after each fetch
    pub request_delay: Duration,
    /// Deadline for the whole run; when it passes, no new fetches start
    pub run_timeout: Option<Duration>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 8,
            request_timeout: Duration::from_secs(10),
            request_delay: Duration::from_millis(100),
            run_timeout: None,
        }
    }
}

impl MirrorConfig {
    /// Worker count, never zero
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}
