//! Runtime configuration for one scraping run.
//!
//! Every UI wait in the engine is bounded by one of these timeouts; exceeding
//! a bound is treated as "element absent" and routed to a skip path, never
//! left hanging.

use std::time::Duration;

use crate::cli::types::PlayerSlug;

/// Timeouts, retry policy and scroll behavior for the navigation engine.
///
/// The defaults mirror the site's observed responsiveness: long bounds for
/// full page loads, shorter ones for in-page element lookups.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Profile URL prefix; the player slug is appended.
    pub base_url: String,
    /// Run the browser without a window.
    pub headless: bool,
    /// Bound for opening a player's profile page.
    pub nav_timeout: Duration,
    /// Bound for network/UI settle after a click that reloads data.
    pub settle_timeout: Duration,
    /// Bound for an element to appear.
    pub element_timeout: Duration,
    /// Bound for quick lookups where absence is an expected state.
    pub short_timeout: Duration,
    /// Attempts for dropdown selections before skipping the unit.
    pub retry_attempts: u32,
    /// Fixed delay between selection attempts.
    pub retry_delay: Duration,
    /// Fixed pause after opening a dropdown, before reading its options.
    pub dropdown_pause: Duration,
    /// Scroll steps forcing lazy-loaded content to materialize.
    pub scroll_steps: u32,
    /// Pixels per scroll step.
    pub scroll_step_px: i64,
    /// Pause between scroll steps.
    pub scroll_pause: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.sofascore.com/en/player".to_string(),
            headless: true,
            nav_timeout: Duration::from_secs(60),
            settle_timeout: Duration::from_secs(45),
            element_timeout: Duration::from_secs(15),
            short_timeout: Duration::from_secs(7),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
            dropdown_pause: Duration::from_secs(1),
            scroll_steps: 5,
            scroll_step_px: 1000,
            scroll_pause: Duration::from_millis(300),
        }
    }
}

impl ScrapeConfig {
    /// Full profile URL for one player.
    pub fn player_url(&self, slug: &PlayerSlug) -> String {
        format!("{}/{}", self.base_url, slug)
    }
}
