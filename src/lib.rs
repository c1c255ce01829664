//! Career Stats Scraper Library
//!
//! Extracts a footballer's season-by-season performance statistics from a
//! sports-statistics site's tab-and-dropdown UI and reconciles the scattered
//! values into one structured record per (season, league, category).
//!
//! ## Features
//!
//! - **Hierarchy navigation**: drives category → league → stat-tab selection
//!   with bounded retries and explicit, observable skip transitions
//! - **Positional reconciliation**: aligns independently extracted
//!   season-label and stat-value columns, shorter side wins
//! - **Six-tab merge**: accumulates all stat tabs into one record per season,
//!   first non-missing value wins per column
//! - **Driver seam**: all page automation goes through the [`driver::PageDriver`]
//!   trait, with `chromiumoxide` in production and a scripted backend in tests
//! - **Flat output**: CSV (UTF-8 with BOM) or JSON, one row per season record
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sofa_career::commands::scrape_players::*;
//!
//! # async fn example() -> sofa_career::Result<()> {
//! let params = ScrapePlayersParams {
//!     input: "output/premier_slug_list.txt".into(),
//!     output: "output/career_stats.csv".into(),
//!     as_json: false,
//!     limit: None,
//!     headed: false,
//!     verbose: true,
//! };
//!
//! handle_scrape_players(params).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod merge;
pub mod output;
pub mod scrape;

// Re-export commonly used types
pub use cli::types::PlayerSlug;
pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use merge::{Merger, SeasonKey, SeasonRecord};
pub use scrape::{scrape_player, PlayerOutcome};
