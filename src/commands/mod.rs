//! Command implementations for the career-stats CLI.

pub mod scrape_players;

use std::path::Path;
use std::str::FromStr;

use crate::cli::types::PlayerSlug;
use crate::error::{Result, ScrapeError};

/// Read a newline-delimited slug list, skipping blank lines.
pub fn read_slug_list(path: &Path) -> Result<Vec<PlayerSlug>> {
    let contents = std::fs::read_to_string(path)?;
    let slugs: Vec<PlayerSlug> = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(PlayerSlug::from_str)
        .collect::<Result<_>>()?;
    if slugs.is_empty() {
        return Err(ScrapeError::EmptySlugList {
            path: path.display().to_string(),
        });
    }
    Ok(slugs)
}
