//! Type-safe wrappers for CLI inputs.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScrapeError};

/// Opaque player identifier used to build the profile URL, e.g.
/// `bukayo-saka/934235`.
///
/// # Examples
///
/// ```rust
/// use std::str::FromStr;
/// use sofa_career::cli::types::PlayerSlug;
///
/// let slug = PlayerSlug::from_str("bukayo-saka/934235").unwrap();
/// assert_eq!(slug.display_name(), "Bukayo Saka");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSlug(String);

impl PlayerSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable player name derived from the slug's first segment.
    pub fn display_name(&self) -> String {
        let segment = self.0.split('/').next().unwrap_or_default();
        segment
            .split('-')
            .filter(|word| !word.is_empty())
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for PlayerSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlayerSlug {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScrapeError::InvalidSlug {
                slug: s.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}
