//! Navigation walk vocabulary: stages, skip transitions, retry policy.
//!
//! The category → league → tab walk is a fixed sequence of named stages.
//! Anything that goes wrong inside a stage becomes an explicit skip of the
//! smallest enclosing unit, recorded on the [`ScrapeReport`]; nothing below
//! the per-player boundary is ever a hard error.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::driver::{DriverResult, NodeId, PageDriver, Scope};

/// The named stages of the walk, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    OpenPlayer,
    SelectCategory,
    SelectLeague,
    SelectTab,
    Extract,
    Merge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::OpenPlayer => "open-player",
            Stage::SelectCategory => "select-category",
            Stage::SelectLeague => "select-league",
            Stage::SelectTab => "select-tab",
            Stage::Extract => "extract",
            Stage::Merge => "merge",
        };
        f.write_str(s)
    }
}

/// Why a unit was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The element or panel does not exist for this player.
    Absent,
    /// The element did not appear within its bound.
    Timeout,
    /// Selection attempts were exhausted.
    RetriesExhausted,
    /// The explicit "no results" state is shown.
    NoResults,
    /// Row or column counts below the minimum for extraction.
    NoData,
    /// The player is a goalkeeper; extraction does not apply.
    Goalkeeper,
    /// The profile page could not be opened at all.
    PageUnreachable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::Absent => "absent",
            SkipReason::Timeout => "timeout",
            SkipReason::RetriesExhausted => "retries exhausted",
            SkipReason::NoResults => "no results",
            SkipReason::NoData => "no data",
            SkipReason::Goalkeeper => "goalkeeper",
            SkipReason::PageUnreachable => "page unreachable",
        };
        f.write_str(s)
    }
}

/// One recorded skip transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipEvent {
    pub stage: Stage,
    /// The unit skipped: a tab name, league name, category, or the slug.
    pub scope: String,
    pub reason: SkipReason,
}

/// Observable trail of one player's walk. Every skip lands here; with
/// `verbose` set, each is also printed as it happens.
#[derive(Debug)]
pub struct ScrapeReport {
    skips: Vec<SkipEvent>,
    verbose: bool,
}

impl ScrapeReport {
    pub fn new(verbose: bool) -> Self {
        Self {
            skips: Vec::new(),
            verbose,
        }
    }

    pub fn skip(&mut self, stage: Stage, scope: impl Into<String>, reason: SkipReason) {
        let event = SkipEvent {
            stage,
            scope: scope.into(),
            reason,
        };
        if self.verbose {
            println!("⚠ skipped [{}] {}: {}", event.stage, event.scope, event.reason);
        }
        self.skips.push(event);
    }

    pub fn note(&self, message: impl AsRef<str>) {
        if self.verbose {
            println!("{}", message.as_ref());
        }
    }

    pub fn skips(&self) -> &[SkipEvent] {
        &self.skips
    }

    pub fn skipped(&self, stage: Stage, reason: SkipReason) -> bool {
        self.skips
            .iter()
            .any(|e| e.stage == stage && e.reason == reason)
    }
}

/// Run `attempt` up to `attempts` times with a fixed inter-attempt delay.
///
/// An attempt yields `Ok(Some(value))` on success; `Ok(None)` and driver
/// errors both count as a failed attempt. Exhaustion yields `None`, which
/// callers turn into a skip of the enclosing unit.
pub async fn with_retries<T, Fut>(
    driver: &dyn PageDriver,
    attempts: u32,
    delay: Duration,
    mut attempt: impl FnMut(u32) -> Fut,
) -> Option<T>
where
    Fut: Future<Output = DriverResult<Option<T>>>,
{
    for n in 1..=attempts {
        match attempt(n).await {
            Ok(Some(value)) => return Some(value),
            Ok(None) | Err(_) => {
                if n < attempts {
                    driver.pause(delay).await;
                }
            }
        }
    }
    None
}

/// How [`find_by_text`] compares element text against the wanted string.
#[derive(Debug, Clone, Copy)]
pub enum TextMatch {
    /// Trimmed text contains the wanted string.
    Contains,
    /// Trimmed text equals the wanted string, ASCII case-insensitive.
    EqualsIgnoreCase,
}

/// First element under `scope` matching `selector` whose text matches
/// `want`. `Ok(None)` when nothing matches.
pub async fn find_by_text(
    driver: &dyn PageDriver,
    scope: Scope,
    selector: &str,
    want: &str,
    mode: TextMatch,
) -> DriverResult<Option<NodeId>> {
    for node in driver.query(scope, selector).await? {
        let text = driver.text(node).await?;
        let text = text.trim();
        let hit = match mode {
            TextMatch::Contains => text.contains(want),
            TextMatch::EqualsIgnoreCase => text.eq_ignore_ascii_case(want),
        };
        if hit {
            return Ok(Some(node));
        }
    }
    Ok(None)
}
