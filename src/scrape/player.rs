//! Per-player orchestration: open the profile, resolve identity, walk both
//! categories, hand back the merged record set.

use std::time::Duration;

use crate::cli::types::PlayerSlug;
use crate::config::ScrapeConfig;
use crate::driver::PageDriver;
use crate::merge::{Merger, SeasonRecord};
use crate::scrape::categories::walk_categories;
use crate::scrape::identity::fetch_identity;
use crate::scrape::nav::{ScrapeReport, SkipReason, Stage};
use crate::scrape::selectors;

const POST_OPEN_PAUSE: Duration = Duration::from_secs(1);

/// Everything one player's walk produced: the reconciled records and the
/// observable skip trail. Zero records with a populated report is the
/// normal partial-success shape, not an error.
#[derive(Debug)]
pub struct PlayerOutcome {
    pub records: Vec<SeasonRecord>,
    pub report: ScrapeReport,
}

impl PlayerOutcome {
    fn empty(report: ScrapeReport) -> Self {
        Self {
            records: Vec::new(),
            report,
        }
    }
}

/// Extract one player's full season-by-season record set.
///
/// Terminal conditions (unreachable page, goalkeeper, no category control)
/// end this player only; they are recorded on the report, never raised.
pub async fn scrape_player(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    slug: &PlayerSlug,
    verbose: bool,
) -> PlayerOutcome {
    let mut report = ScrapeReport::new(verbose);
    let url = cfg.player_url(slug);
    report.note(format!("🌐 opening: {url}"));

    if driver.goto(&url, cfg.nav_timeout).await.is_err() {
        report.skip(Stage::OpenPlayer, slug.to_string(), SkipReason::PageUnreachable);
        return PlayerOutcome::empty(report);
    }
    let _ = driver.settle(cfg.settle_timeout).await;
    driver.pause(POST_OPEN_PAUSE).await;

    report.note("🔎 reading age, nationality and position...");
    let identity = fetch_identity(driver, cfg, &report, slug.display_name()).await;
    if identity.is_goalkeeper() {
        report.note(format!("❗ {} is a goalkeeper, skipping", identity.name));
        report.skip(Stage::OpenPlayer, slug.to_string(), SkipReason::Goalkeeper);
        return PlayerOutcome::empty(report);
    }

    if driver
        .wait_for(selectors::DROPDOWN_BUTTON, cfg.element_timeout)
        .await
        .is_err()
    {
        report.skip(Stage::OpenPlayer, slug.to_string(), SkipReason::Absent);
        return PlayerOutcome::empty(report);
    }

    let mut merger = Merger::new(identity);
    walk_categories(driver, cfg, &mut report, &mut merger).await;

    PlayerOutcome {
        records: merger.into_records(),
        report,
    }
}
