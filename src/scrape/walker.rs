//! Tab Walker: activates each of the six stat tabs and feeds the extracted
//! rows to the merger, aligned to the current league's season rows.

use std::time::Duration;

use crate::config::ScrapeConfig;
use crate::driver::{PageDriver, Scope};
use crate::merge::{Merger, SeasonKey};
use crate::scrape::nav::{find_by_text, ScrapeReport, SkipReason, Stage, TextMatch};
use crate::scrape::rows::{align_rows, value_rows};
use crate::scrape::selectors;
use crate::scrape::tabs::STAT_TABS;

const POST_TAB_PAUSE: Duration = Duration::from_millis(700);

/// Walk the six tabs in fixed order for the currently selected league.
///
/// A tab that cannot be activated or yields no data is skipped and recorded;
/// the remaining tabs still run. The first tab was already activated during
/// league setup and is not re-clicked.
pub async fn walk_tabs(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    report: &mut ScrapeReport,
    merger: &mut Merger,
    seasons: &[String],
    league: &str,
    category: &str,
) {
    for (index, tab) in STAT_TABS.iter().enumerate() {
        if index > 0 && !activate_tab(driver, cfg, tab.name).await {
            report.skip(Stage::SelectTab, tab.name, SkipReason::Absent);
            continue;
        }

        let rows = match value_rows(driver, cfg, tab).await {
            Ok(rows) => rows,
            Err(_) => {
                report.skip(Stage::Extract, format!("{league} / {}", tab.name), SkipReason::Timeout);
                continue;
            }
        };
        if rows.is_empty() {
            report.skip(Stage::Extract, format!("{league} / {}", tab.name), SkipReason::NoData);
            continue;
        }

        if rows.len() > seasons.len() {
            // Partial alignment; the surplus rows have no season to attach to.
            report.note(format!(
                "❗ row count mismatch ({} values vs {} seasons): {league} / {}",
                rows.len(),
                seasons.len(),
                tab.name
            ));
        }

        for (season_index, row) in align_rows(seasons.len(), rows) {
            let key = SeasonKey::new(seasons[season_index].clone(), league, category);
            for (header, value) in tab.headers.iter().copied().zip(row) {
                merger.apply(&key, header, value);
            }
        }
    }
}

/// Locate the tab's button by label and click it. No retry: a tab that does
/// not activate is skipped.
async fn activate_tab(driver: &dyn PageDriver, cfg: &ScrapeConfig, name: &str) -> bool {
    if driver
        .wait_for(selectors::TAB_BUTTON, cfg.short_timeout)
        .await
        .is_err()
    {
        return false;
    }
    let button = match find_by_text(
        driver,
        Scope::Page,
        selectors::TAB_BUTTON,
        name,
        TextMatch::Contains,
    )
    .await
    {
        Ok(Some(button)) => button,
        _ => return false,
    };
    if driver.click(button).await.is_err() {
        return false;
    }
    let _ = driver.settle(cfg.settle_timeout).await;
    driver.pause(POST_TAB_PAUSE).await;
    true
}
