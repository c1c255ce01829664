//! Category Navigator: drives the two top-level competition categories.

use crate::config::ScrapeConfig;
use crate::driver::{first, PageDriver, Scope};
use crate::merge::Merger;
use crate::scrape::leagues::walk_leagues;
use crate::scrape::nav::{find_by_text, with_retries, ScrapeReport, SkipReason, Stage, TextMatch};
use crate::scrape::selectors;

/// The two categories, in fixed processing order.
pub const CATEGORIES: [&str; 2] = ["Domestic leagues", "International competitions"];

const NO_RESULTS_TEXT: &str = "No results found";

/// Process both categories. A category that cannot be selected or shows the
/// explicit "no results" state is skipped; its sibling still runs.
pub async fn walk_categories(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    report: &mut ScrapeReport,
    merger: &mut Merger,
) {
    for category in CATEGORIES {
        report.note(format!("🚀 selecting category '{category}'"));
        if !select_category(driver, cfg, category).await {
            report.skip(Stage::SelectCategory, category, SkipReason::RetriesExhausted);
            continue;
        }

        if no_results_shown(driver).await {
            report.skip(Stage::SelectCategory, category, SkipReason::NoResults);
            continue;
        }

        // Force lazy-loaded table content to materialize.
        for _ in 0..cfg.scroll_steps {
            let _ = driver.scroll_by(cfg.scroll_step_px).await;
            driver.pause(cfg.scroll_pause).await;
        }

        walk_leagues(driver, cfg, report, merger, category).await;
    }
}

/// Open the outer dropdown and pick the category by text, bounded retries
/// with a fixed delay.
async fn select_category(driver: &dyn PageDriver, cfg: &ScrapeConfig, category: &str) -> bool {
    with_retries(driver, cfg.retry_attempts, cfg.retry_delay, |_| async move {
        let button = first(driver, Scope::Page, selectors::DROPDOWN_BUTTON).await?;
        driver.click(button).await?;
        driver.pause(cfg.dropdown_pause).await;

        let Some(option) = find_by_text(
            driver,
            Scope::Page,
            selectors::CATEGORY_OPTION,
            category,
            TextMatch::Contains,
        )
        .await?
        else {
            return Ok(None);
        };
        driver.click(option).await?;
        driver.settle(cfg.settle_timeout).await?;
        driver.pause(cfg.dropdown_pause).await;
        Ok(Some(()))
    })
    .await
    .is_some()
}

/// Explicit empty state: a centered box with the "no results" message, or
/// its magnifier icon. Probe failures count as "results present".
async fn no_results_shown(driver: &dyn PageDriver) -> bool {
    let boxes = driver
        .query(Scope::Page, selectors::NO_RESULTS_BOX)
        .await
        .unwrap_or_default();
    for node in boxes {
        let text = driver.text(node).await.unwrap_or_default();
        if text.contains(NO_RESULTS_TEXT) && driver.is_visible(node).await.unwrap_or(false) {
            return true;
        }
    }

    let icons = driver
        .query(Scope::Page, selectors::NO_RESULTS_ICON)
        .await
        .unwrap_or_default();
    for icon in icons {
        if driver.is_visible(icon).await.unwrap_or(false) {
            return true;
        }
    }
    false
}
