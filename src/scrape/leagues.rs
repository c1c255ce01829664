//! League Selector: enumerates the leagues of the active category, drives
//! the UI to each one, and hands off to the Tab Walker.

use std::time::Duration;

use crate::config::ScrapeConfig;
use crate::driver::{texts_of, NodeId, PageDriver, Scope};
use crate::merge::Merger;
use crate::scrape::nav::{find_by_text, with_retries, ScrapeReport, SkipReason, Stage, TextMatch};
use crate::scrape::rows::season_rows;
use crate::scrape::selectors;
use crate::scrape::walker::walk_tabs;

const POST_SELECT_PAUSE: Duration = Duration::from_millis(2500);
const POST_SUBVIEW_PAUSE: Duration = Duration::from_millis(1500);

/// Home country code shown as a pseudo-league option.
const HOME_COUNTRY_CODE: &str = "ENG";

/// Process every usable league of the currently selected category.
///
/// Zero usable leagues is a recorded skip of the category, not an error.
/// A league whose selection or data loading fails is skipped individually;
/// its siblings still proceed.
pub async fn walk_leagues(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    report: &mut ScrapeReport,
    merger: &mut Merger,
    category: &str,
) {
    let (leagues, selectable) = enumerate_leagues(driver, cfg).await;
    if leagues.is_empty() {
        report.skip(Stage::SelectLeague, category, SkipReason::Absent);
        return;
    }
    report.note(format!("🔍 leagues to process ({category}): {leagues:?}"));

    let single = leagues.len() == 1;
    for league in &leagues {
        if single {
            collapse_expanded_detail(driver, cfg).await;
        } else if selectable {
            let selected = select_league(driver, cfg, league).await;
            if !selected {
                report.skip(Stage::SelectLeague, league.clone(), SkipReason::RetriesExhausted);
                continue;
            }
            report.note(format!("✅ league '{league}' selected"));
        }

        if !wait_for_populated_columns(driver, cfg).await {
            report.skip(Stage::SelectLeague, league.clone(), SkipReason::NoData);
            continue;
        }

        if !open_performance_subview(driver, cfg).await {
            report.skip(Stage::SelectLeague, league.clone(), SkipReason::Absent);
            continue;
        }

        activate_general_tab(driver, cfg, report).await;

        let seasons = match season_rows(driver, cfg).await {
            Ok(seasons) => seasons,
            Err(_) => {
                report.skip(Stage::Extract, league.clone(), SkipReason::Timeout);
                continue;
            }
        };
        if seasons.is_empty() {
            report.skip(Stage::Extract, league.clone(), SkipReason::NoData);
            continue;
        }

        walk_tabs(driver, cfg, report, merger, &seasons, league, category).await;
    }
}

/// Read the league dropdown's options, or its displayed value when the
/// control is disabled (a state, not an interaction). Returns the usable
/// league names and whether the control accepts selections.
async fn enumerate_leagues(driver: &dyn PageDriver, cfg: &ScrapeConfig) -> (Vec<String>, bool) {
    let Some(button) = league_dropdown_button(driver).await else {
        return (Vec::new(), false);
    };

    match driver.is_enabled(button).await {
        Ok(true) => {
            if driver.click(button).await.is_err() {
                return (Vec::new(), false);
            }
            driver.pause(cfg.dropdown_pause).await;
            let options = texts_of(driver, Scope::Page, selectors::LEAGUE_OPTION)
                .await
                .unwrap_or_default();
            let leagues = options
                .into_iter()
                .filter(|text| is_usable_league(text))
                .collect();
            (leagues, true)
        }
        Ok(false) => {
            // Disabled control: its displayed value is the only league.
            let displayed = driver.text(button).await.unwrap_or_default();
            let displayed = displayed.trim().to_string();
            if is_usable_league(&displayed) {
                (vec![displayed], false)
            } else {
                (Vec::new(), false)
            }
        }
        Err(_) => (Vec::new(), false),
    }
}

fn is_usable_league(text: &str) -> bool {
    let lower = text.to_lowercase();
    !text.is_empty() && !lower.contains("all") && text.to_uppercase() != HOME_COUNTRY_CODE
}

/// The second outer dropdown selects the league.
async fn league_dropdown_button(driver: &dyn PageDriver) -> Option<NodeId> {
    let buttons = driver
        .query(Scope::Page, selectors::DROPDOWN_BUTTON)
        .await
        .ok()?;
    buttons.get(1).copied()
}

/// Select a league by case-insensitive text match, bounded retries with a
/// fixed delay. The dropdown button is re-queried each attempt; handles go
/// stale when the panel re-renders.
async fn select_league(driver: &dyn PageDriver, cfg: &ScrapeConfig, league: &str) -> bool {
    with_retries(driver, cfg.retry_attempts, cfg.retry_delay, |_| async move {
        if let Some(button) = league_dropdown_button(driver).await {
            if driver.is_enabled(button).await.unwrap_or(false) {
                driver.click(button).await?;
                driver.pause(cfg.dropdown_pause).await;
            }
        }
        let Some(option) = find_by_text(
            driver,
            Scope::Page,
            selectors::LEAGUE_OPTION,
            league,
            TextMatch::EqualsIgnoreCase,
        )
        .await?
        else {
            return Ok(None);
        };
        driver.click(option).await?;
        driver.settle(cfg.settle_timeout).await?;
        driver.pause(POST_SELECT_PAUSE).await;
        Ok(Some(()))
    })
    .await
    .is_some()
}

/// Best-effort collapse of an already-expanded season detail panel; only
/// relevant when no league click will reload the table.
async fn collapse_expanded_detail(driver: &dyn PageDriver, cfg: &ScrapeConfig) {
    let Ok(found) = driver.query(Scope::Page, selectors::EXPANDED_DETAIL).await else {
        return;
    };
    if let Some(&chevron) = found.first() {
        if driver.click(chevron).await.is_ok() {
            driver.pause(cfg.dropdown_pause).await;
        }
    }
}

/// Both the season-label column and the stat-value column must be populated
/// (header plus at least one data row on the value side) before extraction.
async fn wait_for_populated_columns(driver: &dyn PageDriver, cfg: &ScrapeConfig) -> bool {
    if driver
        .wait_for(selectors::SEASON_ROWS, cfg.element_timeout)
        .await
        .is_err()
    {
        return false;
    }
    if driver
        .wait_for(selectors::VALUE_ROWS, cfg.element_timeout)
        .await
        .is_err()
    {
        return false;
    }
    let left = driver
        .query(Scope::Page, selectors::SEASON_ROWS)
        .await
        .unwrap_or_default();
    let right = driver
        .query(Scope::Page, selectors::VALUE_ROWS)
        .await
        .unwrap_or_default();
    !left.is_empty() && right.len() >= 2
}

/// Navigate to the "Performance" sub-view, falling back to "Matches".
async fn open_performance_subview(driver: &dyn PageDriver, cfg: &ScrapeConfig) -> bool {
    for (label, timeout) in [
        ("Performance", cfg.element_timeout),
        ("Matches", cfg.short_timeout),
    ] {
        if driver.wait_for(selectors::SUBVIEW_LINK, timeout).await.is_err() {
            continue;
        }
        let link = match find_by_text(
            driver,
            Scope::Page,
            selectors::SUBVIEW_LINK,
            label,
            TextMatch::Contains,
        )
        .await
        {
            Ok(Some(link)) => link,
            _ => continue,
        };
        if driver.click(link).await.is_err() {
            continue;
        }
        let _ = driver.settle(cfg.settle_timeout).await;
        driver.pause(POST_SUBVIEW_PAUSE).await;
        return true;
    }
    false
}

/// Activate the first stat tab once per league; the walker relies on it
/// being current. Failure is noted, not fatal: the tab may already be
/// active.
async fn activate_general_tab(driver: &dyn PageDriver, cfg: &ScrapeConfig, report: &ScrapeReport) {
    let activated = async {
        driver
            .wait_for(selectors::TAB_BUTTON, cfg.short_timeout)
            .await?;
        let button = find_by_text(
            driver,
            Scope::Page,
            selectors::TAB_BUTTON,
            "General",
            TextMatch::Contains,
        )
        .await?;
        if let Some(button) = button {
            driver.click(button).await?;
            driver.settle(cfg.settle_timeout).await?;
            driver.pause(cfg.dropdown_pause).await;
        }
        Ok::<_, crate::driver::DriverError>(())
    }
    .await;
    if let Err(err) = activated {
        report.note(format!("⚠ could not activate the General tab: {err}"));
    }
}
