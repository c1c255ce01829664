//! End-to-end scrape: slug list in, flat record table out.
//!
//! Players are processed strictly sequentially, in list order, each on its
//! own browser page. One player's failure never affects another's; the run
//! is only fatal when the browser itself cannot start.

use std::path::PathBuf;

use crate::config::ScrapeConfig;
use crate::driver::{ChromeBrowser, DriverError};
use crate::error::{Result, ScrapeError};
use crate::merge::SeasonRecord;
use crate::output::{to_json, write_csv_file};
use crate::scrape::scrape_player;

use super::read_slug_list;

/// Configuration for the scrape command.
#[derive(Debug)]
pub struct ScrapePlayersParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub as_json: bool,
    pub limit: Option<usize>,
    pub headed: bool,
    pub verbose: bool,
}

/// Run the full scrape for every slug in the input list.
pub async fn handle_scrape_players(params: ScrapePlayersParams) -> Result<()> {
    let mut slugs = read_slug_list(&params.input)?;
    if let Some(limit) = params.limit {
        slugs.truncate(limit);
    }

    let cfg = ScrapeConfig {
        headless: !params.headed,
        ..ScrapeConfig::default()
    };

    let browser = ChromeBrowser::launch(cfg.headless)
        .await
        .map_err(|err| ScrapeError::BrowserLaunch {
            message: err.to_string(),
        })?;

    // Append-only, single-writer across the whole run.
    let mut all_records: Vec<SeasonRecord> = Vec::new();
    let total = slugs.len();
    for (i, slug) in slugs.iter().enumerate() {
        println!("\n📦 {}/{} → {}", i + 1, total, slug);
        match scrape_one(&browser, &cfg, slug, params.verbose).await {
            Ok(records) => {
                if records.is_empty() {
                    println!("❗ no data extracted for {slug}");
                } else {
                    println!("✓ {} season record(s) for {slug}", records.len());
                }
                all_records.extend(records);
            }
            Err(err) => eprintln!("❌ player failed ({slug}): {err}"),
        }
    }

    if let Err(err) = browser.shutdown().await {
        eprintln!("⚠ browser shutdown: {err}");
    }

    if let Some(dir) = params.output.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    if params.as_json {
        std::fs::write(&params.output, to_json(&all_records)?)?;
    } else {
        write_csv_file(&params.output, &all_records)?;
    }
    println!(
        "\n✅ {} record(s) written to {}",
        all_records.len(),
        params.output.display()
    );
    Ok(())
}

/// One player's walk on a fresh page. The page is closed in every outcome so
/// no state leaks to the next player.
async fn scrape_one(
    browser: &ChromeBrowser,
    cfg: &ScrapeConfig,
    slug: &crate::cli::types::PlayerSlug,
    verbose: bool,
) -> std::result::Result<Vec<SeasonRecord>, DriverError> {
    let session = browser.new_session().await?;
    let outcome = scrape_player(&session, cfg, slug, verbose).await;
    if let Err(err) = session.close().await {
        eprintln!("⚠ page close ({slug}): {err}");
    }
    if !outcome.report.skips().is_empty() && !verbose {
        println!("  {} step(s) skipped", outcome.report.skips().len());
    }
    Ok(outcome.records)
}
