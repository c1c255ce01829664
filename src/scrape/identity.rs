//! Player identity extraction and season-age resolution.
//!
//! Identity fields are read once per player from the profile header. Every
//! lookup failure degrades to an absent field; only the goalkeeper position
//! is terminal for the player.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::ScrapeConfig;
use crate::driver::{first, DriverResult, PageDriver, Scope};
use crate::scrape::nav::ScrapeReport;
use crate::scrape::selectors;

/// Identity fields shared by every record of one player. Immutable after
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub birth_year: Option<u16>,
    pub nationality: Option<String>,
    pub position: Option<String>,
}

impl PlayerIdentity {
    /// Goalkeepers have no outfield stats; the player is excluded entirely.
    pub fn is_goalkeeper(&self) -> bool {
        self.position
            .as_deref()
            .map(|p| p.trim().eq_ignore_ascii_case("K"))
            .unwrap_or(false)
    }
}

/// Read birth year, nationality and position from the profile header.
///
/// Never fails: any field that cannot be located within its bound is left
/// absent and noted on the report.
pub async fn fetch_identity(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    report: &ScrapeReport,
    name: String,
) -> PlayerIdentity {
    let birth_year = match read_birth_year(driver, cfg).await {
        Ok(year) => year,
        Err(err) => {
            report.note(format!("  ❌ could not read birth date: {err}"));
            None
        }
    };

    let nationality = match read_nationality(driver, cfg).await {
        Ok(text) => Some(text),
        Err(err) => {
            report.note(format!("  ❌ could not read nationality: {err}"));
            None
        }
    };

    let position = match read_position(driver, cfg).await {
        Ok(text) => Some(text),
        Err(err) => {
            report.note(format!("  ❌ could not read position: {err}"));
            None
        }
    };

    PlayerIdentity {
        name,
        birth_year,
        nationality,
        position,
    }
}

async fn read_birth_year(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
) -> DriverResult<Option<u16>> {
    driver
        .wait_for(selectors::BIRTH_DATE, cfg.element_timeout)
        .await?;
    let node = first(driver, Scope::Page, selectors::BIRTH_DATE).await?;
    let text = driver.text(node).await?;
    Ok(first_four_digit_year(&text))
}

async fn read_nationality(driver: &dyn PageDriver, cfg: &ScrapeConfig) -> DriverResult<String> {
    driver
        .wait_for(selectors::NATIONALITY, cfg.element_timeout)
        .await?;
    let block = first(driver, Scope::Page, selectors::NATIONALITY).await?;
    let span = first(driver, Scope::Node(block), selectors::CELL_TEXT).await?;
    Ok(driver.text(span).await?.trim().to_string())
}

async fn read_position(driver: &dyn PageDriver, cfg: &ScrapeConfig) -> DriverResult<String> {
    driver
        .wait_for(selectors::POSITION, cfg.element_timeout)
        .await?;
    let node = first(driver, Scope::Page, selectors::POSITION).await?;
    Ok(driver.text(node).await?.trim().to_string())
}

/// Age Resolver: `season start year − birth year`, or unknown.
///
/// The season label is expected to contain a two-digit `start/end` pattern
/// such as `23/24`; the start token maps into the 2000s. Unparsable input of
/// either kind yields `None`, never an error.
pub fn age_for_season(birth_year: Option<u16>, season_label: &str) -> Option<i32> {
    let start = season_start_year(season_label)?;
    let birth = birth_year?;
    Some(i32::from(start) - i32::from(birth))
}

/// First `\d{2}/\d{2}` token in the label, mapped to a 2000s start year.
pub fn season_start_year(label: &str) -> Option<u16> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d{2})/\d{2}").expect("valid season pattern"));
    re.captures(label)?
        .get(1)?
        .as_str()
        .parse::<u16>()
        .ok()
        .map(|start| 2000 + start)
}

/// First four consecutive digits, e.g. the year inside "5 Sept 2001".
fn first_four_digit_year(text: &str) -> Option<u16> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d{4}").expect("valid year pattern"));
    re.find(text)?.as_str().parse().ok()
}
