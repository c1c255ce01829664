//! Row Extractor: season-label rows, stat-value rows, and their alignment.
//!
//! The site renders the stats table as two independently scrolling columns:
//! a sticky left column of season/league labels and a right column of stat
//! cells. The two are correlated only by position, with the first value row
//! being a header/decoration row. The alignment policy lives here so its
//! edge cases are testable without any UI.

use std::collections::HashSet;

use crate::config::ScrapeConfig;
use crate::driver::{DriverResult, NodeId, PageDriver, Scope};
use crate::scrape::selectors;
use crate::scrape::tabs::{CellShape, TabSpec, FIXED_TAIL_PICKS};

/// The UI's "no value" placeholder.
const PLACEHOLDER: &str = "-";

/// Labels that can appear in the season column but identify no season:
/// aggregate pseudo-rows and the home country code.
const NON_SEASON_TOKENS: [&str; 3] = ["all", "all teams", "eng"];

/// Substrings marking a label as a team name rather than a season/league.
const TEAM_NAME_MARKERS: [&str; 3] = ["united", "city", "fc"];

/// Normalize one raw cell: trim, map the dash placeholder and empty text to
/// absent. This is the single point where `-` becomes "no value".
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether a label from the season column identifies a season or league.
fn is_identifying_label(text: &str) -> bool {
    let lower = text.to_lowercase();
    !text.is_empty() && !NON_SEASON_TOKENS.contains(&lower.as_str())
}

/// Stricter check for the row's primary span, which sometimes carries a team
/// name instead of a season label.
fn is_season_span(text: &str) -> bool {
    let lower = text.to_lowercase();
    is_identifying_label(text) && !TEAM_NAME_MARKERS.iter().any(|m| lower.contains(m))
}

/// Ordered, deduplicated season/league labels from the left column.
///
/// Each row's primary span is the candidate label; a visible nested league
/// label overrides it. Rows yielding no usable label are dropped.
pub async fn season_rows(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
) -> DriverResult<Vec<String>> {
    driver
        .wait_for(selectors::SEASON_ROWS, cfg.element_timeout)
        .await?;

    let mut labels = Vec::new();
    let mut seen = HashSet::new();
    for row in driver.query(Scope::Page, selectors::SEASON_ROWS).await? {
        let mut label: Option<String> = None;

        if let Some(span) = driver
            .query(Scope::Node(row), selectors::CELL_TEXT)
            .await?
            .first()
        {
            let text = driver.text(*span).await?.trim().to_string();
            if is_season_span(&text) {
                label = Some(text);
            }
        }

        if let Some(nested) = driver
            .query(Scope::Node(row), selectors::ROW_LEAGUE_LABEL)
            .await?
            .first()
        {
            if driver.is_visible(*nested).await? {
                let text = driver.text(*nested).await?.trim().to_string();
                if is_identifying_label(&text) {
                    label = Some(text);
                }
            }
        }

        if let Some(label) = label {
            if seen.insert(label.clone()) {
                labels.push(label);
            }
        }
    }
    Ok(labels)
}

/// Per-row stat values for the active tab, header row dropped, each row
/// fitted to the tab's expected header count.
///
/// An empty result means the right column held fewer than 2 rows (no data
/// row under the header); the caller skips this tab/league combination.
pub async fn value_rows(
    driver: &dyn PageDriver,
    cfg: &ScrapeConfig,
    tab: &TabSpec,
) -> DriverResult<Vec<Vec<Option<String>>>> {
    driver
        .wait_for(selectors::VALUE_ROWS, cfg.element_timeout)
        .await?;

    let rows = driver.query(Scope::Page, selectors::VALUE_ROWS).await?;
    if rows.len() < 2 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(rows.len() - 1);
    // Row 0 is a header/decoration row.
    for row in rows.into_iter().skip(1) {
        let raw = extract_cells(driver, row, tab).await?;
        out.push(fit_to_headers(raw, tab.headers.len()));
    }
    Ok(out)
}

/// Read one value row's cells according to the tab's shape.
async fn extract_cells(
    driver: &dyn PageDriver,
    row: NodeId,
    tab: &TabSpec,
) -> DriverResult<Vec<Option<String>>> {
    match tab.shape {
        CellShape::Spans => {
            // Every span keeps its position; a blank one is an absent value,
            // not a dropped column.
            let mut values = Vec::new();
            for span in driver.query(Scope::Node(row), selectors::CELL_TEXT).await? {
                let text = driver.text(span).await?;
                values.push(normalize_cell(&text));
            }
            Ok(values)
        }
        CellShape::Columns => {
            let mut values = Vec::new();
            for cell in driver.query(Scope::Node(row), selectors::ROW_CELLS).await? {
                values.push(normalize_cell(&cell_text(driver, cell).await?));
            }
            Ok(values)
        }
        CellShape::FixedTail => {
            let cells = driver.query(Scope::Node(row), selectors::ROW_CELLS).await?;
            if cells.len() < 5 {
                return Ok(vec![None; tab.headers.len()]);
            }
            let last_five = &cells[cells.len() - 5..];
            let mut values = Vec::with_capacity(FIXED_TAIL_PICKS.len());
            for &pick in &FIXED_TAIL_PICKS {
                match last_five.get(pick) {
                    Some(&cell) => values.push(normalize_cell(&cell_text(driver, cell).await?)),
                    None => values.push(None),
                }
            }
            Ok(values)
        }
    }
}

/// A cell's text: its `span` child when present, the cell itself otherwise.
async fn cell_text(driver: &dyn PageDriver, cell: NodeId) -> DriverResult<String> {
    match driver
        .query(Scope::Node(cell), selectors::CELL_TEXT)
        .await?
        .first()
    {
        Some(&span) => driver.text(span).await,
        None => driver.text(cell).await,
    }
}

/// Fit raw cells to the expected header count: keep the last `n` values
/// (extra leading columns such as team badges are discarded), pad missing
/// trailing positions with absent.
pub fn fit_to_headers(mut values: Vec<Option<String>>, n: usize) -> Vec<Option<String>> {
    if values.len() > n {
        values.drain(..values.len() - n);
    }
    while values.len() < n {
        values.push(None);
    }
    values
}

/// Zip value rows onto season indices, shorter side wins. Rows beyond the
/// season count are dropped; no record is ever fabricated for an unmatched
/// index.
pub fn align_rows<T>(season_count: usize, rows: Vec<T>) -> Vec<(usize, T)> {
    rows.into_iter().take(season_count).enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<Option<String>> {
        raw.iter().map(|s| normalize_cell(s)).collect()
    }

    #[test]
    fn placeholder_and_empty_normalize_to_absent() {
        assert_eq!(normalize_cell("-"), None);
        assert_eq!(normalize_cell(" - "), None);
        assert_eq!(normalize_cell(""), None);
        assert_eq!(normalize_cell("  "), None);
        assert_eq!(normalize_cell(" 7 "), Some("7".to_string()));
        // A double dash is a value, not the placeholder.
        assert_eq!(normalize_cell("--"), Some("--".to_string()));
    }

    #[test]
    fn fit_trims_leading_extras() {
        let fitted = fit_to_headers(cells(&["badge", "34", "12", "5"]), 3);
        assert_eq!(fitted, cells(&["34", "12", "5"]));
    }

    #[test]
    fn fit_pads_missing_trailing_positions() {
        let fitted = fit_to_headers(cells(&["34"]), 3);
        assert_eq!(fitted, vec![Some("34".to_string()), None, None]);
    }

    #[test]
    fn fit_exact_is_unchanged() {
        let fitted = fit_to_headers(cells(&["1", "2", "3"]), 3);
        assert_eq!(fitted, cells(&["1", "2", "3"]));
    }

    #[test]
    fn align_stops_at_shorter_side() {
        // 2 seasons, 3 data rows: the third row has no season to attach to.
        let aligned = align_rows(2, vec!["a", "b", "c"]);
        assert_eq!(aligned, vec![(0, "a"), (1, "b")]);

        // 3 seasons, 1 data row: nothing fabricated for seasons 1 and 2.
        let aligned = align_rows(3, vec!["a"]);
        assert_eq!(aligned, vec![(0, "a")]);
    }

    #[test]
    fn non_season_tokens_rejected() {
        for token in ["all", "All Teams", "ENG", "eng"] {
            assert!(!is_identifying_label(token), "{token}");
        }
        assert!(is_identifying_label("23/24"));
        assert!(is_identifying_label("Premier League"));
    }

    #[test]
    fn team_looking_spans_rejected() {
        for team in ["Manchester United", "Leicester City", "Arsenal FC"] {
            assert!(!is_season_span(team), "{team}");
        }
        // The league override check does not apply the team heuristic.
        assert!(is_identifying_label("Manchester United"));
        assert!(is_season_span("23/24"));
    }

    mod scripted {
        use super::*;
        use crate::driver::ScriptedPageBuilder;
        use crate::scrape::tabs::STAT_TABS;

        const STATE: &str = "loaded";

        fn tab(name: &str) -> &'static TabSpec {
            STAT_TABS.iter().find(|t| t.name == name).unwrap()
        }

        #[tokio::test]
        async fn span_shape_normalizes_dash_and_skips_header_row() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let header = b.node("header");
            let row = b.node("");
            b.place(STATE, selectors::VALUE_ROWS, &[header, row]);
            let spans: Vec<_> = ["35", "90", "-", "9", "7.4"]
                .iter()
                .map(|t| b.node(t))
                .collect();
            b.place_under(STATE, row, selectors::CELL_TEXT, &spans);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("General"))
                .await
                .unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0], cells(&["35", "90", "-", "9", "7.4"]));
            assert_eq!(rows[0][2], None);
        }

        #[tokio::test]
        async fn span_shape_keeps_blank_spans_as_positional_absents() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let header = b.node("header");
            let row = b.node("");
            b.place(STATE, selectors::VALUE_ROWS, &[header, row]);
            // A whitespace-only decoration span must not shift the columns
            // to its right.
            let spans: Vec<_> = ["35", "  ", "14", "9", "7.4"]
                .iter()
                .map(|t| b.node(t))
                .collect();
            b.place_under(STATE, row, selectors::CELL_TEXT, &spans);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("General"))
                .await
                .unwrap();
            assert_eq!(
                rows[0],
                vec![
                    Some("35".into()),
                    None,
                    Some("14".into()),
                    Some("9".into()),
                    Some("7.4".into()),
                ]
            );
        }

        #[tokio::test]
        async fn column_shape_prefers_span_and_trims_leading_extras() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let header = b.node("header");
            let row = b.node("");
            b.place(STATE, selectors::VALUE_ROWS, &[header, row]);
            // Four cells for a three-header tab: the leading badge cell is
            // discarded. The second cell reads through its span; the rest
            // fall back to the cell text.
            let badge = b.node("badge");
            let with_span = b.node("ignored outer");
            let span = b.node("4");
            b.place_under(STATE, with_span, selectors::CELL_TEXT, &[span]);
            let plain = b.node("2");
            let dash = b.node("-");
            b.place_under(STATE, row, selectors::ROW_CELLS, &[badge, with_span, plain, dash]);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("Shooting"))
                .await
                .unwrap();
            assert_eq!(rows[0], vec![Some("4".into()), Some("2".into()), None]);
        }

        #[tokio::test]
        async fn fixed_tail_shape_picks_relative_positions() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let header = b.node("header");
            let row = b.node("");
            b.place(STATE, selectors::VALUE_ROWS, &[header, row]);
            // Seven cells; the last five are ["0.42", "skip", "0.31", "-", "0.73"]
            // and picks 0,2,3,4 of those give xG, xA, GI, XGI.
            let texts = ["lead", "lead2", "0.42", "skip", "0.31", "-", "0.73"];
            let cells_nodes: Vec<_> = texts.iter().map(|t| b.node(t)).collect();
            b.place_under(STATE, row, selectors::ROW_CELLS, &cells_nodes);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("Additional"))
                .await
                .unwrap();
            assert_eq!(
                rows[0],
                vec![Some("0.42".into()), Some("0.31".into()), None, Some("0.73".into())]
            );
        }

        #[tokio::test]
        async fn fixed_tail_with_too_few_cells_is_all_absent() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let header = b.node("header");
            let row = b.node("");
            b.place(STATE, selectors::VALUE_ROWS, &[header, row]);
            let few: Vec<_> = ["1", "2"].iter().map(|t| b.node(t)).collect();
            b.place_under(STATE, row, selectors::ROW_CELLS, &few);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("Additional"))
                .await
                .unwrap();
            assert_eq!(rows[0], vec![None; 4]);
        }

        #[tokio::test]
        async fn single_row_means_no_data() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let only = b.node("header");
            b.place(STATE, selectors::VALUE_ROWS, &[only]);
            let driver = b.build();

            let rows = value_rows(&driver, &ScrapeConfig::default(), tab("General"))
                .await
                .unwrap();
            assert!(rows.is_empty());
        }

        #[tokio::test]
        async fn season_rows_dedupe_filter_and_league_override() {
            let mut b = ScriptedPageBuilder::new();
            b.initial_state(STATE);
            let rows: Vec<_> = (0..5).map(|i| b.node(&format!("row{i}"))).collect();
            b.place(STATE, selectors::SEASON_ROWS, &rows);

            let mk_span = |b: &mut ScriptedPageBuilder, row, text: &str| {
                let span = b.node(text);
                b.place_under(STATE, row, selectors::CELL_TEXT, &[span]);
            };
            mk_span(&mut b, rows[0], "23/24");
            mk_span(&mut b, rows[1], "23/24"); // duplicate, dropped
            mk_span(&mut b, rows[2], "Manchester United"); // team name, dropped
            mk_span(&mut b, rows[3], "all teams"); // aggregate, dropped
            // Row 4: span says a team, but a visible nested league label
            // overrides it.
            mk_span(&mut b, rows[4], "Leicester City");
            let nested = b.node("Championship");
            b.place_under(STATE, rows[4], selectors::ROW_LEAGUE_LABEL, &[nested]);
            let driver = b.build();

            let labels = season_rows(&driver, &ScrapeConfig::default()).await.unwrap();
            assert_eq!(labels, vec!["23/24".to_string(), "Championship".to_string()]);
        }
    }
}
