//! End-to-end walks of the navigation engine over the scripted driver.

use std::str::FromStr;

use sofa_career::driver::{NodeId, ScriptedDriver, ScriptedPageBuilder};
use sofa_career::scrape::nav::{SkipReason, Stage};
use sofa_career::scrape::selectors;
use sofa_career::scrape::tabs::{all_stat_headers, STAT_TABS};
use sofa_career::{scrape_player, PlayerSlug, ScrapeConfig};

const PROFILE: &str = "profile";
const CAT_OPEN: &str = "cat-open";
const INTL: &str = "intl";

/// Profile header nodes: birth date, nationality, position.
fn place_identity(b: &mut ScriptedPageBuilder, position: &str) {
    let birth = b.node("5 Sept 2001 (23 yrs)");
    b.place(PROFILE, selectors::BIRTH_DATE, &[birth]);

    let nat_block = b.node("");
    let nat_span = b.node("England");
    b.place(PROFILE, selectors::NATIONALITY, &[nat_block]);
    b.place_under(PROFILE, nat_block, selectors::CELL_TEXT, &[nat_span]);

    let pos = b.node(position);
    b.place(PROFILE, selectors::POSITION, &[pos]);
}

/// Category dropdown wiring: clicking the outer button opens the option
/// list; the two options lead to their category states.
fn place_category_dropdown(b: &mut ScriptedPageBuilder, domestic_state: &str) -> NodeId {
    let cat_btn = b.node("Category");
    b.on_click_goto(cat_btn, CAT_OPEN);

    let opt_dom = b.node("Domestic leagues");
    b.on_click_goto(opt_dom, domestic_state);
    let opt_intl = b.node("International competitions");
    b.on_click_goto(opt_intl, INTL);
    b.place(CAT_OPEN, selectors::CATEGORY_OPTION, &[opt_dom, opt_intl]);

    let no_results = b.node("No results found");
    b.place(INTL, selectors::NO_RESULTS_BOX, &[no_results]);

    cat_btn
}

fn slug() -> PlayerSlug {
    PlayerSlug::from_str("bukayo-saka/934235").unwrap()
}

mod full_walk {
    use super::*;

    /// Two seasons, one single (disabled-dropdown) league, complete data on
    /// all six tabs; the sibling category shows "no results".
    fn build() -> ScriptedDriver {
        let mut b = ScriptedPageBuilder::new();
        b.initial_state(PROFILE);
        place_identity(&mut b, "F");

        let domestic = "domestic";
        let cat_btn = place_category_dropdown(&mut b, domestic);
        let league_btn = b.disabled_node("Premier League");

        // Tab buttons; each click re-renders the value column.
        let tab_states: Vec<String> =
            STAT_TABS.iter().map(|t| format!("dom-{}", t.name)).collect();
        let tab_buttons: Vec<NodeId> = STAT_TABS
            .iter()
            .zip(&tab_states)
            .map(|(tab, state)| {
                let btn = b.node(tab.name);
                b.on_click_goto(btn, state);
                btn
            })
            .collect();

        let mut all_states = vec![PROFILE.to_string(), CAT_OPEN.to_string(), domestic.to_string(), INTL.to_string()];
        all_states.extend(tab_states.iter().cloned());
        for state in &all_states {
            b.place(state, selectors::DROPDOWN_BUTTON, &[cat_btn, league_btn]);
        }
        for state in std::iter::once(&domestic.to_string()).chain(tab_states.iter()) {
            b.place(state, selectors::TAB_BUTTON, &tab_buttons);
        }

        // The category view before any tab click: populated columns and the
        // Performance sub-view link.
        let left_a = b.node("");
        let left_b = b.node("");
        b.place(domestic, selectors::SEASON_ROWS, &[left_a, left_b]);
        let probe_rows: Vec<NodeId> = (0..3).map(|_| b.node("")).collect();
        b.place(domestic, selectors::VALUE_ROWS, &probe_rows);
        let perf = b.node("Performance");
        b.place(domestic, selectors::SUBVIEW_LINK, &[perf]);

        // Season labels live in the state the General tab renders.
        let general_state = tab_states[0].clone();
        let season_rows: Vec<NodeId> = (0..2).map(|_| b.node("")).collect();
        b.place(&general_state, selectors::SEASON_ROWS, &season_rows);
        for (row, label) in season_rows.iter().zip(["23/24", "22/23"]) {
            let span = b.node(label);
            b.place_under(&general_state, *row, selectors::CELL_TEXT, &[span]);
        }

        // Per-tab value rows: a header row plus one data row per season,
        // every cell distinct and non-missing.
        for (tab, state) in STAT_TABS.iter().zip(&tab_states) {
            let header_row = b.node("");
            let data_rows: Vec<NodeId> = (0..2).map(|_| b.node("")).collect();
            let mut rows = vec![header_row];
            rows.extend(&data_rows);
            b.place(state, selectors::VALUE_ROWS, &rows);

            for (season, row) in data_rows.iter().enumerate() {
                match tab.name {
                    "General" => {
                        let spans: Vec<NodeId> = tab
                            .headers
                            .iter()
                            .map(|h| b.node(&format!("{h}-s{season}")))
                            .collect();
                        b.place_under(state, *row, selectors::CELL_TEXT, &spans);
                    }
                    "Additional" => {
                        // Five trailing cells; picks 0,2,3,4 carry the values.
                        let texts = [
                            format!("xG-s{season}"),
                            "filler".to_string(),
                            format!("xA-s{season}"),
                            format!("GI-s{season}"),
                            format!("XGI-s{season}"),
                        ];
                        let cells: Vec<NodeId> = texts.iter().map(|t| b.node(t)).collect();
                        b.place_under(state, *row, selectors::ROW_CELLS, &cells);
                    }
                    _ => {
                        let cells: Vec<NodeId> = tab
                            .headers
                            .iter()
                            .map(|h| b.node(&format!("{h}-s{season}")))
                            .collect();
                        b.place_under(state, *row, selectors::ROW_CELLS, &cells);
                    }
                }
            }
        }

        b.build()
    }

    #[tokio::test]
    async fn two_seasons_all_tabs_yield_two_complete_records() {
        let driver = build();
        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;

        assert_eq!(outcome.records.len(), 2);
        let first = &outcome.records[0];
        let second = &outcome.records[1];

        assert_eq!(first.season, "23/24");
        assert_eq!(second.season, "22/23");
        for rec in [first, second] {
            assert_eq!(rec.player, "Bukayo Saka");
            assert_eq!(rec.nationality.as_deref(), Some("England"));
            assert_eq!(rec.position.as_deref(), Some("F"));
            assert_eq!(rec.league, "Premier League");
            assert_eq!(rec.category, "Domestic leagues");
        }
        assert_eq!(first.age, Some(22));
        assert_eq!(second.age, Some(21));

        for header in all_stat_headers() {
            assert!(first.stat(header).is_some(), "missing {header} in 23/24");
            assert!(second.stat(header).is_some(), "missing {header} in 22/23");
        }
        assert_eq!(first.stat("MP"), Some("MP-s0"));
        assert_eq!(second.stat("GLS"), Some("GLS-s1"));
        assert_eq!(first.stat("xG"), Some("xG-s0"));
        assert_eq!(second.stat("XGI"), Some("XGI-s1"));
    }

    #[tokio::test]
    async fn no_results_category_is_skipped_but_sibling_processed() {
        let driver = build();
        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;

        // The international category contributed nothing.
        assert!(outcome
            .records
            .iter()
            .all(|r| r.category == "Domestic leagues"));
        assert!(outcome
            .report
            .skipped(Stage::SelectCategory, SkipReason::NoResults));
        // And nothing in the domestic walk was skipped.
        assert!(!outcome.report.skipped(Stage::SelectLeague, SkipReason::NoData));
        assert!(!outcome.report.skipped(Stage::SelectTab, SkipReason::Absent));
    }
}

mod terminal_conditions {
    use super::*;

    #[tokio::test]
    async fn goalkeeper_yields_no_records_and_no_navigation() {
        let mut b = ScriptedPageBuilder::new();
        b.initial_state(PROFILE);
        place_identity(&mut b, "K");
        let driver = b.build();

        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;
        assert!(outcome.records.is_empty());
        assert!(outcome
            .report
            .skipped(Stage::OpenPlayer, SkipReason::Goalkeeper));
        // Identity is read-only; no click ever happened.
        assert!(driver
            .interaction_log()
            .iter()
            .all(|entry| !entry.starts_with("click:")));
    }

    #[tokio::test]
    async fn unreachable_page_aborts_the_player_only() {
        let mut b = ScriptedPageBuilder::new();
        b.refuse_navigation();
        let driver = b.build();

        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;
        assert!(outcome.records.is_empty());
        assert!(outcome
            .report
            .skipped(Stage::OpenPlayer, SkipReason::PageUnreachable));
    }

    #[tokio::test]
    async fn missing_category_control_yields_zero_records() {
        let mut b = ScriptedPageBuilder::new();
        b.initial_state(PROFILE);
        place_identity(&mut b, "M");
        let driver = b.build();

        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;
        assert!(outcome.records.is_empty());
        assert!(outcome.report.skipped(Stage::OpenPlayer, SkipReason::Absent));
    }
}

mod degraded_walks {
    use super::*;

    /// Two leagues behind an enabled dropdown. The first selects fine but
    /// only offers the General tab; the second disappears from the reopened
    /// option list, exhausting selection attempts.
    fn build() -> ScriptedDriver {
        let mut b = ScriptedPageBuilder::new();
        b.initial_state(PROFILE);
        place_identity(&mut b, "M");

        let domestic = "dom";
        let cat_btn = place_category_dropdown(&mut b, domestic);

        let league_btn = b.node("League");
        b.on_click_goto(league_btn, "league-open");
        let opt_all = b.node("All Teams");
        let opt_eng = b.node("ENG");
        let opt_pl = b.node("Premier League");
        b.on_click_goto(opt_pl, "pl");
        let opt_fa = b.node("FA Cup");
        b.place(
            "league-open",
            selectors::LEAGUE_OPTION,
            &[opt_all, opt_eng, opt_pl, opt_fa],
        );

        // After the first selection the reopened dropdown no longer lists
        // the cup competition.
        let league_btn2 = b.node("League");
        b.on_click_goto(league_btn2, "league-open2");
        let opt_pl2 = b.node("Premier League");
        b.place("league-open2", selectors::LEAGUE_OPTION, &[opt_pl2]);

        for state in [PROFILE, CAT_OPEN, domestic, "league-open", INTL] {
            b.place(state, selectors::DROPDOWN_BUTTON, &[cat_btn, league_btn]);
        }
        for state in ["pl", "league-open2"] {
            b.place(state, selectors::DROPDOWN_BUTTON, &[cat_btn, league_btn2]);
        }

        // The selected league's view: populated columns, Performance link,
        // one season, General data only, no tab buttons at all.
        let left = b.node("");
        b.place("pl", selectors::SEASON_ROWS, &[left]);
        let span = b.node("23/24");
        b.place_under("pl", left, selectors::CELL_TEXT, &[span]);
        let perf = b.node("Performance");
        b.place("pl", selectors::SUBVIEW_LINK, &[perf]);
        let header_row = b.node("");
        let data_row = b.node("");
        b.place("pl", selectors::VALUE_ROWS, &[header_row, data_row]);
        let spans: Vec<NodeId> = ["38", "90", "14", "9", "7.4"]
            .iter()
            .map(|t| b.node(t))
            .collect();
        b.place_under("pl", data_row, selectors::CELL_TEXT, &spans);

        b.build()
    }

    #[tokio::test]
    async fn partial_data_survives_tab_and_league_failures() {
        let driver = build();
        let outcome = scrape_player(&driver, &ScrapeConfig::default(), &slug(), false).await;

        // One record from the one walkable league/tab combination.
        assert_eq!(outcome.records.len(), 1);
        let rec = &outcome.records[0];
        assert_eq!(rec.season, "23/24");
        assert_eq!(rec.league, "Premier League");
        assert_eq!(rec.stat("MP"), Some("38"));
        assert_eq!(rec.stat("ASR"), Some("7.4"));
        // Tabs that never activated contributed nothing.
        assert_eq!(rec.stat("TOS"), None);
        assert_eq!(rec.stat("xG"), None);

        // Five tabs failed to activate, the cup league exhausted its
        // attempts, and the sibling category had no results.
        let tab_skips = outcome
            .report
            .skips()
            .iter()
            .filter(|e| e.stage == Stage::SelectTab)
            .count();
        assert_eq!(tab_skips, 5);
        assert!(outcome
            .report
            .skips()
            .iter()
            .any(|e| e.stage == Stage::SelectLeague
                && e.reason == SkipReason::RetriesExhausted
                && e.scope == "FA Cup"));
        assert!(outcome
            .report
            .skipped(Stage::SelectCategory, SkipReason::NoResults));
    }
}
