//! CSS selectors for the fixed site structure.
//!
//! The site ships hashed utility classes with no stable ids, so these are
//! position- and class-chain-based and inherently fragile. They are kept in
//! one place so a site redesign is a one-file fix. Text conditions (the
//! original relied on `:has-text`) are standard queries here, with the text
//! match done in Rust against the element's inner text.

/// Birth-date text on the profile header.
pub const BIRTH_DATE: &str =
    "div.d_flex.flex-d_column div.Box.hKmppk div.Box.Flex.ggRYVx.flkZQO div:nth-child(2) > div.Text.gzlBsj";

/// Nationality block; the first match's `span` carries the country name.
pub const NATIONALITY: &str = "div.Box.gsaNZo";

/// Position label on the profile header.
pub const POSITION: &str =
    "div.d_flex.flex-d_column div.Box.hKmppk div.Box.Flex.ggRYVx.flkZQO div.Box.oWZdE > div.Text.beCNLk";

/// Outer dropdown buttons; index 0 selects the category, index 1 the league.
pub const DROPDOWN_BUTTON: &str = "button.DropdownButton";

/// Options of the opened category dropdown.
pub const CATEGORY_OPTION: &str = "li[role='option']";

/// Options of the opened league dropdown.
pub const LEAGUE_OPTION: &str = "ul[role='listbox'] > li";

/// Container of the explicit "no results" state.
pub const NO_RESULTS_BOX: &str = "div.d_flex.flex-d_column.ai_center.jc_center";

/// Magnifier icon inside the "no results" state.
pub const NO_RESULTS_ICON: &str =
    "div.d_flex.flex-d_column.ai_center.jc_center svg[data-icon='magnifying-glass']";

/// Season/league label rows (the left, sticky column of the stats table).
pub const SEASON_ROWS: &str = "div.Box.Flex.cceZpO.kWzByL div[direction='column']";

/// Stat value rows (the right, scrollable column of the stats table).
pub const VALUE_ROWS: &str = "div.Box.Flex.fEBZed.iWGVcA div[direction='column']";

/// Nested league label inside a season row, shown for grouped seasons.
pub const ROW_LEAGUE_LABEL: &str = "div.Text.beCNLk";

/// Chevron that collapses an already-expanded season detail panel.
pub const EXPANDED_DETAIL: &str = "div.Box.Flex.jBQtbp.cQgcrM";

/// Sub-view links ("Performance", "Matches"); matched by text.
pub const SUBVIEW_LINK: &str = "a";

/// Stat tab buttons; matched by text against the tab name.
pub const TAB_BUTTON: &str = "button";

/// Generic stat cell containers within a value row.
pub const ROW_CELLS: &str = "div[class*='Box Flex']";

/// Text carrier within a cell or row.
pub const CELL_TEXT: &str = "span";
