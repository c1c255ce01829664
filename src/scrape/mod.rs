//! The navigation-and-reconciliation engine.
//!
//! Control flows top-down through the named stages (category, league, tab,
//! extract) and data flows bottom-up as `(SeasonKey, header, value)` triples
//! into the [`crate::merge::Merger`]:
//! - `categories`: Category Navigator (two fixed categories)
//! - `leagues`: League Selector (dropdown enumeration, bounded retries)
//! - `walker`: Tab Walker (six stat tabs, per-tab cell shapes)
//! - `rows`: Row Extractor (label/value columns, positional alignment)
//! - `identity`: profile fields and the Age Resolver
//! - `nav`: stage/skip vocabulary, retry combinator, report
//! - `selectors` / `tabs`: the fixed site structure

pub mod categories;
pub mod identity;
pub mod leagues;
pub mod nav;
pub mod player;
pub mod rows;
pub mod selectors;
pub mod tabs;
pub mod walker;

pub use categories::CATEGORIES;
pub use player::{scrape_player, PlayerOutcome};
