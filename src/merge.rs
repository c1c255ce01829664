//! Season Record Merger: the reducer that turns the stream of
//! `(SeasonKey, header, value)` triples produced by the navigation walk into
//! one record per key.
//!
//! Merge policy, preserved exactly from the walk's iteration order: the
//! first non-missing value written for a (key, header) pair wins; an absent
//! value only ever fills a hole. A once-set value is never removed.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::scrape::identity::{age_for_season, PlayerIdentity};

/// Sole identity of one output record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    pub season: String,
    pub league: String,
    pub category: String,
}

impl SeasonKey {
    pub fn new(
        season: impl Into<String>,
        league: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            season: season.into(),
            league: league.into(),
            category: category.into(),
        }
    }
}

/// One reconciled season line: identity fields plus the merged stat columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Age")]
    pub age: Option<i32>,
    #[serde(rename = "Nationality")]
    pub nationality: Option<String>,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "League")]
    pub league: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(flatten)]
    pub stats: BTreeMap<&'static str, Option<String>>,
}

impl SeasonRecord {
    /// Merged value for one stat column, if any.
    pub fn stat(&self, header: &str) -> Option<&str> {
        self.stats.get(header).and_then(|v| v.as_deref())
    }
}

/// Accumulates records for one player. Owned exclusively by the player's
/// walk, handed off read-only at the end.
#[derive(Debug)]
pub struct Merger {
    identity: PlayerIdentity,
    records: HashMap<SeasonKey, SeasonRecord>,
    order: Vec<SeasonKey>,
}

impl Merger {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            identity,
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Apply one triple. First sight of a key seeds the identity fields;
    /// afterwards a header is set if new, and overwritten only while absent.
    pub fn apply(&mut self, key: &SeasonKey, header: &'static str, value: Option<String>) {
        if !self.records.contains_key(key) {
            self.order.push(key.clone());
            let seeded = self.seed(key);
            self.records.insert(key.clone(), seeded);
        }
        let Some(record) = self.records.get_mut(key) else {
            return;
        };
        match record.stats.get_mut(header) {
            None => {
                record.stats.insert(header, value);
            }
            Some(existing) if existing.is_none() => *existing = value,
            Some(_) => {}
        }
    }

    fn seed(&self, key: &SeasonKey) -> SeasonRecord {
        SeasonRecord {
            player: self.identity.name.clone(),
            age: age_for_season(self.identity.birth_year, &key.season),
            nationality: self.identity.nationality.clone(),
            position: self.identity.position.clone(),
            season: key.season.clone(),
            league: key.league.clone(),
            category: key.category.clone(),
            stats: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Final record set in key-discovery order. An empty set is a valid
    /// outcome signaling "no extractable data".
    pub fn into_records(mut self) -> Vec<SeasonRecord> {
        self.order
            .iter()
            .filter_map(|key| self.records.remove(key))
            .collect()
    }
}
