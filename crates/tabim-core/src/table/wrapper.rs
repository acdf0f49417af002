use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, debug_span};

use super::{RadicalTable, TableError, TableSettings, WILDCARD};
use crate::candidate::{plain_candidates, Candidate};

/// Candidate text → every radical string that produces it, in table order.
type ReverseIndex = HashMap<String, Vec<String>>;

/// One selectable input table with its lookup operations.
pub struct TableWrapper {
    id: String,
    table: RadicalTable,
    settings: TableSettings,
    reverse: OnceLock<ReverseIndex>,
}

impl TableWrapper {
    pub fn new(id: impl Into<String>, table: RadicalTable, settings: TableSettings) -> Self {
        Self {
            id: id.into(),
            table,
            settings,
            reverse: OnceLock::new(),
        }
    }

    pub fn from_json(
        id: impl Into<String>,
        json: &str,
        settings: TableSettings,
    ) -> Result<Self, TableError> {
        let id = id.into();
        let _span = debug_span!("parse_table", id = %id).entered();
        Ok(Self::new(id, RadicalTable::from_json(json)?, settings))
    }

    /// Load a table from a JSON file on disk.
    pub fn open(
        id: impl Into<String>,
        path: &Path,
        settings: TableSettings,
    ) -> Result<Self, TableError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(id, &json, settings)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self) -> &RadicalTable {
        &self.table
    }

    pub fn settings(&self) -> TableSettings {
        self.settings
    }

    /// Swap in a new table instance; the reverse index is rebuilt on next use.
    pub fn replace_table(&mut self, table: RadicalTable) {
        self.table = table;
        self.reverse = OnceLock::new();
    }

    pub fn lookup_for_candidate(&self, radicals: &str) -> Vec<Candidate> {
        if radicals.contains(WILDCARD) {
            return self.wildcard_lookup(radicals);
        }
        self.table
            .candidates_for(radicals)
            .map(plain_candidates)
            .unwrap_or_default()
    }

    /// Linear scan matching `*` against any single key, in table order.
    fn wildcard_lookup(&self, radicals: &str) -> Vec<Candidate> {
        let Some(regex) = wildcard_regex(radicals) else {
            return Vec::new();
        };
        self.table
            .entries()
            .filter(|(key, _)| regex.is_match(key))
            .flat_map(|(_, founds)| plain_candidates(founds))
            .collect()
    }

    pub fn look_up_for_displayed_key_name(&self, key: &str) -> String {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self
                .table
                .display_name_for_key(c)
                .unwrap_or(key)
                .to_string(),
            _ => key.to_string(),
        }
    }

    fn reverse_index(&self) -> &ReverseIndex {
        self.reverse.get_or_init(|| {
            let _span = debug_span!("build_reverse_index", id = %self.id).entered();
            let mut index: ReverseIndex = HashMap::new();
            for (radicals, founds) in self.table.entries() {
                for found in founds {
                    index
                        .entry(found.clone())
                        .or_default()
                        .push(radicals.to_string());
                }
            }
            debug!(entries = index.len(), "reverse index built");
            index
        })
    }

    fn translate(&self, radicals: &str) -> String {
        radicals
            .chars()
            .map(|c| match self.table.display_name_for_key(c) {
                Some(glyph) => glyph.to_string(),
                None => c.to_string(),
            })
            .collect()
    }

    /// Radical spellings (display glyphs) that produce `text`, shortest first.
    pub fn reverse_lookup_for_radicals(&self, text: &str) -> Vec<String> {
        self.reverse_lookup_for_translated_and_original_radicals(text)
            .into_iter()
            .map(|(translated, _)| translated)
            .collect()
    }

    /// `(translated, original)` radical strings that produce `text`, shortest first.
    pub fn reverse_lookup_for_translated_and_original_radicals(
        &self,
        text: &str,
    ) -> Vec<(String, String)> {
        let Some(founds) = self.reverse_index().get(text) else {
            return Vec::new();
        };
        let mut pairs: Vec<(String, String)> = founds
            .iter()
            .map(|original| (self.translate(original), original.clone()))
            .collect();
        pairs.sort_by_key(|(translated, _)| translated.chars().count());
        pairs
    }
}

fn wildcard_regex(radicals: &str) -> Option<Regex> {
    let pattern: String = radicals
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".");
    Regex::new(&format!("^{pattern}$")).ok()
}
