//! Radical tables and the auxiliary symbol data the session queries.
//!
//! `RadicalTable` maps radical-key strings to candidate lists, loaded from the
//! JSON form of `.cin` tables. `TableWrapper` adds lookup, wildcard lookup and
//! a lazily built reverse index. `TableManager` registers tables by id and
//! owns the symbol, emoji and associated-phrase data.

mod manager;
mod symbols;
#[cfg(test)]
mod tests;
mod wrapper;

pub use manager::{AssociatedPhrases, RadicalLookupEntry, TableManager};
pub use symbols::{
    bopomofo_symbols, parse_symbol_table, CategorySource, SymbolCategory, SymbolNode,
    SymbolSource, SymbolTable, CUSTOM_SYMBOLS_SOURCE, FOREIGN_LANGUAGE_SOURCE,
};
pub use wrapper::TableWrapper;

use std::io;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

/// Used when a table carries no `selkey`.
pub const DEFAULT_SELECTION_KEYS: &str = "1234567890";

/// Wildcard sentinel accepted by `TableWrapper::lookup_for_candidate`.
pub const WILDCARD: char = '*';

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table index {index} out of bounds ({count} tables)")]
    IndexOutOfBounds { index: usize, count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    /// Radical keystrokes accepted before further keys raise an error.
    pub max_radicals: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self { max_radicals: 5 }
    }
}

/// On-disk shape of a converted `.cin` table. Unknown fields are ignored.
#[derive(Deserialize)]
struct CinJson {
    #[serde(default)]
    cname: String,
    #[serde(default)]
    ename: Option<String>,
    #[serde(default)]
    chardefs: IndexMap<String, Vec<String>>,
    #[serde(default)]
    keynames: IndexMap<String, String>,
    #[serde(default)]
    selkey: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RadicalTable {
    display_name: String,
    english_name: Option<String>,
    key_to_candidates: IndexMap<String, Vec<String>>,
    key_display_names: IndexMap<char, String>,
    selection_keys: String,
}

impl RadicalTable {
    pub fn new(
        display_name: impl Into<String>,
        key_display_names: impl IntoIterator<Item = (char, String)>,
        key_to_candidates: impl IntoIterator<Item = (String, Vec<String>)>,
        selection_keys: Option<&str>,
    ) -> Self {
        let key_display_names: IndexMap<char, String> = key_display_names.into_iter().collect();
        let key_to_candidates = key_to_candidates
            .into_iter()
            .filter(|(radicals, _)| {
                let valid = radicals.chars().all(|c| key_display_names.contains_key(&c));
                if !valid {
                    warn!(radicals = %radicals, "dropping table entry with keys outside keynames");
                }
                valid
            })
            .collect();
        let selection_keys = match selection_keys {
            Some(keys) if !keys.is_empty() => dedup_chars(keys),
            _ => DEFAULT_SELECTION_KEYS.to_string(),
        };
        Self {
            display_name: display_name.into(),
            english_name: None,
            key_to_candidates,
            key_display_names,
            selection_keys,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: CinJson = serde_json::from_str(json)?;
        let keynames = raw.keynames.into_iter().filter_map(|(key, glyph)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some((c, glyph)),
                _ => {
                    warn!(key = %key, "ignoring multi-character keyname");
                    None
                }
            }
        });
        let mut table = Self::new(raw.cname, keynames, raw.chardefs, raw.selkey.as_deref());
        table.english_name = raw.ename;
        Ok(table)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn english_name(&self) -> Option<&str> {
        self.english_name.as_deref()
    }

    pub fn selection_keys(&self) -> &str {
        &self.selection_keys
    }

    pub fn is_input_key(&self, c: char) -> bool {
        self.key_display_names.contains_key(&c)
    }

    pub fn candidates_for(&self, radicals: &str) -> Option<&[String]> {
        self.key_to_candidates.get(radicals).map(Vec::as_slice)
    }

    pub fn display_name_for_key(&self, c: char) -> Option<&str> {
        self.key_display_names.get(&c).map(String::as_str)
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.key_to_candidates
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.key_to_candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_candidates.is_empty()
    }
}

fn dedup_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if !out.contains(c) {
            out.push(c);
        }
    }
    out
}
