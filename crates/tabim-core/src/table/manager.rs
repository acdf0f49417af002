use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use super::symbols::{
    bopomofo_symbols, CategorySource, SymbolNode, SymbolSource, SymbolTable,
    CUSTOM_SYMBOLS_SOURCE, FOREIGN_LANGUAGE_SOURCE,
};
use super::{TableError, TableWrapper};
use crate::candidate::{plain_candidates, Candidate};

/// Follow-up phrases keyed by the text just committed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociatedPhrases {
    #[serde(default)]
    chardefs: HashMap<String, Vec<String>>,
}

impl AssociatedPhrases {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        Self {
            chardefs: entries.into_iter().collect(),
        }
    }

    pub fn lookup(&self, prefix: &str) -> Vec<Candidate> {
        self.chardefs
            .get(prefix)
            .map(plain_candidates)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chardefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chardefs.is_empty()
    }
}

/// Radical spellings of a character in one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalLookupEntry {
    pub table_name: String,
    pub radicals: Vec<String>,
}

/// Owns every table the session consults.
///
/// Constructed by the host and handed to the controller; there is no global
/// instance.
pub struct TableManager {
    tables: Vec<TableWrapper>,
    selected: usize,
    custom_symbols: SymbolSource,
    foreign_language: SymbolSource,
    emoji: Vec<SymbolNode>,
    bopomofo: Vec<String>,
    symbol_table: SymbolTable,
    ctrl_key_symbols: SymbolTable,
    shift_letter_symbols: HashMap<String, String>,
    shift_punctuation_symbols: HashMap<String, String>,
    associated_phrases: AssociatedPhrases,
    bpmf: Option<TableWrapper>,
}

impl Default for TableManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TableManager {
    /// Empty manager with the built-in symbol sources and Bopomofo list.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            selected: 0,
            custom_symbols: SymbolSource::new(CUSTOM_SYMBOLS_SOURCE),
            foreign_language: SymbolSource::new(FOREIGN_LANGUAGE_SOURCE),
            emoji: Vec::new(),
            bopomofo: bopomofo_symbols(),
            symbol_table: SymbolTable::default(),
            ctrl_key_symbols: SymbolTable::default(),
            shift_letter_symbols: HashMap::new(),
            shift_punctuation_symbols: HashMap::new(),
            associated_phrases: AssociatedPhrases::default(),
            bpmf: None,
        }
    }

    pub fn add_table(&mut self, table: TableWrapper) {
        debug!(id = table.id(), "table registered");
        self.tables.push(table);
    }

    /// `(id, display name)` of every registered table, in registration order.
    pub fn tables(&self) -> Vec<(&str, &str)> {
        self.tables
            .iter()
            .map(|t| (t.id(), t.table().display_name()))
            .collect()
    }

    pub fn table_wrappers(&self) -> &[TableWrapper] {
        &self.tables
    }

    pub fn current_table(&self) -> Option<&TableWrapper> {
        self.tables.get(self.selected)
    }

    pub fn current_table_mut(&mut self) -> Option<&mut TableWrapper> {
        self.tables.get_mut(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_index(&mut self, index: usize) -> Result<(), TableError> {
        if index >= self.tables.len() {
            return Err(TableError::IndexOutOfBounds {
                index,
                count: self.tables.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Select a table by id. Unknown ids select the first table.
    pub fn set_input_table_by_id(&mut self, id: &str) {
        match self.tables.iter().position(|t| t.id() == id) {
            Some(index) => self.selected = index,
            None => {
                warn!(id, "unknown table id, selecting the first table");
                self.selected = 0;
            }
        }
    }

    /// Spellings of `text` in every registered table that knows it.
    pub fn reverse_lookup_for_radicals(&self, text: &str) -> Vec<RadicalLookupEntry> {
        self.tables
            .iter()
            .filter_map(|t| {
                let radicals = t.reverse_lookup_for_radicals(text);
                (!radicals.is_empty()).then(|| RadicalLookupEntry {
                    table_name: t.table().display_name().to_string(),
                    radicals,
                })
            })
            .collect()
    }

    pub fn look_up_for_associated_phrases(&self, prefix: &str) -> Vec<Candidate> {
        self.associated_phrases.lookup(prefix)
    }

    pub fn set_associated_phrases(&mut self, phrases: AssociatedPhrases) {
        self.associated_phrases = phrases;
    }

    pub fn set_bpmf_table(&mut self, table: TableWrapper) {
        self.bpmf = Some(table);
    }

    /// `(glyphs, keys)` readings of `text` in the Bopomofo table.
    pub fn lookup_bpmf_readings(&self, text: &str) -> Vec<(String, String)> {
        self.bpmf
            .as_ref()
            .map(|t| t.reverse_lookup_for_translated_and_original_radicals(text))
            .unwrap_or_default()
    }

    pub fn lookup_candidates_for_bpmf_radicals(&self, radicals: &str) -> Vec<Candidate> {
        self.bpmf
            .as_ref()
            .map(|t| t.lookup_for_candidate(radicals))
            .unwrap_or_default()
    }

    pub fn custom_symbols(&self) -> &SymbolSource {
        &self.custom_symbols
    }

    pub fn set_custom_symbol_source(&mut self, source: &str) {
        self.custom_symbols.set_source(source);
    }

    pub fn foreign_language(&self) -> &SymbolSource {
        &self.foreign_language
    }

    pub fn set_foreign_language_source(&mut self, source: &str) {
        self.foreign_language.set_source(source);
    }

    pub fn emoji(&self) -> &[SymbolNode] {
        &self.emoji
    }

    pub fn set_emoji(&mut self, nodes: Vec<SymbolNode>) {
        self.emoji = nodes;
    }

    /// Load the emoji catalog: a JSON array of `{ "id", "name", "nodes" }` trees.
    pub fn load_emoji_json(&mut self, json: &str) -> Result<(), TableError> {
        self.emoji = serde_json::from_str(json)?;
        Ok(())
    }

    pub fn bopomofo_symbols(&self) -> &[String] {
        &self.bopomofo
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn set_symbol_table(&mut self, table: SymbolTable) {
        self.symbol_table = table;
    }

    pub fn ctrl_key_symbols(&self) -> &SymbolTable {
        &self.ctrl_key_symbols
    }

    pub fn set_ctrl_key_symbols(&mut self, table: SymbolTable) {
        self.ctrl_key_symbols = table;
    }

    pub fn shift_letter_symbols(&self) -> &HashMap<String, String> {
        &self.shift_letter_symbols
    }

    pub fn set_shift_letter_symbols(&mut self, symbols: HashMap<String, String>) {
        self.shift_letter_symbols = symbols;
    }

    pub fn shift_punctuation_symbols(&self) -> &HashMap<String, String> {
        &self.shift_punctuation_symbols
    }

    pub fn set_shift_punctuation_symbols(&mut self, symbols: HashMap<String, String>) {
        self.shift_punctuation_symbols = symbols;
    }

    /// Top-level nodes of the tree a function-menu entry opens.
    pub fn category_nodes(&self, source: CategorySource) -> Vec<SymbolNode> {
        match source {
            CategorySource::CustomSymbols => self.custom_symbols.nodes().to_vec(),
            CategorySource::ForeignLanguage => self.foreign_language.nodes().to_vec(),
            CategorySource::Emoji => self.emoji.clone(),
            CategorySource::Bopomofo => self
                .bopomofo
                .iter()
                .cloned()
                .map(SymbolNode::Symbol)
                .collect(),
        }
    }
}
