use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::TableError;

/// Built-in custom symbol table shown under the function menu.
pub const CUSTOM_SYMBOLS_SOURCE: &str = include_str!("custom_symbols.txt");

/// Built-in kana tables shown under the foreign-language menu item.
pub const FOREIGN_LANGUAGE_SOURCE: &str = include_str!("foreign_language.txt");

/// A node in a symbol tree: either a leaf symbol or a nested category.
///
/// Deserializes from the emoji catalog shape, where leaves are bare strings
/// and categories are `{ "id", "name", "nodes" }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolNode {
    Symbol(String),
    Category(SymbolCategory),
}

impl SymbolNode {
    /// Text shown for this node in a candidate list.
    pub fn label(&self) -> &str {
        match self {
            SymbolNode::Symbol(s) => s,
            SymbolNode::Category(c) => &c.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<SymbolNode>,
}

impl SymbolCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, nodes: Vec<SymbolNode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse `name=symbols` lines into a symbol tree.
///
/// Each line with `=` becomes a category whose symbols are its characters;
/// everything after the first `=` belongs to the symbol list. Lines without
/// `=` become bare symbols. Blank lines are skipped.
pub fn parse_symbol_table(text: &str) -> Vec<SymbolNode> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('=') {
            Some((name, symbols)) => {
                let name = name.trim();
                let nodes = symbols
                    .trim()
                    .chars()
                    .map(|c| SymbolNode::Symbol(c.to_string()))
                    .collect();
                SymbolNode::Category(SymbolCategory::new(name, name, nodes))
            }
            None => SymbolNode::Symbol(line.to_string()),
        })
        .collect()
}

/// Editable symbol table text and its parsed tree.
#[derive(Debug, Clone)]
pub struct SymbolSource {
    source: String,
    nodes: Vec<SymbolNode>,
}

impl SymbolSource {
    pub fn new(source: &str) -> Self {
        let source = source.trim().to_string();
        let nodes = parse_symbol_table(&source);
        Self { source, nodes }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Replace the source text and re-parse.
    pub fn set_source(&mut self, source: &str) {
        *self = Self::new(source);
    }

    pub fn nodes(&self) -> &[SymbolNode] {
        &self.nodes
    }
}

/// Keyed symbol lists: the backtick symbol table and the ctrl-key table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    pub chardefs: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub keynames: Vec<String>,
}

impl SymbolTable {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_key_name(&self, key: &str) -> bool {
        self.keynames.iter().any(|k| k == key)
    }

    pub fn lookup(&self, key: &str) -> &[String] {
        self.chardefs.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Trees the function menu can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategorySource {
    CustomSymbols,
    ForeignLanguage,
    Emoji,
    Bopomofo,
}

impl CategorySource {
    pub fn label(self) -> &'static str {
        match self {
            CategorySource::CustomSymbols => "自訂符號",
            CategorySource::ForeignLanguage => "外語符號",
            CategorySource::Emoji => "表情符號",
            CategorySource::Bopomofo => "注音符號",
        }
    }
}

/// Bopomofo letters in keyboard-layout order, followed by the tone marks.
pub fn bopomofo_symbols() -> Vec<String> {
    let consonants = 0x3105..0x311a;
    let medials = 0x3127..0x312a;
    let finals = 0x311a..0x3127;
    let tones = [0x02d9, 0x02ca, 0x02c7, 0x02cb];
    consonants
        .chain(medials)
        .chain(finals)
        .chain(tones)
        .filter_map(char::from_u32)
        .map(String::from)
        .collect()
}
