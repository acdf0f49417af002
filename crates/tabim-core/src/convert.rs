//! Traditional/Simplified script conversion applied to committed text.

use std::collections::HashMap;

pub trait ScriptConverter {
    fn to_simplified(&self, text: &str) -> String;
    fn to_traditional(&self, text: &str) -> String;
}

/// Passes text through unchanged. Used when the host supplies no mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityConverter;

impl ScriptConverter for IdentityConverter {
    fn to_simplified(&self, text: &str) -> String {
        text.to_string()
    }

    fn to_traditional(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Character-for-character conversion built from (traditional, simplified) pairs.
///
/// Where several traditional characters share one simplified form, the first
/// pair wins for the reverse direction.
#[derive(Debug, Default, Clone)]
pub struct CharMapConverter {
    to_simplified: HashMap<char, char>,
    to_traditional: HashMap<char, char>,
}

impl CharMapConverter {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut to_simplified = HashMap::new();
        let mut to_traditional = HashMap::new();
        for (trad, simp) in pairs {
            to_simplified.entry(trad).or_insert(simp);
            to_traditional.entry(simp).or_insert(trad);
        }
        Self {
            to_simplified,
            to_traditional,
        }
    }

    /// Parse `繁简` lines (two characters per line); blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Self {
        let pairs = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| {
                let mut chars = l.chars().filter(|c| !c.is_whitespace());
                Some((chars.next()?, chars.next()?))
            });
        Self::from_pairs(pairs)
    }

    pub fn len(&self) -> usize {
        self.to_simplified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_simplified.is_empty()
    }
}

fn map_chars(text: &str, map: &HashMap<char, char>) -> String {
    text.chars().map(|c| *map.get(&c).unwrap_or(&c)).collect()
}

impl ScriptConverter for CharMapConverter {
    fn to_simplified(&self, text: &str) -> String {
        map_chars(text, &self.to_simplified)
    }

    fn to_traditional(&self, text: &str) -> String {
        map_chars(text, &self.to_traditional)
    }
}
