//! Composition settings loaded from TOML, with a process-wide default.
//!
//! - `parse_settings_toml(toml)` parses a host-supplied settings file
//! - `init_custom(toml_content)` sets the TOML used by `settings()` before first use
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! The singleton only seeds `InputController::with_default_settings`; after
//! that the controller owns its `Settings` value and hands the key handler
//! an immutable snapshot per key.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global default settings.
///
/// Falls back to `Settings::default()` if the custom TOML stopped parsing,
/// which cannot happen after `init_custom` validated it.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).unwrap_or_default()
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings already initialized")]
    AlreadyInitialized,
}

/// Boolean feature flags consumed by the key handler and controller.
///
/// Field names accept both the snake_case TOML spelling and the camelCase
/// spelling hosts store in browser storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "chineseConversionEnabled")]
    pub chinese_conversion_enabled: bool,
    #[serde(alias = "associatedPhrasesEnabled")]
    pub associated_phrases_enabled: bool,
    #[serde(alias = "shiftPunctuationForSymbolsEnabled")]
    pub shift_punctuation_for_symbols_enabled: bool,
    #[serde(alias = "shiftLetterForSymbolsEnabled")]
    pub shift_letter_for_symbols_enabled: bool,
    #[serde(alias = "wildcardMatchingEnabled")]
    pub wildcard_matching_enabled: bool,
    #[serde(alias = "clearOnErrors")]
    pub clear_on_errors: bool,
    #[serde(alias = "beepOnErrors")]
    pub beep_on_errors: bool,
    #[serde(alias = "reverseRadicalLookupEnabled")]
    pub reverse_radical_lookup_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chinese_conversion_enabled: false,
            associated_phrases_enabled: false,
            shift_punctuation_for_symbols_enabled: true,
            shift_letter_for_symbols_enabled: true,
            wildcard_matching_enabled: false,
            clear_on_errors: false,
            beep_on_errors: false,
            reverse_radical_lookup_enabled: false,
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::ChineseConversion => self.chinese_conversion_enabled,
            SettingKey::AssociatedPhrases => self.associated_phrases_enabled,
            SettingKey::ShiftPunctuationForSymbols => self.shift_punctuation_for_symbols_enabled,
            SettingKey::ShiftLetterForSymbols => self.shift_letter_for_symbols_enabled,
            SettingKey::WildcardMatching => self.wildcard_matching_enabled,
            SettingKey::ClearOnErrors => self.clear_on_errors,
            SettingKey::BeepOnErrors => self.beep_on_errors,
            SettingKey::ReverseRadicalLookup => self.reverse_radical_lookup_enabled,
        }
    }

    fn slot(&mut self, key: SettingKey) -> &mut bool {
        match key {
            SettingKey::ChineseConversion => &mut self.chinese_conversion_enabled,
            SettingKey::AssociatedPhrases => &mut self.associated_phrases_enabled,
            SettingKey::ShiftPunctuationForSymbols => {
                &mut self.shift_punctuation_for_symbols_enabled
            }
            SettingKey::ShiftLetterForSymbols => &mut self.shift_letter_for_symbols_enabled,
            SettingKey::WildcardMatching => &mut self.wildcard_matching_enabled,
            SettingKey::ClearOnErrors => &mut self.clear_on_errors,
            SettingKey::BeepOnErrors => &mut self.beep_on_errors,
            SettingKey::ReverseRadicalLookup => &mut self.reverse_radical_lookup_enabled,
        }
    }

    /// A copy of these settings with `key` flipped.
    pub fn toggled(&self, key: SettingKey) -> Settings {
        let mut next = *self;
        let slot = next.slot(key);
        *slot = !*slot;
        next
    }

    pub fn from_json(json: &str) -> Result<Settings, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Identifies one boolean in [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingKey {
    ChineseConversion,
    AssociatedPhrases,
    ShiftLetterForSymbols,
    ShiftPunctuationForSymbols,
    WildcardMatching,
    ReverseRadicalLookup,
    ClearOnErrors,
    BeepOnErrors,
}

impl SettingKey {
    /// Settings shown in the settings menu, in display order.
    pub const MENU_ORDER: [SettingKey; 7] = [
        SettingKey::AssociatedPhrases,
        SettingKey::ShiftLetterForSymbols,
        SettingKey::ShiftPunctuationForSymbols,
        SettingKey::WildcardMatching,
        SettingKey::ReverseRadicalLookup,
        SettingKey::ClearOnErrors,
        SettingKey::BeepOnErrors,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingKey::ChineseConversion => "輸出簡體中文",
            SettingKey::AssociatedPhrases => "聯想詞",
            SettingKey::ShiftLetterForSymbols => "Shift + 字母輸入全形符號",
            SettingKey::ShiftPunctuationForSymbols => "Shift + 標點輸入全形符號",
            SettingKey::WildcardMatching => "萬用字元查詢",
            SettingKey::ReverseRadicalLookup => "輸入後顯示字根",
            SettingKey::ClearOnErrors => "錯誤時清除輸入",
            SettingKey::BeepOnErrors => "錯誤時發出提示音",
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))
}
