use serde::{Deserialize, Serialize};
use tabim_core::table::SymbolNode;

use super::CandidateItem;

/// What the engine is doing between two key events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum InputState {
    /// Idle. `reason` is diagnostic only.
    Empty { reason: Option<String> },
    /// Text about to be committed; the controller never stores this.
    Committing { text: String },
    /// An informational overlay with no candidates.
    TooltipOnly { tooltip: String },
    Inputting(InputtingState),
}

impl InputState {
    pub fn empty() -> Self {
        InputState::Empty { reason: None }
    }

    pub fn empty_because(reason: impl Into<String>) -> Self {
        InputState::Empty {
            reason: Some(reason.into()),
        }
    }

    pub fn committing(text: impl Into<String>) -> Self {
        InputState::Committing { text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InputState::Empty { .. })
    }

    pub fn inputting(&self) -> Option<&InputtingState> {
        match self {
            InputState::Inputting(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::empty()
    }
}

/// The flavour of an [`InputtingState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputtingKind {
    /// Ordinary radical composition.
    Basic,
    /// Backtick symbol entry, shown as `[符]` followed by the radicals.
    Symbol,
    /// Follow-up phrases after a commit. Keys in `exact_selection_keys`
    /// select by position; `selection_keys` only labels the key caps.
    #[serde(rename_all = "camelCase")]
    AssociatedPhrases { exact_selection_keys: String },
    /// One level of a symbol tree; `nodes` backs the candidates.
    SymbolCategory { nodes: Vec<SymbolNode> },
    Settings,
    Menu,
}

impl InputtingKind {
    /// Menus and trees render their title highlighted.
    pub fn is_menu_like(&self) -> bool {
        matches!(
            self,
            InputtingKind::SymbolCategory { .. } | InputtingKind::Settings | InputtingKind::Menu
        )
    }
}

/// Composition with a candidate list.
///
/// Paging values are derived from `selection_keys` and `candidates` and are
/// `None` when there are no candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputtingState {
    pub kind: InputtingKind,
    pub radicals: String,
    /// One segment per radical (or a single title for menus).
    pub displayed_radicals: Vec<String>,
    pub selection_keys: String,
    pub candidates: Vec<CandidateItem>,
    pub selected_candidate_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl InputtingState {
    pub fn new(
        kind: InputtingKind,
        radicals: impl Into<String>,
        displayed_radicals: Vec<String>,
        selection_keys: impl Into<String>,
        candidates: Vec<CandidateItem>,
    ) -> Self {
        let selected_candidate_index = (!candidates.is_empty()).then_some(0);
        Self {
            kind,
            radicals: radicals.into(),
            displayed_radicals,
            selection_keys: selection_keys.into(),
            candidates,
            selected_candidate_index,
            tooltip: None,
            annotation: None,
        }
    }

    pub fn with_tooltip(mut self, tooltip: Option<String>) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn with_annotation(mut self, annotation: Option<String>) -> Self {
        self.annotation = annotation;
        self
    }

    /// Copy with a different selection. Ignored when there are no candidates.
    pub fn with_selected_candidate_index(&self, index: usize) -> Self {
        let mut next = self.clone();
        if !next.candidates.is_empty() {
            next.selected_candidate_index = Some(index.min(next.candidates.len() - 1));
        }
        next
    }

    pub fn candidates_per_page(&self) -> usize {
        self.selection_keys.chars().count().max(1)
    }

    /// The selected index, defaulting to 0 when candidates exist.
    pub fn selected_index(&self) -> Option<usize> {
        if self.candidates.is_empty() {
            None
        } else {
            Some(self.selected_candidate_index.unwrap_or(0))
        }
    }

    pub fn selected_candidate(&self) -> Option<&CandidateItem> {
        self.selected_index().and_then(|i| self.candidates.get(i))
    }

    pub fn candidate_page_count(&self) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        Some(self.candidates.len().div_ceil(self.candidates_per_page()))
    }

    pub fn candidate_page_index(&self) -> Option<usize> {
        self.selected_index().map(|i| i / self.candidates_per_page())
    }

    pub fn candidates_in_current_page(&self) -> Option<&[CandidateItem]> {
        let page = self.candidate_page_index()?;
        let per_page = self.candidates_per_page();
        let start = page * per_page;
        let end = (start + per_page).min(self.candidates.len());
        self.candidates.get(start..end)
    }

    pub fn selected_candidate_index_in_current_page(&self) -> Option<usize> {
        self.selected_index().map(|i| i % self.candidates_per_page())
    }

    /// The key that selects the `i`-th candidate of the current page.
    pub fn key_cap(&self, i: usize) -> Option<char> {
        self.selection_keys.chars().nth(i)
    }
}
