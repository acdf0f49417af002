mod state;
pub use state::*;

use serde::{Deserialize, Serialize};
use tabim_core::table::{CategorySource, TableManager};
use tabim_core::{Candidate, SettingKey, Settings};

pub(crate) const MENU_SELECTION_KEYS: &str = "1234567890";
pub(crate) const SYMBOL_SELECTION_KEYS: &str = "1234567890";
pub(crate) const ASSOCIATED_PHRASES_SELECTION_KEYS: &str = "1234567890";
/// Shift + the digit row, position for position.
pub(crate) const ASSOCIATED_PHRASES_EXACT_KEYS: &str = "!@#$%^&*()";
pub(crate) const SYMBOL_MAX_RADICALS: usize = 10;

/// What choosing a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum MenuAction {
    ToggleSetting(SettingKey),
    OpenSettings,
    OpenCategory(CategorySource),
    /// Child category at this position among the current node's children.
    EnterCategory(usize),
}

/// A candidate list entry: text to commit or a menu entry to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CandidateItem {
    Commit(Candidate),
    Menu {
        candidate: Candidate,
        action: MenuAction,
    },
}

impl CandidateItem {
    pub fn commit(display_text: impl Into<String>) -> Self {
        CandidateItem::Commit(Candidate::plain(display_text))
    }

    pub fn menu(display_text: impl Into<String>, action: MenuAction) -> Self {
        CandidateItem::Menu {
            candidate: Candidate::plain(display_text),
            action,
        }
    }

    pub fn candidate(&self) -> &Candidate {
        match self {
            CandidateItem::Commit(c) => c,
            CandidateItem::Menu { candidate, .. } => candidate,
        }
    }

    pub fn action(&self) -> Option<MenuAction> {
        match self {
            CandidateItem::Commit(_) => None,
            CandidateItem::Menu { action, .. } => Some(*action),
        }
    }
}

impl From<Candidate> for CandidateItem {
    fn from(c: Candidate) -> Self {
        CandidateItem::Commit(c)
    }
}

/// How a new state relates to the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Replace the current state.
    Replace(InputState),
    /// Push the current state onto the ancestor stack, then enter this one.
    Descend(InputState),
    /// Return to the most recent ancestor, or Empty if there is none.
    Ascend,
}

/// Read-only inputs for one key event.
#[derive(Clone, Copy)]
pub struct KeyContext<'a> {
    pub tables: &'a TableManager,
    pub settings: &'a Settings,
}

/// Outcome of one key event.
///
/// `handled == false` means the key is foreign to the current state and the
/// host should process it. `error` marks a recognized key that could not be
/// applied; errors never carry transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub handled: bool,
    pub transitions: Vec<Transition>,
    pub error: bool,
    /// Replacement settings after a toggle.
    pub settings: Option<Settings>,
}

impl KeyResponse {
    pub(crate) fn not_handled() -> Self {
        Self {
            handled: false,
            transitions: Vec::new(),
            error: false,
            settings: None,
        }
    }

    pub(crate) fn handled() -> Self {
        Self {
            handled: true,
            ..Self::not_handled()
        }
    }

    pub(crate) fn error() -> Self {
        Self {
            error: true,
            ..Self::handled()
        }
    }

    pub(crate) fn replace(state: InputState) -> Self {
        let mut resp = Self::handled();
        resp.push(Transition::Replace(state));
        resp
    }

    pub(crate) fn descend(state: InputState) -> Self {
        let mut resp = Self::handled();
        resp.push(Transition::Descend(state));
        resp
    }

    pub(crate) fn ascend() -> Self {
        let mut resp = Self::handled();
        resp.push(Transition::Ascend);
        resp
    }

    pub(crate) fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }
}

pub(crate) fn cyclic_index(current: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let n = count as isize;
    ((current as isize + delta).rem_euclid(n)) as usize
}
