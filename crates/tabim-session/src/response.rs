//! JSON projection of a state for the host's composition and candidate UI.

use serde::{Deserialize, Serialize};

use super::types::{InputState, InputtingKind, InputtingState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Normal,
    Highlighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposingBufferText {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWrapper {
    pub key_cap: String,
    pub display_text: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputUiState {
    pub composing_buffer: Vec<ComposingBufferText>,
    /// Counted in characters; the cursor trails the composed text.
    pub cursor_index: usize,
    /// The current page only.
    pub candidates: Vec<CandidateWrapper>,
    pub candidate_page_count: usize,
    pub candidate_page_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_annotation: Option<String>,
}

pub struct InputUiStateBuilder<'a> {
    state: &'a InputState,
}

impl<'a> InputUiStateBuilder<'a> {
    pub fn new(state: &'a InputState) -> Self {
        Self { state }
    }

    pub fn build(&self) -> InputUiState {
        match self.state {
            InputState::Inputting(s) => build_inputting(s),
            InputState::TooltipOnly { tooltip } => InputUiState {
                tooltip: Some(tooltip.clone()),
                ..InputUiState::default()
            },
            InputState::Empty { .. } | InputState::Committing { .. } => InputUiState::default(),
        }
    }

    pub fn build_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.build())
    }
}

fn build_inputting(state: &InputtingState) -> InputUiState {
    let (composing_buffer, cursor_index) = match state.kind {
        InputtingKind::AssociatedPhrases { .. } => (Vec::new(), 0),
        _ => {
            let text: String = state.displayed_radicals.concat();
            let style = if state.kind.is_menu_like() {
                TextStyle::Highlighted
            } else {
                TextStyle::Normal
            };
            let cursor = text.chars().count();
            let buffer = if text.is_empty() {
                Vec::new()
            } else {
                vec![ComposingBufferText { text, style }]
            };
            (buffer, cursor)
        }
    };

    let selected_in_page = state.selected_candidate_index_in_current_page();
    let candidates = state
        .candidates_in_current_page()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let candidate = item.candidate();
            CandidateWrapper {
                key_cap: state.key_cap(i).map(String::from).unwrap_or_default(),
                display_text: candidate.display_text.clone(),
                description: candidate.description.clone(),
                selected: selected_in_page == Some(i),
            }
        })
        .collect();

    InputUiState {
        composing_buffer,
        cursor_index,
        candidates,
        candidate_page_count: state.candidate_page_count().unwrap_or(0),
        candidate_page_index: state.candidate_page_index().unwrap_or(0),
        tooltip: state.tooltip.clone(),
        candidate_annotation: state.annotation.clone(),
    }
}
