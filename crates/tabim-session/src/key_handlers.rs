use tabim_core::{Key, KeyName};
use tracing::{debug, debug_span};

use super::commit::{commit_text, handle_candidate};
use super::states::{self, inputting};
use super::types::{
    cyclic_index, InputState, InputtingKind, InputtingState, KeyContext, KeyResponse, Transition,
    SYMBOL_MAX_RADICALS,
};
use tabim_core::table::WILDCARD;

/// The key-to-state transition function.
///
/// Holds no composition state of its own; everything it reads arrives in
/// the arguments and everything it changes is described by the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyHandler {
    is_pime: bool,
}

impl KeyHandler {
    pub fn new(is_pime: bool) -> Self {
        Self { is_pime }
    }

    pub fn is_pime(&self) -> bool {
        self.is_pime
    }

    pub fn set_is_pime(&mut self, is_pime: bool) {
        self.is_pime = is_pime;
    }

    pub fn handle(&self, state: &InputState, key: &Key, ctx: &KeyContext) -> KeyResponse {
        let _span = debug_span!("handle_key", ?key.name, character = %key.character).entered();

        let resp = match state {
            InputState::Empty { .. }
            | InputState::Committing { .. }
            | InputState::TooltipOnly { .. } => self.handle_empty(key, ctx),
            InputState::Inputting(s) => match &s.kind {
                InputtingKind::AssociatedPhrases {
                    exact_selection_keys,
                } => self.handle_associated_phrases(s, exact_selection_keys, key, ctx),
                _ => self.handle_inputting(s, key, ctx),
            },
        };
        debug!(
            handled = resp.handled,
            error = resp.error,
            transitions = resp.transitions.len(),
            "key handled"
        );
        resp
    }

    fn handle_empty(&self, key: &Key, ctx: &KeyContext) -> KeyResponse {
        let Some(c) = key.ascii_char() else {
            return KeyResponse::not_handled();
        };

        if key.ctrl_pressed {
            if c == '`' {
                let menu = states::root_menu(ctx.settings, 0);
                return KeyResponse::replace(inputting(menu));
            }
            let symbols = ctx.tables.ctrl_key_symbols().lookup(&c.to_string());
            return commit_or_list(ctx, c, symbols);
        }

        if c == '`' {
            return KeyResponse::replace(inputting(states::symbol(ctx, "")));
        }

        if key.shift_pressed {
            let mapping = if c.is_ascii_alphabetic() {
                ctx.settings
                    .shift_letter_for_symbols_enabled
                    .then(|| ctx.tables.shift_letter_symbols())
            } else if c.is_ascii_punctuation() {
                ctx.settings
                    .shift_punctuation_for_symbols_enabled
                    .then(|| ctx.tables.shift_punctuation_symbols())
            } else {
                None
            };
            if let Some(found) = mapping.and_then(|m| m.get(&c.to_string())) {
                let symbols: Vec<String> = found.chars().map(String::from).collect();
                return commit_or_list(ctx, c, &symbols);
            }
        }

        if !is_radical_key(key, c, ctx) {
            return KeyResponse::not_handled();
        }
        match ctx.tables.current_table() {
            Some(table) => {
                let state = states::basic(ctx, table, &c.to_string());
                KeyResponse::replace(inputting(state))
            }
            None => KeyResponse::not_handled(),
        }
    }

    fn handle_inputting(&self, state: &InputtingState, key: &Key, ctx: &KeyContext) -> KeyResponse {
        // Chords never select or extend the composition.
        if key.ctrl_pressed {
            return KeyResponse::handled();
        }

        if key.name == KeyName::Return {
            return select_highlighted(state, ctx).unwrap_or_else(KeyResponse::error);
        }

        if let Some(c) = key.ascii_char() {
            if let Some(pos) = state.selection_keys.chars().position(|k| k == c) {
                return select_in_page(state, pos, ctx);
            }
            if let Some(resp) = self.handle_radical(state, key, c, ctx) {
                return resp;
            }
        }

        match key.name {
            KeyName::Space => select_highlighted(state, ctx).unwrap_or_else(KeyResponse::handled),
            KeyName::Esc => KeyResponse::replace(InputState::empty()),
            KeyName::Backspace => backspace(state, ctx),
            KeyName::Up | KeyName::Down | KeyName::PageUp | KeyName::PageDown => {
                navigate(state, key.name, ctx)
            }
            // Swallowed so the host caret stays put while composing.
            _ => KeyResponse::handled(),
        }
    }

    /// Radical input for Basic and Symbol states. `None` when `c` is not an
    /// input key of the state.
    fn handle_radical(
        &self,
        state: &InputtingState,
        key: &Key,
        c: char,
        ctx: &KeyContext,
    ) -> Option<KeyResponse> {
        match state.kind {
            InputtingKind::Basic => {
                if !is_radical_key(key, c, ctx) {
                    return None;
                }
                let table = ctx.tables.current_table()?;
                if state.radicals.chars().count() >= table.settings().max_radicals {
                    return Some(KeyResponse::error());
                }
                let radicals = format!("{}{c}", state.radicals);
                Some(KeyResponse::replace(inputting(states::basic(
                    ctx, table, &radicals,
                ))))
            }
            InputtingKind::Symbol => {
                if state.radicals.is_empty() {
                    match c {
                        'e' => {
                            let emoji =
                                states::category(ctx, tabim_core::table::CategorySource::Emoji);
                            return Some(KeyResponse::descend(inputting(emoji)));
                        }
                        'm' => {
                            let menu = states::root_menu(ctx.settings, 0);
                            return Some(KeyResponse::descend(inputting(menu)));
                        }
                        _ => {}
                    }
                }
                if !ctx.tables.symbol_table().has_key_name(&c.to_string()) {
                    return None;
                }
                if state.radicals.chars().count() >= SYMBOL_MAX_RADICALS {
                    return Some(KeyResponse::error());
                }
                let radicals = format!("{}{c}", state.radicals);
                Some(KeyResponse::replace(inputting(states::symbol(
                    ctx, &radicals,
                ))))
            }
            _ => None,
        }
    }

    fn handle_associated_phrases(
        &self,
        state: &InputtingState,
        exact_selection_keys: &str,
        key: &Key,
        ctx: &KeyContext,
    ) -> KeyResponse {
        if key.is_shift_only() {
            return KeyResponse::handled();
        }
        if key.ctrl_pressed {
            return self.leave_phrases(key, ctx);
        }
        match key.name {
            KeyName::Return | KeyName::Backspace | KeyName::Esc => {
                return KeyResponse::replace(InputState::empty());
            }
            KeyName::Up | KeyName::Down | KeyName::PageUp | KeyName::PageDown => {
                return navigate(state, key.name, ctx);
            }
            KeyName::Left | KeyName::Right | KeyName::Home | KeyName::End if self.is_pime => {
                return KeyResponse::handled();
            }
            _ => {}
        }

        if let Some(c) = key.ascii_char() {
            if let Some(pos) = exact_selection_keys.chars().position(|k| k == c) {
                return select_in_page(state, pos, ctx);
            }
        }

        self.leave_phrases(key, ctx)
    }

    /// Close the phrase list and treat the key as typed while idle.
    fn leave_phrases(&self, key: &Key, ctx: &KeyContext) -> KeyResponse {
        let mut resp = KeyResponse::replace(InputState::empty());
        let next = self.handle_empty(key, ctx);
        resp.handled = next.handled;
        resp.error = next.error;
        resp.transitions.extend(next.transitions);
        resp
    }
}

fn is_radical_key(key: &Key, c: char, ctx: &KeyContext) -> bool {
    if key.is_numpad_key {
        return false;
    }
    if c == WILDCARD && ctx.settings.wildcard_matching_enabled {
        return true;
    }
    ctx.tables
        .current_table()
        .is_some_and(|t| t.table().is_input_key(c))
}

/// A single symbol commits directly; several open a flat list.
fn commit_or_list(ctx: &KeyContext, key: char, symbols: &[String]) -> KeyResponse {
    match symbols {
        [] => KeyResponse::not_handled(),
        [only] => {
            let mut resp = KeyResponse::handled();
            commit_text(ctx, only, false, &mut resp);
            resp
        }
        _ => {
            let menu = states::flat_symbol_menu(&key.to_string(), symbols);
            KeyResponse::replace(inputting(menu))
        }
    }
}

fn select_highlighted(state: &InputtingState, ctx: &KeyContext) -> Option<KeyResponse> {
    let item = state.selected_candidate()?;
    let mut resp = KeyResponse::handled();
    handle_candidate(ctx, state, item, true, &mut resp);
    Some(resp)
}

fn select_in_page(state: &InputtingState, pos: usize, ctx: &KeyContext) -> KeyResponse {
    match state.candidates_in_current_page().and_then(|page| page.get(pos)) {
        Some(item) => {
            let mut resp = KeyResponse::handled();
            handle_candidate(ctx, state, item, true, &mut resp);
            resp
        }
        None => KeyResponse::error(),
    }
}

fn backspace(state: &InputtingState, ctx: &KeyContext) -> KeyResponse {
    match &state.kind {
        InputtingKind::Basic => {
            let mut radicals = state.radicals.clone();
            radicals.pop();
            match ctx.tables.current_table() {
                Some(table) if !radicals.is_empty() => {
                    KeyResponse::replace(inputting(states::basic(ctx, table, &radicals)))
                }
                _ => KeyResponse::replace(InputState::empty()),
            }
        }
        InputtingKind::Symbol => {
            if state.radicals.is_empty() {
                return KeyResponse::replace(InputState::empty());
            }
            let mut radicals = state.radicals.clone();
            radicals.pop();
            KeyResponse::replace(inputting(states::symbol(ctx, &radicals)))
        }
        InputtingKind::SymbolCategory { .. } | InputtingKind::Settings | InputtingKind::Menu => {
            KeyResponse::ascend()
        }
        InputtingKind::AssociatedPhrases { .. } => KeyResponse::replace(InputState::empty()),
    }
}

fn navigate(state: &InputtingState, name: KeyName, ctx: &KeyContext) -> KeyResponse {
    let Some(current) = state.selected_index() else {
        return KeyResponse::error();
    };
    let count = state.candidates.len();
    let per_page = state.candidates_per_page();
    let index = match name {
        KeyName::Up => cyclic_index(current, -1, count),
        KeyName::Down => cyclic_index(current, 1, count),
        KeyName::PageDown => ((current / per_page + 1) * per_page).min(count - 1),
        // floor(i / pp - 1) * pp, clamped at 0.
        KeyName::PageUp => (current / per_page).saturating_sub(1) * per_page,
        _ => current,
    };
    let next = states::annotate(ctx, state.with_selected_candidate_index(index));
    KeyResponse {
        transitions: vec![Transition::Replace(inputting(next))],
        ..KeyResponse::handled()
    }
}
