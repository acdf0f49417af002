use std::mem;

use tabim_core::convert::{IdentityConverter, ScriptConverter};
use tabim_core::table::TableManager;
use tabim_core::{Key, Settings};
use tracing::{debug, warn};

use super::commit::handle_candidate;
use super::key_handlers::KeyHandler;
use super::response::InputUiStateBuilder;
use super::types::{InputState, KeyContext, KeyResponse, Transition};

/// The host's composition and candidate UI.
pub trait InputUi {
    fn reset(&mut self);
    fn commit_string(&mut self, text: &str);
    /// `state_json` is an [`InputUiState`](crate::InputUiState) as JSON.
    fn update(&mut self, state_json: &str);
}

/// Sequences states for one composition session and drives the UI.
pub struct InputController<U: InputUi> {
    ui: U,
    tables: TableManager,
    settings: Settings,
    state: InputState,
    /// States left by descending into menus and categories, innermost last.
    ancestors: Vec<InputState>,
    handler: KeyHandler,
    converter: Box<dyn ScriptConverter>,
    on_error: Option<Box<dyn FnMut()>>,
    on_setting_changed: Option<Box<dyn FnMut(&Settings)>>,
}

impl<U: InputUi> InputController<U> {
    pub fn new(ui: U, tables: TableManager, settings: Settings) -> Self {
        Self {
            ui,
            tables,
            settings,
            state: InputState::empty(),
            ancestors: Vec::new(),
            handler: KeyHandler::default(),
            converter: Box::new(IdentityConverter),
            on_error: None,
            on_setting_changed: None,
        }
    }

    /// Controller seeded with the process-wide default settings.
    ///
    /// Hosts that call `tabim_core::settings::init_custom` at startup get
    /// their TOML here; the controller keeps its own copy afterwards.
    pub fn with_default_settings(ui: U, tables: TableManager) -> Self {
        Self::new(ui, tables, *tabim_core::settings::settings())
    }

    pub fn set_converter(&mut self, converter: Box<dyn ScriptConverter>) {
        self.converter = converter;
    }

    /// Called on errors when `beep_on_errors` is set.
    pub fn set_on_error(&mut self, f: impl FnMut() + 'static) {
        self.on_error = Some(Box::new(f));
    }

    pub fn set_on_setting_changed(&mut self, f: impl FnMut(&Settings) + 'static) {
        self.on_setting_changed = Some(Box::new(f));
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Depth of the menu/category stack under the current state.
    pub fn ancestor_count(&self) -> usize {
        self.ancestors.len()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn tables(&self) -> &TableManager {
        &self.tables
    }

    /// Mutate tables between key events, e.g. to switch the input table.
    pub fn tables_mut(&mut self) -> &mut TableManager {
        &mut self.tables
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        if settings == self.settings {
            return;
        }
        debug!(?settings, "settings changed");
        self.settings = settings;
        if let Some(f) = self.on_setting_changed.as_mut() {
            f(&self.settings);
        }
    }

    pub fn is_pime(&self) -> bool {
        self.handler.is_pime()
    }

    pub fn set_is_pime(&mut self, is_pime: bool) {
        self.handler.set_is_pime(is_pime);
    }

    pub fn reset(&mut self, reason: Option<String>) {
        self.enter_state(InputState::Empty { reason });
    }

    /// Process one key. Returns whether the key was consumed.
    pub fn handle(&mut self, key: &Key) -> bool {
        let ctx = KeyContext {
            tables: &self.tables,
            settings: &self.settings,
        };
        let resp = self.handler.handle(&self.state, key, &ctx);
        self.apply(resp)
    }

    /// Choose the `index`-th candidate of the current page, as a pointer
    /// click would. Out-of-range indices are ignored.
    pub fn select_candidate_at_index(&mut self, index: usize) {
        let InputState::Inputting(state) = &self.state else {
            return;
        };
        let Some(item) = state
            .candidates_in_current_page()
            .and_then(|page| page.get(index))
        else {
            return;
        };
        let ctx = KeyContext {
            tables: &self.tables,
            settings: &self.settings,
        };
        let mut resp = KeyResponse::handled();
        handle_candidate(&ctx, state, item, true, &mut resp);
        self.apply(resp);
    }

    fn apply(&mut self, resp: KeyResponse) -> bool {
        if let Some(settings) = resp.settings {
            self.set_settings(settings);
        }
        for transition in resp.transitions {
            self.apply_transition(transition);
        }
        if resp.error {
            self.report_error();
        }
        if !resp.handled {
            if matches!(self.state, InputState::TooltipOnly { .. }) {
                self.state = InputState::empty();
            }
            self.ui.reset();
        }
        resp.handled
    }

    fn report_error(&mut self) {
        debug!("key rejected");
        if self.settings.beep_on_errors {
            if let Some(f) = self.on_error.as_mut() {
                f();
            }
        }
        if self.settings.clear_on_errors {
            self.reset(Some("cleared on error".to_string()));
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Replace(next) => self.enter_state(next),
            Transition::Descend(next) => {
                let current = mem::take(&mut self.state);
                self.ancestors.push(current);
                self.enter_state(next);
            }
            Transition::Ascend => {
                let previous = self.ancestors.pop().unwrap_or_default();
                self.enter_state(previous);
            }
        }
    }

    fn enter_state(&mut self, next: InputState) {
        match next {
            InputState::Empty { .. } => {
                self.ui.reset();
                self.ancestors.clear();
                self.state = next;
            }
            InputState::Committing { text } => {
                let text = if self.settings.chinese_conversion_enabled {
                    self.converter.to_simplified(&text)
                } else {
                    self.converter.to_traditional(&text)
                };
                self.ui.commit_string(&text);
                self.ui.reset();
                self.ancestors.clear();
                self.state = InputState::empty();
            }
            InputState::Inputting(_) => {
                if let Some(json) = self.project(&next) {
                    self.ui.reset();
                    self.ui.update(&json);
                }
                self.state = next;
            }
            InputState::TooltipOnly { .. } => {
                if let Some(json) = self.project(&next) {
                    self.ui.update(&json);
                }
                self.state = next;
            }
        }
    }

    fn project(&self, state: &InputState) -> Option<String> {
        match InputUiStateBuilder::new(state).build_json_string() {
            Ok(json) => Some(json),
            Err(e) => {
                warn!(error = %e, "failed to serialize UI state");
                None
            }
        }
    }
}
