mod proptest_fsm;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tabim_core::table::{
    AssociatedPhrases, RadicalTable, SymbolTable, TableManager, TableSettings, TableWrapper,
};
use tabim_core::{Key, KeyName, Settings};

use super::types::{InputState, InputtingState, KeyContext, KeyResponse, Transition};
use super::{InputController, InputUi, KeyHandler};

/// First-key candidates: eleven entries, so they span two pages of ten.
pub(super) const A_CANDIDATES: [&str; 11] = [
    "中", "文", "日", "曰", "昌", "明", "晶", "早", "旦", "旭", "旨",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn make_test_table() -> TableWrapper {
    let keynames = [
        ('a', "日"),
        ('b', "月"),
        ('c', "金"),
        ('d', "木"),
        ('z', "重"),
    ]
    .into_iter()
    .map(|(k, g)| (k, g.to_string()));
    let entries = vec![
        ("a".to_string(), strings(&A_CANDIDATES)),
        ("ab".to_string(), strings(&["嗎"])),
        ("abc".to_string(), strings(&["暗"])),
        ("b".to_string(), strings(&["月"])),
        ("bb".to_string(), strings(&["朋"])),
    ];
    let table = RadicalTable::new("測試倉頡", keynames, entries, None);
    TableWrapper::new("cj5", table, TableSettings { max_radicals: 5 })
}

fn make_bpmf_table() -> TableWrapper {
    let keynames = [('5', "ㄓ"), ('j', "ㄨ"), ('/', "ㄥ")]
        .into_iter()
        .map(|(k, g)| (k, g.to_string()));
    let entries = vec![("5j/".to_string(), strings(&["中", "鐘"]))];
    let table = RadicalTable::new("注音", keynames, entries, None);
    TableWrapper::new("bpmf", table, TableSettings { max_radicals: 4 })
}

pub(super) fn make_test_tables() -> TableManager {
    let mut tables = TableManager::new();
    tables.add_table(make_test_table());
    tables.set_bpmf_table(make_bpmf_table());

    let symbols = SymbolTable {
        chardefs: [
            ("c".to_string(), strings(&["，", "、"])),
            ("cs".to_string(), strings(&["。"])),
        ]
        .into_iter()
        .collect(),
        keynames: strings(&["c", "s"]),
    };
    tables.set_symbol_table(symbols);

    let ctrl = SymbolTable {
        chardefs: [
            (",".to_string(), strings(&["，"])),
            (".".to_string(), strings(&["。", "．"])),
        ]
        .into_iter()
        .collect(),
        keynames: strings(&[",", "."]),
    };
    tables.set_ctrl_key_symbols(ctrl);

    tables.set_shift_punctuation_symbols(HashMap::from([
        ("!".to_string(), "！".to_string()),
        ("?".to_string(), "？¿".to_string()),
    ]));
    tables.set_shift_letter_symbols(HashMap::from([
        ("A".to_string(), "Ａ".to_string()),
        ("B".to_string(), "Ｂⓑ".to_string()),
    ]));

    tables.set_associated_phrases(AssociatedPhrases::from_entries([
        ("文".to_string(), strings(&["字", "化", "章"])),
        ("中".to_string(), strings(&["國", "文"])),
    ]));

    tables
        .load_emoji_json(
            r#"[{"id":"faces","name":"表情","nodes":["😀","😁"]},
                {"id":"animal","name":"動物","nodes":["🐶",{"id":"cats","name":"貓咪","nodes":["😺"]}]}]"#,
        )
        .unwrap();
    tables
}

/// Run one key through a fresh handler.
pub(super) fn press(
    tables: &TableManager,
    settings: &Settings,
    state: &InputState,
    key: Key,
) -> KeyResponse {
    let ctx = KeyContext { tables, settings };
    KeyHandler::default().handle(state, &key, &ctx)
}

/// The inputting state a response replaces or descends into last.
pub(super) fn last_inputting(resp: &KeyResponse) -> &InputtingState {
    resp.transitions
        .iter()
        .rev()
        .find_map(|t| match t {
            Transition::Replace(InputState::Inputting(s))
            | Transition::Descend(InputState::Inputting(s)) => Some(s),
            _ => None,
        })
        .expect("response carries an inputting state")
}

/// Feed keys one at a time, threading each final state into the next key.
pub(super) fn type_keys(
    tables: &TableManager,
    settings: &Settings,
    keys: &str,
) -> InputState {
    let mut state = InputState::empty();
    for ch in keys.chars() {
        let resp = press(tables, settings, &state, Key::ascii(ch));
        if let Some(Transition::Replace(next)) = resp.transitions.last() {
            state = next.clone();
        }
    }
    state
}

pub(super) fn named(name: KeyName) -> Key {
    Key::named(name)
}

pub(super) fn texts(state: &InputtingState) -> Vec<&str> {
    state
        .candidates
        .iter()
        .map(|c| c.candidate().display_text.as_str())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum UiEvent {
    Reset,
    Commit(String),
    Update(String),
}

/// Records every UI call; clones share the log.
#[derive(Clone, Default)]
pub(super) struct RecordingUi {
    pub events: Rc<RefCell<Vec<UiEvent>>>,
}

impl RecordingUi {
    pub fn take(&self) -> Vec<UiEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn commits(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                UiEvent::Commit(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_update(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            UiEvent::Update(s) => Some(s.clone()),
            _ => None,
        })
    }
}

impl InputUi for RecordingUi {
    fn reset(&mut self) {
        self.events.borrow_mut().push(UiEvent::Reset);
    }

    fn commit_string(&mut self, text: &str) {
        self.events.borrow_mut().push(UiEvent::Commit(text.to_string()));
    }

    fn update(&mut self, state_json: &str) {
        self.events
            .borrow_mut()
            .push(UiEvent::Update(state_json.to_string()));
    }
}

pub(super) fn make_controller(settings: Settings) -> (InputController<RecordingUi>, RecordingUi) {
    let ui = RecordingUi::default();
    let controller = InputController::new(ui.clone(), make_test_tables(), settings);
    (controller, ui)
}
