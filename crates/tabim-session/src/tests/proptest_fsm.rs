//! Property-based tests for the composition state machine.
//!
//! Generates random key sequences via proptest and verifies that
//! structural invariants hold after every action.

use proptest::prelude::*;

use tabim_core::{Key, KeyName, Settings};

use super::{make_controller, RecordingUi, UiEvent};
use crate::types::{InputState, InputtingKind};
use crate::{InputController, InputUiState};

// ---------------------------------------------------------------------------
// Action enum: every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    TypeRadical(char),
    TypeDigit(char),
    TypeSymbolKey(char),
    ShiftPunctuation(char),
    ShiftLetter(char),
    CtrlSymbol(char),
    Named(KeyName),
    OpenMenu,
    /// Pointer selection of the n-th candidate on the page.
    Click(usize),
}

// ---------------------------------------------------------------------------
// Strategy: weighted random Action generation
// ---------------------------------------------------------------------------

fn arb_radical() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => Just('a'),
        2 => Just('b'),
        1 => prop::sample::select(vec!['c', 'd', 'z', '*', 'x']),
    ]
}

fn arb_named() -> impl Strategy<Value = KeyName> {
    prop::sample::select(vec![
        KeyName::Return,
        KeyName::Space,
        KeyName::Backspace,
        KeyName::Esc,
        KeyName::Up,
        KeyName::Down,
        KeyName::PageUp,
        KeyName::PageDown,
        KeyName::Left,
        KeyName::Tab,
    ])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        30 => arb_radical().prop_map(Action::TypeRadical),
        10 => prop::sample::select(vec!['1', '2', '3', '4', '0'])
            .prop_map(Action::TypeDigit),
        8 => prop::sample::select(vec!['`', 'c', 's', 'e', 'm'])
            .prop_map(Action::TypeSymbolKey),
        3 => prop::sample::select(vec!['!', '?', '@', '$'])
            .prop_map(Action::ShiftPunctuation),
        2 => prop::sample::select(vec!['A', 'B', 'C'])
            .prop_map(Action::ShiftLetter),
        4 => prop::sample::select(vec![',', '.', 'q', 'a', 'b', 'c', '2', '`'])
            .prop_map(Action::CtrlSymbol),
        25 => arb_named().prop_map(Action::Named),
        2 => Just(Action::OpenMenu),
        3 => (0usize..12).prop_map(Action::Click),
    ]
}

// ---------------------------------------------------------------------------
// Execute an Action against the controller
// ---------------------------------------------------------------------------

fn execute_action(controller: &mut InputController<RecordingUi>, action: &Action) {
    match action {
        Action::TypeRadical(c) | Action::TypeDigit(c) | Action::TypeSymbolKey(c) => {
            controller.handle(&Key::ascii(*c));
        }
        Action::ShiftPunctuation(c) | Action::ShiftLetter(c) => {
            controller.handle(&Key::ascii(*c).with_shift());
        }
        Action::CtrlSymbol(c) => {
            controller.handle(&Key::ascii(*c).with_ctrl());
        }
        Action::Named(name) => {
            controller.handle(&Key::named(*name));
        }
        Action::OpenMenu => {
            controller.handle(&Key::ascii('`').with_ctrl());
        }
        Action::Click(i) => controller.select_candidate_at_index(*i),
    }
}

// ---------------------------------------------------------------------------
// Invariant checks: run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(controller: &InputController<RecordingUi>, ui: &RecordingUi, action: &Action) {
    let state = controller.state();

    // 1. Committing is transient and never stored.
    assert!(
        !matches!(state, InputState::Committing { .. }),
        "Committing state stored after {action:?}",
    );

    // 2. Empty and tooltip states carry no ancestors.
    if !matches!(state, InputState::Inputting(_)) {
        assert_eq!(
            controller.ancestor_count(),
            0,
            "non-inputting state with ancestors after {action:?}",
        );
    }

    // 3. Escape always lands in Empty.
    if matches!(action, Action::Named(KeyName::Esc)) {
        assert!(state.is_empty(), "Escape left {state:?}");
    }

    if let InputState::Inputting(s) = state {
        // 4. Selection is in bounds exactly when there are candidates.
        match s.selected_candidate_index {
            Some(i) => assert!(
                i < s.candidates.len(),
                "selected {i} of {} after {action:?}",
                s.candidates.len(),
            ),
            None => assert!(
                s.candidates.is_empty(),
                "candidates without a selection after {action:?}",
            ),
        }

        // 5. Radical limits.
        match s.kind {
            InputtingKind::Basic => assert!(s.radicals.chars().count() <= 5),
            InputtingKind::Symbol => assert!(s.radicals.chars().count() <= 10),
            _ => assert!(s.radicals.is_empty()),
        }

        // 6. Paging stays consistent.
        if let (Some(page), Some(count)) = (s.candidate_page_index(), s.candidate_page_count()) {
            assert!(page < count, "page {page} of {count} after {action:?}");
        }
    }

    // 7. Committed text is never empty; every update is a valid UI state.
    for event in ui.take() {
        match event {
            UiEvent::Commit(text) => {
                assert!(!text.is_empty(), "empty commit after {action:?}")
            }
            UiEvent::Update(json) => {
                let parsed: Result<InputUiState, _> = serde_json::from_str(&json);
                assert!(parsed.is_ok(), "bad UI JSON {json} after {action:?}");
            }
            UiEvent::Reset => {}
        }
    }
}

/// Ctrl chords never touch a radical composition.
fn assert_ctrl_absorbed(before: &InputState, after: &InputState, action: &Action) {
    let composing = before
        .inputting()
        .is_some_and(|s| matches!(s.kind, InputtingKind::Basic | InputtingKind::Symbol));
    if composing && matches!(action, Action::CtrlSymbol(_) | Action::OpenMenu) {
        assert_eq!(before, after, "{action:?} changed the composition");
    }
}

fn run(settings: Settings, actions: &[Action]) {
    let (mut controller, ui) = make_controller(settings);
    for action in actions {
        let before = controller.state().clone();
        execute_action(&mut controller, action);
        assert_invariants(&controller, &ui, action);
        assert_ctrl_absorbed(&before, controller.state(), action);
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn controller_invariants_hold(actions in prop::collection::vec(arb_action(), 1..100)) {
        run(Settings::default(), &actions);
    }

    #[test]
    fn controller_invariants_with_all_features(
        actions in prop::collection::vec(arb_action(), 1..100)
    ) {
        let settings = Settings {
            associated_phrases_enabled: true,
            wildcard_matching_enabled: true,
            reverse_radical_lookup_enabled: true,
            beep_on_errors: true,
            ..Settings::default()
        };
        run(settings, &actions);
    }

    #[test]
    fn controller_invariants_with_clear_on_errors(
        actions in prop::collection::vec(arb_action(), 1..100)
    ) {
        let settings = Settings {
            clear_on_errors: true,
            associated_phrases_enabled: true,
            ..Settings::default()
        };
        run(settings, &actions);
    }
}
