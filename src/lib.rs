//! Radical-table input method engine.
//!
//! Re-exports the table model (`tabim_core`) and the composition state
//! machine (`tabim_session`) behind one crate for hosts.

pub use tabim_core;
pub use tabim_session;

pub use tabim_core::convert::{CharMapConverter, IdentityConverter, ScriptConverter};
pub use tabim_core::table::{TableManager, TableWrapper};
pub use tabim_core::{Candidate, Key, KeyName, SettingKey, Settings};
pub use tabim_session::{InputController, InputState, InputUi, InputUiState, KeyHandler};

mod trace_init;

pub use trace_init::{init_tracing, DEFAULT_TRACE_FILTER};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CommitLog(Vec<String>);

    impl InputUi for CommitLog {
        fn reset(&mut self) {}

        fn commit_string(&mut self, text: &str) {
            self.0.push(text.to_string());
        }

        fn update(&mut self, _state_json: &str) {}
    }

    const TABLE_JSON: &str = r#"{
        "cname": "倉頡",
        "selkey": "1234567890",
        "keynames": { "a": "日", "b": "月" },
        "chardefs": { "a": ["日", "曰"], "ab": ["明"] }
    }"#;

    #[test]
    fn commits_through_the_facade() {
        let table =
            TableWrapper::from_json("cj", TABLE_JSON, tabim_core::table::TableSettings::default())
                .unwrap();
        let mut tables = TableManager::new();
        tables.add_table(table);

        let mut controller = InputController::new(CommitLog::default(), tables, Settings::default());
        for c in ['a', 'b', '1', 'a'] {
            assert!(controller.handle(&Key::ascii(c)));
        }
        assert!(controller.handle(&Key::named(KeyName::Space)));
        assert_eq!(controller.ui().0, ["明", "日"]);
        assert!(controller.state().is_empty());
    }
}
