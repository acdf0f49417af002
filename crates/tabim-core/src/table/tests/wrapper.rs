use std::io::Write;

use super::{sample_wrapper, texts, SAMPLE_TABLE_JSON};
use crate::table::{RadicalTable, TableError, TableSettings, TableWrapper};

#[test]
fn test_table_metadata() {
    let wrapper = sample_wrapper();
    assert_eq!(wrapper.id(), "sample");
    assert_eq!(wrapper.table().display_name(), "測試倉頡");
    assert_eq!(wrapper.table().english_name(), Some("TestCJ"));
    assert_eq!(wrapper.table().selection_keys(), "1234567890");
    assert_eq!(wrapper.settings().max_radicals, 5);
    assert!(wrapper.table().is_input_key('a'));
    assert!(!wrapper.table().is_input_key('z'));
}

#[test]
fn test_entries_outside_keynames_are_dropped() {
    let wrapper = sample_wrapper();
    assert_eq!(wrapper.table().len(), 6);
    assert!(wrapper.table().candidates_for("a1").is_none());
}

#[test]
fn test_lookup_exact() {
    let wrapper = sample_wrapper();
    assert_eq!(texts(&wrapper.lookup_for_candidate("a")), ["日", "曰"]);
    assert_eq!(texts(&wrapper.lookup_for_candidate("ab")), ["明", "昍"]);
    assert!(wrapper.lookup_for_candidate("cc").is_empty());
    assert!(wrapper.lookup_for_candidate("").is_empty());
}

#[test]
fn test_lookup_is_deterministic() {
    let wrapper = sample_wrapper();
    assert_eq!(
        wrapper.lookup_for_candidate("a*"),
        wrapper.lookup_for_candidate("a*")
    );
}

#[test]
fn test_wildcard_follows_table_order() {
    let wrapper = sample_wrapper();
    assert_eq!(
        texts(&wrapper.lookup_for_candidate("a*")),
        ["昌", "日", "明", "昍", "暗"]
    );
    assert_eq!(texts(&wrapper.lookup_for_candidate("*b")), ["明", "昍"]);
    assert_eq!(texts(&wrapper.lookup_for_candidate("a**")), ["盟"]);
    assert_eq!(texts(&wrapper.lookup_for_candidate("*")), ["日", "曰", "月"]);
}

#[test]
fn test_wildcard_escapes_metacharacters() {
    let wrapper = sample_wrapper();
    assert!(wrapper.lookup_for_candidate("a.*").is_empty());
    assert!(wrapper.lookup_for_candidate("(*").is_empty());
}

#[test]
fn test_displayed_key_name() {
    let wrapper = sample_wrapper();
    assert_eq!(wrapper.look_up_for_displayed_key_name("a"), "日");
    assert_eq!(wrapper.look_up_for_displayed_key_name("z"), "z");
    assert_eq!(wrapper.look_up_for_displayed_key_name("ab"), "ab");
}

#[test]
fn test_reverse_lookup_sorted_by_length() {
    let wrapper = sample_wrapper();
    assert_eq!(wrapper.reverse_lookup_for_radicals("日"), ["日", "日日"]);
    assert_eq!(wrapper.reverse_lookup_for_radicals("盟"), ["日月金"]);
    assert!(wrapper.reverse_lookup_for_radicals("無").is_empty());
}

#[test]
fn test_reverse_lookup_pairs() {
    let wrapper = sample_wrapper();
    let pairs = wrapper.reverse_lookup_for_translated_and_original_radicals("日");
    assert_eq!(
        pairs,
        vec![
            ("日".to_string(), "a".to_string()),
            ("日日".to_string(), "aa".to_string())
        ]
    );
}

#[test]
fn test_replace_table_rebuilds_reverse_index() {
    let mut wrapper = sample_wrapper();
    assert_eq!(wrapper.reverse_lookup_for_radicals("月"), ["月"]);

    let table = RadicalTable::new(
        "新表",
        [('x', "木".to_string())],
        [("xx".to_string(), vec!["月".to_string()])],
        None,
    );
    wrapper.replace_table(table);
    assert_eq!(wrapper.reverse_lookup_for_radicals("月"), ["木木"]);
    assert!(wrapper.lookup_for_candidate("a").is_empty());
}

#[test]
fn test_missing_selkey_defaults() {
    let table = RadicalTable::new("t", [('q', "手".to_string())], no_entries(), Some(""));
    assert_eq!(table.selection_keys(), "1234567890");
    let table = RadicalTable::new("t", [('q', "手".to_string())], no_entries(), Some("asdfa"));
    assert_eq!(table.selection_keys(), "asdf");
}

#[test]
fn test_open_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_TABLE_JSON.as_bytes()).unwrap();
    let wrapper = TableWrapper::open("disk", file.path(), TableSettings { max_radicals: 3 }).unwrap();
    assert_eq!(wrapper.settings().max_radicals, 3);
    assert_eq!(texts(&wrapper.lookup_for_candidate("b")), ["月"]);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = TableWrapper::open("gone", &dir.path().join("none.json"), TableSettings::default());
    assert!(matches!(result, Err(TableError::Io(_))));
}

#[test]
fn test_invalid_json() {
    let result = TableWrapper::from_json("bad", "{not json", TableSettings::default());
    assert!(matches!(result, Err(TableError::Json(_))));
}

fn no_entries() -> Vec<(String, Vec<String>)> {
    Vec::new()
}
