mod wrapper;

use super::{TableSettings, TableWrapper};

/// A tiny Cangjie-style table: keys a/b/c, glyphs 日/月/金.
pub(super) const SAMPLE_TABLE_JSON: &str = r#"{
    "cname": "測試倉頡",
    "ename": "TestCJ",
    "selkey": "1234567890",
    "keynames": { "a": "日", "b": "月", "c": "金" },
    "chardefs": {
        "a": ["日", "曰"],
        "aa": ["昌", "日"],
        "ab": ["明", "昍"],
        "ac": ["暗"],
        "abc": ["盟"],
        "b": ["月"],
        "a1": ["壞"]
    },
    "dupsel": 10
}"#;

pub(super) fn sample_wrapper() -> TableWrapper {
    TableWrapper::from_json("sample", SAMPLE_TABLE_JSON, TableSettings::default()).unwrap()
}

pub(super) fn texts(candidates: &[crate::Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.display_text.as_str()).collect()
}
