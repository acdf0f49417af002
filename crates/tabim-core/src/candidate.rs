use serde::{Deserialize, Serialize};

/// A displayable lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub display_text: String,
    #[serde(default)]
    pub description: String,
}

impl Candidate {
    pub fn new(display_text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            display_text: display_text.into(),
            description: description.into(),
        }
    }

    /// Candidate with an empty description, as table lookups produce.
    pub fn plain(display_text: impl Into<String>) -> Self {
        Self::new(display_text, String::new())
    }
}

pub(crate) fn plain_candidates<'a>(texts: impl IntoIterator<Item = &'a String>) -> Vec<Candidate> {
    texts.into_iter().map(|t| Candidate::plain(t.as_str())).collect()
}
