//! Radical-table data model shared by the composition session.
//!
//! Keys, candidates, settings, and the table manager live here; the state
//! machine that consumes them is in `tabim-session`.

pub mod candidate;
pub mod convert;
pub mod key;
pub mod settings;
pub mod table;

pub use candidate::Candidate;
pub use key::{Key, KeyName};
pub use settings::{SettingKey, Settings};
