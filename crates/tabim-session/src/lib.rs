//! Composition state machine for radical-table input.
//!
//! `KeyHandler` maps `(state, key)` to a `KeyResponse` describing the
//! transitions to apply; `InputController` owns the current state and the
//! ancestor stack, applies those transitions, and drives the host UI through
//! the `InputUi` trait.

pub mod types;

mod commit;
mod controller;
mod key_handlers;
mod response;
mod states;

#[cfg(test)]
mod tests;

pub use controller::{InputController, InputUi};
pub use key_handlers::KeyHandler;
pub use response::{
    CandidateWrapper, ComposingBufferText, InputUiState, InputUiStateBuilder, TextStyle,
};
pub use types::{
    CandidateItem, InputState, InputtingKind, InputtingState, KeyContext, KeyResponse, MenuAction,
    Transition,
};
