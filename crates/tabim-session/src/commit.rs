use tabim_core::table::SymbolNode;
use tracing::debug;

use super::states::{self, inputting};
use super::types::{
    CandidateItem, InputState, InputtingKind, InputtingState, KeyContext, KeyResponse, MenuAction,
    Transition,
};

/// Commit or navigate for the chosen item. RETURN, SPACE, selection keys
/// and pointer selection all come through here.
pub(crate) fn handle_candidate(
    ctx: &KeyContext,
    state: &InputtingState,
    item: &CandidateItem,
    chain: bool,
    resp: &mut KeyResponse,
) {
    match item {
        CandidateItem::Menu { action, .. } => resolve_action(ctx, state, *action, resp),
        CandidateItem::Commit(candidate) => commit_text(ctx, &candidate.display_text, chain, resp),
    }
}

/// Commit `text`, then chain associated phrases or the reverse-lookup tooltip.
pub(crate) fn commit_text(ctx: &KeyContext, text: &str, chain: bool, resp: &mut KeyResponse) {
    debug!(text, "commit");
    resp.push(Transition::Replace(InputState::committing(text)));
    if !chain {
        return;
    }

    let tooltip = states::reverse_lookup_tooltip(ctx, text);
    if ctx.settings.associated_phrases_enabled {
        let phrases = ctx.tables.look_up_for_associated_phrases(text);
        if !phrases.is_empty() {
            let next = states::associated_phrases(phrases, tooltip);
            resp.push(Transition::Replace(inputting(next)));
            return;
        }
    }
    if let Some(tooltip) = tooltip {
        resp.push(Transition::Replace(InputState::TooltipOnly { tooltip }));
    }
}

fn resolve_action(
    ctx: &KeyContext,
    state: &InputtingState,
    action: MenuAction,
    resp: &mut KeyResponse,
) {
    debug!(?action, "menu action");
    match action {
        MenuAction::ToggleSetting(key) => {
            let settings = ctx.settings.toggled(key);
            let selected = state
                .candidates
                .iter()
                .position(|item| item.action() == Some(action))
                .unwrap_or(0);
            let next = match state.kind {
                InputtingKind::Menu => states::root_menu(&settings, selected),
                _ => states::settings_menu(&settings, selected),
            };
            resp.settings = Some(settings);
            resp.push(Transition::Replace(inputting(next)));
        }
        MenuAction::OpenSettings => {
            let next = states::settings_menu(ctx.settings, 0);
            resp.push(Transition::Descend(inputting(next)));
        }
        MenuAction::OpenCategory(source) => {
            let next = states::category(ctx, source);
            resp.push(Transition::Descend(inputting(next)));
        }
        MenuAction::EnterCategory(index) => {
            let child = match &state.kind {
                InputtingKind::SymbolCategory { nodes } => match nodes.get(index) {
                    Some(SymbolNode::Category(c)) => Some(c),
                    _ => None,
                },
                _ => None,
            };
            match child {
                Some(c) => {
                    let next = states::symbol_category(&c.name, c.nodes.clone());
                    resp.push(Transition::Descend(inputting(next)));
                }
                None => resp.error = true,
            }
        }
    }
}
