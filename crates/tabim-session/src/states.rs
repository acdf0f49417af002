//! Constructors for every inputting state the key handler can enter.

use tabim_core::table::{CategorySource, SymbolNode, TableWrapper};
use tabim_core::{Candidate, SettingKey, Settings};

use super::types::{
    CandidateItem, InputState, InputtingKind, InputtingState, KeyContext, MenuAction,
    ASSOCIATED_PHRASES_EXACT_KEYS, ASSOCIATED_PHRASES_SELECTION_KEYS, MENU_SELECTION_KEYS,
    SYMBOL_SELECTION_KEYS,
};

pub(crate) const SYMBOL_PREFIX: &str = "[符]";
pub(crate) const MENU_TITLE: &str = "功能選單";
pub(crate) const SETTINGS_TITLE: &str = "功能開關";

fn commit_items(candidates: Vec<Candidate>) -> Vec<CandidateItem> {
    candidates.into_iter().map(CandidateItem::Commit).collect()
}

fn checkbox(label: &str, on: bool) -> String {
    format!("{} {label}", if on { "■" } else { "□" })
}

/// Radicals typed into `table`, looked up and annotated.
pub(crate) fn basic(ctx: &KeyContext, table: &TableWrapper, radicals: &str) -> InputtingState {
    let displayed = radicals
        .chars()
        .map(|c| table.look_up_for_displayed_key_name(&c.to_string()))
        .collect();
    let candidates = commit_items(table.lookup_for_candidate(radicals));
    let state = InputtingState::new(
        InputtingKind::Basic,
        radicals,
        displayed,
        table.table().selection_keys(),
        candidates,
    );
    annotate(ctx, state)
}

/// Bopomofo readings of the selected candidate when reverse lookup is on.
pub(crate) fn annotate(ctx: &KeyContext, state: InputtingState) -> InputtingState {
    if state.kind != InputtingKind::Basic || !ctx.settings.reverse_radical_lookup_enabled {
        return state;
    }
    let annotation = state.selected_candidate().and_then(|item| {
        let readings = ctx
            .tables
            .lookup_bpmf_readings(&item.candidate().display_text);
        (!readings.is_empty()).then(|| {
            readings
                .into_iter()
                .map(|(translated, _)| translated)
                .collect::<Vec<_>>()
                .join(", ")
        })
    });
    state.with_annotation(annotation)
}

pub(crate) fn symbol(ctx: &KeyContext, radicals: &str) -> InputtingState {
    let displayed = std::iter::once(SYMBOL_PREFIX.to_string())
        .chain(radicals.chars().map(String::from))
        .collect();
    let candidates = if radicals.is_empty() {
        Vec::new()
    } else {
        ctx.tables
            .symbol_table()
            .lookup(radicals)
            .iter()
            .map(|s| CandidateItem::commit(s.as_str()))
            .collect()
    };
    InputtingState::new(
        InputtingKind::Symbol,
        radicals,
        displayed,
        SYMBOL_SELECTION_KEYS,
        candidates,
    )
}

pub(crate) fn associated_phrases(
    phrases: Vec<Candidate>,
    tooltip: Option<String>,
) -> InputtingState {
    InputtingState::new(
        InputtingKind::AssociatedPhrases {
            exact_selection_keys: ASSOCIATED_PHRASES_EXACT_KEYS.to_string(),
        },
        "",
        Vec::new(),
        ASSOCIATED_PHRASES_SELECTION_KEYS,
        commit_items(phrases),
    )
    .with_tooltip(tooltip)
}

/// One level of a symbol tree. Leaves commit; categories descend.
pub(crate) fn symbol_category(title: &str, nodes: Vec<SymbolNode>) -> InputtingState {
    let candidates = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| match node {
            SymbolNode::Symbol(s) => CandidateItem::commit(s.as_str()),
            SymbolNode::Category(c) => {
                CandidateItem::menu(c.name.as_str(), MenuAction::EnterCategory(i))
            }
        })
        .collect();
    InputtingState::new(
        InputtingKind::SymbolCategory { nodes },
        "",
        vec![title.to_string()],
        MENU_SELECTION_KEYS,
        candidates,
    )
}

/// A flat category listing each symbol of a shift or ctrl mapping.
pub(crate) fn flat_symbol_menu(title: &str, symbols: &[String]) -> InputtingState {
    let nodes = symbols.iter().cloned().map(SymbolNode::Symbol).collect();
    symbol_category(title, nodes)
}

pub(crate) fn category(ctx: &KeyContext, source: CategorySource) -> InputtingState {
    symbol_category(source.label(), ctx.tables.category_nodes(source))
}

pub(crate) fn settings_menu(settings: &Settings, selected: usize) -> InputtingState {
    let candidates = SettingKey::MENU_ORDER
        .iter()
        .map(|&key| {
            CandidateItem::menu(
                checkbox(key.label(), settings.get(key)),
                MenuAction::ToggleSetting(key),
            )
        })
        .collect();
    InputtingState::new(
        InputtingKind::Settings,
        "",
        vec![SETTINGS_TITLE.to_string()],
        MENU_SELECTION_KEYS,
        candidates,
    )
    .with_selected_candidate_index(selected)
}

pub(crate) fn root_menu(settings: &Settings, selected: usize) -> InputtingState {
    let conversion = SettingKey::ChineseConversion;
    let candidates = vec![
        CandidateItem::menu(
            checkbox(conversion.label(), settings.get(conversion)),
            MenuAction::ToggleSetting(conversion),
        ),
        CandidateItem::menu(SETTINGS_TITLE, MenuAction::OpenSettings),
        category_entry(CategorySource::CustomSymbols),
        category_entry(CategorySource::Bopomofo),
        category_entry(CategorySource::ForeignLanguage),
        category_entry(CategorySource::Emoji),
    ];
    InputtingState::new(
        InputtingKind::Menu,
        "",
        vec![MENU_TITLE.to_string()],
        MENU_SELECTION_KEYS,
        candidates,
    )
    .with_selected_candidate_index(selected)
}

fn category_entry(source: CategorySource) -> CandidateItem {
    CandidateItem::menu(source.label(), MenuAction::OpenCategory(source))
}

/// Radical spellings of `text` in the current table, for tooltips.
pub(crate) fn reverse_lookup_tooltip(ctx: &KeyContext, text: &str) -> Option<String> {
    if !ctx.settings.reverse_radical_lookup_enabled {
        return None;
    }
    let radicals = ctx.tables.current_table()?.reverse_lookup_for_radicals(text);
    (!radicals.is_empty()).then(|| radicals.join(", "))
}

pub(crate) fn inputting(state: InputtingState) -> InputState {
    InputState::Inputting(state)
}
