//! Whole-screen renders through CatalogUi, plus key handling routed through
//! the components and back into the store.

use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};
use pokedex::{
    action::Action,
    components::{Component, EntryList, EntryListProps, SearchBar, SearchBarProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, DetailScreen, Entry, EntryDetail},
    ui::CatalogUi,
};

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    state.catalog.set_full_collection(
        ["Bulbasaur", "Charmander", "Squirtle"]
            .iter()
            .enumerate()
            .map(|(idx, name)| Entry {
                display_name: name.to_string(),
                detail_url: format!("https://pokeapi.co/api/v2/pokemon/{}/", idx + 1),
            })
            .collect(),
    );
    state
}

fn with_detail(detail: DataResource<EntryDetail>) -> AppState {
    let mut screen = DetailScreen::loading("https://pokeapi.co/api/v2/pokemon/6/");
    screen.detail = detail;
    AppState {
        detail: Some(screen),
        ..loaded_state()
    }
}

fn charizard() -> EntryDetail {
    EntryDetail {
        id: 6,
        name: "charizard".into(),
        primary_type: Some("fire".into()),
        secondary_type: Some("flying".into()),
        sprite_url: None,
        description: Some("Spits fire that is hot enough to melt boulders.".into()),
        caught: false,
    }
}

#[test]
fn list_screen_shows_rows_and_hints() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    let mut ui = CatalogUi::new();
    let output = harness.render_plain(100, 16, |frame, area, state| {
        ui.render_app(frame, area, state);
    });
    assert!(output.contains("Bulbasaur"), "rows missing:\n{output}");
    assert!(output.contains("Squirtle"), "rows missing:\n{output}");
    assert!(output.contains("3 entries"), "status missing:\n{output}");
    assert!(output.contains("Open"), "hints missing:\n{output}");
}

#[test]
fn loading_list_shows_placeholder() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    let mut ui = CatalogUi::new();
    let output = harness.render_plain(60, 16, |frame, area, state| {
        ui.render_app(frame, area, state);
    });
    assert!(output.contains("Loading..."), "placeholder missing:\n{output}");
}

#[test]
fn detail_screen_shows_both_types_and_catch() {
    let state = with_detail(DataResource::Loaded(charizard()));
    let mut render = RenderHarness::new(80, 18);
    let mut ui = CatalogUi::new();
    let output = render.render_to_string_plain(|frame| {
        ui.render_app(frame, frame.area(), &state);
    });
    assert!(output.contains("#006"), "number missing:\n{output}");
    assert!(output.contains("fire"), "primary type missing:\n{output}");
    assert!(output.contains("flying"), "secondary type missing:\n{output}");
    assert!(output.contains("[ Catch! ]"), "toggle missing:\n{output}");
    assert!(!output.contains("Bulbasaur"), "list should be hidden:\n{output}");
}

#[test]
fn single_type_leaves_secondary_blank() {
    let mut detail = charizard();
    detail.secondary_type = None;
    let state = with_detail(DataResource::Loaded(detail));
    let mut render = RenderHarness::new(80, 18);
    let mut ui = CatalogUi::new();
    let output = render.render_to_string_plain(|frame| {
        ui.render_app(frame, frame.area(), &state);
    });
    assert!(output.contains("fire"));
    assert!(!output.contains("flying"));
}

#[test]
fn loading_detail_has_no_toggle() {
    let state = with_detail(DataResource::Loading);
    let mut render = RenderHarness::new(80, 18);
    let mut ui = CatalogUi::new();
    let output = render.render_to_string_plain(|frame| {
        ui.render_app(frame, frame.area(), &state);
    });
    assert!(output.contains("Loading entry..."), "status missing:\n{output}");
    assert!(!output.contains("[ Catch! ]"));
}

#[test]
fn enter_key_opens_detail_through_store() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    let mut list = EntryList::new();

    let actions =
        harness.send_keys_dispatch::<NumericComponentId, _, _>("j enter", |state, event| {
            let props = EntryListProps {
                state,
                is_focused: true,
            };
            list.handle_event(&event.kind, props)
                .into_iter()
                .collect::<Vec<_>>()
        });
    assert!(actions.contains(&Action::EntryOpen(1)), "{actions:?}");
    harness.assert_state(|s| s.selected_index == 1 && s.detail.is_some());

    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| {
        matches!(e, Effect::FetchDetail { url } if url.ends_with("/pokemon/2/"))
    });
}

#[test]
fn esc_clears_an_applied_filter() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_all([
        Action::SearchStart,
        Action::SearchInput('s'),
        Action::SearchSubmit,
    ]);
    harness.assert_state(|s| !s.search.active && s.row_count() == 1);

    let mut list = EntryList::new();
    let actions = harness.send_keys_dispatch::<NumericComponentId, _, _>("esc", |state, event| {
        let props = EntryListProps {
            state,
            is_focused: true,
        };
        list.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::SearchCancel);
    harness.assert_state(|s| s.search.query.is_empty() && s.row_count() == 3);
}

#[test]
fn typed_search_keys_filter_the_list() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::SearchStart);
    let mut search = SearchBar;

    for typed in ["c", "h"] {
        let actions = harness.send_keys::<NumericComponentId, _, _>(typed, |state, event| {
            let props = SearchBarProps {
                state,
                is_focused: true,
            };
            search
                .handle_event(&event.kind, props)
                .into_iter()
                .collect::<Vec<_>>()
        });
        for action in actions {
            harness.dispatch_collect(action);
        }
    }
    harness.assert_state(|s| s.search.query == "ch" && s.row_count() == 1);
}
