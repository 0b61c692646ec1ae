//! Store flows driven through EffectStoreTestHarness: list load, search,
//! opening a detail screen and toggling the caught flag.

use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EffectStore};
use pokedex::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    sprite::SpriteData,
    state::{AppState, Entry, EntryDetail},
};

const BASE: &str = "https://pokeapi.co/api/v2/pokemon";

fn entries() -> Vec<Entry> {
    ["Bulbasaur", "Ivysaur", "Pidgey", "Pidgeotto", "Pikachu"]
        .iter()
        .enumerate()
        .map(|(idx, name)| Entry {
            display_name: name.to_string(),
            detail_url: format!("{BASE}/{}/", idx + 1),
        })
        .collect()
}

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    state.catalog.set_full_collection(entries());
    state
}

fn squirtle(caught: bool) -> EntryDetail {
    EntryDetail {
        id: 7,
        name: "squirtle".into(),
        primary_type: Some("water".into()),
        secondary_type: None,
        sprite_url: Some("https://img.example/7.png".into()),
        description: None,
        caught,
    }
}

#[test]
fn init_requests_the_list() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.list_loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchList));

    harness.complete_action(Action::ListDidLoad(entries()));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));
    harness.assert_state(|s| !s.list_loading && s.row_count() == 5);
}

#[test]
fn list_error_leaves_no_rows() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::Init);
    let result = store.dispatch(Action::ListDidError("connection refused".into()));
    assert!(result.changed);
    assert_eq!(store.state().row_count(), 0);
    assert!(!store.state().list_loading);
}

#[test]
fn typing_filters_by_prefix_and_resets_selection() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntrySelect(3));
    harness.assert_state(|s| s.selected_index == 3);

    let results = harness.dispatch_all([
        Action::SearchStart,
        Action::SearchInput('P'),
        Action::SearchInput('i'),
        Action::SearchInput('d'),
    ]);
    assert_eq!(results, vec![true, true, true, true]);
    harness.assert_state(|s| s.selected_index == 0);
    harness.assert_state(|s| {
        let names: Vec<&str> = s
            .catalog
            .rows()
            .map(|entry| entry.display_name.as_str())
            .collect();
        names == ["Pidgey", "Pidgeotto"]
    });

    harness.dispatch_collect(Action::SearchBackspace);
    harness.assert_state(|s| s.row_count() == 3);
}

#[test]
fn search_with_no_match_is_empty_and_cancel_restores() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_all([Action::SearchStart, Action::SearchInput('z')]);
    harness.assert_state(|s| s.row_count() == 0 && s.selected_entry().is_none());

    harness.dispatch_collect(Action::SearchCancel);
    harness.assert_state(|s| s.row_count() == 5 && s.search.query.is_empty());
}

#[test]
fn submit_keeps_the_filter() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_all([
        Action::SearchStart,
        Action::SearchInput('b'),
        Action::SearchSubmit,
    ]);
    harness.assert_state(|s| !s.search.active && s.row_count() == 1);
}

#[test]
fn opening_a_row_fetches_its_detail_url() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntryOpen(1));
    harness.assert_state(|s| {
        s.detail
            .as_ref()
            .is_some_and(|screen| screen.is_loading() && screen.url == format!("{BASE}/2/"))
    });
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchDetail { url } if url == &format!("{BASE}/2/")),
    );
}

#[test]
fn detail_load_fans_out_description_and_sprite() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntryOpen(0));
    harness.drain_effects();

    harness.dispatch_collect(Action::DetailDidLoad {
        url: format!("{BASE}/1/"),
        detail: squirtle(false),
    });
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchDescription { id: 7 }));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::FetchSprite { id: 7, .. })));

    // sprite lands before the description; both apply
    harness.complete_action(Action::SpriteDidLoad {
        id: 7,
        sprite: SpriteData {
            payload: "AAAA".into(),
            width: 96,
            height: 96,
        },
    });
    harness.complete_action(Action::DescriptionDidLoad {
        id: 7,
        description: Some("A tiny turtle.".into()),
    });
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 2);
    harness.assert_state(|s| {
        let screen = s.detail.as_ref().unwrap();
        screen.sprite.is_some()
            && !screen.sprite_loading
            && !screen.description_loading
            && screen.loaded().unwrap().description.as_deref() == Some("A tiny turtle.")
    });
}

#[test]
fn detail_without_sprite_only_fetches_description() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntryOpen(0));
    harness.drain_effects();
    let mut detail = squirtle(false);
    detail.sprite_url = None;
    harness.dispatch_collect(Action::DetailDidLoad {
        url: format!("{BASE}/1/"),
        detail,
    });
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_none_match(|e| matches!(e, Effect::FetchSprite { .. }));
}

#[test]
fn detail_error_is_failed_without_follow_ups() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntryOpen(0));
    harness.drain_effects();
    harness.dispatch_collect(Action::DetailDidError {
        url: format!("{BASE}/1/"),
        error: "404".into(),
    });
    harness.assert_state(|s| s.detail.as_ref().is_some_and(|screen| screen.is_failed()));
    harness.drain_effects().effects_empty();
    // nothing to toggle on a failed screen
    harness.dispatch_collect(Action::ToggleCaught);
    harness.drain_effects().effects_empty();
}

#[test]
fn results_for_a_closed_screen_are_dropped() {
    let mut store = EffectStore::new(loaded_state(), reducer);
    store.dispatch(Action::EntryOpen(0));
    store.dispatch(Action::DetailClose);
    assert!(store.state().detail.is_none());

    let result = store.dispatch(Action::DetailDidLoad {
        url: format!("{BASE}/1/"),
        detail: squirtle(false),
    });
    assert!(!result.changed);
    assert!(result.effects.is_empty());
    assert!(store.state().detail.is_none());
}

#[test]
fn stale_sprite_from_previous_entry_is_ignored() {
    let mut store = EffectStore::new(loaded_state(), reducer);
    store.dispatch(Action::EntryOpen(0));
    store.dispatch(Action::DetailDidLoad {
        url: format!("{BASE}/1/"),
        detail: squirtle(false),
    });
    let result = store.dispatch(Action::SpriteDidLoad {
        id: 25,
        sprite: SpriteData {
            payload: "BBBB".into(),
            width: 1,
            height: 1,
        },
    });
    assert!(!result.changed);
    assert!(store.state().detail.as_ref().unwrap().sprite.is_none());
}

#[test]
fn close_keeps_list_selection() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_all([Action::EntryOpen(4), Action::DetailClose]);
    harness.assert_state(|s| s.detail.is_none() && s.selected_index == 4);
}

#[test]
fn toggle_flips_label_and_persists_padded_key() {
    let mut harness = EffectStoreTestHarness::new(loaded_state(), reducer);
    harness.dispatch_collect(Action::EntryOpen(0));
    harness.dispatch_collect(Action::DetailDidLoad {
        url: format!("{BASE}/1/"),
        detail: squirtle(false),
    });
    harness.drain_effects();

    harness.dispatch_collect(Action::ToggleCaught);
    harness.assert_state(|s| {
        s.detail
            .as_ref()
            .and_then(|screen| screen.loaded())
            .is_some_and(|d| d.caught && d.catch_label() == "Release")
    });
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        e == &Effect::SaveCaught {
            key: "#007".into(),
            caught: true,
        }
    });

    harness.dispatch_collect(Action::ToggleCaught);
    harness.assert_state(|s| {
        s.detail
            .as_ref()
            .and_then(|screen| screen.loaded())
            .is_some_and(|d| !d.caught && d.catch_label() == "Catch!")
    });
    harness.drain_effects().effects_first_matches(|e| {
        matches!(e, Effect::SaveCaught { key, caught: false } if key == "#007")
    });
}

#[test]
fn selection_is_clamped_to_rows() {
    let mut store = EffectStore::new(loaded_state(), reducer);
    store.dispatch(Action::SelectionMove(10));
    assert_eq!(store.state().selected_index, 4);
    store.dispatch(Action::SelectionMove(-10));
    assert_eq!(store.state().selected_index, 0);
    assert!(!store.dispatch(Action::SelectionMove(-1)).changed);
}

#[test]
fn detail_data_resource_starts_loading() {
    let mut store = EffectStore::new(loaded_state(), reducer);
    store.dispatch(Action::EntryOpen(2));
    let screen = store.state().detail.as_ref().unwrap();
    assert!(matches!(screen.detail, DataResource::Loading));
}
