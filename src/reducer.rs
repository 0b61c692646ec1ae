use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.list_loading = true;
            DispatchResult::changed_with(Effect::FetchList)
        }

        Action::ListDidLoad(entries) => {
            tracing::info!(count = entries.len(), "catalog loaded");
            state.catalog.set_full_collection(entries);
            state.search.active = false;
            state.search.query.clear();
            state.selected_index = 0;
            state.list_loading = false;
            DispatchResult::changed()
        }

        Action::ListDidError(error) => {
            tracing::error!(%error, "catalog fetch failed");
            state.catalog.set_full_collection(Vec::new());
            state.selected_index = 0;
            state.list_loading = false;
            DispatchResult::changed()
        }

        Action::EntrySelect(index) => {
            if !state.set_selected_index(index) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => move_selection(state, delta as isize),

        Action::SelectionPage(delta) => {
            let page = list_page_size(state) as isize;
            move_selection(state, delta as isize * page)
        }

        Action::EntryOpen(index) => {
            if state.detail.is_some() {
                return DispatchResult::unchanged();
            }
            let Some(entry) = state.catalog.row(index) else {
                return DispatchResult::unchanged();
            };
            let url = entry.detail_url.clone();
            tracing::debug!(name = %entry.display_name, %url, "opening detail");
            state.set_selected_index(index);
            state.detail = Some(crate::state::DetailScreen::loading(url.clone()));
            DispatchResult::changed_with(Effect::FetchDetail { url })
        }

        Action::SearchStart => {
            if state.detail.is_some() {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.query.clear();
            state.refilter();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            state.refilter();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active || state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.refilter();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.refilter();
            DispatchResult::changed()
        }

        Action::DetailDidLoad { url, detail } => {
            let Some(screen) = state.detail_for_url(&url) else {
                tracing::debug!(%url, "dropping detail for closed screen");
                return DispatchResult::unchanged();
            };
            let mut effects = vec![Effect::FetchDescription { id: detail.id }];
            screen.description_loading = true;
            if let Some(sprite_url) = detail.sprite_url.clone() {
                screen.sprite_loading = true;
                effects.push(Effect::FetchSprite {
                    id: detail.id,
                    url: sprite_url,
                });
            }
            screen.detail = DataResource::Loaded(detail);
            DispatchResult::changed_with_many(effects)
        }

        Action::DetailDidError { url, error } => {
            let Some(screen) = state.detail_for_url(&url) else {
                return DispatchResult::unchanged();
            };
            tracing::error!(%url, %error, "detail fetch failed");
            screen.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DescriptionDidLoad { id, description } => {
            let Some(screen) = state.detail_for_id(id) else {
                tracing::debug!(id, "dropping description for closed screen");
                return DispatchResult::unchanged();
            };
            screen.description_loading = false;
            if let Some(detail) = screen.loaded_mut() {
                detail.description = description;
            }
            DispatchResult::changed()
        }

        Action::DescriptionDidError { id, error } => {
            let Some(screen) = state.detail_for_id(id) else {
                return DispatchResult::unchanged();
            };
            tracing::warn!(id, %error, "description fetch failed");
            screen.description_loading = false;
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { id, sprite } => {
            let Some(screen) = state.detail_for_id(id) else {
                tracing::debug!(id, "dropping sprite for closed screen");
                return DispatchResult::unchanged();
            };
            screen.sprite = Some(sprite);
            screen.sprite_loading = false;
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error } => {
            let Some(screen) = state.detail_for_id(id) else {
                return DispatchResult::unchanged();
            };
            tracing::warn!(id, %error, "sprite fetch failed");
            screen.sprite_loading = false;
            DispatchResult::changed()
        }

        Action::DetailClose => {
            if state.detail.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::ToggleCaught => {
            let Some(detail) = state.detail.as_mut().and_then(|screen| screen.loaded_mut())
            else {
                return DispatchResult::unchanged();
            };
            detail.caught = !detail.caught;
            tracing::info!(key = %detail.display_number(), caught = detail.caught, "caught toggled");
            DispatchResult::changed_with(Effect::SaveCaught {
                key: detail.display_number(),
                caught: detail.caught,
            })
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn move_selection(state: &mut AppState, delta: isize) -> DispatchResult<Effect> {
    let index = (state.selected_index as isize + delta).max(0) as usize;
    if !state.set_selected_index(index) {
        return DispatchResult::unchanged();
    }
    DispatchResult::changed()
}

/// Rows visible in the list panel, minus header, search and status chrome.
pub fn list_page_size(state: &AppState) -> usize {
    (state.terminal_size.1.saturating_sub(8) as usize).max(1)
}
