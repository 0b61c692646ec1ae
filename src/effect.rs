use std::sync::Arc;

use tui_dispatch::{EffectContext, TaskKey};

use crate::action::Action;
use crate::api::PokeApi;
use crate::prefs::{PreferenceStore, PrefsError};
use crate::sprite;
use crate::state::EntryDetail;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchList,
    FetchDetail { url: String },
    FetchDescription { id: u32 },
    FetchSprite { id: u32, url: String },
    /// Written synchronously by the effect handler.
    SaveCaught { key: String, caught: bool },
}

/// Runs effects against the API client and the preference store.
#[derive(Clone)]
pub struct EffectHandler {
    api: PokeApi,
    prefs: Arc<dyn PreferenceStore>,
}

impl EffectHandler {
    pub fn new(api: PokeApi, prefs: Arc<dyn PreferenceStore>) -> Self {
        Self { api, prefs }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FetchList => {
                let api = self.api.clone();
                ctx.tasks().spawn(TaskKey::new("list"), async move {
                    match api.fetch_list().await {
                        Ok(entries) => Action::ListDidLoad(entries),
                        Err(error) => Action::ListDidError(error.to_string()),
                    }
                });
            }
            Effect::FetchDetail { url } => {
                let api = self.api.clone();
                let prefs = Arc::clone(&self.prefs);
                ctx.tasks().spawn(TaskKey::new("detail"), async move {
                    match api.fetch_detail(&url).await {
                        Ok(detail) => Action::DetailDidLoad {
                            url,
                            detail: with_caught(detail, prefs.as_ref()),
                        },
                        Err(error) => Action::DetailDidError {
                            url,
                            error: error.to_string(),
                        },
                    }
                });
            }
            Effect::FetchDescription { id } => {
                let api = self.api.clone();
                ctx.tasks().spawn(TaskKey::new("description"), async move {
                    match api.fetch_description(id).await {
                        Ok(description) => Action::DescriptionDidLoad { id, description },
                        Err(error) => Action::DescriptionDidError {
                            id,
                            error: error.to_string(),
                        },
                    }
                });
            }
            Effect::FetchSprite { id, url } => {
                let api = self.api.clone();
                ctx.tasks().spawn(TaskKey::new("sprite"), async move {
                    let bytes = match api.fetch_image(&url).await {
                        Ok(bytes) => bytes,
                        Err(error) => {
                            return Action::SpriteDidError {
                                id,
                                error: error.to_string(),
                            }
                        }
                    };
                    match sprite::decode_sprite(&bytes) {
                        Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                        Err(error) => Action::SpriteDidError {
                            id,
                            error: error.to_string(),
                        },
                    }
                });
            }
            Effect::SaveCaught { key, caught } => {
                if let Err(error) = save_caught(self.prefs.as_ref(), &key, caught) {
                    tracing::error!(%key, %error, "could not persist caught flag");
                }
            }
        }
    }
}

/// Fills in the stored caught flag for a freshly fetched record.
pub fn with_caught(mut detail: EntryDetail, prefs: &dyn PreferenceStore) -> EntryDetail {
    detail.caught = prefs.get(&detail.display_number());
    detail
}

pub fn save_caught(prefs: &dyn PreferenceStore, key: &str, caught: bool) -> Result<(), PrefsError> {
    prefs.set(key, caught)?;
    tracing::debug!(key, caught, "caught flag saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;

    fn squirtle() -> EntryDetail {
        EntryDetail {
            id: 7,
            name: "squirtle".into(),
            primary_type: Some("water".into()),
            ..Default::default()
        }
    }

    #[test]
    fn stored_flag_is_read_on_open() {
        let prefs = MemoryPreferenceStore::default();
        prefs.set("#007", true).unwrap();
        let detail = with_caught(squirtle(), &prefs);
        assert!(detail.caught);
        assert_eq!(detail.catch_label(), "Release");
    }

    #[test]
    fn unset_flag_reads_as_not_caught() {
        let prefs = MemoryPreferenceStore::default();
        prefs.set("#070", true).unwrap();
        let mut stale = squirtle();
        stale.caught = true;
        let detail = with_caught(stale, &prefs);
        assert!(!detail.caught);
        assert_eq!(detail.catch_label(), "Catch!");
    }

    #[test]
    fn save_caught_writes_through() {
        let prefs = MemoryPreferenceStore::default();
        save_caught(&prefs, "#025", true).unwrap();
        assert!(prefs.get("#025"));
        save_caught(&prefs, "#025", false).unwrap();
        assert!(!prefs.get("#025"));
    }
}
