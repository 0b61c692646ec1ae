use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::Catalog;
use crate::sprite::SpriteData;

pub const CATCH_LABEL: &str = "Catch!";
pub const RELEASE_LABEL: &str = "Release";

/// One row of the main list: the capitalised name and the link to its detail record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub display_name: String,
    pub detail_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u32,
    pub name: String,
    pub primary_type: Option<String>,
    pub secondary_type: Option<String>,
    pub sprite_url: Option<String>,
    pub description: Option<String>,
    pub caught: bool,
}

impl EntryDetail {
    /// `#NNN`, also the preference key for the caught flag.
    pub fn display_number(&self) -> String {
        display_number(self.id)
    }

    pub fn catch_label(&self) -> &'static str {
        catch_label(self.caught)
    }
}

pub fn display_number(id: u32) -> String {
    format!("#{id:03}")
}

pub fn catch_label(caught: bool) -> &'static str {
    if caught {
        RELEASE_LABEL
    } else {
        CATCH_LABEL
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Everything the detail screen shows for the entry opened from the list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailScreen {
    pub url: String,
    pub detail: DataResource<EntryDetail>,
    pub sprite: Option<SpriteData>,
    pub description_loading: bool,
    pub sprite_loading: bool,
}

impl DetailScreen {
    pub fn loading(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detail: DataResource::Loading,
            sprite: None,
            description_loading: false,
            sprite_loading: false,
        }
    }

    pub fn loaded(&self) -> Option<&EntryDetail> {
        match &self.detail {
            DataResource::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut EntryDetail> {
        match &mut self.detail {
            DataResource::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.detail, DataResource::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.detail, DataResource::Failed(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub catalog: Catalog,
    pub selected_index: usize,
    pub search: SearchState,
    pub list_loading: bool,
    pub detail: Option<DetailScreen>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            terminal_size: (80, 24),
            catalog: Catalog::default(),
            selected_index: 0,
            search: SearchState::default(),
            list_loading: false,
            detail: None,
        }
    }
}

impl AppState {
    pub fn row_count(&self) -> usize {
        self.catalog.row_count()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.catalog.row(self.selected_index)
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.catalog.row_count() == 0 {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.catalog.row_count() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Re-filters the list for the current search query and moves the cursor to the top.
    pub fn refilter(&mut self) {
        self.catalog.apply_filter(&self.search.query);
        self.selected_index = 0;
    }

    /// The open detail screen, but only while it is still showing `url`.
    pub fn detail_for_url(&mut self, url: &str) -> Option<&mut DetailScreen> {
        self.detail.as_mut().filter(|screen| screen.url == url)
    }

    /// The open detail screen, but only once it has loaded the record with `id`.
    pub fn detail_for_id(&mut self, id: u32) -> Option<&mut DetailScreen> {
        self.detail
            .as_mut()
            .filter(|screen| screen.loaded().is_some_and(|detail| detail.id == id))
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let detail = self.detail.as_ref();
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.catalog.len()))
                .entry("rows", ron_string(&self.catalog.row_count()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("list_loading", ron_string(&self.list_loading)),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query)),
            DebugSection::new("Detail")
                .entry("url", ron_string(&detail.map(|screen| screen.url.clone())))
                .entry(
                    "number",
                    ron_string(
                        &detail
                            .and_then(|screen| screen.loaded())
                            .map(|entry| entry.display_number()),
                    ),
                )
                .entry(
                    "caught",
                    ron_string(
                        &detail
                            .and_then(|screen| screen.loaded())
                            .map(|entry| entry.caught),
                    ),
                )
                .entry(
                    "failed",
                    ron_string(&detail.map(|screen| screen.is_failed())),
                ),
        ]
    }
}
