use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{Entry, EntryDetail};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    ListDidLoad(Vec<Entry>),
    ListDidError(String),

    EntrySelect(usize),
    EntryOpen(usize),
    SelectionMove(i16),
    SelectionPage(i16),

    SearchStart,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,

    DetailDidLoad { url: String, detail: EntryDetail },
    DetailDidError { url: String, error: String },
    DescriptionDidLoad { id: u32, description: Option<String> },
    DescriptionDidError { id: u32, error: String },
    SpriteDidLoad { id: u32, sprite: SpriteData },
    SpriteDidError { id: u32, error: String },
    DetailClose,
    ToggleCaught,

    UiTerminalResize(u16, u16),
    Quit,
}
