pub mod entry_detail;
pub mod entry_list;
pub mod search_bar;

pub use tui_dispatch::Component;

pub use entry_detail::{EntryDetailProps, EntryDetailView};
pub use entry_list::{EntryList, EntryListProps};
pub use search_bar::{SearchBar, SearchBarProps};
