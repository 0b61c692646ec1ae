use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;
use crate::ui::{focus_border, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};

pub struct EntryListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Scrollable list of the filtered catalog rows.
pub struct EntryList {
    list: SelectList,
}

impl Default for EntryList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }
}

fn entry_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .catalog
        .rows()
        .map(|entry| Line::from(entry.display_name.clone()))
        .collect()
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn list_behavior() -> SelectListBehavior {
    SelectListBehavior {
        show_scrollbar: true,
        wrap_navigation: false,
    }
}

impl Component<Action> for EntryList {
    type Props<'a> = EntryListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter if state.row_count() > 0 => {
                    vec![Action::EntryOpen(state.selected_index)]
                }
                KeyCode::Char('/') => vec![Action::SearchStart],
                KeyCode::Esc if !state.search.query.is_empty() => vec![Action::SearchCancel],
                KeyCode::PageDown => vec![Action::SelectionPage(1)],
                KeyCode::PageUp => vec![Action::SelectionPage(-1)],
                KeyCode::Home => vec![Action::EntrySelect(0)],
                KeyCode::End => vec![Action::EntrySelect(state.row_count().saturating_sub(1))],
                _ => {
                    let items = entry_items(state);
                    let list_props = SelectListProps {
                        items: &items,
                        count: items.len(),
                        selected: state.selected_index.min(items.len().saturating_sub(1)),
                        is_focused: true,
                        style: list_style(),
                        behavior: list_behavior(),
                        on_select: Action::EntrySelect,
                        render_item: &|item| item.clone(),
                    };
                    self.list
                        .handle_event(event, list_props)
                        .into_iter()
                        .collect()
                }
            },
            EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let title = format!("POKEDEX {}/{}", state.row_count(), state.catalog.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.list_loading || state.row_count() == 0 {
            let message = if state.list_loading {
                "Loading..."
            } else {
                "No entries."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            frame.render_widget(paragraph, inner);
            return;
        }

        let items = entry_items(state);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_index.min(items.len().saturating_sub(1)),
            is_focused: props.is_focused,
            style: list_style(),
            behavior: list_behavior(),
            on_select: Action::EntrySelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, inner, list_props);
    }
}
