use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::AppState;
use crate::ui::{focus_border, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};

pub struct SearchBarProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Header line with the title and the prefix filter being typed.
#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::SearchCancel),
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let search = &props.state.search;
        let query = if search.active {
            format!("/{}_", search.query)
        } else if search.query.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", search.query)
        };
        let query_style = if search.active {
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let line = Line::from(vec![
            Span::styled(
                "POKEDEX",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Search: "),
            Span::styled(query, query_style),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
