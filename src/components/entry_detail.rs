use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::sprite::{kitty_sequence, sprite_fit};
use crate::sprite_backend::{SharedSpriteSlot, SPRITE_IMAGE_ID};
use crate::state::{catch_label, AppState, DetailScreen};
use crate::ui::{
    focus_border, ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};

const SPRITE_COLUMNS: u16 = 28;

pub struct EntryDetailProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Detail screen for the entry opened from the list.
#[derive(Default)]
pub struct EntryDetailView {
    sprite_slot: Option<SharedSpriteSlot>,
}

impl EntryDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw sprites through `slot` instead of as a text placeholder.
    pub fn with_sprite_slot(mut self, slot: SharedSpriteSlot) -> Self {
        self.sprite_slot = Some(slot);
        self
    }

    pub fn clear_sprite(&self) {
        self.place_sprite(None);
    }

    fn place_sprite(&self, placement: Option<(u16, u16, String)>) {
        let Some(slot) = self.sprite_slot.as_ref() else {
            return;
        };
        let Ok(mut slot) = slot.lock() else {
            tracing::warn!("sprite slot lock poisoned");
            return;
        };
        match placement {
            Some((x, y, sequence)) => slot.place(x, y, sequence),
            None => slot.clear(),
        }
    }

    fn render_sprite(&mut self, frame: &mut Frame, area: Rect, screen: &DetailScreen) {
        if let Some(sprite) = screen.sprite.as_ref() {
            if self.sprite_slot.is_some() {
                let (cols, rows) = sprite_fit(sprite, area.width, area.height);
                let x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
                let y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
                let sequence = kitty_sequence(sprite, cols, rows, SPRITE_IMAGE_ID);
                self.place_sprite(Some((x, y, sequence)));
                return;
            }
            let label = format!("[sprite {}x{}]", sprite.width, sprite.height);
            render_placeholder(frame, area, &label);
            return;
        }

        self.clear_sprite();
        let label = if screen.sprite_loading {
            "[loading sprite]"
        } else {
            "[no sprite]"
        };
        render_placeholder(frame, area, label);
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, label: &str) {
    let paragraph = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_DIM));
    frame.render_widget(paragraph, area);
}

fn field_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<8}"), Style::default().fg(TEXT_DIM)),
        Span::styled(value, Style::default().fg(TEXT_MAIN)),
    ])
}

/// Text fields of the detail screen; every field is blank until the record loads.
fn detail_text(screen: &DetailScreen) -> Text<'static> {
    let detail = screen.loaded();
    let name = detail.map(|d| d.name.clone()).unwrap_or_default();
    let number = detail.map(|d| d.display_number()).unwrap_or_default();
    let primary = detail
        .and_then(|d| d.primary_type.clone())
        .unwrap_or_default();
    let secondary = detail
        .and_then(|d| d.secondary_type.clone())
        .unwrap_or_default();
    let description = match detail.and_then(|d| d.description.clone()) {
        Some(text) => text,
        None if screen.description_loading => "...".to_string(),
        None => String::new(),
    };

    let mut lines = vec![
        field_line("Name", name),
        field_line("No.", number),
        Line::from(vec![
            Span::styled(format!("{:<8}", "Type"), Style::default().fg(TEXT_DIM)),
            Span::styled(primary, Style::default().fg(ACCENT_TEAL)),
            Span::raw("  "),
            Span::styled(secondary, Style::default().fg(ACCENT_TEAL)),
        ]),
        Line::default(),
    ];
    if let Some(detail) = detail {
        lines.push(Line::from(Span::styled(
            format!("[ {} ]", catch_label(detail.caught)),
            Style::default()
                .bg(BG_HIGHLIGHT)
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        description,
        Style::default().fg(TEXT_MAIN),
    )));
    Text::from(lines)
}

impl Component<Action> for EntryDetailView {
    type Props<'a> = EntryDetailProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.state.detail.is_none() {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    Some(Action::DetailClose)
                }
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('c') => {
                    Some(Action::ToggleCaught)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(screen) = props.state.detail.as_ref() else {
            self.clear_sprite();
            return;
        };
        let title = screen
            .loaded()
            .map(|detail| format!("{} {}", detail.display_number(), detail.name))
            .unwrap_or_else(|| "DETAIL".to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(focus_border(props.is_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if screen.is_loading() {
            self.clear_sprite();
            render_placeholder(frame, inner, "Loading...");
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SPRITE_COLUMNS), Constraint::Min(10)])
            .split(inner);

        if screen.is_failed() {
            self.clear_sprite();
        } else {
            self.render_sprite(frame, layout[0], screen);
        }
        let paragraph = Paragraph::new(detail_text(screen))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(TEXT_MAIN));
        frame.render_widget(paragraph, layout[1]);
    }
}
