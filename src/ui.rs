use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::{
    Component, EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext,
};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::components::{
    EntryDetailProps, EntryDetailView, EntryList, EntryListProps, SearchBar, SearchBarProps,
};
use crate::sprite_backend::SharedSpriteSlot;
use crate::state::AppState;

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CatalogComponentId {
    List,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogContext {
    List,
    Search,
    Detail,
}

impl EventRoutingState<CatalogComponentId, CatalogContext> for AppState {
    fn focused(&self) -> Option<CatalogComponentId> {
        if self.search.active {
            Some(CatalogComponentId::Search)
        } else if self.detail.is_some() {
            Some(CatalogComponentId::Detail)
        } else {
            Some(CatalogComponentId::List)
        }
    }

    fn modal(&self) -> Option<CatalogComponentId> {
        if self.search.active {
            Some(CatalogComponentId::Search)
        } else if self.detail.is_some() {
            Some(CatalogComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: CatalogComponentId) -> CatalogContext {
        match id {
            CatalogComponentId::List => CatalogContext::List,
            CatalogComponentId::Search => CatalogContext::Search,
            CatalogComponentId::Detail => CatalogContext::Detail,
        }
    }

    fn default_context(&self) -> CatalogContext {
        CatalogContext::List
    }
}

pub fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(ACCENT_TEAL)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

/// Screen regions from the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub struct CatalogUi {
    entry_list: EntryList,
    search_bar: SearchBar,
    detail: EntryDetailView,
    status_bar: StatusBar,
}

impl Default for CatalogUi {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogUi {
    pub fn new() -> Self {
        Self {
            entry_list: EntryList::new(),
            search_bar: SearchBar,
            detail: EntryDetailView::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn with_sprite_slot(mut self, slot: SharedSpriteSlot) -> Self {
        self.detail = self.detail.with_sprite_slot(slot);
        self
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<CatalogComponentId>,
    ) {
        let layout = self.render_app(frame, area, state);
        if state.search.active {
            event_ctx.set_component_area(CatalogComponentId::Search, layout.header);
        }
        if state.detail.is_some() {
            event_ctx.set_component_area(CatalogComponentId::Detail, layout.body);
        } else {
            event_ctx.set_component_area(CatalogComponentId::List, layout.body);
        }
    }

    /// Draws one frame: search header, then the list or the open detail screen, then hints.
    pub fn render_app(&mut self, frame: &mut Frame, area: Rect, state: &AppState) -> AppLayout {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);
        let layout = AppLayout {
            header: chunks[0],
            body: chunks[1],
            footer: chunks[2],
        };

        self.search_bar.render(
            frame,
            layout.header,
            SearchBarProps {
                state,
                is_focused: state.search.active,
            },
        );
        if state.detail.is_some() {
            self.detail.render(
                frame,
                layout.body,
                EntryDetailProps {
                    state,
                    is_focused: true,
                },
            );
        } else {
            self.detail.clear_sprite();
            self.entry_list.render(
                frame,
                layout.body,
                EntryListProps {
                    state,
                    is_focused: !state.search.active,
                },
            );
        }
        self.render_footer(frame, layout.footer, state);
        layout
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .entry_list
            .handle_event(
                event,
                EntryListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .search_bar
            .handle_event(
                event,
                SearchBarProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .detail
            .handle_event(
                event,
                EntryDetailProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = status_text(state);
        let hints = status_hints(state);
        let status_items = [StatusBarItem::span(Span::styled(
            status.as_str(),
            Style::default().fg(ACCENT_GOLD),
        ))];
        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };
        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn status_text(state: &AppState) -> String {
    if state.list_loading {
        return "Loading catalog...".to_string();
    }
    match state.detail.as_ref() {
        Some(screen) if screen.is_loading() => "Loading entry...".to_string(),
        Some(screen) if screen.is_failed() => "Entry unavailable".to_string(),
        Some(screen) if screen.sprite_loading || screen.description_loading => {
            "Loading details...".to_string()
        }
        Some(_) => String::new(),
        None => format!("{} entries", state.row_count()),
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    if state.detail.is_some() {
        let toggle = state
            .detail
            .as_ref()
            .and_then(|screen| screen.loaded())
            .map(|detail| detail.catch_label())
            .unwrap_or("Catch!");
        return vec![
            StatusBarHint::new("Space", toggle),
            StatusBarHint::new("Esc", "Back"),
            StatusBarHint::new("q", "Quit"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("PgUp/PgDn", "Page"),
        StatusBarHint::new("Enter", "Open"),
        StatusBarHint::new("/", "Search"),
    ];
    if !state.search.query.is_empty() {
        hints.push(StatusBarHint::new("Esc", "Clear"));
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}
