//! # RoomList Component
//!
//! Category tabs over a scrollable column of room cards.
//!
//! ```text
//!  [all]  suite  villa  cabin            ←/→ change category
//! ┌ Ocean Suite · suite ──────────────┐
//! │ $250 / night · sleeps 2           │
//! │ https://cdn/rooms/ocean.jpg       │
//! │ Sea-facing suite with a priv…     │
//! └───────────────────────────────────┘
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RoomListState` lives in `TuiState`
//! - `RoomList` is created each frame with borrowed props and state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::api::Room;
use crate::core::images::ImageResolver;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const CARD_HEIGHT: u16 = 5;

/// Cards that fit in a scroll view no taller than `u16::MAX` rows.
const MAX_CARDS: usize = (u16::MAX / CARD_HEIGHT) as usize;

/// Rows needed for `count` cards; cards past `MAX_CARDS` are not laid out.
fn content_height(count: usize) -> u16 {
    let shown = u16::try_from(count.min(MAX_CARDS)).unwrap_or(u16::MAX);
    CARD_HEIGHT.saturating_mul(shown)
}

#[derive(Default)]
pub struct RoomListState {
    pub scroll_state: ScrollViewState,
}

impl RoomListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump back to the first card (after a category change).
    pub fn reset_scroll(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: 0 });
    }
}

impl EventHandler for RoomListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct RoomList<'a> {
    pub state: &'a mut RoomListState,
    pub categories: &'a [String],
    pub active_category: &'a str,
    pub rooms: &'a [&'a Room],
    pub images: &'a ImageResolver,
    pub notice: Option<Line<'static>>,
}

impl RoomList<'_> {
    fn tabs_line(&self) -> Line<'static> {
        let active = self.active_category.to_lowercase();
        let mut spans = Vec::new();
        for category in self.categories {
            let style = if *category == active {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {category} "), style));
            spans.push(Span::raw(" "));
        }
        if !self.categories.contains(&active) {
            // Selected programmatically; nothing matches it.
            spans.push(Span::styled(
                format!(" {active} (no rooms) "),
                Style::default().fg(Color::Red),
            ));
        }
        spans.push(Span::styled(
            "  ←/→ category",
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    }

    fn card(&self, room: &Room, width: u16) -> Paragraph<'static> {
        let inner = width.saturating_sub(2) as usize;
        let name = room.name.as_deref().unwrap_or("Unnamed room");
        let title = match room.kind.as_deref() {
            Some(kind) if !kind.is_empty() => format!(" {} · {} ", name, kind.to_lowercase()),
            _ => format!(" {name} "),
        };

        let mut facts = Vec::new();
        if let Some(price) = room.price {
            facts.push(format!("${price:.0} / night"));
        }
        if let Some(capacity) = room.capacity {
            facts.push(format!("sleeps {capacity}"));
        }
        if !room.amenities.is_empty() {
            facts.push(room.amenities.join(", "));
        }

        let lines = vec![
            Line::raw(truncate_to_width(&facts.join(" · "), inner)),
            Line::styled(
                truncate_to_width(&self.images.first(&room.images), inner),
                Style::default().fg(Color::DarkGray),
            ),
            Line::styled(
                truncate_to_width(room.description.as_deref().unwrap_or(""), inner),
                Style::default().fg(Color::Gray),
            ),
        ];

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    truncate_to_width(&title, inner),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
        )
    }
}

impl Component for RoomList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [tabs_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(self.tabs_line(), tabs_area);

        if let Some(notice) = self.notice.clone() {
            frame.render_widget(Paragraph::new(notice), list_area);
            return;
        }
        if self.rooms.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    format!("No rooms in '{}'.", self.active_category),
                    Style::default().fg(Color::DarkGray),
                )),
                list_area,
            );
            return;
        }

        let content_width = list_area.width.saturating_sub(1);
        let total_height = content_height(self.rooms.len());
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for room in self.rooms.iter().take(MAX_CARDS) {
            let rect = Rect::new(0, y, content_width, CARD_HEIGHT);
            scroll_view.render_widget(self.card(room, content_width), rect);
            y = y.saturating_add(CARD_HEIGHT);
        }

        frame.render_stateful_widget(scroll_view, list_area, &mut self.state.scroll_state);
    }
}

/// Clip `text` to `max` terminal columns, ending with "…" when clipped.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + ch.to_string().width() > max - 1 {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::images::DEFAULT_PLACEHOLDER;
    use crate::test_support::render_to_string;

    fn room(name: &str, kind: &str) -> Room {
        Room {
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            price: Some(250.0),
            capacity: Some(2),
            images: vec!["/images/rooms/a.jpg".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("🏊🏊🏊", 4), "🏊…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_renders_tabs_and_cards() {
        let rooms = [room("Ocean Suite", "Suite"), room("Garden", "Villa")];
        let refs: Vec<&Room> = rooms.iter().collect();
        let categories = vec!["all".to_string(), "suite".to_string(), "villa".to_string()];
        let images = ImageResolver::new("https://cdn.test", DEFAULT_PLACEHOLDER);
        let mut state = RoomListState::new();
        let mut list = RoomList {
            state: &mut state,
            categories: &categories,
            active_category: "all",
            rooms: &refs,
            images: &images,
            notice: None,
        };
        let text = render_to_string(70, 14, |f| list.render(f, f.area()));
        assert!(text.contains(" all "));
        assert!(text.contains("Ocean Suite · suite"));
        assert!(text.contains("$250 / night · sleeps 2"));
        assert!(text.contains("https://cdn.test/rooms/a.jpg"));
    }

    #[test]
    fn test_content_height_is_capped() {
        assert_eq!(content_height(0), 0);
        assert_eq!(content_height(3), 15);
        assert_eq!(content_height(MAX_CARDS), CARD_HEIGHT * MAX_CARDS as u16);
        assert_eq!(content_height(13_200), content_height(MAX_CARDS));
        assert_eq!(content_height(usize::MAX), content_height(MAX_CARDS));
    }

    #[test]
    fn test_renders_more_rooms_than_fit_in_the_scroll_view() {
        let rooms = vec![Room::default(); 13_200];
        let refs: Vec<&Room> = rooms.iter().collect();
        let categories = vec!["all".to_string()];
        let images = ImageResolver::new("https://cdn.test", DEFAULT_PLACEHOLDER);
        let mut state = RoomListState::new();
        let mut list = RoomList {
            state: &mut state,
            categories: &categories,
            active_category: "all",
            rooms: &refs,
            images: &images,
            notice: None,
        };
        let text = render_to_string(16, 8, |f| list.render(f, f.area()));
        assert!(text.contains("Unnamed"));
    }

    #[test]
    fn test_unknown_category_shows_empty_message() {
        let categories = vec!["all".to_string()];
        let images = ImageResolver::new("https://cdn.test", DEFAULT_PLACEHOLDER);
        let mut state = RoomListState::new();
        let mut list = RoomList {
            state: &mut state,
            categories: &categories,
            active_category: "penthouse",
            rooms: &[],
            images: &images,
            notice: None,
        };
        let text = render_to_string(70, 5, |f| list.render(f, f.area()));
        assert!(text.contains("penthouse (no rooms)"));
        assert!(text.contains("No rooms in 'penthouse'."));
    }
}
