//! # PackageList Component
//!
//! Selectable list of stay packages with the highlighted package's details
//! underneath.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::api::Package;
use crate::core::description::NO_DESCRIPTION;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct PackageListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl PackageListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside `len` items after the list changes.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.list_state
            .select(if len == 0 { None } else { Some(self.selected) });
    }
}

/// Wraps the selection state with the current item count.
pub struct PackageNavigator<'a> {
    pub state: &'a mut PackageListState,
    pub len: usize,
}

impl EventHandler for PackageNavigator<'_> {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        if self.len == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.state.selected = (self.state.selected + 1).min(self.len - 1);
            }
            _ => return None,
        }
        self.state.list_state.select(Some(self.state.selected));
        None
    }
}

pub struct PackageList<'a> {
    pub state: &'a mut PackageListState,
    pub packages: &'a [Package],
    pub notice: Option<Line<'static>>,
}

fn summary(package: &Package) -> String {
    let name = package.name.as_deref().unwrap_or("Unnamed package");
    let mut parts = vec![name.to_string()];
    if let Some(nights) = package.nights {
        parts.push(format!("{nights} night{}", if nights == 1 { "" } else { "s" }));
    }
    if let Some(price) = package.price {
        parts.push(format!("${price:.0}"));
    }
    parts.join(" · ")
}

impl Component for PackageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Packages ")
            .padding(Padding::horizontal(1));

        if let Some(notice) = self.notice.clone() {
            frame.render_widget(Paragraph::new(notice).block(block), area);
            return;
        }

        self.state.clamp(self.packages.len());
        let [list_area, detail_area] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

        let items: Vec<ListItem> = self
            .packages
            .iter()
            .map(|p| ListItem::new(Line::raw(summary(p))))
            .collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        let Some(package) = self.packages.get(self.state.selected) else {
            return;
        };
        let mut lines = vec![Line::raw(
            package
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        )];
        if !package.includes.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("Includes:", Style::default().fg(Color::Yellow)));
            for item in &package.includes {
                lines.push(Line::from(vec![Span::raw("  • "), Span::raw(item.clone())]));
            }
        }
        let detail = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(detail, detail_area);
    }
}
