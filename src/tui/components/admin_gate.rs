//! # AdminGate Component
//!
//! Draws the admin screen through the session guard:
//!
//! - `Loading`: "Checking session..." and nothing else
//! - `Nothing`: an empty frame (the redirect to the login screen is already queued)
//! - `Children`: the bookings table
//!
//! The table is only built inside the guard's `Children` branch, so nothing
//! from it reaches the buffer unless the session check passed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::api::AdminBooking;
use crate::core::guard::{AdminGuard, GuardRender};
use crate::tui::component::Component;

pub struct AdminGate<'a> {
    pub guard: &'a AdminGuard,
    pub bookings: &'a [AdminBooking],
    pub notice: Option<Line<'static>>,
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// "2026-11-01" or an RFC 3339 timestamp → "01 Nov 2026". Anything else is
/// shown as the API sent it.
fn date_cell(value: &Option<String>) -> String {
    let Some(raw) = value.as_deref() else {
        return "-".to_string();
    };
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return ts.format("%d %b %Y").to_string();
    }
    match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn bookings_table<'a>(bookings: &[AdminBooking]) -> Table<'a> {
    let rows: Vec<Row> = bookings
        .iter()
        .map(|b| {
            let total = b.total.map(|t| format!("${t:.2}")).unwrap_or_else(|| "-".to_string());
            let status_style = match b.status.as_deref().map(str::to_lowercase).as_deref() {
                Some("confirmed") => Style::default().fg(Color::Green),
                Some("cancelled") | Some("canceled") => Style::default().fg(Color::Red),
                Some("pending") => Style::default().fg(Color::Yellow),
                _ => Style::default(),
            };
            Row::new(vec![
                Cell::from(cell(&b.id)),
                Cell::from(cell(&b.guest_name)),
                Cell::from(cell(&b.room)),
                Cell::from(date_cell(&b.check_in)),
                Cell::from(date_cell(&b.check_out)),
                Cell::from(cell(&b.status)).style(status_style),
                Cell::from(total),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(14),
            Constraint::Min(12),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["ID", "Guest", "Room", "Check-in", "Check-out", "Status", "Total"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
}

impl Component for AdminGate<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Admin · Bookings ")
            .title_bottom(Line::from(" r refresh  l sign out ").centered());

        let bookings = self.bookings;
        let notice = self.notice.clone();
        match self.guard.render(|| (bookings_table(bookings), notice)) {
            GuardRender::Loading => {
                let loading = Paragraph::new("Checking session...")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center);
                frame.render_widget(loading, area);
            }
            GuardRender::Nothing => {}
            GuardRender::Children((_, Some(notice))) => {
                frame.render_widget(Paragraph::new(notice).block(block), area);
            }
            GuardRender::Children((table, None)) => {
                frame.render_widget(table.block(block), area);
            }
        }
    }
}
