//! One-line notices for a `Loadable` that has nothing to show yet.

use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::loadable::Loadable;

/// `None` when the data should be drawn; otherwise the line to draw instead.
pub fn loadable_notice<T>(what: &str, state: &Loadable<T>) -> Option<Line<'static>> {
    if let Some(err) = &state.error {
        return Some(Line::styled(
            format!("Could not load {what}: {err} (press r to retry)"),
            Style::default().fg(Color::Red),
        ));
    }
    if state.loading && state.data.is_empty() {
        return Some(Line::styled(
            format!("Loading {what}..."),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if state.data.is_empty() {
        return Some(Line::styled(
            format!("No {what} available."),
            Style::default().fg(Color::DarkGray),
        ));
    }
    None
}
