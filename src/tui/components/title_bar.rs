//! # TitleBar Component
//!
//! Top line: villa name, screen tabs, and the status message.
//!
//! ```text
//!  Villa Azul  1 Home  2 Rooms  3 Packages  4 Admin  | Ready
//! ```
//!
//! Stateless: every field is a prop taken from `App` each frame. The active
//! tab is highlighted; the login screen highlights the Admin tab.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::route::Route;
use crate::tui::component::Component;

pub struct TitleBar {
    pub villa_name: String,
    pub route: Route,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(villa_name: String, route: Route, status_message: String) -> Self {
        Self {
            villa_name,
            route,
            status_message,
        }
    }

    fn is_active(&self, tab: Route) -> bool {
        tab == self.route || (tab == Route::Admin && self.route == Route::AdminLogin)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.villa_name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        for (i, tab) in Route::tabs().into_iter().enumerate() {
            let style = if self.is_active(tab) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
            spans.push(Span::raw(" "));
        }

        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("| {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_to_string;

    #[test]
    fn test_title_bar_shows_name_tabs_and_status() {
        let mut title_bar = TitleBar::new("Villa Azul".to_string(), Route::Rooms, "Ready".to_string());
        let text = render_to_string(100, 1, |f| title_bar.render(f, f.area()));

        assert!(text.contains("Villa Azul"));
        assert!(text.contains("1 Home"));
        assert!(text.contains("2 Rooms"));
        assert!(text.contains("4 Admin"));
        assert!(text.contains("| Ready"));
    }

    #[test]
    fn test_title_bar_without_status_has_no_separator() {
        let mut title_bar = TitleBar::new("V".to_string(), Route::Home, String::new());
        let text = render_to_string(100, 1, |f| title_bar.render(f, f.area()));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_login_screen_highlights_admin_tab() {
        let title_bar = TitleBar::new("V".to_string(), Route::AdminLogin, String::new());
        assert!(title_bar.is_active(Route::Admin));
        assert!(!title_bar.is_active(Route::Home));
    }
}
