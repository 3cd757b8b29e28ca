//! # Footer Component
//!
//! Contact line and copyright, pinned to the bottom of every screen except
//! the login form. Missing contact fields are skipped.

use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::api::Contact;
use crate::tui::component::Component;

pub const FOOTER_HEIGHT: u16 = 2;

pub struct Footer<'a> {
    pub villa_name: &'a str,
    pub contact: Option<&'a Contact>,
    pub year: i32,
    pub hints: &'a str,
}

impl<'a> Footer<'a> {
    pub fn new(villa_name: &'a str, contact: Option<&'a Contact>, hints: &'a str) -> Self {
        Self {
            villa_name,
            contact,
            year: chrono::Local::now().year(),
            hints,
        }
    }

    fn contact_line(&self) -> String {
        let Some(contact) = self.contact else {
            return String::new();
        };
        [&contact.phone, &contact.email, &contact.address]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .filter(|f| !f.trim().is_empty())
            .collect::<Vec<_>>()
            .join("  ·  ")
    }
}

impl Component for Footer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let contact = self.contact_line();
        let first = if contact.is_empty() {
            format!("© {} {}", self.year, self.villa_name)
        } else {
            format!("© {} {}  ·  {}", self.year, self.villa_name, contact)
        };
        let lines = vec![
            Line::styled(first, Style::default().fg(Color::Gray)),
            Line::styled(self.hints.to_string(), Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_to_string;

    #[test]
    fn test_footer_joins_present_contact_fields() {
        let contact = Contact {
            phone: Some("+62 361 000".to_string()),
            email: None,
            address: Some("Jl. Pantai 1".to_string()),
        };
        let footer = Footer {
            villa_name: "Villa Azul",
            contact: Some(&contact),
            year: 2026,
            hints: "",
        };
        assert_eq!(footer.contact_line(), "+62 361 000  ·  Jl. Pantai 1");
    }

    #[test]
    fn test_footer_renders_copyright_and_hints() {
        let mut footer = Footer {
            villa_name: "Villa Azul",
            contact: None,
            year: 2026,
            hints: "q quit",
        };
        let text = render_to_string(60, FOOTER_HEIGHT, |f| footer.render(f, f.area()));
        assert!(text.contains("© 2026 Villa Azul"));
        assert!(text.contains("q quit"));
    }
}
