//! # About Component
//!
//! The villa's name, tagline, location, hero image and description.
//!
//! Long descriptions show the processed prefix followed by a "read more"
//! hint; Enter expands them in place. Lines are wrapped up front with
//! `textwrap` so `height()` is exact and the home screen can split its area
//! before drawing. Expanded text taller than the area scrolls.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::description::ProcessedDescription;
use crate::tui::component::Component;

/// Borders plus horizontal padding.
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;

pub struct AboutSection<'a> {
    pub title: &'a str,
    pub tagline: Option<&'a str>,
    pub location: Option<&'a str>,
    pub hero_image: String,
    pub description: &'a ProcessedDescription,
    pub expanded: bool,
    /// Lines scrolled off the top when the expanded text outgrows the area.
    pub scroll: u16,
}

impl<'a> AboutSection<'a> {
    /// Every content line, already wrapped to `width` columns.
    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
        let mut lines = Vec::new();

        if let Some(tagline) = self.tagline {
            for l in textwrap::wrap(tagline, inner) {
                lines.push(Line::styled(
                    l.into_owned(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
                ));
            }
        }
        if let Some(location) = self.location {
            lines.push(Line::styled(
                format!("Location: {location}"),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::styled(
            format!("Image: {}", self.hero_image),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::raw(""));

        let body = if self.expanded {
            &self.description.full_text
        } else {
            &self.description.text
        };
        for paragraph in body.split('\n') {
            if paragraph.trim().is_empty() {
                lines.push(Line::raw(""));
                continue;
            }
            for l in textwrap::wrap(paragraph, inner) {
                lines.push(Line::raw(l.into_owned()));
            }
        }

        if self.description.is_truncated {
            let hint = if self.expanded {
                "[Enter] show less"
            } else {
                "... [Enter] read more"
            };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::Yellow),
            )));
        }
        lines
    }

    pub fn height(&self, width: u16) -> u16 {
        line_count(self.lines(width).len()).saturating_add(VERTICAL_OVERHEAD)
    }
}

fn line_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

impl Component for AboutSection<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" About {} ", self.title))
            .padding(Padding::horizontal(1));
        let lines = self.lines(area.width);
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD);
        let max_scroll = line_count(lines.len()).saturating_sub(visible);
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll.min(max_scroll), 0));
        frame.render_widget(paragraph, area);
    }
}
