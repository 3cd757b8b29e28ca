//! # Amenities Component
//!
//! Icon + label grid. Columns are a fixed display width; labels are padded
//! and clipped by terminal cell width (`unicode-width`), not byte length,
//! because the icons are double-width glyphs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::amenities::AmenityDisplay;
use crate::tui::component::Component;

const COLUMN_WIDTH: usize = 26;
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;

pub struct AmenitiesList<'a> {
    pub items: &'a [AmenityDisplay],
    /// Shown instead of the grid when set (loading, error, empty).
    pub notice: Option<Line<'static>>,
}

impl AmenitiesList<'_> {
    fn columns(width: u16) -> usize {
        (width.saturating_sub(HORIZONTAL_OVERHEAD) as usize / COLUMN_WIDTH).max(1)
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        if let Some(notice) = &self.notice {
            return vec![notice.clone()];
        }
        self.items
            .chunks(Self::columns(width))
            .map(|row| {
                let text: String = row.iter().map(cell).collect();
                Line::raw(text.trim_end().to_string())
            })
            .collect()
    }

    pub fn height(&self, width: u16) -> u16 {
        self.lines(width).len() as u16 + VERTICAL_OVERHEAD
    }
}

/// One fixed-width grid cell: "<icon> <label>" padded to `COLUMN_WIDTH`.
fn cell(item: &AmenityDisplay) -> String {
    let mut text = format!("{} {}", item.icon, item.label);
    let max = COLUMN_WIDTH - 1;
    if text.width() > max {
        let mut clipped = String::new();
        for ch in text.chars() {
            if clipped.width() + ch.to_string().width() > max - 1 {
                break;
            }
            clipped.push(ch);
        }
        clipped.push('…');
        text = clipped;
    }
    let pad = COLUMN_WIDTH.saturating_sub(text.width());
    text.push_str(&" ".repeat(pad));
    text
}

impl Component for AmenitiesList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Amenities ")
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(self.lines(area.width)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_to_string;

    fn item(icon: &'static str, label: &str) -> AmenityDisplay {
        AmenityDisplay {
            icon,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_cells_have_fixed_display_width() {
        assert_eq!(cell(&item("🏊", "Pool")).width(), COLUMN_WIDTH);
        let long = cell(&item("•", "An extraordinarily long amenity name"));
        assert_eq!(long.width(), COLUMN_WIDTH);
        assert!(long.contains('…'));
    }

    #[test]
    fn test_grid_wraps_into_rows() {
        let items = vec![item("•", "A"), item("•", "B"), item("•", "C")];
        let list = AmenitiesList {
            items: &items,
            notice: None,
        };
        // 2 columns fit in 60 cells (56 usable / 26).
        assert_eq!(list.height(60), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_renders_labels() {
        let items = vec![item("📶", "WiFi"), item("🏊", "Pool")];
        let mut list = AmenitiesList {
            items: &items,
            notice: None,
        };
        let text = render_to_string(80, 3, |f| list.render(f, f.area()));
        assert!(text.contains("WiFi"));
        assert!(text.contains("Pool"));
    }

    #[test]
    fn test_notice_replaces_grid() {
        let mut list = AmenitiesList {
            items: &[],
            notice: Some(Line::raw("Loading amenities...")),
        };
        let text = render_to_string(80, 3, |f| list.render(f, f.area()));
        assert!(text.contains("Loading amenities..."));
    }
}
