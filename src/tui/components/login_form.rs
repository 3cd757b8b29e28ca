//! # LoginForm Component
//!
//! Two single-line fields (username, password) for the admin sign-in screen.
//!
//! ## Keys
//!
//! - Tab / Shift+Tab / ↑ / ↓: switch field
//! - Enter: submit (only when both fields are filled)
//! - Esc: back to the public site
//!
//! The form owns its buffers. Whether a request is in flight and the last
//! error are props from `App`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const FORM_WIDTH: u16 = 44;
const FORM_HEIGHT: u16 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    Submit { username: String, password: String },
    Cancel,
}

#[derive(Debug, Default)]
pub struct LoginFormState {
    pub username: String,
    pub password: String,
    pub focus: Field,
    /// Byte offset into the focused field.
    cursor: usize,
}

impl LoginFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the password after an attempt; keep the username for a retry.
    pub fn reset_password(&mut self) {
        self.password.clear();
        if self.focus == Field::Password {
            self.cursor = 0;
        }
    }

    fn focused_text(&self) -> &str {
        match self.focus {
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    fn focused(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
        self.cursor = self.focused().len();
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map(|c| pos + c.len_utf8()).unwrap_or(pos)
}

impl EventHandler for LoginFormState {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LoginEvent> {
        // Fields may have been replaced from outside since the last key.
        let cursor = self.cursor;
        let text = self.focused_text();
        let len = text.len();
        if cursor > len || !text.is_char_boundary(cursor) {
            self.cursor = len;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let pos = self.cursor;
                self.focused().insert(pos, *c);
                self.cursor += c.len_utf8();
                None
            }
            TuiEvent::Paste(text) => {
                // Single-line fields
                let line = text.lines().next().unwrap_or("").to_string();
                let pos = self.cursor;
                self.focused().insert_str(pos, &line);
                self.cursor += line.len();
                None
            }
            TuiEvent::Backspace => {
                let pos = self.cursor;
                if pos > 0 {
                    let field = self.focused();
                    let prev = prev_char_boundary(field, pos);
                    field.drain(prev..pos);
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::CursorLeft => {
                let pos = self.cursor;
                self.cursor = prev_char_boundary(self.focused(), pos);
                None
            }
            TuiEvent::CursorRight => {
                let pos = self.cursor;
                self.cursor = next_char_boundary(self.focused(), pos);
                None
            }
            TuiEvent::Tab | TuiEvent::BackTab | TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.switch_focus();
                None
            }
            TuiEvent::Submit => {
                if self.focus == Field::Username && self.password.is_empty() {
                    self.switch_focus();
                    return None;
                }
                if self.username.trim().is_empty() || self.password.is_empty() {
                    return None;
                }
                Some(LoginEvent::Submit {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                })
            }
            TuiEvent::Escape => Some(LoginEvent::Cancel),
            _ => None,
        }
    }
}

pub struct LoginForm<'a> {
    pub state: &'a mut LoginFormState,
    pub pending: bool,
    pub error: Option<&'a str>,
}

impl LoginForm<'_> {
    fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::styled(format!("{label:<10}{value}"), style)
    }
}

impl Component for LoginForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(FORM_HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [form_area] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
            .flex(Flex::Center)
            .areas(row);

        let masked = "•".repeat(self.state.password.chars().count());
        let status = if self.pending {
            Line::styled("Signing in...", Style::default().fg(Color::Yellow))
        } else if let Some(error) = self.error {
            Line::styled(error.to_string(), Style::default().fg(Color::Red))
        } else {
            Line::raw("")
        };

        let lines = vec![
            Line::raw(""),
            Self::field_line("Username", &self.state.username, self.state.focus == Field::Username),
            Line::raw(""),
            Self::field_line("Password", &masked, self.state.focus == Field::Password),
            Line::raw(""),
            status,
            Line::raw(""),
            Line::styled(
                "Tab switch field · Enter sign in · Esc back",
                Style::default().fg(Color::DarkGray),
            ),
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Admin sign in ");
        frame.render_widget(Paragraph::new(lines).block(block), form_area);

        if !self.pending {
            let (row_offset, before) = match self.state.focus {
                Field::Username => (
                    2,
                    self.state.username.get(..self.state.cursor).unwrap_or("").width(),
                ),
                Field::Password => (
                    4,
                    self.state.password.get(..self.state.cursor).unwrap_or("").chars().count(),
                ),
            };
            let x = form_area.x + 1 + 10 + before as u16;
            let y = form_area.y + row_offset;
            frame.set_cursor_position((x.min(form_area.right().saturating_sub(2)), y));
        }
    }
}
