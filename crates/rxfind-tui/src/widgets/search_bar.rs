//! Search bar widget: drug-name text input with an `[Enter] Search` control.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` / `Delete` remove the character before / under the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor; `Home` / `End` jump.
//!
//! [`SearchBarState::handle`] reports whether the text changed so the app
//! shell can forward the new value to the search controller.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const BUTTON_LABEL: &str = " [Enter] Search ";
const PLACEHOLDER: &str = "Search for a drug by name";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The field value as typed.
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl SearchBarState {
    /// Replace the field value and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Apply an editing event. Returns true if the text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(text = %self.text, cursor = self.cursor, "search bar: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                tracing::debug!(text = %self.text, cursor = self.cursor, "search bar: backspace");
                true
            }
            AppEvent::Delete => {
                if self.cursor >= self.text.len() {
                    return false;
                }
                self.text.remove(self.cursor);
                tracing::debug!(text = %self.text, cursor = self.cursor, "search bar: delete");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.next_boundary();
                false
            }
            AppEvent::Home => {
                self.cursor = 0;
                false
            }
            AppEvent::End => {
                self.cursor = self.text.len();
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.text[..self.state.cursor].chars().count() as u16;
        let text_right = area
            .right()
            .saturating_sub(1 + BUTTON_LABEL.chars().count() as u16);
        let x = (area.x + 1 + col).min(text_right.saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Drug name ")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(BUTTON_LABEL.chars().count() as u16),
            ])
            .split(inner);

        let input = if self.state.text.is_empty() && !self.focused {
            Line::from(Span::styled(PLACEHOLDER, self.theme.message_hint))
        } else {
            Line::from(self.state.text.as_str())
        };
        Paragraph::new(input).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(BUTTON_LABEL, self.theme.button)))
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
