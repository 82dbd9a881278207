//! Header line: app title and breadcrumb, with key hints on the right.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use rxfind_core::Route;

/// Renders the 1-line strip at the top of the screen.
///
/// The breadcrumb reads `Search` on the search view and `Search › <name>` on
/// the details view. Keybinding hints are right-aligned in the same row.
pub struct Header<'a> {
    route: &'a Route,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(route: &'a Route, theme: &'a Theme) -> Self {
        Self { route, theme }
    }

    fn hint(&self) -> &'static str {
        match self.route {
            Route::Search => " Enter:search  Tab:results  ?:help ",
            Route::Details(_) => " Esc:back  ::command  ?:help ",
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" rxfind ", self.theme.header_title),
            Span::styled(" Search", self.theme.header_breadcrumb),
        ];
        if let Route::Details(name) = self.route {
            spans.push(Span::styled(format!(" › {name}"), self.theme.header_breadcrumb));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint = self.hint();
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.message_hint);
    }
}
