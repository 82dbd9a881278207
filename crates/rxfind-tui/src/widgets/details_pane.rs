//! Details pane: the record for one drug and its NDC codes.
//!
//! The NDC table keeps a highlighted row. `↑`/`↓` and `Home`/`End` move it,
//! and the table scrolls so the highlight stays in view.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Table, TableState, Widget,
    },
};
use rxfind_core::{DetailsState, DrugDetails};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DetailsPaneState {
    /// Index of the highlighted NDC row.
    pub selected: usize,
}

impl DetailsPaneState {
    /// Move the highlight. `len` is the number of NDC rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => self.selected = self.selected.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.selected = (self.selected + 1).min(len - 1),
            AppEvent::Home => self.selected = 0,
            AppEvent::End => self.selected = len - 1,
            _ => return,
        }
        tracing::debug!(selected = self.selected, "details: ndc highlight moved");
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DetailsPane<'a> {
    state: &'a DetailsState,
    table: &'a DetailsPaneState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DetailsPane<'a> {
    pub fn new(
        state: &'a DetailsState,
        table: &'a DetailsPaneState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            table,
            focused,
            theme,
        }
    }

    fn field(&self, label: &'static str, value: Option<&'a str>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{label:<9}"), self.theme.details_label),
            match value.filter(|v| !v.is_empty()) {
                Some(v) => Span::raw(v),
                None => Span::styled("-", self.theme.message_hint),
            },
        ])
    }

    fn render_loaded(&self, details: &'a DrugDetails, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(4), Constraint::Fill(1)])
            .split(area);

        let record = &details.record;
        let header = vec![
            Line::from(Span::styled(record.name.as_str(), self.theme.details_heading)),
            Line::default(),
            self.field("RXCUI", record.rxcui.as_deref()),
            self.field("Synonym", record.synonym.as_deref()),
        ];
        Paragraph::new(header).render(chunks[0], buf);

        let ndc_block = Block::bordered()
            .title(format!(" NDCs ({}) ", details.ndcs.len()))
            .border_style(self.theme.border_unfocused);

        if details.ndcs.is_empty() {
            Paragraph::new(Line::from(Span::styled("No NDCs found", self.theme.message_hint)))
                .block(ndc_block)
                .render(chunks[1], buf);
            return;
        }

        let total = details.ndcs.len();
        let selected = self.table.selected.min(total - 1);
        let rows = details
            .ndcs
            .iter()
            .enumerate()
            .map(|(i, ndc)| Row::new(vec![format!("{}", i + 1), ndc.clone()]));
        let highlight = if self.focused {
            self.theme.result_highlight
        } else {
            Default::default()
        };
        let table = Table::new(rows, [Constraint::Length(5), Constraint::Fill(1)])
            .header(Row::new(vec!["#", "NDC"]).style(self.theme.details_table_header))
            .block(ndc_block)
            .row_highlight_style(highlight)
            .highlight_symbol("› ");

        let mut table_state = TableState::default().with_selected(Some(selected));
        StatefulWidget::render(table, chunks[1], buf, &mut table_state);

        // Rows that fit below the border and the column header.
        let visible = chunks[1].height.saturating_sub(3) as usize;
        if total > visible {
            let mut scrollbar = ScrollbarState::new(total).position(selected);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                chunks[1].inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                buf,
                &mut scrollbar,
            );
        }
    }
}

impl Widget for DetailsPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Drug details ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let message = match self.state {
            DetailsState::Idle => Span::styled("No drug selected", self.theme.message_hint),
            DetailsState::Loading => Span::styled("Loading...", self.theme.message_loading),
            DetailsState::Failed(failure) => {
                Span::styled(failure.to_string(), self.theme.message_error)
            }
            DetailsState::Loaded(details) => {
                self.render_loaded(details, inner, buf);
                return;
            }
        };
        Paragraph::new(Line::from(message)).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
