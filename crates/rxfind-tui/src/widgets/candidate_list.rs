//! Candidate dropdown: the search results below the search bar.
//!
//! Renders whatever [`SearchState`] the controller is in: a hint while idle,
//! `Loading...` while a search is in flight, the failure message, or the
//! candidate list with the highlighted row.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use rxfind_core::{SearchState, SuggestionCandidate};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CandidateListState {
    /// Index of the highlighted candidate.
    pub selected: usize,
}

impl CandidateListState {
    /// Move the highlight. `len` is the number of candidates shown.
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
        tracing::debug!(selected = self.selected, "candidates: highlight moved");
    }

    /// Keep the highlight inside a list that may have just been replaced.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn at_top(&self) -> bool {
        self.selected == 0
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CandidateList<'a> {
    search: &'a SearchState,
    list: &'a CandidateListState,
    focused: bool,
    show_synonyms: bool,
    theme: &'a Theme,
}

impl<'a> CandidateList<'a> {
    pub fn new(
        search: &'a SearchState,
        list: &'a CandidateListState,
        focused: bool,
        show_synonyms: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            search,
            list,
            focused,
            show_synonyms,
            theme,
        }
    }

    fn item(&self, candidate: &'a SuggestionCandidate) -> ListItem<'a> {
        let mut spans = vec![Span::raw(candidate.name.as_str())];
        if let Some(rxcui) = &candidate.rxcui {
            spans.push(Span::styled(format!("  [{rxcui}]"), self.theme.result_rxcui));
        }
        if self.show_synonyms {
            if let Some(synonym) = candidate.synonym.as_deref().filter(|s| !s.is_empty()) {
                spans.push(Span::styled(format!("  {synonym}"), self.theme.result_synonym));
            }
        }
        ListItem::new(Line::from(spans))
    }
}

impl Widget for CandidateList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.search {
            SearchState::Loaded(c) if !c.is_empty() => format!(" Results ({}) ", c.len()),
            _ => " Results ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));

        let message = match self.search {
            SearchState::Idle => Some(Span::styled(
                "Type a drug name, results appear as you type",
                self.theme.message_hint,
            )),
            SearchState::Loading => Some(Span::styled("Loading...", self.theme.message_loading)),
            SearchState::Failed(failure) => {
                Some(Span::styled(failure.to_string(), self.theme.message_error))
            }
            SearchState::Loaded(c) if c.is_empty() => {
                Some(Span::styled("No matches", self.theme.message_hint))
            }
            SearchState::Loaded(_) => None,
        };

        if let Some(span) = message {
            Paragraph::new(Line::from(span)).block(block).render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .search
            .candidates()
            .iter()
            .map(|c| self.item(c))
            .collect();

        let highlight = if self.focused {
            self.theme.result_highlight
        } else {
            Default::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("› ");

        let mut list_state = ListState::default().with_selected(Some(self.list.selected));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
