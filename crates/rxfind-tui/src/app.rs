//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each loop iteration first
//! applies whatever the two controllers' background tasks have finished, then
//! redraws, then waits up to one frame for input.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        candidate_list::{CandidateList, CandidateListState},
        command_bar::{CommandBar, CommandBarState},
        details_pane::{DetailsPane, DetailsPaneState},
        header::Header,
        help::HelpPopup,
        search_bar::{SearchBar, SearchBarState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use rxfind_core::{
    config::Config, DetailsController, DetailsState, Route, SearchController, SearchOptions,
    Terminology,
};
use std::{io, sync::Arc, time::Duration};
use tokio::runtime::Handle;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchBar,
    Candidates,
    Details,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub route: Route,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub search: SearchController,
    pub details: DetailsController,
    pub search_bar: SearchBarState,
    pub candidates: CandidateListState,
    pub ndc_table: DetailsPaneState,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// Switch views. Entering details starts a load keyed by the drug name;
    /// leaving discards the record and any load still in flight.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.ndc_table.reset();
        match &route {
            Route::Details(name) => {
                self.details.load(name);
                self.focus = Focus::Details;
            }
            Route::Search => {
                self.details.leave();
                self.focus = if self.search.candidates().is_empty() {
                    Focus::SearchBar
                } else {
                    Focus::Candidates
                };
            }
        }
        self.route = route;
    }

    /// Apply finished background work. Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.search.poll() | self.details.poll();
        if changed {
            self.candidates.clamp(self.search.candidates().len());
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the shell. Controller tasks are spawned onto `runtime`.
    pub fn new(
        config: Config,
        client: Arc<dyn Terminology>,
        runtime: Handle,
        theme: Theme,
    ) -> Self {
        let search = SearchController::new(
            Arc::clone(&client),
            SearchOptions::from_config(&config),
            runtime.clone(),
        );
        let details = DetailsController::new(client, config.api.concept_tty.clone(), runtime);

        let state = AppState {
            route: Route::Search,
            focus: Focus::SearchBar,
            prev_focus: Focus::SearchBar,
            search,
            details,
            search_bar: SearchBarState::default(),
            candidates: CandidateListState::default(),
            ndc_table: DetailsPaneState::default(),
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.tick();
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    // Release and repeat reports
                    Event::Key(_) => {}
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::SearchBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::SearchBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::SearchFocus => {
                if s.route != Route::Search {
                    s.navigate(Route::Search);
                }
                tracing::debug!("focus -> SearchBar");
                s.focus = Focus::SearchBar;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::SearchBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::SearchBar => match event {
            AppEvent::Enter => s.search.on_submit(),
            AppEvent::Nav(Direction::Down) | AppEvent::FocusNext | AppEvent::Escape => {
                s.focus = Focus::Candidates;
                tracing::debug!("focus: SearchBar -> Candidates");
            }
            other => {
                if s.search_bar.handle(&other) {
                    s.search.on_input_changed(&s.search_bar.text);
                    s.candidates.selected = 0;
                }
            }
        },
        Focus::Candidates => {
            let len = s.search.candidates().len();
            match event {
                AppEvent::Nav(Direction::Up) if s.candidates.at_top() => {
                    s.focus = Focus::SearchBar;
                    tracing::debug!("focus: Candidates -> SearchBar");
                }
                AppEvent::FocusNext | AppEvent::Escape => {
                    s.focus = Focus::SearchBar;
                    tracing::debug!("focus: Candidates -> SearchBar");
                }
                AppEvent::Enter => {
                    let selected = s
                        .search
                        .candidates()
                        .get(s.candidates.selected)
                        .map(|c| c.name.clone());
                    if let Some(name) = selected {
                        let route = s.search.on_select(&name);
                        s.navigate(route);
                    }
                }
                other => s.candidates.handle(&other, len),
            }
        }
        Focus::Details => match event {
            AppEvent::Escape | AppEvent::Backspace => s.navigate(Route::Search),
            other => {
                let len = match s.details.state() {
                    DetailsState::Loaded(details) => details.ndcs.len(),
                    _ => 0,
                };
                s.ndc_table.handle(&other, len);
            }
        },
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | body
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    frame.render_widget(Header::new(&state.route, &state.theme), vert[0]);

    let mut search_bar_area = None;
    match state.route {
        Route::Search => {
            let body = Layout::default()
                .direction(LayoutDir::Vertical)
                .constraints([Constraint::Length(3), Constraint::Fill(1)])
                .split(vert[1]);
            frame.render_widget(
                SearchBar::new(&state.search_bar, state.focus == Focus::SearchBar, &state.theme),
                body[0],
            );
            frame.render_widget(
                CandidateList::new(
                    state.search.state(),
                    &state.candidates,
                    state.focus == Focus::Candidates,
                    state.config.ui.show_synonyms,
                    &state.theme,
                ),
                body[1],
            );
            search_bar_area = Some(body[0]);
        }
        Route::Details(_) => {
            frame.render_widget(
                DetailsPane::new(
                    state.details.state(),
                    &state.ndc_table,
                    state.focus == Focus::Details,
                    &state.theme,
                ),
                vert[1],
            );
        }
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    // Position the terminal cursor when the search bar is focused
    if let (Focus::SearchBar, Some(bar_area)) = (state.focus, search_bar_area) {
        let bar = SearchBar::new(&state.search_bar, true, &state.theme);
        frame.set_cursor_position(bar.cursor_position(bar_area));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
