// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::{AppState, Focus}, theme::Theme};
use rxfind_core::Route;

const THEMES: &[&str] = &["default", "gruvbox", "gruvbox_dark", "gruvbox-dark"];

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle help
    Help,
    // Change theme
    Theme(String),
    // Open the details view for a drug name
    Open(String),
    // Empty the search bar and go back to the search view
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else if THEMES.contains(&rest.to_ascii_lowercase().as_str()) {
                    Ok(Command::Theme(rest.to_string()))
                } else {
                    Err(format!("unknown theme: {rest}"))
                }
            }
            "open" => {
                if rest.is_empty() {
                    Err("usage: open <drug name>".to_string())
                } else {
                    Ok(Command::Open(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Open(name) => {
            let route = s.search.on_select(&name);
            s.navigate(route);
        }
        Command::Clear => {
            s.search_bar.set_text("");
            s.search.on_input_changed("");
            s.candidates.selected = 0;
            if s.route != Route::Search {
                s.navigate(Route::Search);
            }
            s.focus = Focus::SearchBar;
        }
    }
}
