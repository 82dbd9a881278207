//! Ratatui widgets for the rxfind TUI.

pub mod candidate_list;
pub mod command_bar;
pub mod details_pane;
pub mod header;
pub mod help;
pub mod search_bar;
