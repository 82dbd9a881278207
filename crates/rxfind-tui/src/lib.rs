//! rxfind TUI: Ratatui application shell.
//!
//! The shell owns a [`rxfind_core::SearchController`] and a
//! [`rxfind_core::DetailsController`], renders their state, and turns key
//! presses into controller calls and route changes.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use rxfind_core::{config::Config, Terminology};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Start the TUI against `client`. Blocks until the user quits.
///
/// Background lookups are spawned onto `runtime`, which must stay alive for
/// the duration of the call.
pub fn run(config: Config, client: Arc<dyn Terminology>, runtime: Handle) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    tracing::info!(theme = theme.name, base_url = %config.api.base_url, "starting TUI");
    App::new(config, client, runtime, theme).run()
}
