mod actions;
mod app;
mod config;
mod editor;
mod export;
mod history;
mod logging;
mod request;
mod state;
mod types;
mod ui;
mod value;
mod viewer;

use app::App;
use color_eyre::Result;
use config::Config;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use history::UrlHistory;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init() {
        tracing::info!("reqscope starting, logging to {}", path.display());
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let history = UrlHistory::path()
        .and_then(|path| UrlHistory::load_from(&path, config.history.max_entries))
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load history: {}", e);
            UrlHistory::new(config.history.max_entries)
        });

    let app = App::new(config, history)?;

    let terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let app_result = app.run(terminal).await;
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    app_result
}
