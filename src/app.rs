use crate::actions::AppAction;
use crate::config::Config;
use crate::export::save_artifact;
use crate::history::UrlHistory;
use crate::request::execute_request_background;
use crate::state::AppState;
use crate::types::StatusMessage;
use crate::ui::{self, events::apply, AppCommand};
use crate::viewer::html::write_sandbox;
use color_eyre::Result;
use ratatui::{DefaultTerminal, Frame};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
    config: Config,
    client: reqwest::Client,
}

impl App {
    pub fn new(config: Config, history: UrlHistory) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request.timeout_secs))
            .build()?;

        Ok(Self {
            state: Arc::new(RwLock::new(AppState::new(&config, history))),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
            config,
            client,
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = self.spinner_index.wrapping_add(1);
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            if let Some(command) = self.event_handler.handle_events(&self.state)? {
                self.execute(command);
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let state = self.state.read().unwrap();
        ui::draw::render(frame, &state, self.spinner_index);
    }

    fn execute(&mut self, command: AppCommand) {
        tracing::debug!("Command {:?}", command);
        match command {
            AppCommand::SendRequest => {
                apply(&self.state, AppAction::ClearStatus);
                execute_request_background(Arc::clone(&self.state), self.client.clone())
            }
            AppCommand::Export => self.export_view(),
            AppCommand::OpenHtml => self.open_html(),
            AppCommand::SaveTheme => self.save_theme(),
        }
    }

    /// Write the current view's data to the export directory
    fn export_view(&self) {
        let artifact = {
            let state = self.state.read().unwrap();
            match state.viewer() {
                Some(viewer) => viewer.export(),
                None => return,
            }
        };

        let status = match save_artifact(&artifact, &self.config.export.directory()) {
            Ok(path) => {
                tracing::info!("Exported {} to {}", artifact.mime_type, path.display());
                StatusMessage::info(format!("Exported to {}", path.display()))
            }
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                StatusMessage::error(format!("Export failed: {e}"))
            }
        };
        apply(&self.state, AppAction::SetStatus(status));
    }

    /// Open an HTML response in the system browser through a sandbox document
    fn open_html(&self) {
        let (source, dark) = {
            let state = self.state.read().unwrap();
            let source = state
                .viewer()
                .filter(|viewer| viewer.snapshot().is_html())
                .map(|viewer| viewer.snapshot().body.plain_text());
            (source, state.ui.dark_mode)
        };
        let Some(source) = source else {
            return;
        };

        let opened = write_sandbox(&source, dark, &std::env::temp_dir())
            .and_then(|path| open::that(&path).map(|_| path).map_err(Into::into));
        let status = match opened {
            Ok(path) => {
                tracing::info!("Opened HTML sandbox {}", path.display());
                StatusMessage::info("Opened response in browser")
            }
            Err(e) => {
                tracing::warn!("Failed to open HTML response: {}", e);
                StatusMessage::error(format!("Could not open browser: {e}"))
            }
        };
        apply(&self.state, AppAction::SetStatus(status));
    }

    fn save_theme(&mut self) {
        self.config.ui.dark_mode = self.state.read().unwrap().ui.dark_mode;
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
            apply(
                &self.state,
                AppAction::SetStatus(StatusMessage::error(format!("Failed to save config: {e}"))),
            );
        }
    }
}
