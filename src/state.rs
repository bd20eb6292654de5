use crate::config::Config;
use crate::editor::FieldEditor;
use crate::history::UrlHistory;
use crate::types::{InputMode, PanelFocus, RequestConfig, RequestField, StatusMessage};
use crate::viewer::{ResponseViewer, ViewMode};

#[derive(Debug, Clone)]
pub struct AppState {
    pub request: RequestState,
    pub response: ResponseState,
    pub ui: UiState,
    pub history: UrlHistory,
}

/// The request form
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    pub config: RequestConfig,
    /// Index into `config.visible_fields()`
    pub selected_field: usize,
    /// Buffer for the field being edited
    pub editor: FieldEditor,
}

#[derive(Debug, Clone, Default)]
pub struct ResponseState {
    pub executing: bool,
    /// Bound to the current response; replaced wholesale on every completion
    pub viewer: Option<ResponseViewer>,
    pub default_view: ViewMode,
    /// Scroll offset of the response header list
    pub headers_scroll: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub panel_focus: PanelFocus,
    pub input_mode: InputMode,
    pub dark_mode: bool,
    pub status: Option<StatusMessage>,
    /// Cursor in the history modal
    pub history_selected: usize,
    /// Briefly set after a successful yank
    pub yank_flash: bool,
    pub show_headers: bool,
}

impl AppState {
    pub fn new(config: &Config, history: UrlHistory) -> Self {
        Self {
            request: RequestState::default(),
            response: ResponseState {
                default_view: config.ui.default_view,
                ..Default::default()
            },
            ui: UiState {
                dark_mode: config.ui.dark_mode,
                ..Default::default()
            },
            history,
        }
    }

    /// The form field under the cursor
    pub fn selected_field(&self) -> RequestField {
        let fields = self.request.config.visible_fields();
        let idx = self.request.selected_field.min(fields.len().saturating_sub(1));
        fields.get(idx).copied().unwrap_or(RequestField::Url)
    }

    pub fn viewer(&self) -> Option<&ResponseViewer> {
        self.response.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ResponseViewer> {
        self.response.viewer.as_mut()
    }
}

impl Default for AppState {
    fn default() -> Self {
        let config = Config::default();
        let history = UrlHistory::new(config.history.max_entries);
        Self::new(&config, history)
    }
}
