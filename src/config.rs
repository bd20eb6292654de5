use crate::viewer::ViewMode;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub request: RequestSettings,
    pub history: HistorySettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub dark_mode: bool,
    /// View selected for non-HTML responses
    pub default_view: ViewMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            default_view: ViewMode::Tree,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub timeout_secs: u64,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_entries: 10 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Where exported files go; the working directory when unset
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    pub fn directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// `~/.config/reqscope`, created on first use
    pub fn config_dir() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("reqscope");
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }
}

/// Accept only absolute http(s) URLs
pub fn validate_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url)
        .map(|_| ())
        .map_err(|e| format!("Invalid URL format: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.ui.dark_mode);
        assert_eq!(config.ui.default_view, ViewMode::Tree);
        assert_eq!(config.request.timeout_secs, 30);
        assert_eq!(config.history.max_entries, 10);
        assert_eq!(config.export.directory(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[ui]\ndefault_view = \"table\"\n").unwrap();
        assert_eq!(config.ui.default_view, ViewMode::Table);
        assert!(!config.ui.dark_mode);
        assert_eq!(config.request.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ui.dark_mode = true;
        config.history.max_entries = 3;
        config.export.directory = Some(dir.path().to_path_buf());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://api.example.com/users?limit=5").is_ok());
        assert!(validate_url("http://localhost:8080").is_ok());
        assert_eq!(validate_url("").unwrap_err(), "URL cannot be empty");
        assert_eq!(
            validate_url("ftp://example.com").unwrap_err(),
            "URL must start with http:// or https://"
        );
        assert!(validate_url("http://").is_err());
    }
}
