//! Recent URL history, most recent first

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    /// Unix seconds of the last time the URL was sent
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlHistory {
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl UrlHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Move `url` to the front, dropping the oldest entry past the limit
    pub fn record(&mut self, url: &str) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.record_at(url, now);
    }

    fn record_at(&mut self, url: &str, timestamp: u64) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry.url != url);
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(self.max_entries);
    }

    pub fn path() -> Result<PathBuf> {
        Ok(crate::config::Config::config_dir()?.join("history.toml"))
    }

    /// Load from `path`; a missing file is an empty history
    pub fn load_from(path: &Path, max_entries: usize) -> Result<Self> {
        let mut history = Self::new(max_entries);
        if !path.exists() {
            return Ok(history);
        }

        let contents = fs::read_to_string(path)?;
        let file: HistoryFile = toml::from_str(&contents)?;
        history.entries = file.entries;
        history.entries.truncate(history.max_entries);
        Ok(history)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = HistoryFile {
            entries: self.entries.clone(),
        };
        fs::write(path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }
}
