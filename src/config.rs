// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor settings.
//!
//! Settings are stored as camelCase JSON, both standalone (`--settings <file>`) and embedded in
//! exported project files. Every field is optional on input and falls back to its default.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compose::console::{DEFAULT_CONSOLE_MAX_ENTRIES, DEFAULT_CONSOLE_RETAIN_ENTRIES};
use crate::history::DEFAULT_MAX_HISTORY;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_AUTO_SAVE_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_TAB_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub preview_debounce_ms: u64,
    pub validation_debounce_ms: u64,
    /// Recompose the preview after edits. When off, only an explicit run recomposes.
    pub auto_run: bool,
    pub auto_save: bool,
    pub auto_save_interval_secs: u64,
    /// Report `console.*` calls in the script buffer.
    pub lint_console: bool,
    pub console_max_entries: usize,
    pub console_retain_entries: usize,
    pub max_history: usize,
    pub tab_size: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            preview_debounce_ms: DEFAULT_DEBOUNCE_MS,
            validation_debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_run: true,
            auto_save: false,
            auto_save_interval_secs: DEFAULT_AUTO_SAVE_INTERVAL_SECS,
            lint_console: true,
            console_max_entries: DEFAULT_CONSOLE_MAX_ENTRIES,
            console_retain_entries: DEFAULT_CONSOLE_RETAIN_ENTRIES,
            max_history: DEFAULT_MAX_HISTORY,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl EditorSettings {
    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }

    pub fn validation_debounce(&self) -> Duration {
        Duration::from_millis(self.validation_debounce_ms)
    }

    /// Auto-save period; clamped to at least one second so the timer never spins.
    pub fn auto_save_interval(&self) -> Duration {
        Duration::from_secs(self.auto_save_interval_secs.max(1))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Repairs combinations that would break the console log or history bounds.
    pub fn normalized(mut self) -> Self {
        let max_entries = self.console_max_entries.max(1);
        self.console_max_entries = max_entries;
        self.console_retain_entries = self.console_retain_entries.clamp(1, max_entries);
        self.max_history = self.max_history.max(1);
        self.tab_size = self.tab_size.clamp(1, 16);
        self
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read settings {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid settings file {path:?}: {source}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
