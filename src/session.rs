// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor session state.
//!
//! One `EditorSession` owns everything a playground tab mutates: the buffers, history,
//! the latest diagnostics, the console log and the settings. It is created at start-up and
//! handed to whoever drives it (the preview host loop or a CLI command); nothing here is global.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use url::Url;

use crate::compose::{compose_document, ConsoleLog, ConsoleMessage};
use crate::config::EditorSettings;
use crate::format::format_source;
use crate::history::HistoryRing;
use crate::model::templates::DEFAULT_TITLE;
use crate::model::{BufferSet, Language, LanguageDiagnostic};
use crate::share::{self, SharedProject};
use crate::store::{ProjectFile, ProjectFileError};
use crate::validate::{validate_all, ValidatorOptions};

pub const INITIAL_SNAPSHOT: &str = "Initial version";
pub const MANUAL_SAVE_SNAPSHOT: &str = "Manual save";
pub const AUTO_SAVE_SNAPSHOT: &str = "Auto-save";
pub const FORMAT_SNAPSHOT: &str = "Formatted code";
pub const IMPORT_SNAPSHOT: &str = "Imported project";
pub const SHARE_SNAPSHOT: &str = "Loaded from share link";
pub const RESET_SNAPSHOT: &str = "Reset to defaults";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    title: String,
    buffers: BufferSet,
    history: HistoryRing,
    diagnostics: Vec<LanguageDiagnostic>,
    console: ConsoleLog,
    settings: EditorSettings,
    notifications: Vec<Notification>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorSession {
    /// Starts from the default templates with one initial snapshot.
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_buffers(settings, DEFAULT_TITLE, BufferSet::default())
    }

    pub fn with_buffers(
        settings: EditorSettings,
        title: impl Into<String>,
        buffers: BufferSet,
    ) -> Self {
        let settings = settings.normalized();
        let mut session = Self {
            title: title.into(),
            buffers,
            history: HistoryRing::with_capacity(settings.max_history),
            diagnostics: Vec::new(),
            console: ConsoleLog::with_limits(
                settings.console_max_entries,
                settings.console_retain_entries,
            ),
            settings,
            notifications: Vec::new(),
        };
        session.history.snapshot(&session.buffers, INITIAL_SNAPSHOT);
        session.revalidate();
        session
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn buffers(&self) -> &BufferSet {
        &self.buffers
    }

    pub fn text(&self, language: Language) -> &str {
        self.buffers.text(language)
    }

    /// Applies an edit. Returns whether the buffer content changed.
    pub fn set_text(&mut self, language: Language, text: impl Into<String>) -> bool {
        self.buffers.set_text(language, text)
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EditorSettings) {
        let settings = settings.normalized();
        let (max, retain) = (settings.console_max_entries, settings.console_retain_entries);
        self.console.set_limits(max, retain);
        self.history.set_max_snapshots(settings.max_history);
        self.settings = settings;
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.settings.auto_save = enabled;
    }

    /// Whether the buffers differ from the snapshot at the history cursor.
    pub fn is_dirty(&self) -> bool {
        self.history.differs_from_current(&self.buffers)
    }

    pub fn save_version(&mut self, description: impl Into<String>) -> Option<usize> {
        let description = description.into();
        let index = self.history.snapshot(&self.buffers, description.as_str());
        if let Some(index) = index {
            info!(index, description = %description, "history snapshot");
        }
        index
    }

    pub fn save(&mut self) -> Option<usize> {
        self.save_version(MANUAL_SAVE_SNAPSHOT)
    }

    /// Periodic auto-save: snapshots only when enabled and something changed.
    pub fn auto_save_tick(&mut self) -> Option<usize> {
        if !self.settings.auto_save || !self.is_dirty() {
            return None;
        }
        self.save_version(AUTO_SAVE_SNAPSHOT)
    }

    pub fn restore(&mut self, index: usize) -> bool {
        let Some(snapshot) = self.history.restore(index) else {
            return false;
        };
        self.buffers = snapshot.buffers().clone();
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.buffers = snapshot.buffers().clone();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.buffers = snapshot.buffers().clone();
        true
    }

    pub fn reset_to_defaults(&mut self) -> Option<usize> {
        self.buffers.reset();
        self.save_version(RESET_SNAPSHOT)
    }

    /// Formats every buffer and records the result as a version.
    pub fn format_all(&mut self) -> Option<usize> {
        let tab_size = self.settings.tab_size;
        for language in Language::ALL {
            let formatted = format_source(language, self.buffers.text(language), tab_size);
            self.buffers.set_text(language, formatted);
        }
        self.save_version(FORMAT_SNAPSHOT)
    }

    pub fn compose(&self) -> String {
        compose_document(
            self.buffers.markup(),
            self.buffers.styles(),
            self.buffers.script(),
            &self.title,
        )
    }

    /// Replaces the diagnostic set wholesale with a fresh validator pass.
    pub fn revalidate(&mut self) -> &[LanguageDiagnostic] {
        self.diagnostics = validate_all(&self.buffers, ValidatorOptions::from(&self.settings));
        &self.diagnostics
    }

    pub fn diagnostics(&self) -> &[LanguageDiagnostic] {
        &self.diagnostics
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn push_console(&mut self, instance: u64, message: ConsoleMessage) {
        self.console.push(instance, message);
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
    }

    pub fn share_url(&self, base: &Url) -> Url {
        share::share_url(base, &self.buffers, &self.title)
    }

    /// Adopts a share link found in `url`.
    ///
    /// Returns the URL to display afterwards (share parameter removed) when a share was
    /// adopted. A malformed share is logged and reported as a notification; the session keeps
    /// its current buffers and the URL is left as it was.
    pub fn init_from_url(&mut self, url: &Url) -> Option<Url> {
        let (decoded, stripped) = share::take_share_param(url)?;
        match decoded {
            Ok(shared) => {
                self.apply_shared(&shared);
                Some(stripped)
            }
            Err(err) => {
                warn!(error = %err, "ignoring malformed share link");
                let message = format!("Could not load shared project: {err}");
                self.notify(NotificationLevel::Error, message);
                None
            }
        }
    }

    pub fn apply_shared(&mut self, shared: &SharedProject) {
        if let Some(title) = &shared.title {
            self.title = title.clone();
        }
        shared.apply_to(&mut self.buffers);
        self.save_version(SHARE_SNAPSHOT);
        self.revalidate();
        info!(title = %self.title, "loaded shared project");
    }

    pub fn export_project(&self, updated_at: DateTime<Utc>) -> ProjectFile {
        ProjectFile::from_session(self, updated_at)
    }

    /// Imports a project document. On failure nothing changes and an error notification is
    /// recorded.
    pub fn import_project(&mut self, json: &str) -> Result<(), ProjectFileError> {
        match ProjectFile::parse(json) {
            Ok(project) => {
                self.apply_project(project);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "project import rejected");
                self.notify(NotificationLevel::Error, format!("Import failed: {err}"));
                Err(err)
            }
        }
    }

    /// Takes over a project wholesale: buffers, title, settings and the history it carries.
    pub fn apply_project(&mut self, project: ProjectFile) {
        self.buffers = project.buffers();
        self.history.replace_with(project.history_snapshots());
        self.title = project.project_name;
        self.set_settings(project.settings);
        self.save_version(IMPORT_SNAPSHOT);
        self.revalidate();
        let message = format!("Imported \"{}\"", self.title);
        self.notify(NotificationLevel::Info, message);
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            message: message.into(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
