// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EditorSettings;
use crate::history::{HistoryRing, HistorySnapshot};
use crate::model::templates::DEFAULT_TITLE;
use crate::model::{BufferSet, SnapshotId};
use crate::session::EditorSession;

/// Snapshots carried along in an exported project.
pub const EXPORTED_HISTORY_LEN: usize = 5;

/// The export/import document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub project_name: String,
    pub html: String,
    pub css: String,
    pub js: String,
    pub updated_at: DateTime<Utc>,
    pub settings: EditorSettings,
    pub history: Vec<ProjectHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub html: String,
    pub css: String,
    pub js: String,
}

impl From<&HistorySnapshot> for ProjectHistoryEntry {
    fn from(snapshot: &HistorySnapshot) -> Self {
        let buffers = snapshot.buffers();
        Self {
            id: snapshot.id().to_string(),
            timestamp: snapshot.timestamp(),
            description: snapshot.description().to_owned(),
            html: buffers.markup().to_owned(),
            css: buffers.styles().to_owned(),
            js: buffers.script().to_owned(),
        }
    }
}

impl ProjectHistoryEntry {
    pub fn buffers(&self) -> BufferSet {
        BufferSet::new(self.html.as_str(), self.css.as_str(), self.js.as_str())
    }

    /// Rebuilds the in-memory snapshot. An id that does not survive validation is regenerated
    /// from the timestamp and `seq`.
    pub fn to_snapshot(&self, seq: u64) -> HistorySnapshot {
        let id = SnapshotId::new(self.id.as_str())
            .unwrap_or_else(|_| SnapshotId::from_millis(self.timestamp.timestamp_millis(), seq));
        let description = self.description.as_str();
        HistorySnapshot::new(id, self.timestamp, self.buffers(), description)
    }
}

// Lenient mirror used for import: only the three buffers are mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedProject {
    project_name: Option<String>,
    html: Option<String>,
    css: Option<String>,
    js: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    settings: Option<EditorSettings>,
    history: Option<Vec<ProjectHistoryEntry>>,
}

impl ProjectFile {
    pub fn new(
        project_name: impl Into<String>,
        buffers: &BufferSet,
        settings: &EditorSettings,
        history: &HistoryRing,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            html: buffers.markup().to_owned(),
            css: buffers.styles().to_owned(),
            js: buffers.script().to_owned(),
            updated_at,
            settings: settings.clone(),
            history: history
                .recent(EXPORTED_HISTORY_LEN)
                .iter()
                .map(ProjectHistoryEntry::from)
                .collect(),
        }
    }

    pub fn from_session(session: &EditorSession, updated_at: DateTime<Utc>) -> Self {
        Self::new(
            session.title(),
            session.buffers(),
            session.settings(),
            session.history(),
            updated_at,
        )
    }

    pub fn buffers(&self) -> BufferSet {
        BufferSet::new(self.html.as_str(), self.css.as_str(), self.js.as_str())
    }

    /// The carried history as snapshots, oldest first.
    pub fn history_snapshots(&self) -> Vec<HistorySnapshot> {
        self.history
            .iter()
            .enumerate()
            .map(|(seq, entry)| entry.to_snapshot(seq as u64))
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses an imported project.
    ///
    /// `html`, `css` and `js` must be present and non-null strings. Everything else is
    /// optional: the name falls back to the default title, the timestamp to "now", settings to
    /// defaults and history to empty.
    pub fn parse(json: &str) -> Result<Self, ProjectFileError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(ProjectFileError::Json)?;
        if !value.is_object() {
            return Err(ProjectFileError::InvalidFormat {
                reason: "expected a JSON object".to_owned(),
            });
        }

        let imported: ImportedProject = serde_json::from_value(value)
            .map_err(|err| ProjectFileError::InvalidFormat {
                reason: err.to_string(),
            })?;

        let (Some(html), Some(css), Some(js)) = (imported.html, imported.css, imported.js) else {
            return Err(ProjectFileError::InvalidFormat {
                reason: "missing html, css or js".to_owned(),
            });
        };

        Ok(Self {
            project_name: imported
                .project_name
                .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            html,
            css,
            js,
            updated_at: imported.updated_at.unwrap_or_else(Utc::now),
            settings: imported
                .settings
                .map(EditorSettings::normalized)
                .unwrap_or_default(),
            history: imported.history.unwrap_or_default(),
        })
    }
}

#[derive(Debug)]
pub enum ProjectFileError {
    Json(serde_json::Error),
    InvalidFormat { reason: String },
}

impl fmt::Display for ProjectFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "project file is not valid JSON: {err}"),
            Self::InvalidFormat { reason } => write!(f, "invalid project file format: {reason}"),
        }
    }
}

impl std::error::Error for ProjectFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidFormat { .. } => None,
        }
    }
}
