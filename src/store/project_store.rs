// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::project_file::{ProjectFile, ProjectFileError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Also flushes the file and its directory entry to stable storage where the platform
    /// allows it.
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Project {
        path: PathBuf,
        source: ProjectFileError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "failed to serialize {path:?}: {source}"),
            Self::Project { path, source } => write!(f, "cannot load {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Project { source, .. } => Some(source),
        }
    }
}

/// Reads and writes a single project file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStore {
    path: PathBuf,
    durability: WriteDurability,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the project, or `Ok(None)` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<ProjectFile>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        ProjectFile::parse(&json)
            .map(Some)
            .map_err(|source| StoreError::Project {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, project: &ProjectFile) -> Result<(), StoreError> {
        let mut json = project
            .to_json_pretty()
            .map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        json.push('\n');
        write_atomic(&self.path, json.as_bytes(), self.durability)?;
        debug!(path = ?self.path, bytes = json.len(), "project saved");
        Ok(())
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let io_err = |path: &Path, source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| io_err(parent, source))?;

    let Some(file_name) = path.file_name() else {
        let source = io::Error::new(io::ErrorKind::InvalidInput, "path has no file name");
        return Err(io_err(path, source));
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_name = format!(".livepen.tmp.{}.{nanos}", file_name.to_string_lossy());
    let tmp_path = parent.join(tmp_name);

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| io_err(&tmp_path, source))?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(&tmp_path, source));
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| io_err(&tmp_path, source))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(path, source));
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| io_err(parent, source))?;
            dir.sync_all().map_err(|source| io_err(parent, source))?;
        }
    }

    Ok(())
}
