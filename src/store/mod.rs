// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Project export/import and on-disk persistence.
//!
//! A project file is a JSON document holding the three buffers, the editor settings and a short
//! tail of history. The same format is used for explicit export/import and for the working copy
//! the CLI keeps on disk.

pub mod project_file;
pub mod project_store;

pub use project_file::{ProjectFile, ProjectFileError, ProjectHistoryEntry, EXPORTED_HISTORY_LEN};
pub use project_store::{ProjectStore, StoreError, WriteDurability};
