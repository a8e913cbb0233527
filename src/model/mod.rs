// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A pen is three source buffers (markup, styles, script). Validators attach diagnostics to
//! buffers by line; history snapshots are identified by [`SnapshotId`].

pub mod buffer;
pub mod diagnostic;
pub mod ids;
pub mod templates;

pub use buffer::{BufferSet, Language, ParseLanguageError, SourceBuffer};
pub use diagnostic::{Diagnostic, LanguageDiagnostic, Severity};
pub use ids::{Id, IdError, SnapshotId};
