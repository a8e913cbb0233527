// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Livepen: a live-preview playground engine for HTML, CSS and JavaScript.
//!
//! Buffers are composed into one previewable document, checked by lightweight validators,
//! versioned in a bounded history, and shared through URL-safe links or project files.

pub mod compose;
pub mod config;
pub mod format;
pub mod history;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod session;
pub mod share;
pub mod store;
pub mod validate;
