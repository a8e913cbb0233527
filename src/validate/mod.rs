// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Advisory, pattern-based checks over the three buffers.
//!
//! None of these are parsers. They scan line by line with small regexes and counters, so they
//! miss plenty and occasionally misfire; the preview always runs regardless of what they report.

pub mod markup;
pub mod script;
pub mod styles;

use crate::config::EditorSettings;
use crate::model::{BufferSet, Language, LanguageDiagnostic};

pub use markup::validate_markup;
pub use script::validate_script;
pub use styles::validate_styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub lint_console: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self { lint_console: true }
    }
}

impl From<&EditorSettings> for ValidatorOptions {
    fn from(settings: &EditorSettings) -> Self {
        Self {
            lint_console: settings.lint_console,
        }
    }
}

/// Runs every validator and tags the results with their buffer.
///
/// Output is ordered by language (markup, styles, script), then by the order each validator
/// reported.
pub fn validate_all(buffers: &BufferSet, options: ValidatorOptions) -> Vec<LanguageDiagnostic> {
    let mut out = Vec::new();
    for language in Language::ALL {
        let text = buffers.text(language);
        let diagnostics = match language {
            Language::Markup => validate_markup(text),
            Language::Styles => validate_styles(text),
            Language::Script => validate_script(text, options),
        };
        let tagged = diagnostics.into_iter().map(|diagnostic| LanguageDiagnostic {
            language,
            diagnostic,
        });
        out.extend(tagged);
    }
    out
}

// Line number reported for end-of-buffer findings.
pub(crate) fn last_line(text: &str) -> usize {
    text.lines().count().max(1)
}
