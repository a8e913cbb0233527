// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::buffer::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A line-addressed finding produced by a validator pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    line: usize,
    message: String,
    severity: Severity,
}

impl Diagnostic {
    pub fn new(line: usize, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line: line.max(1),
            message: message.into(),
            severity,
        }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Severity::Error, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Severity::Warning, message)
    }

    pub fn info(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Severity::Info, message)
    }

    /// 1-based line within the owning buffer.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// A diagnostic tagged with the buffer it was reported against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDiagnostic {
    pub language: Language,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl fmt::Display for LanguageDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.language.extension(),
            self.diagnostic.line(),
            self.diagnostic.severity(),
            self.diagnostic.message()
        )
    }
}
