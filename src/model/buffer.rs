// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::templates;

/// The language of a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Markup,
    Styles,
    Script,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Markup, Language::Styles, Language::Script];

    /// Short name used in file extensions, share fields and CLI output.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Styles => "css",
            Self::Script => "js",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Markup => "HTML",
            Self::Styles => "CSS",
            Self::Script => "JavaScript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError {
    value: String,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown language '{}' (expected html/css/js)",
            self.value
        )
    }
}

impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "markup" => Ok(Self::Markup),
            "css" | "styles" => Ok(Self::Styles),
            "js" | "javascript" | "script" => Ok(Self::Script),
            _ => Err(ParseLanguageError {
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBuffer {
    language: Language,
    text: String,
}

impl SourceBuffer {
    pub fn new(language: Language, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
        }
    }

    pub fn with_default_template(language: Language) -> Self {
        Self::new(language, templates::default_text(language))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn reset(&mut self) {
        self.text = templates::default_text(self.language).to_owned();
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }
}

/// The three live buffers of a playground session.
///
/// Equality is structural; history dedup relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSet {
    markup: SourceBuffer,
    styles: SourceBuffer,
    script: SourceBuffer,
}

impl Default for BufferSet {
    fn default() -> Self {
        Self {
            markup: SourceBuffer::with_default_template(Language::Markup),
            styles: SourceBuffer::with_default_template(Language::Styles),
            script: SourceBuffer::with_default_template(Language::Script),
        }
    }
}

impl BufferSet {
    pub fn new(
        markup: impl Into<String>,
        styles: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: SourceBuffer::new(Language::Markup, markup),
            styles: SourceBuffer::new(Language::Styles, styles),
            script: SourceBuffer::new(Language::Script, script),
        }
    }

    pub fn empty() -> Self {
        Self::new("", "", "")
    }

    pub fn get(&self, language: Language) -> &SourceBuffer {
        match language {
            Language::Markup => &self.markup,
            Language::Styles => &self.styles,
            Language::Script => &self.script,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut SourceBuffer {
        match language {
            Language::Markup => &mut self.markup,
            Language::Styles => &mut self.styles,
            Language::Script => &mut self.script,
        }
    }

    pub fn text(&self, language: Language) -> &str {
        self.get(language).text()
    }

    pub fn markup(&self) -> &str {
        self.markup.text()
    }

    pub fn styles(&self) -> &str {
        self.styles.text()
    }

    pub fn script(&self) -> &str {
        self.script.text()
    }

    /// Replaces one buffer's text, returning whether the content actually changed.
    pub fn set_text(&mut self, language: Language, text: impl Into<String>) -> bool {
        let text = text.into();
        let buffer = self.get_mut(language);
        if buffer.text() == text {
            return false;
        }
        buffer.set_text(text);
        true
    }

    pub fn reset(&mut self) {
        self.markup.reset();
        self.styles.reset();
        self.script.reset();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceBuffer> {
        [&self.markup, &self.styles, &self.script].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferSet, Language};

    #[test]
    fn language_parses_short_and_long_names() {
        assert_eq!("html".parse::<Language>(), Ok(Language::Markup));
        assert_eq!("CSS".parse::<Language>(), Ok(Language::Styles));
        assert_eq!("javascript".parse::<Language>(), Ok(Language::Script));
        "rust".parse::<Language>().unwrap_err();
    }

    #[test]
    fn set_text_reports_changes_only() {
        let mut buffers = BufferSet::empty();
        assert!(buffers.set_text(Language::Script, "let a = 1;"));
        assert!(!buffers.set_text(Language::Script, "let a = 1;"));
        assert_eq!(buffers.script(), "let a = 1;");
    }

    #[test]
    fn reset_restores_templates() {
        let mut buffers = BufferSet::empty();
        buffers.reset();
        assert_eq!(buffers, BufferSet::default());
        assert!(buffers.markup().contains("<h1>"));
    }
}
