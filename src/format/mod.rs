// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The "format" action.
//!
//! Whitespace-only clean-up: line endings, tabs, trailing blanks and leading/trailing blank
//! lines. Styles are additionally re-indented by brace depth and have blank-line runs collapsed.
//! Markup and script keep their indentation and interior blank lines, so `<pre>` blocks and
//! template literals only lose trailing whitespace on each line.

use crate::model::Language;

pub fn format_source(language: Language, text: &str, tab_size: usize) -> String {
    let tab = " ".repeat(tab_size.max(1));
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines = normalized
        .split('\n')
        .map(|line| line.replace('\t', &tab).trim_end().to_owned());
    match language {
        Language::Styles => join_lines(&reindent_by_braces(lines, &tab), true),
        Language::Markup | Language::Script => join_lines(&lines.collect::<Vec<_>>(), false),
    }
}

fn reindent_by_braces(lines: impl Iterator<Item = String>, tab: &str) -> Vec<String> {
    let mut depth = 0usize;
    let mut out = Vec::new();

    for line in lines {
        let content = line.trim_start();
        if content.is_empty() {
            out.push(String::new());
            continue;
        }

        let leading_closes = content.chars().take_while(|&ch| ch == '}').count();
        let indent_depth = depth.saturating_sub(leading_closes);
        out.push(format!("{}{content}", tab.repeat(indent_depth)));

        for ch in content.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }

    out
}

// Drops leading/trailing blanks and ends with a newline. With `collapse`, keeps at most one
// blank line in a row.
fn join_lines(lines: &[String], collapse: bool) -> String {
    let mut out = String::new();
    let mut pending_blanks = 0usize;

    for line in lines {
        if line.is_empty() {
            if !out.is_empty() {
                pending_blanks += 1;
            }
            continue;
        }
        let blanks = if collapse {
            pending_blanks.min(1)
        } else {
            pending_blanks
        };
        for _ in 0..blanks {
            out.push('\n');
        }
        pending_blanks = 0;
        out.push_str(line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::format_source;
    use crate::model::Language;

    #[test]
    fn normalizes_whitespace() {
        let text = "\r\n\r\nconst a = 1;   \r\n\tif (a) {\r\n\t\tgo();\r\n\t}\n\n\n\nend();\n\n";
        assert_eq!(
            format_source(Language::Script, text, 2),
            "const a = 1;\n  if (a) {\n    go();\n  }\n\n\n\nend();\n"
        );
    }

    #[test]
    fn styles_collapse_blank_runs() {
        let text = "a { color: red; }\n\n\n\nb { margin: 0; }\n";
        assert_eq!(
            format_source(Language::Styles, text, 2),
            "a { color: red; }\n\nb { margin: 0; }\n"
        );
    }

    #[test]
    fn preformatted_markup_keeps_blank_lines() {
        let text = "<pre>\nfirst\n\n\nlast   \n</pre>";
        assert_eq!(
            format_source(Language::Markup, text, 2),
            "<pre>\nfirst\n\n\nlast\n</pre>\n"
        );

        let script = "const banner = `\n  one\n\n\n  two`;\n";
        assert_eq!(format_source(Language::Script, script, 2), script);
    }

    #[test]
    fn reindents_styles_by_brace_depth() {
        let text = "@media screen {\na {\ncolor: red;\n}\n      }\nb { margin: 0; }";
        assert_eq!(
            format_source(Language::Styles, text, 4),
            "@media screen {\n    a {\n        color: red;\n    }\n}\nb { margin: 0; }\n"
        );
    }

    #[test]
    fn markup_keeps_its_indentation() {
        let text = "<div>\n      <p>x</p>\n</div>";
        assert_eq!(
            format_source(Language::Markup, text, 2),
            "<div>\n      <p>x</p>\n</div>\n"
        );
    }

    #[test]
    fn empty_and_blank_text_format_to_empty() {
        assert_eq!(format_source(Language::Script, "", 2), "");
        assert_eq!(format_source(Language::Styles, " \n\t\n", 2), "");
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_source(Language::Styles, "a{\n\tcolor:red;\n}\n\n\n", 2);
        assert_eq!(format_source(Language::Styles, &once, 2), once);
    }
}
