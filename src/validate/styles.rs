// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use super::last_line;
use crate::model::Diagnostic;

fn declaration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-{0,2}[A-Za-z][A-Za-z0-9-]*\s*:\s*[^{};]+$").expect("declaration pattern")
    })
}

/// Checks brace balance and flags declarations missing their `;`.
pub fn validate_styles(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut depth = 0usize;
    let mut in_comment = false;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let visible = strip_block_comments(line, &mut in_comment);
        let trimmed = visible.trim();

        // A declaration is judged against the depth it starts at.
        let inside_block = depth > 0;

        for ch in trimmed.chars() {
            match ch {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    diagnostics.push(Diagnostic::error(line_no, "Unexpected closing brace"));
                }
                '}' => depth -= 1,
                _ => {}
            }
        }

        if inside_block && !trimmed.ends_with(',') && declaration_pattern().is_match(trimmed) {
            diagnostics.push(Diagnostic::warning(line_no, "Missing semicolon"));
        }
    }

    if depth > 0 {
        let noun = if depth == 1 { "brace" } else { "braces" };
        diagnostics.push(Diagnostic::error(
            last_line(text),
            format!("{depth} unclosed {noun}"),
        ));
    }

    diagnostics
}

// `in_comment` carries an open `/*` over to the next line.
fn strip_block_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_comment {
            match rest.find("*/") {
                Some(end) => {
                    rest = &rest[end + 2..];
                    *in_comment = false;
                }
                None => return out,
            }
        } else {
            match rest.find("/*") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    rest = &rest[start + 2..];
                    *in_comment = true;
                }
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }
}
