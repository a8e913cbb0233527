// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use super::ValidatorOptions;
use crate::model::Diagnostic;

struct ScriptPatterns {
    console_call: Regex,
    braceless_if: Regex,
}

fn patterns() -> &'static ScriptPatterns {
    static PATTERNS: OnceLock<ScriptPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ScriptPatterns {
        console_call: Regex::new(r"\bconsole\s*\.\s*(?:log|info|warn|error|debug)\s*\(")
            .expect("console pattern"),
        braceless_if: Regex::new(r"\bif\s*\(.*\)\s*[^\s{]").expect("if pattern"),
    })
}

/// Pattern-based advisories for the script buffer. Never a correctness check.
pub fn validate_script(text: &str, options: ValidatorOptions) -> Vec<Diagnostic> {
    let patterns = patterns();
    let mut diagnostics = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let code = strip_line_comment(line);

        if options.lint_console && patterns.console_call.is_match(code) {
            diagnostics.push(Diagnostic::info(line_no, "Console statement found"));
        }

        if !code.contains('{') && patterns.braceless_if.is_match(code) {
            diagnostics.push(Diagnostic::warning(
                line_no,
                "Consider using braces for if statements",
            ));
        }
    }

    diagnostics
}

// Drops a trailing `// ...` comment; `://` inside URLs is left alone.
fn strip_line_comment(line: &str) -> &str {
    let mut search_from = 0;
    while let Some(pos) = line[search_from..].find("//") {
        let at = search_from + pos;
        if at > 0 && line.as_bytes()[at - 1] == b':' {
            search_from = at + 2;
            continue;
        }
        return &line[..at];
    }
    line
}
