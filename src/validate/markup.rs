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

/// Elements that never take a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Elements whose content is raw text; tags inside them are not markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?>").expect("tag pattern")
    })
}

#[derive(Debug)]
struct OpenTag {
    name: String,
}

/// Checks tag nesting line by line.
///
/// Close-tag policy: a close that matches the innermost open tag pops it. Any other close is
/// reported once as a mismatch; if the name is open further out, everything up to and
/// including it is popped, otherwise the close is discarded. Tags still open at the end are
/// listed in a single diagnostic on the last line.
pub fn validate_markup(text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut in_comment = false;
    let mut raw_text: Option<String> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let visible = strip_comments(line, &mut in_comment);

        for captures in tag_pattern().captures_iter(&visible) {
            let whole = &captures[0];
            let is_close = !captures[1].is_empty();
            let name = captures[2].to_ascii_lowercase();

            if let Some(raw) = raw_text.as_deref() {
                if !(is_close && raw == name) {
                    continue;
                }
                raw_text = None;
            }

            if is_close {
                close_tag(&mut stack, &name, line_no, &mut diagnostics);
                continue;
            }

            if whole.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str()) {
                continue;
            }
            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                raw_text = Some(name.clone());
            }
            stack.push(OpenTag { name });
        }
    }

    if !stack.is_empty() {
        let names: Vec<_> = stack.iter().map(|tag| tag.name.as_str()).collect();
        let message = format!("Unclosed tags: {}", names.join(", "));
        diagnostics.push(Diagnostic::error(last_line(text), message));
    }

    diagnostics
}

fn close_tag(stack: &mut Vec<OpenTag>, name: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let Some(top) = stack.last() else {
        let message = format!("Unexpected closing tag </{name}>");
        out.push(Diagnostic::error(line_no, message));
        return;
    };

    if top.name == name {
        stack.pop();
        return;
    }

    let expected = &top.name;
    let message = format!("Mismatched closing tag: expected </{expected}> but found </{name}>");
    out.push(Diagnostic::error(line_no, message));

    if let Some(pos) = stack.iter().rposition(|tag| tag.name == name) {
        stack.truncate(pos);
    }
}

// Removes `<!-- ... -->` spans, carrying an unterminated comment over to the next line.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if *in_comment {
            match rest.find("-->") {
                Some(end) => {
                    rest = &rest[end + 3..];
                    *in_comment = false;
                }
                None => return out,
            }
        } else {
            match rest.find("<!--") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    rest = &rest[start + 4..];
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
