// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Preview composition.
//!
//! The composer folds the three buffers into one self-contained HTML document that the sandbox
//! can load as-is. It never validates its input: malformed buffers produce a malformed
//! document, and rendering that is the sandbox's problem.

pub mod bridge;
pub mod console;

use std::sync::OnceLock;

use regex::Regex;

use crate::model::BufferSet;

pub use bridge::{
    format_console_args, BridgeError, ConsoleKind, ConsoleMessage, CONSOLE_BRIDGE_SCRIPT,
};
pub use console::{ConsoleEntry, ConsoleLog};

struct WrapperPatterns {
    doctype: Regex,
    head: Regex,
    html: Regex,
    body: Regex,
}

fn wrapper_patterns() -> &'static WrapperPatterns {
    static PATTERNS: OnceLock<WrapperPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| WrapperPatterns {
        doctype: Regex::new(r"(?i)<!doctype[^>]*>").expect("doctype pattern"),
        head: Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").expect("head pattern"),
        html: Regex::new(r"(?i)</?html\b[^>]*>").expect("html pattern"),
        body: Regex::new(r"(?i)</?body\b[^>]*>").expect("body pattern"),
    })
}

/// Removes document-level wrapper tags so full documents and fragments embed the same way.
///
/// The whole `<head>` element is dropped, including any `<title>` or `<style>` inside it.
pub fn strip_document_wrapper(markup: &str) -> String {
    let patterns = wrapper_patterns();
    let stripped = patterns.doctype.replace_all(markup, "");
    let stripped = patterns.head.replace_all(&stripped, "");
    let stripped = patterns.html.replace_all(&stripped, "");
    let stripped = patterns.body.replace_all(&stripped, "");
    stripped.trim().to_owned()
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Composes the preview document.
///
/// Pure: the same inputs always produce the same string.
pub fn compose_document(markup: &str, styles: &str, script: &str, title: &str) -> String {
    let body = strip_document_wrapper(markup);
    let title = escape_text(title);

    let mut doc = String::with_capacity(
        body.len() + styles.len() + script.len() + CONSOLE_BRIDGE_SCRIPT.len() + 256,
    );
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    doc.push_str("<meta charset=\"utf-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    doc.push_str("<title>");
    doc.push_str(&title);
    doc.push_str("</title>\n<style>\n");
    doc.push_str(styles);
    doc.push_str("\n</style>\n<script>\n");
    doc.push_str(CONSOLE_BRIDGE_SCRIPT);
    doc.push_str("\n</script>\n</head>\n<body>\n");
    doc.push_str(&body);
    doc.push_str("\n<script>\n");
    doc.push_str(script);
    doc.push_str("\n</script>\n</body>\n</html>\n");
    doc
}

pub fn compose_buffers(buffers: &BufferSet, title: &str) -> String {
    compose_document(buffers.markup(), buffers.styles(), buffers.script(), title)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{compose_document, strip_document_wrapper, CONSOLE_BRIDGE_SCRIPT};

    #[test]
    fn composing_twice_is_identical() {
        let a = compose_document("<p>hi</p>", "p { color: red; }", "console.log(1)", "Demo");
        let b = compose_document("<p>hi</p>", "p { color: red; }", "console.log(1)", "Demo");
        assert_eq!(a, b);
    }

    #[test]
    fn full_document_and_fragment_compose_the_same() {
        let full = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>Ignored</title>\n</head>\n<body class=\"x\">\n<p>hi</p>\n</body>\n</html>";
        let fragment = "<p>hi</p>";
        assert_eq!(
            compose_document(full, "", "", "T"),
            compose_document(fragment, "", "", "T"),
        );
    }

    #[rstest]
    #[case("<HTML><BODY><b>x</b></BODY></HTML>", "<b>x</b>")]
    #[case("<body>\n  <div>a</div>\n</body>", "<div>a</div>")]
    #[case("<div>no wrapper</div>", "<div>no wrapper</div>")]
    #[case("", "")]
    fn strips_wrapper_tags(#[case] markup: &str, #[case] expected: &str) {
        assert_eq!(strip_document_wrapper(markup), expected);
    }

    #[test]
    fn bridge_is_installed_before_user_script() {
        let doc = compose_document("<p>x</p>", "", "console.log('user')", "T");
        let bridge_at = doc.find(CONSOLE_BRIDGE_SCRIPT).expect("bridge embedded");
        let user_at = doc.find("console.log('user')").expect("script embedded");
        assert!(bridge_at < user_at);
        assert!(doc.find("<p>x</p>").expect("markup embedded") < user_at);
    }

    #[test]
    fn empty_inputs_still_produce_a_document() {
        let doc = compose_document("", "", "", "");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title></title>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[test]
    fn title_is_escaped_but_buffers_are_not() {
        let doc = compose_document("<i>a & b</i>", "a > b {}", "", "Tom & <Jerry>");
        assert!(doc.contains("<title>Tom &amp; &lt;Jerry&gt;</title>"));
        assert!(doc.contains("<i>a & b</i>"));
        assert!(doc.contains("a > b {}"));
    }
}
