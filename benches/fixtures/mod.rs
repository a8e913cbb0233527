// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use livepen::model::BufferSet;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn blocks(self) -> usize {
        match self {
            Self::Small => 4,
            Self::Medium => 64,
            Self::Large => 1024,
        }
    }
}

pub const CASES: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

/// A pen whose three buffers grow linearly with the case size. Markup nests a few levels,
/// styles mix nested at-rules with plain rules, and the script has console calls and
/// brace-less ifs so every validator rule has something to look at.
pub fn pen(case: Case) -> BufferSet {
    let blocks = case.blocks();
    let mut markup =
        String::from("<!DOCTYPE html>\n<html>\n<head><title>bench</title></head>\n<body>\n");
    let mut styles = String::new();
    let mut script = String::new();

    for idx in 0..blocks {
        markup.push_str(&format!(
            "<section id=\"s{idx}\">\n  <h2>Section {idx}</h2>\n  <p>Text with <em>emphasis</em> and <a href=\"#s{idx}\">a link</a>.<br>\n  <img src=\"i{idx}.png\" alt=\"\"></p>\n  <ul><li>one</li><li>two</li></ul>\n</section>\n"
        ));
        if idx % 8 == 0 {
            styles.push_str(&format!(
                "@media (min-width: {}px) {{\n  #s{idx} h2 {{\n    font-size: 2rem;\n  }}\n}}\n",
                320 + idx
            ));
        }
        styles.push_str(&format!(
            "#s{idx} {{\n  margin: {idx}px 0;\n  color: #333;\n  padding: 0 1rem\n}}\n"
        ));
        script.push_str(&format!(
            "function handler{idx}(event) {{\n  if (event.detail > {idx}) return;\n  console.log('handled', {idx}); // https://example.test/{idx}\n}}\n"
        ));
    }
    markup.push_str("</body>\n</html>\n");

    BufferSet::new(markup, styles, script)
}

pub fn checksum(text: &str) -> u64 {
    text.bytes().fold(0xcbf2_9ce4_8422_2325, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
