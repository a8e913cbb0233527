// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Starter content for a fresh session.

use super::buffer::Language;

pub const DEFAULT_TITLE: &str = "Untitled Pen";

pub const DEFAULT_MARKUP: &str = r#"<div class="container">
  <h1>Hello, playground!</h1>
  <p>Edit the HTML, CSS and JavaScript panels to see the preview update.</p>
  <button id="greet">Click me</button>
</div>
"#;

pub const DEFAULT_STYLES: &str = r#"body {
  font-family: system-ui, sans-serif;
  margin: 0;
  padding: 2rem;
  background: #f7f7f9;
}

.container {
  max-width: 40rem;
  margin: 0 auto;
}

h1 {
  color: #3b3b98;
}
"#;

pub const DEFAULT_SCRIPT: &str = r#"const button = document.getElementById('greet');

button.addEventListener('click', () => {
  button.textContent = 'Hello again!';
});
"#;

pub fn default_text(language: Language) -> &'static str {
    match language {
        Language::Markup => DEFAULT_MARKUP,
        Language::Styles => DEFAULT_STYLES,
        Language::Script => DEFAULT_SCRIPT,
    }
}
