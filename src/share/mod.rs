// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Link-based sharing.
//!
//! A share link carries one outer query parameter, `share`, whose value is itself a query
//! string with four fields:
//!
//! - `h`, `c`, `j`: markup, styles and script, each percent-encoded with `encodeURIComponent`
//!   rules and then standard base64-encoded
//! - `t`: the raw title
//!
//! Decoding is all-or-nothing: one malformed field rejects the whole link, so a session either
//! adopts the shared project completely or keeps its defaults.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::model::{BufferSet, Language};

pub const SHARE_PARAM: &str = "share";

const FIELD_MARKUP: &str = "h";
const FIELD_STYLES: &str = "c";
const FIELD_SCRIPT: &str = "j";
const FIELD_TITLE: &str = "t";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The decoded content of a share link. Absent fields leave the session's buffers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedProject {
    pub markup: Option<String>,
    pub styles: Option<String>,
    pub script: Option<String>,
    pub title: Option<String>,
}

impl SharedProject {
    pub fn from_buffers(buffers: &BufferSet, title: &str) -> Self {
        Self {
            markup: Some(buffers.markup().to_owned()),
            styles: Some(buffers.styles().to_owned()),
            script: Some(buffers.script().to_owned()),
            title: Some(title.to_owned()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_none()
            && self.styles.is_none()
            && self.script.is_none()
            && self.title.is_none()
    }

    pub fn text(&self, language: Language) -> Option<&str> {
        match language {
            Language::Markup => self.markup.as_deref(),
            Language::Styles => self.styles.as_deref(),
            Language::Script => self.script.as_deref(),
        }
    }

    /// Writes every present buffer field into `buffers`.
    pub fn apply_to(&self, buffers: &mut BufferSet) {
        for language in Language::ALL {
            if let Some(text) = self.text(language) {
                buffers.set_text(language, text);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    Base64 {
        field: &'static str,
        source: base64::DecodeError,
    },
    MalformedPercent {
        field: &'static str,
    },
    Utf8 {
        field: &'static str,
        source: std::str::Utf8Error,
    },
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 { field, source } => {
                write!(f, "share field '{field}' is not valid base64: {source}")
            }
            Self::MalformedPercent { field } => {
                write!(
                    f,
                    "share field '{field}' contains a malformed percent escape"
                )
            }
            Self::Utf8 { field, source } => {
                write!(
                    f,
                    "share field '{field}' does not decode to UTF-8 text: {source}"
                )
            }
        }
    }
}

impl std::error::Error for ShareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Base64 { source, .. } => Some(source),
            Self::MalformedPercent { .. } => None,
            Self::Utf8 { source, .. } => Some(source),
        }
    }
}

pub fn encode_field(text: &str) -> String {
    let escaped = utf8_percent_encode(text, URI_COMPONENT).to_string();
    STANDARD.encode(escaped.as_bytes())
}

pub fn decode_field(field: &'static str, encoded: &str) -> Result<String, ShareError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|source| ShareError::Base64 { field, source })?;
    let escaped =
        std::str::from_utf8(&bytes).map_err(|source| ShareError::Utf8 { field, source })?;

    if !has_well_formed_escapes(escaped) {
        return Err(ShareError::MalformedPercent { field });
    }

    percent_decode_str(escaped)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|source| ShareError::Utf8 { field, source })
}

// `percent_decode_str` passes stray `%` through; a share link never contains one.
fn has_well_formed_escapes(escaped: &str) -> bool {
    let bytes = escaped.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let hex = bytes.get(idx + 1..idx + 3);
            if !hex.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }
    true
}

/// Builds the value of the outer `share` parameter.
pub fn encode_share(buffers: &BufferSet, title: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(FIELD_MARKUP, &encode_field(buffers.markup()))
        .append_pair(FIELD_STYLES, &encode_field(buffers.styles()))
        .append_pair(FIELD_SCRIPT, &encode_field(buffers.script()))
        .append_pair(FIELD_TITLE, title)
        .finish()
}

/// Decodes the value of the outer `share` parameter. Unknown fields are ignored.
pub fn decode_share(value: &str) -> Result<SharedProject, ShareError> {
    let mut shared = SharedProject::default();
    for (key, raw) in form_urlencoded::parse(value.as_bytes()) {
        match key.as_ref() {
            FIELD_MARKUP => shared.markup = Some(decode_field(FIELD_MARKUP, &raw)?),
            FIELD_STYLES => shared.styles = Some(decode_field(FIELD_STYLES, &raw)?),
            FIELD_SCRIPT => shared.script = Some(decode_field(FIELD_SCRIPT, &raw)?),
            FIELD_TITLE => shared.title = Some(raw.into_owned()),
            _ => {}
        }
    }
    Ok(shared)
}

/// Returns `base` with its `share` parameter set to the encoded project.
pub fn share_url(base: &Url, buffers: &BufferSet, title: &str) -> Url {
    let mut url = without_share_param(base);
    let value = encode_share(buffers, title);
    url.query_pairs_mut().append_pair(SHARE_PARAM, &value);
    url
}

/// Returns `url` with any `share` parameter removed; other parameters keep their order.
pub fn without_share_param(url: &Url) -> Url {
    let kept = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    let mut stripped = url.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}

/// Looks for a `share` parameter. When present, returns its decode result together with the
/// URL the page should display once the share has been adopted.
pub fn take_share_param(url: &Url) -> Option<(Result<SharedProject, ShareError>, Url)> {
    let (_, value) = url.query_pairs().find(|(key, _)| key == SHARE_PARAM)?;
    Some((decode_share(&value), without_share_param(url)))
}
