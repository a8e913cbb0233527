// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Console bridge protocol.
//!
//! The composed document carries [`CONSOLE_BRIDGE_SCRIPT`], which wraps the preview's console
//! methods and top-level error hooks. Every call is forwarded to the parent frame as
//! `{ "type": <kind>, "data": <string> }` and then handed to the original console method.
//! Delivery is fire-and-forget: there is no acknowledgement and no retry.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Injected into `<head>` ahead of any user script.
pub const CONSOLE_BRIDGE_SCRIPT: &str = r#"(function () {
  var send = function (type, data) {
    try {
      window.parent.postMessage({ type: type, data: data }, '*');
    } catch (e) {}
  };
  var format = function (args) {
    return Array.prototype.map.call(args, function (arg) {
      if (typeof arg === 'string') return arg;
      if (arg !== null && typeof arg === 'object') {
        try { return JSON.stringify(arg); } catch (e) { return String(arg); }
      }
      return String(arg);
    }).join(' ');
  };
  ['log', 'info', 'warn', 'error', 'clear'].forEach(function (method) {
    var original = console[method];
    console[method] = function () {
      send('console.' + method, format(arguments));
      if (original) original.apply(console, arguments);
    };
  });
  window.addEventListener('error', function (event) {
    var where = event.lineno ? ' (line ' + event.lineno + ', column ' + event.colno + ')' : '';
    send('error', String(event.message) + where);
  });
  window.addEventListener('unhandledrejection', function (event) {
    var reason = event.reason;
    send('error', 'Unhandled promise rejection: ' + (reason && reason.message ? reason.message : String(reason)));
  });
})();"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleKind {
    #[serde(rename = "console.log")]
    Log,
    #[serde(rename = "console.info")]
    Info,
    #[serde(rename = "console.warn")]
    Warn,
    #[serde(rename = "console.error")]
    Error,
    #[serde(rename = "console.clear")]
    Clear,
    /// Uncaught error or unhandled rejection.
    #[serde(rename = "error")]
    Uncaught,
}

impl ConsoleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "console.log",
            Self::Info => "console.info",
            Self::Warn => "console.warn",
            Self::Error => "console.error",
            Self::Clear => "console.clear",
            Self::Uncaught => "error",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Self::Error | Self::Uncaught)
    }
}

impl fmt::Display for ConsoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message crossing the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    #[serde(rename = "type")]
    pub kind: ConsoleKind,
    pub data: String,
}

impl ConsoleMessage {
    pub fn new(kind: ConsoleKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Builds a message from raw console arguments, serialising them like the injected script.
    pub fn from_args(kind: ConsoleKind, args: &[Value]) -> Self {
        Self::new(kind, format_console_args(args))
    }

    /// Interprets an untyped payload received from the preview frame.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        if !value.is_object() {
            return Err(BridgeError::NotAnObject);
        }
        serde_json::from_value(value).map_err(BridgeError::Shape)
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "type": self.kind.as_str(), "data": self.data })
    }
}

#[derive(Debug)]
pub enum BridgeError {
    NotAnObject,
    Shape(serde_json::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("bridge payload is not an object"),
            Self::Shape(err) => write!(f, "unrecognised bridge payload: {err}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotAnObject => None,
            Self::Shape(err) => Some(err),
        }
    }
}

/// Serialises console arguments the way the injected script does: strings verbatim,
/// objects and arrays as JSON, everything else through string coercion, joined by spaces.
pub fn format_console_args(args: &[Value]) -> String {
    let mut out = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        match arg {
            Value::String(s) => out.push_str(s),
            Value::Number(n) => out.push_str(&format_number(n)),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Null => out.push_str("null"),
            Value::Array(_) | Value::Object(_) => out.push_str(&arg.to_string()),
        }
    }
    out
}

// Integral floats print without a fractional part, like `String(1.0)` does.
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}
