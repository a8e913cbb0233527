// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live-preview event loop.
//!
//! [`PreviewHost`] owns an [`EditorSession`](crate::session::EditorSession) and a
//! [`PreviewSandbox`]. Edits restart two independent debounce timers (validation and preview);
//! when a timer runs out the host revalidates or recomposes. Every recomposition loads a new
//! preview instance, and console messages from older instances are discarded.

pub mod channel;
pub mod debounce;
pub mod host;

pub use channel::{bridge_channel, BridgeEnvelope, BridgeReceiver, BridgeSender};
pub use debounce::{sleep_until_deadline, Debouncer};
pub use host::{HostEvent, PreviewHost, PreviewSandbox};

#[cfg(test)]
mod tests;
