// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One-way message channel from preview instances to the host.
//!
//! Payloads are untyped JSON, like a window message: the host decides what they mean. Each
//! sender is bound to the preview instance it was handed to, so the host can ignore late
//! messages from a preview it has already replaced.

use serde_json::Value;
use tokio::sync::mpsc;

use crate::compose::ConsoleMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeEnvelope {
    pub instance: u64,
    pub payload: Value,
}

#[derive(Debug, Clone)]
pub struct BridgeSender {
    instance: u64,
    tx: mpsc::UnboundedSender<BridgeEnvelope>,
}

impl BridgeSender {
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// A sender for the same channel, tagged with another instance.
    pub fn bind(&self, instance: u64) -> Self {
        Self {
            instance,
            tx: self.tx.clone(),
        }
    }

    /// Fire-and-forget. A message posted after the host has gone away is dropped.
    pub fn post(&self, payload: Value) {
        let _ = self.tx.send(BridgeEnvelope {
            instance: self.instance,
            payload,
        });
    }

    pub fn post_message(&self, message: &ConsoleMessage) {
        self.post(message.to_value());
    }
}

#[derive(Debug)]
pub struct BridgeReceiver {
    rx: mpsc::UnboundedReceiver<BridgeEnvelope>,
}

impl BridgeReceiver {
    /// Next message in send order; `None` once every sender is gone.
    pub async fn on_message(&mut self) -> Option<BridgeEnvelope> {
        self.rx.recv().await
    }

    pub fn try_next(&mut self) -> Option<BridgeEnvelope> {
        self.rx.try_recv().ok()
    }
}

/// Creates a channel; the returned sender is bound to instance 0.
pub fn bridge_channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BridgeSender { instance: 0, tx }, BridgeReceiver { rx })
}
