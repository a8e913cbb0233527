// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::bridge::{ConsoleKind, ConsoleMessage};

pub const DEFAULT_CONSOLE_MAX_ENTRIES: usize = 100;
pub const DEFAULT_CONSOLE_RETAIN_ENTRIES: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEntry {
    seq: u64,
    instance: u64,
    message: ConsoleMessage,
}

impl ConsoleEntry {
    /// Receipt order across the whole session; never reused after pruning.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The preview instance that emitted the entry.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn kind(&self) -> ConsoleKind {
        self.message.kind
    }

    pub fn data(&self) -> &str {
        &self.message.data
    }

    pub fn message(&self) -> &ConsoleMessage {
        &self.message
    }
}

/// Host-side console output, in receipt order.
///
/// Once the log grows past `max_entries` it is pruned down to the newest `retain_entries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLog {
    entries: Vec<ConsoleEntry>,
    next_seq: u64,
    max_entries: usize,
    retain_entries: usize,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::with_limits(DEFAULT_CONSOLE_MAX_ENTRIES, DEFAULT_CONSOLE_RETAIN_ENTRIES)
    }
}

impl ConsoleLog {
    pub fn with_limits(max_entries: usize, retain_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: Vec::new(),
            next_seq: 0,
            max_entries,
            retain_entries: retain_entries.clamp(1, max_entries),
        }
    }

    pub fn set_limits(&mut self, max_entries: usize, retain_entries: usize) {
        self.max_entries = max_entries.max(1);
        self.retain_entries = retain_entries.clamp(1, self.max_entries);
        self.prune();
    }

    /// Appends a message. `console.clear` empties the log instead of adding an entry.
    pub fn push(&mut self, instance: u64, message: ConsoleMessage) {
        if message.kind == ConsoleKind::Clear {
            self.entries.clear();
            return;
        }

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.push(ConsoleEntry {
            seq,
            instance,
            message,
        });
        self.prune();
    }

    fn prune(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.retain_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind().is_error())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleEntry, ConsoleLog};
    use crate::compose::bridge::{ConsoleKind, ConsoleMessage};

    fn log_message(data: &str) -> ConsoleMessage {
        ConsoleMessage::new(ConsoleKind::Log, data)
    }

    #[test]
    fn keeps_receipt_order() {
        let mut log = ConsoleLog::default();
        log.push(1, ConsoleMessage::new(ConsoleKind::Log, "a"));
        log.push(1, ConsoleMessage::new(ConsoleKind::Warn, "b"));
        log.push(1, ConsoleMessage::new(ConsoleKind::Error, "c"));

        let kinds: Vec<_> = log.entries().iter().map(ConsoleEntry::kind).collect();
        assert_eq!(
            kinds,
            vec![ConsoleKind::Log, ConsoleKind::Warn, ConsoleKind::Error]
        );
        let data: Vec<_> = log.entries().iter().map(ConsoleEntry::data).collect();
        assert_eq!(data, vec!["a", "b", "c"]);
        assert_eq!(log.error_count(), 1);
    }

    #[test]
    fn prunes_to_retained_tail_once_over_capacity() {
        let mut log = ConsoleLog::default();
        for idx in 0..100 {
            log.push(1, log_message(&idx.to_string()));
        }
        assert_eq!(log.len(), 100);

        log.push(1, log_message("100"));
        assert_eq!(log.len(), 50);
        assert_eq!(log.entries()[0].data(), "51");
        assert_eq!(log.entries()[49].data(), "100");
        assert_eq!(log.entries()[49].seq(), 100);
    }

    #[test]
    fn clear_message_empties_the_log() {
        let mut log = ConsoleLog::default();
        log.push(1, log_message("a"));
        log.push(1, ConsoleMessage::new(ConsoleKind::Clear, ""));
        assert!(log.is_empty());

        log.push(1, log_message("b"));
        assert_eq!(log.entries()[0].seq(), 1);
    }

    #[test]
    fn tightening_limits_prunes_immediately() {
        let mut log = ConsoleLog::with_limits(10, 5);
        for idx in 0..8 {
            log.push(1, log_message(&idx.to_string()));
        }
        log.set_limits(4, 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].data(), "6");
    }
}
