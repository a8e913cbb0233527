// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named checkpoints of the three buffers with linear undo/redo.
//!
//! This is checkpoint history, not keystroke undo: snapshots are taken on explicit actions and
//! on the auto-save timer. Appending while the cursor is not at the end discards the redo tail
//! first.

use chrono::{DateTime, Utc};

use crate::model::{BufferSet, SnapshotId};

pub const DEFAULT_MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    id: SnapshotId,
    timestamp: DateTime<Utc>,
    buffers: BufferSet,
    description: String,
}

impl HistorySnapshot {
    pub fn new(
        id: SnapshotId,
        timestamp: DateTime<Utc>,
        buffers: BufferSet,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            buffers,
            description: description.into(),
        }
    }

    pub fn id(&self) -> &SnapshotId {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn buffers(&self) -> &BufferSet {
        &self.buffers
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRing {
    snapshots: Vec<HistorySnapshot>,
    // `Some(i)` with `i < snapshots.len()` whenever the ring is non-empty.
    cursor: Option<usize>,
    max_snapshots: usize,
    next_seq: u64,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }
}

impl HistoryRing {
    pub fn with_capacity(max_snapshots: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            max_snapshots: max_snapshots.max(1),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn max_snapshots(&self) -> usize {
        self.max_snapshots
    }

    pub fn snapshots(&self) -> &[HistorySnapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistorySnapshot> {
        self.snapshots.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistorySnapshot> {
        self.snapshots.get(index)
    }

    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.cursor.and_then(|idx| self.snapshots.get(idx))
    }

    /// The newest `n` snapshots, oldest first.
    pub fn recent(&self, n: usize) -> &[HistorySnapshot] {
        let start = self.snapshots.len().saturating_sub(n);
        &self.snapshots[start..]
    }

    /// Whether `buffers` differ from the snapshot at the cursor (or the ring is empty).
    pub fn differs_from_current(&self, buffers: &BufferSet) -> bool {
        self.current()
            .map_or(true, |current| current.buffers() != buffers)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|idx| idx > 0)
    }

    pub fn can_redo(&self) -> bool {
        let len = self.snapshots.len();
        self.cursor.is_some_and(|idx| idx + 1 < len)
    }

    /// Records a snapshot stamped with the current time.
    pub fn snapshot(
        &mut self,
        buffers: &BufferSet,
        description: impl Into<String>,
    ) -> Option<usize> {
        self.snapshot_at(buffers, description, Utc::now())
    }

    /// Records a snapshot and returns its index, or `None` when nothing changed since the
    /// snapshot at the cursor.
    pub fn snapshot_at(
        &mut self,
        buffers: &BufferSet,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Option<usize> {
        if !self.differs_from_current(buffers) {
            return None;
        }

        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }

        let id = SnapshotId::from_millis(timestamp.timestamp_millis(), self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        let snapshot = HistorySnapshot::new(id, timestamp, buffers.clone(), description);
        self.snapshots.push(snapshot);

        if self.snapshots.len() > self.max_snapshots {
            let excess = self.snapshots.len() - self.max_snapshots;
            self.snapshots.drain(..excess);
        }

        let last = self.snapshots.len() - 1;
        self.cursor = Some(last);
        Some(last)
    }

    /// Moves the cursor to `index` and returns that snapshot. Out-of-range requests change
    /// nothing.
    pub fn restore(&mut self, index: usize) -> Option<&HistorySnapshot> {
        if index >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(index);
        self.snapshots.get(index)
    }

    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        let target = self.cursor?.checked_sub(1)?;
        self.restore(target)
    }

    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        let target = self.cursor? + 1;
        self.restore(target)
    }

    /// Lowers or raises the capacity, evicting the oldest snapshots if needed.
    pub fn set_max_snapshots(&mut self, max_snapshots: usize) {
        self.max_snapshots = max_snapshots.max(1);
        if self.snapshots.len() > self.max_snapshots {
            let excess = self.snapshots.len() - self.max_snapshots;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.map(|idx| idx.saturating_sub(excess));
        }
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    /// Replaces the whole ring, e.g. with the history carried by an imported project. The
    /// cursor lands on the newest snapshot; anything over capacity is evicted oldest first.
    pub fn replace_with(&mut self, snapshots: impl IntoIterator<Item = HistorySnapshot>) {
        self.snapshots = snapshots.into_iter().collect();
        if self.snapshots.len() > self.max_snapshots {
            let excess = self.snapshots.len() - self.max_snapshots;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len().checked_sub(1);
        // Continue past the highest carried sequence number so fresh ids stay unique.
        self.next_seq = self
            .snapshots
            .iter()
            .filter_map(|snapshot| snapshot.id().as_str().rsplit_once('-'))
            .filter_map(|(_, seq)| seq.parse::<u64>().ok())
            .map(|seq| seq.saturating_add(1))
            .fold(self.next_seq.max(self.snapshots.len() as u64), u64::max);
    }
}
