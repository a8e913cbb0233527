// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::channel::{bridge_channel, BridgeEnvelope, BridgeReceiver, BridgeSender};
use super::debounce::{sleep_until_deadline, Debouncer};
use crate::compose::ConsoleMessage;
use crate::model::Language;
use crate::session::EditorSession;

/// Where composed documents go to run.
///
/// In a browser this is an iframe; the host only needs to hand over the document and a sender
/// for the bridge messages that document will emit.
pub trait PreviewSandbox {
    /// Replaces whatever is currently running with `document`.
    fn load(&mut self, instance: u64, document: &str, outbox: BridgeSender);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Edit { language: Language, text: String },
    /// Recompose and revalidate now, skipping the debounce.
    Run,
    Save,
    SaveVersion(String),
    Format,
    Undo,
    Redo,
    Restore(usize),
    SetAutoSave(bool),
    ClearConsole,
    Shutdown,
}

/// Drives one editor session against one sandbox.
///
/// All state is owned by the host and mutated from a single task; the sandbox talks back only
/// through the bridge channel.
pub struct PreviewHost<S> {
    session: EditorSession,
    sandbox: S,
    outbox: BridgeSender,
    inbox: BridgeReceiver,
    preview_debounce: Debouncer,
    validation_debounce: Debouncer,
    instance: u64,
}

impl<S: PreviewSandbox> PreviewHost<S> {
    pub fn new(session: EditorSession, sandbox: S) -> Self {
        let (outbox, inbox) = bridge_channel();
        let preview_debounce = Debouncer::new(session.settings().preview_debounce());
        let validation_debounce = Debouncer::new(session.settings().validation_debounce());
        Self {
            session,
            sandbox,
            outbox,
            inbox,
            preview_debounce,
            validation_debounce,
            instance: 0,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn sandbox(&self) -> &S {
        &self.sandbox
    }

    /// The instance number of the preview currently loaded; 0 before the first run.
    pub fn current_instance(&self) -> u64 {
        self.instance
    }

    pub fn preview_deadline(&self) -> Option<Instant> {
        self.preview_debounce.deadline()
    }

    pub fn validation_deadline(&self) -> Option<Instant> {
        self.validation_debounce.deadline()
    }

    pub fn into_parts(self) -> (EditorSession, S) {
        (self.session, self.sandbox)
    }

    /// Composes the current buffers and loads them as a new preview instance.
    pub fn run_preview(&mut self) {
        self.preview_debounce.cancel();
        self.instance = self.instance.wrapping_add(1);
        let document = self.session.compose();
        debug!(
            instance = self.instance,
            bytes = document.len(),
            "loading preview"
        );
        let outbox = self.outbox.bind(self.instance);
        self.sandbox.load(self.instance, &document, outbox);
    }

    pub fn revalidate(&mut self) {
        self.validation_debounce.cancel();
        let count = self.session.revalidate().len();
        trace!(diagnostics = count, "revalidated buffers");
    }

    // Buffers changed: restart both quiet periods.
    fn buffers_changed(&mut self) {
        let now = Instant::now();
        self.validation_debounce.schedule_from(now);
        if self.session.settings().auto_run {
            self.preview_debounce.schedule_from(now);
        }
    }

    pub fn handle_event(&mut self, event: HostEvent) -> ControlFlow<()> {
        match event {
            HostEvent::Edit { language, text } => {
                if self.session.set_text(language, text) {
                    self.buffers_changed();
                }
            }
            HostEvent::Run => {
                self.revalidate();
                self.run_preview();
            }
            HostEvent::Save => {
                self.session.save();
            }
            HostEvent::SaveVersion(description) => {
                self.session.save_version(description);
            }
            HostEvent::Format => {
                let before = self.session.buffers().clone();
                self.session.format_all();
                if self.session.buffers() != &before {
                    self.buffers_changed();
                }
            }
            HostEvent::Undo => {
                if self.session.undo() {
                    self.buffers_changed();
                }
            }
            HostEvent::Redo => {
                if self.session.redo() {
                    self.buffers_changed();
                }
            }
            HostEvent::Restore(index) => {
                if self.session.restore(index) {
                    self.buffers_changed();
                }
            }
            HostEvent::SetAutoSave(enabled) => self.session.set_auto_save(enabled),
            HostEvent::ClearConsole => self.session.clear_console(),
            HostEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Appends a bridge message to the console if it comes from the live preview.
    pub fn handle_bridge(&mut self, envelope: BridgeEnvelope) {
        if envelope.instance != self.instance {
            debug!(
                from = envelope.instance,
                current = self.instance,
                "dropping message from superseded preview"
            );
            return;
        }
        match ConsoleMessage::from_value(envelope.payload) {
            Ok(message) => self.session.push_console(envelope.instance, message),
            Err(err) => debug!(error = %err, "ignoring unrecognised bridge payload"),
        }
    }

    /// Delivers every bridge message already queued, in order.
    pub fn drain_bridge(&mut self) {
        while let Some(envelope) = self.inbox.try_next() {
            self.handle_bridge(envelope);
        }
    }

    /// Fires whichever debounce timers are due at `now`.
    pub fn fire_due_timers(&mut self, now: Instant) {
        if self.validation_debounce.fire(now) {
            self.revalidate();
        }
        if self.preview_debounce.fire(now) {
            self.run_preview();
        }
    }

    /// Runs until `Shutdown` arrives or the event sender is dropped, then hands back the
    /// session and sandbox.
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> (EditorSession, S) {
        let period = self.session.settings().auto_save_interval();
        let mut auto_save = time::interval_at(Instant::now() + period, period);
        auto_save.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let validation_deadline = self.validation_debounce.deadline();
            let preview_deadline = self.preview_debounce.deadline();

            tokio::select! {
                biased;

                event = events.recv() => {
                    let Some(event) = event else { break };
                    if self.handle_event(event).is_break() {
                        break;
                    }
                }
                Some(envelope) = self.inbox.on_message() => self.handle_bridge(envelope),
                _ = sleep_until_deadline(validation_deadline), if validation_deadline.is_some() => {
                    self.fire_due_timers(Instant::now());
                }
                _ = sleep_until_deadline(preview_deadline), if preview_deadline.is_some() => {
                    self.fire_due_timers(Instant::now());
                }
                _ = auto_save.tick() => {
                    self.session.auto_save_tick();
                }
            }
        }

        // Messages already in flight still count; anything later is lost with the preview.
        self.drain_bridge();
        self.into_parts()
    }
}
