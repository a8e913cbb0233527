// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

use super::{BridgeSender, HostEvent, PreviewHost, PreviewSandbox};
use crate::compose::{ConsoleKind, ConsoleMessage};
use crate::config::EditorSettings;
use crate::model::{BufferSet, Language};
use crate::session::{EditorSession, AUTO_SAVE_SNAPSHOT};

struct Load {
    instance: u64,
    document: String,
    at: Instant,
}

/// Stands in for a browser frame: "executes" the user script by posting one bridge message
/// per `console.<method>('literal')` call and per `throw new Error('literal')`.
#[derive(Default)]
struct ScriptedSandbox {
    loads: Vec<Load>,
    outboxes: Vec<BridgeSender>,
}

fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"console\.(log|info|warn|error)\('([^']*)'\)|throw new Error\('([^']*)'\)")
            .expect("call pattern")
    })
}

fn user_script(document: &str) -> &str {
    let open = "\n<script>\n";
    let close = "\n</script>\n</body>";
    let start = document.rfind(open).map_or(0, |idx| idx + open.len());
    let end = document.rfind(close).unwrap_or(document.len());
    &document[start..end]
}

impl PreviewSandbox for ScriptedSandbox {
    fn load(&mut self, instance: u64, document: &str, outbox: BridgeSender) {
        for caps in call_pattern().captures_iter(user_script(document)) {
            match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(method), Some(text), _) => outbox.post(json!({
                    "type": format!("console.{}", method.as_str()),
                    "data": text.as_str(),
                })),
                (_, _, Some(text)) => outbox.post(json!({
                    "type": "error",
                    "data": format!("Uncaught Error: {}", text.as_str()),
                })),
                _ => {}
            }
        }
        self.loads.push(Load {
            instance,
            document: document.to_owned(),
            at: Instant::now(),
        });
        self.outboxes.push(outbox);
    }
}

fn send(host: &mut PreviewHost<ScriptedSandbox>, event: HostEvent) {
    assert!(host.handle_event(event).is_continue());
}

fn edit(language: Language, text: &str) -> HostEvent {
    HostEvent::Edit {
        language,
        text: text.to_owned(),
    }
}

fn host_with_script(script: &str) -> PreviewHost<ScriptedSandbox> {
    let buffers = BufferSet::new("<p>preview</p>", "p { color: teal; }", script);
    let session = EditorSession::with_buffers(EditorSettings::default(), "Test", buffers);
    PreviewHost::new(session, ScriptedSandbox::default())
}

fn console_lines(host: &PreviewHost<ScriptedSandbox>) -> Vec<(u64, ConsoleKind, String)> {
    host.session()
        .console()
        .entries()
        .iter()
        .map(|entry| (entry.instance(), entry.kind(), entry.data().to_owned()))
        .collect()
}

#[test]
fn console_messages_arrive_in_call_order() {
    let mut host = host_with_script("console.log('a');\nconsole.warn('b');\nconsole.error('c');");
    assert!(host.handle_event(HostEvent::Run).is_continue());
    host.drain_bridge();

    assert_eq!(
        console_lines(&host),
        vec![
            (1, ConsoleKind::Log, "a".to_owned()),
            (1, ConsoleKind::Warn, "b".to_owned()),
            (1, ConsoleKind::Error, "c".to_owned()),
        ]
    );
}

#[test]
fn messages_from_a_replaced_preview_are_dropped() {
    let mut host = host_with_script("console.log('hi');");
    send(&mut host, HostEvent::Run);
    send(&mut host, HostEvent::Run);
    assert_eq!(host.current_instance(), 2);

    let late = ConsoleMessage::new(ConsoleKind::Log, "late");
    host.sandbox().outboxes[0].post_message(&late);
    host.drain_bridge();

    assert_eq!(
        console_lines(&host),
        vec![(2, ConsoleKind::Log, "hi".to_owned())]
    );
}

#[test]
fn unrecognised_payloads_are_ignored() {
    let mut host = host_with_script("");
    send(&mut host, HostEvent::Run);
    let outbox = &host.sandbox().outboxes[0];
    outbox.post(json!("just a string"));
    outbox.post(json!({ "type": "console.table", "data": "x" }));
    outbox.post(json!({ "data": "no type" }));
    host.drain_bridge();

    assert!(host.session().console().is_empty());
}

#[test]
fn uncaught_errors_are_logged_as_errors() {
    let mut host = host_with_script("console.info('start');\nthrow new Error('boom');");
    send(&mut host, HostEvent::Run);
    host.drain_bridge();

    let lines = console_lines(&host);
    assert_eq!(
        lines[1],
        (1, ConsoleKind::Uncaught, "Uncaught Error: boom".to_owned())
    );
    assert_eq!(host.session().console().error_count(), 1);
}

#[test]
fn clear_console_event_empties_the_log() {
    let mut host = host_with_script("console.log('a');");
    send(&mut host, HostEvent::Run);
    host.drain_bridge();
    send(&mut host, HostEvent::ClearConsole);
    assert!(host.session().console().is_empty());
}

#[test]
fn validation_waits_for_the_quiet_period() {
    let mut host = host_with_script("");
    send(&mut host, edit(Language::Markup, "<div>"));
    assert!(host.session().diagnostics().is_empty());

    let deadline = host.validation_deadline().expect("validation scheduled");
    host.fire_due_timers(deadline - Duration::from_millis(1));
    assert!(host.session().diagnostics().is_empty());

    host.fire_due_timers(deadline);
    assert_eq!(host.session().diagnostics().len(), 1);
    assert_eq!(host.validation_deadline(), None);
}

#[test]
fn unchanged_edit_schedules_nothing() {
    let mut host = host_with_script("same();");
    send(&mut host, edit(Language::Script, "same();"));
    assert_eq!(host.validation_deadline(), None);
    assert_eq!(host.preview_deadline(), None);
}

#[test]
fn auto_run_off_only_schedules_validation() {
    let settings = EditorSettings {
        auto_run: false,
        ..EditorSettings::default()
    };
    let session = EditorSession::with_buffers(settings, "Manual", BufferSet::default());
    let mut host = PreviewHost::new(session, ScriptedSandbox::default());

    send(&mut host, edit(Language::Script, "go();"));
    assert!(host.validation_deadline().is_some());
    assert_eq!(host.preview_deadline(), None);

    send(&mut host, HostEvent::Run);
    assert_eq!(host.sandbox().loads.len(), 1);
    assert_eq!(host.validation_deadline(), None);
}

#[test]
fn undo_reschedules_the_preview() {
    let mut host = host_with_script("one();");
    send(&mut host, edit(Language::Script, "two();"));
    send(&mut host, HostEvent::SaveVersion("two".to_owned()));
    host.fire_due_timers(Instant::now() + Duration::from_secs(1));
    assert_eq!(host.preview_deadline(), None);

    send(&mut host, HostEvent::Undo);
    assert_eq!(host.session().text(Language::Script), "one();");
    assert!(host.preview_deadline().is_some());
}

#[tokio::test(start_paused = true)]
async fn edits_inside_the_window_coalesce_into_one_preview() {
    let host = host_with_script("");
    let (tx, rx) = mpsc::channel(8);
    let start = Instant::now();

    let driver = async move {
        let first = edit(Language::Script, "console.log('first');");
        tx.send(first).await.expect("send");
        sleep(Duration::from_millis(300)).await;
        let second = edit(Language::Script, "console.log('second');");
        tx.send(second).await.expect("send");
        sleep(Duration::from_secs(2)).await;
        tx.send(HostEvent::Shutdown).await.expect("send");
    };
    let ((session, sandbox), ()) = tokio::join!(host.run(rx), driver);

    assert_eq!(sandbox.loads.len(), 1);
    let load = &sandbox.loads[0];
    assert_eq!(load.instance, 1);
    assert!(load.document.contains("console.log('second');"));
    assert!(!load.document.contains("console.log('first');"));
    let waited = load.at - start;
    assert!(
        waited >= Duration::from_millis(800),
        "fired after {waited:?}"
    );
    assert!(
        waited < Duration::from_millis(900),
        "fired after {waited:?}"
    );

    let entries = session.console().entries();
    let data: Vec<_> = entries.iter().map(|entry| entry.data()).collect();
    assert_eq!(data, vec!["second"]);
}

#[tokio::test(start_paused = true)]
async fn auto_save_snapshots_dirty_buffers() {
    let settings = EditorSettings {
        auto_save: true,
        auto_save_interval_secs: 30,
        ..EditorSettings::default()
    };
    let session = EditorSession::with_buffers(settings, "Auto", BufferSet::default());
    let host = PreviewHost::new(session, ScriptedSandbox::default());
    let (tx, rx) = mpsc::channel(8);

    let driver = async move {
        let styles = edit(Language::Styles, "p { }");
        tx.send(styles).await.expect("send");
        sleep(Duration::from_secs(61)).await;
    };
    let ((session, _sandbox), ()) = tokio::join!(host.run(rx), driver);

    let descriptions = session
        .history()
        .snapshots()
        .iter()
        .map(|snapshot| snapshot.description().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(descriptions.len(), 2);
    assert_eq!(descriptions[1], AUTO_SAVE_SNAPSHOT);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn dropping_the_event_sender_stops_the_host() {
    let host = host_with_script("");
    let (tx, rx) = mpsc::channel::<HostEvent>(1);
    drop(tx);
    let (session, sandbox) = host.run(rx).await;
    assert!(sandbox.loads.is_empty());
    assert_eq!(session.title(), "Test");
}
