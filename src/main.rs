// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Livepen CLI entrypoint.
//!
//! Works on project files (the same JSON the editor exports): create one, compose it into a
//! previewable document, lint or format its buffers, turn it into a share link and back, and
//! list the history it carries.

use std::error::Error;

use livepen::config::EditorSettings;
use livepen::logging::{init_logging, LogConfig};
use livepen::model::Severity;
use livepen::session::EditorSession;
use livepen::store::{ProjectFile, ProjectStore, WriteDurability};
use url::Url;

const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080/";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] new <project.json> [--title <title>]\n  {program} [options] compose <project.json> [--out <file.html>]\n  {program} [options] lint <project.json>\n  {program} [options] format <project.json>\n  {program} [options] share <project.json> [--base-url <url>]\n  {program} [options] open <share-url> [--out <project.json>]\n  {program} [options] history <project.json>\n\nOptions:\n  --settings <file>   editor settings JSON (overrides the settings stored in the project)\n  --durable-writes    fsync project files on save\n  -v, -vv, -vvv       log verbosity on stderr ({env} takes precedence)\n\n`lint` exits with status 1 when any buffer has an error.\n`open` without --out prints the composed document of the shared pen.",
        env = livepen::logging::LOG_ENV_VAR,
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    New,
    Compose,
    Lint,
    Format,
    Share,
    Open,
    History,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "new" => Self::New,
            "compose" => Self::Compose,
            "lint" => Self::Lint,
            "format" => Self::Format,
            "share" => Self::Share,
            "open" => Self::Open,
            "history" => Self::History,
            _ => return None,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Option<Command>,
    /// Project path, or the share URL for `open`.
    target: Option<String>,
    out: Option<String>,
    title: Option<String>,
    base_url: Option<String>,
    settings: Option<String>,
    durable_writes: bool,
    verbosity: u8,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        *slot = Some(value.ok_or(())?);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => set_once(&mut options.out, args.next())?,
            "--title" => set_once(&mut options.title, args.next())?,
            "--base-url" => set_once(&mut options.base_url, args.next())?,
            "--settings" => set_once(&mut options.settings, args.next())?,
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "-v" | "-vv" | "-vvv" => {
                let count = (arg.len() - 1) as u8;
                options.verbosity = options.verbosity.saturating_add(count);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ if options.command.is_none() => {
                options.command = Some(Command::parse(&arg).ok_or(())?);
            }
            _ => set_once(&mut options.target, Some(arg))?,
        }
    }

    let command = options.command.ok_or(())?;
    if options.target.is_none() {
        return Err(());
    }
    if options.out.is_some() && !matches!(command, Command::Compose | Command::Open) {
        return Err(());
    }
    if options.title.is_some() && command != Command::New {
        return Err(());
    }
    if options.base_url.is_some() && command != Command::Share {
        return Err(());
    }

    Ok(options)
}

fn project_store(path: &str, durable_writes: bool) -> ProjectStore {
    let store = ProjectStore::new(path);
    if durable_writes {
        store.with_durability(WriteDurability::Durable)
    } else {
        store
    }
}

fn load_session(
    store: &ProjectStore,
    settings: Option<&EditorSettings>,
) -> Result<EditorSession, Box<dyn Error>> {
    let project = store
        .load()?
        .ok_or_else(|| format!("no project file at {}", store.path().display()))?;
    let mut session = EditorSession::default();
    session.apply_project(project);
    if let Some(settings) = settings {
        session.set_settings(settings.clone());
    }
    session.take_notifications();
    Ok(session)
}

fn write_output(out: Option<&str>, contents: &str) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => std::fs::write(path, contents)?,
        None => print!("{contents}"),
    }
    Ok(())
}

/// Runs one command and returns the process exit status.
fn run(options: CliOptions) -> Result<i32, Box<dyn Error>> {
    let settings = options
        .settings
        .as_deref()
        .map(EditorSettings::load)
        .transpose()?;
    let command = options.command.ok_or("missing command")?;
    let target = options.target.as_deref().ok_or("missing target")?;
    let now = chrono::Utc::now();

    match command {
        Command::New => {
            let store = project_store(target, options.durable_writes);
            if store.load()?.is_some() {
                return Err(format!("{target} already exists").into());
            }
            let mut session = EditorSession::new(settings.unwrap_or_default());
            if let Some(title) = options.title {
                session.set_title(title);
            }
            store.save(&ProjectFile::from_session(&session, now))?;
            eprintln!("created {target}");
        }
        Command::Compose => {
            let session = load_session(&project_store(target, false), settings.as_ref())?;
            write_output(options.out.as_deref(), &session.compose())?;
        }
        Command::Lint => {
            let session = load_session(&project_store(target, false), settings.as_ref())?;
            let diagnostics = session.diagnostics();
            for diagnostic in diagnostics {
                println!("{diagnostic}");
            }
            let errors = diagnostics
                .iter()
                .filter(|d| d.diagnostic.severity() == Severity::Error)
                .count();
            eprintln!("{} diagnostic(s), {errors} error(s)", diagnostics.len());
            if errors > 0 {
                return Ok(1);
            }
        }
        Command::Format => {
            let store = project_store(target, options.durable_writes);
            let mut session = load_session(&store, settings.as_ref())?;
            match session.format_all() {
                Some(_) => {
                    store.save(&ProjectFile::from_session(&session, now))?;
                    eprintln!("formatted {target}");
                }
                None => eprintln!("{target} is already formatted"),
            }
        }
        Command::Share => {
            let session = load_session(&project_store(target, false), settings.as_ref())?;
            let base_url = options.base_url.as_deref();
            let base = Url::parse(base_url.unwrap_or(DEFAULT_SHARE_BASE_URL))?;
            println!("{}", session.share_url(&base));
        }
        Command::Open => {
            let url = Url::parse(target)?;
            let mut session = EditorSession::new(settings.unwrap_or_default());
            if session.init_from_url(&url).is_none() {
                let reason = session
                    .take_notifications()
                    .pop()
                    .map(|notification| notification.message)
                    .unwrap_or_else(|| "URL carries no share link".to_owned());
                return Err(reason.into());
            }
            match options.out.as_deref() {
                Some(path) => {
                    let store = project_store(path, options.durable_writes);
                    store.save(&ProjectFile::from_session(&session, now))?;
                    eprintln!("saved \"{}\" to {path}", session.title());
                }
                None => write_output(None, &session.compose())?,
            }
        }
        Command::History => {
            let project = project_store(target, false)
                .load()?
                .ok_or_else(|| format!("no project file at {target}"))?;
            for (idx, entry) in project.history.iter().enumerate() {
                println!(
                    "{idx}\t{}\t{}\t{}",
                    entry.timestamp.to_rfc3339(),
                    entry.id,
                    entry.description
                );
            }
        }
    }

    Ok(0)
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "livepen".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = init_logging(&LogConfig::from_verbosity(options.verbosity)) {
        eprintln!("livepen: logging disabled: {err}");
    }

    match run(options) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("livepen: {err}");
            std::process::exit(1);
        }
    }
}
