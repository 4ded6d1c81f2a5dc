// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The `watch` command: follow the itinerary and take commands from stdin.

use std::io::{self, BufRead, Write};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::colors::Palette;
use crate::config::Config;
use crate::display::{describe_transition, format_status};
use crate::error::{Error, Result};
use crate::store::{ItineraryStore, StoreSnapshot};
use crate::sync::{SyncClient, SyncHandle};

/// A command typed while watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Undo,
    Clear,
    Join(String),
    Status,
    Quit,
}

/// Parse one line of input. Blank lines parse to `None`.
pub fn parse_input(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let input = match command.to_ascii_lowercase().as_str() {
        "undo" => Input::Undo,
        "clear" => Input::Clear,
        "status" => Input::Status,
        "quit" | "exit" => Input::Quit,
        "join" => {
            let session_id = words.next().ok_or(Error::MissingArgument {
                command: "join",
                argument: "a session id",
            })?;
            Input::Join(session_id.to_string())
        }
        _ => return Err(Error::UnknownCommand(command.to_string())),
    };
    Ok(Some(input))
}

/// Writes store transitions to `out` and complaints to `err`.
pub struct Printer<O, E> {
    out: O,
    err: E,
    palette: Palette,
    last: StoreSnapshot,
}

impl<O: Write, E: Write> Printer<O, E> {
    pub fn new(out: O, err: E, palette: Palette) -> Self {
        Printer {
            out,
            err,
            palette,
            last: StoreSnapshot::default(),
        }
    }

    /// Print what changed since the last snapshot seen.
    pub fn transition(&mut self, snapshot: StoreSnapshot) -> io::Result<()> {
        for line in describe_transition(&self.last, &snapshot, &self.palette) {
            writeln!(self.out, "{line}")?;
        }
        self.last = snapshot;
        self.out.flush()
    }

    pub fn note(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.context(text))?;
        self.out.flush()
    }

    pub fn error(&mut self, error: &Error) -> io::Result<()> {
        writeln!(self.err, "error: {error}")
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

/// Run the watch loop until `quit`, end of input or Ctrl-C.
pub fn run(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(watch(config))
}

async fn watch(config: &Config) -> Result<()> {
    let store = ItineraryStore::new(config.store_config());
    let handle = SyncClient::new(config.sync_config(), store).start()?;
    let mut printer = Printer::new(io::stdout(), io::stderr(), Palette::detect());

    let result = drive(&handle, spawn_stdin_reader(), &mut printer).await;
    handle.shutdown().await;
    result
}

/// Read stdin on a plain thread; the channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
    rx
}

enum Step {
    Changed,
    Line(String),
    Stop,
}

/// Print every committed store transition and execute input lines.
pub async fn drive<O: Write, E: Write>(
    handle: &SyncHandle,
    mut input: mpsc::Receiver<String>,
    printer: &mut Printer<O, E>,
) -> Result<()> {
    let mut changes = handle.store().subscribe();
    let initial = changes.borrow_and_update().clone();
    printer.transition(initial)?;

    loop {
        // Store changes win over input so each command's effect prints first
        let step = tokio::select! {
            biased;
            changed = changes.changed() => match changed {
                Ok(()) => Step::Changed,
                Err(_) => Step::Stop,
            },
            line = input.recv() => match line {
                Some(line) => Step::Line(line),
                None => Step::Stop,
            },
            _ = tokio::signal::ctrl_c() => Step::Stop,
        };

        match step {
            Step::Changed => {
                let snapshot = changes.borrow_and_update().clone();
                printer.transition(snapshot)?;
            }
            Step::Line(line) => match parse_input(&line) {
                Ok(Some(Input::Quit)) => break,
                Ok(Some(command)) => execute(handle, command, printer).await?,
                Ok(None) => {}
                Err(e) => printer.error(&e)?,
            },
            Step::Stop => break,
        }
    }

    debug!("watch loop finished");
    Ok(())
}

async fn execute<O: Write, E: Write>(
    handle: &SyncHandle,
    command: Input,
    printer: &mut Printer<O, E>,
) -> io::Result<()> {
    let store = handle.store();
    match command {
        Input::Undo => {
            if !store.undo() {
                printer.note("nothing to undo")?;
            }
        }
        Input::Clear => {
            if store.diff().is_some() {
                store.clear_diff();
            } else {
                printer.note("no diff on display")?;
            }
        }
        Input::Join(session_id) => handle.join_session(session_id),
        Input::Status => {
            let status = format_status(&store.snapshot(), &handle.connection().status_string());
            printer.note(&status)?;
        }
        Input::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
