use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;
use std::thread::JoinHandle;

use bevy::prelude::*;
use parking_lot::Mutex;
use protocol::ControlEvent;
use tracing::{debug, info, warn};

/// Control events waiting for the next tick.
///
/// Cloning yields another handle to the same queue, so a reader thread can
/// push while the app drains at the start of each tick.
#[derive(Resource, Clone, Default)]
pub struct ControlInbox(Arc<Mutex<VecDeque<ControlEvent>>>);

impl ControlInbox {
    pub fn push(&self, event: ControlEvent) {
        self.0.lock().push_back(event);
    }

    pub fn drain(&self) -> Vec<ControlEvent> {
        self.0.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Config-driven commands, sorted by tick.
#[derive(Resource, Debug, Default)]
pub struct ControlScript {
    entries: Vec<(u64, ControlEvent)>,
    next: usize,
}

impl ControlScript {
    pub fn new(entries: Vec<(u64, ControlEvent)>) -> Self {
        Self { entries, next: 0 }
    }

    /// Entries whose tick has been reached and that have not fired yet.
    pub fn due(&mut self, tick: u64) -> &[(u64, ControlEvent)] {
        let start = self.next;
        while self.next < self.entries.len() && self.entries[self.next].0 <= tick {
            self.next += 1;
        }
        &self.entries[start..self.next]
    }
}

/// Spawns a thread that parses stdin lines into control events. Blank lines
/// and `#` comments are skipped; malformed lines are logged and dropped.
pub fn spawn_stdin_reader(inbox: ControlInbox) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-controls".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!(error = %e, "stdin read failed; no more operator input");
                        break;
                    }
                };
                if let Some(event) = parse_line(&line) {
                    inbox.push(event);
                }
            }
            info!("stdin closed");
        })
}

fn parse_line(line: &str) -> Option<ControlEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    match trimmed.parse::<ControlEvent>() {
        Ok(event) => {
            debug!(%event, "operator command");
            Some(event)
        }
        Err(e) => {
            warn!(line = trimmed, error = %e, "ignoring malformed command");
            None
        }
    }
}
