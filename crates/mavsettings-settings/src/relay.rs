//! Dialog change relay
//!
//! A [`DialogSession`] connects a [`SettingsDialog`] to the registry that owns
//! the settings. The dialog works on a snapshot and sends every applied
//! change down an unbounded channel; a watcher thread receives the changes
//! and replays them through [`Settings::set`] on the shared registry, so the
//! owner's change callback runs for each one.

use crate::dialog::SettingsDialog;
use crate::error::SettingsResult;
use crate::registry::Settings;
use mavsettings_core::{value_text, SettingValue, ThreadSafe};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A setting whose value changed in the dialog
#[derive(Debug, Clone, PartialEq)]
pub struct SettingChange {
    pub name: String,
    pub value: Option<SettingValue>,
}

/// Message sent from the dialog to the watcher
#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    Changed(SettingChange),
    /// The dialog was closed; the watcher stops
    Closed,
}

/// Sending half of the relay, held by the dialog
pub type RelaySender = mpsc::UnboundedSender<RelayMessage>;

/// Receiving half of the relay, drained by the watcher
pub type RelayReceiver = mpsc::UnboundedReceiver<RelayMessage>;

/// An open dialog and the thread applying its changes
#[derive(Debug)]
pub struct DialogSession {
    watcher: Option<JoinHandle<usize>>,
}

impl DialogSession {
    /// Open a dialog over a snapshot of `shared` and start the watcher
    pub fn open(shared: ThreadSafe<Settings>) -> SettingsResult<(SettingsDialog, Self)> {
        let snapshot = shared.lock().snapshot();
        let (tx, rx) = mpsc::unbounded_channel();
        let dialog = SettingsDialog::new(snapshot).with_relay(tx);

        let watcher = thread::Builder::new()
            .name("settings-watch".to_string())
            .spawn(move || watch(shared, rx))?;

        info!("Opened settings dialog '{}'", dialog.title());
        Ok((
            dialog,
            Self {
                watcher: Some(watcher),
            },
        ))
    }

    /// Whether the watcher is still receiving changes
    pub fn is_alive(&self) -> bool {
        self.watcher.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the watcher to stop; returns the number of changes applied.
    ///
    /// Blocks until the dialog is cancelled or dropped.
    pub fn join(mut self) -> usize {
        match self.watcher.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                warn!("Settings watcher panicked");
                0
            }),
            None => 0,
        }
    }
}

/// Apply relayed changes until the dialog closes
fn watch(shared: ThreadSafe<Settings>, mut rx: RelayReceiver) -> usize {
    let mut applied = 0;

    while let Some(message) = rx.blocking_recv() {
        match message {
            RelayMessage::Changed(change) => {
                let shown = value_text(change.value.as_ref());
                match shared.lock().set(&change.name, change.value) {
                    Ok(()) => applied += 1,
                    Err(e) => warn!("Unable to set {} to {}: {}", change.name, shown, e),
                }
            }
            RelayMessage::Closed => break,
        }
    }

    debug!("Settings watcher stopped after {} changes", applied);
    applied
}
