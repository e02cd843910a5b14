/*
 *  status.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Playback status snapshots: JSON ingestion from the host player's status
 *  command, and the background poller that keeps the latest-value slot fresh
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use log::{debug, error};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::deutils::{
    default_false, default_zero_u64, deserialize_bool_from_anything, deserialize_numeric_u64,
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("status command failed to run: {0}")]
    Exec(#[from] std::io::Error),
    #[error("status command exited with code {0:?}")]
    CommandFailed(Option<i32>),
    #[error("malformed status payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

fn deserialize_play_state<'de, D>(deserializer: D) -> Result<PlayState, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    // anything that is not actively playing renders the paused glyph
    Ok(if s == "play" { PlayState::Playing } else { PlayState::Paused })
}

/// One immutable point-in-time copy of playback state. A new snapshot
/// replaces the previous one wholesale; nothing in the core mutates it.
///
/// Units: `seek` is milliseconds, `duration` is seconds, as the host player
/// reports them. The progress computation is the only place the two meet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackStatus {
    pub uri: String,
    pub title: String,
    pub artist: String,
    #[serde(rename = "status", deserialize_with = "deserialize_play_state")]
    pub play_state: PlayState,
    #[serde(default = "default_false", deserialize_with = "deserialize_bool_from_anything")]
    pub random: bool,
    #[serde(default = "default_false", deserialize_with = "deserialize_bool_from_anything")]
    pub repeat: bool,
    #[serde(default = "default_zero_u64", deserialize_with = "deserialize_numeric_u64")]
    pub seek: u64,
    #[serde(default = "default_zero_u64", deserialize_with = "deserialize_numeric_u64")]
    pub duration: u64,
}

impl PlaybackStatus {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IngestError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Latest-value-wins slot contents. `Empty` means the poller has never
/// produced anything; `Malformed` means the most recent poll parsed
/// unsuccessfully and the display should say so.
#[derive(Debug, Clone, Default)]
pub enum StatusSlot {
    #[default]
    Empty,
    Ready(PlaybackStatus),
    Malformed,
}

/// Background task that runs the host player's status command on a fixed
/// interval and publishes each outcome into a watch slot. Exec-level
/// failures (command missing, spawn error, nonzero exit) keep the previous
/// slot value: the last known good snapshot stays on screen.
pub struct StatusPoller {
    slot_rx: watch::Receiver<StatusSlot>,
    stop_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl StatusPoller {
    pub fn spawn(command: String, interval: Duration) -> Self {
        let (slot_tx, slot_rx) = watch::channel(StatusSlot::default());
        let (stop_tx, mut stop_rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        match poll_once(&command).await {
                            Ok(status) => {
                                let _ = slot_tx.send(StatusSlot::Ready(status));
                            }
                            Err(IngestError::Malformed(e)) => {
                                error!("status payload rejected: {}", e);
                                let _ = slot_tx.send(StatusSlot::Malformed);
                            }
                            Err(e) => {
                                error!("status poll failed: {}", e);
                            }
                        }
                    }
                    _ = stop_rx.recv() => {
                        debug!("status poller received stop signal, exiting");
                        break;
                    }
                }
            }
        });

        Self { slot_rx, stop_tx, handle: Some(handle) }
    }

    /// A fresh reader over the latest-value slot.
    pub fn subscribe(&self) -> watch::Receiver<StatusSlot> {
        self.slot_rx.clone()
    }

    /// Stop the poll task and wait for it to wind down.
    pub async fn shutdown(mut self) {
        let _ = self.stop_tx.send(()).await;
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        // best effort if shutdown() was never awaited
        let _ = self.stop_tx.try_send(());
    }
}

async fn poll_once(command: &str) -> Result<PlaybackStatus, IngestError> {
    let output = Command::new("sh").arg("-c").arg(command).output().await?;
    if !output.status.success() {
        return Err(IngestError::CommandFailed(output.status.code()));
    }
    PlaybackStatus::from_slice(&output.stdout)
}
