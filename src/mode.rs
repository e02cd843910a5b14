/*
 *  mode.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Display mode state machine - externally driven lifecycle states plus the
 *  core-entered Error state
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

use log::{debug, info};

use crate::constants::{ERROR_BANNER_TEXT, STARTING_BANNER_TEXT, STOPPING_BANNER_TEXT};

/// What the panel is showing. Exactly one active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    Starting,
    Stopping,
    Error,
    Banner(String),
    Running,
}

/// A command from the surrounding service. `Error` has no command: the core
/// enters and leaves it on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeCommand {
    Run,
    Start,
    Stop,
    Banner(String),
}

impl ModeCommand {
    /// Parse one control line. Empty lines carry no command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" => None,
            "run" => Some(ModeCommand::Run),
            "start" => Some(ModeCommand::Start),
            "stop" => Some(ModeCommand::Stop),
            other => Some(ModeCommand::Banner(other.to_string())),
        }
    }
}

/// Owns the current `DisplayMode`. External commands may move it anywhere;
/// the machine itself only toggles Running <-> Error on status ingestion.
pub struct ModeState {
    mode: DisplayMode,
}

impl ModeState {
    pub fn new() -> Self {
        Self { mode: DisplayMode::Starting }
    }

    pub fn current(&self) -> &DisplayMode {
        &self.mode
    }

    /// True when the render loop should be consuming status snapshots.
    pub fn is_live(&self) -> bool {
        matches!(self.mode, DisplayMode::Running | DisplayMode::Error)
    }

    pub fn apply_command(&mut self, cmd: ModeCommand) {
        let next = match cmd {
            ModeCommand::Run => DisplayMode::Running,
            ModeCommand::Start => DisplayMode::Starting,
            ModeCommand::Stop => DisplayMode::Stopping,
            ModeCommand::Banner(text) => DisplayMode::Banner(text),
        };
        if next != self.mode {
            info!("display mode {:?} -> {:?}", self.mode, next);
            self.mode = next;
        }
    }

    /// A snapshot failed to ingest while live. Running drops to Error;
    /// anything externally set stays put.
    pub fn ingest_failed(&mut self) {
        if self.mode == DisplayMode::Running {
            debug!("status ingest failed, entering error mode");
            self.mode = DisplayMode::Error;
        }
    }

    /// A valid snapshot arrived; an error state clears itself.
    pub fn ingest_ok(&mut self) {
        if self.mode == DisplayMode::Error {
            info!("valid status resumed, leaving error mode");
            self.mode = DisplayMode::Running;
        }
    }

    /// Banner text for every non-Running mode.
    pub fn banner_text(&self) -> Option<&str> {
        match &self.mode {
            DisplayMode::Starting => Some(STARTING_BANNER_TEXT),
            DisplayMode::Stopping => Some(STOPPING_BANNER_TEXT),
            DisplayMode::Error => Some(ERROR_BANNER_TEXT),
            DisplayMode::Banner(text) => Some(text),
            DisplayMode::Running => None,
        }
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}
