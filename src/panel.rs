/*
 *  panel.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Panel sink seam: the render loop hands each finished frame to one of
 *  these and never learns how it reaches glass
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

use std::io::{self, Write};

use thiserror::Error;

use crate::frame::Frame;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("panel I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Accepts one finished 1-bpp frame per render tick. Implementations are
/// expected to be synchronous and bounded-latency; transport retries belong
/// below this seam.
pub trait PanelSink: Send {
    fn push_frame(&mut self, frame: &Frame) -> Result<(), PanelError>;
}

/// Discards every frame. Useful for soak runs without hardware attached.
pub struct NullPanel;

impl PanelSink for NullPanel {
    fn push_frame(&mut self, _frame: &Frame) -> Result<(), PanelError> {
        Ok(())
    }
}

/// Renders frames into the terminal with half-block glyphs, two panel rows
/// per text row. Development stand-in for the real panel.
pub struct TermPanel {
    out: io::Stdout,
}

impl TermPanel {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TermPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSink for TermPanel {
    fn push_frame(&mut self, frame: &Frame) -> Result<(), PanelError> {
        let mut text = String::with_capacity((frame.width() as usize + 1) * frame.height() as usize / 2);
        // ANSI home + clear keeps successive frames in place
        text.push_str("\x1b[H\x1b[2J");
        for y in (0..frame.height() as i32).step_by(2) {
            for x in 0..frame.width() as i32 {
                let top = frame.is_on(x, y);
                let bottom = frame.is_on(x, y + 1);
                text.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            text.push('\n');
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Records every pushed frame; lets tests assert on exactly what reached
/// the panel seam.
pub struct CapturePanel {
    pub frames: Vec<Frame>,
}

impl CapturePanel {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Default for CapturePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSink for CapturePanel {
    fn push_frame(&mut self, frame: &Frame) -> Result<(), PanelError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
