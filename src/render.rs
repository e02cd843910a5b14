/*
 *  render.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  The render loop: fixed-rate ticks, mode resolution, track-change
 *  detection, frame composition, panel handoff
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
use tokio::sync::watch;

use crate::compose::FrameComposer;
use crate::frame::Frame;
use crate::marquee::MarqueeField;
use crate::mode::{DisplayMode, ModeCommand, ModeState};
use crate::pacer::Pacer;
use crate::panel::{PanelError, PanelSink};
use crate::rasterizer::TextRasterizer;
use crate::status::{PlaybackStatus, StatusSlot};

/// Owns the display mode and both marquee fields, reads the latest status
/// snapshot once per tick, and pushes exactly one frame per tick to the
/// panel sink. Never blocks on anything but the tick boundary and the sink.
pub struct RenderLoop<S: PanelSink> {
    composer: FrameComposer,
    mode: ModeState,
    title: MarqueeField,
    artist: MarqueeField,
    last_uri: Option<String>,
    sink: S,
    status_rx: watch::Receiver<StatusSlot>,
    command_rx: watch::Receiver<Option<ModeCommand>>,
    pacer: Pacer,
}

impl<S: PanelSink> RenderLoop<S> {
    pub fn new(
        rasterizer: Box<dyn TextRasterizer>,
        sink: S,
        status_rx: watch::Receiver<StatusSlot>,
        command_rx: watch::Receiver<Option<ModeCommand>>,
        fps: u32,
    ) -> Self {
        info!("render loop at {} fps", fps);
        Self {
            composer: FrameComposer::new(rasterizer, fps),
            mode: ModeState::new(),
            title: MarqueeField::title(),
            artist: MarqueeField::artist(),
            last_uri: None,
            sink,
            status_rx,
            command_rx,
            pacer: Pacer::new(fps),
        }
    }

    pub fn mode(&self) -> &DisplayMode {
        self.mode.current()
    }

    pub fn fields(&self) -> (&MarqueeField, &MarqueeField) {
        (&self.title, &self.artist)
    }

    /// Fold the most recent external mode command in, if one arrived since
    /// the last tick. Latest wins; intermediate commands are moot.
    pub fn apply_pending_command(&mut self) {
        if self.command_rx.has_changed().unwrap_or(false) {
            if let Some(cmd) = self.command_rx.borrow_and_update().clone() {
                self.mode.apply_command(cmd);
            }
        }
    }

    /// Compose one frame from the current mode and the given snapshot slot.
    pub fn render_tick(&mut self, slot: &StatusSlot) -> Frame {
        if self.mode.is_live() {
            if let StatusSlot::Ready(status) = slot {
                self.mode.ingest_ok();
                let status = status.clone();
                self.sync_track(&status);
                return self
                    .composer
                    .running_frame(&status, &mut self.title, &mut self.artist);
            }
            self.mode.ingest_failed();
        }
        let text = self.mode.banner_text().unwrap_or_default().to_string();
        self.composer.banner_frame(&text)
    }

    /// A changed URI is the only external trigger for a marquee reset: both
    /// fields restart from the left edge with fresh bitmaps.
    fn sync_track(&mut self, status: &PlaybackStatus) {
        if self.last_uri.as_deref() == Some(status.uri.as_str()) {
            return;
        }
        debug!("track change -> {}", status.uri);
        self.title.reset();
        self.title.bind(self.composer.rasterize(&status.title, self.title.font()));
        self.artist.reset();
        self.artist.bind(self.composer.rasterize(&status.artist, self.artist.font()));
        self.last_uri = Some(status.uri.clone());
    }

    /// Tick forever: one frame out per tick boundary, no catch-up bursts.
    pub async fn run(mut self) -> Result<(), PanelError> {
        loop {
            self.pacer.tick().await;
            self.apply_pending_command();
            let slot = self.status_rx.borrow().clone();
            let frame = self.render_tick(&slot);
            self.sink.push_frame(&frame)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_FPS, ERROR_BANNER_TEXT, STARTING_BANNER_TEXT};
    use crate::panel::CapturePanel;
    use crate::rasterizer::MonoRasterizer;
    use crate::status::PlayState;

    fn looped() -> (
        RenderLoop<CapturePanel>,
        watch::Sender<StatusSlot>,
        watch::Sender<Option<ModeCommand>>,
    ) {
        let (status_tx, status_rx) = watch::channel(StatusSlot::default());
        let (command_tx, command_rx) = watch::channel(None);
        let rl = RenderLoop::new(
            Box::new(MonoRasterizer),
            CapturePanel::new(),
            status_rx,
            command_rx,
            DISPLAY_FPS,
        );
        (rl, status_tx, command_tx)
    }

    fn snapshot(uri: &str, title: &str, artist: &str) -> PlaybackStatus {
        PlaybackStatus {
            uri: uri.into(),
            title: title.into(),
            artist: artist.into(),
            play_state: PlayState::Playing,
            random: false,
            repeat: false,
            seek: 1000,
            duration: 300,
        }
    }

    #[test]
    fn starting_mode_renders_starting_banner() {
        let (mut rl, _status_tx, _command_tx) = looped();
        let frame = rl.render_tick(&StatusSlot::Empty);
        let expected = rl.composer.banner_frame(STARTING_BANNER_TEXT);
        assert_eq!(frame, expected);
    }

    #[test]
    fn malformed_snapshot_drops_running_to_error_banner() {
        let (mut rl, _status_tx, command_tx) = looped();
        command_tx.send(Some(ModeCommand::Run)).unwrap();
        rl.apply_pending_command();

        let frame = rl.render_tick(&StatusSlot::Malformed);
        assert_eq!(*rl.mode(), DisplayMode::Error);
        let expected = rl.composer.banner_frame(ERROR_BANNER_TEXT);
        assert_eq!(frame, expected);

        // an empty slot (never populated) is just as dead
        let frame = rl.render_tick(&StatusSlot::Empty);
        assert_eq!(frame, expected);
    }

    #[test]
    fn valid_snapshot_resumes_from_error() {
        let (mut rl, _status_tx, command_tx) = looped();
        command_tx.send(Some(ModeCommand::Run)).unwrap();
        rl.apply_pending_command();
        rl.render_tick(&StatusSlot::Malformed);
        assert_eq!(*rl.mode(), DisplayMode::Error);

        rl.render_tick(&StatusSlot::Ready(snapshot("u1", "Title", "Artist")));
        assert_eq!(*rl.mode(), DisplayMode::Running);
    }

    #[test]
    fn uri_change_resets_both_fields() {
        let (mut rl, _status_tx, command_tx) = looped();
        command_tx.send(Some(ModeCommand::Run)).unwrap();
        rl.apply_pending_command();

        // long title: 40 chars * 10 px overflows the 170 px viewport
        let long = "A Love Supreme Part IV - Psalm (Live) 19";
        let slot = StatusSlot::Ready(snapshot("u1", long, "John Coltrane Quartet and guests etc etc"));
        // run well past the pre-roll
        for _ in 0..150 {
            rl.render_tick(&slot);
        }
        let (title, artist) = rl.fields();
        assert!(title.offset_px() > 0.0);
        assert!(artist.offset_px() > 0.0);

        // same uri: no reset
        rl.render_tick(&StatusSlot::Ready(snapshot("u1", long, "whoever")));
        let (title, _) = rl.fields();
        assert!(title.offset_px() > 0.0);

        // new uri: both fields back at the left edge, pre-roll restarted
        rl.render_tick(&StatusSlot::Ready(snapshot("u2", long, "Someone Else")));
        let (title, artist) = rl.fields();
        assert_eq!(title.offset_px(), 0.0);
        assert_eq!(artist.offset_px(), 0.0);
        assert!(title.delay_acc_secs() <= 0.05 + f64::EPSILON);
    }

    #[test]
    fn stale_slot_keeps_last_known_good_frame() {
        let (mut rl, _status_tx, command_tx) = looped();
        command_tx.send(Some(ModeCommand::Run)).unwrap();
        rl.apply_pending_command();

        // short fields: frame is static, so a repeated slot reproduces it
        let slot = StatusSlot::Ready(snapshot("u1", "Hi", "Yo"));
        let first = rl.render_tick(&slot);
        let second = rl.render_tick(&slot);
        assert_eq!(first, second);
        assert_eq!(*rl.mode(), DisplayMode::Running);
    }
}
