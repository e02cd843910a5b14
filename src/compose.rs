/*
 *  compose.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Frame composition: banners, icons, the shared marquee/centering rule for
 *  text fields, and the track progress bar
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRESS_BAR_THICKNESS, PROGRESS_BAR_WIDTH, PROGRESS_BAR_X,
    PROGRESS_BAR_Y, REPEAT_ICON_X, REPEAT_ICON_Y, SHUFFLE_ICON_X, SHUFFLE_ICON_Y, STATUS_ICON_X,
    STATUS_ICON_Y,
};
use crate::frame::{Bitmap, Frame};
use crate::glyphs::{draw_glyph, GLYPH_PAUSE, GLYPH_PLAY, GLYPH_REPEAT, GLYPH_SHUFFLE};
use crate::marquee::{MarqueeField, Viewport};
use crate::rasterizer::{FontId, TextRasterizer};
use crate::status::{PlayState, PlaybackStatus};

/// Builds one finished frame per tick. Holds the rasterizer seam and the
/// frame interval; everything else is borrowed per call and never retained.
pub struct FrameComposer {
    rasterizer: Box<dyn TextRasterizer>,
    frame_interval_secs: f64,
}

impl FrameComposer {
    pub fn new(rasterizer: Box<dyn TextRasterizer>, fps: u32) -> Self {
        Self { rasterizer, frame_interval_secs: 1.0 / fps.max(1) as f64 }
    }

    pub fn rasterize(&self, text: &str, font: FontId) -> Bitmap {
        self.rasterizer.rasterize(text, font)
    }

    /// Full-screen banner, centered on both axes, nothing else drawn.
    pub fn banner_frame(&self, text: &str) -> Frame {
        let mut frame = Frame::frame();
        let bitmap = self.rasterizer.rasterize(text, FontId::Banner);
        let x = (DISPLAY_WIDTH as i32 - bitmap.width() as i32) / 2;
        let y = (DISPLAY_HEIGHT as i32 - bitmap.height() as i32) / 2;
        frame.blit_columns(&bitmap, 0, bitmap.width(), Point::new(x, y));
        frame
    }

    /// The live now-playing layout. Draw order matters: later elements win
    /// where they overlap.
    pub fn running_frame(
        &self,
        status: &PlaybackStatus,
        title: &mut MarqueeField,
        artist: &mut MarqueeField,
    ) -> Frame {
        let mut frame = Frame::frame();

        let status_glyph: &'static [u8] = match status.play_state {
            PlayState::Playing => &GLYPH_PLAY,
            PlayState::Paused => &GLYPH_PAUSE,
        };
        draw_glyph(&mut frame, status_glyph, Point::new(STATUS_ICON_X, STATUS_ICON_Y));
        if status.random {
            draw_glyph(&mut frame, &GLYPH_SHUFFLE, Point::new(SHUFFLE_ICON_X, SHUFFLE_ICON_Y));
        }
        if status.repeat {
            draw_glyph(&mut frame, &GLYPH_REPEAT, Point::new(REPEAT_ICON_X, REPEAT_ICON_Y));
        }

        self.composite_field(&mut frame, title);
        self.composite_field(&mut frame, artist);

        draw_progress(&mut frame, status.seek, status.duration);
        frame
    }

    /// Shared title/artist rule: center when the text fits, otherwise
    /// advance the field by one tick and paste the visible window.
    fn composite_field(&self, frame: &mut Frame, field: &mut MarqueeField) {
        let vp = field.viewport();
        if field.fits() {
            if let Some(bitmap) = field.content() {
                let x = vp.x + (vp.width as i32 - bitmap.width() as i32) / 2;
                frame.blit_columns(bitmap, 0, bitmap.width(), Point::new(x, vp.y));
            }
            return;
        }
        let offset = field.advance(self.frame_interval_secs);
        let content_width = field.content_width_px();
        if let Some(bitmap) = field.content() {
            blit_marquee_window(frame, bitmap, content_width, offset, vp);
        }
    }
}

/// Paste the window `[offset, offset + vp.width)` of the extended bitmap
/// (text plus trailing blank gap, `content_width` wide) into the viewport.
/// Straddling the end wraps: the remainder is taken from the extended
/// bitmap's start so the viewport always shows a seamless continuation.
pub fn blit_marquee_window(
    frame: &mut Frame,
    bitmap: &Bitmap,
    content_width: u32,
    offset: u32,
    vp: Viewport,
) {
    let text_w = bitmap.width();
    let window_end = offset + vp.width;

    if window_end <= content_width {
        // contiguous slice; columns past the text are the blank gap and
        // need no drawing on a cleared frame
        if offset < text_w {
            let cols = (text_w - offset).min(vp.width);
            frame.blit_columns(bitmap, offset, cols, Point::new(vp.x, vp.y));
        }
        return;
    }

    // wrap case: text tail first, then the window's remainder from the
    // extended bitmap's start
    if offset < text_w {
        frame.blit_columns(bitmap, offset, text_w - offset, Point::new(vp.x, vp.y));
    }
    let wrapped = window_end - content_width;
    let dest_x = vp.x + (content_width - offset) as i32;
    frame.blit_columns(bitmap, 0, wrapped.min(text_w), Point::new(dest_x, vp.y));
}

/// Lit length of the progress bar. `seek` is milliseconds, `duration`
/// seconds; a zero duration yields an empty bar rather than a division.
pub fn progress_len(seek_ms: u64, duration_secs: u64, bar_width: u32) -> u32 {
    if duration_secs == 0 {
        return 0;
    }
    let total_ms = duration_secs as u128 * 1000;
    let len = seek_ms as u128 * bar_width as u128 / total_ms;
    len.min(bar_width as u128) as u32
}

fn draw_progress(frame: &mut Frame, seek_ms: u64, duration_secs: u64) {
    let len = progress_len(seek_ms, duration_secs, PROGRESS_BAR_WIDTH);
    if len == 0 {
        return;
    }
    Line::new(
        Point::new(PROGRESS_BAR_X, PROGRESS_BAR_Y),
        Point::new(PROGRESS_BAR_X + len as i32 - 1, PROGRESS_BAR_Y),
    )
    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, PROGRESS_BAR_THICKNESS))
    .draw(frame)
    .ok();
}
