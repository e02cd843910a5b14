/*
 *  marquee.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Per-field scroll state machine: pre-roll pause, fractional advance,
 *  wrap back to the left edge
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

use crate::constants::{
    ARTIST_VIEWPORT_WIDTH, ARTIST_VIEWPORT_X, ARTIST_VIEWPORT_Y, MARQUEE_GAP_PX, PRE_ROLL_SECS,
    SCROLL_PX_PER_SEC, TITLE_VIEWPORT_WIDTH, TITLE_VIEWPORT_X, TITLE_VIEWPORT_Y,
};
use crate::frame::Bitmap;
use crate::rasterizer::FontId;

// Accumulating 1/fps in f64 lands just under the pre-roll threshold
// (100 x 0.05 == 4.99999999999999); the boundary check tolerates that.
const PRE_ROLL_SLOP_SECS: f64 = 1e-9;

/// The fixed rectangle a field is composited into. Height follows the
/// bound bitmap, so only origin and width live here.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

/// Scroll state for one line of text. Offsets accumulate in floating point
/// so slow speeds stay smooth; the sampled coordinate is floored only at
/// `advance`'s return.
pub struct MarqueeField {
    viewport: Viewport,
    font: FontId,
    content: Option<Bitmap>,
    content_width_px: u32,
    offset_px: f64,
    delay_acc_secs: f64,
}

impl MarqueeField {
    pub fn new(viewport: Viewport, font: FontId) -> Self {
        Self {
            viewport,
            font,
            content: None,
            content_width_px: 0,
            offset_px: 0.0,
            delay_acc_secs: 0.0,
        }
    }

    /// The title field at its fixed panel position.
    pub fn title() -> Self {
        Self::new(
            Viewport { x: TITLE_VIEWPORT_X, y: TITLE_VIEWPORT_Y, width: TITLE_VIEWPORT_WIDTH },
            FontId::Title,
        )
    }

    /// The artist field, below the title.
    pub fn artist() -> Self {
        Self::new(
            Viewport { x: ARTIST_VIEWPORT_X, y: ARTIST_VIEWPORT_Y, width: ARTIST_VIEWPORT_WIDTH },
            FontId::Artist,
        )
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn content(&self) -> Option<&Bitmap> {
        self.content.as_ref()
    }

    /// Scrolled-past width: bound bitmap plus the trailing blank gap.
    pub fn content_width_px(&self) -> u32 {
        self.content_width_px
    }

    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    pub fn delay_acc_secs(&self) -> f64 {
        self.delay_acc_secs
    }

    /// Restart the animation from the left edge with a fresh pre-roll.
    pub fn reset(&mut self) {
        self.offset_px = 0.0;
        self.delay_acc_secs = 0.0;
    }

    /// Bind the rasterized bitmap for the field's current text.
    pub fn bind(&mut self, bitmap: Bitmap) {
        self.content_width_px = bitmap.width() + MARQUEE_GAP_PX;
        self.content = Some(bitmap);
    }

    /// True when the bound text fits its viewport and is centered rather
    /// than scrolled. An unbound field trivially fits.
    pub fn fits(&self) -> bool {
        match &self.content {
            Some(b) => b.width() <= self.viewport.width,
            None => true,
        }
    }

    /// One frame tick for an overflowing field. Holds still until the
    /// pre-roll elapses, then advances; wraps to a freshly-reset state once
    /// the content (gap included) has fully passed the viewport. Returns
    /// the integer pixel column to sample from.
    pub fn advance(&mut self, frame_interval_secs: f64) -> u32 {
        if self.delay_acc_secs < PRE_ROLL_SECS - PRE_ROLL_SLOP_SECS {
            self.delay_acc_secs += frame_interval_secs;
            return self.offset_px as u32;
        }
        self.offset_px += SCROLL_PX_PER_SEC * frame_interval_secs;
        if self.offset_px > self.content_width_px as f64 {
            self.reset();
        }
        self.offset_px as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DISPLAY_FPS;

    const DT: f64 = 1.0 / DISPLAY_FPS as f64;

    fn overflowing_field() -> MarqueeField {
        let mut f = MarqueeField::title();
        f.bind(Bitmap::new(500, 20));
        assert!(!f.fits());
        f
    }

    #[test]
    fn pre_roll_holds_then_scrolls() {
        let mut f = overflowing_field();

        // 5s pre-roll at 20 fps: 100 ticks of stillness
        for _ in 0..100 {
            assert_eq!(f.advance(DT), 0);
        }
        // 100 more ticks: 50 px/s * 5 s = 250 px, floored
        let mut last = 0;
        for _ in 0..100 {
            last = f.advance(DT);
        }
        assert_eq!(last, 250);
    }

    #[test]
    fn offset_is_monotonic_between_wraps() {
        let mut f = overflowing_field();
        for _ in 0..100 {
            f.advance(DT);
        }
        let mut prev = 0;
        for _ in 0..50 {
            let cur = f.advance(DT);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn wrap_restores_fresh_state() {
        let mut f = overflowing_field();
        let content = f.content_width_px(); // 500 + 50

        // run until the wrap fires
        let mut wrapped = false;
        for _ in 0..10_000 {
            f.advance(DT);
            if f.offset_px() == 0.0 && f.delay_acc_secs() == 0.0 {
                wrapped = true;
                break;
            }
        }
        assert!(wrapped, "field never wrapped");
        assert_eq!(f.content_width_px(), content);

        // and the next cycle pre-rolls again
        assert_eq!(f.advance(DT), 0);
        assert!(f.delay_acc_secs() > 0.0);
    }

    #[test]
    fn fractional_speed_accumulates_across_ticks() {
        let mut f = overflowing_field();
        for _ in 0..100 {
            f.advance(DT);
        }
        // 50 px/s at 20 fps is 2.5 px per tick; the floor alternates
        assert_eq!(f.advance(DT), 2);
        assert_eq!(f.advance(DT), 5);
        assert_eq!(f.advance(DT), 7);
        assert_eq!(f.advance(DT), 10);
    }

    #[test]
    fn fitting_text_never_needs_advance() {
        let mut f = MarqueeField::artist();
        f.bind(Bitmap::new(60, 10));
        assert!(f.fits());
        assert_eq!(f.offset_px(), 0.0);
    }

    #[test]
    fn reset_reopens_pre_roll() {
        let mut f = overflowing_field();
        for _ in 0..150 {
            f.advance(DT);
        }
        assert!(f.offset_px() > 0.0);
        f.reset();
        assert_eq!(f.offset_px(), 0.0);
        assert_eq!(f.delay_acc_secs(), 0.0);
        assert_eq!(f.advance(DT), 0);
    }
}
