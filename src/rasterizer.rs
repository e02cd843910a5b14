/*
 *  rasterizer.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Text rasterization seam: the core asks for a measured bitmap and never
 *  cares how the glyphs got there
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

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::frame::Bitmap;

/// Which face a field renders with. Sizes are fixed per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontId {
    Title,
    Artist,
    Banner,
}

/// Produces a measured 1-bpp bitmap for a piece of text. Deterministic for
/// identical inputs.
pub trait TextRasterizer: Send + Sync {
    fn rasterize(&self, text: &str, font: FontId) -> Bitmap;
}

/// Rasterizer over the embedded-graphics bundled mono fonts.
pub struct MonoRasterizer;

impl MonoRasterizer {
    fn font(id: FontId) -> &'static MonoFont<'static> {
        match id {
            FontId::Title | FontId::Banner => &FONT_10X20,
            FontId::Artist => &FONT_6X10,
        }
    }
}

impl TextRasterizer for MonoRasterizer {
    fn rasterize(&self, text: &str, font: FontId) -> Bitmap {
        let font = Self::font(font);
        let advance = font.character_size.width + font.character_spacing;
        let width = text.chars().count() as u32 * advance;
        let mut bitmap = Bitmap::new(width, font.character_size.height);
        let style = MonoTextStyle::new(font, BinaryColor::On);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(&mut bitmap)
            .ok();
        bitmap
    }
}
