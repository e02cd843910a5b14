/*
 *  glyphs.rs
 *
 *  TrackMarq - now playing, writ small
 *  (c) 2023-26 TrackMarq contributors
 *
 *  Const 1-bpp icon bitmaps, 16x16, rows MSB-first
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

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

pub const GLYPH_WIDTH: u32 = 16;
pub const GLYPH_HEIGHT: u32 = 16;

pub const GLYPH_PLAY: [u8; 32] = [
    0x20, 0x00,
    0x38, 0x00,
    0x3e, 0x00,
    0x3f, 0x80,
    0x3f, 0xe0,
    0x3f, 0xf8,
    0x3f, 0xfe,
    0x3f, 0xff,
    0x3f, 0xff,
    0x3f, 0xfe,
    0x3f, 0xf8,
    0x3f, 0xe0,
    0x3f, 0x80,
    0x3e, 0x00,
    0x38, 0x00,
    0x20, 0x00,
];

pub const GLYPH_PAUSE: [u8; 32] = [
    0x00, 0x00,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x3e, 0x7c,
    0x00, 0x00,
];

pub const GLYPH_SHUFFLE: [u8; 32] = [
    0x00, 0x00,
    0x00, 0x00,
    0x78, 0x44,
    0x0c, 0x4e,
    0x06, 0x5f,
    0x03, 0x64,
    0x01, 0xc4,
    0x00, 0x80,
    0x01, 0xc0,
    0x03, 0x64,
    0x06, 0x5f,
    0x0c, 0x4e,
    0x78, 0x44,
    0x00, 0x00,
    0x00, 0x00,
    0x00, 0x00,
];

pub const GLYPH_REPEAT: [u8; 32] = [
    0x00, 0x00,
    0x07, 0xe0,
    0x18, 0x18,
    0x20, 0x04,
    0x20, 0x04,
    0x00, 0x04,
    0x00, 0x0e,
    0x00, 0x1f,
    0x00, 0x0e,
    0x20, 0x04,
    0x20, 0x00,
    0x20, 0x04,
    0x18, 0x18,
    0x07, 0xe0,
    0x00, 0x00,
    0x00, 0x00,
];

/// Stamp a 16x16 glyph at `origin`, overwriting the covered rectangle.
pub fn draw_glyph<D>(target: &mut D, data: &'static [u8], origin: Point)
where
    D: DrawTarget<Color = BinaryColor, Error = core::convert::Infallible>,
{
    let raw = ImageRaw::<BinaryColor>::new(data, GLYPH_WIDTH);
    Image::new(&raw, origin).draw(target).ok();
}
