//! UTF-8 text layout: pen advancement, line breaks, and background panels.
//!
//! The layout walk decodes one scalar at a time, resolves it to a glyph
//! index, blits the glyph at the pen position, then advances the pen by
//! `glyph_width * scale + spacing`. A newline returns the pen to the origin
//! column and drops it by `glyph_height * scale + spacing`. Lines are held in
//! a dynamically sized list; there is no fixed line cap.

use crate::color::{Rgb, contrast_invert};
use crate::font::Font;
use crate::glyphmap::GlyphMap;
use crate::raster::{self, RasterFont};
use crate::surface::Surface;
use crate::utf8;

/// Draw text at 1:1 scale.
pub fn draw_text<S: Surface + ?Sized>(
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    color: Rgb,
) {
    draw_text_scaled(font, map, surface, x, y, text, spacing, 1, color);
}

/// Draw text with integer scaling.
pub fn draw_text_scaled<S: Surface + ?Sized>(
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    scale: i32,
    color: Rgb,
) {
    draw_text_bytes(font, map, surface, x, y, text.as_bytes(), spacing, scale, color);
}

/// Core layout walk over raw bytes.
///
/// Byte-oriented so console data that is not guaranteed-valid UTF-8 can still
/// be rendered: malformed sequences decode to scalar 0, which resolves to the
/// space glyph and advances the pen normally.
pub fn draw_text_bytes<S: Surface + ?Sized>(
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    bytes: &[u8],
    spacing: i32,
    scale: i32,
    color: Rgb,
) {
    let scale = scale.max(1);
    let mut xpos = x;
    let mut ypos = y;
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'\n' {
            xpos = x;
            ypos += font.height as i32 * scale + spacing;
            pos += 1;
            continue;
        }
        let (scalar, consumed) = utf8::decode_scalar(&bytes[pos..]);
        let index = map.resolve(scalar) as usize;
        raster::draw_glyph_scaled(font, index, surface, xpos, ypos, scale, color);
        xpos += font.width as i32 * scale + spacing;
        pos += consumed;
    }
}

/// Size of the background panel for `text`, including padding on all sides.
///
/// The width is driven by the longest line measured in characters, a
/// UTF-8-aware count, since a two-byte Cyrillic scalar still occupies one
/// column.
pub fn background_size(font: &Font, text: &str, spacing: i32, scale: i32, padding: i32) -> (i32, i32) {
    let scale = scale.max(1);
    let lines: Vec<&str> = text.split('\n').collect();
    let max_chars = lines
        .iter()
        .map(|line| utf8::str_len(line.as_bytes()))
        .max()
        .unwrap_or(0) as i32;
    let line_count = lines.len() as i32;

    let w = max_chars * (font.width as i32 * scale + spacing) - spacing + 2 * padding;
    let h = line_count * (font.height as i32 * scale) + (line_count - 1) * spacing + 2 * padding;
    (w, h)
}

/// Draw text over a filled panel with a stroked border.
///
/// The panel is sized from the text metrics, filled with `bg_color`, stroked
/// with `border_color`, and the text drawn on top.
pub fn draw_text_with_background<S: Surface + ?Sized>(
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    scale: i32,
    text_color: Rgb,
    bg_color: Rgb,
    border_color: Rgb,
    padding: i32,
    border_thickness: i32,
) {
    let scale = scale.max(1);
    let (bg_w, bg_h) = background_size(font, text, spacing, scale, padding);

    surface.fill_rect(x - padding, y - padding, bg_w, bg_h, bg_color);
    surface.stroke_rect(x - padding, y - padding, bg_w, bg_h, border_thickness, border_color);

    let mut ypos = y;
    for line in text.split('\n') {
        draw_text_bytes(font, map, surface, x, ypos, line.as_bytes(), spacing, scale, text_color);
        ypos += font.height as i32 * scale + spacing;
    }
}

/// Draw text over a background derived from the text color.
///
/// The fill comes from [`contrast_invert`]; the border is stroked in the
/// text color itself.
pub fn draw_text_auto_inverted<S: Surface + ?Sized>(
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    scale: i32,
    text_color: Rgb,
    padding: i32,
    border_thickness: i32,
) {
    let bg_color = contrast_invert(text_color);
    draw_text_with_background(
        font,
        map,
        surface,
        x,
        y,
        text,
        spacing,
        scale,
        text_color,
        bg_color,
        text_color,
        padding,
        border_thickness,
    );
}

/// Draw text from a generated static table. Scalars are looked up directly
/// in the table's pointer map; the advance stays monospaced at the nominal
/// glyph width.
pub fn draw_raster_text<S: Surface + ?Sized>(
    font: &RasterFont<'_>,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    scale: i32,
    color: Rgb,
) {
    let scale = scale.max(1);
    let mut xpos = x;
    let mut ypos = y;
    for ch in text.chars() {
        if ch == '\n' {
            xpos = x;
            ypos += font.glyph_height as i32 * scale + spacing;
            continue;
        }
        raster::draw_raster_glyph(font, ch as u32, surface, xpos, ypos, scale, color);
        xpos += font.glyph_width as i32 * scale + spacing;
    }
}
