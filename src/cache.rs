//! Cached glyph textures for fractional-scale rendering.
//!
//! Direct blitting only supports integer block replication, so fractional
//! scales go through an expanded per-glyph alpha mask ("texture") sampled
//! nearest-neighbor at draw time. Sampling stays a hard binary decision:
//! a destination pixel is either the glyph color or untouched.
//!
//! The cache is an explicit object owned by the caller and keyed by a
//! caller-assigned [`FontId`], not by buffer identity: two fonts that happen
//! to reuse a freed allocation can never alias each other's textures, and
//! eviction is an explicit [`GlyphCache::clear`]/[`GlyphCache::clear_font`]
//! call instead of process-global state.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::font::Font;
use crate::glyphmap::{GlyphMap, SPACE_GLYPH};
use crate::surface::Surface;
use crate::utf8;

/// Caller-assigned stable identity for a font's cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u64);

/// Expanded monochrome glyph: one alpha byte per pixel, 0 or 255.
pub struct GlyphTexture {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<u8>,
}

/// Per-font glyph texture store.
#[derive(Default)]
pub struct GlyphCache {
    fonts: HashMap<FontId, Vec<Option<GlyphTexture>>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the texture for a glyph, rendering and caching it on first use.
    ///
    /// An out-of-range index is substituted with the space glyph before the
    /// cache lookup, so the miss policy matches the direct blit path.
    pub fn texture(&mut self, id: FontId, font: &Font, index: usize) -> &GlyphTexture {
        let mut index = if index >= font.glyph_count {
            SPACE_GLYPH as usize
        } else {
            index
        };
        index = index.min(font.glyph_count.saturating_sub(1));

        let entries = self
            .fonts
            .entry(id)
            .or_insert_with(|| std::iter::repeat_with(|| None).take(font.glyph_count.max(1)).collect());
        entries[index].get_or_insert_with(|| expand_glyph(font, index))
    }

    /// Number of fonts with live cache slots.
    pub fn cached_fonts(&self) -> usize {
        self.fonts.len()
    }

    /// Drop one font's textures.
    pub fn clear_font(&mut self, id: FontId) {
        self.fonts.remove(&id);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.fonts.clear();
    }
}

/// Expand a bit-packed glyph into a full alpha mask.
fn expand_glyph(font: &Font, index: usize) -> GlyphTexture {
    let mut alpha = vec![0u8; font.width * font.height];
    if let Some(glyph) = font.glyph(index) {
        for y in 0..font.height {
            for x in 0..font.width {
                if font.pixel(glyph, x, y) {
                    alpha[y * font.width + x] = 255;
                }
            }
        }
    }
    GlyphTexture {
        width: font.width,
        height: font.height,
        alpha,
    }
}

/// Draw a glyph texture at an arbitrary scale by nearest-neighbor sampling.
pub fn draw_texture_scaled<S: Surface + ?Sized>(
    tex: &GlyphTexture,
    surface: &mut S,
    x: i32,
    y: i32,
    scale: f32,
    color: Rgb,
) {
    if scale <= 0.0 || tex.width == 0 || tex.height == 0 {
        return;
    }
    let dest_w = (tex.width as f32 * scale).round() as i32;
    let dest_h = (tex.height as f32 * scale).round() as i32;
    for dy in 0..dest_h {
        let sy = ((dy as f32 / scale) as usize).min(tex.height - 1);
        for dx in 0..dest_w {
            let sx = ((dx as f32 / scale) as usize).min(tex.width - 1);
            if tex.alpha[sy * tex.width + sx] != 0 {
                surface.draw_pixel(x + dx, y + dy, color);
            }
        }
    }
}

/// Fractional-scale text walk through the cache.
///
/// Mirrors the integer-scale layout loop: newline resets the pen column and
/// advances the row; each glyph advances the pen by
/// `glyph_width * scale + spacing`, truncated to whole pixels.
pub fn draw_text<S: Surface + ?Sized>(
    cache: &mut GlyphCache,
    id: FontId,
    font: &Font,
    map: &GlyphMap,
    surface: &mut S,
    x: i32,
    y: i32,
    text: &str,
    spacing: i32,
    scale: f32,
    color: Rgb,
) {
    let bytes = text.as_bytes();
    let mut xpos = x;
    let mut ypos = y;
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'\n' {
            xpos = x;
            ypos += (font.height as f32 * scale + spacing as f32) as i32;
            pos += 1;
            continue;
        }
        let (scalar, consumed) = utf8::decode_scalar(&bytes[pos..]);
        let index = map.resolve(scalar) as usize;
        let tex = cache.texture(id, font, index);
        draw_texture_scaled(tex, surface, xpos, ypos, scale, color);
        xpos += (font.width as f32 * scale + spacing as f32) as i32;
        pos += consumed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::font::FontFormat;
    use crate::surface::Canvas;

    /// 8x2 font, 64 glyphs; glyph 33 ('!') has a full top row.
    fn tiny_font() -> Font {
        let mut glyphs = vec![0u8; 64 * 2];
        glyphs[33 * 2] = 0xFF;
        Font {
            format: FontFormat::Psf1,
            width: 8,
            height: 2,
            glyph_count: 64,
            glyph_bytes: 2,
            glyphs,
        }
    }

    #[test]
    fn texture_expands_bits_to_alpha() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        let tex = cache.texture(FontId(1), &font, 33);
        assert_eq!(tex.width, 8);
        assert_eq!(tex.height, 2);
        assert!(tex.alpha[..8].iter().all(|&a| a == 255));
        assert!(tex.alpha[8..].iter().all(|&a| a == 0));
    }

    #[test]
    fn cache_slots_are_per_font_id() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        cache.texture(FontId(1), &font, 33);
        cache.texture(FontId(1), &font, 34);
        cache.texture(FontId(2), &font, 33);
        assert_eq!(cache.cached_fonts(), 2);

        cache.clear_font(FontId(1));
        assert_eq!(cache.cached_fonts(), 1);
        cache.clear();
        assert_eq!(cache.cached_fonts(), 0);
    }

    #[test]
    fn out_of_range_index_uses_space_slot() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        let tex = cache.texture(FontId(1), &font, 9999);
        // Space is blank in this font.
        assert!(tex.alpha.iter().all(|&a| a == 0));
    }

    #[test]
    fn integer_texture_scale_matches_block_expansion() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        let mut canvas = Canvas::new(16, 4, BLACK);
        let tex = cache.texture(FontId(1), &font, 33);
        draw_texture_scaled(tex, &mut canvas, 0, 0, 2.0, WHITE);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(15, 1), Some(WHITE));
        assert_eq!(canvas.pixel(0, 2), Some(BLACK));
    }

    #[test]
    fn fractional_scale_rounds_destination_size() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        let mut canvas = Canvas::new(16, 4, BLACK);
        let tex = cache.texture(FontId(1), &font, 33);
        draw_texture_scaled(tex, &mut canvas, 0, 0, 1.5, WHITE);
        // 8 * 1.5 = 12 destination columns, 3 rows for the 2 source rows.
        assert_eq!(canvas.pixel(11, 0), Some(WHITE));
        assert_eq!(canvas.pixel(12, 0), Some(BLACK));
        assert_eq!(canvas.pixel(0, 1), Some(WHITE)); // source row 0 again
        assert_eq!(canvas.pixel(0, 2), Some(BLACK)); // source row 1 is blank
    }

    #[test]
    fn cached_text_walk_advances_fractionally() {
        let font = tiny_font();
        let mut cache = GlyphCache::new();
        let mut canvas = Canvas::new(40, 6, BLACK);
        draw_text(
            &mut cache,
            FontId(7),
            &font,
            &GlyphMap::empty(),
            &mut canvas,
            0,
            0,
            "!!",
            1,
            1.5,
            WHITE,
        );
        // Advance = trunc(8*1.5 + 1) = 13; second glyph spans x 13..25.
        assert_eq!(canvas.pixel(11, 0), Some(WHITE));
        assert_eq!(canvas.pixel(12, 0), Some(BLACK));
        assert_eq!(canvas.pixel(13, 0), Some(WHITE));
    }
}
