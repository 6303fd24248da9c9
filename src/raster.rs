//! Bit-packed glyph blitting onto a [`Surface`].
//!
//! Glyph bitmaps are row-major, MSB-first within each byte, rows padded to
//! whole bytes. Integer scaling replicates each set bit as a filled
//! `scale`x`scale` block; fractional scaling goes through the cached texture
//! path in [`crate::cache`] instead. An out-of-range glyph index is
//! substituted with the space glyph, never reported as an error.

use crate::color::Rgb;
use crate::font::Font;
use crate::glyphmap::SPACE_GLYPH;
use crate::surface::Surface;

/// Draw one glyph at 1:1 scale.
pub fn draw_glyph<S: Surface + ?Sized>(
    font: &Font,
    index: usize,
    surface: &mut S,
    x: i32,
    y: i32,
    color: Rgb,
) {
    let index = substitute(font, index);
    let Some(glyph) = font.glyph(index) else {
        return;
    };
    for row in 0..font.height {
        for px in 0..font.width {
            if font.pixel(glyph, px, row) {
                surface.draw_pixel(x + px as i32, y + row as i32, color);
            }
        }
    }
}

/// Draw one glyph with each set bit expanded to a `scale`x`scale` block.
pub fn draw_glyph_scaled<S: Surface + ?Sized>(
    font: &Font,
    index: usize,
    surface: &mut S,
    x: i32,
    y: i32,
    scale: i32,
    color: Rgb,
) {
    if scale <= 1 {
        draw_glyph(font, index, surface, x, y, color);
        return;
    }
    let index = substitute(font, index);
    let Some(glyph) = font.glyph(index) else {
        return;
    };
    for row in 0..font.height {
        for px in 0..font.width {
            if font.pixel(glyph, px, row) {
                surface.fill_rect(
                    x + px as i32 * scale,
                    y + row as i32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}

/// Replace an out-of-range index with the space glyph.
fn substitute(font: &Font, index: usize) -> usize {
    if index >= font.glyph_count {
        SPACE_GLYPH as usize
    } else {
        index
    }
}

// --- Static raster-font tables ---

/// A generated, read-only glyph table as embedded in a build.
///
/// `glyphs` is ordered by scalar; the optional metadata arrays are indexed
/// identically. Per-glyph heights and vertical offsets come from the
/// outline-trimming exporter; widths and horizontal offsets from the PSF
/// tight-width exporter.
#[derive(Debug, Clone, Copy)]
pub struct RasterFont<'a> {
    pub name: &'a str,
    /// Nominal glyph width in pixels.
    pub glyph_width: usize,
    /// Nominal glyph height in pixels.
    pub glyph_height: usize,
    /// Bytes per full-size glyph bitmap.
    pub glyph_bytes: usize,
    /// `(unicode, bitmap)` pairs in increasing scalar order.
    pub glyphs: &'a [(u32, &'a [u8])],
    pub widths: Option<&'a [i32]>,
    pub heights: Option<&'a [i32]>,
    pub vertical_offsets: Option<&'a [i32]>,
    pub horizontal_offsets: Option<&'a [i32]>,
}

impl RasterFont<'_> {
    /// Find a glyph by scalar. Returns its table position and bitmap.
    pub fn find_glyph(&self, unicode: u32) -> Option<(usize, &[u8])> {
        self.glyphs
            .iter()
            .position(|&(cp, _)| cp == unicode)
            .map(|i| (i, self.glyphs[i].1))
    }

    /// Tight width of the glyph at table position `i`.
    pub fn glyph_width_at(&self, i: usize) -> usize {
        self.widths
            .and_then(|w| w.get(i).copied())
            .map_or(self.glyph_width, |w| w.max(0) as usize)
    }

    /// Left edge of the active pixels of the glyph at table position `i`.
    pub fn horizontal_offset_at(&self, i: usize) -> i32 {
        self.horizontal_offsets
            .and_then(|h| h.get(i).copied())
            .unwrap_or(0)
    }

    /// Effective height of the glyph at table position `i`.
    pub fn glyph_height_at(&self, i: usize) -> usize {
        self.heights
            .and_then(|h| h.get(i).copied())
            .map_or(self.glyph_height, |h| h.max(0) as usize)
    }

    /// Baseline shift of the glyph at table position `i`.
    pub fn vertical_offset_at(&self, i: usize) -> i32 {
        self.vertical_offsets
            .and_then(|v| v.get(i).copied())
            .unwrap_or(0)
    }
}

/// Draw one glyph from a generated table, honoring its per-glyph height and
/// vertical offset. An unmapped scalar falls back to the space glyph; a table
/// without a space entry draws nothing.
pub fn draw_raster_glyph<S: Surface + ?Sized>(
    font: &RasterFont<'_>,
    unicode: u32,
    surface: &mut S,
    x: i32,
    y: i32,
    scale: i32,
    color: Rgb,
) {
    let Some((i, bitmap)) = font
        .find_glyph(unicode)
        .or_else(|| font.find_glyph(u32::from(SPACE_GLYPH)))
    else {
        return;
    };
    let height = font.glyph_height_at(i);
    let v_off = font.vertical_offset_at(i);
    let stride = font.glyph_width.div_ceil(8);
    let scale = scale.max(1);

    for row in 0..height {
        for px in 0..font.glyph_width {
            let byte = bitmap[row * stride + px / 8];
            if byte & (0x80 >> (px % 8)) == 0 {
                continue;
            }
            let dx = x + px as i32 * scale;
            let dy = y + (v_off + row as i32) * scale;
            if scale == 1 {
                surface.draw_pixel(dx, dy, color);
            } else {
                surface.fill_rect(dx, dy, scale, scale, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::font::FontFormat;
    use crate::surface::Canvas;

    /// 8x2 font with 3 glyphs; glyph 1 is a full top row.
    fn tiny_font() -> Font {
        let mut glyphs = vec![0u8; 3 * 2];
        glyphs[2] = 0xFF; // glyph 1, row 0
        Font {
            format: FontFormat::Psf1,
            width: 8,
            height: 2,
            glyph_count: 3,
            glyph_bytes: 2,
            glyphs,
        }
    }

    #[test]
    fn blit_sets_exactly_the_glyph_bits() {
        let font = tiny_font();
        let mut canvas = Canvas::new(10, 4, BLACK);
        draw_glyph(&font, 1, &mut canvas, 1, 1, WHITE);
        for px in 0..8 {
            assert_eq!(canvas.pixel(1 + px, 1), Some(WHITE));
            assert_eq!(canvas.pixel(1 + px, 2), Some(BLACK));
        }
        assert_eq!(canvas.pixel(0, 1), Some(BLACK));
        assert_eq!(canvas.pixel(9, 1), Some(BLACK));
    }

    #[test]
    fn scaled_blit_expands_blocks() {
        let font = tiny_font();
        let mut canvas = Canvas::new(16, 4, BLACK);
        draw_glyph_scaled(&font, 1, &mut canvas, 0, 0, 2, WHITE);
        // Each set bit covers a 2x2 block.
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(15, 1), Some(WHITE));
        assert_eq!(canvas.pixel(0, 2), Some(BLACK));
    }

    #[test]
    fn out_of_range_index_draws_space_without_panicking() {
        // Space (32) is beyond this 3-glyph table too, so nothing is drawn,
        // but the call must not fail.
        let font = tiny_font();
        let mut canvas = Canvas::new(8, 2, BLACK);
        draw_glyph(&font, 700, &mut canvas, 0, 0, WHITE);
        assert!(canvas.buffer().iter().all(|&p| p == BLACK.to_u32()));
    }

    const ROW_BITMAP: [u8; 2] = [0xFF, 0x00];
    const TABLE: [(u32, &[u8]); 2] = [(32, &[0x00, 0x00]), (65, &ROW_BITMAP)];

    fn raster_font() -> RasterFont<'static> {
        RasterFont {
            name: "tiny",
            glyph_width: 8,
            glyph_height: 2,
            glyph_bytes: 2,
            glyphs: &TABLE,
            widths: None,
            heights: None,
            vertical_offsets: None,
            horizontal_offsets: None,
        }
    }

    #[test]
    fn raster_table_lookup_by_scalar() {
        let font = raster_font();
        let (i, bitmap) = font.find_glyph(65).unwrap();
        assert_eq!(i, 1);
        assert_eq!(bitmap, &ROW_BITMAP);
        assert!(font.find_glyph(66).is_none());
    }

    #[test]
    fn raster_draw_uses_bitmap_rows() {
        let font = raster_font();
        let mut canvas = Canvas::new(8, 2, BLACK);
        draw_raster_glyph(&font, 65, &mut canvas, 0, 0, 1, WHITE);
        assert_eq!(canvas.pixel(7, 0), Some(WHITE));
        assert_eq!(canvas.pixel(0, 1), Some(BLACK));
    }

    #[test]
    fn raster_unmapped_scalar_falls_back_to_space() {
        let font = raster_font();
        let mut canvas = Canvas::new(8, 2, BLACK);
        draw_raster_glyph(&font, 0x4E2D, &mut canvas, 0, 0, 1, WHITE);
        assert!(canvas.buffer().iter().all(|&p| p == BLACK.to_u32()));
    }

    #[test]
    fn raster_vertical_offset_shifts_rows() {
        const V_OFF: [i32; 2] = [0, 1];
        const H: [i32; 2] = [2, 1];
        let mut font = raster_font();
        font.vertical_offsets = Some(&V_OFF);
        font.heights = Some(&H);
        let mut canvas = Canvas::new(8, 3, BLACK);
        draw_raster_glyph(&font, 65, &mut canvas, 0, 0, 1, WHITE);
        // One active row, shifted down by the offset.
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(0, 1), Some(WHITE));
        assert_eq!(canvas.pixel(0, 2), Some(BLACK));
    }
}
