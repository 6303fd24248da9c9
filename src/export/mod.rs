//! Compressed glyph export: the batch transforms that turn a live font into
//! static embeddable tables.
//!
//! Two deliberately asymmetric paths, kept separate:
//!
//! - [`export_tight`] (PSF path) trims horizontally only: it records each
//!   glyph's tight width and left offset as metadata while carrying the
//!   bitmap bytes unmodified at nominal packing. Height is never trimmed and
//!   the vertical offset is always zero.
//! - [`export_trimmed`] (outline path) trims vertically only: empty rows
//!   above and below the active band are dropped and the remainder repacked
//!   densely at full nominal width. Width is never trimmed.

pub mod codegen;

use std::ops::RangeInclusive;

use crate::font::outline::RenderedGlyph;
use crate::font::{Font, OutlineFont};
use crate::glyphmap::{GlyphMap, SPACE_GLYPH};

/// Upward baseline shift applied to every trimmed outline glyph, as a
/// divisor of the cell height. A quarter-height raise is kept for visual
/// parity with previously generated tables; it is a tunable constant, not a
/// derived metric.
const BASELINE_RAISE_DIVISOR: f32 = 4.0;

/// One exported glyph. Created once, immutable, serialized by
/// [`codegen::write_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedGlyph {
    pub unicode: u32,
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub vertical_offset: i32,
    pub horizontal_offset: i32,
}

/// Export every scalar a PSF font can resolve (printable ASCII plus the
/// auxiliary map) with tight-width metadata, in increasing scalar order.
pub fn export_tight(font: &Font, map: &GlyphMap) -> Vec<CompressedGlyph> {
    let mut scalars: Vec<u32> = (32..=126).collect();
    scalars.extend(map.entries().iter().map(|e| e.unicode));
    scalars.sort_unstable();

    scalars
        .into_iter()
        .map(|scalar| {
            let index = map.resolve(scalar) as usize;
            let bytes = font
                .glyph(index)
                .or_else(|| font.glyph(SPACE_GLYPH as usize))
                .map_or_else(|| vec![0; font.glyph_bytes], <[u8]>::to_vec);
            let (width, horizontal_offset) = tight_metrics(font, &bytes);
            CompressedGlyph {
                unicode: scalar,
                bitmap: bytes,
                width,
                height: font.height as u32,
                vertical_offset: 0,
                horizontal_offset,
            }
        })
        .collect()
}

/// Leftmost/rightmost set bit within the nominal width, over all rows.
///
/// An empty glyph keeps the nominal width with offset zero so that spaces
/// still advance a full column in proportional rendering.
fn tight_metrics(font: &Font, glyph: &[u8]) -> (u32, i32) {
    let mut left: Option<usize> = None;
    let mut right: Option<usize> = None;
    for row in 0..font.height {
        for px in 0..font.width {
            if font.pixel(glyph, px, row) {
                left = Some(left.map_or(px, |l| l.min(px)));
                right = Some(right.map_or(px, |r| r.max(px)));
            }
        }
    }
    match (left, right) {
        (Some(l), Some(r)) => ((r - l + 1) as u32, l as i32),
        _ => (font.width as u32, 0),
    }
}

/// Render and vertically trim every scalar in `ranges`, in increasing scalar
/// order, one entry per input scalar.
///
/// Per-glyph best-effort: a scalar the engine cannot render becomes an
/// all-zero full-height glyph rather than aborting the batch.
pub fn export_trimmed(
    outline: &OutlineFont,
    ranges: &[RangeInclusive<u32>],
) -> Vec<CompressedGlyph> {
    let mut scalars: Vec<u32> = ranges.iter().flat_map(Clone::clone).collect();
    scalars.sort_unstable();

    scalars
        .into_iter()
        .map(|scalar| {
            trim_glyph(
                scalar,
                outline.render(scalar),
                outline.cell_width(),
                outline.cell_height(),
            )
        })
        .collect()
}

/// Trim one rendered glyph to its active rows.
pub(crate) fn trim_glyph(
    unicode: u32,
    rendered: Option<RenderedGlyph>,
    cell_width: usize,
    cell_height: usize,
) -> CompressedGlyph {
    let stride = cell_width.div_ceil(8);

    let Some(glyph) = rendered else {
        // Render failure: a blank full-height cell.
        return CompressedGlyph {
            unicode,
            bitmap: vec![0; stride * cell_height],
            width: cell_width as u32,
            height: cell_height as u32,
            vertical_offset: 0,
            horizontal_offset: 0,
        };
    };

    let Some((top, bottom)) = glyph.active_rows() else {
        // Thresholds to nothing: a zero-height placeholder.
        return CompressedGlyph {
            unicode,
            bitmap: Vec::new(),
            width: cell_width as u32,
            height: 0,
            vertical_offset: 0,
            horizontal_offset: 0,
        };
    };

    let shift_up = (cell_height as f32 / BASELINE_RAISE_DIVISOR).round() as i32;
    let baseline_offset = cell_height as i32 - glyph.bitmap_top;
    let width = if glyph.width > 0 {
        glyph.width
    } else {
        cell_width
    };

    CompressedGlyph {
        unicode,
        bitmap: glyph.pack_rows(top, bottom, cell_width),
        width: width as u32,
        height: (bottom - top + 1) as u32,
        vertical_offset: baseline_offset - shift_up,
        horizontal_offset: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFormat;
    use crate::glyphmap::GlyphMapping;

    /// 8x4 font, 256 glyphs, with a few hand-set patterns.
    fn test_font() -> Font {
        let glyph_bytes = 4;
        let mut glyphs = vec![0u8; 256 * glyph_bytes];
        // 'A' (65): single bit at column 0, row 0.
        glyphs[65 * glyph_bytes] = 0x80;
        // 'B' (66): bits in columns 3..=5 across two rows.
        glyphs[66 * glyph_bytes] = 0b0001_0000;
        glyphs[66 * glyph_bytes + 1] = 0b0000_1100;
        // Glyph 129: full row.
        glyphs[129 * glyph_bytes + 2] = 0xFF;
        Font {
            format: FontFormat::Psf1,
            width: 8,
            height: 4,
            glyph_count: 256,
            glyph_bytes,
            glyphs,
        }
    }

    fn find(glyphs: &[CompressedGlyph], unicode: u32) -> &CompressedGlyph {
        glyphs.iter().find(|g| g.unicode == unicode).unwrap()
    }

    #[test]
    fn empty_glyph_keeps_nominal_width() {
        let font = test_font();
        let out = export_tight(&font, &GlyphMap::empty());
        let space = find(&out, 32);
        assert_eq!(space.width, 8);
        assert_eq!(space.horizontal_offset, 0);
        assert_eq!(space.height, 4);
        assert_eq!(space.vertical_offset, 0);
    }

    #[test]
    fn single_bit_at_column_zero() {
        let font = test_font();
        let out = export_tight(&font, &GlyphMap::empty());
        let a = find(&out, 65);
        assert_eq!(a.width, 1);
        assert_eq!(a.horizontal_offset, 0);
    }

    #[test]
    fn interior_band_yields_width_and_offset() {
        let font = test_font();
        let out = export_tight(&font, &GlyphMap::empty());
        let b = find(&out, 66);
        assert_eq!(b.width, 3);
        assert_eq!(b.horizontal_offset, 3);
    }

    #[test]
    fn bitmap_bytes_are_carried_unmodified() {
        let font = test_font();
        let out = export_tight(&font, &GlyphMap::empty());
        let b = find(&out, 66);
        assert_eq!(b.bitmap, font.glyph(66).unwrap());
    }

    #[test]
    fn export_is_idempotent() {
        let font = test_font();
        let map = GlyphMap::new([GlyphMapping {
            unicode: 0x0411,
            glyph_index: 129,
        }]);
        assert_eq!(export_tight(&font, &map), export_tight(&font, &map));
    }

    #[test]
    fn scalars_come_out_sorted_with_aux_entries() {
        let font = test_font();
        let map = GlyphMap::new([GlyphMapping {
            unicode: 0x0411,
            glyph_index: 129,
        }]);
        let out = export_tight(&font, &map);
        assert_eq!(out.len(), 95 + 1);
        assert!(out.windows(2).all(|w| w[0].unicode < w[1].unicode));
        assert_eq!(out.last().unwrap().unicode, 0x0411);
        assert_eq!(find(&out, 0x0411).bitmap, font.glyph(129).unwrap());
    }

    // --- outline path ---

    fn rendered(width: usize, height: usize, coverage: Vec<u8>, top: i32) -> RenderedGlyph {
        RenderedGlyph {
            width,
            height,
            coverage,
            bitmap_left: 0,
            bitmap_top: top,
        }
    }

    #[test]
    fn trimmed_glyph_keeps_only_active_rows() {
        // 4 rows, only row 2 covered; cell 8x12.
        let glyph = rendered(2, 4, vec![0, 0, 0, 0, 255, 255, 0, 0], 12);
        let out = trim_glyph(65, Some(glyph), 8, 12);
        assert_eq!(out.height, 1);
        assert_eq!(out.bitmap, vec![0b1100_0000]);
        assert_eq!(out.width, 2);
        // baseline_offset = 12 - 12 = 0, shift = round(12/4) = 3.
        assert_eq!(out.vertical_offset, -3);
        assert_eq!(out.horizontal_offset, 0);
    }

    #[test]
    fn quarter_height_shift_rounds() {
        // Cell height 10: shift = round(2.5) = 3 (round half away from zero).
        let glyph = rendered(1, 1, vec![255], 4);
        let out = trim_glyph(65, Some(glyph), 8, 10);
        // baseline_offset = 10 - 4 = 6, shift = 3.
        assert_eq!(out.vertical_offset, 3);
    }

    #[test]
    fn render_failure_emits_blank_full_cell() {
        let out = trim_glyph(0x2603, None, 8, 12);
        assert_eq!(out.width, 8);
        assert_eq!(out.height, 12);
        assert_eq!(out.vertical_offset, 0);
        assert_eq!(out.bitmap, vec![0u8; 12]);
    }

    #[test]
    fn all_below_threshold_emits_zero_height_placeholder() {
        let glyph = rendered(2, 2, vec![10, 120, 128, 0], 2);
        let out = trim_glyph(32, Some(glyph), 8, 12);
        assert_eq!(out.height, 0);
        assert!(out.bitmap.is_empty());
        assert_eq!(out.width, 8);
    }

    #[test]
    fn one_entry_per_scalar_in_order() {
        // Exercised through trim_glyph by synthesizing the range walk the
        // exporter performs: placeholders must not collapse.
        let outputs: Vec<CompressedGlyph> = (0x30..=0x33)
            .map(|cp| trim_glyph(cp, None, 8, 8))
            .collect();
        assert_eq!(outputs.len(), 4);
        assert!(outputs.windows(2).all(|w| w[0].unicode < w[1].unicode));
    }
}
