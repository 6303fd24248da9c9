//! TrueType outline ingestion via the `fontdue` rasterizer.
//!
//! The outline engine produces 8-bit coverage bitmaps; everything downstream
//! of this crate is monochrome, so coverage is cut at the midpoint of the
//! representable range: a pixel is on when its coverage exceeds 50%. No
//! anti-aliasing survives this boundary.

use std::path::Path;

use crate::error::FontError;

/// Coverage above this value counts as a set pixel (`> 128` of 255).
pub const COVERAGE_THRESHOLD: u8 = 128;

/// A loaded outline font configured for a fixed target cell size.
pub struct OutlineFont {
    font: fontdue::Font,
    cell_width: usize,
    cell_height: usize,
}

/// One glyph as rendered by the outline engine: raw coverage plus the
/// placement metrics needed to position it against the baseline.
pub struct RenderedGlyph {
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, one byte per pixel, `width * height` long.
    pub coverage: Vec<u8>,
    /// Horizontal bearing: offset of the bitmap's left edge from the pen.
    pub bitmap_left: i32,
    /// Distance from the baseline up to the bitmap's top row.
    pub bitmap_top: i32,
}

impl OutlineFont {
    /// Read an outline font file and configure it for `cell_width` x
    /// `cell_height` pixel cells.
    pub fn load(
        path: impl AsRef<Path>,
        cell_width: usize,
        cell_height: usize,
    ) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, cell_width, cell_height)
    }

    pub fn from_bytes(
        data: &[u8],
        cell_width: usize,
        cell_height: usize,
    ) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| FontError::Outline(e.to_string()))?;
        Ok(Self {
            font,
            cell_width,
            cell_height,
        })
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    pub fn cell_height(&self) -> usize {
        self.cell_height
    }

    /// Render one scalar at the configured pixel size.
    ///
    /// Returns `None` when the font has no glyph for the scalar (or the
    /// scalar is not a valid `char`); callers treat that as a render failure
    /// and substitute an all-zero cell rather than aborting their batch.
    pub fn render(&self, scalar: u32) -> Option<RenderedGlyph> {
        let ch = char::from_u32(scalar)?;
        if self.font.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, coverage) = self.font.rasterize(ch, self.cell_height as f32);
        Some(RenderedGlyph {
            width: metrics.width,
            height: metrics.height,
            coverage,
            bitmap_left: metrics.xmin,
            // ymin is the offset of the bitmap's bottom edge from the
            // baseline; the top row sits height above that.
            bitmap_top: metrics.height as i32 + metrics.ymin,
        })
    }

    /// Render one scalar into a fixed bit-packed cell.
    ///
    /// The pen sits at the cell's bottom-left with the baseline on the
    /// bottom edge; pixels landing outside the cell are clipped. A render
    /// failure yields an all-zero cell.
    pub fn render_cell(&self, scalar: u32) -> Vec<u8> {
        let stride = self.cell_width.div_ceil(8);
        match self.render(scalar) {
            Some(glyph) => glyph.pack_into_cell(self.cell_width, self.cell_height),
            None => {
                log::warn!("outline: no glyph for U+{scalar:04X}, emitting blank cell");
                vec![0u8; stride * self.cell_height]
            }
        }
    }
}

impl RenderedGlyph {
    fn covered(&self, x: usize, y: usize) -> bool {
        self.coverage[y * self.width + x] > COVERAGE_THRESHOLD
    }

    /// Blit this glyph into a `cell_width` x `cell_height` bit-packed cell,
    /// baseline on the bottom edge, clipping anything outside.
    pub fn pack_into_cell(&self, cell_width: usize, cell_height: usize) -> Vec<u8> {
        let stride = cell_width.div_ceil(8);
        let mut cell = vec![0u8; stride * cell_height];
        for row in 0..self.height {
            let dest_y = cell_height as i32 - self.bitmap_top + row as i32;
            if dest_y < 0 || dest_y >= cell_height as i32 {
                continue;
            }
            for col in 0..self.width {
                if !self.covered(col, row) {
                    continue;
                }
                let dest_x = self.bitmap_left + col as i32;
                if dest_x < 0 || dest_x >= cell_width as i32 {
                    continue;
                }
                let byte = dest_y as usize * stride + dest_x as usize / 8;
                cell[byte] |= 0x80 >> (dest_x as usize % 8);
            }
        }
        cell
    }

    /// First and last rows containing a thresholded pixel, or `None` for a
    /// glyph that thresholds to nothing.
    pub fn active_rows(&self) -> Option<(usize, usize)> {
        let mut top = None;
        let mut bottom = None;
        for row in 0..self.height {
            if (0..self.width).any(|col| self.covered(col, row)) {
                if top.is_none() {
                    top = Some(row);
                }
                bottom = Some(row);
            }
        }
        Some((top?, bottom?))
    }

    /// Repack rows `top..=bottom` into a dense buffer at full `width` pixels
    /// per row (stride padded to whole bytes). No horizontal trimming.
    pub fn pack_rows(&self, top: usize, bottom: usize, width: usize) -> Vec<u8> {
        let stride = width.div_ceil(8);
        let mut packed = vec![0u8; stride * (bottom - top + 1)];
        for row in top..=bottom {
            for col in 0..self.width.min(stride * 8) {
                if self.covered(col, row) {
                    let byte = (row - top) * stride + col / 8;
                    packed[byte] |= 0x80 >> (col % 8);
                }
            }
        }
        packed
    }
}
