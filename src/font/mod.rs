//! Font records and the on-disk format decoders.
//!
//! A [`Font`] is the uncompressed, position-addressable glyph store: a
//! contiguous byte buffer of fixed-size bit-packed glyph cells plus the
//! dimensions needed to index it. It is produced either by decoding a PSF1 or
//! PSF2 file ([`Font::decode`]) or by rendering a TrueType outline into
//! fixed cells ([`Font::from_outline`]).

mod psf;

pub mod outline;

pub use outline::OutlineFont;
pub use psf::{Psf1Mode, Psf2Flags};

use std::path::Path;

use crate::error::FontError;
use crate::glyphmap::{GlyphMap, GlyphMapping};

/// Which on-disk variant a [`Font`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Psf1,
    Psf2,
    /// Rendered from a TrueType outline rather than decoded from a bitmap
    /// format.
    OutlineDerived,
}

/// An uncompressed bitmap font: `glyph_count` cells of `glyph_bytes` bytes
/// each, rows packed MSB-first and padded to whole bytes.
#[derive(Debug, Clone)]
pub struct Font {
    pub format: FontFormat,
    /// Nominal glyph width in pixels.
    pub width: usize,
    /// Glyph height in pixels.
    pub height: usize,
    pub glyph_count: usize,
    /// Bytes per glyph cell. Equals `stride() * height`.
    pub glyph_bytes: usize,
    /// The glyph table, exclusively owned.
    pub glyphs: Vec<u8>,
}

impl Font {
    /// Decode a PSF1 or PSF2 byte buffer.
    ///
    /// All-or-nothing: a bad magic, a truncated table, or inconsistent
    /// geometry yields an error and no partial font.
    pub fn decode(data: &[u8]) -> Result<Self, FontError> {
        if data.starts_with(&psf::PSF1_MAGIC) {
            return psf::decode_psf1(data);
        }
        if data.starts_with(&psf::PSF2_MAGIC) {
            return psf::decode_psf2(data);
        }
        Err(FontError::UnsupportedFormat)
    }

    /// Read and decode a PSF font file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Build a font by rendering outline glyphs into fixed cells.
    ///
    /// The glyph table keeps printable ASCII at its direct indices
    /// (`[32,126]`), matching the resolution invariant; the scalars from
    /// `ranges` that fall outside that range are appended after index 127 in
    /// increasing order, and the returned [`GlyphMap`] carries their
    /// positions. A scalar the outline engine cannot render becomes an
    /// all-zero cell.
    pub fn from_outline(
        outline: &OutlineFont,
        ranges: &[std::ops::RangeInclusive<u32>],
    ) -> (Self, GlyphMap) {
        let width = outline.cell_width();
        let height = outline.cell_height();
        let stride = width.div_ceil(8);
        let glyph_bytes = stride * height;

        let mut extra: Vec<u32> = ranges
            .iter()
            .flat_map(Clone::clone)
            .filter(|cp| !(32..=126).contains(cp))
            .collect();
        extra.sort_unstable();
        extra.dedup();

        let glyph_count = 127 + extra.len();
        let mut glyphs = vec![0u8; glyph_count * glyph_bytes];

        for cp in 32..=126u32 {
            let cell = outline.render_cell(cp);
            let offset = cp as usize * glyph_bytes;
            glyphs[offset..offset + glyph_bytes].copy_from_slice(&cell);
        }

        let mut entries = Vec::with_capacity(extra.len());
        for (i, &cp) in extra.iter().enumerate() {
            let index = 127 + i;
            let cell = outline.render_cell(cp);
            let offset = index * glyph_bytes;
            glyphs[offset..offset + glyph_bytes].copy_from_slice(&cell);
            entries.push(GlyphMapping {
                unicode: cp,
                glyph_index: index as u16,
            });
        }

        let font = Self {
            format: FontFormat::OutlineDerived,
            width,
            height,
            glyph_count,
            glyph_bytes,
            glyphs,
        };
        (font, GlyphMap::new(entries))
    }

    /// Bytes per glyph row.
    pub fn stride(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Borrow one glyph cell, or `None` past the end of the table.
    pub fn glyph(&self, index: usize) -> Option<&[u8]> {
        if index >= self.glyph_count {
            return None;
        }
        let start = index * self.glyph_bytes;
        Some(&self.glyphs[start..start + self.glyph_bytes])
    }

    /// Whether a glyph pixel is set. Out-of-range coordinates read as unset.
    pub fn pixel(&self, glyph: &[u8], x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = glyph[y * self.stride() + x / 8];
        byte & (0x80 >> (x % 8)) != 0
    }
}
