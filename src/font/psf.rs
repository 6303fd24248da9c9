//! PSF1/PSF2 on-disk format decoding.
//!
//! PSF1: 2-byte magic, mode byte, charsize byte, then the glyph table.
//! Width is always 8, height equals charsize, and the table holds 256 glyphs
//! (512 when the mode's low bit is set).
//!
//! PSF2: 4-byte magic, seven little-endian u32 header fields, then the glyph
//! table at offset `headersize`. The header may be extended, so the table
//! does not necessarily follow the fixed fields directly.

use bitflags::bitflags;

use crate::error::FontError;
use crate::reader::ByteReader;

use super::{Font, FontFormat};

pub(super) const PSF1_MAGIC: [u8; 2] = [0x36, 0x04];
pub(super) const PSF2_MAGIC: [u8; 4] = [0x72, 0xB5, 0x4A, 0x86];

bitflags! {
    /// PSF1 mode byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Psf1Mode: u8 {
        /// 512 glyphs instead of 256.
        const MODE_512 = 1 << 0;
        /// A Unicode table follows the glyph table.
        const HAS_TABLE = 1 << 1;
        /// The Unicode table contains sequences.
        const HAS_SEQ = 1 << 2;
    }
}

bitflags! {
    /// PSF2 header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Psf2Flags: u32 {
        /// A Unicode table follows the glyph table.
        const UNICODE_TABLE = 1 << 0;
    }
}

pub(super) fn decode_psf1(data: &[u8]) -> Result<Font, FontError> {
    let mut r = ByteReader::new(data);
    r.take(2)?; // magic, already matched
    let mode = Psf1Mode::from_bits_retain(r.read_u8()?);
    let charsize = r.read_u8()? as usize;

    let glyph_count = if mode.contains(Psf1Mode::MODE_512) {
        512
    } else {
        256
    };
    let glyphs = r.take(glyph_count * charsize)?.to_vec();

    Ok(Font {
        format: FontFormat::Psf1,
        width: 8,
        height: charsize,
        glyph_count,
        glyph_bytes: charsize,
        glyphs,
    })
}

pub(super) fn decode_psf2(data: &[u8]) -> Result<Font, FontError> {
    let mut r = ByteReader::new(data);
    r.take(4)?; // magic, already matched
    let _version = r.read_u32_le()?;
    let headersize = r.read_u32_le()? as usize;
    let _flags = Psf2Flags::from_bits_retain(r.read_u32_le()?);
    let glyph_count = r.read_u32_le()? as usize;
    let glyph_bytes = r.read_u32_le()? as usize;
    let height = r.read_u32_le()? as usize;
    let width = r.read_u32_le()? as usize;

    if glyph_bytes != width.div_ceil(8) * height {
        return Err(FontError::BadGeometry {
            charsize: glyph_bytes,
            width,
            height,
        });
    }

    r.seek(headersize)?;
    let glyphs = r.take(glyph_count * glyph_bytes)?.to_vec();

    Ok(Font {
        format: FontFormat::Psf2,
        width,
        height,
        glyph_count,
        glyph_bytes,
        glyphs,
    })
}
