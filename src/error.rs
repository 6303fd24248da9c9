//! Error types for font decoding and export.

use thiserror::Error;

/// Errors produced while decoding or exporting a font.
///
/// Decoding is all-or-nothing: any of these aborts the decode and no partial
/// `Font` is returned. Unresolved Unicode scalars are *not* errors; they
/// degrade to the space glyph during rendering.
#[derive(Debug, Error)]
pub enum FontError {
    /// The input matches neither the PSF1 nor the PSF2 magic.
    #[error("unsupported font format (bad magic)")]
    UnsupportedFormat,

    /// The input ends before the declared header or glyph table does.
    #[error("font data truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The declared glyph byte size does not match the declared dimensions.
    #[error("glyph table geometry mismatch: charsize {charsize} for {width}x{height} glyphs")]
    BadGeometry {
        charsize: usize,
        width: usize,
        height: usize,
    },

    /// The outline engine rejected the font file.
    #[error("failed to parse outline font: {0}")]
    Outline(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
