//! Unicode scalar to glyph-table index resolution.
//!
//! Console fonts keep the printable ASCII range at its own indices, so
//! `[32,126]` maps directly. Everything else goes through a small auxiliary
//! table; anything the table does not cover resolves to the space glyph.
//! Resolution is total: malformed or exotic input renders as a blank column
//! instead of stopping the layout walk.

/// Glyph-table index of the space character, the universal fallback.
pub const SPACE_GLYPH: u16 = 32;

const ASCII_FIRST: u32 = 32;
const ASCII_LAST: u32 = 126;

/// One auxiliary mapping from a Unicode scalar to a glyph-table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMapping {
    pub unicode: u32,
    pub glyph_index: u16,
}

/// Auxiliary scalar→index table consulted for non-ASCII input.
#[derive(Debug, Clone, Default)]
pub struct GlyphMap {
    entries: Vec<GlyphMapping>,
}

impl GlyphMap {
    /// Map with no auxiliary entries: ASCII renders, everything else is a
    /// space.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from auxiliary entries.
    ///
    /// Entries for scalars inside `[32,126]` are redundant (the direct range
    /// is always authoritative) and are skipped rather than stored.
    pub fn new(entries: impl IntoIterator<Item = GlyphMapping>) -> Self {
        let mut kept = Vec::new();
        for entry in entries {
            if (ASCII_FIRST..=ASCII_LAST).contains(&entry.unicode) {
                log::warn!(
                    "glyphmap: skipping redundant ASCII entry U+{:04X}",
                    entry.unicode
                );
                continue;
            }
            kept.push(entry);
        }
        Self { entries: kept }
    }

    /// Resolve a scalar to a glyph-table index. Never fails: unknown scalars
    /// resolve to [`SPACE_GLYPH`].
    pub fn resolve(&self, scalar: u32) -> u16 {
        if (ASCII_FIRST..=ASCII_LAST).contains(&scalar) {
            return scalar as u16;
        }
        self.entries
            .iter()
            .find(|e| e.unicode == scalar)
            .map_or(SPACE_GLYPH, |e| e.glyph_index)
    }

    pub fn entries(&self) -> &[GlyphMapping] {
        &self.entries
    }
}

/// Built-in table for the Cyrillic block layout used by the bundled console
/// fonts: А-я packed sequentially from index 128, followed by the Ukrainian
/// and Russian extras.
pub fn cyrillic() -> GlyphMap {
    let mut entries = Vec::with_capacity(74);
    // U+0410..=U+044F (А-я) at indices 128..=191.
    for (i, cp) in (0x0410..=0x044F).enumerate() {
        entries.push(GlyphMapping {
            unicode: cp,
            glyph_index: 128 + i as u16,
        });
    }
    // Ё ё Є є І і Ї ї Ґ ґ
    let extras: [(u32, u16); 10] = [
        (0x0401, 192),
        (0x0451, 193),
        (0x0404, 194),
        (0x0454, 195),
        (0x0406, 196),
        (0x0456, 197),
        (0x0407, 198),
        (0x0457, 199),
        (0x0490, 200),
        (0x0491, 201),
    ];
    for (unicode, glyph_index) in extras {
        entries.push(GlyphMapping {
            unicode,
            glyph_index,
        });
    }
    GlyphMap::new(entries)
}
