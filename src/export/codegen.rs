//! Rust source generation for exported glyph tables.
//!
//! Writes one self-contained `.rs` file per font: the per-glyph byte arrays,
//! the scalar-ordered pointer map, the parallel metadata arrays, and a
//! `RasterFont` value tying them together. The output depends only on this
//! crate's `RasterFont` type.

use std::io::{self, Write};
use std::path::Path;

use super::CompressedGlyph;

/// Derive the table name from a font file path: the file stem with anything
/// that is not an identifier character replaced by `_`.
pub fn font_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font");
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Write the generated table module for `glyphs`.
///
/// `name` must already be a valid identifier (see [`font_name_from_path`]);
/// it is uppercased for the statics. `source` is recorded in the header
/// comment only.
pub fn write_table(
    out: &mut dyn Write,
    name: &str,
    source: &str,
    glyph_width: usize,
    glyph_height: usize,
    glyph_bytes: usize,
    glyphs: &[CompressedGlyph],
) -> io::Result<()> {
    let upper = name.to_ascii_uppercase();

    writeln!(
        out,
        "// Generated by rasterfont {} from {source}. Do not edit.",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "use rasterfont::raster::RasterFont;")?;
    writeln!(out)?;

    for glyph in glyphs {
        writeln!(
            out,
            "static {upper}_GLYPH_{:04X}: [u8; {}] = [",
            glyph.unicode,
            glyph.bitmap.len()
        )?;
        write_bytes(out, &glyph.bitmap)?;
        writeln!(out, "];")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "static {upper}_GLYPHS: [(u32, &[u8]); {}] = [",
        glyphs.len()
    )?;
    for glyph in glyphs {
        writeln!(
            out,
            "    (0x{:04X}, &{upper}_GLYPH_{:04X}),",
            glyph.unicode, glyph.unicode
        )?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    write_metadata(out, &upper, "WIDTHS", glyphs, |g| g.width as i32)?;
    write_metadata(out, &upper, "HEIGHTS", glyphs, |g| g.height as i32)?;
    write_metadata(out, &upper, "VERTICAL_OFFSETS", glyphs, |g| {
        g.vertical_offset
    })?;
    write_metadata(out, &upper, "HORIZONTAL_OFFSETS", glyphs, |g| {
        g.horizontal_offset
    })?;

    writeln!(out, "pub static {upper}: RasterFont<'static> = RasterFont {{")?;
    writeln!(out, "    name: \"{name}\",")?;
    writeln!(out, "    glyph_width: {glyph_width},")?;
    writeln!(out, "    glyph_height: {glyph_height},")?;
    writeln!(out, "    glyph_bytes: {glyph_bytes},")?;
    writeln!(out, "    glyphs: &{upper}_GLYPHS,")?;
    writeln!(out, "    widths: Some(&{upper}_WIDTHS),")?;
    writeln!(out, "    heights: Some(&{upper}_HEIGHTS),")?;
    writeln!(out, "    vertical_offsets: Some(&{upper}_VERTICAL_OFFSETS),")?;
    writeln!(
        out,
        "    horizontal_offsets: Some(&{upper}_HORIZONTAL_OFFSETS),"
    )?;
    writeln!(out, "}};")?;
    Ok(())
}

/// Byte array body, twelve values per line.
fn write_bytes(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    for chunk in bytes.chunks(12) {
        write!(out, "   ")?;
        for b in chunk {
            write!(out, " 0x{b:02X},")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_metadata(
    out: &mut dyn Write,
    upper: &str,
    suffix: &str,
    glyphs: &[CompressedGlyph],
    value: impl Fn(&CompressedGlyph) -> i32,
) -> io::Result<()> {
    writeln!(out, "static {upper}_{suffix}: [i32; {}] = [", glyphs.len())?;
    for chunk in glyphs.chunks(12) {
        write!(out, "   ")?;
        for glyph in chunk {
            write!(out, " {},", value(glyph))?;
        }
        writeln!(out)?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;
    Ok(())
}
