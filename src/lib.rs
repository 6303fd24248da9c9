//! Bitmap console-font codec and rasterization engine.
//!
//! This crate decodes PSF1/PSF2 glyph tables (and renders TrueType outlines
//! into fixed bitmap cells), resolves UTF-8 text against the resulting glyph
//! store, and blits it onto a pixel surface with scaling, spacing, and
//! background effects. The export side trims glyphs to compact
//! representations and serializes them as static Rust tables for embedding.
//! All glyph sampling is monochrome; there is no anti-aliasing anywhere.

#![deny(unsafe_code)]

pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod glyphmap;
pub mod layout;
pub mod raster;
pub mod reader;
pub mod surface;
pub mod utf8;

pub use cache::{FontId, GlyphCache};
pub use color::Rgb;
pub use error::FontError;
pub use export::CompressedGlyph;
pub use font::{Font, FontFormat, OutlineFont};
pub use glyphmap::{GlyphMap, GlyphMapping};
pub use raster::RasterFont;
pub use surface::{Canvas, Surface};
