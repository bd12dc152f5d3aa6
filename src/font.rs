//! Glyph tables for text rendering. The driver ships no font: the caller supplies a table of 5x7
//! glyphs indexed by 7-bit character code.

use crate::error::Error;

/// Width of a glyph in pixel columns.
pub const GLYPH_WIDTH: usize = 5;
/// Number of glyph rows in use; bit 7 of each column byte is ignored.
pub const GLYPH_HEIGHT: usize = 7;
/// Entries in a glyph table, one per 7-bit character code.
pub const GLYPH_COUNT: usize = 128;

/// One glyph: byte `i` is pixel column `i`, with bit `k` set for a lit pixel at row `k`.
pub type Glyph = [u8; GLYPH_WIDTH];

pub type GlyphTable = [Glyph; GLYPH_COUNT];

/// Look up the glyph for `c`. Characters outside 7-bit ASCII have no entry.
pub fn glyph(table: &GlyphTable, c: char) -> Result<&Glyph, Error> {
    table.get(c as usize).ok_or(Error::NoGlyph(c))
}
