//! Text rendering with 5x7 glyphs from a caller-supplied `GlyphTable`.
//!
//! The `putc`/`puts` family works in character cells: a cell is `CELL_WIDTH` pixels wide and one
//! page tall, so glyph bytes drop straight into display RAM bytes. `putc2`/`puts2` draw the same
//! glyphs at double size over a 2x2 block of cells. `putc_at` places a glyph at any pixel
//! position, splitting each glyph column across two pages when it straddles a page boundary.

use crate::display::{Display, PixelCoord};
use crate::error::Error;
use crate::font::{self, GlyphTable, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::interface;

/// Width of a character cell: the glyph plus one column of spacing.
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;

/// Bits of a glyph column byte that belong to the glyph.
const GLYPH_MASK: u8 = 0xFF >> (8 - GLYPH_HEIGHT);

/// Spread the 4 bits of `nibble` over a byte so that bit `k` lands on bits `2k` and `2k + 1`.
fn stretch(nibble: u8) -> u8 {
    (0..4u8)
        .filter(|&k| nibble & (1 << k) != 0)
        .fold(0, |acc, k| acc | (0b11 << (2 * k)))
}

/// Double the low half of a glyph column, e.g. `0b0100_1001` to `0b1100_0011`.
pub fn double_low(bits: u8) -> u8 {
    stretch(bits & 0x0F)
}

/// Double the high half of a glyph column, e.g. `0b0100_1001` to `0b0011_0000`.
pub fn double_high(bits: u8) -> u8 {
    stretch(bits >> 4)
}

impl<DI, const COLS: usize, const PAGES: usize> Display<DI, COLS, PAGES>
where
    DI: interface::RegisterInterface,
{
    /// Number of character cells across the display.
    pub const TEXT_COLS: usize = COLS / CELL_WIDTH;

    /// Put character `c` into the cell at (`col`, `row`). Columns range up to
    /// `TEXT_COLS - 1`, rows up to `PAGES - 1`. The glyph's columns replace what was there; the
    /// spacing column is left alone.
    pub fn putc(
        &mut self,
        col: usize,
        row: usize,
        c: char,
        font: &GlyphTable,
    ) -> Result<(), Error> {
        if col >= Self::TEXT_COLS {
            return Err(Error::OutOfRange("col"));
        }
        if row >= PAGES {
            return Err(Error::OutOfRange("row"));
        }
        let glyph = font::glyph(font, c)?;
        let x = col * CELL_WIDTH;
        for (i, &bits) in glyph.iter().enumerate() {
            self.frame.put_byte(row, x + i, bits);
        }
        Ok(())
    }

    /// Put `text` into consecutive cells starting at (`col`, `row`). Nothing is drawn unless the
    /// whole string fits and every character has a glyph.
    pub fn puts(
        &mut self,
        col: usize,
        row: usize,
        text: &str,
        font: &GlyphTable,
    ) -> Result<(), Error> {
        Self::check_run(col, row, text, font, 1)?;
        for (i, c) in text.chars().enumerate() {
            self.putc(col + i, row, c, font)?;
        }
        Ok(())
    }

    /// Put character `c` at double size, with its top left corner in the cell at (`col`, `row`).
    /// It covers that cell and the ones to the right, below, and diagonally below right, so `col`
    /// must leave one cell to spare on the right and `row` one page at the bottom.
    pub fn putc2(
        &mut self,
        col: usize,
        row: usize,
        c: char,
        font: &GlyphTable,
    ) -> Result<(), Error> {
        if col >= Self::TEXT_COLS.saturating_sub(1) {
            return Err(Error::OutOfRange("col"));
        }
        if row >= PAGES.saturating_sub(1) {
            return Err(Error::OutOfRange("row"));
        }
        let glyph = font::glyph(font, c)?;
        let x = col * CELL_WIDTH;
        for (i, &bits) in glyph.iter().enumerate() {
            let (lo, hi) = (double_low(bits), double_high(bits));
            for dx in 0..2 {
                self.frame.put_byte(row, x + 2 * i + dx, lo);
                self.frame.put_byte(row + 1, x + 2 * i + dx, hi);
            }
        }
        Ok(())
    }

    /// Put `text` at double size, each character two cells on from the last.
    pub fn puts2(
        &mut self,
        col: usize,
        row: usize,
        text: &str,
        font: &GlyphTable,
    ) -> Result<(), Error> {
        Self::check_run(col, row, text, font, 2)?;
        for (i, c) in text.chars().enumerate() {
            self.putc2(col + 2 * i, row, c, font)?;
        }
        Ok(())
    }

    /// Put character `c` with its top left pixel at `at`. `at` may be any position that keeps
    /// the 5x7 glyph on the display. Pixels around the glyph are preserved, including those
    /// sharing a display RAM byte with it.
    pub fn putc_at(&mut self, at: PixelCoord, c: char, font: &GlyphTable) -> Result<(), Error> {
        if at.0 < 0 || at.0 as usize + GLYPH_WIDTH > COLS {
            return Err(Error::OutOfRange("x"));
        }
        if at.1 < 0 || at.1 as usize + GLYPH_HEIGHT > Self::ROWS {
            return Err(Error::OutOfRange("y"));
        }
        let glyph = font::glyph(font, c)?;
        let (x, y) = (at.0 as usize, at.1 as usize);
        let page = y / 8;
        let shift = y % 8;
        for (i, &bits) in glyph.iter().enumerate() {
            let bits = bits & GLYPH_MASK;
            self.frame
                .put_masked(page, x + i, GLYPH_MASK << shift, bits << shift);
            // The rows that spill past the bottom of `page`.
            if shift != 0 && page + 1 < PAGES {
                self.frame.put_masked(
                    page + 1,
                    x + i,
                    GLYPH_MASK >> (8 - shift),
                    bits >> (8 - shift),
                );
            }
        }
        Ok(())
    }

    /// Check that `text`, advancing `span` cells per character from (`col`, `row`), stays within
    /// the cells `putc` (span 1) or `putc2` (span 2) accept, and that every character has a glyph.
    fn check_run(
        col: usize,
        row: usize,
        text: &str,
        font: &GlyphTable,
        span: usize,
    ) -> Result<(), Error> {
        let len = text.chars().count();
        if len == 0 {
            return Ok(());
        }
        let end = (len - 1)
            .checked_mul(span)
            .and_then(|n| n.checked_add(col))
            .and_then(|n| n.checked_add(span));
        if end.map_or(true, |end| end > Self::TEXT_COLS) {
            return Err(Error::OutOfRange("col"));
        }
        if row.checked_add(span).map_or(true, |end| end > PAGES) {
            return Err(Error::OutOfRange("row"));
        }
        text.chars().try_for_each(|c| font::glyph(font, c).map(|_| ()))
    }
}
