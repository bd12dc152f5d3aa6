//! Shadow copy of the controller's display RAM.

/// A `COLS` x `PAGES*8` monochrome image laid out the way the SSD1306 stores it: `PAGES`
/// horizontal bands of `COLS` bytes, each byte a column of 8 pixels with bit 0 on top.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameBuffer<const COLS: usize, const PAGES: usize> {
    pages: [[u8; COLS]; PAGES],
}

impl<const COLS: usize, const PAGES: usize> FrameBuffer<COLS, PAGES> {
    pub const ROWS: usize = PAGES * 8;

    pub fn new() -> Self {
        FrameBuffer {
            pages: [[0; COLS]; PAGES],
        }
    }

    pub fn clear(&mut self) {
        self.pages = [[0; COLS]; PAGES];
    }

    /// State of the pixel at column `x`, row `y`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let byte = *self.pages.get(y / 8)?.get(x)?;
        Some(byte & (1u8 << (y % 8)) != 0)
    }

    /// The bytes of page `page`, in column order, as they are sent to display RAM.
    pub fn page(&self, page: usize) -> Option<&[u8; COLS]> {
        self.pages.get(page)
    }

    pub fn pages(&self) -> &[[u8; COLS]; PAGES] {
        &self.pages
    }

    /// Light or clear one pixel. Callers have range-checked `x` and `y`.
    pub(crate) fn put_pixel(&mut self, x: usize, y: usize, on: bool) {
        let bit = 1u8 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Overwrite the byte at `page`, `x`. Callers have range-checked both.
    pub(crate) fn put_byte(&mut self, page: usize, x: usize, value: u8) {
        self.pages[page][x] = value;
    }

    /// Replace the bits selected by `mask` in the byte at `page`, `x` with those of `bits`.
    pub(crate) fn put_masked(&mut self, page: usize, x: usize, mask: u8, bits: u8) {
        let byte = &mut self.pages[page][x];
        *byte = (*byte & !mask) | (bits & mask);
    }
}

impl<const COLS: usize, const PAGES: usize> Default for FrameBuffer<COLS, PAGES> {
    fn default() -> Self {
        Self::new()
    }
}
