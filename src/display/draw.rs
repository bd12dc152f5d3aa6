//! Pixel, line and rectangle drawing into the frame buffer. None of these touch the bus; call
//! `Display::flush` to show the result.
//!
//! Every method range-checks all of its coordinates before drawing anything, so a rejected call
//! leaves the frame buffer untouched.

use crate::display::{Display, PixelCoord};
use crate::error::Error;
use crate::interface;

/// Order two values.
fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl<DI, const COLS: usize, const PAGES: usize> Display<DI, COLS, PAGES>
where
    DI: interface::RegisterInterface,
{
    /// Blank the whole frame buffer.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Light (`on == true`) or clear the pixel at `at`.
    pub fn set(&mut self, at: PixelCoord, on: bool) -> Result<(), Error> {
        let x = Self::column(at.0, "x")?;
        let y = Self::row(at.1, "y")?;
        self.frame.put_pixel(x, y, on);
        Ok(())
    }

    /// Horizontal line from (`x1`, `y`) to (`x2`, `y`), including both ends.
    pub fn hline(&mut self, x1: i16, x2: i16, y: i16) -> Result<(), Error> {
        let x1 = Self::column(x1, "x1")?;
        let x2 = Self::column(x2, "x2")?;
        let y = Self::row(y, "y")?;
        self.hline_unchecked(x1, x2, y);
        Ok(())
    }

    /// Vertical line from (`x`, `y1`) to (`x`, `y2`), including both ends.
    pub fn vline(&mut self, x: i16, y1: i16, y2: i16) -> Result<(), Error> {
        let x = Self::column(x, "x")?;
        let y1 = Self::row(y1, "y1")?;
        let y2 = Self::row(y2, "y2")?;
        self.vline_unchecked(x, y1, y2);
        Ok(())
    }

    /// Outline of the rectangle with opposite corners `a` and `b`. The interior is left alone.
    pub fn rect(&mut self, a: PixelCoord, b: PixelCoord) -> Result<(), Error> {
        let x1 = Self::column(a.0, "x1")?;
        let y1 = Self::row(a.1, "y1")?;
        let x2 = Self::column(b.0, "x2")?;
        let y2 = Self::row(b.1, "y2")?;
        self.hline_unchecked(x1, x2, y1);
        self.hline_unchecked(x1, x2, y2);
        self.vline_unchecked(x1, y1, y2);
        self.vline_unchecked(x2, y1, y2);
        Ok(())
    }

    /// Solid rectangle with opposite corners `a` and `b`, edges included.
    pub fn fill(&mut self, a: PixelCoord, b: PixelCoord) -> Result<(), Error> {
        let (x1, x2) = ordered(Self::column(a.0, "x1")?, Self::column(b.0, "x2")?);
        let (y1, y2) = ordered(Self::row(a.1, "y1")?, Self::row(b.1, "y2")?);
        for (x, y) in iproduct!(x1..=x2, y1..=y2) {
            self.frame.put_pixel(x, y, true);
        }
        Ok(())
    }

    fn hline_unchecked(&mut self, x1: usize, x2: usize, y: usize) {
        let (x1, x2) = ordered(x1, x2);
        for x in x1..=x2 {
            self.frame.put_pixel(x, y, true);
        }
    }

    fn vline_unchecked(&mut self, x: usize, y1: usize, y2: usize) {
        let (y1, y2) = ordered(y1, y2);
        for y in y1..=y2 {
            self.frame.put_pixel(x, y, true);
        }
    }
}
