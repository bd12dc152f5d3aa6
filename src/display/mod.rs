//! The main API to the display driver. `Display` owns a shadow copy of the display RAM which the
//! drawing methods in `draw` and `text` modify, and pushes it to the controller on `flush`.

pub mod draw;
pub mod framebuffer;
pub mod text;

use crate::command::consts::*;
use crate::command::{BufCommand, Command};
use crate::config::Config;
use crate::error::Error;
use crate::interface;

pub use self::framebuffer::FrameBuffer;

/// A pixel coordinate pair of `column` and `row`, with (0, 0) at the top left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelCoord(pub i16, pub i16);

/// Whether the panel is lit. Display RAM is kept either way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PowerState {
    Off,
    On,
}

/// A driver for an SSD1306 display that is `COLS` pixels wide and `PAGES` 8-pixel pages tall.
pub struct Display<DI, const COLS: usize = 128, const PAGES: usize = 8>
where
    DI: interface::RegisterInterface,
{
    iface: DI,
    frame: FrameBuffer<COLS, PAGES>,
    power: PowerState,
    max_tries: u32,
}

/// The common 128x64 module.
pub type Display128x64<DI> = Display<DI, 128, 8>;
/// The common 128x32 module. These usually want `ComPinLayout::Sequential`.
pub type Display128x32<DI> = Display<DI, 128, 4>;

impl<DI, const COLS: usize, const PAGES: usize> Display<DI, COLS, PAGES>
where
    DI: interface::RegisterInterface,
{
    /// Number of pixel rows.
    pub const ROWS: usize = PAGES * 8;

    /// Construct a driver for the display connected to `iface`, and bring the controller into
    /// the configuration `config` with the panel off and a blank frame buffer.
    ///
    /// `iface` may be a `&mut` to a transport the caller keeps. Flushing sends a whole page per
    /// transaction, so the transport must accept payloads of `COLS` bytes.
    pub fn new(iface: DI, config: Config) -> Result<Self, Error> {
        if false
            || COLS == 0
            || COLS > NUM_COLUMNS as usize
            || Self::ROWS < 16
            || PAGES > NUM_PAGES as usize
        {
            return Err(Error::OutOfRange("display size"));
        }
        config.check()?;
        debug!("initializing {}x{} display", COLS, Self::ROWS);
        let mut display = Display {
            iface,
            frame: FrameBuffer::new(),
            power: PowerState::Off,
            max_tries: config.max_tries,
        };
        display.off()?;
        config.send(&mut display.iface, Self::ROWS as u8)?;
        Ok(display)
    }

    /// Light the panel.
    pub fn on(&mut self) -> Result<(), Error> {
        debug!("display on");
        Command::DisplayOn(true).send(&mut self.iface, self.max_tries)?;
        self.power = PowerState::On;
        Ok(())
    }

    /// Blank the panel. Display RAM is retained.
    pub fn off(&mut self) -> Result<(), Error> {
        debug!("display off");
        Command::DisplayOn(false).send(&mut self.iface, self.max_tries)?;
        self.power = PowerState::Off;
        Ok(())
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Set the contrast.
    pub fn contrast(&mut self, contrast: u8) -> Result<(), Error> {
        Command::Contrast(contrast).send(&mut self.iface, self.max_tries)
    }

    /// Show the image with lit and dark pixels swapped.
    pub fn invert(&mut self, inverted: bool) -> Result<(), Error> {
        Command::Invert(inverted).send(&mut self.iface, self.max_tries)
    }

    /// Push the whole frame buffer to display RAM, one page per data transaction.
    pub fn flush(&mut self) -> Result<(), Error> {
        let tries = self.max_tries;
        for (page, data) in self.frame.pages().iter().enumerate() {
            trace!("flushing page {}", page);
            Command::PageStart(page as u8).send(&mut self.iface, tries)?;
            Command::ColumnStart(0).send(&mut self.iface, tries)?;
            BufCommand::WriteDisplayData(data).send(&mut self.iface, tries)?;
        }
        Ok(())
    }

    /// The frame buffer as it will be sent by the next `flush`.
    pub fn buffer(&self) -> &FrameBuffer<COLS, PAGES> {
        &self.frame
    }

    /// State of the pixel at `at` in the frame buffer, or `None` outside the display.
    pub fn pixel(&self, at: PixelCoord) -> Option<bool> {
        if at.0 < 0 || at.1 < 0 {
            return None;
        }
        self.frame.pixel(at.0 as usize, at.1 as usize)
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Range-check a pixel column.
    fn column(x: i16, what: &'static str) -> Result<usize, Error> {
        match x {
            _ if x < 0 || x as usize >= COLS => Err(Error::OutOfRange(what)),
            _ => Ok(x as usize),
        }
    }

    /// Range-check a pixel row.
    fn row(y: i16, what: &'static str) -> Result<usize, Error> {
        match y {
            _ if y < 0 || y as usize >= Self::ROWS => Err(Error::OutOfRange(what)),
            _ => Ok(y as usize),
        }
    }
}
