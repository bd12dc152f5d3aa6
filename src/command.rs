//! The command set for the SSD1306.
//!
//! Note 1: On I2C every transaction starts with a control byte. Bit 6 of the control byte selects
//! whether the bytes that follow are commands (`CONTROL_COMMAND`) or display RAM data
//! (`CONTROL_DATA`). The continuation bit 7 is never used by this driver, so a transaction carries
//! either one command with its arguments, or a run of display data.
//!
//! Note 2: The display RAM is 128 columns by 8 pages. Each page is a horizontal band 8 pixels
//! tall, and each byte written to it covers one column of that band with bit 0 at the top.

use crate::error::Error;
use crate::interface::RegisterInterface;

/// Control byte announcing that the following bytes are commands.
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing that the following bytes go to display RAM.
pub const CONTROL_DATA: u8 = 0x40;

pub mod consts {
    pub const NUM_COLUMNS: u8 = 128;
    pub const NUM_PAGES: u8 = 8;
    pub const NUM_ROWS: u8 = NUM_PAGES * 8;
    pub const COLUMN_MAX: u8 = NUM_COLUMNS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    pub const ROW_MAX: u8 = NUM_ROWS - 1;
}

use self::consts::*;

/// Order in which COM lines scan the display rows. Changing this setting flips the image
/// vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComScanDirection {
    /// COM0 is scanned first, so row address 0 is the top row.
    RowZeroFirst,
    /// COM0 is scanned last, so row address 0 is the bottom row.
    RowZeroLast,
}

/// How the COM pins are wired to the panel rows. This is dictated by the display module; see its
/// datasheet. 128x64 modules are normally `Alternative`, 128x32 modules `Sequential`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComPinLayout {
    Sequential,
    Alternative,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Turn the panel on (`true`) or put it to sleep (`false`). Display RAM is retained while
    /// off.
    DisplayOn(bool),
    /// Select the page that following display data is written to, in page addressing mode.
    /// Range is 0-7. (Note 2)
    PageStart(u8),
    /// Select the column that following display data starts at, in page addressing mode. Range is
    /// 0-127.
    ColumnStart(u8),
    /// Set the MUX ratio, the number of active COM lines and thus display rows. Range 16-64.
    MuxRatio(u8),
    /// Enable or disable the internal charge pump. Modules without an external VCC supply need it
    /// enabled.
    ChargePump(bool),
    /// Map column address 127 to SEG0 instead of column address 0, flipping the image
    /// horizontally.
    SegmentRemap(bool),
    /// Set the COM scan direction. See enum for details.
    ComScanDirection(ComScanDirection),
    /// Set the COM pin hardware layout, and whether the left and right halves of the COM lines
    /// are swapped.
    ComPinConfig(ComPinLayout, bool),
    /// Set the pre-charge phase lengths in DCLKs. Each phase can range from 1-15.
    PrechargePeriod(u8, u8),
    /// Set the contrast. Range 0-255.
    Contrast(u8),
    /// Show display RAM inverted, so that a 0 bit lights the pixel.
    Invert(bool),
    /// Set the display RAM row shown on the first display row. Range 0-63.
    StartLine(u8),
    /// Shift the mapping of COM lines to display rows vertically. Range 0-63.
    DisplayOffset(u8),
}

pub enum BufCommand<'buf> {
    /// Write bytes into display RAM at the current page and column. The column address advances
    /// with each byte.
    WriteDisplayData(&'buf [u8]),
}

macro_rules! ok_command {
    ($buf:ident,[$arg0:expr]) => {{
        $buf[0] = $arg0;
        Ok(&$buf[..1])
    }};
    ($buf:ident,[$arg0:expr, $arg1:expr]) => {{
        $buf[0] = $arg0;
        $buf[1] = $arg1;
        Ok(&$buf[..2])
    }};
}

impl Command {
    /// Encode the command and send it through `iface` as one command transaction, giving each
    /// attempt `max_tries` tries.
    pub fn send<DI>(self, iface: &mut DI, max_tries: u32) -> Result<(), Error>
    where
        DI: RegisterInterface,
    {
        let mut buf = [0u8; 2];
        let bytes: Result<&[u8], Error> = match self {
            Command::DisplayOn(on) => ok_command!(buf, [if on { 0xAF } else { 0xAE }]),
            Command::PageStart(page) => match page {
                0..=PAGE_MAX => ok_command!(buf, [0xB0 | page]),
                _ => Err(Error::OutOfRange("page")),
            },
            Command::ColumnStart(column) => match column {
                0..=COLUMN_MAX => ok_command!(buf, [0x10 | (column >> 4), column & 0x0F]),
                _ => Err(Error::OutOfRange("column")),
            },
            Command::MuxRatio(ratio) => match ratio {
                16..=NUM_ROWS => ok_command!(buf, [0xA8, ratio - 1]),
                _ => Err(Error::OutOfRange("mux ratio")),
            },
            Command::ChargePump(on) => ok_command!(buf, [0x8D, if on { 0x14 } else { 0x10 }]),
            Command::SegmentRemap(remap) => ok_command!(buf, [if remap { 0xA1 } else { 0xA0 }]),
            Command::ComScanDirection(dir) => ok_command!(
                buf,
                [match dir {
                    ComScanDirection::RowZeroFirst => 0xC0,
                    ComScanDirection::RowZeroLast => 0xC8,
                }]
            ),
            Command::ComPinConfig(layout, lr_remap) => {
                let alt = match layout {
                    ComPinLayout::Sequential => 0x00,
                    ComPinLayout::Alternative => 0x10,
                };
                let remap = if lr_remap { 0x20 } else { 0x00 };
                ok_command!(buf, [0xDA, 0x02 | alt | remap])
            }
            Command::PrechargePeriod(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, [0xD9, phase_2 << 4 | phase_1]),
                _ => Err(Error::OutOfRange("precharge period")),
            },
            Command::Contrast(contrast) => ok_command!(buf, [0x81, contrast]),
            Command::Invert(inv) => ok_command!(buf, [if inv { 0xA7 } else { 0xA6 }]),
            Command::StartLine(line) => match line {
                0..=ROW_MAX => ok_command!(buf, [0x40 | line]),
                _ => Err(Error::OutOfRange("start line")),
            },
            Command::DisplayOffset(offset) => match offset {
                0..=ROW_MAX => ok_command!(buf, [0xD3, offset]),
                _ => Err(Error::OutOfRange("display offset")),
            },
        };
        iface.write(CONTROL_COMMAND, bytes?, max_tries)?;
        Ok(())
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI, max_tries: u32) -> Result<(), Error>
    where
        DI: RegisterInterface,
    {
        match self {
            BufCommand::WriteDisplayData(buf) => iface.write(CONTROL_DATA, buf, max_tries)?,
        };
        Ok(())
    }
}
