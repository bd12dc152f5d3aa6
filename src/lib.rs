//! Driver library for the Solomon Systech SSD1306 dot matrix OLED display controller, connected
//! over I2C.
//!
//! Drawing happens in a shadow copy of the display RAM held by `Display`; nothing reaches the
//! bus until `Display::flush` pushes the whole frame.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;


pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod interface;

// Re-exports for primary API.
pub use crate::command::{consts, ComPinLayout, ComScanDirection};
pub use crate::config::Config;
pub use crate::display::{Display, Display128x32, Display128x64, PixelCoord, PowerState};
pub use crate::error::Error;
pub use crate::font::{Glyph, GlyphTable};
pub use crate::interface::i2c::I2cInterface;
pub use crate::interface::{RegisterInterface, RETRY_FOREVER};
