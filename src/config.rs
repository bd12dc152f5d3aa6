//! Defines the configuration sent to the SSD1306 once at init time, and the retry budget the
//! display uses for every bus transaction afterwards.

use crate::command::*;
use crate::error::Error;
use crate::interface;

/// A configuration for the display. `Config::default()` is the stock setup for the common
/// 128x64 I2C modules, mounted upside down relative to the controller's reset orientation.
/// Builder methods override individual settings.
#[derive(Clone, Debug)]
pub struct Config {
    flip_horizontal: bool,
    flip_vertical: bool,
    charge_pump: bool,
    com_pin_layout: ComPinLayout,
    com_lr_remap: bool,
    precharge_period: (u8, u8),
    contrast_cmd: Option<Command>,
    pub(crate) max_tries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            flip_horizontal: true,
            flip_vertical: true,
            charge_pump: true,
            com_pin_layout: ComPinLayout::Alternative,
            com_lr_remap: false,
            precharge_period: (2, 2),
            contrast_cmd: None,
            max_tries: 1,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the image left to right. See `Command::SegmentRemap`.
    pub fn flip_horizontal(self, flip: bool) -> Self {
        Self {
            flip_horizontal: flip,
            ..self
        }
    }

    /// Mirror the image top to bottom. See `Command::ComScanDirection`.
    pub fn flip_vertical(self, flip: bool) -> Self {
        Self {
            flip_vertical: flip,
            ..self
        }
    }

    /// See `Command::ChargePump`.
    pub fn charge_pump(self, enabled: bool) -> Self {
        Self {
            charge_pump: enabled,
            ..self
        }
    }

    /// See `Command::ComPinConfig`.
    pub fn com_pin_layout(self, layout: ComPinLayout, lr_remap: bool) -> Self {
        Self {
            com_pin_layout: layout,
            com_lr_remap: lr_remap,
            ..self
        }
    }

    /// See `Command::PrechargePeriod`.
    pub fn precharge_period(self, phase_1: u8, phase_2: u8) -> Self {
        Self {
            precharge_period: (phase_1, phase_2),
            ..self
        }
    }

    /// Extend this `Config` to explicitly set the contrast at init. Without it the chip's reset
    /// value is kept.
    pub fn contrast(self, contrast: u8) -> Self {
        Self {
            contrast_cmd: Some(Command::Contrast(contrast)),
            ..self
        }
    }

    /// Number of attempts each bus transaction gets before the display reports `Error::Bus`.
    /// `interface::RETRY_FOREVER` never gives up.
    pub fn max_tries(self, max_tries: u32) -> Self {
        Self { max_tries, ..self }
    }

    /// Reject settings the controller cannot take, before anything is sent.
    pub(crate) fn check(&self) -> Result<(), Error> {
        let (phase_1, phase_2) = self.precharge_period;
        if !(1..=15).contains(&phase_1) || !(1..=15).contains(&phase_2) {
            return Err(Error::OutOfRange("precharge period"));
        }
        Ok(())
    }

    /// Transmit commands to the display at `iface` necessary to put a display with `rows` pixel
    /// rows into the configuration encoded in `self`.
    pub(crate) fn send<DI>(&self, iface: &mut DI, rows: u8) -> Result<(), Error>
    where
        DI: interface::RegisterInterface,
    {
        self.check()?;
        let tries = self.max_tries;
        Command::MuxRatio(rows).send(iface, tries)?;
        Command::ChargePump(self.charge_pump).send(iface, tries)?;
        let scan = if self.flip_vertical {
            ComScanDirection::RowZeroLast
        } else {
            ComScanDirection::RowZeroFirst
        };
        Command::ComScanDirection(scan).send(iface, tries)?;
        Command::SegmentRemap(self.flip_horizontal).send(iface, tries)?;
        Command::ComPinConfig(self.com_pin_layout, self.com_lr_remap).send(iface, tries)?;
        let (phase_1, phase_2) = self.precharge_period;
        Command::PrechargePeriod(phase_1, phase_2).send(iface, tries)?;
        self.contrast_cmd.map_or(Ok(()), |c| c.send(iface, tries))
    }
}
