//! The error type shared by the bus transport and the display engine.

use core::fmt;

/// Everything that can go wrong while talking to, or drawing for, the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The bus device could not be opened.
    BusOpen,
    /// The requested transport payload capacity is zero or larger than
    /// `interface::i2c::MAX_PAYLOAD_LIMIT`.
    InvalidCapacity,
    /// A write payload does not fit the transport's scratch buffer. No I/O was attempted.
    PayloadTooLarge { len: usize, max: usize },
    /// The bus transaction failed on every allowed attempt.
    Bus,
    /// A coordinate, dimension or command argument is out of range. The operation had no
    /// effect.
    OutOfRange(&'static str),
    /// The glyph table has no entry for this character.
    NoGlyph(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::BusOpen => write!(f, "could not open bus device"),
            Error::InvalidCapacity => write!(f, "invalid transport payload capacity"),
            Error::PayloadTooLarge { len, max } => {
                write!(f, "payload of {} bytes exceeds limit of {}", len, max)
            }
            Error::Bus => write!(f, "bus transaction failed"),
            Error::OutOfRange(what) => write!(f, "{} out of range", what),
            Error::NoGlyph(c) => write!(f, "no glyph for {:?}", c),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
