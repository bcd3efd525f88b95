//! Error types for the TM1637 driver.

use core::fmt;

/// Errors that can occur when driving the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tm1637Error<E> {
    /// Underlying GPIO error.
    Pin(E),

    /// The chip did not pull DIO low on the ninth clock.
    Ack,

    /// Brightness out of range (must be 0–7).
    InvalidBrightness,
}

// Allow `?` propagation from raw pin errors.
impl<E> From<E> for Tm1637Error<E> {
    fn from(error: E) -> Self {
        Tm1637Error::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Tm1637Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tm1637Error::Pin(e) => write!(f, "GPIO error: {:?}", e),
            Tm1637Error::Ack => write!(f, "No acknowledge from TM1637"),
            Tm1637Error::InvalidBrightness => write!(f, "Invalid brightness (must be 0-7)"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Tm1637Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Tm1637Error::Pin(_) => defmt::write!(f, "GPIO error"),
            Tm1637Error::Ack => defmt::write!(f, "No acknowledge"),
            Tm1637Error::InvalidBrightness => defmt::write!(f, "Invalid brightness"),
        }
    }
}
