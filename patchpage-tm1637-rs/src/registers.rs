//! TM1637 command bytes.
//!
//! Every transfer starts with one command byte. The top two bits select
//! the command group; the rest are flags or an argument:
//!
//! ```text
//! 0b01xx_xxxx  data command     (write mode, address mode)
//! 0b10xx_xxxx  display control  (on/off, brightness 0–7)
//! 0b11xx_xxxx  address command  (first grid register, 0–5)
//! ```

// ---------------------------------------------------------------------------
// Data command
// ---------------------------------------------------------------------------

/// Write display data, auto-incrementing the address after each byte.
pub const DATA_AUTO_INCREMENT: u8 = 0x40;

// ---------------------------------------------------------------------------
// Address command
// ---------------------------------------------------------------------------

/// Grid register of the leftmost digit.
pub const ADDRESS_BASE: u8 = 0xC0;

// ---------------------------------------------------------------------------
// Display control
// ---------------------------------------------------------------------------

/// Display control group.
pub const DISPLAY_CONTROL: u8 = 0x80;

/// Display-on flag, OR'd with [`DISPLAY_CONTROL`] and the brightness.
pub const DISPLAY_ON: u8 = 0x08;

/// Highest brightness level (pulse width 14/16).
pub const MAX_BRIGHTNESS: u8 = 7;

/// Brightness applied by [`Tm1637::new()`](crate::Tm1637::new).
pub const DEFAULT_BRIGHTNESS: u8 = 3;

// ---------------------------------------------------------------------------
// Geometry and timing
// ---------------------------------------------------------------------------

/// Digits on the common 4-digit module.
pub const DIGITS: usize = 4;

/// Half-period of the bit clock in microseconds. The chip tolerates up to
/// ~250 kHz; long module leads are happier well below that.
pub const BIT_DELAY_US: u32 = 50;
