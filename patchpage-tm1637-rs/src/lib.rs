//! Driver for TM1637 4-digit 7-segment display modules.
//!
//! The TM1637 is driven over two open-drain GPIOs with a start/stop framed,
//! LSB-first protocol. This crate bit-bangs it over `embedded-hal` 1.0
//! pins and a [`DelayNs`](embedded_hal::delay::DelayNs) source.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private) — start/stop conditions, byte clocking
//!   and acknowledge sampling.
//! - **[`Tm1637`]** (public) — brightness control, full-display segment
//!   writes and the [`TextDisplay`](patchpage::hardware::TextDisplay)
//!   implementation.
//! - **[`font`]** — character to segment mapping.
//!
//! # Quick start
//!
//! ```ignore
//! use patchpage::hardware::TextDisplay;
//! use tm1637_driver::Tm1637;
//!
//! let mut display = Tm1637::new(clk, dio, Delay);
//! display.init()?;
//! display.show("P 42")?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   and init logging.

#![no_std]

pub use display::Tm1637;
pub use error::Tm1637Error;
pub use registers::{DEFAULT_BRIGHTNESS, DIGITS, MAX_BRIGHTNESS};

mod display;
mod driver;
mod error;
pub mod font;
mod registers;
