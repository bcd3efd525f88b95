//! Panel output for the patchpage controller.
//!
//! This crate provides [`PanelDriver`], the [`Panel`] implementation that
//! turns controller [`Feedback`] frames into writes on a numeric display
//! (any [`TextDisplay`]), a row of PWM-dimmed patch LEDs and a status LED.
//!
//! Frames arrive at the tick rate but rarely change. The driver diffs each
//! frame against the last one it wrote ([`PanelChanges`]) and only touches
//! the outputs that differ.
//!
//! # Quick Start
//!
//! ```ignore
//! use patchpage_panel_rs::{PanelConfig, PanelDriver, PatchLeds};
//! use tm1637_driver::Tm1637;
//!
//! let mut digits = Tm1637::new(clk, dio, Delay);
//! digits.init()?;
//!
//! let panel = PanelDriver::new(
//!     digits,
//!     PatchLeds::new([pwm_a, pwm_b, pwm_c]),
//!     status_pin,
//!     PanelConfig::default(),
//! );
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`](https://docs.rs/defmt).
//!
//! [`Panel`]: patchpage::hardware::Panel
//! [`TextDisplay`]: patchpage::hardware::TextDisplay
//! [`Feedback`]: patchpage::feedback::Feedback

#![no_std]

pub mod driver;
pub mod error;
pub mod layout;
pub mod leds;

// ── Re-exports for convenience ───────────────────────────────────────

pub use driver::PanelDriver;
pub use error::PanelError;
pub use layout::{PanelChanges, PanelConfig, PanelState};
pub use leds::{PatchLeds, StatusLed};
