//! Core of a MIDI program-change foot controller.
//!
//! A row of patch buttons selects a program within the current page;
//! page buttons step through pages of `patch_count` programs each. The
//! selected program goes out as a MIDI Program Change and is saved so it
//! survives a power cycle. Holding the config button turns the page
//! buttons into channel −/+.
//!
//! Everything in this crate is `no_std`, allocation-free and independent
//! of any HAL or executor. Hardware is reached through the traits in
//! [`hardware`], and time is a millisecond counter supplied by the caller.
//!
//! # Layers
//!
//! ```text
//!   pins ──edges──▶ debounce ──Pressed/Released──▶ controller ──Commands──┐
//!                      ▲                               ▲                  │
//!                      └──── timers (settle, hold-off, blink, readout) ◀──┤
//!                                                                         ▼
//!                                   engine ─▶ midi / panel / program store
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use patchpage::controller::ControllerConfig;
//! use patchpage::engine::Engine;
//! use patchpage::hardware::HardwareHandle;
//! use patchpage::midi::MidiTransport;
//!
//! let hw = HardwareHandle::new(buttons, panel, MidiTransport::new(uart), flash_store);
//! let mut engine = Engine::new(ControllerConfig::default(), hw)?;
//!
//! // From the firmware loop:
//! engine.on_raw_edge(button, edge, now_ms);
//! engine.poll(now_ms);
//! engine.tick(now_ms);
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`](https://docs.rs/defmt).

#![no_std]

pub mod controller;
pub mod debounce;
pub mod engine;
pub mod feedback;
pub mod hardware;
pub mod input;
pub mod midi;
pub mod program_state;
pub mod timers;

// ── Re-exports for convenience ───────────────────────────────────────

pub use controller::{Controller, ControllerConfig, ControllerState};
pub use engine::Engine;
pub use feedback::Feedback;
pub use input::{ActiveLevel, Button, Edge};
pub use program_state::ProgramState;
