//! The controller state machine.
//!
//! ```text
//!                 page ±              tick                 page ±
//!   ┌──────┐ ───────────▶ PageChanging ───▶ PageChangeSettling ◀──┐
//!   │ Idle │                                   │  hold-off    └────┘
//!   └──────┘ ◀── readout timeout ──┐           ▼  expired
//!     │  ▲ patch ──▶ SendingProgramChange ──▶ ProgramDisplayed
//!     │  │                                       │ any press
//!     │  └── config release ── ChannelConfig ◀───┘ (config)
//!     └──────── config press ───────▲
//! ```
//!
//! Transitions are pure: [`Controller::handle()`] mutates the controller
//! and returns a [`Commands`] list (arm/cancel timer, send, persist,
//! render, reject) that the [`Engine`](crate::engine::Engine) executes.

mod command;
mod config;
mod machine;
mod state;

pub use command::{Command, Commands, Input, MAX_COMMANDS};
pub use config::{ConfigError, ControllerConfig};
pub use machine::Controller;
pub use state::ControllerState;
