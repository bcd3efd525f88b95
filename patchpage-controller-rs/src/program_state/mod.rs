//! Program selection model: page × patch → MIDI program, plus channel.
//!
//! This module provides [`ProgramState`], the small piece of state the
//! controller mutates in response to button presses, and the persistence
//! plumbing that carries it across resets.
//!
//! # Mapping
//!
//! The patch buttons select a slot within the current page. The page
//! multiplies the patch count to span the full MIDI program range:
//!
//! ```text
//! patch_count = 3
//!
//! page 0:  [  0] [  1] [  2]
//! page 1:  [  3] [  4] [  5]
//! ...
//! page 42: [126] [127] [127]   ← derived program clamps to 127
//! ```
//!
//! `program` is a cached projection of `page` and `patch`. It is
//! recomputed on every accepted change and never written independently.
//!
//! # Persistence
//!
//! Only `{program, page, patch}` are persisted, as one [`ProgramRecord`].
//! The channel is deliberately local: it resets to 0 on every boot.
//! Restoring is best-effort; a missing or corrupt record yields the
//! all-zero defaults rather than an error.

mod error;
mod record;
mod state;
mod store;

pub use error::{ProgramError, RecordError};
pub use record::{ProgramRecord, RECORD_LEN};
pub use state::ProgramState;
pub use store::{MemoryStore, ProgramStore};

/// Number of addressable MIDI programs.
pub const PROGRAM_COUNT: u16 = 128;

/// Highest MIDI program number.
pub const MAX_PROGRAM: u8 = 127;

/// Highest MIDI channel (0-based; displayed as 16).
pub const MAX_CHANNEL: u8 = 15;

/// Upper bound on physical patch buttons supported by the firmware.
pub const MAX_PATCHES: usize = 8;

/// Highest valid page index for a given patch count.
///
/// Every page up to and including this one maps at least its first patch
/// to a distinct program.
///
/// # Examples
///
/// ```
/// use patchpage::program_state::max_page;
///
/// assert_eq!(max_page(3), 42);
/// assert_eq!(max_page(4), 31);
/// assert_eq!(max_page(1), 127);
/// ```
pub const fn max_page(patch_count: u8) -> u8 {
    let pc = if patch_count == 0 { 1 } else { patch_count as u16 };
    ((PROGRAM_COUNT + pc - 1) / pc - 1) as u8
}

/// Derive the MIDI program for a page/patch pair, clamped to `0..=127`.
pub const fn derive_program(page: u8, patch: u8, patch_count: u8) -> u8 {
    let raw = page as u16 * patch_count as u16 + patch as u16;
    if raw > MAX_PROGRAM as u16 {
        MAX_PROGRAM
    } else {
        raw as u8
    }
}
