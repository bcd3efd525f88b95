use core::fmt;

/// Range violations reported by [`ProgramState`](super::ProgramState).
///
/// A rejected request never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramError {
    /// Requested page is negative or above the last page.
    PageOutOfRange { requested: i32, max: u8 },
    /// Requested channel is outside `0..=15`.
    ChannelOutOfRange { requested: i32 },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProgramError::PageOutOfRange { requested, max } => {
                write!(f, "page {} out of range (0-{})", requested, max)
            }
            ProgramError::ChannelOutOfRange { requested } => {
                write!(f, "channel {} out of range (0-15)", requested)
            }
        }
    }
}

/// Reasons a persisted [`ProgramRecord`](super::ProgramRecord) is unusable.
///
/// All of these are treated as "no saved state" by
/// [`ProgramState::load()`](super::ProgramState::load).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Fewer bytes than a full record.
    Truncated,
    /// Storage is blank (all `0xFF`), nothing was ever saved.
    Erased,
    /// Magic bytes do not match.
    BadMagic,
    /// Record was written by an incompatible format version.
    BadVersion,
    /// Checksum mismatch.
    BadChecksum,
    /// Fields decode but violate the page/patch/program invariants.
    OutOfRange,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            RecordError::Truncated => "record truncated",
            RecordError::Erased => "no record stored",
            RecordError::BadMagic => "bad record magic",
            RecordError::BadVersion => "unsupported record version",
            RecordError::BadChecksum => "record checksum mismatch",
            RecordError::OutOfRange => "record fields out of range",
        };
        f.write_str(msg)
    }
}
