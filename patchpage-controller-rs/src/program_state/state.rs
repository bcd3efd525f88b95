use super::error::{ProgramError, RecordError};
use super::record::ProgramRecord;
use super::store::ProgramStore;
use super::{derive_program, max_page, MAX_CHANNEL};

/// Current page/patch selection, derived program number and MIDI channel.
///
/// Fields are private so the `program` projection cannot drift from
/// `page`/`patch`. Mutate only through [`set_patch()`](Self::set_patch),
/// [`set_page()`](Self::set_page) and [`set_channel()`](Self::set_channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramState {
    page: u8,
    patch: u8,
    channel: u8,
    program: u8,
    patch_count: u8,
}

impl ProgramState {
    /// All-zero state for a panel with `patch_count` patch buttons.
    pub fn new(patch_count: u8) -> Self {
        debug_assert!(patch_count > 0, "patch_count must be non-zero");
        Self {
            page: 0,
            patch: 0,
            channel: 0,
            program: 0,
            patch_count: patch_count.max(1),
        }
    }

    /// Rebuild state from a persisted record, validating it against
    /// `patch_count`.
    ///
    /// The stored `program` must agree with the one derived from the
    /// stored `page`/`patch`; a mismatch means the record was written
    /// with a different patch count or is damaged.
    pub fn from_record(record: &ProgramRecord, patch_count: u8) -> Result<Self, RecordError> {
        let mut state = Self::new(patch_count);
        if record.page > max_page(state.patch_count) || record.patch >= state.patch_count {
            return Err(RecordError::OutOfRange);
        }
        if derive_program(record.page, record.patch, state.patch_count) != record.program {
            return Err(RecordError::OutOfRange);
        }
        state.page = record.page;
        state.patch = record.patch;
        state.program = record.program;
        Ok(state)
    }

    /// Best-effort restore from `store`.
    ///
    /// Never fails: a missing record, a storage error or a corrupt record
    /// all fall back to [`ProgramState::new()`]. The channel always starts
    /// at 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchpage::program_state::{MemoryStore, ProgramState};
    ///
    /// let mut store = MemoryStore::new();
    /// assert_eq!(ProgramState::load(&mut store, 3), ProgramState::new(3));
    ///
    /// let mut state = ProgramState::new(3);
    /// state.set_page(3).unwrap();
    /// state.set_patch(2);
    /// state.save(&mut store).unwrap();
    ///
    /// let restored = ProgramState::load(&mut store, 3);
    /// assert_eq!(restored.program(), 11);
    /// ```
    pub fn load<S: ProgramStore>(store: &mut S, patch_count: u8) -> Self {
        match store.load() {
            Ok(Some(record)) => match Self::from_record(&record, patch_count) {
                Ok(state) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!(
                        "Restored program {} (page {}, patch {})",
                        state.program,
                        state.page,
                        state.patch
                    );
                    state
                }
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("Stored record rejected ({}), using defaults", _e);
                    Self::new(patch_count)
                }
            },
            Ok(None) => {
                #[cfg(feature = "defmt")]
                defmt::info!("No stored program, using defaults");
                Self::new(patch_count)
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Program store unreadable, using defaults");
                Self::new(patch_count)
            }
        }
    }

    /// Persist `{program, page, patch}` as one record.
    pub fn save<S: ProgramStore>(&self, store: &mut S) -> Result<(), S::Error> {
        store.save(&self.record())
    }

    /// The persisted projection of this state.
    pub fn record(&self) -> ProgramRecord {
        ProgramRecord {
            program: self.program,
            page: self.page,
            patch: self.patch,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> u8 {
        self.page
    }

    pub fn patch(&self) -> u8 {
        self.patch
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn program(&self) -> u8 {
        self.program
    }

    pub fn patch_count(&self) -> u8 {
        self.patch_count
    }

    /// Highest page accepted by [`set_page()`](Self::set_page).
    pub fn max_page(&self) -> u8 {
        max_page(self.patch_count)
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Select a patch within the current page and recompute `program`.
    ///
    /// Unconditional: callers pass the index of a configured patch
    /// button, which is always `< patch_count`.
    pub fn set_patch(&mut self, idx: u8) {
        debug_assert!(idx < self.patch_count, "patch index out of range");
        self.patch = idx;
        self.update_program();
    }

    /// Select a page and recompute `program`.
    ///
    /// Returns [`ProgramError::PageOutOfRange`] without mutating anything
    /// if `n < 0` or `n > max_page()`.
    pub fn set_page(&mut self, n: i32) -> Result<(), ProgramError> {
        let max = self.max_page();
        if n < 0 || n > max as i32 {
            return Err(ProgramError::PageOutOfRange { requested: n, max });
        }
        self.page = n as u8;
        self.update_program();
        Ok(())
    }

    /// Set the (0-based) MIDI channel.
    ///
    /// Returns [`ProgramError::ChannelOutOfRange`] without mutating
    /// anything if `c` is outside `0..=15`.
    pub fn set_channel(&mut self, c: i32) -> Result<(), ProgramError> {
        if c < 0 || c > MAX_CHANNEL as i32 {
            return Err(ProgramError::ChannelOutOfRange { requested: c });
        }
        self.channel = c as u8;
        Ok(())
    }

    fn update_program(&mut self) {
        self.program = derive_program(self.page, self.patch, self.patch_count);
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program_state::{MemoryStore, MAX_PROGRAM};

    fn expected_program(page: u8, patch: u8, patch_count: u8) -> u8 {
        (page as u16 * patch_count as u16 + patch as u16).min(127) as u8
    }

    // ── Defaults ─────────────────────────────────────────────────────

    #[test]
    fn new_is_all_zero() {
        let s = ProgramState::new(3);
        assert_eq!((s.page(), s.patch(), s.channel(), s.program()), (0, 0, 0, 0));
        assert_eq!(s.patch_count(), 3);
    }

    // ── Derivation ───────────────────────────────────────────────────

    #[test]
    fn program_tracks_page_and_patch() {
        let mut s = ProgramState::new(3);
        s.set_patch(2);
        assert_eq!(s.program(), 2);
        s.set_page(3).unwrap();
        assert_eq!(s.program(), 11);
        s.set_patch(0);
        assert_eq!(s.program(), 9);
    }

    #[test]
    fn program_clamps_on_last_page() {
        let mut s = ProgramState::new(3);
        s.set_page(42).unwrap();
        s.set_patch(1);
        assert_eq!(s.program(), MAX_PROGRAM);
        s.set_patch(2);
        assert_eq!(s.program(), MAX_PROGRAM);
        assert_eq!(s.page(), 42);
    }

    #[test]
    fn program_matches_formula_across_sequences() {
        for patch_count in 1..=8u8 {
            let mut s = ProgramState::new(patch_count);
            let max = s.max_page() as i32;
            for step in 0..200i32 {
                let page = (step * 7) % (max + 3) - 1; // includes rejected values
                let _ = s.set_page(page);
                s.set_patch((step as u8) % patch_count);
                assert_eq!(
                    s.program(),
                    expected_program(s.page(), s.patch(), patch_count),
                    "patch_count {} step {}",
                    patch_count,
                    step
                );
            }
        }
    }

    // ── Range checks ─────────────────────────────────────────────────

    #[test]
    fn negative_page_rejected() {
        let mut s = ProgramState::new(3);
        assert_eq!(
            s.set_page(-1),
            Err(ProgramError::PageOutOfRange { requested: -1, max: 42 })
        );
        assert_eq!(s.page(), 0);
        assert_eq!(s.program(), 0);
    }

    #[test]
    fn page_past_max_rejected() {
        let mut s = ProgramState::new(3);
        s.set_page(5).unwrap();
        s.set_patch(1);
        assert!(s.set_page(43).is_err());
        assert_eq!(s.page(), 5);
        assert_eq!(s.program(), 16);
    }

    #[test]
    fn channel_bounds() {
        let mut s = ProgramState::new(3);
        assert!(s.set_channel(15).is_ok());
        assert_eq!(s.channel(), 15);
        assert_eq!(
            s.set_channel(16),
            Err(ProgramError::ChannelOutOfRange { requested: 16 })
        );
        assert_eq!(s.set_channel(-1), Err(ProgramError::ChannelOutOfRange { requested: -1 }));
        assert_eq!(s.channel(), 15);
    }

    #[test]
    fn channel_does_not_touch_program() {
        let mut s = ProgramState::new(3);
        s.set_patch(1);
        s.set_channel(9).unwrap();
        assert_eq!(s.program(), 1);
    }

    // ── Persistence ──────────────────────────────────────────────────

    #[test]
    fn save_then_load_round_trips_selection() {
        let mut store = MemoryStore::new();
        let mut s = ProgramState::new(3);
        s.set_page(7).unwrap();
        s.set_patch(1);
        s.set_channel(4).unwrap();
        s.save(&mut store).unwrap();

        let restored = ProgramState::load(&mut store, 3);
        assert_eq!(restored.page(), 7);
        assert_eq!(restored.patch(), 1);
        assert_eq!(restored.program(), 22);
        // Channel is not persisted.
        assert_eq!(restored.channel(), 0);
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        let mut s = ProgramState::new(3);
        s.set_page(2).unwrap();
        s.save(&mut store).unwrap();
        store.bytes_mut().unwrap()[3] ^= 0x40;

        assert_eq!(ProgramState::load(&mut store, 3), ProgramState::new(3));
    }

    #[test]
    fn record_from_other_patch_count_rejected() {
        // Saved with 4 patches per page: page 2 patch 3 → program 11.
        let record = ProgramRecord { program: 11, page: 2, patch: 3 };
        assert_eq!(ProgramState::from_record(&record, 3), Err(RecordError::OutOfRange));
    }

    #[test]
    fn inconsistent_program_rejected() {
        let record = ProgramRecord { program: 99, page: 1, patch: 1 };
        assert_eq!(ProgramState::from_record(&record, 3), Err(RecordError::OutOfRange));
    }

    #[test]
    fn erased_store_gives_defaults() {
        let mut store = MemoryStore::with_bytes([0xFF; 8]);
        assert_eq!(ProgramState::load(&mut store, 3), ProgramState::new(3));
    }
}
