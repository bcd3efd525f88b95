use super::error::RecordError;
use super::record::{ProgramRecord, RECORD_LEN};

/// Key-value persistence for the single [`ProgramRecord`].
///
/// Implemented by the firmware on top of on-chip flash, and by
/// [`MemoryStore`] for host-side tests and simulation.
pub trait ProgramStore {
    type Error;

    /// Read the stored record.
    ///
    /// `Ok(None)` means nothing has been saved yet. Errors (including
    /// corrupt data) are downgraded to defaults by
    /// [`ProgramState::load()`](super::ProgramState::load).
    fn load(&mut self) -> Result<Option<ProgramRecord>, Self::Error>;

    /// Replace the stored record.
    fn save(&mut self, record: &ProgramRecord) -> Result<(), Self::Error>;
}

/// RAM-backed [`ProgramStore`] holding the encoded record bytes.
///
/// Keeps the raw bytes rather than the decoded record so tests can
/// simulate corruption and torn writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<[u8; RECORD_LEN]>,
    save_count: u32,
}

impl MemoryStore {
    /// An empty store, as after a fresh flash erase.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with raw bytes.
    pub fn with_bytes(bytes: [u8; RECORD_LEN]) -> Self {
        Self {
            bytes: Some(bytes),
            save_count: 0,
        }
    }

    /// Raw stored bytes, if anything was written.
    pub fn bytes(&self) -> Option<&[u8; RECORD_LEN]> {
        self.bytes.as_ref()
    }

    /// Mutable access to the stored bytes, for corrupting them in tests.
    pub fn bytes_mut(&mut self) -> Option<&mut [u8; RECORD_LEN]> {
        self.bytes.as_mut()
    }

    /// Number of successful [`save()`](ProgramStore::save) calls.
    pub fn save_count(&self) -> u32 {
        self.save_count
    }
}

impl ProgramStore for MemoryStore {
    type Error = RecordError;

    fn load(&mut self) -> Result<Option<ProgramRecord>, RecordError> {
        match &self.bytes {
            Some(bytes) => ProgramRecord::from_bytes(bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, record: &ProgramRecord) -> Result<(), RecordError> {
        self.bytes = Some(record.to_bytes());
        self.save_count += 1;
        Ok(())
    }
}

impl<S: ProgramStore> ProgramStore for &mut S {
    type Error = S::Error;

    fn load(&mut self) -> Result<Option<ProgramRecord>, S::Error> {
        (**self).load()
    }

    fn save(&mut self, record: &ProgramRecord) -> Result<(), S::Error> {
        (**self).save(record)
    }
}
