use super::error::RecordError;

/// Size in bytes of an encoded [`ProgramRecord`].
pub const RECORD_LEN: usize = 8;

const MAGIC: [u8; 2] = [0x50, 0x43];
const VERSION: u8 = 1;
const CHECKSUM_SEED: u8 = 0xA5;

/// The persisted subset of [`ProgramState`](super::ProgramState).
///
/// Written as a single fixed-size block so a save is all-or-nothing from
/// the reader's point of view: a torn write fails the checksum and is
/// ignored.
///
/// ```text
/// byte:  0     1     2        3        4     5      6     7
///       [0x50][0x43][version][program][page][patch][0x00][checksum]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramRecord {
    pub program: u8,
    pub page: u8,
    pub patch: u8,
}

impl ProgramRecord {
    /// Encode into the on-storage byte layout.
    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut buf = [
            MAGIC[0],
            MAGIC[1],
            VERSION,
            self.program,
            self.page,
            self.patch,
            0x00,
            0x00,
        ];
        buf[RECORD_LEN - 1] = checksum(&buf[..RECORD_LEN - 1]);
        buf
    }

    /// Decode from storage bytes.
    ///
    /// Only the framing is checked here (length, magic, version,
    /// checksum). Range checks against a patch count happen in
    /// [`ProgramState::from_record()`](super::ProgramState::from_record).
    ///
    /// # Examples
    ///
    /// ```
    /// use patchpage::program_state::{ProgramRecord, RecordError};
    ///
    /// let record = ProgramRecord { program: 11, page: 3, patch: 2 };
    /// assert_eq!(ProgramRecord::from_bytes(&record.to_bytes()), Ok(record));
    ///
    /// assert_eq!(ProgramRecord::from_bytes(&[0xFF; 8]), Err(RecordError::Erased));
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < RECORD_LEN {
            return Err(RecordError::Truncated);
        }
        let bytes = &bytes[..RECORD_LEN];

        if bytes.iter().all(|&b| b == 0xFF) {
            return Err(RecordError::Erased);
        }
        if bytes[0..2] != MAGIC {
            return Err(RecordError::BadMagic);
        }
        if bytes[2] != VERSION {
            return Err(RecordError::BadVersion);
        }
        if checksum(&bytes[..RECORD_LEN - 1]) != bytes[RECORD_LEN - 1] {
            return Err(RecordError::BadChecksum);
        }

        Ok(Self {
            program: bytes[3],
            page: bytes[4],
            patch: bytes[5],
        })
    }
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(CHECKSUM_SEED, |acc, &b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_starts_with_magic_and_version() {
        let bytes = ProgramRecord { program: 5, page: 1, patch: 2 }.to_bytes();
        assert_eq!(&bytes[..3], &[0x50, 0x43, 1]);
        assert_eq!(&bytes[3..6], &[5, 1, 2]);
    }

    #[test]
    fn flipped_field_fails_checksum() {
        let mut bytes = ProgramRecord { program: 5, page: 1, patch: 2 }.to_bytes();
        bytes[4] ^= 0x01;
        assert_eq!(ProgramRecord::from_bytes(&bytes), Err(RecordError::BadChecksum));
    }

    #[test]
    fn short_buffer_is_truncated() {
        assert_eq!(ProgramRecord::from_bytes(&[0x50, 0x43, 1]), Err(RecordError::Truncated));
    }

    #[test]
    fn foreign_data_is_bad_magic() {
        assert_eq!(ProgramRecord::from_bytes(&[0u8; 8]), Err(RecordError::BadMagic));
    }

    #[test]
    fn other_version_rejected() {
        let mut bytes = ProgramRecord::default().to_bytes();
        bytes[2] = 2;
        bytes[7] = checksum(&bytes[..7]);
        assert_eq!(ProgramRecord::from_bytes(&bytes), Err(RecordError::BadVersion));
    }

    #[test]
    fn trailing_bytes_ignored() {
        let record = ProgramRecord { program: 127, page: 42, patch: 2 };
        let mut page = [0xFFu8; 16];
        page[..RECORD_LEN].copy_from_slice(&record.to_bytes());
        assert_eq!(ProgramRecord::from_bytes(&page), Ok(record));
    }
}
