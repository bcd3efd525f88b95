//! Pico 2 implementations of the controller's hardware seams.
//!
//! - [`SharedLevels`] — button levels published by the edge tasks.
//! - [`UartMidi`] — blocking UART0 transmitter at 31250 baud.
//! - [`FlashStore`] — program record in the last 4 KB flash sector.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::*;
use embassy_rp::flash::{self, Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::uart::{self, UartTx};

use patchpage::hardware::ButtonLevels;
use patchpage::input::{Button, BUTTON_COUNT};
use patchpage::midi::MidiPort;
use patchpage::program_state::{ProgramRecord, ProgramStore, RecordError, RECORD_LEN};

// ---------------------------------------------------------------------------
// Button levels
// ---------------------------------------------------------------------------

/// Last sampled level of every button pin, written by the edge tasks and
/// read when a debounce window closes. Idle is high (pull-ups).
pub static LEVELS: [AtomicBool; BUTTON_COUNT] = [const { AtomicBool::new(true) }; BUTTON_COUNT];

/// [`ButtonLevels`] view of [`LEVELS`].
pub struct SharedLevels;

impl SharedLevels {
    pub fn publish(button: Button, high: bool) {
        LEVELS[button.index()].store(high, Ordering::Relaxed);
    }
}

impl ButtonLevels for SharedLevels {
    fn is_high(&mut self, button: Button) -> bool {
        LEVELS[button.index()].load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// MIDI out
// ---------------------------------------------------------------------------

/// MIDI DIN output on a blocking UART transmitter.
///
/// Two bytes at 31250 baud take 640 µs; blocking keeps send order equal to
/// press order without a queue.
pub struct UartMidi {
    tx: UartTx<'static, uart::Blocking>,
}

impl UartMidi {
    pub fn new(tx: UartTx<'static, uart::Blocking>) -> Self {
        Self { tx }
    }
}

impl MidiPort for UartMidi {
    type Error = uart::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), uart::Error> {
        self.tx.blocking_write(bytes)
    }

    fn flush(&mut self) -> Result<(), uart::Error> {
        self.tx.blocking_flush()
    }
}

// ---------------------------------------------------------------------------
// Program record store
// ---------------------------------------------------------------------------

/// Total QSPI flash on the Pico 2.
pub const FLASH_SIZE: usize = 4 * 1024 * 1024;

/// Offset of the record sector (the last erase block). Excluded from the
/// image by `memory.x`.
pub const STORE_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Smallest programmable unit.
const PAGE_SIZE: usize = 256;

#[derive(Debug, Format)]
pub enum StoreError {
    Flash(flash::Error),
    Record(RecordError),
}

/// Persists one [`ProgramRecord`] at [`STORE_OFFSET`].
///
/// Every save erases the sector and programs a single page: the record,
/// padded with `0xFF`.
pub struct FlashStore {
    flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>,
}

impl FlashStore {
    pub fn new(flash: Flash<'static, FLASH, Blocking, FLASH_SIZE>) -> Self {
        Self { flash }
    }
}

impl ProgramStore for FlashStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<ProgramRecord>, StoreError> {
        let mut bytes = [0u8; RECORD_LEN];
        self.flash
            .blocking_read(STORE_OFFSET, &mut bytes)
            .map_err(StoreError::Flash)?;

        match ProgramRecord::from_bytes(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(RecordError::Erased) => Ok(None),
            Err(e) => Err(StoreError::Record(e)),
        }
    }

    fn save(&mut self, record: &ProgramRecord) -> Result<(), StoreError> {
        let mut page = [0xFFu8; PAGE_SIZE];
        page[..RECORD_LEN].copy_from_slice(&record.to_bytes());

        self.flash
            .blocking_erase(STORE_OFFSET, STORE_OFFSET + ERASE_SIZE as u32)
            .map_err(StoreError::Flash)?;
        self.flash
            .blocking_write(STORE_OFFSET, &page)
            .map_err(StoreError::Flash)?;

        debug!("Saved program {} to flash", record.program);
        Ok(())
    }
}
