//! MIDI Program Change output.
//!
//! Only one message type is ever sent: Program Change, two bytes on a
//! 31250 baud serial line. Transmission is fire-and-forget; a failed
//! write is logged and dropped rather than retried, since a late program
//! change is worse than a missing one.

/// MIDI DIN serial bit rate.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Program Change status nibble.
pub const PROGRAM_CHANGE: u8 = 0xC0;

/// Encode a Program Change message.
///
/// `channel` is masked to 4 bits and `program` to 7 bits so the output is
/// always a well-formed status/data pair.
///
/// # Examples
///
/// ```
/// use patchpage::midi::program_change;
///
/// assert_eq!(program_change(0, 2), [0xC0, 0x02]);
/// assert_eq!(program_change(15, 127), [0xCF, 0x7F]);
/// ```
pub const fn program_change(channel: u8, program: u8) -> [u8; 2] {
    [PROGRAM_CHANGE | (channel & 0x0F), program & 0x7F]
}

/// Byte-oriented serial output, configured for [`MIDI_BAUD_RATE`].
pub trait MidiPort {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Block until every written byte has left the transmitter.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Sends Program Change messages over a [`MidiPort`].
pub struct MidiTransport<P> {
    port: P,
}

impl<P> MidiTransport<P>
where
    P: MidiPort,
{
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Write `0xC0 | channel, program` and flush.
    ///
    /// Errors from the port are swallowed.
    pub fn send_program_change(&mut self, channel: u8, program: u8) {
        let message = program_change(channel, program);
        let result = self.port.write(&message).and_then(|()| self.port.flush());

        match result {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("MIDI PC ch {} program {}", (channel & 0x0F) + 1, program);
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("MIDI write failed, message dropped");
            }
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct RecordingPort {
        written: Vec<u8, 16>,
        flushes: usize,
        fail: bool,
    }

    impl MidiPort for RecordingPort {
        type Error = ();

        fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.written.extend_from_slice(bytes).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn sends_two_bytes_then_flushes() {
        let mut midi = MidiTransport::new(RecordingPort::default());
        midi.send_program_change(3, 11);
        assert_eq!(midi.port().written.as_slice(), &[0xC3, 11]);
        assert_eq!(midi.port().flushes, 1);
    }

    #[test]
    fn out_of_range_inputs_are_masked() {
        assert_eq!(program_change(16, 128), [0xC0, 0x00]);
    }

    #[test]
    fn port_failure_is_not_fatal() {
        let mut midi = MidiTransport::new(RecordingPort {
            fail: true,
            ..RecordingPort::default()
        });
        midi.send_program_change(0, 1);
        assert!(midi.port().written.is_empty());
        // Flush is skipped when the write fails.
        assert_eq!(midi.port().flushes, 0);
    }
}
