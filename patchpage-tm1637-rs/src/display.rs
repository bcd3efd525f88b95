//! High-level interface for a 4-digit TM1637 module.
//!
//! [`Tm1637`] wraps the bus with brightness validation, full-display
//! writes and the [`TextDisplay`] implementation used by the panel.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use patchpage::hardware::TextDisplay;

use crate::driver::Bus;
use crate::error::Tm1637Error;
use crate::font;
use crate::registers::{
    ADDRESS_BASE, DATA_AUTO_INCREMENT, DEFAULT_BRIGHTNESS, DIGITS, DISPLAY_CONTROL, DISPLAY_ON,
    MAX_BRIGHTNESS,
};

/// A TM1637 4-digit 7-segment display.
///
/// # Lifecycle
///
/// 1. [`Tm1637::new()`] — no bus traffic.
/// 2. [`Tm1637::init()`] — blank the digits and switch the display on.
/// 3. [`show()`](TextDisplay::show) / [`write_segments()`](Self::write_segments).
///
/// # Example
///
/// ```no_run
/// use patchpage::hardware::TextDisplay;
/// use tm1637_driver::Tm1637;
///
/// # fn example<P, D>(clk: P, dio: P, delay: D) -> Result<(), tm1637_driver::Tm1637Error<P::Error>>
/// # where
/// #     P: embedded_hal::digital::OutputPin + embedded_hal::digital::InputPin,
/// #     D: embedded_hal::delay::DelayNs,
/// # {
/// let mut display = Tm1637::new(clk, dio, delay);
/// display.init()?;
/// display.show("P 42")?;
/// display.show_number(7)?;
/// # Ok(())
/// # }
/// ```
pub struct Tm1637<CLK, DIO, D> {
    bus: Bus<CLK, DIO, D>,
    brightness: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    DIO: OutputPin + InputPin,
    CLK: OutputPin<Error = DIO::Error>,
    D: DelayNs,
{
    /// Construct the driver at [`DEFAULT_BRIGHTNESS`]. No bus traffic.
    ///
    /// # Arguments
    /// * `clk` — clock line, open-drain
    /// * `dio` — data line, open-drain and readable for the acknowledge
    /// * `delay` — bit timing source
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            bus: Bus::new(clk, dio, delay),
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Blank the display and switch it on at the configured brightness.
    pub fn init(&mut self) -> Result<(), Tm1637Error<DIO::Error>> {
        self.write_segments(&[0; DIGITS])?;
        self.set_brightness(self.brightness)?;

        #[cfg(feature = "defmt")]
        defmt::info!("TM1637 initialised, brightness {}", self.brightness);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Display control
    // -----------------------------------------------------------------------

    /// Switch the display on at `level` (0–7).
    ///
    /// # Errors
    /// * [`Tm1637Error::InvalidBrightness`] if `level > 7`
    /// * [`Tm1637Error::Pin`] / [`Tm1637Error::Ack`] on bus failure
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Tm1637Error<DIO::Error>> {
        if level > MAX_BRIGHTNESS {
            return Err(Tm1637Error::InvalidBrightness);
        }
        self.bus.transfer(DISPLAY_CONTROL | DISPLAY_ON | level, &[])?;
        self.brightness = level;
        Ok(())
    }

    /// Switch the display off. Segment data is retained.
    pub fn display_off(&mut self) -> Result<(), Tm1637Error<DIO::Error>> {
        self.bus.transfer(DISPLAY_CONTROL, &[])
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    // -----------------------------------------------------------------------
    // Segment data
    // -----------------------------------------------------------------------

    /// Write raw segment bytes, leftmost digit first.
    pub fn write_segments(&mut self, segments: &[u8; DIGITS]) -> Result<(), Tm1637Error<DIO::Error>> {
        self.bus.transfer(DATA_AUTO_INCREMENT, &[])?;
        self.bus.transfer(ADDRESS_BASE, segments)
    }

    pub fn clear(&mut self) -> Result<(), Tm1637Error<DIO::Error>> {
        self.write_segments(&[0; DIGITS])
    }
}

impl<CLK, DIO, D> TextDisplay for Tm1637<CLK, DIO, D>
where
    DIO: OutputPin + InputPin,
    CLK: OutputPin<Error = DIO::Error>,
    D: DelayNs,
{
    type Error = Tm1637Error<DIO::Error>;

    fn show(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_segments(&font::encode(text))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use heapless::Vec;

    // ── Recorded-pin decoder ─────────────────────────────────────────

    type Frame = Vec<u8, 8>;

    /// Watches both lines and decodes start/stop framed bytes.
    struct Trace {
        clk: bool,
        dio: bool,
        in_frame: bool,
        bits: Vec<bool, 72>,
        frames: Vec<Frame, 8>,
        /// Level the "chip" drives during the acknowledge clock.
        ack_low: bool,
    }

    impl Trace {
        fn new() -> Self {
            Self {
                clk: true,
                dio: true,
                in_frame: false,
                bits: Vec::new(),
                frames: Vec::new(),
                ack_low: true,
            }
        }

        fn set_clk(&mut self, level: bool) {
            if level && !self.clk && self.in_frame {
                self.bits.push(self.dio).unwrap();
            }
            self.clk = level;
        }

        fn set_dio(&mut self, level: bool) {
            if self.clk && self.dio && !level {
                self.in_frame = true;
                self.bits.clear();
            } else if self.clk && !self.dio && level && self.in_frame {
                self.in_frame = false;
                let frame = self.decode();
                self.frames.push(frame).unwrap();
            }
            self.dio = level;
        }

        /// Nine clocks per byte; the ninth is the acknowledge. The stop
        /// condition's clock leaves one stray bit at the end.
        fn decode(&self) -> Frame {
            let mut frame = Frame::new();
            for chunk in self.bits.chunks_exact(9) {
                let byte = chunk
                    .iter()
                    .take(8)
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i));
                frame.push(byte).unwrap();
            }
            frame
        }
    }

    #[derive(Clone, Copy)]
    enum Role {
        Clk,
        Dio,
    }

    struct Line<'a> {
        role: Role,
        trace: &'a RefCell<Trace>,
    }

    impl ErrorType for Line<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Line<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.set(true);
            Ok(())
        }
    }

    impl InputPin for Line<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(!self.is_low()?)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            let t = self.trace.borrow();
            Ok(!t.dio || t.ack_low)
        }
    }

    impl Line<'_> {
        fn set(&mut self, level: bool) {
            let mut t = self.trace.borrow_mut();
            match self.role {
                Role::Clk => t.set_clk(level),
                Role::Dio => t.set_dio(level),
            }
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn display(trace: &RefCell<Trace>) -> Tm1637<Line<'_>, Line<'_>, NoDelay> {
        Tm1637::new(
            Line { role: Role::Clk, trace },
            Line { role: Role::Dio, trace },
            NoDelay,
        )
    }

    fn frames(trace: &RefCell<Trace>) -> Vec<Frame, 8> {
        trace.borrow().frames.clone()
    }

    fn frame(bytes: &[u8]) -> Frame {
        Frame::from_slice(bytes).unwrap()
    }

    // ── Protocol ─────────────────────────────────────────────────────

    #[test]
    fn init_blanks_then_switches_on() {
        let trace = RefCell::new(Trace::new());
        display(&trace).init().unwrap();

        let f = frames(&trace);
        assert_eq!(f.len(), 3);
        assert_eq!(f[0], frame(&[0x40]));
        assert_eq!(f[1], frame(&[0xC0, 0, 0, 0, 0]));
        assert_eq!(f[2], frame(&[0x88 | DEFAULT_BRIGHTNESS]));
    }

    #[test]
    fn show_writes_encoded_digits() {
        let trace = RefCell::new(Trace::new());
        display(&trace).show("P 41").unwrap();

        let f = frames(&trace);
        assert_eq!(f.len(), 2);
        assert_eq!(f[0], frame(&[0x40]));
        assert_eq!(f[1], frame(&[0xC0, 0x73, 0x00, 0x66, 0x06]));
    }

    #[test]
    fn show_number_right_aligns() {
        let trace = RefCell::new(Trace::new());
        display(&trace).show_number(13).unwrap();
        assert_eq!(frames(&trace)[1], frame(&[0xC0, 0, 0, 0x06, 0x4F]));
    }

    // ── Brightness ───────────────────────────────────────────────────

    #[test]
    fn brightness_is_validated() {
        let trace = RefCell::new(Trace::new());
        let mut d = display(&trace);
        assert_eq!(d.set_brightness(8), Err(Tm1637Error::InvalidBrightness));
        assert!(frames(&trace).is_empty());

        d.set_brightness(7).unwrap();
        assert_eq!(d.brightness(), 7);
        assert_eq!(frames(&trace)[0], frame(&[0x8F]));
    }

    #[test]
    fn display_off_clears_on_flag() {
        let trace = RefCell::new(Trace::new());
        display(&trace).display_off().unwrap();
        assert_eq!(frames(&trace)[0], frame(&[0x80]));
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn missing_ack_is_reported() {
        let trace = RefCell::new(Trace::new());
        trace.borrow_mut().ack_low = false;
        assert_eq!(display(&trace).show("1"), Err(Tm1637Error::Ack));
    }
}
