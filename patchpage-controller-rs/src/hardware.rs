//! Hardware seams.
//!
//! The core never names a HAL type. Firmware implements these traits over
//! real pins and peripherals; tests implement them over plain memory.

use core::fmt::Write;

use heapless::String;

use crate::feedback::Feedback;
use crate::input::Button;
use crate::midi::MidiTransport;

/// Instantaneous pin sampling, used when a debounce window closes.
pub trait ButtonLevels {
    /// Current electrical level of `button`'s pin (`true` = high).
    fn is_high(&mut self, button: Button) -> bool;
}

/// A short character display.
pub trait TextDisplay {
    type Error;

    /// Show `text`, right-aligned. Characters beyond the display width
    /// are dropped from the left.
    fn show(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Show a signed decimal number, right-aligned.
    fn show_number(&mut self, value: i32) -> Result<(), Self::Error> {
        let mut text: String<12> = String::new();
        // i32::MIN is 11 characters, fits.
        let _ = write!(text, "{}", value);
        self.show(&text)
    }
}

/// Everything the user looks at: numeric display, patch LEDs, status LED.
///
/// Rendering is infallible from the caller's point of view; implementors
/// log and drop their own errors.
pub trait Panel {
    fn render(&mut self, frame: &Feedback);
}

/// Bundle of hardware the [`Engine`](crate::engine::Engine) drives.
pub struct HardwareHandle<B, P, M, S> {
    pub buttons: B,
    pub panel: P,
    pub midi: MidiTransport<M>,
    pub store: S,
}

impl<B, P, M, S> HardwareHandle<B, P, M, S> {
    pub fn new(buttons: B, panel: P, midi: MidiTransport<M>, store: S) -> Self {
        Self {
            buttons,
            panel,
            midi,
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Capture {
        last: String<12>,
    }

    impl TextDisplay for Capture {
        type Error = ();

        fn show(&mut self, text: &str) -> Result<(), ()> {
            self.last.clear();
            self.last.push_str(text)
        }
    }

    #[test]
    fn show_number_formats_decimal() {
        let mut d = Capture { last: String::new() };
        d.show_number(42).unwrap();
        assert_eq!(d.last.as_str(), "42");
        d.show_number(-7).unwrap();
        assert_eq!(d.last.as_str(), "-7");
        d.show_number(i32::MIN).unwrap();
        assert_eq!(d.last.as_str(), "-2147483648");
    }
}
