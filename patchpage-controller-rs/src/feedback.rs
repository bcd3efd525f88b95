//! Maps controller state to what the user sees.
//!
//! | State                         | Display       | Active LED |
//! |-------------------------------|---------------|------------|
//! | Idle                          | page number   | full       |
//! | PageChanging / Settling       | page number   | dim        |
//! | Sending / ProgramDisplayed    | `P<program>`  | full       |
//! | ChannelConfig                 | `C<channel+1>`| dim        |
//!
//! Text is right-aligned to [`DISPLAY_DIGITS`], e.g. `"   3"`, `"P 42"`,
//! `"C  3"`. Only the LED of the selected patch is lit.

use core::fmt::Write;

use heapless::String;

use crate::controller::{ControllerConfig, ControllerState};
use crate::program_state::ProgramState;

/// Character cells on the numeric display.
pub const DISPLAY_DIGITS: usize = 4;

/// Display text buffer. Sized with headroom for the widest readout.
pub type DisplayText = String<8>;

/// One frame of panel output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feedback {
    /// Right-aligned display text.
    pub text: DisplayText,
    /// Patch LED to light; every other patch LED is off.
    pub led_index: u8,
    /// Brightness of the lit patch LED, percent.
    pub led_brightness: u8,
    /// Send-confirmation LED.
    pub status_led: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Feedback {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "text={=str} led={}@{}% status={}",
            self.text.as_str(),
            self.led_index,
            self.led_brightness,
            self.status_led
        );
    }
}

/// Render a frame. Pure: same inputs, same frame.
///
/// # Examples
///
/// ```
/// use patchpage::controller::{ControllerConfig, ControllerState};
/// use patchpage::feedback::render;
/// use patchpage::program_state::ProgramState;
///
/// let config = ControllerConfig::default();
/// let mut program = ProgramState::new(3);
/// program.set_page(13).unwrap();
/// program.set_patch(2);
///
/// let idle = render(ControllerState::Idle, &program, false, &config);
/// assert_eq!(idle.text.as_str(), "  13");
/// assert_eq!((idle.led_index, idle.led_brightness), (2, 100));
///
/// let sent = render(ControllerState::ProgramDisplayed, &program, true, &config);
/// assert_eq!(sent.text.as_str(), "P 41");
/// ```
pub fn render(
    state: ControllerState,
    program: &ProgramState,
    status_led: bool,
    config: &ControllerConfig,
) -> Feedback {
    let mut text = DisplayText::new();
    // Widest output is 4 characters; the buffer holds 8, so writes
    // cannot fail.
    let brightness = match state {
        ControllerState::Idle => {
            let _ = write!(text, "{:>4}", program.page());
            config.full_brightness
        }
        ControllerState::PageChanging | ControllerState::PageChangeSettling => {
            let _ = write!(text, "{:>4}", program.page());
            config.dim_brightness
        }
        ControllerState::SendingProgramChange | ControllerState::ProgramDisplayed => {
            let _ = write!(text, "P{:>3}", program.program());
            config.full_brightness
        }
        ControllerState::ChannelConfig => {
            let _ = write!(text, "C{:>3}", program.channel() + 1);
            config.dim_brightness
        }
    };

    Feedback {
        text,
        led_index: program.patch(),
        led_brightness: brightness,
        status_led,
    }
}
