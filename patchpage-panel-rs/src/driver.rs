//! Panel driver: writes controller feedback frames to the hardware.
//!
//! [`PanelDriver`] owns the numeric display, the patch LEDs and the status
//! LED. It keeps the last frame it wrote and only touches outputs whose
//! value changed, so rendering at the tick rate costs nothing while the
//! panel is static.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use patchpage::feedback::Feedback;
use patchpage::hardware::{Panel, TextDisplay};

use crate::error::PanelError;
use crate::layout::{PanelChanges, PanelConfig, PanelState};
use crate::leds::{PatchLeds, StatusLed};

type Error<D, C, P> = PanelError<
    <D as TextDisplay>::Error,
    <C as embedded_hal::pwm::ErrorType>::Error,
    <P as embedded_hal::digital::ErrorType>::Error,
>;

/// Numeric display + `N` PWM patch LEDs + one status LED.
///
/// # Example
///
/// ```ignore
/// use patchpage_panel_rs::{PanelConfig, PanelDriver, PatchLeds};
///
/// let panel = PanelDriver::new(
///     tm1637,
///     PatchLeds::new([led0, led1, led2]),
///     status_pin,
///     PanelConfig::default(),
/// );
/// let hw = HardwareHandle::new(buttons, panel, midi, store);
/// ```
pub struct PanelDriver<D, C, P, const N: usize> {
    display: D,
    leds: PatchLeds<C, N>,
    status: StatusLed<P>,
    config: PanelConfig,
    /// Last frame fully written. `None` forces a full redraw.
    last: Option<PanelState>,
}

impl<D, C, P, const N: usize> PanelDriver<D, C, P, N>
where
    D: TextDisplay,
    C: SetDutyCycle,
    P: OutputPin,
{
    /// Construct the driver. No output is written until the first frame.
    ///
    /// The status LED polarity follows [`PanelConfig::status_active_high`].
    pub fn new(display: D, leds: PatchLeds<C, N>, status_pin: P, config: PanelConfig) -> Self {
        Self {
            display,
            leds,
            status: StatusLed::new(status_pin, config.status_active_high),
            config,
            last: None,
        }
    }

    /// Write `frame`, touching only outputs that changed since the last
    /// successful write.
    ///
    /// # Errors
    ///
    /// Returns the first output failure. The cached snapshot is dropped so
    /// the next frame is written in full.
    pub fn write(&mut self, frame: &Feedback) -> Result<(), Error<D, C, P>> {
        let next = PanelState::from_feedback(frame, &self.config);
        let changes = match &self.last {
            Some(prev) => PanelChanges::detect(prev, &next),
            None => PanelChanges::all(),
        };
        if !changes.any_changed() {
            return Ok(());
        }

        // Invalidate first; restored only if every write succeeds.
        self.last = None;

        if changes.text_changed {
            self.display.show(&next.text).map_err(PanelError::Display)?;
        }

        let fitted = self.config.led_slots().min(N);
        for (i, &level) in next.led_levels.iter().enumerate().take(fitted) {
            if changes.led_changed[i] {
                self.leds.set(i, level).map_err(|error| PanelError::Led {
                    index: i as u8,
                    error,
                })?;
            }
        }

        if changes.status_changed {
            self.status.set(next.status).map_err(PanelError::Status)?;
        }

        self.last = Some(next);
        Ok(())
    }

    /// Forget the cached frame so the next write redraws everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}

impl<D, C, P, const N: usize> Panel for PanelDriver<D, C, P, N>
where
    D: TextDisplay,
    C: SetDutyCycle,
    P: OutputPin,
{
    fn render(&mut self, frame: &Feedback) {
        if let Err(_e) = self.write(frame) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Panel write failed: {}", _e);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
