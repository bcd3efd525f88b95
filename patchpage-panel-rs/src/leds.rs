//! Patch LEDs on PWM channels and the on/off status LED.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// A row of dimmable patch LEDs, one PWM channel each.
///
/// All channels share one type, which holds for HAL PWM outputs split from
/// the same peripheral family.
pub struct PatchLeds<C, const N: usize> {
    channels: [C; N],
}

impl<C, const N: usize> PatchLeds<C, N>
where
    C: SetDutyCycle,
{
    pub fn new(channels: [C; N]) -> Self {
        Self { channels }
    }

    /// Set LED `index` to `percent` brightness (clamped to 100).
    ///
    /// Indices beyond the fitted LEDs are ignored.
    pub fn set(&mut self, index: usize, percent: u8) -> Result<(), C::Error> {
        match self.channels.get_mut(index) {
            Some(channel) => channel.set_duty_cycle_percent(percent.min(100)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
impl<C, const N: usize> PatchLeds<C, N> {
    pub(crate) fn channels(&self) -> &[C; N] {
        &self.channels
    }
}

/// Single on/off indicator LED.
pub struct StatusLed<P> {
    pin: P,
    active_high: bool,
}

impl<P> StatusLed<P>
where
    P: OutputPin,
{
    pub fn new(pin: P, active_high: bool) -> Self {
        Self { pin, active_high }
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on == self.active_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}

#[cfg(test)]
impl<P> StatusLed<P> {
    pub(crate) fn pin(&self) -> &P {
        &self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Channel {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for Channel {
        type Error = Infallible;
    }

    impl SetDutyCycle for Channel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    struct Pin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    fn leds() -> PatchLeds<Channel, 3> {
        PatchLeds::new([Channel { duty: 7 }, Channel { duty: 7 }, Channel { duty: 7 }])
    }

    #[test]
    fn percent_scales_to_max_duty() {
        let mut l = leds();
        l.set(1, 20).unwrap();
        assert_eq!(l.channels[1].duty, 200);
        l.set(1, 250).unwrap();
        assert_eq!(l.channels[1].duty, 1000);
    }

    #[test]
    fn out_of_range_index_ignored() {
        let mut l = leds();
        l.set(3, 100).unwrap();
        assert!(l.channels.iter().all(|c| c.duty == 7));
    }

    #[test]
    fn status_led_polarity() {
        let mut led = StatusLed::new(Pin { high: false }, true);
        led.set(true).unwrap();
        assert!(led.pin.high);

        let mut inverted = StatusLed::new(Pin { high: false }, false);
        inverted.set(true).unwrap();
        assert!(!inverted.pin.high);
        inverted.set(false).unwrap();
        assert!(inverted.pin.high);
    }
}
