use core::fmt;

use crate::input::ActiveLevel;
use crate::program_state::MAX_PATCHES;

/// Timing, layout and polarity parameters for the controller.
///
/// [`ControllerConfig::default()`] matches the three-patch panel build.
/// Call [`validate()`](Self::validate) on anything constructed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Patch buttons per page. Default: 3. Range: 1–8.
    pub patch_count: u8,
    /// Debounce settle window. Default: 20 ms. Range: 20–25 ms.
    pub debounce_ms: u32,
    /// Quiet time after the last page press before the program change is
    /// sent. Default: 500 ms. Range: 300–500 ms.
    pub holdoff_ms: u32,
    /// Status LED pulse after a send. Default: 100 ms. Range: 100–250 ms.
    pub blink_ms: u32,
    /// How long `P<program>` stays up after a send before falling back to
    /// the page readout. Default: 2000 ms.
    pub readout_ms: u32,
    /// Display/LED refresh rate. Default: 60 Hz. Range: 60–120 Hz.
    pub tick_hz: u32,
    /// Active patch LED level in Idle and after a send, percent.
    pub full_brightness: u8,
    /// Active patch LED level while paging or in channel config, percent.
    pub dim_brightness: u8,
    /// Button polarity. Default: active-low (pull-ups).
    pub active_level: ActiveLevel,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            patch_count: 3,
            debounce_ms: 20,
            holdoff_ms: 500,
            blink_ms: 100,
            readout_ms: 2_000,
            tick_hz: 60,
            full_brightness: 100,
            dim_brightness: 20,
            active_level: ActiveLevel::ActiveLow,
        }
    }
}

impl ControllerConfig {
    /// Tick period in milliseconds (`1000 / tick_hz`).
    pub fn tick_period_ms(&self) -> u64 {
        1000 / self.tick_hz.max(1) as u64
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patch_count == 0 || self.patch_count as usize > MAX_PATCHES {
            return Err(ConfigError::PatchCount);
        }
        if !(20..=25).contains(&self.debounce_ms) {
            return Err(ConfigError::Debounce);
        }
        if !(300..=500).contains(&self.holdoff_ms) {
            return Err(ConfigError::Holdoff);
        }
        if !(100..=250).contains(&self.blink_ms) {
            return Err(ConfigError::Blink);
        }
        if self.readout_ms == 0 {
            return Err(ConfigError::Readout);
        }
        if !(60..=120).contains(&self.tick_hz) {
            return Err(ConfigError::TickRate);
        }
        if self.full_brightness > 100 || self.dim_brightness > self.full_brightness {
            return Err(ConfigError::Brightness);
        }
        Ok(())
    }
}

/// Which [`ControllerConfig`] field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    PatchCount,
    Debounce,
    Holdoff,
    Blink,
    Readout,
    TickRate,
    Brightness,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ConfigError::PatchCount => "patch_count must be 1-8",
            ConfigError::Debounce => "debounce_ms must be 20-25",
            ConfigError::Holdoff => "holdoff_ms must be 300-500",
            ConfigError::Blink => "blink_ms must be 100-250",
            ConfigError::Readout => "readout_ms must be non-zero",
            ConfigError::TickRate => "tick_hz must be 60-120",
            ConfigError::Brightness => "brightness must satisfy dim <= full <= 100",
        };
        f.write_str(msg)
    }
}
