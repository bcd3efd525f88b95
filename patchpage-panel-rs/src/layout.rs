//! Panel snapshot types.
//!
//! This module defines the [`PanelState`] snapshot derived from a
//! controller [`Feedback`] frame and the [`PanelChanges`] diff that decides
//! which outputs actually need writing.

use patchpage::feedback::{DisplayText, Feedback};
use patchpage::program_state::MAX_PATCHES;

// ── PanelConfig ──────────────────────────────────────────────────────

/// Wiring of the panel outputs.
///
/// [`PanelConfig::default()`] matches the three-patch build: three PWM
/// patch LEDs and an active-high status LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Patch LEDs actually fitted. Default: 3. Max: [`MAX_PATCHES`].
    pub led_count: u8,
    /// Status LED lights when its pin is driven high. Default: `true`.
    pub status_active_high: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            led_count: 3,
            status_active_high: true,
        }
    }
}

impl PanelConfig {
    /// Fitted LEDs, clamped to what a [`PanelState`] can hold.
    pub fn led_slots(&self) -> usize {
        (self.led_count as usize).min(MAX_PATCHES)
    }
}

// ── PanelState ───────────────────────────────────────────────────────

/// Everything the panel shows for one frame, per output.
///
/// Unlike [`Feedback`], which names a single lit LED, this lists every
/// LED's level so individual outputs can be compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    /// Display text, as rendered by the controller.
    pub text: DisplayText,
    /// Per-LED brightness, percent. Unfitted slots stay 0.
    pub led_levels: [u8; MAX_PATCHES],
    /// Status LED on.
    pub status: bool,
}

impl PanelState {
    /// Expand a feedback frame for the configured LED count.
    ///
    /// A `led_index` with no fitted LED leaves every LED dark.
    pub fn from_feedback(frame: &Feedback, config: &PanelConfig) -> Self {
        let mut led_levels = [0u8; MAX_PATCHES];
        let idx = frame.led_index as usize;
        if idx < config.led_slots() {
            led_levels[idx] = frame.led_brightness.min(100);
        }

        Self {
            text: frame.text.clone(),
            led_levels,
            status: frame.status_led,
        }
    }
}

// ── PanelChanges ─────────────────────────────────────────────────────

/// Which outputs differ between two [`PanelState`] snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelChanges {
    /// `true` if the display text differs.
    pub text_changed: bool,
    /// Per-LED flag: `true` if the level differs.
    pub led_changed: [bool; MAX_PATCHES],
    /// `true` if the status LED differs.
    pub status_changed: bool,
}

impl PanelChanges {
    /// Diff two states field by field.
    pub fn detect(old: &PanelState, new: &PanelState) -> Self {
        let mut led_changed = [false; MAX_PATCHES];
        for (i, changed) in led_changed.iter_mut().enumerate() {
            *changed = old.led_levels[i] != new.led_levels[i];
        }

        Self {
            text_changed: old.text != new.text,
            led_changed,
            status_changed: old.status != new.status,
        }
    }

    /// Every output flagged, for the first frame after power-up or a
    /// failed write.
    pub fn all() -> Self {
        Self {
            text_changed: true,
            led_changed: [true; MAX_PATCHES],
            status_changed: true,
        }
    }

    /// Returns `true` if any output changed.
    pub fn any_changed(&self) -> bool {
        self.text_changed || self.status_changed || self.led_changed.iter().any(|&c| c)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str, led: u8, level: u8, status: bool) -> Feedback {
        let mut f = Feedback::default();
        f.text.push_str(text).unwrap();
        f.led_index = led;
        f.led_brightness = level;
        f.status_led = status;
        f
    }

    #[test]
    fn default_state_is_dark() {
        let s = PanelState::default();
        assert!(s.text.is_empty());
        assert_eq!(s.led_levels, [0; MAX_PATCHES]);
        assert!(!s.status);
    }

    #[test]
    fn from_feedback_lights_one_led() {
        let s = PanelState::from_feedback(&frame("   4", 1, 20, false), &PanelConfig::default());
        assert_eq!(s.text.as_str(), "   4");
        assert_eq!(s.led_levels[..3], [0, 20, 0]);
    }

    #[test]
    fn from_feedback_ignores_unfitted_led() {
        let s = PanelState::from_feedback(&frame("   0", 5, 100, false), &PanelConfig::default());
        assert_eq!(s.led_levels, [0; MAX_PATCHES]);
    }

    #[test]
    fn led_slots_clamped() {
        let c = PanelConfig {
            led_count: 20,
            ..PanelConfig::default()
        };
        assert_eq!(c.led_slots(), MAX_PATCHES);
    }

    #[test]
    fn changes_detect_text_only() {
        let config = PanelConfig::default();
        let a = PanelState::from_feedback(&frame("   1", 0, 100, false), &config);
        let b = PanelState::from_feedback(&frame("   2", 0, 100, false), &config);
        let changes = PanelChanges::detect(&a, &b);
        assert!(changes.text_changed);
        assert!(!changes.status_changed);
        assert!(!changes.led_changed.iter().any(|&c| c));
    }

    #[test]
    fn changes_detect_led_move() {
        let config = PanelConfig::default();
        let a = PanelState::from_feedback(&frame("P  1", 0, 100, true), &config);
        let b = PanelState::from_feedback(&frame("P  1", 2, 100, true), &config);
        let changes = PanelChanges::detect(&a, &b);
        assert!(!changes.text_changed);
        assert_eq!(changes.led_changed[..3], [true, false, true]);
        assert!(changes.any_changed());
    }

    #[test]
    fn changes_none() {
        let s = PanelState::from_feedback(&frame("C  1", 0, 20, false), &PanelConfig::default());
        assert!(!PanelChanges::detect(&s, &s).any_changed());
        assert!(PanelChanges::all().any_changed());
    }
}
