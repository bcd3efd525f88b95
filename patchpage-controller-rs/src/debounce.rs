//! Per-button debounce gates.
//!
//! A mechanical switch produces a burst of edges for every press. Each
//! raw edge (re)arms a settle timer; only when that timer expires is the
//! pin re-sampled, and only if the level still matches the last edge, and
//! differs from the last confirmed level, is a logical event produced.
//!
//! ```text
//! raw:      ‾‾‾|_|‾|_____________________|‾|_|‾‾‾‾‾‾‾‾
//! arm:         ^ ^ ^                     ^ ^ ^
//! confirm:           ·--T--> Pressed             ·--T--> Released
//! ```
//!
//! The gates themselves are timer-agnostic: [`DebounceBank::on_raw_edge()`]
//! returns the [`TimerId`] the caller must (re)arm, and
//! [`DebounceBank::confirm()`] is called when that timer fires. Arming an
//! id that is already pending replaces it, which gives last-edge-wins.

use crate::input::{ActiveLevel, Button, Edge, BUTTON_COUNT};
use crate::timers::TimerId;

/// A confirmed, debounced logical transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    Pressed,
    Released,
}

/// Debounce state for a single pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceGate {
    /// Level implied by the most recent raw edge.
    raw_level: bool,
    /// Last confirmed level.
    stable_level: bool,
    /// Edge that armed the outstanding settle timer, if any.
    pending: Option<Edge>,
}

impl DebounceGate {
    /// A settled gate at `level`.
    pub const fn new(level: bool) -> Self {
        Self {
            raw_level: level,
            stable_level: level,
            pending: None,
        }
    }

    /// Record a raw edge. Supersedes any pending edge.
    pub fn on_raw_edge(&mut self, edge: Edge) {
        self.raw_level = edge.level();
        self.pending = Some(edge);
    }

    /// Settle-timer expiry: compare the freshly sampled `level` against
    /// the edge that armed the timer.
    ///
    /// Returns `None` when nothing was pending, when the pin no longer
    /// matches the arming edge (noise), or when the level is the one
    /// already confirmed (a bounce that came back).
    pub fn confirm(&mut self, level: bool, polarity: ActiveLevel) -> Option<Transition> {
        let edge = self.pending.take()?;
        self.raw_level = level;

        if level != edge.level() || level == self.stable_level {
            return None;
        }

        self.stable_level = level;
        Some(if polarity.is_pressed(level) {
            Transition::Pressed
        } else {
            Transition::Released
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn raw_level(&self) -> bool {
        self.raw_level
    }

    pub fn stable_level(&self) -> bool {
        self.stable_level
    }
}

/// One independent [`DebounceGate`] per button slot.
pub struct DebounceBank {
    gates: [DebounceGate; BUTTON_COUNT],
    polarity: ActiveLevel,
}

impl DebounceBank {
    /// All buttons released.
    pub fn new(polarity: ActiveLevel) -> Self {
        Self {
            gates: [DebounceGate::new(polarity.idle_level()); BUTTON_COUNT],
            polarity,
        }
    }

    /// Seed each gate with its current pin level (e.g. a button held
    /// through boot).
    pub fn with_levels<F>(polarity: ActiveLevel, mut level_of: F) -> Self
    where
        F: FnMut(Button) -> bool,
    {
        let mut bank = Self::new(polarity);
        for (i, gate) in bank.gates.iter_mut().enumerate() {
            if let Some(button) = Button::from_index(i) {
                *gate = DebounceGate::new(level_of(button));
            }
        }
        bank
    }

    /// Record a raw edge and return the settle timer to (re)arm.
    ///
    /// A patch number with no slot is ignored and returns `None`.
    pub fn on_raw_edge(&mut self, button: Button, edge: Edge) -> Option<TimerId> {
        let gate = self.gates.get_mut(button.slot()?)?;
        gate.on_raw_edge(edge);
        Some(TimerId::Debounce(button))
    }

    /// Resolve an expired settle timer for `button`.
    pub fn confirm(&mut self, button: Button, level: bool) -> Option<Transition> {
        let polarity = self.polarity;
        self.gates.get_mut(button.slot()?)?.confirm(level, polarity)
    }
}

#[cfg(test)]
impl DebounceBank {
    fn gate(&self, button: Button) -> &DebounceGate {
        &self.gates[button.index()]
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.polarity.is_pressed(self.gate(button).stable_level())
    }
}
