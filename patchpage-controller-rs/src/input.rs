//! Physical inputs: button identities, raw edges and electrical polarity.

use crate::program_state::MAX_PATCHES;

/// Total number of button slots (patches plus page down/up and config).
pub const BUTTON_COUNT: usize = MAX_PATCHES + 3;

/// A physical button on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Patch button by index within the page (0-based).
    Patch(u8),
    PageDown,
    PageUp,
    /// Held to re-purpose the page buttons as channel −/+.
    Config,
}

impl Button {
    /// Dense slot index, used to address per-button debounce state.
    ///
    /// Patches occupy `0..MAX_PATCHES`; the three function buttons follow.
    pub const fn index(self) -> usize {
        match self {
            Button::Patch(i) => i as usize,
            Button::PageDown => MAX_PATCHES,
            Button::PageUp => MAX_PATCHES + 1,
            Button::Config => MAX_PATCHES + 2,
        }
    }

    /// [`index()`](Self::index), or `None` for a patch number beyond
    /// [`MAX_PATCHES`], which has no slot.
    pub const fn slot(self) -> Option<usize> {
        match self {
            Button::Patch(i) if i as usize >= MAX_PATCHES => None,
            _ => Some(self.index()),
        }
    }

    /// Inverse of [`index()`](Self::index).
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < MAX_PATCHES {
            Some(Button::Patch(index as u8))
        } else if index == MAX_PATCHES {
            Some(Button::PageDown)
        } else if index == MAX_PATCHES + 1 {
            Some(Button::PageUp)
        } else if index == MAX_PATCHES + 2 {
            Some(Button::Config)
        } else {
            None
        }
    }

    /// `-1` for page down, `+1` for page up, `None` otherwise.
    pub const fn page_delta(self) -> Option<i32> {
        match self {
            Button::PageDown => Some(-1),
            Button::PageUp => Some(1),
            _ => None,
        }
    }
}

/// Direction of a raw electrical transition on an input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// The edge that ends at `high`.
    pub const fn from_level(high: bool) -> Self {
        if high {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }

    /// Pin level after this edge (`true` = high).
    pub const fn level(self) -> bool {
        matches!(self, Edge::Rising)
    }
}

/// Electrical polarity of a pressed button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pull-up input, switch to ground: pressed reads low.
    #[default]
    ActiveLow,
    /// Pull-down input, switch to supply: pressed reads high.
    ActiveHigh,
}

impl ActiveLevel {
    /// Whether a pin reading `high` means the button is pressed.
    pub const fn is_pressed(self, high: bool) -> bool {
        match self {
            ActiveLevel::ActiveLow => !high,
            ActiveLevel::ActiveHigh => high,
        }
    }

    /// Pin level of a released button.
    pub const fn idle_level(self) -> bool {
        matches!(self, ActiveLevel::ActiveLow)
    }
}
