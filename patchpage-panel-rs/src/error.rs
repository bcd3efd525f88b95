//! Error types for the panel driver.

/// Errors that can occur while writing a frame to the panel.
///
/// Generic over the display error `D`, the patch LED PWM error `L` and the
/// status LED pin error `S`, since each is driven by a different peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError<D, L, S> {
    /// Numeric display write failed.
    Display(D),
    /// Setting a patch LED duty cycle failed.
    Led { index: u8, error: L },
    /// Driving the status LED pin failed.
    Status(S),
}

#[cfg(feature = "defmt")]
impl<D, L, S> defmt::Format for PanelError<D, L, S> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PanelError::Display(_) => defmt::write!(f, "Display write failed"),
            PanelError::Led { index, .. } => defmt::write!(f, "Patch LED {} write failed", index),
            PanelError::Status(_) => defmt::write!(f, "Status LED write failed"),
        }
    }
}
