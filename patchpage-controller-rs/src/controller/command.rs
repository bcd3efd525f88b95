use heapless::Vec;

use crate::feedback::Feedback;
use crate::input::Button;
use crate::program_state::ProgramError;
use crate::timers::TimerId;

/// Something that happened, as seen by the controller.
///
/// Raw edges never reach the controller; they are turned into
/// `Pressed`/`Released` by the debounce gates first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Debounced press.
    Pressed(Button),
    /// Debounced release.
    Released(Button),
    /// Periodic refresh.
    Tick,
    /// A controller-owned one-shot timer fired.
    Expired(TimerId),
}

/// Side effect requested by a controller transition.
///
/// The controller never touches hardware or timers itself; it returns
/// these and the [`Engine`](crate::engine::Engine) carries them out in
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// (Re)arm a one-shot timer, cancelling any pending one with the same id.
    ArmTimer { timer: TimerId, after_ms: u32 },
    CancelTimer(TimerId),
    /// Transmit a Program Change.
    SendProgramChange { channel: u8, program: u8 },
    /// Write the current program record to persistent storage.
    Persist,
    /// Push a feedback frame to the panel.
    Render(Feedback),
    /// A range request was rejected; report it.
    Rejected(ProgramError),
}

/// Upper bound on commands produced by a single transition.
pub const MAX_COMMANDS: usize = 8;

/// Ordered list of commands produced by one [`Controller::handle()`] call.
///
/// [`Controller::handle()`]: super::Controller::handle
pub type Commands = Vec<Command, MAX_COMMANDS>;
