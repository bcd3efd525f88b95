use crate::feedback::{render, Feedback};
use crate::input::Button;
use crate::program_state::ProgramState;
use crate::timers::TimerId;

use super::command::{Command, Commands, Input};
use super::config::ControllerConfig;
use super::state::ControllerState;

/// The controller state machine.
///
/// Owns the [`ProgramState`] and the current [`ControllerState`]. Every
/// input goes through [`handle()`](Self::handle), which mutates state and
/// returns the side effects to perform. Nothing here touches hardware or
/// reads a clock.
///
/// # Examples
///
/// ```
/// use patchpage::controller::{Command, Controller, ControllerConfig, ControllerState, Input};
/// use patchpage::input::Button;
/// use patchpage::program_state::ProgramState;
///
/// let mut controller = Controller::new(ControllerConfig::default(), ProgramState::new(3));
///
/// let commands = controller.handle(Input::Pressed(Button::Patch(2)));
/// assert!(commands.contains(&Command::SendProgramChange { channel: 0, program: 2 }));
/// assert_eq!(controller.state(), ControllerState::ProgramDisplayed);
/// ```
pub struct Controller {
    config: ControllerConfig,
    state: ControllerState,
    program: ProgramState,
    /// Status LED is mid-pulse.
    blink_on: bool,
    /// Patch button that triggered the last send.
    last_patch: Option<u8>,
    /// `last_patch` has not been released yet.
    patch_held: bool,
    /// Readout timer fired while `last_patch` was still held.
    readout_expired: bool,
}

impl Controller {
    pub fn new(config: ControllerConfig, program: ProgramState) -> Self {
        Self {
            config,
            state: ControllerState::Idle,
            program,
            blink_on: false,
            last_patch: None,
            patch_held: false,
            readout_expired: false,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn program(&self) -> &ProgramState {
        &self.program
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn is_blinking(&self) -> bool {
        self.blink_on
    }

    /// Frame for the current state.
    pub fn feedback(&self) -> Feedback {
        render(self.state, &self.program, self.blink_on, &self.config)
    }

    /// Apply one input and return the resulting side effects, in order.
    pub fn handle(&mut self, input: Input) -> Commands {
        let mut out = Commands::new();
        match input {
            Input::Pressed(button) => self.on_press(button, &mut out),
            Input::Released(button) => self.on_release(button, &mut out),
            Input::Tick => self.on_tick(&mut out),
            Input::Expired(timer) => self.on_timer(timer, &mut out),
        }
        out
    }

    // ── Presses ──────────────────────────────────────────────────────

    fn on_press(&mut self, button: Button, out: &mut Commands) {
        if self.state.is_channel_config() {
            if let Some(delta) = button.page_delta() {
                let channel = self.program.channel() as i32 + delta;
                if let Err(e) = self.program.set_channel(channel) {
                    emit(out, Command::Rejected(e));
                }
            }
            // Patch buttons are inert while the config button is held.
            return;
        }

        match button {
            Button::Patch(idx) => {
                if idx >= self.program.patch_count() {
                    return;
                }
                self.program.set_patch(idx);
                self.last_patch = Some(idx);
                self.patch_held = true;
                self.enter_sending(out);
            }
            Button::PageDown | Button::PageUp => {
                let delta = button.page_delta().unwrap_or(0);
                self.step_page(delta, out);
            }
            Button::Config => {
                emit(out, Command::CancelTimer(TimerId::Holdoff));
                self.transition(ControllerState::ChannelConfig);
            }
        }
    }

    fn step_page(&mut self, delta: i32, out: &mut Commands) {
        let requested = self.program.page() as i32 + delta;
        if let Err(e) = self.program.set_page(requested) {
            emit(out, Command::Rejected(e));
            return;
        }

        match self.state {
            ControllerState::PageChanging => {}
            ControllerState::PageChangeSettling => {
                // Each press pushes the send back by a full hold-off.
                emit(
                    out,
                    Command::ArmTimer {
                        timer: TimerId::Holdoff,
                        after_ms: self.config.holdoff_ms,
                    },
                );
            }
            _ => self.transition(ControllerState::PageChanging),
        }
    }

    // ── Releases ─────────────────────────────────────────────────────

    fn on_release(&mut self, button: Button, out: &mut Commands) {
        match button {
            Button::Config if self.state.is_channel_config() => {
                emit(out, Command::CancelTimer(TimerId::Holdoff));
                self.transition(ControllerState::Idle);
            }
            Button::Patch(idx) if Some(idx) == self.last_patch => {
                self.patch_held = false;
                if self.state == ControllerState::ProgramDisplayed && self.readout_expired {
                    self.transition(ControllerState::Idle);
                }
            }
            _ => {}
        }
    }

    // ── Tick ─────────────────────────────────────────────────────────

    fn on_tick(&mut self, out: &mut Commands) {
        if self.state == ControllerState::PageChanging {
            emit(
                out,
                Command::ArmTimer {
                    timer: TimerId::Holdoff,
                    after_ms: self.config.holdoff_ms,
                },
            );
            self.transition(ControllerState::PageChangeSettling);
        }
        // Render last so the frame reflects this tick's transition.
        emit(out, Command::Render(self.feedback()));
    }

    // ── Timers ───────────────────────────────────────────────────────

    fn on_timer(&mut self, timer: TimerId, out: &mut Commands) {
        match timer {
            TimerId::Holdoff => {
                if self.state == ControllerState::PageChangeSettling {
                    self.enter_sending(out);
                }
            }
            TimerId::Blink => self.blink_on = false,
            TimerId::Readout => {
                if self.state == ControllerState::ProgramDisplayed {
                    if self.patch_held {
                        self.readout_expired = true;
                    } else {
                        self.transition(ControllerState::Idle);
                    }
                }
            }
            TimerId::Debounce(_) => {}
        }
    }

    // ── Sending ──────────────────────────────────────────────────────

    /// Entry action of [`ControllerState::SendingProgramChange`].
    fn enter_sending(&mut self, out: &mut Commands) {
        self.transition(ControllerState::SendingProgramChange);

        emit(out, Command::CancelTimer(TimerId::Holdoff));
        emit(
            out,
            Command::SendProgramChange {
                channel: self.program.channel(),
                program: self.program.program(),
            },
        );
        emit(out, Command::Persist);

        self.blink_on = true;
        emit(
            out,
            Command::ArmTimer {
                timer: TimerId::Blink,
                after_ms: self.config.blink_ms,
            },
        );

        self.readout_expired = false;
        emit(
            out,
            Command::ArmTimer {
                timer: TimerId::Readout,
                after_ms: self.config.readout_ms,
            },
        );

        self.transition(ControllerState::ProgramDisplayed);
    }

    fn transition(&mut self, next: ControllerState) {
        if next != self.state {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} -> {}", self.state, next);
            self.state = next;
        }
    }
}

fn emit(out: &mut Commands, command: Command) {
    let pushed = out.push(command);
    debug_assert!(pushed.is_ok(), "command list overflow");
}

// ── Unit Tests ───────────────────────────────────────────────────────
