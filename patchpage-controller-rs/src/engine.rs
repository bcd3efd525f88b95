//! Executes controller commands against hardware.
//!
//! The [`Engine`] is the only place where the pure [`Controller`] meets
//! the outside world. It owns:
//!
//! - the [`DebounceBank`], fed with raw pin edges,
//! - the [`TimerQueue`] holding debounce and controller deadlines,
//! - the [`HardwareHandle`] (buttons, panel, MIDI, store).
//!
//! Time is passed in by the caller as a millisecond counter. Firmware
//! feeds it from `embassy_time::Instant`; tests feed it from a loop
//! variable.
//!
//! # Driving the engine
//!
//! ```text
//! raw edge ─▶ on_raw_edge(button, edge, now)     arms Debounce(button)
//! deadline ─▶ poll(now)                          confirms / fires timers
//! tick     ─▶ tick(now)                          poll + refresh panel
//! ```
//!
//! Between calls, sleep until [`next_deadline()`](Engine::next_deadline)
//! or the next raw edge or tick, whichever comes first.

use crate::controller::{Command, ConfigError, Controller, ControllerConfig, Input};
use crate::debounce::{DebounceBank, Transition};
use crate::hardware::{ButtonLevels, HardwareHandle, Panel};
use crate::input::{Button, Edge};
use crate::midi::MidiPort;
use crate::program_state::{ProgramState, ProgramStore};
use crate::timers::{TimerId, TimerQueue};

pub struct Engine<B, P, M, S> {
    controller: Controller,
    debounce: DebounceBank,
    timers: TimerQueue,
    hw: HardwareHandle<B, P, M, S>,
    now_ms: u64,
}

impl<B, P, M, S> Engine<B, P, M, S>
where
    B: ButtonLevels,
    P: Panel,
    M: MidiPort,
    S: ProgramStore,
{
    /// Validate `config`, restore the saved program and draw the first
    /// frame.
    ///
    /// Debounce gates are seeded from the current pin levels, so a button
    /// held through boot does not register as a press.
    pub fn new(config: ControllerConfig, mut hw: HardwareHandle<B, P, M, S>) -> Result<Self, ConfigError> {
        config.validate()?;

        let program = ProgramState::load(&mut hw.store, config.patch_count);
        let buttons = &mut hw.buttons;
        let debounce = DebounceBank::with_levels(config.active_level, |b| buttons.is_high(b));
        let controller = Controller::new(config, program);

        hw.panel.render(&controller.feedback());

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Controller ready: page {} patch {} ch {}",
            program.page(),
            program.patch(),
            program.channel() + 1
        );

        Ok(Self {
            controller,
            debounce,
            timers: TimerQueue::new(),
            hw,
            now_ms: 0,
        })
    }

    // ── Inputs ───────────────────────────────────────────────────────

    /// Feed a raw pin edge observed at `now_ms`.
    ///
    /// Restarts that button's settle window. Edges from patch slots beyond
    /// the configured patch count are dropped.
    pub fn on_raw_edge(&mut self, button: Button, edge: Edge, now_ms: u64) {
        if let Button::Patch(idx) = button {
            if idx >= self.controller.config().patch_count {
                return;
            }
        }
        self.advance(now_ms);

        if let Some(timer) = self.debounce.on_raw_edge(button, edge) {
            let deadline = self.now_ms + self.controller.config().debounce_ms as u64;
            self.timers.arm(timer, deadline);
        }
    }

    /// Fire every timer due at or before `now_ms`, earliest first.
    pub fn poll(&mut self, now_ms: u64) {
        self.advance(now_ms);

        while let Some(timer) = self.timers.pop_expired(self.now_ms) {
            match timer {
                TimerId::Debounce(button) => self.settle(button),
                other => self.dispatch(Input::Expired(other)),
            }
        }
    }

    /// Periodic refresh: fire due timers, then advance paging and render.
    pub fn tick(&mut self, now_ms: u64) {
        self.poll(now_ms);
        self.dispatch(Input::Tick);
    }

    /// Earliest pending deadline, if any timer is armed.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn hardware(&self) -> &HardwareHandle<B, P, M, S> {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut HardwareHandle<B, P, M, S> {
        &mut self.hw
    }

    /// Tear down, returning the hardware (e.g. to reuse the store).
    pub fn into_hardware(self) -> HardwareHandle<B, P, M, S> {
        self.hw
    }

    // ── Internals ────────────────────────────────────────────────────

    fn advance(&mut self, now_ms: u64) {
        // The clock never runs backwards, even if callers disagree.
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn settle(&mut self, button: Button) {
        let level = self.hw.buttons.is_high(button);
        match self.debounce.confirm(button, level) {
            Some(Transition::Pressed) => self.dispatch(Input::Pressed(button)),
            Some(Transition::Released) => self.dispatch(Input::Released(button)),
            None => {}
        }
    }

    fn dispatch(&mut self, input: Input) {
        for command in self.controller.handle(input) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ArmTimer { timer, after_ms } => {
                self.timers.arm(timer, self.now_ms + after_ms as u64);
            }
            Command::CancelTimer(timer) => {
                self.timers.cancel(timer);
            }
            Command::SendProgramChange { channel, program } => {
                self.hw.midi.send_program_change(channel, program);
            }
            Command::Persist => {
                if self.controller.program().save(&mut self.hw.store).is_err() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Failed to persist program state");
                }
            }
            Command::Render(frame) => self.hw.panel.render(&frame),
            Command::Rejected(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Rejected: {}", _e);
            }
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
