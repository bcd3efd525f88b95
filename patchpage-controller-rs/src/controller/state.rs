/// Mode of the controller. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Rest state: page readout, selected patch LED at full brightness.
    #[default]
    Idle,
    /// A page press was accepted; the hold-off starts on the next tick.
    PageChanging,
    /// Waiting for the hold-off to expire. Further page presses restart it.
    PageChangeSettling,
    /// Transmitting. Transient: the entry action moves straight on to
    /// [`ProgramDisplayed`](Self::ProgramDisplayed).
    SendingProgramChange,
    /// `P<program>` readout after a send.
    ProgramDisplayed,
    /// Config button held: page buttons adjust the MIDI channel.
    ChannelConfig,
}

impl ControllerState {
    /// Whether the page buttons currently adjust the channel.
    pub fn is_channel_config(self) -> bool {
        matches!(self, ControllerState::ChannelConfig)
    }

    /// Whether a page edit is waiting to be sent.
    pub fn is_paging(self) -> bool {
        matches!(
            self,
            ControllerState::PageChanging | ControllerState::PageChangeSettling
        )
    }
}
