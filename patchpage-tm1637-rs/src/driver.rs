//! Low-level TM1637 two-wire protocol.
//!
//! The TM1637 speaks an I2C-like protocol without addressing: start
//! condition, bytes sent LSB first with an acknowledge on the ninth clock,
//! stop condition. Both lines are open-drain with external pull-ups, so
//! "high" means released.
//!
//! This module is crate-private; consumers use [`Tm1637`](crate::Tm1637).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::Tm1637Error;
use crate::registers::BIT_DELAY_US;

/// Bit-banged TM1637 bus.
pub(crate) struct Bus<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
}

impl<CLK, DIO, D> Bus<CLK, DIO, D>
where
    DIO: OutputPin + InputPin,
    CLK: OutputPin<Error = DIO::Error>,
    D: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self { clk, dio, delay }
    }

    // -----------------------------------------------------------------------
    // Framing
    // -----------------------------------------------------------------------

    /// Send one command byte followed by `data` as a single transfer.
    pub fn transfer(&mut self, command: u8, data: &[u8]) -> Result<(), Tm1637Error<DIO::Error>> {
        self.start()?;
        self.write_byte(command)?;
        for &byte in data {
            self.write_byte(byte)?;
        }
        self.stop()
    }

    /// DIO falls while CLK is high.
    fn start(&mut self) -> Result<(), Tm1637Error<DIO::Error>> {
        self.dio.set_high()?;
        self.clk.set_high()?;
        self.bit_delay();
        self.dio.set_low()?;
        self.bit_delay();
        Ok(())
    }

    /// DIO rises while CLK is high.
    fn stop(&mut self) -> Result<(), Tm1637Error<DIO::Error>> {
        self.clk.set_low()?;
        self.bit_delay();
        self.dio.set_low()?;
        self.bit_delay();
        self.clk.set_high()?;
        self.bit_delay();
        self.dio.set_high()?;
        self.bit_delay();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Bytes
    // -----------------------------------------------------------------------

    /// Clock out eight bits LSB first, then sample the acknowledge.
    fn write_byte(&mut self, byte: u8) -> Result<(), Tm1637Error<DIO::Error>> {
        for bit in 0..8 {
            self.clk.set_low()?;
            self.bit_delay();
            if byte & (1 << bit) != 0 {
                self.dio.set_high()?;
            } else {
                self.dio.set_low()?;
            }
            self.bit_delay();
            self.clk.set_high()?;
            self.bit_delay();
        }

        // Ninth clock: release DIO, the chip pulls it low to acknowledge.
        self.clk.set_low()?;
        self.dio.set_high()?;
        self.bit_delay();
        self.clk.set_high()?;
        self.bit_delay();
        let acked = self.dio.is_low()?;
        self.clk.set_low()?;
        self.bit_delay();

        if acked {
            Ok(())
        } else {
            Err(Tm1637Error::Ack)
        }
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }
}
