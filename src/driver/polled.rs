//! Polled single-frame exchange
//!
//! Moves one frame through the FIFOs by register access while the DMA
//! requests are masked, then restores the configuration untouched.

use super::config::State;
use super::error::{IoError, IoResult};
use super::interrupt::SpiStatus;
use super::spi::SpiDriver;
use crate::hal::{ClockControl, DmaAllocator, SpiRegisters};
use crate::internal::register::spi::{SPI_CFG1_DMAEN, SPI_CR1_SPE, SPI_SR_RXP};

impl<P, A, C> SpiDriver<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    /// Exchange one frame without DMA
    ///
    /// The DMA request enables are dropped for the duration, which also
    /// flushes any request the peripheral latched. The frame is written
    /// with an access of the configured data width and the reply is masked
    /// to it. Blocks until the reply arrives.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped or a transfer is active
    ///
    /// # Panics
    /// In debug builds, if the RX FIFO is not empty.
    pub fn polled_exchange(&mut self, frame: u32) -> IoResult<u32> {
        if self.state != State::Ready {
            return Err(IoError::InvalidState);
        }
        debug_assert!(
            SpiStatus::from_raw(self.regs.sr()).rx_fifo_empty(),
            "RX FIFO not empty"
        );

        let width = self.config.data_width();
        let cr1 = self.regs.cr1();
        let cfg1 = self.regs.cfg1();

        // CFG1 is only writable with SPE clear
        self.regs.set_cr1(cr1 & !SPI_CR1_SPE);
        self.regs.set_cfg1(cfg1 & !SPI_CFG1_DMAEN);
        self.regs.set_cr1(cr1);

        self.resume();
        self.regs.write_txdr(width, frame);
        while self.regs.sr() & SPI_SR_RXP == 0 {
            core::hint::spin_loop();
        }
        let reply = self.regs.read_rxdr(width);
        self.suspend();

        self.regs.set_cr1(cr1 & !SPI_CR1_SPE);
        self.regs.set_cfg1(cfg1);
        self.regs.set_cr1(cr1);

        Ok(reply)
    }
}
