//! Interrupt service routines
//!
//! The platform's GPDMA and SPI interrupt vectors call into these with the
//! driver locked (see [`SharedSpi`](crate::sync::SharedSpi)). Every routine
//! quiesces the hardware before the callback runs, so the callback may issue
//! the next operation directly.

use super::config::{BufferMode, State};
use super::error::IoError;
use super::interrupt::{DmaChannelStatus, SpiEvent};
use super::spi::SpiDriver;
use crate::hal::{ClockControl, DmaAllocator, SpiRegisters};
use crate::internal::register::spi::{SPI_IFCR_ALL, SPI_SR_OVR};

impl<P, A, C> SpiDriver<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    /// Service an interrupt of the RX channel
    ///
    /// `csr` is the channel status word captured by the DMA interrupt
    /// handler. Error flags take precedence over completion flags present in
    /// the same word.
    pub fn serve_dma_rx_interrupt(&mut self, csr: u32) {
        if self.state != State::Active {
            return;
        }

        let status = DmaChannelStatus::from_raw(csr);
        if status.has_error() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI RX DMA error: {}", status);
            self.fail();
            return;
        }

        match self.config.buffering {
            BufferMode::Circular => {
                if status.half_transfer {
                    self.notify(SpiEvent::HalfBuffer);
                }
                if status.transfer_complete {
                    self.notify(SpiEvent::FullBuffer);
                }
            }
            BufferMode::Linear => {
                if status.transfer_complete {
                    let _ = self.stop_nicely();
                    self.state = State::Ready;
                    self.notify(SpiEvent::Complete);
                }
            }
        }
    }

    /// Service an interrupt of the TX channel
    ///
    /// Completion is always reported from the RX side; only errors matter
    /// here.
    pub fn serve_dma_tx_interrupt(&mut self, csr: u32) {
        if self.state != State::Active {
            return;
        }

        let status = DmaChannelStatus::from_raw(csr);
        if status.has_error() {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI TX DMA error: {}", status);
            self.fail();
        }
    }

    /// Service the SPI peripheral interrupt
    ///
    /// Clears every clearable status flag. A receive overrun aborts the
    /// transfer and is reported as a hardware failure.
    pub fn serve_interrupt(&mut self) {
        if self.state == State::Stopped {
            return;
        }

        let sr = self.regs.sr();
        self.regs.set_ifcr(sr & SPI_IFCR_ALL);

        if sr & self.regs.ier() & SPI_SR_OVR != 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("SPI receive overrun");
            self.fail();
        }
    }

    fn fail(&mut self) {
        let _ = self.stop_abort();
        self.state = State::Ready;
        self.notify(SpiEvent::Error(IoError::HardwareFailure));
    }
}
