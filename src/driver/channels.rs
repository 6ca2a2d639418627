//! RX/TX channel pair management
//!
//! The two channels are acquired and released together; a driver either
//! holds both or neither.

use super::error::{DmaError, DmaResult};
use super::instance::SpiInstance;
use crate::hal::{DmaAllocator, DmaChannel};
use crate::internal::dma::TransferPlan;

/// RX and TX channels bound to one driver
#[derive(Debug)]
pub(crate) struct ChannelPair<Ch: DmaChannel> {
    rx: Ch,
    tx: Ch,
}

impl<Ch: DmaChannel> ChannelPair<Ch> {
    /// Allocate both channels of `instance`
    ///
    /// If the TX channel cannot be allocated the RX channel is freed again
    /// before the error is returned.
    ///
    /// # Errors
    /// - `NoResource` - either channel is taken
    pub fn acquire<A>(dma: &A, instance: &SpiInstance) -> DmaResult<Self>
    where
        A: DmaAllocator<Channel = Ch>,
    {
        let rx = dma
            .allocate(instance.rx_channel, instance.irq_priority)
            .ok_or(DmaError::NoResource)?;

        let Some(tx) = dma.allocate(instance.tx_channel, instance.irq_priority) else {
            dma.free(rx);
            return Err(DmaError::NoResource);
        };

        Ok(Self { rx, tx })
    }

    /// Return both channels to the allocator
    pub fn release<A>(self, dma: &A)
    where
        A: DmaAllocator<Channel = Ch>,
    {
        dma.free(self.rx);
        dma.free(self.tx);
    }

    /// Point the channels at the peripheral data registers
    pub fn bind_peripheral(&mut self, rxdr: usize, txdr: usize) {
        self.rx.set_source(rxdr);
        self.tx.set_destination(txdr);
    }

    /// Program and enable both channels for `frames` frames, RX first
    pub fn program(&mut self, plan: &TransferPlan, frames: usize) {
        self.rx.set_destination(plan.rx_destination);
        self.rx.set_transaction_size(frames);
        self.rx.set_mode(&plan.rx_mode);
        self.rx.enable();

        self.tx.set_source(plan.tx_source);
        self.tx.set_transaction_size(frames);
        self.tx.set_mode(&plan.tx_mode);
        self.tx.enable();
    }

    /// Disable both channels, TX first
    ///
    /// Returns the number of frames the RX channel did not transfer.
    pub fn disable(&mut self) -> usize {
        let _ = self.tx.disable();
        self.rx.disable()
    }
}
