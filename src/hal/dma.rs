//! GPDMA channel allocator interface
//!
//! The driver does not own the DMA controller. It asks an allocator for two
//! channels when it starts and hands them back when it stops. Routing the
//! channel interrupts to [`SpiDriver::serve_dma_rx_interrupt`] and
//! [`SpiDriver::serve_dma_tx_interrupt`] is the allocator's (or the
//! board's) job.
//!
//! [`SpiDriver::serve_dma_rx_interrupt`]: crate::SpiDriver::serve_dma_rx_interrupt
//! [`SpiDriver::serve_dma_tx_interrupt`]: crate::SpiDriver::serve_dma_tx_interrupt

/// The four GPDMA words programmed by `set_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMode {
    /// CCR: priority and interrupt enables
    pub control: u32,
    /// CTR1: ports, increments and data widths
    pub tr1: u32,
    /// CTR2: request selection and direction
    pub tr2: u32,
    /// CLLR: linked-list update bits and item address (0 for one-shot)
    pub link: u32,
}

/// An allocated DMA channel
///
/// Handles are owned: holding one is the exclusive right to program the
/// channel until it is returned through [`DmaAllocator::free`].
pub trait DmaChannel {
    /// Set the source address
    fn set_source(&mut self, address: usize);

    /// Set the destination address
    fn set_destination(&mut self, address: usize);

    /// Set the number of frames to move
    fn set_transaction_size(&mut self, frames: usize);

    /// Program control, transfer attribute and link words
    fn set_mode(&mut self, mode: &ChannelMode);

    /// Enable the channel
    fn enable(&mut self);

    /// Disable the channel, waiting for it to go idle
    ///
    /// Returns the number of frames the channel did not transfer.
    fn disable(&mut self) -> usize;
}

/// DMA channel allocator shared by every driver instance
pub trait DmaAllocator {
    /// Owned channel handle
    type Channel: DmaChannel;

    /// Allocate `channel` and enable its interrupt at `irq_priority`
    ///
    /// Returns `None` when the channel is already taken.
    fn allocate(&self, channel: u32, irq_priority: u8) -> Option<Self::Channel>;

    /// Return a channel to the allocator
    fn free(&self, channel: Self::Channel);
}

impl<T: DmaAllocator + ?Sized> DmaAllocator for &T {
    type Channel = T::Channel;

    #[inline]
    fn allocate(&self, channel: u32, irq_priority: u8) -> Option<Self::Channel> {
        (**self).allocate(channel, irq_priority)
    }

    #[inline]
    fn free(&self, channel: Self::Channel) {
        (**self).free(channel);
    }
}
