//! Per-instance hardware description

use crate::hal::MmioSpi;

/// Fixed hardware resources of one SPI instance
///
/// One value per peripheral replaces a table of near-identical instance
/// blocks: the index selects the clock/reset line, the rest is handed to
/// the DMA allocator and the descriptor builder.
///
/// ```ignore
/// const SPI1: SpiInstance = SpiInstance::new(1, 0x4001_3000)
///     .with_dma_channels(0, 1)
///     .with_request_lines(6, 7)
///     .with_irq_priority(10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiInstance {
    /// Instance index passed to [`ClockControl`](crate::hal::ClockControl)
    pub index: u8,
    /// Base address of the register block
    pub base: usize,
    /// GPDMA channel requested for RX
    pub rx_channel: u32,
    /// GPDMA channel requested for TX
    pub tx_channel: u32,
    /// GPDMA request line of the RX path
    pub rx_request: u8,
    /// GPDMA request line of the TX path
    pub tx_request: u8,
    /// Interrupt priority of both DMA channels
    pub irq_priority: u8,
}

impl SpiInstance {
    /// Describe instance `index` at `base`, with every other field zero
    #[must_use]
    pub const fn new(index: u8, base: usize) -> Self {
        Self {
            index,
            base,
            rx_channel: 0,
            tx_channel: 0,
            rx_request: 0,
            tx_request: 0,
            irq_priority: 0,
        }
    }

    /// Set the RX and TX GPDMA channels
    #[must_use]
    pub const fn with_dma_channels(mut self, rx: u32, tx: u32) -> Self {
        self.rx_channel = rx;
        self.tx_channel = tx;
        self
    }

    /// Set the RX and TX request lines
    #[must_use]
    pub const fn with_request_lines(mut self, rx: u8, tx: u8) -> Self {
        self.rx_request = rx;
        self.tx_request = tx;
        self
    }

    /// Set the DMA interrupt priority
    ///
    /// Both channels share one level so neither completion can preempt the
    /// other halfway through servicing.
    #[must_use]
    pub const fn with_irq_priority(mut self, priority: u8) -> Self {
        self.irq_priority = priority;
        self
    }

    /// Memory-mapped access to this instance's registers
    ///
    /// # Safety
    ///
    /// `base` must address an SPI v2 block and the returned accessor must
    /// be the only one in use.
    pub const unsafe fn registers(&self) -> MmioSpi {
        // SAFETY: forwarded to the caller
        unsafe { MmioSpi::new(self.base) }
    }
}
