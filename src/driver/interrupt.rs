//! Interrupt status decoding for the SPI driver.
//!
//! [`DmaChannelStatus`] parses the GPDMA channel status word handed to the
//! DMA service routines, [`SpiStatus`] parses the SPI status register, and
//! [`SpiEvent`] is what the driver reports to its callback.

use super::error::IoError;
use crate::internal::register::gpdma::csr;
use crate::internal::register::spi::{
    SPI_SR_EOT, SPI_SR_OVR, SPI_SR_RXP, SPI_SR_RXPLVL_MASK, SPI_SR_RXPLVL_SHIFT, SPI_SR_SUSP,
    SPI_SR_TXP,
};

// =============================================================================
// DMA Channel Status
// =============================================================================

/// Flags parsed from a GPDMA channel status word.
///
/// # Example
///
/// ```ignore
/// let status = DmaChannelStatus::from_raw(csr);
/// if status.has_error() {
///     // abort
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaChannelStatus {
    /// Transfer complete (end of a pass in circular mode)
    pub transfer_complete: bool,
    /// Half of the transaction transferred
    pub half_transfer: bool,
    /// Bus error on a data transfer
    pub transfer_error: bool,
    /// Bus error while loading a linked-list item
    pub link_error: bool,
    /// Invalid channel programming
    pub user_setting_error: bool,
    /// Trigger arrived while the previous one was pending
    pub trigger_overrun: bool,
}

impl DmaChannelStatus {
    /// Create from a raw CSR value
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            transfer_complete: (status & csr::TCF) != 0,
            half_transfer: (status & csr::HTF) != 0,
            transfer_error: (status & csr::DTEF) != 0,
            link_error: (status & csr::ULEF) != 0,
            user_setting_error: (status & csr::USEF) != 0,
            trigger_overrun: (status & csr::TOF) != 0,
        }
    }

    /// Convert back to raw CSR bits (write-1-to-clear layout)
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.transfer_complete {
            val |= csr::TCF;
        }
        if self.half_transfer {
            val |= csr::HTF;
        }
        if self.transfer_error {
            val |= csr::DTEF;
        }
        if self.link_error {
            val |= csr::ULEF;
        }
        if self.user_setting_error {
            val |= csr::USEF;
        }
        if self.trigger_overrun {
            val |= csr::TOF;
        }
        val
    }

    /// Check if any error flag is set
    #[inline]
    pub fn has_error(&self) -> bool {
        self.transfer_error || self.link_error || self.user_setting_error || self.trigger_overrun
    }
}

// =============================================================================
// SPI Status
// =============================================================================

/// Flags parsed from the SPI status register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiStatus {
    /// RX FIFO holds at least one packet
    pub rx_packet: bool,
    /// TX FIFO has room for a packet
    pub tx_packet: bool,
    /// End of transfer
    pub end_of_transfer: bool,
    /// Data arrived while the RX FIFO was full
    pub overrun: bool,
    /// Master transfer suspended
    pub suspended: bool,
    /// Frames left in the RX FIFO below one packet (0..=3)
    pub rx_fifo_level: u8,
}

impl SpiStatus {
    /// Create from a raw SR value
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            rx_packet: (status & SPI_SR_RXP) != 0,
            tx_packet: (status & SPI_SR_TXP) != 0,
            end_of_transfer: (status & SPI_SR_EOT) != 0,
            overrun: (status & SPI_SR_OVR) != 0,
            suspended: (status & SPI_SR_SUSP) != 0,
            rx_fifo_level: ((status & SPI_SR_RXPLVL_MASK) >> SPI_SR_RXPLVL_SHIFT) as u8,
        }
    }

    /// Convert back to raw SR bits
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = (u32::from(self.rx_fifo_level) << SPI_SR_RXPLVL_SHIFT) & SPI_SR_RXPLVL_MASK;
        if self.rx_packet {
            val |= SPI_SR_RXP;
        }
        if self.tx_packet {
            val |= SPI_SR_TXP;
        }
        if self.end_of_transfer {
            val |= SPI_SR_EOT;
        }
        if self.overrun {
            val |= SPI_SR_OVR;
        }
        if self.suspended {
            val |= SPI_SR_SUSP;
        }
        val
    }

    /// Check that no received frame is waiting
    #[inline]
    pub fn rx_fifo_empty(&self) -> bool {
        self.rx_fifo_level == 0
    }
}

// =============================================================================
// Driver Events
// =============================================================================

/// Event reported to the driver callback
///
/// The callback runs in interrupt context, after the hardware has been
/// quiesced for the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiEvent {
    /// Linear transfer finished; the driver is back in `Ready`
    Complete,
    /// First half of the circular buffer transferred
    HalfBuffer,
    /// Second half of the circular buffer transferred
    FullBuffer,
    /// Transfer aborted; the peripheral was reset and the driver is `Ready`
    Error(IoError),
}

// =============================================================================
// Unit Tests
// =============================================================================
