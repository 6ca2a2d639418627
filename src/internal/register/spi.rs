//! SPI (v2) Register Definitions
//!
//! Layout of the SPI/I2S block found on STM32H5/H7/U5 class devices. Only
//! the registers and fields touched by the driver are listed.

#![allow(dead_code)]

// =============================================================================
// Register Offsets
// =============================================================================

/// Control Register 1 offset
pub const SPI_CR1_OFFSET: usize = 0x00;
/// Control Register 2 offset
pub const SPI_CR2_OFFSET: usize = 0x04;
/// Configuration Register 1 offset
pub const SPI_CFG1_OFFSET: usize = 0x08;
/// Configuration Register 2 offset
pub const SPI_CFG2_OFFSET: usize = 0x0C;
/// Interrupt Enable Register offset
pub const SPI_IER_OFFSET: usize = 0x10;
/// Status Register offset
pub const SPI_SR_OFFSET: usize = 0x14;
/// Interrupt/Status Flags Clear Register offset
pub const SPI_IFCR_OFFSET: usize = 0x18;
/// Transmit Data Register offset
pub const SPI_TXDR_OFFSET: usize = 0x20;
/// Receive Data Register offset
pub const SPI_RXDR_OFFSET: usize = 0x30;

// =============================================================================
// CR1 Bits
// =============================================================================

/// Serial Peripheral Enable
pub const SPI_CR1_SPE: u32 = 1 << 0;
/// Master automatic suspension in receive mode
pub const SPI_CR1_MASRX: u32 = 1 << 8;
/// Master transfer start
pub const SPI_CR1_CSTART: u32 = 1 << 9;
/// Master suspend request
pub const SPI_CR1_CSUSP: u32 = 1 << 10;
/// Internal SS signal input level
pub const SPI_CR1_SSI: u32 = 1 << 12;

// =============================================================================
// CFG1 Bits
// =============================================================================

/// Number of bits in a single frame, minus one
pub const SPI_CFG1_DSIZE_MASK: u32 = 0x1F;
/// FIFO threshold level shift
pub const SPI_CFG1_FTHLV_SHIFT: u32 = 5;
/// FIFO threshold level mask
pub const SPI_CFG1_FTHLV_MASK: u32 = 0xF << 5;
/// RX DMA request enable
pub const SPI_CFG1_RXDMAEN: u32 = 1 << 14;
/// TX DMA request enable
pub const SPI_CFG1_TXDMAEN: u32 = 1 << 15;
/// Master baud rate prescaler shift
pub const SPI_CFG1_MBR_SHIFT: u32 = 28;
/// Master baud rate prescaler mask
pub const SPI_CFG1_MBR_MASK: u32 = 0x7 << 28;

/// Both DMA request enables
pub const SPI_CFG1_DMAEN: u32 = SPI_CFG1_RXDMAEN | SPI_CFG1_TXDMAEN;

// =============================================================================
// CFG2 Bits
// =============================================================================

/// Communication mode shift
pub const SPI_CFG2_COMM_SHIFT: u32 = 17;
/// Communication mode mask (00 = full duplex)
pub const SPI_CFG2_COMM_MASK: u32 = 0x3 << 17;
/// Master configuration
pub const SPI_CFG2_MASTER: u32 = 1 << 22;
/// Data frame format (LSB first)
pub const SPI_CFG2_LSBFRST: u32 = 1 << 23;
/// Clock phase
pub const SPI_CFG2_CPHA: u32 = 1 << 24;
/// Clock polarity
pub const SPI_CFG2_CPOL: u32 = 1 << 25;
/// Software management of SS signal input
pub const SPI_CFG2_SSM: u32 = 1 << 26;
/// SS output enable
pub const SPI_CFG2_SSOE: u32 = 1 << 29;

// =============================================================================
// IER Bits
// =============================================================================

/// RXP interrupt enable
pub const SPI_IER_RXPIE: u32 = 1 << 0;
/// EOT, SUSP and TXC interrupt enable
pub const SPI_IER_EOTIE: u32 = 1 << 3;
/// Overrun interrupt enable
pub const SPI_IER_OVRIE: u32 = 1 << 6;

// =============================================================================
// SR Bits
// =============================================================================

/// RX packet available
pub const SPI_SR_RXP: u32 = 1 << 0;
/// TX packet space available
pub const SPI_SR_TXP: u32 = 1 << 1;
/// End of transfer
pub const SPI_SR_EOT: u32 = 1 << 3;
/// Underrun
pub const SPI_SR_UDR: u32 = 1 << 5;
/// Overrun
pub const SPI_SR_OVR: u32 = 1 << 6;
/// Mode fault
pub const SPI_SR_MODF: u32 = 1 << 9;
/// Suspension status
pub const SPI_SR_SUSP: u32 = 1 << 11;
/// TX FIFO transmission complete
pub const SPI_SR_TXC: u32 = 1 << 12;
/// RX FIFO packing level shift
pub const SPI_SR_RXPLVL_SHIFT: u32 = 13;
/// RX FIFO packing level mask
pub const SPI_SR_RXPLVL_MASK: u32 = 0x3 << 13;
/// RX FIFO word not empty
pub const SPI_SR_RXWNE: u32 = 1 << 15;

// =============================================================================
// IFCR Bits
// =============================================================================

/// Every flag that can be cleared through IFCR (EOTC..MODFC, SUSPC)
pub const SPI_IFCR_ALL: u32 = 0x0000_0BF8;
