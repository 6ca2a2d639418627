//! Centralized Constants
//!
//! Magic numbers shared by the driver that are not register bit fields.
//! Hardware register bit definitions remain in `register/spi.rs` and
//! `register/gpdma.rs`.

// =============================================================================
// Frame Sizes
// =============================================================================

/// Narrowest frame the SPI shift register supports, in bits
pub const MIN_FRAME_BITS: u8 = 4;

/// Widest frame the SPI shift register supports, in bits
pub const MAX_FRAME_BITS: u8 = 32;

/// Default frame width, in bits
pub const DEFAULT_FRAME_BITS: u8 = 8;

// =============================================================================
// DMA
// =============================================================================

/// Pattern transmitted while receiving or ignoring data
pub const FILLER_PATTERN: u32 = 0xFFFF_FFFF;

/// Highest GPDMA channel priority level
pub const MAX_DMA_PRIORITY: u8 = 3;

pub use super::register::gpdma::GPDMA_MAX_TRANSFER;
