//! Hardware Abstraction Layer
//!
//! The collaborators the driver consumes, specified only at their interface:
//!
//! - [`peripheral`]: SPI register block access ([`SpiRegisters`], [`MmioSpi`])
//! - [`dma`]: GPDMA channel allocation and programming
//! - [`clock`]: Clock enable/disable and reset line control
//!
//! Instance enumeration, interrupt vector wiring and the DMA controller
//! itself live outside this crate.

pub mod clock;
pub mod dma;
pub mod peripheral;

// Re-export commonly used types
pub use clock::ClockControl;
pub use dma::{ChannelMode, DmaAllocator, DmaChannel};
pub use peripheral::{MmioSpi, SpiRegisters};
