//! Core driver components for the STM32 SPI v2 peripheral.
//!
//! This module contains the building blocks for configuring and operating
//! an SPI instance with GPDMA-backed transfers:
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`instance`] - Per-instance hardware description
//! - [`interrupt`] - Status decoding and driver events
//! - [`spi`] - The driver state machine and operations
//!
//! Interrupt service, the polled path and the `embedded-hal` bus are
//! further `impl` blocks on [`SpiDriver`].
//!
//! # Example
//!
//! ```ignore
//! use ph_stm32_spi::driver::{SpiConfig, SpiDriver, BufferMode};
//!
//! let config = SpiConfig::new()
//!     .with_frame_width(16)
//!     .with_buffering(BufferMode::Circular);
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod instance;
pub mod interrupt;
pub mod spi;

mod bus;
mod channels;
mod polled;
mod service;

// Re-exports for convenience
pub use config::{
    BaudDivider, BitOrder, BufferMode, ClockMode, DataWidth, DmaAttributes, Frame, Role, SpiConfig,
    State,
};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use instance::SpiInstance;
pub use interrupt::{DmaChannelStatus, SpiEvent, SpiStatus};
pub use spi::{SpiCallback, SpiDriver};
