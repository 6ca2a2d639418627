//! Synchronization and Concurrency Support
//!
//! This module provides synchronization primitives and an ISR-safe home for
//! the SPI driver. It includes:
//!
//! - **Primitives** (`primitives`): Low-level synchronization types
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Async waker storage for interrupts
//!
//! - **Shared Slot** (`shared`): [`SharedSpi`], a critical-section protected
//!   driver slot with interrupt entry points
//!
//! - **Async Support** (`asynch`): [`TransferSignal`], a completion signal
//!   written from the driver callback and awaited by a task
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables `primitives` and `shared` modules
//! - `async`: Enables `asynch` module (also requires `critical-section`)
//!
//! # Example
//!
//! ```ignore
//! use ph_stm32_spi::sync::SharedSpi;
//!
//! static SPI1: SharedSpi<'static, MmioSpi, &'static Gpdma, &'static Rcc> = SharedSpi::new();
//!
//! #[interrupt]
//! fn SPI1() {
//!     SPI1.serve_interrupt();
//! }
//! ```

// Primitives module (requires critical-section)
mod primitives;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;

// Shared driver slot (requires critical-section)
mod shared;

pub use shared::SharedSpi;

// Async support (requires async feature)
#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::{TransferFuture, TransferSignal};
