//! STM32 SPI v2 Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the STM32 SPI (v2) peripheral with
//! transfers carried by a pair of GPDMA channels.
//!
//! Operations are started from thread mode and complete in interrupt
//! context, where the driver reports [`SpiEvent`]s to a callback. A polled
//! single-frame path and a blocking `embedded-hal` `SpiBus` cover short
//! exchanges without DMA.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): state machine, DMA operations, interrupt
//!    service, polled path
//! 2. **HAL Layer** ([`hal`]): the traits the platform implements for
//!    registers, GPDMA channel allocation and clock/reset control
//! 3. **Sync Layer** (`sync`): ISR-safe driver slot and async completion
//!    signal
//!
//! ## Hardware Model
//!
//! - **SPI v2**: FIFO-based SPI with CSTART/CSUSP master transfer control
//! - **GPDMA**: linear transfers; circular buffers via one-word linked-list
//!   items that reload the buffer address at the end of each pass
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and lifecycle logging
//! - `critical-section`: Enable ISR-safe `SharedSpi` wrapper
//! - `async`: Enable the waker-based `TransferSignal`
//!
//! # Example
//!
//! ```ignore
//! use ph_stm32_spi::{BufferMode, DmaScratch, SpiConfig, SpiDriver, SpiEvent, SpiInstance};
//!
//! const SPI1: SpiInstance = SpiInstance::new(1, 0x4001_3000)
//!     .with_dma_channels(0, 1)
//!     .with_request_lines(6, 7)
//!     .with_irq_priority(10);
//!
//! static mut SCRATCH: DmaScratch = DmaScratch::new();
//!
//! let mut spi = SpiDriver::new(
//!     unsafe { SPI1.registers() },
//!     &GPDMA,
//!     &RCC,
//!     SPI1,
//!     unsafe { &mut *core::ptr::addr_of_mut!(SCRATCH) },
//! );
//! spi.set_callback(|_spi, event| {
//!     if event == SpiEvent::Complete {
//!         // buffer is ready
//!     }
//! });
//!
//! spi.start(SpiConfig::new().with_frame_width(16))?;
//! unsafe { spi.exchange(&TX_BUF, &mut RX_BUF)? };
//! ```
//!
//! # Memory Requirements
//!
//! Each driver needs a [`DmaScratch`] (16 bytes) in GPDMA-reachable memory.
//! Buffers handed to asynchronous operations must stay valid until the
//! transfer completes or is stopped.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; thresholds and config are in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{
    BaudDivider, BitOrder, BufferMode, ClockMode, DataWidth, DmaAttributes, Frame, Role, SpiConfig,
    State,
};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result,
};
pub use driver::instance::SpiInstance;
pub use driver::interrupt::{DmaChannelStatus, SpiEvent, SpiStatus};
pub use driver::spi::{SpiCallback, SpiDriver};
pub use hal::{ChannelMode, ClockControl, DmaAllocator, DmaChannel, MmioSpi, SpiRegisters};
pub use internal::dma::DmaScratch;

/// Low-level register layouts for advanced use.
///
/// Platform code implementing [`DmaChannel`] writes the [`ChannelMode`]
/// words into the GPDMA channel registers; the bit definitions here
/// describe them.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Use only if you fully
/// understand the SPI v2 and GPDMA hardware and accept responsibility for
/// correct sequencing and synchronization.
pub mod unsafe_registers {
    pub use crate::internal::register::{gpdma, spi};
}

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedSpi;

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub use sync::asynch::{TransferFuture, TransferSignal};

/// Shared driver constants.
pub mod constants {
    pub use crate::internal::constants::{
        // Frame widths
        DEFAULT_FRAME_BITS,
        // Filler transmitted when no TX buffer is given
        FILLER_PATTERN,
        // Largest transaction one channel can carry
        GPDMA_MAX_TRANSFER,
        MAX_DMA_PRIORITY,
        MAX_FRAME_BITS,
        MIN_FRAME_BITS,
    };
}
