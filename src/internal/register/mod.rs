//! Memory-mapped register definitions for the SPI v2 and GPDMA blocks
//!
//! This module provides volatile access helpers plus the bit-field constants
//! of the two hardware blocks the driver programs. All register access is
//! volatile to ensure proper hardware interaction.

pub mod gpdma;
pub mod spi;

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

/// Read a data register with a 16-bit access
///
/// The SPI data registers pack as many frames as the access width allows, so
/// narrow frames must be read with a narrow access.
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg16(addr: usize) -> u16 {
    unsafe { core::ptr::read_volatile(addr as *const u16) }
}

/// Write a data register with a 16-bit access
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg16(addr: usize, value: u16) {
    unsafe { core::ptr::write_volatile(addr as *mut u16, value) }
}

/// Read a data register with an 8-bit access
///
/// # Safety
/// The caller must ensure the address is valid.
#[inline(always)]
pub unsafe fn read_reg8(addr: usize) -> u8 {
    unsafe { core::ptr::read_volatile(addr as *const u8) }
}

/// Write a data register with an 8-bit access
///
/// # Safety
/// The caller must ensure the address is valid.
#[inline(always)]
pub unsafe fn write_reg8(addr: usize, value: u8) {
    unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
}

// =============================================================================
// Register Access Macros
// =============================================================================

/// Generate read/write accessor methods for a register of an instance whose
/// base address lives in `self.base`.
///
/// # Example
/// ```ignore
/// impl SpiRegisters for MmioSpi {
///     reg_rw!(cr1, set_cr1, SPI_CR1_OFFSET, "Control register 1");
/// }
/// ```
macro_rules! reg_rw {
    ($read_fn:ident, $write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        fn $read_fn(&self) -> u32 {
            // SAFETY: `self.base` is a valid register block (constructor contract)
            unsafe { $crate::internal::register::read_reg(self.base + $offset) }
        }

        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        fn $write_fn(&self, value: u32) {
            // SAFETY: `self.base` is a valid register block (constructor contract)
            unsafe { $crate::internal::register::write_reg(self.base + $offset, value) }
        }
    };
}

/// Generate a read-only accessor method for a register.
macro_rules! reg_ro {
    ($read_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Read ", $doc)]
        #[inline(always)]
        fn $read_fn(&self) -> u32 {
            // SAFETY: `self.base` is a valid register block (constructor contract)
            unsafe { $crate::internal::register::read_reg(self.base + $offset) }
        }
    };
}

/// Generate a write-only accessor method for a register (flag-clear registers).
macro_rules! reg_wo {
    ($write_fn:ident, $offset:expr, $doc:expr) => {
        #[doc = concat!("Write ", $doc)]
        #[inline(always)]
        fn $write_fn(&self, value: u32) {
            // SAFETY: `self.base` is a valid register block (constructor contract)
            unsafe { $crate::internal::register::write_reg(self.base + $offset, value) }
        }
    };
}

// Export macros for use in the MMIO implementation
pub(crate) use reg_ro;
pub(crate) use reg_rw;
pub(crate) use reg_wo;
