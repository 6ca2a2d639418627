//! SPI register block access
//!
//! [`SpiRegisters`] is the seam between the driver logic and the hardware.
//! [`MmioSpi`] implements it with volatile accesses to a memory-mapped SPI
//! v2 block; host tests substitute a register model.

use crate::driver::config::DataWidth;
use crate::internal::register::spi::{
    SPI_CFG1_OFFSET, SPI_CFG2_OFFSET, SPI_CR1_OFFSET, SPI_CR2_OFFSET, SPI_IER_OFFSET,
    SPI_IFCR_OFFSET, SPI_RXDR_OFFSET, SPI_SR_OFFSET, SPI_TXDR_OFFSET,
};
use crate::internal::register::{
    read_reg, read_reg8, read_reg16, reg_ro, reg_rw, reg_wo, write_reg, write_reg8, write_reg16,
};

/// Register-level access to one SPI v2 block
pub trait SpiRegisters {
    /// Read Control Register 1
    fn cr1(&self) -> u32;
    /// Write Control Register 1
    fn set_cr1(&self, value: u32);
    /// Read Control Register 2
    fn cr2(&self) -> u32;
    /// Write Control Register 2
    fn set_cr2(&self, value: u32);
    /// Read Configuration Register 1
    fn cfg1(&self) -> u32;
    /// Write Configuration Register 1
    fn set_cfg1(&self, value: u32);
    /// Read Configuration Register 2
    fn cfg2(&self) -> u32;
    /// Write Configuration Register 2
    fn set_cfg2(&self, value: u32);
    /// Read Interrupt Enable Register
    fn ier(&self) -> u32;
    /// Write Interrupt Enable Register
    fn set_ier(&self, value: u32);
    /// Read Status Register
    fn sr(&self) -> u32;
    /// Write Interrupt/Status Flags Clear Register
    fn set_ifcr(&self, value: u32);

    /// Write one frame to TXDR with an access of `width`
    fn write_txdr(&self, width: DataWidth, frame: u32);

    /// Read one frame from RXDR with an access of `width`
    fn read_rxdr(&self, width: DataWidth) -> u32;

    /// Bus address of TXDR, the TX channel destination
    fn txdr_address(&self) -> usize;

    /// Bus address of RXDR, the RX channel source
    fn rxdr_address(&self) -> usize;
}

impl<T: SpiRegisters + ?Sized> SpiRegisters for &T {
    fn cr1(&self) -> u32 {
        (**self).cr1()
    }
    fn set_cr1(&self, value: u32) {
        (**self).set_cr1(value);
    }
    fn cr2(&self) -> u32 {
        (**self).cr2()
    }
    fn set_cr2(&self, value: u32) {
        (**self).set_cr2(value);
    }
    fn cfg1(&self) -> u32 {
        (**self).cfg1()
    }
    fn set_cfg1(&self, value: u32) {
        (**self).set_cfg1(value);
    }
    fn cfg2(&self) -> u32 {
        (**self).cfg2()
    }
    fn set_cfg2(&self, value: u32) {
        (**self).set_cfg2(value);
    }
    fn ier(&self) -> u32 {
        (**self).ier()
    }
    fn set_ier(&self, value: u32) {
        (**self).set_ier(value);
    }
    fn sr(&self) -> u32 {
        (**self).sr()
    }
    fn set_ifcr(&self, value: u32) {
        (**self).set_ifcr(value);
    }
    fn write_txdr(&self, width: DataWidth, frame: u32) {
        (**self).write_txdr(width, frame);
    }
    fn read_rxdr(&self, width: DataWidth) -> u32 {
        (**self).read_rxdr(width)
    }
    fn txdr_address(&self) -> usize {
        (**self).txdr_address()
    }
    fn rxdr_address(&self) -> usize {
        (**self).rxdr_address()
    }
}

// =============================================================================
// Memory-Mapped Implementation
// =============================================================================

/// Memory-mapped SPI v2 register block
#[derive(Debug)]
pub struct MmioSpi {
    base: usize,
}

impl MmioSpi {
    /// Wrap the register block at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the address of an SPI v2 register block, and the
    /// returned value must be the only accessor of that block.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the register block
    #[inline(always)]
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl SpiRegisters for MmioSpi {
    reg_rw!(cr1, set_cr1, SPI_CR1_OFFSET, "Control Register 1");
    reg_rw!(cr2, set_cr2, SPI_CR2_OFFSET, "Control Register 2");
    reg_rw!(cfg1, set_cfg1, SPI_CFG1_OFFSET, "Configuration Register 1");
    reg_rw!(cfg2, set_cfg2, SPI_CFG2_OFFSET, "Configuration Register 2");
    reg_rw!(ier, set_ier, SPI_IER_OFFSET, "Interrupt Enable Register");
    reg_ro!(sr, SPI_SR_OFFSET, "Status Register");
    reg_wo!(set_ifcr, SPI_IFCR_OFFSET, "Interrupt/Status Flags Clear Register");

    fn write_txdr(&self, width: DataWidth, frame: u32) {
        let addr = self.base + SPI_TXDR_OFFSET;
        // SAFETY: TXDR of a valid register block; the access width selects
        // how many frames the peripheral consumes
        unsafe {
            match width {
                DataWidth::Byte => write_reg8(addr, frame as u8),
                DataWidth::HalfWord => write_reg16(addr, frame as u16),
                DataWidth::Word => write_reg(addr, frame),
            }
        }
    }

    fn read_rxdr(&self, width: DataWidth) -> u32 {
        let addr = self.base + SPI_RXDR_OFFSET;
        // SAFETY: RXDR of a valid register block
        unsafe {
            match width {
                DataWidth::Byte => read_reg8(addr) as u32,
                DataWidth::HalfWord => read_reg16(addr) as u32,
                DataWidth::Word => read_reg(addr),
            }
        }
    }

    #[inline(always)]
    fn txdr_address(&self) -> usize {
        self.base + SPI_TXDR_OFFSET
    }

    #[inline(always)]
    fn rxdr_address(&self) -> usize {
        self.base + SPI_RXDR_OFFSET
    }
}
