//! ISR-safe driver slot using critical sections.
//!
//! [`SharedSpi`] lets thread-mode code and the interrupt vectors reach the
//! same [`SpiDriver`]. The driver is moved in once it exists, since it
//! borrows its scratch memory and cannot be built in a `const` context.

use super::primitives::CriticalSectionCell;
use crate::driver::spi::SpiDriver;
use crate::hal::{ClockControl, DmaAllocator, SpiRegisters};

/// ISR-safe SPI driver slot using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure. Callbacks run inside that closure and
/// must not touch the slot again.
///
/// # Example
///
/// ```ignore
/// static SPI1: SharedSpi<'static, MmioSpi, &'static Gpdma, &'static Rcc> = SharedSpi::new();
///
/// SPI1.install(driver).ok();
/// SPI1.with(|spi| spi.start(SpiConfig::new())).unwrap()?;
///
/// #[interrupt]
/// fn GPDMA1_CH0() {
///     SPI1.serve_dma_rx_interrupt(GPDMA.take_status(0));
/// }
/// ```
pub struct SharedSpi<'d, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    inner: CriticalSectionCell<Option<SpiDriver<'d, P, A, C>>>,
}

impl<'d, P, A, C> SharedSpi<'d, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    /// Create an empty slot (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Move `driver` into the slot
    ///
    /// # Errors
    /// Hands `driver` back if the slot is already occupied.
    #[allow(clippy::result_large_err)]
    pub fn install(&self, driver: SpiDriver<'d, P, A, C>) -> Result<(), SpiDriver<'d, P, A, C>> {
        self.inner.with(|slot| {
            if slot.is_some() {
                return Err(driver);
            }
            *slot = Some(driver);
            Ok(())
        })
    }

    /// Move the driver out of the slot
    pub fn take(&self) -> Option<SpiDriver<'d, P, A, C>> {
        self.inner.with(Option::take)
    }

    /// Check whether a driver is installed
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Returns `None` when no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SpiDriver<'d, P, A, C>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or
    /// nothing is installed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SpiDriver<'d, P, A, C>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }

    /// RX channel interrupt entry point
    #[inline]
    pub fn serve_dma_rx_interrupt(&self, csr: u32) {
        self.with(|spi| spi.serve_dma_rx_interrupt(csr));
    }

    /// TX channel interrupt entry point
    #[inline]
    pub fn serve_dma_tx_interrupt(&self, csr: u32) {
        self.with(|spi| spi.serve_dma_tx_interrupt(csr));
    }

    /// SPI peripheral interrupt entry point
    #[inline]
    pub fn serve_interrupt(&self) {
        self.with(SpiDriver::serve_interrupt);
    }
}

impl<P, A, C> Default for SharedSpi<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    fn default() -> Self {
        Self::new()
    }
}
