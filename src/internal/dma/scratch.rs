//! DMA scratch memory
//!
//! One word the RX channel writes discarded frames into, one word the TX
//! channel reads the filler pattern from, and the two one-word linked-list
//! items circular transfers reload their buffer addresses from.

use crate::internal::constants::FILLER_PATTERN;

/// Volatile cell wrapper for words the DMA engine reads or writes
///
/// All accesses are volatile so the compiler never caches a value the
/// DMA engine may change behind its back.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// SAFETY: accesses are single volatile operations on word-sized values,
// which are atomic on the 32-bit targets this driver runs on.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: the pointer comes from a live UnsafeCell
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write)
    #[inline(always)]
    pub fn set(&self, value: T) {
        // SAFETY: the pointer comes from a live UnsafeCell
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }

    /// Address of the value, as seen by the DMA engine
    #[inline(always)]
    pub fn address(&self) -> usize {
        self.value.get() as usize
    }
}

/// Scratch memory for one SPI driver instance
///
/// Must live in memory reachable by the GPDMA and inside the same 64 KiB
/// window as the channel's linked-list base, since circular transfers
/// address the reload items with the low 16 bits only. Place it in a
/// `static` and hand it to [`SpiDriver::new`](crate::SpiDriver::new).
///
/// ```ignore
/// static mut SCRATCH: DmaScratch = DmaScratch::new();
/// ```
#[repr(C, align(4))]
pub struct DmaScratch {
    rx_sink: VolatileCell<u32>,
    tx_source: VolatileCell<u32>,
    rx_reload: VolatileCell<u32>,
    tx_reload: VolatileCell<u32>,
}

impl DmaScratch {
    /// Create zeroed scratch memory
    pub const fn new() -> Self {
        Self {
            rx_sink: VolatileCell::new(0),
            tx_source: VolatileCell::new(FILLER_PATTERN),
            rx_reload: VolatileCell::new(0),
            tx_reload: VolatileCell::new(0),
        }
    }

    /// Clear the RX sink and restore the TX filler pattern
    pub(crate) fn reset(&self) {
        self.rx_sink.set(0);
        self.tx_source.set(FILLER_PATTERN);
    }

    /// Last frame written to the RX sink
    pub(crate) fn rx_sink(&self) -> u32 {
        self.rx_sink.get()
    }

    /// Pattern transmitted when no TX buffer is given
    pub(crate) fn tx_source(&self) -> u32 {
        self.tx_source.get()
    }

    pub(crate) fn rx_sink_address(&self) -> usize {
        self.rx_sink.address()
    }

    pub(crate) fn tx_source_address(&self) -> usize {
        self.tx_source.address()
    }

    /// Address of the linked-list item reloading the RX destination
    pub(crate) fn rx_reload_address(&self) -> usize {
        self.rx_reload.address()
    }

    /// Address of the linked-list item reloading the TX source
    pub(crate) fn tx_reload_address(&self) -> usize {
        self.tx_reload.address()
    }

    /// Destination the RX channel reloads at the end of each pass
    pub(crate) fn rx_reload(&self) -> u32 {
        self.rx_reload.get()
    }

    /// Source the TX channel reloads at the end of each pass
    pub(crate) fn tx_reload(&self) -> u32 {
        self.tx_reload.get()
    }

    pub(crate) fn set_rx_reload(&self, address: usize) {
        self.rx_reload.set(address as u32);
    }

    pub(crate) fn set_tx_reload(&self, address: usize) {
        self.tx_reload.set(address as u32);
    }
}

impl Default for DmaScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for DmaScratch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DmaScratch")
            .field("rx_sink", &self.rx_sink())
            .field("tx_source", &self.tx_source())
            .field("rx_reload", &self.rx_reload())
            .field("tx_reload", &self.tx_reload())
            .finish()
    }
}
