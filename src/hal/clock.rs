//! Clock and reset control interface
//!
//! Enabling the kernel clock of an SPI instance, pulsing its reset line and
//! gating it off again are the RCC's business. The driver dispatches these
//! by instance index (see [`SpiInstance`](crate::SpiInstance)).

/// Clock and reset control for SPI instances
///
/// All methods must be idempotent.
pub trait ClockControl {
    /// Enable the peripheral clock of `instance`
    ///
    /// `in_sleep` keeps the clock running in low-power sleep modes.
    fn enable_clock(&self, instance: u8, in_sleep: bool);

    /// Disable the peripheral clock of `instance`
    fn disable_clock(&self, instance: u8);

    /// Pulse the reset line of `instance`, returning every register to its
    /// reset value
    fn reset(&self, instance: u8);
}

impl<T: ClockControl + ?Sized> ClockControl for &T {
    #[inline]
    fn enable_clock(&self, instance: u8, in_sleep: bool) {
        (**self).enable_clock(instance, in_sleep);
    }

    #[inline]
    fn disable_clock(&self, instance: u8) {
        (**self).disable_clock(instance);
    }

    #[inline]
    fn reset(&self, instance: u8) {
        (**self).reset(instance);
    }
}
