//! SPI driver core: lifecycle, asynchronous operations and stop strategies

use super::channels::ChannelPair;
use super::config::{Frame, Role, SpiConfig, State};
use super::error::{IoError, IoResult, Result};
use super::instance::SpiInstance;
use super::interrupt::{SpiEvent, SpiStatus};
use crate::hal::{ClockControl, DmaAllocator, SpiRegisters};
use crate::internal::constants::GPDMA_MAX_TRANSFER;
use crate::internal::dma::{DescriptorBuilder, DmaScratch, Operation};
use crate::internal::register::spi::{
    SPI_CFG1_DMAEN, SPI_CFG1_FTHLV_MASK, SPI_CFG2_COMM_MASK, SPI_CFG2_MASTER, SPI_CFG2_SSOE,
    SPI_CR1_CSTART, SPI_CR1_CSUSP, SPI_CR1_MASRX, SPI_CR1_SPE, SPI_IER_OVRIE,
};

/// Callback invoked from interrupt context
///
/// Receives the driver so it can inspect state or issue the next operation.
pub type SpiCallback<'d, P, A, C> = fn(&mut SpiDriver<'d, P, A, C>, SpiEvent);

/// DMA-backed SPI driver for one peripheral instance
///
/// # Type Parameters
/// * `P` - Register block access
/// * `A` - GPDMA channel allocator
/// * `C` - Clock and reset control
///
/// # Example
/// ```ignore
/// static mut SCRATCH: DmaScratch = DmaScratch::new();
///
/// let mut spi = SpiDriver::new(
///     unsafe { SPI1.registers() },
///     &GPDMA,
///     &RCC,
///     SPI1,
///     unsafe { &mut *core::ptr::addr_of_mut!(SCRATCH) },
/// );
/// spi.set_callback(on_spi_event);
/// spi.start(SpiConfig::new().with_frame_width(16))?;
/// spi.ignore(32)?;
/// ```
///
/// # Module Organization
///
/// - Lifecycle and operations (this module)
/// - [`service`](super::service): interrupt service routines
/// - [`polled`](super::polled): single-frame exchange without DMA
/// - [`bus`](super::bus): blocking `embedded_hal::spi::SpiBus`
pub struct SpiDriver<'d, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    pub(super) regs: P,
    dma: A,
    clock: C,
    instance: SpiInstance,
    scratch: &'d mut DmaScratch,
    pub(super) config: SpiConfig,
    descriptors: DescriptorBuilder,
    channels: Option<ChannelPair<A::Channel>>,
    pub(super) state: State,
    callback: Option<SpiCallback<'d, P, A, C>>,
}

impl<'d, P, A, C> SpiDriver<'d, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    /// Create a driver in the `Stopped` state
    ///
    /// Nothing is touched until [`start`](Self::start).
    pub fn new(regs: P, dma: A, clock: C, instance: SpiInstance, scratch: &'d mut DmaScratch) -> Self {
        let config = SpiConfig::new();
        Self {
            regs,
            dma,
            clock,
            descriptors: DescriptorBuilder::new(&config, instance.rx_request, instance.tx_request),
            instance,
            scratch,
            config,
            channels: None,
            state: State::Stopped,
            callback: None,
        }
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the active configuration
    #[inline(always)]
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Get the instance description
    #[inline(always)]
    pub fn instance(&self) -> &SpiInstance {
        &self.instance
    }

    /// Check whether a DMA transfer is in flight
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }

    /// Install the event callback
    pub fn set_callback(&mut self, callback: SpiCallback<'d, P, A, C>) {
        self.callback = Some(callback);
    }

    /// Remove the event callback
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    #[cfg(test)]
    pub(crate) fn scratch(&self) -> &DmaScratch {
        &*self.scratch
    }

    #[cfg(test)]
    pub(crate) fn holds_channels(&self) -> bool {
        self.channels.is_some()
    }

    // =========================================================================
    // Start / Stop
    // =========================================================================

    /// Configure the peripheral and bind the DMA channels
    ///
    /// From `Stopped` this allocates both channels, enables the peripheral
    /// clock and pulses its reset line. From `Ready` the channels are kept
    /// and only the configuration is applied.
    ///
    /// # Errors
    /// - `Config` - the configuration is outside hardware limits
    /// - `NoResource` - a DMA channel could not be allocated; nothing is held
    pub fn start(&mut self, config: SpiConfig) -> Result<()> {
        config.validate()?;
        debug_assert!(self.state != State::Active, "start while a transfer is active");

        self.scratch.reset();

        if self.state == State::Stopped {
            let channels = match ChannelPair::acquire(&self.dma, &self.instance) {
                Ok(channels) => channels,
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("SPI{}: DMA channel allocation failed", self.instance.index);
                    return Err(e.into());
                }
            };
            self.channels = Some(channels);

            self.clock.enable_clock(self.instance.index, true);
            self.clock.reset(self.instance.index);
        }

        self.config = config;
        self.descriptors = DescriptorBuilder::new(
            &self.config,
            self.instance.rx_request,
            self.instance.tx_request,
        );

        // Peripheral side of both channels is fixed for the binding
        let (rxdr, txdr) = (self.regs.rxdr_address(), self.regs.txdr_address());
        if let Some(channels) = self.channels.as_mut() {
            channels.bind_peripheral(rxdr, txdr);
        }

        self.configure();
        self.state = State::Ready;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "SPI{} started: {} bit frames, {}, {}",
            self.instance.index,
            self.config.frame_width,
            self.config.role,
            self.config.buffering
        );

        Ok(())
    }

    /// Quiesce the peripheral, release the channels and gate its clock
    ///
    /// Does nothing when already `Stopped`.
    pub fn stop(&mut self) {
        if self.state == State::Stopped {
            return;
        }

        // Covers a caller that never waited for the last transfer
        let _ = self.stop_abort();

        if let Some(channels) = self.channels.take() {
            channels.release(&self.dma);
        }
        self.clock.disable_clock(self.instance.index);
        self.state = State::Stopped;

        #[cfg(feature = "defmt")]
        defmt::info!("SPI{} stopped", self.instance.index);
    }

    /// Stop the current transfer gracefully
    ///
    /// Disables both channels and suspends clock generation. A slave has no
    /// clean way to stop and is aborted instead. Leaves the driver `Ready`.
    ///
    /// Returns the number of frames the RX channel did not transfer.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    pub fn stop_transfer(&mut self) -> IoResult<usize> {
        self.ensure_started()?;
        let remaining = self.stop_nicely();
        self.state = State::Ready;
        Ok(remaining)
    }

    /// Abort the current transfer
    ///
    /// Disables both channels, resets the peripheral and reconfigures it as
    /// [`start`](Self::start) does. Frames in flight are lost. Leaves the
    /// driver `Ready`.
    ///
    /// Returns the number of frames the RX channel did not transfer.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    pub fn abort(&mut self) -> IoResult<usize> {
        self.ensure_started()?;
        let remaining = self.stop_abort();
        self.state = State::Ready;
        Ok(remaining)
    }

    // =========================================================================
    // Asynchronous Operations
    // =========================================================================

    /// Clock out `n` filler frames and discard what is received
    ///
    /// Completion is reported through the callback.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    ///
    /// # Panics
    /// In debug builds, if a transfer is active, `n` exceeds the GPDMA limit
    /// or the RX FIFO is not empty.
    pub fn ignore(&mut self, n: usize) -> Result<()> {
        self.ensure_started()?;
        self.begin(Operation::Ignore, n);
        Ok(())
    }

    /// Transmit `tx`, discarding received frames
    ///
    /// # Safety
    ///
    /// `tx` must stay valid and unmodified until the transfer completes or
    /// is stopped. In circular mode that is until it is stopped.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    ///
    /// # Panics
    /// If `W` does not match the configured frame width; in debug builds on
    /// the same conditions as [`ignore`](Self::ignore).
    pub unsafe fn send<W: Frame>(&mut self, tx: &[W]) -> Result<()> {
        self.ensure_started()?;
        self.check_width::<W>();
        self.begin(
            Operation::Send {
                tx: tx.as_ptr() as usize,
            },
            tx.len(),
        );
        Ok(())
    }

    /// Receive into `rx` while transmitting the filler pattern
    ///
    /// # Safety
    ///
    /// `rx` must stay valid and must not be accessed until the transfer
    /// completes or is stopped.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    ///
    /// # Panics
    /// As for [`send`](Self::send).
    pub unsafe fn receive<W: Frame>(&mut self, rx: &mut [W]) -> Result<()> {
        self.ensure_started()?;
        self.check_width::<W>();
        self.begin(
            Operation::Receive {
                rx: rx.as_mut_ptr() as usize,
            },
            rx.len(),
        );
        Ok(())
    }

    /// Transmit `tx` and receive into `rx` simultaneously
    ///
    /// # Safety
    ///
    /// Both buffers must stay valid until the transfer completes or is
    /// stopped; `rx` must not be accessed in that time.
    ///
    /// # Errors
    /// - `InvalidState` - the driver is stopped
    ///
    /// # Panics
    /// If the buffers differ in length, otherwise as for [`send`](Self::send).
    pub unsafe fn exchange<W: Frame>(&mut self, tx: &[W], rx: &mut [W]) -> Result<()> {
        self.ensure_started()?;
        self.check_width::<W>();
        assert_eq!(tx.len(), rx.len(), "exchange buffers differ in length");
        self.begin(
            Operation::Exchange {
                tx: tx.as_ptr() as usize,
                rx: rx.as_mut_ptr() as usize,
            },
            rx.len(),
        );
        Ok(())
    }

    /// Assert the slave select line
    ///
    /// Chip select is handled outside the driver; this is a no-op.
    #[inline]
    pub fn select(&mut self) {}

    /// Deassert the slave select line
    ///
    /// Chip select is handled outside the driver; this is a no-op.
    #[inline]
    pub fn unselect(&mut self) {}

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_started(&self) -> IoResult<()> {
        if self.state == State::Stopped {
            return Err(IoError::InvalidState);
        }
        Ok(())
    }

    fn check_width<W: Frame>(&self) {
        assert_eq!(
            W::WIDTH,
            self.config.data_width(),
            "buffer element does not match the frame width"
        );
    }

    /// Program both channels and start clocking
    fn begin(&mut self, op: Operation, n: usize) {
        debug_assert!(self.state != State::Active, "transfer already active");
        debug_assert!(n <= GPDMA_MAX_TRANSFER, "unsupported GPDMA transfer size");
        debug_assert!(
            SpiStatus::from_raw(self.regs.sr()).rx_fifo_empty(),
            "RX FIFO not empty"
        );

        let plan = self.descriptors.build(op, &*self.scratch);
        let (rxdr, txdr) = (self.regs.rxdr_address(), self.regs.txdr_address());
        let Some(channels) = self.channels.as_mut() else {
            return;
        };

        self.state = State::Active;
        channels.bind_peripheral(rxdr, txdr);
        channels.program(&plan, n);
        self.resume();
    }

    /// Reset-state configuration: DMA requests on, overrun interrupt on
    pub(super) fn configure(&self) {
        let regs = &self.regs;

        regs.set_cr1(0);
        regs.set_cr2(0);
        regs.set_ier(SPI_IER_OVRIE);
        regs.set_ifcr(u32::MAX);
        regs.set_cfg1((self.config.cfg1() & !SPI_CFG1_FTHLV_MASK) | SPI_CFG1_DMAEN);

        let cfg2 = match self.config.role {
            Role::Master => self.config.cfg2() | SPI_CFG2_MASTER | SPI_CFG2_SSOE,
            Role::Slave => self.config.cfg2(),
        };
        regs.set_cfg2(cfg2 & !SPI_CFG2_COMM_MASK);

        regs.set_cr1(SPI_CR1_MASRX | SPI_CR1_SPE);
    }

    /// Start clock generation (master only)
    pub(super) fn resume(&self) {
        if self.config.generates_clock() {
            self.regs.set_cr1(self.regs.cr1() | SPI_CR1_CSTART);
        }
    }

    /// Suspend clock generation and wait for it to stop (master only)
    pub(super) fn suspend(&self) {
        if self.config.generates_clock() {
            self.regs.set_cr1(self.regs.cr1() | SPI_CR1_CSUSP);
            while self.regs.cr1() & SPI_CR1_CSTART != 0 {
                core::hint::spin_loop();
            }
        }
        self.regs.set_ifcr(u32::MAX);
    }

    /// Disable both channels, reset and reconfigure the peripheral
    pub(super) fn stop_abort(&mut self) -> usize {
        let remaining = self.channels.as_mut().map_or(0, ChannelPair::disable);

        self.clock.reset(self.instance.index);
        self.configure();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "SPI{} aborted, {} frames not transferred",
            self.instance.index,
            remaining
        );

        remaining
    }

    /// Disable both channels then suspend the clock; aborts a slave
    pub(super) fn stop_nicely(&mut self) -> usize {
        if !self.config.generates_clock() {
            return self.stop_abort();
        }

        let remaining = self.channels.as_mut().map_or(0, ChannelPair::disable);
        self.suspend();
        remaining
    }

    /// Invoke the callback, if any
    pub(super) fn notify(&mut self, event: SpiEvent) {
        if let Some(callback) = self.callback {
            callback(self, event);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
