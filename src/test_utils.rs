//! Testing utilities and mock implementations
//!
//! This module provides mock implementations of the register block, the DMA
//! allocator and the clock controller so the SPI driver can be exercised on
//! the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::config::{DataWidth, SpiConfig, State};
use crate::driver::instance::SpiInstance;
use crate::driver::interrupt::SpiEvent;
use crate::driver::spi::SpiDriver;
use crate::hal::{ChannelMode, ClockControl, DmaAllocator, DmaChannel, SpiRegisters};
use crate::internal::dma::DmaScratch;
use crate::internal::register::spi::{
    SPI_CR1_CSTART, SPI_CR1_CSUSP, SPI_CR1_SPE, SPI_IFCR_ALL, SPI_SR_RXP, SPI_SR_RXPLVL_SHIFT,
    SPI_SR_SUSP, SPI_SR_TXP,
};

/// Fake bus address of TXDR
pub const MOCK_TXDR: usize = 0x4001_3020;
/// Fake bus address of RXDR
pub const MOCK_RXDR: usize = 0x4001_3030;

/// Instance used by the driver tests
pub const TEST_INSTANCE: SpiInstance = SpiInstance::new(1, 0x4001_3000)
    .with_dma_channels(0, 1)
    .with_request_lines(6, 7)
    .with_irq_priority(5);

// =============================================================================
// Mock SPI Registers
// =============================================================================

/// Register written through [`SpiRegisters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Cr1,
    Cr2,
    Cfg1,
    Cfg2,
    Ier,
    Ifcr,
}

/// Mock SPI register block
///
/// Models just enough of the hardware for the driver: CSUSP clears CSTART,
/// clearing SPE stops the clock, IFCR clears SR flags, and every TXDR write
/// produces one frame in the RX FIFO (the queued response, or the
/// transmitted frame looped back).
#[derive(Debug, Default)]
pub struct MockSpiRegs {
    cr1: Cell<u32>,
    cr2: Cell<u32>,
    cfg1: Cell<u32>,
    cfg2: Cell<u32>,
    ier: Cell<u32>,
    sr: Cell<u32>,
    rx_fifo: RefCell<VecDeque<u32>>,
    responses: RefCell<VecDeque<u32>>,
    tx_log: RefCell<Vec<(DataWidth, u32)>>,
    rx_log: RefCell<Vec<DataWidth>>,
    write_log: RefCell<Vec<(Reg, u32)>>,
}

impl MockSpiRegs {
    pub fn new() -> Self {
        Self {
            sr: Cell::new(SPI_SR_TXP),
            ..Self::default()
        }
    }

    /// Raise status flags
    pub fn raise(&self, flags: u32) {
        self.sr.set(self.sr.get() | flags);
    }

    /// Queue the frame received for the next TXDR write
    pub fn push_response(&self, frame: u32) {
        self.responses.borrow_mut().push_back(frame);
    }

    /// Put a frame straight into the RX FIFO
    pub fn push_rx(&self, frame: u32) {
        self.rx_fifo.borrow_mut().push_back(frame);
    }

    pub fn tx_log(&self) -> Vec<(DataWidth, u32)> {
        self.tx_log.borrow().clone()
    }

    pub fn rx_log(&self) -> Vec<DataWidth> {
        self.rx_log.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(Reg, u32)> {
        self.write_log.borrow().clone()
    }

    pub fn writes_to(&self, reg: Reg) -> Vec<u32> {
        self.write_log
            .borrow()
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Snapshot of the configuration registers (CR1, CR2, CFG1, CFG2, IER)
    pub fn snapshot(&self) -> [u32; 5] {
        [
            self.cr1.get(),
            self.cr2.get(),
            self.cfg1.get(),
            self.cfg2.get(),
            self.ier.get(),
        ]
    }

    /// Overwrite configuration registers with arbitrary values
    pub fn scramble(&self) {
        self.cr1.set(0xDEAD_0000 | SPI_CR1_CSTART);
        self.cr2.set(0x1234);
        self.cfg1.set(0xFFFF_FFFF);
        self.cfg2.set(0x5555_5555);
        self.ier.set(0x3FF);
    }

    fn log(&self, reg: Reg, value: u32) {
        self.write_log.borrow_mut().push((reg, value));
    }
}

impl SpiRegisters for MockSpiRegs {
    fn cr1(&self) -> u32 {
        self.cr1.get()
    }

    fn set_cr1(&self, value: u32) {
        self.log(Reg::Cr1, value);
        let mut value = value;
        if value & SPI_CR1_CSUSP != 0 {
            value &= !(SPI_CR1_CSUSP | SPI_CR1_CSTART);
            self.raise(SPI_SR_SUSP);
        }
        if value & SPI_CR1_SPE == 0 {
            value &= !SPI_CR1_CSTART;
        }
        self.cr1.set(value);
    }

    fn cr2(&self) -> u32 {
        self.cr2.get()
    }

    fn set_cr2(&self, value: u32) {
        self.log(Reg::Cr2, value);
        self.cr2.set(value);
    }

    fn cfg1(&self) -> u32 {
        self.cfg1.get()
    }

    fn set_cfg1(&self, value: u32) {
        self.log(Reg::Cfg1, value);
        self.cfg1.set(value);
    }

    fn cfg2(&self) -> u32 {
        self.cfg2.get()
    }

    fn set_cfg2(&self, value: u32) {
        self.log(Reg::Cfg2, value);
        self.cfg2.set(value);
    }

    fn ier(&self) -> u32 {
        self.ier.get()
    }

    fn set_ier(&self, value: u32) {
        self.log(Reg::Ier, value);
        self.ier.set(value);
    }

    fn sr(&self) -> u32 {
        let pending = self.rx_fifo.borrow().len() as u32;
        let mut sr = self.sr.get();
        if pending > 0 {
            sr |= SPI_SR_RXP | (pending.min(3) << SPI_SR_RXPLVL_SHIFT);
        }
        sr
    }

    fn set_ifcr(&self, value: u32) {
        self.log(Reg::Ifcr, value);
        self.sr.set(self.sr.get() & !(value & SPI_IFCR_ALL));
    }

    fn write_txdr(&self, width: DataWidth, frame: u32) {
        self.tx_log.borrow_mut().push((width, frame));
        let rx = self.responses.borrow_mut().pop_front().unwrap_or(frame);
        self.rx_fifo.borrow_mut().push_back(rx);
    }

    fn read_rxdr(&self, width: DataWidth) -> u32 {
        self.rx_log.borrow_mut().push(width);
        self.rx_fifo.borrow_mut().pop_front().unwrap_or(0) & width.mask()
    }

    fn txdr_address(&self) -> usize {
        MOCK_TXDR
    }

    fn rxdr_address(&self) -> usize {
        MOCK_RXDR
    }
}

// =============================================================================
// Mock DMA
// =============================================================================

/// Observable state of one mock channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelState {
    pub source: usize,
    pub destination: usize,
    pub size: usize,
    pub mode: ChannelMode,
    pub enabled: bool,
    /// Frames left; loaded from `size` on enable
    pub remaining: usize,
    pub enable_count: usize,
    pub disable_count: usize,
}

/// Channel handle given out by [`MockDma`]
#[derive(Debug)]
pub struct MockChannel {
    pub id: u32,
    state: Rc<RefCell<ChannelState>>,
}

impl DmaChannel for MockChannel {
    fn set_source(&mut self, address: usize) {
        self.state.borrow_mut().source = address;
    }

    fn set_destination(&mut self, address: usize) {
        self.state.borrow_mut().destination = address;
    }

    fn set_transaction_size(&mut self, frames: usize) {
        self.state.borrow_mut().size = frames;
    }

    fn set_mode(&mut self, mode: &ChannelMode) {
        self.state.borrow_mut().mode = *mode;
    }

    fn enable(&mut self) {
        let mut state = self.state.borrow_mut();
        state.enabled = true;
        state.remaining = state.size;
        state.enable_count += 1;
    }

    fn disable(&mut self) -> usize {
        let mut state = self.state.borrow_mut();
        state.enabled = false;
        state.disable_count += 1;
        state.remaining
    }
}

/// Mock GPDMA allocator
///
/// Channels keep their state after being freed so tests can inspect the
/// last programming.
#[derive(Debug, Default)]
pub struct MockDma {
    channels: RefCell<Vec<(u32, Rc<RefCell<ChannelState>>)>>,
    allocated: RefCell<Vec<u32>>,
    fail_channel: Cell<Option<u32>>,
    allocate_calls: Cell<usize>,
    free_calls: Cell<usize>,
    last_irq_priority: Cell<Option<u8>>,
}

impl MockDma {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make allocation of `channel` fail
    pub fn fail_on(&self, channel: u32) {
        self.fail_channel.set(Some(channel));
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.borrow().len()
    }

    pub fn allocate_calls(&self) -> usize {
        self.allocate_calls.get()
    }

    pub fn free_calls(&self) -> usize {
        self.free_calls.get()
    }

    pub fn last_irq_priority(&self) -> Option<u8> {
        self.last_irq_priority.get()
    }

    fn slot(&self, id: u32) -> Rc<RefCell<ChannelState>> {
        let mut channels = self.channels.borrow_mut();
        if let Some((_, state)) = channels.iter().find(|(c, _)| *c == id) {
            return state.clone();
        }
        let state = Rc::new(RefCell::new(ChannelState::default()));
        channels.push((id, state.clone()));
        state
    }

    /// Current state of `channel`
    pub fn channel(&self, id: u32) -> ChannelState {
        *self.slot(id).borrow()
    }

    /// Simulate progress: `remaining` frames left on `channel`
    pub fn set_remaining(&self, id: u32, remaining: usize) {
        self.slot(id).borrow_mut().remaining = remaining;
    }
}

impl DmaAllocator for MockDma {
    type Channel = MockChannel;

    fn allocate(&self, channel: u32, irq_priority: u8) -> Option<MockChannel> {
        self.allocate_calls.set(self.allocate_calls.get() + 1);
        if self.fail_channel.get() == Some(channel) || self.allocated.borrow().contains(&channel) {
            return None;
        }
        self.allocated.borrow_mut().push(channel);
        self.last_irq_priority.set(Some(irq_priority));
        Some(MockChannel {
            id: channel,
            state: self.slot(channel),
        })
    }

    fn free(&self, channel: MockChannel) {
        self.free_calls.set(self.free_calls.get() + 1);
        self.allocated.borrow_mut().retain(|c| *c != channel.id);
    }
}

// =============================================================================
// Mock Clock
// =============================================================================

/// Call made on [`MockClock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCall {
    Enable(u8, bool),
    Disable(u8),
    Reset(u8),
}

/// Mock clock/reset controller recording every call
#[derive(Debug, Default)]
pub struct MockClock {
    calls: RefCell<Vec<ClockCall>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ClockCall> {
        self.calls.borrow().clone()
    }

    pub fn resets(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ClockCall::Reset(_)))
            .count()
    }
}

impl ClockControl for MockClock {
    fn enable_clock(&self, instance: u8, in_sleep: bool) {
        self.calls
            .borrow_mut()
            .push(ClockCall::Enable(instance, in_sleep));
    }

    fn disable_clock(&self, instance: u8) {
        self.calls.borrow_mut().push(ClockCall::Disable(instance));
    }

    fn reset(&self, instance: u8) {
        self.calls.borrow_mut().push(ClockCall::Reset(instance));
    }
}

// =============================================================================
// Test Fixture
// =============================================================================

/// Driver type built from the mocks
pub type MockDriver<'d> = SpiDriver<'d, &'d MockSpiRegs, &'d MockDma, &'d MockClock>;

/// Mocks for one driver
///
/// The scratch memory is passed separately so the mocks stay observable
/// while the driver borrows it.
#[derive(Debug, Default)]
pub struct Fixture {
    pub regs: MockSpiRegs,
    pub dma: MockDma,
    pub clock: MockClock,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            regs: MockSpiRegs::new(),
            dma: MockDma::new(),
            clock: MockClock::new(),
        }
    }

    /// Driver in `Stopped` state
    pub fn driver<'d>(&'d self, scratch: &'d mut DmaScratch) -> MockDriver<'d> {
        SpiDriver::new(&self.regs, &self.dma, &self.clock, TEST_INSTANCE, scratch)
    }

    /// Driver started with `config`, recording events
    pub fn started<'d>(&'d self, scratch: &'d mut DmaScratch, config: SpiConfig) -> MockDriver<'d> {
        clear_events();
        let mut spi = self.driver(scratch);
        spi.set_callback(record_event);
        assert_eq!(spi.start(config), Ok(()));
        spi
    }
}

// =============================================================================
// Event Recorder
// =============================================================================

std::thread_local! {
    static EVENTS: RefCell<Vec<(SpiEvent, State)>> = const { RefCell::new(Vec::new()) };
}

/// Driver callback that records each event with the state it observed
pub fn record_event(spi: &mut MockDriver<'_>, event: SpiEvent) {
    let state = spi.state();
    EVENTS.with(|events| events.borrow_mut().push((event, state)));
}

/// Events recorded on this thread
pub fn events() -> Vec<(SpiEvent, State)> {
    EVENTS.with(|events| events.borrow().clone())
}

pub fn clear_events() {
    EVENTS.with(|events| events.borrow_mut().clear());
}

// =============================================================================
// Test Waker
// =============================================================================

/// Counts how often a [`test_waker`] was woken
#[cfg(feature = "async")]
pub struct WakeCounter {
    count: std::sync::atomic::AtomicUsize,
}

#[cfg(feature = "async")]
impl WakeCounter {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            count: std::sync::atomic::AtomicUsize::new(0),
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Waker that increments `counter` on every wake
#[cfg(feature = "async")]
pub fn test_waker(counter: std::sync::Arc<WakeCounter>) -> core::task::Waker {
    use core::task::{RawWaker, RawWakerVTable, Waker};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    fn clone_fn(ptr: *const ()) -> RawWaker {
        // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
        let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
        let cloned = arc.clone();
        core::mem::forget(arc);
        RawWaker::new(Arc::into_raw(cloned) as *const (), &VTABLE)
    }

    fn wake_fn(ptr: *const ()) {
        // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
        let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
        arc.count.fetch_add(1, Ordering::SeqCst);
    }

    fn wake_by_ref_fn(ptr: *const ()) {
        // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
        let arc = unsafe { Arc::from_raw(ptr as *const WakeCounter) };
        arc.count.fetch_add(1, Ordering::SeqCst);
        core::mem::forget(arc);
    }

    fn drop_fn(ptr: *const ()) {
        // SAFETY: `ptr` originates from `Arc::into_raw` in this helper.
        unsafe {
            drop(Arc::from_raw(ptr as *const WakeCounter));
        }
    }

    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone_fn, wake_fn, wake_by_ref_fn, drop_fn);

    let raw = RawWaker::new(Arc::into_raw(counter) as *const (), &VTABLE);
    // SAFETY: `raw` is built from a valid vtable and an `Arc` pointer.
    unsafe { Waker::from_raw(raw) }
}
