//! Async/await support for SPI transfers.
//!
//! The driver reports completion through a plain callback. [`TransferSignal`]
//! bridges that to a task: the callback stores the event and wakes the
//! waiting future.
//!
//! # Example
//!
//! ```ignore
//! static SPI1_DONE: TransferSignal = TransferSignal::new();
//!
//! fn on_event(_: &mut Spi1, event: SpiEvent) {
//!     SPI1_DONE.signal(event);
//! }
//!
//! async fn read_block(buf: &'static mut [u16]) -> IoResult<()> {
//!     SPI1_DONE.reset();
//!     SPI1.with(|spi| unsafe { spi.receive(buf) }).unwrap()?;
//!     SPI1_DONE.wait_result().await?;
//!     Ok(())
//! }
//! ```

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use super::primitives::{AtomicWaker, CriticalSectionCell};
use crate::driver::error::IoResult;
use crate::driver::interrupt::SpiEvent;

/// Single-slot event channel from the driver callback to one task
///
/// A newer event overwrites one that was not yet taken, so in circular
/// mode only the latest half/full notification is observed.
pub struct TransferSignal {
    event: CriticalSectionCell<Option<SpiEvent>>,
    waker: AtomicWaker,
}

impl TransferSignal {
    /// Create an empty signal (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            event: CriticalSectionCell::new(None),
            waker: AtomicWaker::new(),
        }
    }

    /// Store `event` and wake the waiting task
    ///
    /// Call from the driver callback.
    pub fn signal(&self, event: SpiEvent) {
        self.event.with(|slot| *slot = Some(event));
        self.waker.wake();
    }

    /// Drop any pending event
    pub fn reset(&self) {
        self.event.with(|slot| *slot = None);
    }

    /// Take the pending event without waiting
    pub fn try_take(&self) -> Option<SpiEvent> {
        self.event.with(Option::take)
    }

    /// Check whether an event is pending
    pub fn is_signaled(&self) -> bool {
        self.event.with_ref(Option::is_some)
    }

    /// Wait for the next event
    pub fn wait(&self) -> TransferFuture<'_> {
        TransferFuture { signal: self }
    }

    /// Wait for the next event, turning a failure report into an error
    ///
    /// # Errors
    /// - `HardwareFailure` - the transfer was aborted
    pub async fn wait_result(&self) -> IoResult<SpiEvent> {
        match self.wait().await {
            SpiEvent::Error(e) => Err(e),
            event => Ok(event),
        }
    }
}

impl Default for TransferSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`TransferSignal::wait`].
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct TransferFuture<'a> {
    signal: &'a TransferSignal,
}

impl Future for TransferFuture<'_> {
    type Output = SpiEvent;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(event) = self.signal.try_take() {
            return Poll::Ready(event);
        }

        self.signal.waker.register(cx.waker());

        // An event signalled before registration would otherwise be missed
        match self.signal.try_take() {
            Some(event) => Poll::Ready(event),
            None => Poll::Pending,
        }
    }
}
