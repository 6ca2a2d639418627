//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives used by the shared driver slot and the async
//! completion signal.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for mutable access
/// from both thread mode and interrupt handlers. Shareable between them
/// (`Sync`) whenever `T: Send`.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    ///
    /// # Panics
    /// If called again from inside `f` on the same cell.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }

    /// Execute a closure with immutable access.
    #[cfg(feature = "async")]
    #[inline]
    pub fn with_ref<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| {
            let value = self.inner.borrow_ref(cs);
            f(&value)
        })
    }
}

impl<T: Default> Default for CriticalSectionCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Interrupt-safe waker storage.
///
/// Register from a future's `poll`, wake from the driver callback.
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Create a new empty waker (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Register a waker to be woken later.
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| match slot {
            Some(existing) if existing.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake the registered waker, if any (clears the stored waker).
    #[inline]
    pub fn wake(&self) {
        // Woken outside the critical section
        if let Some(waker) = self.waker.with(Option::take) {
            waker.wake();
        }
    }

    /// Check if a waker is currently registered.
    pub fn is_registered(&self) -> bool {
        self.waker.with_ref(Option::is_some)
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "async")]
    use crate::test_utils::{WakeCounter, test_waker};

    #[test]
    fn critical_section_cell_with_mutates() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        cell.with(|v| *v += 10);
        assert_eq!(cell.with(|v| *v), 10);
    }

    #[test]
    fn critical_section_cell_with_returns_value() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(42);
        assert_eq!(cell.with(|v| *v * 2), 84);
    }

    #[test]
    fn critical_section_cell_try_with_succeeds() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(42);
        assert_eq!(cell.try_with(|v| *v), Some(42));
    }

    #[test]
    fn critical_section_cell_try_with_reentrant_fails() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(1);
        let inner = cell.with(|_| cell.try_with(|v| *v));
        assert_eq!(inner, None);
    }

    #[test]
    fn critical_section_cell_default() {
        let cell: CriticalSectionCell<Option<u8>> = CriticalSectionCell::default();
        assert_eq!(cell.with(|v| *v), None);
    }

    #[test]
    fn critical_section_cell_static_usage() {
        static CELL: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
        CELL.with(|v| *v = 100);
        assert_eq!(CELL.with(|v| *v), 100);
    }

    #[cfg(feature = "async")]
    #[test]
    fn critical_section_cell_with_ref_reads() {
        let cell: CriticalSectionCell<u32> = CriticalSectionCell::new(42);
        assert_eq!(cell.with_ref(|v| *v), 42);
    }

    #[cfg(feature = "async")]
    #[test]
    fn atomic_waker_new_is_empty() {
        assert!(!AtomicWaker::new().is_registered());
        assert!(!AtomicWaker::default().is_registered());
    }

    #[cfg(feature = "async")]
    #[test]
    fn atomic_waker_wake_calls_and_clears() {
        let atomic_waker = AtomicWaker::new();
        let counter = WakeCounter::new();
        atomic_waker.register(&test_waker(counter.clone()));
        assert!(atomic_waker.is_registered());
        assert_eq!(counter.count(), 0);

        atomic_waker.wake();
        assert_eq!(counter.count(), 1);
        assert!(!atomic_waker.is_registered());

        // Nothing registered any more
        atomic_waker.wake();
        assert_eq!(counter.count(), 1);
    }

    #[cfg(feature = "async")]
    #[test]
    fn atomic_waker_register_overwrites_previous() {
        let atomic_waker = AtomicWaker::new();
        let counter1 = WakeCounter::new();
        let counter2 = WakeCounter::new();

        atomic_waker.register(&test_waker(counter1.clone()));
        atomic_waker.register(&test_waker(counter2.clone()));
        atomic_waker.wake();

        assert_eq!(counter1.count(), 0);
        assert_eq!(counter2.count(), 1);
    }
}
