//! All-or-nothing bulk construction.
//!
//! A [`ConstructGuard`] is the undo log of a bulk operation: it constructs
//! values into consecutive slots starting at a base pointer and remembers
//! how many it has built. If the operation fails, either by an `Err` from
//! the allocator or by a panic in the code producing the values, dropping
//! the guard destroys exactly the slots it built, in index order. On
//! success the operation calls [`commit`](ConstructGuard::commit) and
//! takes ownership of the new elements.
//!
//! [`DestroyGuard`] is the teardown counterpart: it destroys a run of live
//! slots and keeps going past a destructor that panics.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use rivet_core::Allocator;
use tracing::debug;

use crate::error::VecError;

/// Tracks the slots constructed by the current operation.
pub(crate) struct ConstructGuard<'a, T, A: Allocator> {
    /// First slot owned by this guard.
    base: NonNull<T>,
    /// Index of `base` within its block, for error reporting.
    offset: usize,
    /// Number of slots initialized so far.
    constructed: usize,
    alloc: &'a A,
    site: &'static str,
}

impl<'a, T, A: Allocator> ConstructGuard<'a, T, A> {
    /// Start a guard at slot `offset` of the block whose slot is `base`.
    pub(crate) fn new(base: NonNull<T>, offset: usize, alloc: &'a A, site: &'static str) -> Self {
        Self {
            base,
            offset,
            constructed: 0,
            alloc,
            site,
        }
    }

    /// Construct `value` in the next slot.
    ///
    /// # Safety
    ///
    /// The next slot must be allocated and uninitialized.
    pub(crate) unsafe fn construct(&mut self, value: T) -> Result<(), VecError> {
        // SAFETY: caller guarantees the slot is in bounds and uninitialized.
        let slot = unsafe { self.base.add(self.constructed) };
        // SAFETY: as above.
        unsafe { self.alloc.construct(slot, value) }
            .map_err(|err| VecError::construction(self.offset + self.constructed, err))?;
        self.constructed += 1;
        Ok(())
    }

    /// Keep every constructed slot and return how many there are.
    pub(crate) fn commit(self) -> usize {
        let constructed = self.constructed;
        std::mem::forget(self);
        constructed
    }
}

impl<T, A: Allocator> Drop for ConstructGuard<'_, T, A> {
    fn drop(&mut self) {
        debug!(
            site = self.site,
            constructed = self.constructed,
            offset = self.offset,
            "rolling back partial construction"
        );
        // SAFETY: slots [0, constructed) were initialized by this guard and
        // nothing else owns them.
        unsafe { DestroyGuard::new(self.base, self.constructed, self.alloc) }.run();
    }
}

/// Destroys a run of live slots in index order.
///
/// The cursor moves past a slot before its destructor runs. If that
/// destructor panics, dropping the guard during unwinding destroys the
/// slots after it, so one panicking element never leaks the rest.
pub(crate) struct DestroyGuard<'a, T, A: Allocator> {
    base: NonNull<T>,
    next: usize,
    end: usize,
    alloc: &'a A,
}

impl<'a, T, A: Allocator> DestroyGuard<'a, T, A> {
    /// Take ownership of `count` live slots starting at `base`.
    ///
    /// # Safety
    ///
    /// Slots `[0, count)` from `base` must be initialized and must not be
    /// reachable by anything else once the guard exists.
    pub(crate) unsafe fn new(base: NonNull<T>, count: usize, alloc: &'a A) -> Self {
        Self {
            base,
            next: 0,
            end: count,
            alloc,
        }
    }

    /// Destroy every slot not yet destroyed.
    pub(crate) fn run(&mut self) {
        while self.next < self.end {
            // SAFETY: next < end, so the slot is live and owned by the guard.
            let slot = unsafe { self.base.add(self.next) };
            self.next += 1;
            // SAFETY: as above; the cursor has already moved past it.
            unsafe { self.alloc.destroy(slot) };
        }
    }
}

impl<T, A: Allocator> Drop for DestroyGuard<'_, T, A> {
    fn drop(&mut self) {
        self.run();
    }
}
