//! The allocation strategy consumed by the container.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::error::{AllocError, ConstructError};

/// A strategy for acquiring raw blocks and managing element lifetimes in
/// them.
///
/// The container routes every block acquisition and release, and every
/// element construction and destruction, through this trait. It never
/// routes relocation through it: relocating an element is a bitwise move
/// of the same object into a new block, so neither `construct` nor
/// `destroy` runs for it.
///
/// # Safety
///
/// Implementors must return blocks from [`allocate`](Allocator::allocate)
/// that are valid for reads and writes of `layout.size()` bytes, aligned to
/// `layout.align()`, and not aliased by any other live block until they are
/// passed back to [`deallocate`](Allocator::deallocate). `construct` must
/// either initialize `slot` with `value` and return `Ok`, or drop `value`
/// and leave `slot` uninitialized before returning `Err`.
pub unsafe trait Allocator {
    /// Acquire a block for `layout`. `layout.size()` is never zero.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator with
    /// exactly this `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Initialize `slot` with `value`.
    ///
    /// The default writes `value` in place and never fails.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes, properly aligned, and currently
    /// uninitialized.
    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) -> Result<(), ConstructError> {
        // SAFETY: slot is valid for writes per the caller contract.
        unsafe { slot.as_ptr().write(value) };
        Ok(())
    }

    /// Run the destructor of the value in `slot`, leaving it uninitialized.
    ///
    /// # Safety
    ///
    /// `slot` must hold an initialized value that is not used afterwards.
    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: slot holds a live value per the caller contract.
        unsafe { ptr::drop_in_place(slot.as_ptr()) };
    }
}

// SAFETY: forwards every call to `A`, which upholds the contract.
unsafe impl<A: Allocator> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) -> Result<(), ConstructError> {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).construct(slot, value) }
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: forwarded caller contract.
        unsafe { (**self).destroy(slot) }
    }
}
