//! Raw storage blocks: acquisition, release and relocation.
//!
//! [`RawBuf`] owns the block a vector stores its elements in, together
//! with the allocator that produced it. [`Block`] is a freshly acquired
//! block that has not yet been installed into a `RawBuf`; dropping it
//! releases the block, which is how failed growth rolls back.
//!
//! Neither type ever constructs or destroys elements. Element lifetimes
//! are managed by the vector and [`ConstructGuard`](crate::guard::ConstructGuard).

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use rivet_core::{layout, Allocator};
use tracing::{debug, trace};

use crate::error::VecError;

/// Acquire storage for `cap` values of `T`.
///
/// Zero-sized blocks are not forwarded to the allocator.
fn acquire<T, A: Allocator>(alloc: &A, cap: usize) -> Result<NonNull<T>, VecError> {
    let layout = layout::array::<T>(cap)?;
    if layout::is_zero_sized::<T>(cap) {
        return Ok(NonNull::dangling());
    }
    Ok(alloc.allocate(layout)?.cast())
}

/// Release storage acquired by [`acquire`] with the same `cap`.
///
/// # Safety
///
/// `ptr` must come from `acquire(alloc, cap)` and not be used afterwards.
unsafe fn release<T, A: Allocator>(alloc: &A, ptr: NonNull<T>, cap: usize) {
    if layout::is_zero_sized::<T>(cap) {
        return;
    }
    // Cannot fail: the same computation succeeded in `acquire`.
    if let Ok(layout) = layout::array::<T>(cap) {
        // SAFETY: ptr was allocated by `alloc` with exactly this layout.
        unsafe { alloc.deallocate(ptr.cast(), layout) };
    }
}

/// Owned storage block plus the allocator that produced it.
///
/// Dropping a `RawBuf` releases the block sized to its capacity. It never
/// touches the elements; the owner must destroy or move them out first.
pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: RawBuf uniquely owns its block; sending it sends the `T`s in it.
unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
// SAFETY: shared access to RawBuf only hands out shared access to `T`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    /// An empty buffer that owns no storage.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// A buffer with exactly `cap` uninitialized slots.
    pub(crate) fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, VecError> {
        let ptr = acquire::<T, A>(&alloc, cap)?;
        Ok(Self {
            ptr,
            cap,
            alloc,
            _marker: PhantomData,
        })
    }

    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be `<= capacity()`.
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index <= self.cap);
        // SAFETY: index is within (or one past) the block.
        unsafe { self.ptr.add(index) }
    }

    /// Install a new block, releasing the current one.
    ///
    /// # Safety
    ///
    /// Every live element of the current block must already have been moved
    /// out or destroyed, and `ptr` must come from this buffer's allocator
    /// with capacity `cap` (see [`Block::into_parts`]).
    pub(crate) unsafe fn replace(&mut self, ptr: NonNull<T>, cap: usize) {
        trace!(
            from_cap = self.cap,
            to_cap = cap,
            elem_size = std::mem::size_of::<T>(),
            "replacing storage block"
        );
        let old_ptr = std::mem::replace(&mut self.ptr, ptr);
        let old_cap = std::mem::replace(&mut self.cap, cap);
        // SAFETY: old block came from `acquire` with `old_cap` and is now
        // unreferenced.
        unsafe { release::<T, A>(&self.alloc, old_ptr, old_cap) };
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if self.cap != 0 {
            trace!(cap = self.cap, "releasing storage block");
        }
        // SAFETY: the block came from `acquire` with `self.cap`.
        unsafe { release::<T, A>(&self.alloc, self.ptr, self.cap) };
    }
}

/// A newly acquired block that is released on drop unless installed.
pub(crate) struct Block<'a, T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: &'a A,
}

impl<'a, T, A: Allocator> Block<'a, T, A> {
    pub(crate) fn acquire(alloc: &'a A, cap: usize) -> Result<Self, VecError> {
        let ptr = acquire::<T, A>(alloc, cap)?;
        Ok(Self { ptr, cap, alloc })
    }

    pub(crate) fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index` must be `<= cap`.
    pub(crate) unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(index <= self.cap);
        // SAFETY: index is within (or one past) the block.
        unsafe { self.ptr.add(index) }
    }

    /// Give up ownership of the block without releasing it.
    pub(crate) fn into_parts(self) -> (NonNull<T>, usize) {
        let parts = (self.ptr, self.cap);
        std::mem::forget(self);
        parts
    }
}

impl<T, A: Allocator> Drop for Block<'_, T, A> {
    fn drop(&mut self) {
        debug!(cap = self.cap, "releasing unused block after failed operation");
        // SAFETY: the block came from `acquire` with `self.cap` and was
        // never installed.
        unsafe { release::<T, A>(self.alloc, self.ptr, self.cap) };
    }
}

/// Bitwise-move `len` live elements from `src` to `dst`.
///
/// Rust moves never fail, so relocation cannot leave a half-moved source.
/// After the call the values live at `dst`; `src` holds stale bits that
/// must not be dropped.
///
/// # Safety
///
/// `src` must hold `len` initialized values, `dst` must have room for
/// `len` values, and the regions must not overlap.
pub(crate) unsafe fn relocate<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    // SAFETY: see function contract.
    unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), len) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivet_core::Global;

    #[test]
    fn empty_buffer_owns_nothing() {
        let buf = RawBuf::<u64, Global>::new_in(Global);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.ptr(), NonNull::dangling());
    }

    #[test]
    fn buffer_with_capacity_is_aligned() {
        let buf = RawBuf::<u64, Global>::try_with_capacity_in(8, Global).unwrap();
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.ptr().as_ptr() as usize % std::mem::align_of::<u64>(), 0);
    }

    #[test]
    fn oversized_buffer_reports_overflow() {
        let result = RawBuf::<u64, Global>::try_with_capacity_in(usize::MAX, Global);
        assert!(matches!(result, Err(VecError::CapacityOverflow)));
    }

    #[test]
    fn zero_sized_elements_use_dangling_storage() {
        let buf = RawBuf::<(), Global>::try_with_capacity_in(1000, Global).unwrap();
        assert_eq!(buf.capacity(), 1000);
        assert_eq!(buf.ptr(), NonNull::dangling());
    }

    #[test]
    fn relocate_then_replace_moves_values() {
        let mut buf = RawBuf::<u32, Global>::try_with_capacity_in(2, Global).unwrap();
        unsafe {
            buf.slot(0).write(10);
            buf.slot(1).write(20);
        }

        let block = Block::<u32, Global>::acquire(buf.allocator(), 4).unwrap();
        unsafe { relocate(buf.ptr(), block.ptr(), 2) };
        let (ptr, cap) = block.into_parts();
        unsafe { buf.replace(ptr, cap) };

        assert_eq!(buf.capacity(), 4);
        unsafe {
            assert_eq!(buf.slot(0).read(), 10);
            assert_eq!(buf.slot(1).read(), 20);
        }
    }
}
