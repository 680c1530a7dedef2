//! The contiguous growable vector.
//!
//! [`Vector`] stores its elements in one block obtained from an
//! [`Allocator`]. Slots `[0, len)` are live; slots `[len, capacity)` are
//! allocated but uninitialized. Growth always relocates into a fresh block
//! and never resizes in place.
//!
//! # Failure model
//!
//! Every operation that builds elements or acquires a block follows the
//! same discipline:
//!
//! 1. acquire the new block (if any) as a [`Block`], which releases itself
//!    on drop;
//! 2. construct new elements through a [`ConstructGuard`], which destroys
//!    them on drop;
//! 3. only after everything has succeeded, relocate the existing elements
//!    (a bitwise move that cannot fail) and install the new block.
//!
//! An `Err` or a panic in step 1 or 2 therefore unwinds through the guard
//! and the block and leaves the vector exactly as it was.

#![allow(unsafe_code)]

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use rivet_core::{Allocator, Global};

use crate::error::VecError;
use crate::growth::GrowthPolicy;
use crate::guard::{ConstructGuard, DestroyGuard};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::{relocate, Block, RawBuf};

/// A contiguous, growable sequence with a pluggable allocator.
///
/// Fallible operations return [`VecError`]. The trait-based conveniences
/// (`Clone`, `Extend`, `FromIterator`, `Index`) panic with the error's
/// message instead, as the standard collections do.
pub struct Vector<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
}

/// Unwrap a result from a trait method that has no error channel.
#[track_caller]
fn infallible<R>(result: Result<R, VecError>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl<T> Vector<T> {
    /// An empty vector using the global allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty vector with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, VecError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// A vector of `n` copies of `value`.
    pub fn from_elem(n: usize, value: T) -> Result<Self, VecError>
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// An empty vector using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBuf::new_in(alloc),
            len: 0,
        }
    }

    /// An empty vector with exactly `capacity` slots from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, VecError> {
        Ok(Self {
            buf: RawBuf::try_with_capacity_in(capacity, alloc)?,
            len: 0,
        })
    }

    /// A vector of `n` copies of `value` in a block of exactly `n` slots.
    ///
    /// The first `n - 1` elements are clones and the last is `value`
    /// itself. If a construction fails, the elements built so far are
    /// destroyed and the block is released before the error is returned.
    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Result<Self, VecError>
    where
        T: Clone,
    {
        let buf = RawBuf::try_with_capacity_in(n, alloc)?;
        if n == 0 {
            return Ok(Self { buf, len: 0 });
        }
        let mut guard = ConstructGuard::new(buf.ptr(), 0, buf.allocator(), "from_elem");
        for _ in 1..n {
            // SAFETY: fewer than n slots have been constructed.
            unsafe { guard.construct(value.clone())? };
        }
        // SAFETY: exactly n - 1 slots have been constructed.
        unsafe { guard.construct(value)? };
        let len = guard.commit();
        Ok(Self { buf, len })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Whether the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator backing this vector.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Pointer to the first slot. Dangling when no storage is owned.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr().as_ptr()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is live.
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [0, len) is live and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Reference to element `index`.
    ///
    /// Fails with [`VecError::OutOfBounds`] when `index >= len()`, even if
    /// the slot is within capacity.
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(VecError::OutOfBounds { index, len })
    }

    /// Mutable reference to element `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VecError::OutOfBounds { index, len })
    }

    /// Reference to element `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable reference to element `index`, or `None` when out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Ensure a total capacity of at least `new_capacity` slots.
    ///
    /// No-op when `new_capacity <= capacity()`. Otherwise relocates into a
    /// block of exactly `new_capacity` slots; on failure nothing changes.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), VecError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate_into(new_capacity)
    }

    /// Relocate into a block of exactly `len()` slots, releasing the
    /// storage entirely when empty.
    pub fn shrink_to_fit(&mut self) -> Result<(), VecError> {
        if self.capacity() == self.len {
            return Ok(());
        }
        self.relocate_into(self.len)
    }

    /// Move every element into a new block of `new_capacity` slots.
    fn relocate_into(&mut self, new_capacity: usize) -> Result<(), VecError> {
        debug_assert!(new_capacity >= self.len);
        let block = Block::acquire(self.buf.allocator(), new_capacity)?;
        // SAFETY: [0, len) is live, the new block has room for len values,
        // and distinct blocks never overlap.
        unsafe { relocate(self.buf.ptr(), block.ptr(), self.len) };
        let (ptr, cap) = block.into_parts();
        // SAFETY: every element was moved out of the old block.
        unsafe { self.buf.replace(ptr, cap) };
        Ok(())
    }

    /// Append `value`.
    ///
    /// Constructs in place when there is spare capacity. Otherwise grows to
    /// `max(1, 2 × capacity())`, constructing `value` in the new block
    /// before relocating the existing elements. On failure the vector is
    /// unchanged and `value` is dropped.
    #[doc(alias = "append")]
    pub fn push(&mut self, value: T) -> Result<(), VecError> {
        if self.len == self.capacity() {
            return self.push_with_growth(value);
        }
        // SAFETY: len < capacity, so the slot is allocated and uninitialized.
        let slot = unsafe { self.buf.slot(self.len) };
        // SAFETY: as above.
        unsafe { self.buf.allocator().construct(slot, value) }
            .map_err(|err| VecError::construction(self.len, err))?;
        self.len += 1;
        Ok(())
    }

    #[cold]
    fn push_with_growth(&mut self, value: T) -> Result<(), VecError> {
        let new_capacity = GrowthPolicy::next_capacity(self.capacity())?;
        let block = Block::acquire(self.buf.allocator(), new_capacity)?;
        let len = self.len;
        // SAFETY: len < new_capacity and the new block is uninitialized.
        unsafe {
            let slot = block.slot(len);
            self.buf
                .allocator()
                .construct(slot, value)
                .map_err(|err| VecError::construction(len, err))?;
        }
        // SAFETY: [0, len) is live; the new block has room and is distinct.
        unsafe { relocate(self.buf.ptr(), block.ptr(), len) };
        let (ptr, cap) = block.into_parts();
        // SAFETY: every element was moved out of the old block.
        unsafe { self.buf.replace(ptr, cap) };
        self.len = len + 1;
        Ok(())
    }

    /// Append clones of every element of `items`, one push at a time.
    ///
    /// Stops at the first failure; elements appended before it remain.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), VecError>
    where
        T: Clone,
    {
        for item in items {
            self.push(item.clone())?;
        }
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, new_len: usize) -> Result<(), VecError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resize to `new_len`, filling new slots with values from `fill`.
    ///
    /// Shrinking destroys the trailing elements and keeps the capacity.
    /// Growing within capacity constructs in place. Growing beyond capacity
    /// relocates into a block of exactly `new_len` slots. On failure
    /// (including a panic in `fill`) the vector is unchanged.
    pub fn resize_with<F>(&mut self, new_len: usize, mut fill: F) -> Result<(), VecError>
    where
        F: FnMut() -> T,
    {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        if new_len <= self.capacity() {
            // SAFETY: len <= capacity.
            let base = unsafe { self.buf.slot(len) };
            let mut guard = ConstructGuard::new(base, len, self.buf.allocator(), "resize");
            for _ in len..new_len {
                // SAFETY: slots [len, new_len) are allocated and uninitialized.
                unsafe { guard.construct(fill())? };
            }
            self.len += guard.commit();
            return Ok(());
        }

        let block = Block::acquire(self.buf.allocator(), new_len)?;
        // SAFETY: len < new_len, the block's capacity.
        let base = unsafe { block.slot(len) };
        let mut guard = ConstructGuard::new(base, len, self.buf.allocator(), "resize");
        for _ in len..new_len {
            // SAFETY: slots [len, new_len) of the new block are uninitialized.
            unsafe { guard.construct(fill())? };
        }
        guard.commit();
        // SAFETY: [0, len) is live; the new block has room and is distinct.
        unsafe { relocate(self.buf.ptr(), block.ptr(), len) };
        let (ptr, cap) = block.into_parts();
        // SAFETY: every element was moved out of the old block.
        unsafe { self.buf.replace(ptr, cap) };
        self.len = new_len;
        Ok(())
    }

    /// Destroy the elements at `[new_len, len)`, in index order.
    ///
    /// No-op when `new_len >= len()`. Capacity is unchanged. If a
    /// destructor panics, the elements after it are still destroyed before
    /// the panic propagates.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        // Retract first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: slots [new_len, old_len) were live and are no longer
        // reachable through the vector.
        let tail = unsafe { self.buf.slot(new_len) };
        // SAFETY: as above.
        unsafe { DestroyGuard::new(tail, old_len - new_len, self.buf.allocator()) }.run();
    }

    /// Move the last element out, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is no longer reachable.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Destroy the last element through the allocator.
    ///
    /// Fails with [`VecError::Empty`] when there is nothing to remove.
    pub fn remove_last(&mut self) -> Result<(), VecError> {
        if self.len == 0 {
            return Err(VecError::Empty);
        }
        self.truncate(self.len - 1);
        Ok(())
    }

    /// Destroy every element. Capacity and storage are kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Iterate over shared references in index order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// Iterate over mutable references in index order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// A deep copy in a block of exactly `len()` slots.
    ///
    /// The allocator is cloned. On failure the partial copy is destroyed
    /// and its block released; `self` is never modified.
    pub fn try_clone(&self) -> Result<Self, VecError>
    where
        T: Clone,
        A: Clone,
    {
        let buf = RawBuf::try_with_capacity_in(self.len, self.buf.allocator().clone())?;
        let mut guard = ConstructGuard::new(buf.ptr(), 0, buf.allocator(), "clone");
        for item in self.as_slice() {
            // SAFETY: fewer than len slots of the new block are constructed.
            unsafe { guard.construct(item.clone())? };
        }
        let len = guard.commit();
        Ok(Self { buf, len })
    }

    /// Replace the contents with a deep copy of `source`.
    ///
    /// Reuses the current storage when it already holds `source.len()`
    /// slots; otherwise releases it and allocates exactly `source.len()`.
    /// On failure `self` is left empty, never leaking.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), VecError>
    where
        T: Clone,
    {
        self.clear();
        if self.capacity() < source.len {
            // SAFETY: no live elements remain; a zero-capacity block owns
            // no storage.
            unsafe { self.buf.replace(std::ptr::NonNull::dangling(), 0) };
            let block = Block::acquire(self.buf.allocator(), source.len)?;
            let (ptr, cap) = block.into_parts();
            // SAFETY: the current block is empty and owns no storage.
            unsafe { self.buf.replace(ptr, cap) };
        }
        let mut guard = ConstructGuard::new(self.buf.ptr(), 0, self.buf.allocator(), "clone_from");
        for item in source.as_slice() {
            // SAFETY: capacity >= source.len(), slots are uninitialized.
            unsafe { guard.construct(item.clone())? };
        }
        self.len = guard.commit();
        Ok(())
    }

    /// Move the contents out, leaving `self` empty with no storage.
    ///
    /// The allocator is cloned into the emptied vector.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.allocator().clone());
        std::mem::replace(self, empty)
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        // Elements first; the RawBuf field then releases the block sized to
        // its capacity.
        self.truncate(0);
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }

    fn clone_from(&mut self, source: &Self) {
        infallible(self.try_clone_from(source));
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, A, B> PartialEq<Vector<U, B>> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Vector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for Vector<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Vector<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Index<usize> for Vector<T, A> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        infallible(self.at(index))
    }
}

impl<T, A: Allocator> IndexMut<usize> for Vector<T, A> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        infallible(self.at_mut(index))
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            infallible(self.push(item));
        }
    }
}

impl<T, A: Allocator + Default> FromIterator<T> for Vector<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::default();
        vector.extend(iter);
        vector
    }
}

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the buffer is moved out exactly
        // once and its [0, len) elements are handed to the iterator.
        unsafe {
            let buf = ptr::read(&me.buf);
            IntoIter::new(buf, me.len)
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_owns_no_storage() {
        let v: Vector<u32> = Vector::new();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 0);
        assert!(v.is_empty());
    }

    #[test]
    fn push_grows_by_doubling() {
        let mut v = Vector::new();
        let mut caps = Vec::new();
        for i in 0..5u32 {
            v.push(i).unwrap();
            caps.push(v.capacity());
        }
        assert_eq!(caps, [1, 2, 4, 4, 8]);
    }

    #[test]
    fn push_resize_clear_scenario() {
        let mut v = Vector::new();
        for i in 0..3 {
            v.push(i).unwrap();
        }
        assert_eq!(v.len(), 3);
        assert_eq!(v.capacity(), 4);
        assert_eq!(v, [0, 1, 2]);

        v.resize(1).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!(v.capacity(), 4);
        assert_eq!(v.at(0), Ok(&0));

        v.clear();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn at_rejects_index_within_capacity_but_past_len() {
        let mut v = Vector::with_capacity(8).unwrap();
        v.push(1u8).unwrap();
        assert_eq!(v.at(1), Err(VecError::OutOfBounds { index: 1, len: 1 }));
        assert_eq!(v.get(5), None);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the len is 2 but the index is 2")]
    fn index_panics_with_bounds_message() {
        let v: Vector<u8> = Vector::from_elem(2, 0).unwrap();
        let _value = v[2];
    }

    #[test]
    fn at_mut_writes_through() {
        let mut v = Vector::from_elem(3, 0u32).unwrap();
        *v.at_mut(1).unwrap() = 7;
        v[2] = 9;
        assert_eq!(v, [0, 7, 9]);
    }

    #[test]
    fn from_elem_allocates_exactly() {
        let v = Vector::from_elem(5, "x".to_string()).unwrap();
        assert_eq!(v.len(), 5);
        assert_eq!(v.capacity(), 5);
        assert!(v.iter().all(|s| s == "x"));
    }

    #[test]
    fn from_elem_zero_allocates_nothing() {
        let v = Vector::from_elem(0, 1u64).unwrap();
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn reserve_smaller_is_noop() {
        let mut v = Vector::with_capacity(10).unwrap();
        v.push(1u32).unwrap();
        let before = v.as_ptr();
        v.reserve(4).unwrap();
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.as_ptr(), before);
    }

    #[test]
    fn reserve_allocates_exact_total_capacity() {
        let mut v = Vector::new();
        v.push(1u32).unwrap();
        v.reserve(13).unwrap();
        assert_eq!(v.capacity(), 13);
        assert_eq!(v, [1]);
    }

    #[test]
    fn resize_grow_within_capacity_defaults() {
        let mut v = Vector::with_capacity(4).unwrap();
        v.push(5i32).unwrap();
        v.resize(3).unwrap();
        assert_eq!(v, [5, 0, 0]);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn resize_grow_beyond_capacity_is_exact() {
        let mut v = Vector::from_elem(2, 1i32).unwrap();
        v.resize(7).unwrap();
        assert_eq!(v.capacity(), 7);
        assert_eq!(v, [1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn resize_with_uses_closure() {
        let mut v: Vector<usize> = Vector::new();
        let mut next = 0;
        v.resize_with(4, || {
            next += 1;
            next
        })
        .unwrap();
        assert_eq!(v, [1, 2, 3, 4]);
    }

    #[test]
    fn shrink_to_fit_releases_spare_slots() {
        let mut v = Vector::with_capacity(16).unwrap();
        v.extend_from_slice(&[1u8, 2, 3]).unwrap();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 3);
        v.clear();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 0);
    }

    #[test]
    fn pop_and_remove_last() {
        let mut v: Vector<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(v.pop().as_deref(), Some("b"));
        v.remove_last().unwrap();
        assert_eq!(v.pop(), None);
        assert_eq!(v.remove_last(), Err(VecError::Empty));
    }

    #[test]
    fn clone_is_deep_and_exact() {
        let mut source = Vector::with_capacity(8).unwrap();
        source.extend_from_slice(&[1u32, 2, 3]).unwrap();
        let mut copy = source.clone();
        assert_eq!(copy, source);
        assert_eq!(copy.capacity(), 3);
        copy[0] = 100;
        assert_eq!(source, [1, 2, 3]);
    }

    #[test]
    fn clone_from_reuses_sufficient_storage() {
        let source: Vector<u32> = (0..3).collect();
        let mut dest = Vector::with_capacity(8).unwrap();
        dest.push(42).unwrap();
        let before = dest.as_ptr();
        dest.clone_from(&source);
        assert_eq!(dest, [0, 1, 2]);
        assert_eq!(dest.capacity(), 8);
        assert_eq!(dest.as_ptr(), before);
    }

    #[test]
    fn clone_from_replaces_small_storage_exactly() {
        let source: Vector<u32> = (0..5).collect();
        let mut dest: Vector<u32> = Vector::from_elem(1, 9).unwrap();
        dest.clone_from(&source);
        assert_eq!(dest, [0, 1, 2, 3, 4]);
        assert_eq!(dest.capacity(), 5);
    }

    #[test]
    fn take_leaves_source_without_storage() {
        let mut source: Vector<u32> = (0..3).collect();
        let moved = source.take();
        assert_eq!(source.len(), 0);
        assert_eq!(source.capacity(), 0);
        assert_eq!(moved, [0, 1, 2]);

        let mut again = moved;
        let taken = std::mem::take(&mut again);
        assert_eq!(again.capacity(), 0);
        assert_eq!(taken.len(), 3);
    }

    #[test]
    fn drop_destroys_every_element_once() {
        use std::rc::Rc;

        let shared = Rc::new(());
        {
            let mut v = Vector::new();
            for _ in 0..10 {
                v.push(Rc::clone(&shared)).unwrap();
            }
            v.truncate(4);
            assert_eq!(Rc::strong_count(&shared), 5);
        }
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn debug_lists_elements() {
        let v: Vector<u8> = (1..=3).collect();
        assert_eq!(format!("{v:?}"), "[1, 2, 3]");
    }

    #[test]
    fn zero_sized_elements_track_length() {
        let mut v = Vector::new();
        for _ in 0..100 {
            v.push(()).unwrap();
        }
        assert_eq!(v.len(), 100);
        assert_eq!(v.capacity(), 128);
        v.resize(3).unwrap();
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn vector_is_send_and_sync() {
        fn assert_send_sync<X: Send + Sync>() {}
        assert_send_sync::<Vector<u32>>();
        assert_send_sync::<IntoIter<String>>();
    }
}
