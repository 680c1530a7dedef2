//! Iterators over vector storage.
//!
//! [`Iter`] and [`IterMut`] are position wrappers: a base pointer into the
//! vector's block plus a `[front, back)` index window. Indices rather than
//! pointer pairs keep zero-sized element types correct. Random-offset
//! advance is O(1) through `nth`/`nth_back`, and the distance between the
//! two ends is `len()`.
//!
//! Invalidation is enforced by borrowing: `Iter` holds a shared borrow of
//! the vector and `IterMut` an exclusive one, so nothing can reallocate,
//! shrink or clear the vector while either is alive.
//!
//! [`IntoIter`] owns the vector's block and destroys whatever it did not
//! yield when dropped.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice;

use rivet_core::{Allocator, Global};

use crate::guard::DestroyGuard;
use crate::raw::RawBuf;

/// Immutable iterator over a vector's live elements.
pub struct Iter<'a, T> {
    base: NonNull<T>,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a T>,
}

// SAFETY: Iter only hands out `&T`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: as above.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slice: &'a [T]) -> Self {
        Self {
            base: NonNull::from(slice).cast(),
            front: 0,
            back: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Offset of the next element from the start of the vector.
    ///
    /// Two iterators over the same vector are ordered by their positions.
    /// Use [`offset_from`](Iter::offset_from) for the distance between them.
    pub fn position(&self) -> usize {
        self.front
    }

    /// Signed distance from `origin` to `self`, in elements.
    ///
    /// Negative when `self` is behind `origin`. Only meaningful when both
    /// iterators walk the same vector.
    pub fn offset_from(&self, origin: &Iter<'a, T>) -> isize {
        self.front as isize - origin.front as isize
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: [front, back) is a live range of the borrowed vector.
        unsafe {
            slice::from_raw_parts(self.base.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.as_slice()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back, so the slot is live.
        let item = unsafe { self.base.add(self.front).as_ref() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: back was > front, so the slot is live.
        Some(unsafe { self.base.add(self.back).as_ref() })
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable iterator over a vector's live elements.
pub struct IterMut<'a, T> {
    base: NonNull<T>,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: IterMut hands out `&mut T`, which is Send when T is.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: shared access to IterMut only exposes `&T`.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        let back = slice.len();
        Self {
            base: NonNull::from(slice).cast(),
            front: 0,
            back,
            _marker: PhantomData,
        }
    }

    /// Offset of the next element from the start of the vector.
    pub fn position(&self) -> usize {
        self.front
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is live; the shared borrow of self prevents
        // yielding a `&mut` into it while the slice is alive.
        unsafe {
            slice::from_raw_parts(self.base.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.as_slice()).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back; each slot is yielded at most once.
        let item = unsafe { self.base.add(self.front).as_mut() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: back was > front; each slot is yielded at most once.
        Some(unsafe { self.base.add(self.back).as_mut() })
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.back = self.front;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator returned by `Vector::into_iter`.
///
/// Elements in `[front, back)` are still live; dropping the iterator
/// destroys them through the allocator and releases the block.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    front: usize,
    back: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// # Safety
    ///
    /// Slots `[0, len)` of `buf` must be live and owned by the caller.
    pub(crate) unsafe fn new(buf: RawBuf<T, A>, len: usize) -> Self {
        Self {
            buf,
            front: 0,
            back: len,
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is live and owned by self.
        unsafe {
            slice::from_raw_parts(
                self.buf.ptr().as_ptr().add(self.front),
                self.back - self.front,
            )
        }
    }

    /// The allocator owning the block.
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back; the value is moved out exactly once.
        let item = unsafe { self.buf.slot(self.front).read() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: back was > front; the value is moved out exactly once.
        Some(unsafe { self.buf.slot(self.back).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        // SAFETY: [front, back) is still live.
        let rest = unsafe { self.buf.slot(self.front) };
        self.front = self.back;
        // SAFETY: the remaining slots are handed to the guard and no longer
        // reachable through the iterator.
        unsafe { DestroyGuard::new(rest, remaining, self.buf.allocator()) }.run();
    }
}
