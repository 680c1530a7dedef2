//! The default allocation strategy, backed by the process heap.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use tracing::debug;

use crate::alloc::Allocator;
use crate::error::AllocError;

/// Allocator that forwards to `std::alloc::{alloc, dealloc}`.
///
/// Stateless: every `Global` is interchangeable with every other, so
/// blocks may be released through a different instance than the one that
/// acquired them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

// SAFETY: `std::alloc::alloc` returns blocks valid for the requested
// layout; the default construct/destroy are used.
unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "zero-sized requests are never forwarded");
        // SAFETY: layout has non-zero size (container invariant).
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| {
            debug!(
                bytes = layout.size(),
                align = layout.align(),
                "global allocator refused request"
            );
            AllocError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            }
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: ptr came from `alloc::alloc` with this layout.
        unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_release_block() {
        let layout = Layout::array::<u32>(16).unwrap();
        let block = Global.allocate(layout).unwrap();
        assert_eq!(block.as_ptr() as usize % layout.align(), 0);
        unsafe { Global.deallocate(block, layout) };
    }

    #[test]
    fn construct_then_destroy_runs_drop_once() {
        use std::rc::Rc;

        let layout = Layout::new::<Rc<()>>();
        let block = Global.allocate(layout).unwrap().cast::<Rc<()>>();
        let shared = Rc::new(());

        unsafe { Global.construct(block, Rc::clone(&shared)).unwrap() };
        assert_eq!(Rc::strong_count(&shared), 2);
        unsafe { Global.destroy(block) };
        assert_eq!(Rc::strong_count(&shared), 1);

        unsafe { Global.deallocate(block.cast(), layout) };
    }

    #[test]
    fn reference_forwards_to_inner() {
        let global = Global;
        let by_ref = &global;
        let layout = Layout::new::<u64>();
        let block = by_ref.allocate(layout).unwrap();
        unsafe { by_ref.deallocate(block, layout) };
    }
}
