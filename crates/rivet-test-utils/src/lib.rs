//! Test utilities and instrumented allocators for Rivet development.
//!
//! Provides [`Allocator`] implementations that observe or sabotage the
//! container under test:
//!
//! - [`TrackingAllocator`]: forwards to [`Global`] and records every
//!   block and every construct/destroy call, so tests can assert that
//!   nothing leaked and that blocks were released with the layout they
//!   were acquired with.
//! - [`FailingAllocator`]: a `TrackingAllocator` that refuses the n-th
//!   allocation or construction on request (failure injection).
//!
//! Element fixtures live in [`fixtures`].
//!
//! Both allocators share their state between clones (`Rc`), so a test can
//! keep a handle while the vector owns another.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ptr::NonNull;
use std::rc::Rc;

use rivet_core::{AllocError, Allocator, ConstructError, Global};

#[derive(Default)]
struct Ledger {
    /// Live blocks keyed by address.
    blocks: RefCell<HashMap<usize, Layout>>,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    constructs: Cell<usize>,
    destroys: Cell<usize>,
}

/// Allocator that records every call it forwards to [`Global`].
///
/// Releasing a block it did not hand out, or with a different layout,
/// panics immediately.
#[derive(Clone, Default)]
pub struct TrackingAllocator {
    ledger: Rc<Ledger>,
}

impl TrackingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks acquired and not yet released.
    pub fn live_blocks(&self) -> usize {
        self.ledger.blocks.borrow().len()
    }

    /// Bytes held by live blocks.
    pub fn live_bytes(&self) -> usize {
        self.ledger.blocks.borrow().values().map(Layout::size).sum()
    }

    /// Total successful `allocate` calls.
    pub fn allocations(&self) -> usize {
        self.ledger.allocations.get()
    }

    /// Total `deallocate` calls.
    pub fn deallocations(&self) -> usize {
        self.ledger.deallocations.get()
    }

    /// Total successful `construct` calls.
    pub fn constructs(&self) -> usize {
        self.ledger.constructs.get()
    }

    /// Total `destroy` calls.
    pub fn destroys(&self) -> usize {
        self.ledger.destroys.get()
    }

    /// Constructed minus destroyed elements.
    ///
    /// Values moved out of a vector (`pop`, `into_iter`) leave through a
    /// move rather than `destroy`, so they stay counted here.
    pub fn live_elements(&self) -> usize {
        self.constructs() - self.destroys()
    }

    /// Panic unless every block has been released.
    #[track_caller]
    pub fn assert_no_leaks(&self) {
        assert_eq!(
            self.live_blocks(),
            0,
            "{} block(s) ({} bytes) still live",
            self.live_blocks(),
            self.live_bytes()
        );
    }
}

// SAFETY: blocks come from `Global`; construct/destroy use the defaults
// after bookkeeping.
#[allow(unsafe_code)]
unsafe impl Allocator for TrackingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = Global.allocate(layout)?;
        self.ledger
            .blocks
            .borrow_mut()
            .insert(ptr.as_ptr() as usize, layout);
        self.ledger.allocations.set(self.allocations() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let recorded = self.ledger.blocks.borrow_mut().remove(&(ptr.as_ptr() as usize));
        match recorded {
            Some(recorded) => assert_eq!(
                recorded, layout,
                "block released with a different layout than it was acquired with"
            ),
            None => panic!("released a block this allocator did not hand out"),
        }
        self.ledger.deallocations.set(self.deallocations() + 1);
        // SAFETY: the block came from Global with this layout.
        unsafe { Global.deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) -> Result<(), ConstructError> {
        // SAFETY: forwarded caller contract.
        unsafe { Global.construct(slot, value)? };
        self.ledger.constructs.set(self.constructs() + 1);
        Ok(())
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        self.ledger.destroys.set(self.destroys() + 1);
        // SAFETY: forwarded caller contract.
        unsafe { Global.destroy(slot) }
    }
}

#[derive(Default)]
struct Faults {
    allocate_in: Cell<Option<usize>>,
    construct_in: Cell<Option<usize>>,
}

/// Count down an armed fault; returns `true` when this call must fail.
///
/// Faults are one-shot: once fired they disarm themselves.
fn fires(fault: &Cell<Option<usize>>) -> bool {
    match fault.get() {
        Some(0) => {
            fault.set(None);
            true
        }
        Some(n) => {
            fault.set(Some(n - 1));
            false
        }
        None => false,
    }
}

/// [`TrackingAllocator`] with on-demand failure injection.
///
/// ```ignore
/// let alloc = FailingAllocator::new();
/// let mut v = Vector::new_in(alloc.clone());
/// alloc.fail_allocation_after(0);
/// assert!(v.push(1).is_err());
/// ```
#[derive(Clone, Default)]
pub struct FailingAllocator {
    tracker: TrackingAllocator,
    faults: Rc<Faults>,
}

impl FailingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `successes` more allocations through, then refuse the next one.
    pub fn fail_allocation_after(&self, successes: usize) {
        self.faults.allocate_in.set(Some(successes));
    }

    /// Let `successes` more constructions through, then refuse the next one.
    pub fn fail_construct_after(&self, successes: usize) {
        self.faults.construct_in.set(Some(successes));
    }

    /// Cancel any armed fault.
    pub fn disarm(&self) {
        self.faults.allocate_in.set(None);
        self.faults.construct_in.set(None);
    }

    /// Whether a fault is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.faults.allocate_in.get().is_some() || self.faults.construct_in.get().is_some()
    }

    /// The bookkeeping shared with this allocator.
    pub fn tracker(&self) -> &TrackingAllocator {
        &self.tracker
    }
}

// SAFETY: forwards to TrackingAllocator; an injected construct failure
// drops the value and leaves the slot untouched.
#[allow(unsafe_code)]
unsafe impl Allocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if fires(&self.faults.allocate_in) {
            return Err(AllocError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            });
        }
        self.tracker.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract.
        unsafe { self.tracker.deallocate(ptr, layout) }
    }

    unsafe fn construct<T>(&self, slot: NonNull<T>, value: T) -> Result<(), ConstructError> {
        if fires(&self.faults.construct_in) {
            drop(value);
            return Err(ConstructError::new("injected construction failure"));
        }
        // SAFETY: forwarded caller contract.
        unsafe { self.tracker.construct(slot, value) }
    }

    unsafe fn destroy<T>(&self, slot: NonNull<T>) {
        // SAFETY: forwarded caller contract.
        unsafe { self.tracker.destroy(slot) }
    }
}
