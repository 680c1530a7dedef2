//! Reusable element fixtures.
//!
//! - [`DropCounter`] / [`Tracked`]: values that count how many of them are
//!   alive, to detect leaks and double drops.
//! - [`PanicOnClone`]: a tracked value whose `clone` panics once a shared
//!   budget runs out, for exercising unwinding rollback.
//! - [`PanicOnDrop`]: a tracked value whose destructor can be armed to
//!   panic, for exercising teardown that must continue past it.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    live: Cell<usize>,
    created: Cell<usize>,
    dropped: Cell<usize>,
}

/// Shared counter of live [`Tracked`] values.
#[derive(Clone, Default)]
pub struct DropCounter {
    counts: Rc<Counts>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its lifetime is counted.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        self.created();
        Tracked {
            value,
            counts: Rc::clone(&self.counts),
        }
    }

    /// Tracked values currently alive.
    pub fn live(&self) -> usize {
        self.counts.live.get()
    }

    /// Tracked values ever created (including clones).
    pub fn created_total(&self) -> usize {
        self.counts.created.get()
    }

    /// Tracked values dropped so far.
    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }

    fn created(&self) {
        let counts = &self.counts;
        counts.live.set(counts.live.get() + 1);
        counts.created.set(counts.created.get() + 1);
    }
}

/// A value whose creation and drop are counted by a [`DropCounter`].
///
/// Dropping more values than were created panics with
/// `"double drop detected"`.
pub struct Tracked<T> {
    value: T,
    counts: Rc<Counts>,
}

impl<T> Tracked<T> {
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        DropCounter {
            counts: Rc::clone(&self.counts),
        }
        .track(self.value.clone())
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        let live = self.counts.live.get();
        assert!(live > 0, "double drop detected");
        self.counts.live.set(live - 1);
        self.counts.dropped.set(self.counts.dropped.get() + 1);
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

/// A tracked `u32` whose `clone` panics when the shared budget is spent.
///
/// Every successful clone consumes one unit of budget; the clone attempted
/// with an empty budget panics with `"clone budget exhausted"` before
/// creating anything.
#[derive(Debug, PartialEq)]
pub struct PanicOnClone {
    inner: Tracked<u32>,
    budget: Rc<Cell<usize>>,
}

impl PanicOnClone {
    /// A value allowing `budget` clones across it and all its clones.
    pub fn new(counter: &DropCounter, value: u32, budget: usize) -> Self {
        Self {
            inner: counter.track(value),
            budget: Rc::new(Cell::new(budget)),
        }
    }

    pub fn value(&self) -> u32 {
        *self.inner.get()
    }

    /// Reset the remaining clone budget.
    pub fn set_budget(&self, budget: usize) {
        self.budget.set(budget);
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        let remaining = self.budget.get();
        if remaining == 0 {
            panic!("clone budget exhausted");
        }
        self.budget.set(remaining - 1);
        Self {
            inner: self.inner.clone(),
            budget: Rc::clone(&self.budget),
        }
    }
}

/// A tracked `u32` whose destructor panics when armed.
///
/// The tracked inner value is still released during unwinding, so the
/// counter sees it as dropped either way.
#[derive(Debug)]
pub struct PanicOnDrop {
    inner: Tracked<u32>,
    armed: bool,
}

impl PanicOnDrop {
    pub fn new(counter: &DropCounter, value: u32, armed: bool) -> Self {
        Self {
            inner: counter.track(value),
            armed,
        }
    }

    pub fn value(&self) -> u32 {
        *self.inner.get()
    }
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        if self.armed && !std::thread::panicking() {
            panic!("armed destructor");
        }
    }
}
