//! Contiguous growable vector with pluggable allocation.
//!
//! [`Vector<T, A>`] owns one contiguous block obtained from an
//! [`Allocator`](rivet_core::Allocator), tracks its live length and its
//! capacity, and grows by relocating into a block twice the size. Every
//! operation that acquires storage or constructs elements is
//! all-or-nothing: on failure the vector is left exactly as it was.
//!
//! # Architecture
//!
//! ```text
//! Vector<T, A>
//! ├── RawBuf<T, A>        (owned block + allocator, released on drop)
//! ├── len                 (slots [0, len) are live)
//! ├── Block               (fresh block, released on drop unless installed)
//! ├── ConstructGuard      (undo log: destroys what it built unless committed)
//! └── Iter / IterMut / IntoIter
//! ```
//!
//! This crate holds the workspace's element-lifetime `unsafe` code. It is
//! confined to `raw.rs`, `guard.rs`, `vector.rs` and `iter.rs`; every block
//! carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod growth;
mod guard;
pub mod iter;
mod raw;
pub mod vector;

// Public re-exports for the primary API surface.
pub use error::VecError;
pub use growth::GrowthPolicy;
pub use iter::{IntoIter, Iter, IterMut};
pub use rivet_core::{Allocator, Global};
pub use vector::Vector;

/// Build a [`Vector`] with the global allocator.
///
/// `vector![x; n]` holds `n` clones of `x`; `vector![a, b, c]` holds the
/// listed values. Panics if allocation fails.
///
/// ```
/// use rivet_vec::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// let zeros = vector![0u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        match $crate::Vector::from_elem($n, $elem) {
            ::core::result::Result::Ok(vector) => vector,
            ::core::result::Result::Err(err) => ::core::panic!("{}", err),
        }
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::Vector<_> as ::core::iter::FromIterator<_>>::from_iter([$($x),+])
    };
}
