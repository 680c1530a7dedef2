//! Rivet: a contiguous growable vector with a pluggable allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Rivet sub-crates. For most users, adding `rivet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rivet::prelude::*;
//!
//! let mut v = Vector::new();
//! for i in 0..3 {
//!     v.push(i).unwrap();
//! }
//! assert_eq!(v.len(), 3);
//! assert_eq!(v.capacity(), 4);
//!
//! v.resize(1).unwrap();
//! assert_eq!(v.at(0), Ok(&0));
//! assert_eq!(v.at(1), Err(VecError::OutOfBounds { index: 1, len: 1 }));
//!
//! v.clear();
//! assert!(v.is_empty());
//! assert_eq!(v.capacity(), 4);
//! ```
//!
//! # Custom allocators
//!
//! Any type implementing [`Allocator`](prelude::Allocator) can back a
//! vector. Shared references to an allocator are allocators too, so
//! several vectors can draw from one instance:
//!
//! ```rust
//! use rivet::prelude::*;
//!
//! let alloc = Global;
//! let mut a = Vector::new_in(&alloc);
//! let mut b = Vector::new_in(&alloc);
//! a.push("left").unwrap();
//! b.push("right").unwrap();
//! assert_eq!(a.len() + b.len(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`alloc`] | `rivet-core` | Allocator contract, `Global`, allocation errors |
//! | [`vec`] | `rivet-vec` | `Vector`, its iterators, growth policy, `VecError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Allocator contract and error types (`rivet-core`).
///
/// Implement [`alloc::Allocator`] to control where a vector's storage
/// comes from and how its elements are built and torn down.
pub use rivet_core as alloc;

/// The vector and its iterators (`rivet-vec`).
///
/// [`vec::Vector`] is also available in the [`prelude`], together with the
/// [`vector!`](vec::vector) construction macro.
pub use rivet_vec as vec;

/// Common imports for typical Rivet usage.
///
/// ```rust
/// use rivet::prelude::*;
/// ```
pub mod prelude {
    // Allocation
    pub use rivet_core::{AllocError, Allocator, ConstructError, Global};

    // Container
    pub use rivet_vec::{vector, GrowthPolicy, VecError, Vector};
}
