//! Allocator contract and error types for the Rivet container.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! capability object that `rivet-vec` consumes for every storage and
//! lifetime operation:
//!
//! ```text
//! Allocator
//! ├── allocate(layout)        -> Result<NonNull<u8>, AllocError>
//! ├── deallocate(ptr, layout)    (never fails)
//! ├── construct(slot, value)  -> Result<(), ConstructError>
//! └── destroy(slot)              (never fails)
//! ```
//!
//! [`Global`] is the default strategy and forwards to `std::alloc`.
//! Zero-sized requests are never forwarded to an allocator; callers use a
//! dangling, well-aligned pointer instead (see [`layout::array`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![warn(unsafe_op_in_unsafe_fn)]

pub mod alloc;
pub mod error;
pub mod global;
pub mod layout;

pub use alloc::Allocator;
pub use error::{AllocError, ConstructError};
pub use global::Global;
