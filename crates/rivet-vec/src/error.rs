//! Container error types.

use std::error::Error;
use std::fmt;

use rivet_core::{AllocError, ConstructError};

/// Errors that can occur during vector operations.
///
/// Every fallible operation that returns one of these leaves the vector
/// exactly as it was before the call, except
/// [`Vector::try_clone_from`](crate::Vector::try_clone_from), which leaves
/// the destination empty, and
/// [`Vector::extend_from_slice`](crate::Vector::extend_from_slice), which
/// keeps the elements appended before the failing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VecError {
    /// Indexed access past the live range.
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// The allocator could not provide a new block.
    AllocationFailed {
        /// Size of the refused request in bytes.
        bytes: usize,
        /// Alignment of the refused request.
        align: usize,
    },
    /// The allocator refused to construct an element.
    ConstructionFailed {
        /// Index of the slot whose construction was refused.
        index: usize,
        /// Reason reported by the allocator.
        reason: String,
    },
    /// The requested capacity exceeds `isize::MAX` bytes.
    CapacityOverflow,
    /// Attempted to remove an element from an empty vector.
    Empty,
}

impl VecError {
    /// Attach the slot index to a refused construction.
    pub fn construction(index: usize, err: ConstructError) -> Self {
        Self::ConstructionFailed {
            index,
            reason: err.reason,
        }
    }
}

impl From<AllocError> for VecError {
    fn from(err: AllocError) -> Self {
        match err {
            AllocError::OutOfMemory { bytes, align } => Self::AllocationFailed { bytes, align },
            AllocError::LayoutOverflow { .. } => Self::CapacityOverflow,
        }
    }
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
            Self::AllocationFailed { bytes, align } => {
                write!(f, "allocation of {bytes} bytes (align {align}) failed")
            }
            Self::ConstructionFailed { index, reason } => {
                write!(f, "construction of element {index} failed: {reason}")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::Empty => write!(f, "vector is empty"),
        }
    }
}

impl Error for VecError {}
