//! Error types reported by allocation strategies.

use std::error::Error;
use std::fmt;

/// Errors from [`Allocator::allocate`](crate::Allocator::allocate) and
/// layout computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The strategy could not provide a block of the requested layout.
    OutOfMemory {
        /// Size of the refused request in bytes.
        bytes: usize,
        /// Alignment of the refused request.
        align: usize,
    },
    /// `count` elements of `elem_size` bytes do not fit in `isize::MAX`
    /// bytes.
    LayoutOverflow {
        /// Number of elements requested.
        count: usize,
        /// Size of one element in bytes.
        elem_size: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { bytes, align } => {
                write!(f, "allocation of {bytes} bytes (align {align}) failed")
            }
            Self::LayoutOverflow { count, elem_size } => {
                write!(
                    f,
                    "layout overflow: {count} elements of {elem_size} bytes exceed isize::MAX"
                )
            }
        }
    }
}

impl Error for AllocError {}

/// An allocator refused to initialize a slot in
/// [`Allocator::construct`](crate::Allocator::construct).
///
/// The value that was to be placed in the slot has already been dropped
/// by the allocator when this error is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructError {
    /// Human-readable description of the refusal.
    pub reason: String,
}

impl ConstructError {
    /// Create a construction error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "construction refused: {}", self.reason)
    }
}

impl Error for ConstructError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_memory_display_names_size() {
        let err = AllocError::OutOfMemory {
            bytes: 4096,
            align: 8,
        };
        assert_eq!(err.to_string(), "allocation of 4096 bytes (align 8) failed");
    }

    #[test]
    fn construct_error_keeps_reason() {
        let err = ConstructError::new("injected");
        assert_eq!(err.reason, "injected");
        assert!(err.to_string().contains("injected"));
    }
}
