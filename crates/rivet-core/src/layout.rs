//! Layout computation for contiguous element blocks.

use std::alloc::Layout;
use std::mem;

use crate::error::AllocError;

/// Layout of a block holding `count` values of `T`.
///
/// Returns [`AllocError::LayoutOverflow`] when the block would exceed
/// `isize::MAX` bytes.
pub fn array<T>(count: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(count).map_err(|_| AllocError::LayoutOverflow {
        count,
        elem_size: mem::size_of::<T>(),
    })
}

/// Whether a block of `count` values of `T` occupies no memory.
///
/// Zero-sized blocks are never passed to an allocator.
pub fn is_zero_sized<T>(count: usize) -> bool {
    count == 0 || mem::size_of::<T>() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn array_layout_matches_element_size() {
        let layout = array::<u64>(10).unwrap();
        assert_eq!(layout.size(), 80);
        assert_eq!(layout.align(), mem::align_of::<u64>());
    }

    #[test]
    fn oversized_array_reports_overflow() {
        let err = array::<u64>(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            AllocError::LayoutOverflow {
                count: usize::MAX,
                elem_size: 8,
            }
        );
    }

    #[test]
    fn zero_sized_blocks() {
        assert!(is_zero_sized::<u32>(0));
        assert!(is_zero_sized::<()>(100));
        assert!(!is_zero_sized::<u8>(1));
    }

    proptest! {
        #[test]
        fn array_size_is_count_times_element(count in 0usize..1 << 20) {
            let layout = array::<u32>(count).unwrap();
            prop_assert_eq!(layout.size(), count * 4);
            prop_assert_eq!(layout.align(), 4);
        }

        #[test]
        fn zero_sized_iff_no_bytes(count in 0usize..1024) {
            let bytes = array::<u16>(count).unwrap().size();
            prop_assert_eq!(is_zero_sized::<u16>(count), bytes == 0);
        }
    }
}
