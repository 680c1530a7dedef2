//! Capacity growth policy.

use crate::error::VecError;

/// Geometric growth applied when `push` finds no spare capacity.
///
/// Doubling keeps the total relocation cost of `n` pushes in O(n).
#[derive(Clone, Copy, Debug)]
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Capacity of the first block allocated by `push`.
    pub const MIN_NON_ZERO_CAP: usize = 1;

    /// Multiplier applied to the current capacity on growth.
    pub const FACTOR: usize = 2;

    /// Capacity to grow to from `current`: `max(1, 2 × current)`.
    pub fn next_capacity(current: usize) -> Result<usize, VecError> {
        if current == 0 {
            return Ok(Self::MIN_NON_ZERO_CAP);
        }
        current
            .checked_mul(Self::FACTOR)
            .ok_or(VecError::CapacityOverflow)
    }
}
