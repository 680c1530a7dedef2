//! Benchmark workloads for the Rivet vector.
//!
//! Provides fixed workload sizes and deterministic input data so the
//! `Vector` and `std::vec::Vec` runs in `benches/` see identical inputs:
//!
//! - [`WORKLOADS`]: small, medium and large element counts
//! - [`sample_values`]: deterministic pseudo-random `u64` payloads
//! - [`fill_vector`]: a `Vector` built by repeated `push`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rivet_vec::Vector;

/// A named element count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    /// Label used in benchmark ids.
    pub name: &'static str,
    /// Number of elements.
    pub len: usize,
}

/// The standard workload sizes.
pub const WORKLOADS: [Workload; 3] = [
    Workload {
        name: "small",
        len: 16,
    },
    Workload {
        name: "medium",
        len: 1024,
    },
    Workload {
        name: "large",
        len: 65_536,
    },
];

/// Generate `len` deterministic payload values from `seed`.
///
/// A 64-bit LCG step per element; the same seed always yields the same
/// sequence.
pub fn sample_values(len: usize, seed: u64) -> Vec<u64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            state >> 11
        })
        .collect()
}

/// Build a `Vector` from `values` by pushing one element at a time.
///
/// Panics if the global allocator refuses a block.
pub fn fill_vector(values: &[u64]) -> Vector<u64> {
    let mut v = Vector::new();
    for &x in values {
        if let Err(err) = v.push(x) {
            panic!("benchmark fill failed: {err}");
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_values_deterministic() {
        assert_eq!(sample_values(100, 42), sample_values(100, 42));
        assert_ne!(sample_values(100, 42), sample_values(100, 43));
    }

    #[test]
    fn fill_vector_matches_input() {
        let values = sample_values(WORKLOADS[1].len, 7);
        let v = fill_vector(&values);
        assert_eq!(v.as_slice(), values.as_slice());
        assert_eq!(v.capacity(), 1024);
    }

    #[test]
    fn workloads_are_ascending() {
        assert!(WORKLOADS.windows(2).all(|w| w[0].len < w[1].len));
    }
}
