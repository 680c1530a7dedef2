//! Integration test: `Vector` checked operation-by-operation against
//! `std::vec::Vec`.
//!
//! Two drivers share one operation set: a proptest strategy that shrinks
//! failing sequences, and a seeded ChaCha8 stream that runs long sequences
//! reproducibly. After every step the two containers must agree on
//! contents, and the vector's capacity must obey the growth rules.

use proptest::prelude::*;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rivet_test_utils::TrackingAllocator;
use rivet_vec::{VecError, Vector};

#[derive(Clone, Debug)]
enum Op {
    Push(u32),
    Pop,
    RemoveLast,
    Reserve(usize),
    Resize(usize),
    Truncate(usize),
    Clear,
    ShrinkToFit,
    Set(usize, u32),
    CloneSwap,
}

/// Apply `op` to both containers and check they still agree.
fn apply(v: &mut Vector<u32, TrackingAllocator>, model: &mut Vec<u32>, op: &Op) {
    let cap_before = v.capacity();
    match *op {
        Op::Push(x) => {
            let was_full = v.len() == cap_before;
            v.push(x).unwrap();
            model.push(x);
            if was_full {
                assert_eq!(v.capacity(), (cap_before * 2).max(1));
            } else {
                assert_eq!(v.capacity(), cap_before);
            }
        }
        Op::Pop => assert_eq!(v.pop(), model.pop()),
        Op::RemoveLast => {
            let expected = if model.pop().is_some() {
                Ok(())
            } else {
                Err(VecError::Empty)
            };
            assert_eq!(v.remove_last(), expected);
        }
        Op::Reserve(n) => {
            v.reserve(n).unwrap();
            assert_eq!(v.capacity(), cap_before.max(n));
        }
        Op::Resize(n) => {
            v.resize(n).unwrap();
            model.resize(n, 0);
            if n > cap_before {
                assert_eq!(v.capacity(), n);
            } else {
                assert_eq!(v.capacity(), cap_before);
            }
        }
        Op::Truncate(n) => {
            v.truncate(n);
            model.truncate(n);
            assert_eq!(v.capacity(), cap_before);
        }
        Op::Clear => {
            v.clear();
            model.clear();
            assert_eq!(v.capacity(), cap_before);
        }
        Op::ShrinkToFit => {
            v.shrink_to_fit().unwrap();
            assert_eq!(v.capacity(), model.len());
        }
        Op::Set(i, x) => {
            let expected = if i < model.len() {
                model[i] = x;
                Ok(())
            } else {
                Err(VecError::OutOfBounds {
                    index: i,
                    len: model.len(),
                })
            };
            assert_eq!(v.at_mut(i).map(|slot| *slot = x), expected);
        }
        Op::CloneSwap => {
            let copy = v.clone();
            assert_eq!(copy.capacity(), v.len());
            *v = copy;
        }
    }
    assert_eq!(v.as_slice(), model.as_slice());
    assert!(v.len() <= v.capacity());
}

fn run(ops: &[Op]) {
    let alloc = TrackingAllocator::new();
    {
        let mut v = Vector::new_in(alloc.clone());
        let mut model = Vec::new();
        for op in ops {
            apply(&mut v, &mut model, op);
        }
        assert_eq!(alloc.live_blocks(), usize::from(v.capacity() > 0));
    }
    alloc.assert_no_leaks();
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        1 => Just(Op::RemoveLast),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => (0usize..64).prop_map(Op::Resize),
        1 => (0usize..64).prop_map(Op::Truncate),
        1 => Just(Op::Clear),
        1 => Just(Op::ShrinkToFit),
        1 => (0usize..64, any::<u32>()).prop_map(|(i, x)| Op::Set(i, x)),
        1 => Just(Op::CloneSwap),
    ]
}

proptest! {
    #[test]
    fn matches_std_vec(ops in prop::collection::vec(op_strategy(), 0..200)) {
        run(&ops);
    }
}

fn random_op(rng: &mut ChaCha8Rng) -> Op {
    let arg = (rng.next_u64() % 128) as usize;
    match rng.next_u64() % 14 {
        0..=4 => Op::Push(rng.next_u32()),
        5 => Op::Pop,
        6 => Op::RemoveLast,
        7 => Op::Reserve(arg),
        8 => Op::Resize(arg),
        9 => Op::Truncate(arg),
        10 => Op::Clear,
        11 => Op::ShrinkToFit,
        12 => Op::Set(arg, rng.next_u32()),
        _ => Op::CloneSwap,
    }
}

#[test]
fn seeded_stress_matches_std_vec() {
    for seed in [0u64, 1, 42, 0xDEAD_BEEF] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ops: Vec<Op> = (0..5_000).map(|_| random_op(&mut rng)).collect();
        run(&ops);
    }
}

#[test]
fn iterators_agree_with_slice_view() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let v: Vector<u32> = (0..257).map(|_| rng.next_u32()).collect();
    let model: Vec<u32> = v.as_slice().to_vec();

    assert!(v.iter().eq(model.iter()));
    assert!(v.iter().rev().eq(model.iter().rev()));
    for step in [1usize, 3, 16, 100] {
        let stepped: Vec<&u32> = v.iter().step_by(step).collect();
        let expected: Vec<&u32> = model.iter().step_by(step).collect();
        assert_eq!(stepped, expected);
    }
    assert_eq!(v.into_iter().collect::<Vec<_>>(), model);
}
